use std::fmt::Write;

use crate::registry::FacilityRegistry;

/// Groups an assignment by facility: one bucket per registry entry, each
/// holding the 1-based display indices of its clients in input order.
pub fn group_by_facility(assignment: &[usize], registry: &FacilityRegistry) -> Vec<Vec<usize>> {
    let mut buckets = vec![Vec::new(); registry.len()];
    for (position, &gene) in assignment.iter().enumerate() {
        if let Some(bucket) = buckets.get_mut(gene) {
            bucket.push(position + 1);
        }
    }
    buckets
}

/// Textual summary of the best assignment, one block per facility in
/// registry order.
pub fn render(assignment: &[usize], registry: &FacilityRegistry) -> String {
    let buckets = group_by_facility(assignment, registry);
    let mut out = String::new();

    for (facility, members) in registry.facilities().iter().zip(&buckets) {
        let _ = writeln!(out, "-------------{}--------------", facility.name);
        let _ = writeln!(out, "{}: {:?}", facility.name, members);
        let _ = writeln!(out, "(clients: {})", members.len());
    }

    out
}
