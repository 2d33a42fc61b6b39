use once_cell::sync::Lazy;

/// A capacity-constrained access point at a fixed position in the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    pub name: String,
    pub location: (f64, f64),
    pub capacity: u32,
}

impl Facility {
    pub fn new(name: &str, location: (f64, f64), capacity: u32) -> Self {
        Self {
            name: name.to_string(),
            location,
            capacity,
        }
    }
}

/// Read-only facility set for a run. Genes are indices into this list, so
/// the ordering here fixes both the gene encoding and the report order.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityRegistry {
    facilities: Vec<Facility>,
}

impl FacilityRegistry {
    pub fn new(facilities: Vec<Facility>) -> Self {
        Self { facilities }
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Facility> {
        self.facilities.get(index)
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn total_capacity(&self) -> u64 {
        self.facilities.iter().map(|f| u64::from(f.capacity)).sum()
    }

    /// Remaining-capacity ledger, index-aligned with the facility list.
    /// Callers build one per initialization/mutation/repair pass and drop it.
    pub fn fresh_ledger(&self) -> Vec<u32> {
        self.facilities.iter().map(|f| f.capacity).collect()
    }
}

/// Euclidean distance between two points in the plane.
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// The four access points of the reference deployment.
pub static DEFAULT_ACCESS_POINTS: Lazy<FacilityRegistry> = Lazy::new(|| {
    FacilityRegistry::new(vec![
        Facility::new("APA", (0.0, 0.0), 64),
        Facility::new("APB", (80.0, 0.0), 64),
        Facility::new("APC", (0.0, 80.0), 128),
        Facility::new("APD", (80.0, 80.0), 128),
    ])
});
