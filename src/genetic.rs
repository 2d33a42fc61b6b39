use rand::seq::{index, SliceRandom};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use crate::clients::Client;
use crate::error::SolverError;
use crate::registry::{distance, FacilityRegistry};

/// One candidate solution: a facility index per client, index-aligned with
/// the client list.
pub type Assignment = Vec<usize>;

/// Capacitated assignment solver. Evolves a fixed-size population of
/// assignments over a fixed number of generations; lower total distance is
/// better and an over-capacity assignment scores infinite.
pub struct GeneticAlgorithm<'a> {
    pub registry: &'a FacilityRegistry,
    pub population_size: usize,
    pub generations: usize,
    pub mutation_rate: f64,
    pub tournament_size: usize,
}

impl GeneticAlgorithm<'_> {
    /// Runs the full evolutionary search and returns the best assignment of
    /// the terminal population (first occurrence on ties). The whole run is
    /// driven by a single seeded RNG, so identical inputs and seed reproduce
    /// the identical result.
    pub fn run(&self, clients: &[Client], seed: u64) -> Result<Assignment, SolverError> {
        self.validate(clients.len())?;
        let mut rng = StdRng::seed_from_u64(seed);

        info!(
            clients = clients.len(),
            population = self.population_size,
            generations = self.generations,
            mutation_rate = self.mutation_rate,
            tournament = self.tournament_size,
            "starting evolutionary run"
        );

        let mut population = self.initialize(clients.len(), &mut rng)?;

        for generation in 0..self.generations {
            let fitness = self.evaluate_population(&population, clients)?;
            log_generation(generation, &fitness);

            // Full replacement: the next population is materialized before
            // the swap, and the current best is not carried over (no elitism).
            let mut next_population = Vec::with_capacity(self.population_size);
            while next_population.len() < self.population_size {
                let parent1 = self.select(&population, &fitness, &mut rng)?;
                let parent2 = self.select(&population, &fitness, &mut rng)?;
                let child = self.crossover(parent1, parent2, &mut rng);
                let child = self.mutate(child, &mut rng)?;
                let child = self.repair(child, &mut rng)?;
                next_population.push(child);
            }
            population = next_population;
        }

        let fitness = self.evaluate_population(&population, clients)?;
        let best = argmin(&fitness);
        info!(fitness = fitness[best], "run terminated");
        Ok(population.swap_remove(best))
    }

    fn validate(&self, client_count: usize) -> Result<(), SolverError> {
        if self.population_size == 0 {
            return Err(SolverError::InvalidConfiguration(
                "population size must be positive".to_string(),
            ));
        }
        if self.generations == 0 {
            return Err(SolverError::InvalidConfiguration(
                "generation count must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SolverError::InvalidConfiguration(format!(
                "mutation rate {} outside [0, 1]",
                self.mutation_rate
            )));
        }
        if self.tournament_size == 0 || self.population_size < self.tournament_size {
            return Err(SolverError::InvalidConfiguration(format!(
                "population size {} cannot host a tournament of {}",
                self.population_size, self.tournament_size
            )));
        }
        if self.registry.is_empty() {
            return Err(SolverError::InvalidConfiguration(
                "facility registry is empty".to_string(),
            ));
        }
        let capacity = self.registry.total_capacity();
        if capacity < client_count as u64 {
            return Err(SolverError::CapacityExhausted {
                capacity,
                clients: client_count,
            });
        }
        Ok(())
    }

    /// Total assignment distance, or infinity as soon as any facility
    /// exceeds its capacity.
    pub fn evaluate(&self, assignment: &[usize], clients: &[Client]) -> Result<f64, SolverError> {
        if assignment.len() != clients.len() {
            return Err(SolverError::InvalidInput(format!(
                "assignment length {} does not match client count {}",
                assignment.len(),
                clients.len()
            )));
        }

        let mut occupancy = vec![0u32; self.registry.len()];
        let mut total = 0.0;

        for (client, &gene) in clients.iter().zip(assignment) {
            let facility = self.registry.get(gene).ok_or_else(|| {
                SolverError::InvalidInput(format!(
                    "assignment references unknown facility index {gene}"
                ))
            })?;
            occupancy[gene] += 1;
            if occupancy[gene] > facility.capacity {
                return Ok(f64::INFINITY);
            }
            total += distance(client.point(), facility.location);
        }

        Ok(total)
    }

    fn evaluate_population(
        &self,
        population: &[Assignment],
        clients: &[Client],
    ) -> Result<Vec<f64>, SolverError> {
        population
            .iter()
            .map(|individual| self.evaluate(individual, clients))
            .collect()
    }

    /// Builds a feasible starting population: each individual draws its
    /// genes uniformly among the facilities with remaining capacity, against
    /// its own private ledger.
    fn initialize<R: Rng>(
        &self,
        client_count: usize,
        rng: &mut R,
    ) -> Result<Vec<Assignment>, SolverError> {
        let mut population = Vec::with_capacity(self.population_size);

        for _ in 0..self.population_size {
            let mut ledger = self.registry.fresh_ledger();
            let mut genes = Vec::with_capacity(client_count);
            for _ in 0..client_count {
                let pick =
                    pick_open_facility(&ledger, rng).ok_or(SolverError::CapacityExhausted {
                        capacity: self.registry.total_capacity(),
                        clients: client_count,
                    })?;
                genes.push(pick);
                ledger[pick] -= 1;
            }
            population.push(genes);
        }

        Ok(population)
    }

    /// Tournament selection: samples `tournament_size` distinct population
    /// indices and returns the one with the lowest fitness. Ties keep the
    /// earliest index in sample order.
    fn select<'p, R: Rng>(
        &self,
        population: &'p [Assignment],
        fitness: &[f64],
        rng: &mut R,
    ) -> Result<&'p Assignment, SolverError> {
        if population.len() < self.tournament_size {
            return Err(SolverError::InvalidConfiguration(format!(
                "population size {} cannot host a tournament of {}",
                population.len(),
                self.tournament_size
            )));
        }

        let contenders = index::sample(rng, population.len(), self.tournament_size);
        let mut best = contenders.index(0);
        for candidate in contenders.iter().skip(1) {
            if fitness[candidate] < fitness[best] {
                best = candidate;
            }
        }
        Ok(&population[best])
    }

    /// Single-point crossover: cut uniformly in `[1, len - 1]`, prefix from
    /// parent1, suffix from parent2. The child may violate capacities; that
    /// is restored downstream by repair.
    fn crossover<R: Rng>(&self, parent1: &[usize], parent2: &[usize], rng: &mut R) -> Assignment {
        debug_assert_eq!(parent1.len(), parent2.len());
        if parent1.len() < 2 {
            // no interior cut point exists
            return parent1.to_vec();
        }
        let cut = rng.gen_range(1..parent1.len());
        let mut child = parent1[..cut].to_vec();
        child.extend_from_slice(&parent2[cut..]);
        child
    }

    /// Reassigns each gene with probability `mutation_rate` to a uniformly
    /// chosen facility with remaining ledger capacity, then repairs.
    ///
    /// The ledger starts at full capacity and deliberately ignores the
    /// occupancy already present in the individual, so mutation alone can
    /// overcommit a facility relative to the untouched genes; the repair
    /// pass restores feasibility.
    fn mutate<R: Rng>(&self, mut genes: Assignment, rng: &mut R) -> Result<Assignment, SolverError> {
        let mut ledger = self.registry.fresh_ledger();

        for gene in genes.iter_mut() {
            if rng.gen::<f64>() < self.mutation_rate {
                if let Some(pick) = pick_open_facility(&ledger, rng) {
                    *gene = pick;
                    ledger[pick] -= 1;
                }
            }
        }

        self.repair(genes, rng)
    }

    /// Restores capacity feasibility. Genes are walked left to right against
    /// a fresh ledger; a gene whose facility still has capacity is kept,
    /// otherwise it is replaced by a uniformly chosen facility with capacity
    /// left. Earlier genes are therefore preferentially preserved when
    /// capacity is contended.
    fn repair<R: Rng>(&self, mut genes: Assignment, rng: &mut R) -> Result<Assignment, SolverError> {
        let capacity = self.registry.total_capacity();
        if capacity < genes.len() as u64 {
            return Err(SolverError::CapacityExhausted {
                capacity,
                clients: genes.len(),
            });
        }

        let mut ledger = self.registry.fresh_ledger();
        for gene in genes.iter_mut() {
            if *gene < ledger.len() && ledger[*gene] > 0 {
                ledger[*gene] -= 1;
                continue;
            }
            // total capacity covers the genome, so an open facility exists
            if let Some(pick) = pick_open_facility(&ledger, rng) {
                *gene = pick;
                ledger[pick] -= 1;
            }
        }

        Ok(genes)
    }
}

/// Uniform choice among the facilities with remaining capacity, if any.
fn pick_open_facility<R: Rng>(ledger: &[u32], rng: &mut R) -> Option<usize> {
    let open: Vec<usize> = ledger
        .iter()
        .enumerate()
        .filter(|(_, &remaining)| remaining > 0)
        .map(|(index, _)| index)
        .collect();
    open.choose(rng).copied()
}

/// Index of the minimum fitness, first occurrence on ties.
fn argmin(fitness: &[f64]) -> usize {
    let mut best = 0;
    for (index, &value) in fitness.iter().enumerate().skip(1) {
        if value < fitness[best] {
            best = index;
        }
    }
    best
}

fn log_generation(generation: usize, fitness: &[f64]) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &f in fitness {
        min = min.min(f);
        max = max.max(f);
        sum += f;
    }
    debug!(
        generation,
        best = min,
        worst = max,
        avg = sum / fitness.len() as f64,
        "generation evaluated"
    );
}
