/// Errors that abort an evolutionary run.
///
/// All three kinds are unrecoverable for the current run; the caller is
/// expected to surface the message and terminate. An infeasible individual
/// during scoring is *not* an error, it is ranked worst via an infinite
/// fitness.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// Malformed data handed to the solver: assignment/client length
    /// mismatch, a gene referencing a facility outside the registry, or an
    /// unparsable client record.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A run parameter outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The registry cannot host the client set at all.
    #[error("capacity exhausted: total facility capacity {capacity} cannot host {clients} clients")]
    CapacityExhausted { capacity: u64, clients: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
