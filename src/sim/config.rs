use super::policy::Policy;

/// How one simulation run is set up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub policy: Policy,
    /// Upper bound on the job table size. `None` means unbounded.
    pub max_jobs: Option<usize>,
    /// Keep the execution trace in `Outcome::trace` after `Sim::run`.
    pub trace: bool,
}

impl SimConfig {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            max_jobs: None,
            trace: false,
        }
    }

    pub fn with_max_jobs(mut self, max_jobs: usize) -> Self {
        self.max_jobs = Some(max_jobs);
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
