use crate::core::state::Ticks;

/// Width of the name field in job files; [`parse_jobs`](super::input::parse_jobs)
/// cuts longer names to it. It only applies to file ingestion: names passed to
/// [`JobSpec::new`] or made by the random generator are kept whole.
pub const NAME_WIDTH: usize = 3;

/// One line of input: a job name and the CPU time it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub name: String,
    pub burst_time: Ticks,
}

impl JobSpec {
    pub fn new(name: impl Into<String>, burst_time: Ticks) -> Self {
        Self {
            name: name.into(),
            burst_time,
        }
    }
}

impl<S: Into<String>> From<(S, Ticks)> for JobSpec {
    fn from((name, burst_time): (S, Ticks)) -> Self {
        Self::new(name, burst_time)
    }
}
