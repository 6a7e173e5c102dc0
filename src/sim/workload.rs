use std::ops::RangeInclusive;

use rand::prelude::*;

use super::{error::ConfigError, job::JobSpec};
use crate::core::Ticks;

/// Generates `count` jobs named `P0..` with bursts drawn uniformly from `bursts`.
/// The same seed always yields the same workload.
///
/// Names are not cut to [`NAME_WIDTH`](super::job::NAME_WIDTH), which would
/// collide from `P100` on; every generated name is distinct.
pub fn random_jobs(
    count: usize,
    bursts: RangeInclusive<Ticks>,
    seed: u64,
) -> Result<Vec<JobSpec>, ConfigError> {
    let (min, max) = (*bursts.start(), *bursts.end());
    if min == 0 || min > max {
        return Err(ConfigError::InvalidBurstRange { min, max });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let jobs = (0..count)
        .map(|i| JobSpec::new(format!("P{i}"), rng.random_range(min..=max)))
        .collect();

    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_workload() {
        let a = random_jobs(50, 1..=9, 7).unwrap();
        let b = random_jobs(50, 1..=9, 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
        assert_eq!(a[49].name, "P49");
        assert!(a.iter().all(|job| (1..=9).contains(&job.burst_time)));
    }

    #[test]
    fn names_stay_distinct_past_the_file_name_width() {
        let jobs = random_jobs(150, 1..=3, 11).unwrap();
        assert_eq!(jobs[100].name, "P100");
        assert!(jobs[100].name.len() > crate::sim::NAME_WIDTH);

        let names: rustc_hash::FxHashSet<_> = jobs.iter().map(|job| job.name.as_str()).collect();
        assert_eq!(names.len(), jobs.len());
        let sim = crate::sim::Sim::new(crate::sim::SimConfig::new(crate::sim::Policy::Fcfs), jobs);
        assert!(sim.is_ok());
    }

    #[test]
    fn zero_or_inverted_ranges_are_rejected() {
        assert_eq!(
            random_jobs(3, 0..=4, 1),
            Err(ConfigError::InvalidBurstRange { min: 0, max: 4 })
        );
        assert_eq!(
            random_jobs(3, 5..=2, 1),
            Err(ConfigError::InvalidBurstRange { min: 5, max: 2 })
        );
    }
}
