//! Property tests for invariants that must hold for every job list.
//!
//! Run with: `cargo test --test properties`

use proptest::prelude::*;
use sched_sim::{JobSpec, Policy, Report, SchedEvent, Sim, SimConfig, run};

fn job_list() -> impl Strategy<Value = Vec<JobSpec>> {
    prop::collection::vec(1u64..=20, 1..=12).prop_map(|bursts| {
        bursts
            .into_iter()
            .enumerate()
            .map(|(i, burst)| JobSpec::new(format!("P{i}"), burst))
            .collect()
    })
}

fn any_policy() -> impl Strategy<Value = Policy> {
    prop_oneof![
        Just(Policy::Fcfs),
        Just(Policy::Sjf),
        (1i64..=8).prop_map(|q| Policy::round_robin(q).unwrap()),
    ]
}

fn total_burst(jobs: &[JobSpec]) -> u64 {
    jobs.iter().map(|job| job.burst_time).sum()
}

fn burst_of(jobs: &[JobSpec], name: &str) -> u64 {
    jobs.iter()
        .find(|job| job.name == name)
        .map(|job| job.burst_time)
        .unwrap()
}

proptest! {
    #[test]
    fn turnaround_is_wait_plus_burst(jobs in job_list(), policy in any_policy()) {
        let report = run(policy, jobs.clone()).unwrap();
        prop_assert_eq!(report.jobs.len(), jobs.len());
        for job in &report.jobs {
            prop_assert_eq!(job.turnaround_time, job.wait_time + burst_of(&jobs, &job.name));
        }
    }

    #[test]
    fn last_completion_is_total_burst(jobs in job_list(), policy in any_policy()) {
        let report = run(policy, jobs.clone()).unwrap();
        prop_assert_eq!(report.max_turnaround(), total_burst(&jobs));
        prop_assert_eq!(report.total_time, total_burst(&jobs));
    }

    #[test]
    fn fcfs_wait_is_prefix_sum_of_bursts(jobs in job_list()) {
        let report = run(Policy::Fcfs, jobs.clone()).unwrap();
        let mut elapsed = 0;
        for (spec, job) in jobs.iter().zip(&report.jobs) {
            prop_assert_eq!(&spec.name, &job.name);
            prop_assert_eq!(job.wait_time, elapsed);
            elapsed += spec.burst_time;
        }
    }

    #[test]
    fn runs_are_deterministic(jobs in job_list(), policy in any_policy()) {
        let sim = Sim::new(SimConfig::new(policy), jobs).unwrap();
        let first: Report = sim.run().unwrap().report;
        prop_assert_eq!(first, sim.run().unwrap().report);
    }

    #[test]
    fn sjf_order_is_a_stable_sort_by_burst(jobs in job_list()) {
        let report = run(Policy::Sjf, jobs.clone()).unwrap();
        let mut expected = jobs.clone();
        expected.sort_by_key(|job| job.burst_time);
        let got: Vec<&str> = report.jobs.iter().map(|j| j.name.as_str()).collect();
        let want: Vec<&str> = expected.iter().map(|j| j.name.as_str()).collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn round_robin_quantum_one_takes_as_long_as_fcfs(jobs in job_list()) {
        let fcfs = run(Policy::Fcfs, jobs.clone()).unwrap();
        let rr = run(Policy::round_robin(1).unwrap(), jobs).unwrap();
        prop_assert_eq!(fcfs.total_time, rr.total_time);
    }

    #[test]
    fn round_robin_clock_never_goes_backwards(jobs in job_list(), quantum in 1i64..=8) {
        let config = SimConfig::new(Policy::round_robin(quantum).unwrap()).with_trace(true);
        let outcome = Sim::new(config, jobs.clone()).unwrap().run().unwrap();

        let mut remaining: Vec<u64> = jobs.iter().map(|job| job.burst_time).collect();
        let mut clock = 0;
        for event in &outcome.trace {
            if let SchedEvent::SliceExpired { at, job, .. } | SchedEvent::Completed { at, job, .. } = *event {
                let slice = remaining[job].min(quantum as u64);
                prop_assert!(slice > 0);
                prop_assert_eq!(at, clock + slice);
                remaining[job] -= slice;
                clock = at;
            }
        }
        prop_assert!(remaining.iter().all(|&r| r == 0));
    }

    #[test]
    fn quantum_at_least_longest_burst_matches_fcfs(jobs in job_list()) {
        let fcfs = run(Policy::Fcfs, jobs.clone()).unwrap();
        let rr = run(Policy::round_robin(20).unwrap(), jobs).unwrap();
        prop_assert_eq!(fcfs.jobs, rr.jobs);
    }
}
