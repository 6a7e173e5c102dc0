use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use std::{cmp::Ordering, collections::VecDeque};

// Index into Job Vec; doubles as the job's input position
pub type JobId = usize;
pub type Ticks = u64;
new_key_type! {
    pub struct QueueId;
}

/// Priority of a job in a shortest-first run queue: smaller burst wins, and
/// on equal bursts the job that came first in the input wins.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct BurstKey {
    pub burst: Ticks,
    pub seq: JobId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Waiting,
    Running,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub name: String,
    pub state: JobState,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub remaining_time: Ticks,
    pub wait_time: Ticks,
    pub turnaround_time: Ticks,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl Job {
    pub fn finished(&self) -> bool {
        self.state == JobState::Finished
    }

    /// Time from arrival to first dispatch, once the job has run at all.
    pub fn response_time(&self) -> Option<Ticks> {
        self.start_time.map(|start| start - self.arrival_time)
    }
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop BurstKey's Ord
impl PartialOrd for BurstKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BurstKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .burst
            .cmp(&self.burst)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug)]
pub enum RunQueue {
    Fifo {
        jobs: VecDeque<JobId>,
    },
    Shortest {
        jobs: KeyedPriorityQueue<JobId, BurstKey>,
    },
}

impl RunQueue {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            jobs: VecDeque::new(),
        }
    }

    pub fn new_shortest() -> Self {
        Self::Shortest {
            jobs: KeyedPriorityQueue::new(),
        }
    }

    pub fn contains(&self, job_id: JobId) -> bool {
        match self {
            Self::Fifo { jobs } => jobs.contains(&job_id),
            Self::Shortest { jobs } => jobs.iter().any(|j| *j.0 == job_id),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Fifo { jobs } => jobs.len(),
            Self::Shortest { jobs } => jobs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything one simulation run owns: the clock, the job table, the run
/// queues the active scheduler created, and which job holds the CPU.
#[derive(Debug, Default)]
pub struct SimCtx {
    pub now: Ticks,
    pub jobs: Vec<Job>,
    pub queues: SlotMap<QueueId, RunQueue>,
    pub job_to_queue: FxHashMap<JobId, QueueId>,
    pub running: Option<JobId>,
    // Job ids in the order they reached zero remaining time
    pub completed: Vec<JobId>,

    // Decrement upon job completion
    unfinished: usize,
}

impl SimCtx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(num_jobs: usize) -> Self {
        Self {
            jobs: Vec::with_capacity(num_jobs),
            completed: Vec::with_capacity(num_jobs),
            ..Self::default()
        }
    }

    /// Appends a job to the table. Every job arrives at time 0 and starts out waiting.
    pub fn create_job(&mut self, name: impl Into<String>, burst_time: Ticks) -> JobId {
        let id = self.jobs.len();
        self.jobs.push(Job {
            id,
            name: name.into(),
            state: JobState::Waiting,
            arrival_time: 0,
            burst_time,
            remaining_time: burst_time,
            wait_time: 0,
            turnaround_time: 0,
            start_time: None,
            completion_time: None,
        });
        self.unfinished += 1;

        id
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn create_queue_fifo(&mut self) -> QueueId {
        self.queues.insert(RunQueue::new_fifo())
    }

    pub fn create_queue_shortest(&mut self) -> QueueId {
        self.queues.insert(RunQueue::new_shortest())
    }

    pub fn queue_push(&mut self, queue_id: QueueId, job_id: JobId) {
        assert!(
            !self.job_to_queue.contains_key(&job_id),
            "Job {job_id} already present in some run queue"
        );

        let job = self.job(job_id);
        debug_assert!(
            job.state == JobState::Waiting,
            "Job {job_id} must be Waiting when enqueued"
        );
        let key = BurstKey {
            burst: job.burst_time,
            seq: job.id,
        };

        let queue = self.queues.get_mut(queue_id).expect("Unknown run queue");
        match queue {
            RunQueue::Fifo { jobs } => jobs.push_back(job_id),
            RunQueue::Shortest { jobs } => {
                jobs.push(job_id, key);
            }
        };

        self.job_to_queue.insert(job_id, queue_id);
    }

    pub fn queue_pop(&mut self, queue_id: QueueId) -> Option<JobId> {
        let queue = self.queues.get_mut(queue_id)?;
        let job = match queue {
            RunQueue::Fifo { jobs } => jobs.pop_front(),
            RunQueue::Shortest { jobs } => jobs.pop().map(|j| j.0),
        }?;

        let removed = self.job_to_queue.remove(&job);
        debug_assert!(removed.is_some(), "Job {job} missing run queue membership");

        Some(job)
    }

    pub fn job_in_any_queue(&self, job_id: JobId) -> bool {
        self.job_to_queue.contains_key(&job_id)
    }

    pub fn job(&self, job_id: JobId) -> &Job {
        &self.jobs[job_id]
    }

    pub fn job_mut(&mut self, job_id: JobId) -> &mut Job {
        &mut self.jobs[job_id]
    }

    pub fn unfinished(&self) -> usize {
        self.unfinished
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.unfinished == 0
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.running.is_none()
    }

    /// Sum of CPU time handed out so far.
    pub fn consumed_service(&self) -> Ticks {
        self.jobs
            .iter()
            .map(|job| job.burst_time - job.remaining_time)
            .sum()
    }

    // Return previous state (always Waiting for a well-behaved scheduler)
    pub fn set_running(&mut self, job_id: JobId) -> JobState {
        debug_assert!(
            !self.job_to_queue.contains_key(&job_id),
            "Running job {job_id} must not be enqueued"
        );
        debug_assert!(self.running.is_none(), "CPU already running a job");

        self.running = Some(job_id);
        let now = self.now;
        let job = self.job_mut(job_id);
        let prev_state = job.state;
        job.state = JobState::Running;
        job.start_time.get_or_insert(now);
        prev_state
    }

    /// Charges `slice` ticks to the running job and returns what is left of its burst.
    pub fn consume(&mut self, job_id: JobId, slice: Ticks) -> Ticks {
        let job = self.job_mut(job_id);
        debug_assert!(
            job.state == JobState::Running,
            "Job {job_id} must be running to consume CPU time"
        );
        debug_assert!(
            slice <= job.remaining_time,
            "Job {job_id} charged {slice} ticks with only {} remaining",
            job.remaining_time
        );
        job.remaining_time -= slice;
        job.remaining_time
    }

    pub fn mark_waiting(&mut self, job_id: JobId) {
        let job = self.job_mut(job_id);
        debug_assert!(
            job.state != JobState::Finished,
            "Finished job {} cannot wait again",
            job.id
        );
        job.state = JobState::Waiting;
        if self.running == Some(job_id) {
            self.running = None;
        }
    }

    pub fn mark_finished(&mut self, job_id: JobId, completion_time: Ticks) {
        debug_assert!(
            !self.job_to_queue.contains_key(&job_id),
            "Finishing job {job_id} that is still enqueued"
        );

        let job = &mut self.jobs[job_id];
        debug_assert!(
            job.state == JobState::Running,
            "Job {job_id} must have been running before marked finished"
        );
        debug_assert_eq!(job.remaining_time, 0, "Job {job_id} finished with work left");

        job.state = JobState::Finished;
        job.completion_time = Some(completion_time);
        job.turnaround_time = completion_time - job.arrival_time;
        job.wait_time = job.turnaround_time - job.burst_time;

        self.completed.push(job_id);
        self.unfinished -= 1;
        if self.running == Some(job_id) {
            self.running = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_with(bursts: &[(&str, Ticks)]) -> SimCtx {
        let mut ctx = SimCtx::new();
        for (name, burst) in bursts {
            ctx.create_job(*name, *burst);
        }
        ctx
    }

    #[test]
    fn fifo_queue_pops_in_push_order() {
        let mut ctx = ctx_with(&[("A", 4), ("B", 1), ("C", 2)]);
        let q = ctx.create_queue_fifo();
        for id in [2, 0, 1] {
            ctx.queue_push(q, id);
        }

        assert!(ctx.job_in_any_queue(0));
        let popped: Vec<_> = std::iter::from_fn(|| ctx.queue_pop(q)).collect();
        assert_eq!(popped, vec![2, 0, 1]);
        assert!(ctx.job_to_queue.is_empty());
    }

    #[test]
    fn shortest_queue_breaks_ties_by_input_position() {
        let mut ctx = ctx_with(&[("A", 3), ("B", 1), ("C", 3), ("D", 1), ("E", 2)]);
        let q = ctx.create_queue_shortest();
        for id in [4, 2, 0, 3, 1] {
            ctx.queue_push(q, id);
        }
        assert_eq!(ctx.queues[q].len(), 5);

        let popped: Vec<_> = std::iter::from_fn(|| ctx.queue_pop(q)).collect();
        assert_eq!(popped, vec![1, 3, 4, 0, 2]);
        assert!(ctx.queues[q].is_empty());
    }

    #[test]
    fn finishing_a_job_derives_wait_from_turnaround() {
        let mut ctx = ctx_with(&[("A", 5), ("B", 3)]);
        ctx.advance_time(5);
        assert_eq!(ctx.set_running(1), JobState::Waiting);
        ctx.advance_time(3);
        assert_eq!(ctx.consume(1, 3), 0);
        ctx.mark_finished(1, ctx.now);

        let job = ctx.job(1);
        assert!(job.finished());
        assert_eq!(job.turnaround_time, 8);
        assert_eq!(job.wait_time, 5);
        assert_eq!(job.response_time(), Some(5));
        assert_eq!(ctx.unfinished(), 1);
        assert!(ctx.cpu_is_idle());
        assert_eq!(ctx.completed, vec![1]);
    }

    #[test]
    fn start_time_is_recorded_on_first_dispatch_only() {
        let mut ctx = ctx_with(&[("A", 4)]);
        ctx.set_running(0);
        ctx.advance_time(2);
        ctx.consume(0, 2);
        ctx.mark_waiting(0);
        ctx.set_running(0);

        assert_eq!(ctx.job(0).start_time, Some(0));
        assert_eq!(ctx.consumed_service(), 2);
    }
}
