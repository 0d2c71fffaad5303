//! Ready queue: released, unfinished jobs ordered by priority.
//!
//! A binary heap keyed by `(priority key, task index, release time)`. This
//! matches a stable per-tick sort of the ready list by priority key with
//! declaration order as tie-breaker, without re-sorting every tick: keys
//! are fixed at release, so only insertions and head removals reorder it.

use std::cmp::Ordering;
use std::collections::binary_heap::PeekMut;
use std::collections::BinaryHeap;

use super::PriorityKey;
use crate::models::{Job, Tick};

/// A job waiting in the ready queue.
#[derive(Debug, Clone)]
pub struct QueuedJob {
    /// Priority key assigned at release.
    pub key: PriorityKey,
    /// The job itself.
    pub job: Job,
    /// Index into the engine's job log.
    pub record: usize,
}

impl QueuedJob {
    fn rank(&self) -> (PriorityKey, usize, Tick) {
        (self.key, self.job.task_index, self.job.release_time)
    }
}

impl PartialEq for QueuedJob {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank()
    }
}

impl Eq for QueuedJob {}

impl PartialOrd for QueuedJob {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedJob {
    // Reversed: BinaryHeap is a max-heap and the smallest rank runs first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.rank().cmp(&self.rank())
    }
}

/// Priority-ordered set of ready jobs.
#[derive(Debug, Clone, Default)]
pub struct ReadyQueue {
    heap: BinaryHeap<QueuedJob>,
}

impl ReadyQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue with room for `capacity` jobs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Admits a released job.
    pub fn push(&mut self, key: PriorityKey, job: Job, record: usize) {
        self.heap.push(QueuedJob { key, job, record });
    }

    /// Highest-priority job.
    pub fn head(&self) -> Option<&QueuedJob> {
        self.heap.peek()
    }

    /// Mutable handle to the highest-priority job.
    ///
    /// Mutating `job.remaining_time` through the handle is safe: it is not
    /// part of the ordering.
    pub fn head_mut(&mut self) -> Option<PeekMut<'_, QueuedJob>> {
        self.heap.peek_mut()
    }

    /// Number of ready jobs.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no job is ready.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Ready jobs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &QueuedJob> {
        self.heap.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(task_index: usize, release: Tick) -> Job {
        Job::new(task_index, release, 2, 10)
    }

    #[test]
    fn test_orders_by_key() {
        let mut q = ReadyQueue::new();
        q.push(10, job(0, 0), 0);
        q.push(4, job(1, 0), 1);
        q.push(7, job(2, 0), 2);
        let mut order = Vec::new();
        while let Some(head) = q.head_mut() {
            order.push(PeekMut::pop(head).record);
        }
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_ties_broken_by_declaration_order() {
        let mut q = ReadyQueue::new();
        q.push(5, job(2, 0), 0);
        q.push(5, job(0, 0), 1);
        q.push(5, job(1, 0), 2);
        assert_eq!(q.head().unwrap().job.task_index, 0);
    }

    #[test]
    fn test_same_task_jobs_run_in_release_order() {
        let mut q = ReadyQueue::new();
        q.push(5, job(0, 5), 1);
        q.push(5, job(0, 0), 0);
        assert_eq!(q.head().unwrap().job.release_time, 0);
    }

    #[test]
    fn test_head_mut_and_pop() {
        let mut q = ReadyQueue::with_capacity(2);
        q.push(1, job(0, 0), 0);
        q.push(2, job(1, 0), 1);

        {
            let mut head = q.head_mut().unwrap();
            head.job.execute_tick();
            assert_eq!(head.job.remaining_time, 1);
        }
        assert_eq!(q.head().unwrap().record, 0);

        let head = q.head_mut().unwrap();
        let popped = PeekMut::pop(head);
        assert_eq!(popped.record, 0);
        assert_eq!(q.len(), 1);
        assert_eq!(q.head().unwrap().record, 1);
    }

    #[test]
    fn test_empty_queue() {
        let mut q = ReadyQueue::new();
        assert!(q.is_empty());
        assert!(q.head().is_none());
        assert!(q.head_mut().is_none());
        assert_eq!(q.iter().count(), 0);
    }
}
