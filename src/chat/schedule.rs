//! One-shot timers on an explicit clock.
//!
//! Nothing here reads wall time. Callers pass `now_ms` (the browser glue uses
//! `performance.now()`), which keeps reply timing deterministic under test.

/// Handle for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Task<T> {
    id: TaskId,
    due_ms: f64,
    payload: T,
}

/// Pending one-shot tasks, released in due-time order (ties in insertion order).
#[derive(Debug)]
pub struct Schedule<T> {
    tasks: Vec<Task<T>>,
    next_id: u64,
}

impl<T> Default for Schedule<T> {
    fn default() -> Self {
        Self { tasks: Vec::new(), next_id: 0 }
    }
}

impl<T> Schedule<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: f64, payload: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        // Stable insert keeps equal due times in FIFO order.
        let pos = self.tasks.partition_point(|t| t.due_ms <= due_ms);
        self.tasks.insert(pos, Task { id, due_ms, payload });
        id
    }

    /// Drop a task before it fires. Returns its payload if it was still pending.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(pos).payload)
    }

    /// Remove and return every task due at or before `now_ms`.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<T> {
        let split = self.tasks.partition_point(|t| t.due_ms <= now_ms);
        self.tasks.drain(..split).map(|t| t.payload).collect()
    }

    pub fn next_due(&self) -> Option<f64> {
        self.tasks.first().map(|t| t.due_ms)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_in_due_order() {
        let mut s = Schedule::new();
        s.schedule(300.0, "c");
        s.schedule(100.0, "a");
        s.schedule(200.0, "b");
        assert_eq!(s.next_due(), Some(100.0));
        assert!(s.drain_due(99.9).is_empty());
        assert_eq!(s.drain_due(200.0), vec!["a", "b"]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.drain_due(1_000.0), vec!["c"]);
        assert!(s.is_empty());
    }

    #[test]
    fn test_equal_due_times_fifo() {
        let mut s = Schedule::new();
        s.schedule(50.0, 1);
        s.schedule(50.0, 2);
        s.schedule(50.0, 3);
        assert_eq!(s.drain_due(50.0), vec![1, 2, 3]);
    }

    #[test]
    fn test_cancel() {
        let mut s = Schedule::new();
        let a = s.schedule(10.0, "a");
        s.schedule(20.0, "b");
        assert_eq!(s.cancel(a), Some("a"));
        assert_eq!(s.cancel(a), None);
        assert_eq!(s.drain_due(100.0), vec!["b"]);
    }
}
