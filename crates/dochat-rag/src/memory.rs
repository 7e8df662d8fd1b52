//! Bounded conversation memory

use std::collections::VecDeque;
use std::sync::Mutex;

use dochat_core::Interaction;

/// Maximum number of interactions kept in the buffer.
pub const MEMORY_CAPACITY: usize = 10;

/// Append-only, size-bounded log of question/answer pairs.
///
/// One buffer is shared across all requests in the process; the internal
/// mutex keeps concurrent appends and snapshots from corrupting the FIFO
/// invariant. Oldest entries are evicted first once the capacity is
/// exceeded, so the observable length never exceeds the capacity.
pub struct MemoryBuffer {
    entries: Mutex<VecDeque<Interaction>>,
    capacity: usize,
}

impl MemoryBuffer {
    pub fn new() -> Self {
        Self::with_capacity(MEMORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity + 1)),
            capacity,
        }
    }

    /// Record one interaction, evicting the oldest entries past capacity.
    pub fn add_interaction(&self, question: impl Into<String>, answer: impl Into<String>) {
        let mut entries = self.entries.lock().expect("memory buffer lock poisoned");
        entries.push_back(Interaction::new(question, answer));
        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    /// Snapshot of the current history, oldest first.
    pub fn history(&self) -> Vec<Interaction> {
        let entries = self.entries.lock().expect("memory buffer lock poisoned");
        entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("memory buffer lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn holds_interactions_in_insertion_order() {
        let buffer = MemoryBuffer::new();
        buffer.add_interaction("q1", "a1");
        buffer.add_interaction("q2", "a2");

        let history = buffer.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], Interaction::new("q1", "a1"));
        assert_eq!(history[1], Interaction::new("q2", "a2"));
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let buffer = MemoryBuffer::new();
        for i in 0..25 {
            buffer.add_interaction(format!("q{}", i), format!("a{}", i));
            assert!(buffer.len() <= MEMORY_CAPACITY);
        }
    }

    #[test]
    fn eleventh_entry_evicts_the_first() {
        let buffer = MemoryBuffer::new();
        for i in 1..=11 {
            buffer.add_interaction(format!("q{}", i), format!("a{}", i));
        }

        let history = buffer.history();
        assert_eq!(history.len(), 10);
        assert_eq!(history[0].question, "q2");
        assert_eq!(history[9].question, "q11");
        assert!(!history.iter().any(|i| i.question == "q1"));
    }

    #[test]
    fn concurrent_appends_each_land_exactly_once() {
        let buffer = Arc::new(MemoryBuffer::with_capacity(64));
        let mut handles = Vec::new();

        for tag in 0..32 {
            let buffer = Arc::clone(&buffer);
            handles.push(std::thread::spawn(move || {
                buffer.add_interaction(format!("q{}", tag), format!("a{}", tag));
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let history = buffer.history();
        assert_eq!(history.len(), 32);

        let mut questions: Vec<&str> = history.iter().map(|i| i.question.as_str()).collect();
        questions.sort_unstable();
        questions.dedup();
        assert_eq!(questions.len(), 32);
    }

    #[test]
    fn concurrent_appends_respect_the_capacity_bound() {
        let buffer = Arc::new(MemoryBuffer::new());
        let mut handles = Vec::new();

        for tag in 0..32 {
            let buffer = Arc::clone(&buffer);
            handles.push(std::thread::spawn(move || {
                buffer.add_interaction(format!("q{}", tag), format!("a{}", tag));
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(buffer.len(), MEMORY_CAPACITY);
    }
}
