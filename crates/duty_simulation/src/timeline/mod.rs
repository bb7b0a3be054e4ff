//! Deterministic deferred tasks.
//!
//! Every delayed action in the simulation (reload completion, staggered
//! spawns, next wave, corpse cleanup) is an entry here, keyed by the
//! simulation clock and polled by its owner once per tick. Nothing runs
//! outside a tick and nothing depends on wall-clock time.

/// Per-owner list of tasks due at a simulation time (seconds).
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    entries: Vec<ScheduledTask<T>>,
    next_sequence: u64,
}

#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    due: f64,
    sequence: u64,
    task: T,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_sequence: 0,
        }
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: f64, task: T) {
        self.entries.push(ScheduledTask {
            due,
            sequence: self.next_sequence,
            task,
        });
        self.next_sequence += 1;
    }

    /// Removes and returns the earliest task with `due <= now`.
    ///
    /// Tasks due at the same instant come out in scheduling order.
    pub fn pop_due(&mut self, now: f64) -> Option<T> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= now)
            .min_by(|(_, a), (_, b)| {
                a.due
                    .total_cmp(&b.due)
                    .then(a.sequence.cmp(&b.sequence))
            })
            .map(|(index, _)| index)?;

        Some(self.entries.remove(index).task)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_matching(&self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        self.entries.iter().filter(|entry| predicate(&entry.task)).count()
    }

    /// Drops pending tasks the predicate rejects (cancellation).
    pub fn retain(&mut self, mut predicate: impl FnMut(&T) -> bool) {
        self.entries.retain(|entry| predicate(&entry.task));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Trigger time of the earliest pending task.
    pub fn next_due(&self) -> Option<f64> {
        self.entries
            .iter()
            .map(|entry| entry.due)
            .min_by(|a, b| a.total_cmp(b))
    }
}
