//! A bounded ring buffer addressed by an ever-incrementing logical index.

/// Fixed-capacity ring. Entries are overwritten in circular order once the
/// ring wraps; there is no deletion.
#[derive(Debug)]
pub struct Ring<T> {
    slots: Vec<Option<T>>,
    written: usize,
}

impl<T> Ring<T> {
    /// Creates an empty ring with the given fixed capacity.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring capacity must be non-zero");
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            written: 0,
        }
    }

    /// Appends `value` at slot `written % capacity` and advances the logical
    /// index. Overwrites the oldest entry once the ring is full.
    pub fn record(&mut self, value: T) {
        let slot = self.written % self.slots.len();
        self.slots[slot] = Some(value);
        self.written += 1;
    }

    /// Iterates `(slot_index, value)` over populated slots in slot order,
    /// skipping slots that have never been written.
    pub fn list(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (i, v)))
    }

    /// Number of populated slots, capped at capacity.
    pub fn len(&self) -> usize {
        self.written.min(self.slots.len())
    }

    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
