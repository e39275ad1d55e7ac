//! Fixed-size ring storage backing both queue variants.
//!
//! The head of the queue is always logical index 0. Rotation, bounded append
//! and head removal are expressed against the ring's `head`/`len` indices, so
//! every primitive is O(1) regardless of how many items are stored.
//!
//! `Ring` is not synchronized; the queues wrap it in a lock.

/// Capacity-bounded FIFO storage with explicit head/tail indices.
#[derive(Debug)]
pub struct Ring<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    len: usize,
}

impl<T> Ring<T> {
    /// Create an empty ring that can hold exactly `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(capacity).collect(),
            head: 0,
            len: 0,
        }
    }

    /// Number of stored items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no items are stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the backing storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Whether a bounded append would overflow.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len >= self.slots.len()
    }

    /// Physical slot of logical index `i`. Callers guarantee a non-zero capacity.
    fn slot(&self, i: usize) -> usize {
        (self.head + i) % self.slots.len()
    }

    /// Move the head item to the tail. No-op when fewer than two items are stored.
    pub fn rotate_left(&mut self) {
        if self.len <= 1 {
            return;
        }
        let item = self.slots[self.head].take();
        self.head = self.slot(1);
        let tail = self.slot(self.len - 1);
        self.slots[tail] = item;
    }

    /// Move the tail item to the head. No-op when fewer than two items are stored.
    pub fn rotate_right(&mut self) {
        if self.len <= 1 {
            return;
        }
        let tail = self.slot(self.len - 1);
        let item = self.slots[tail].take();
        self.head = self.slot(self.slots.len() - 1);
        self.slots[self.head] = item;
    }

    /// Append `item` at the tail unless the ring is full.
    ///
    /// # Errors
    ///
    /// Hands `item` back when the ring is at capacity (overflow).
    pub fn push_back(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        let tail = self.slot(self.len);
        self.slots[tail] = Some(item);
        self.len += 1;
        Ok(())
    }

    /// Append `item` and rotate it into the head position.
    ///
    /// # Errors
    ///
    /// Hands `item` back when the ring is at capacity (overflow).
    pub fn push_front(&mut self, item: T) -> Result<(), T> {
        self.push_back(item)?;
        self.rotate_right();
        Ok(())
    }

    /// Remove the head item, clearing its slot. `None` is underflow.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let item = self.slots[self.head].take();
        self.head = self.slot(1);
        self.len -= 1;
        if self.is_empty() {
            self.head = 0;
        }
        item
    }

    /// Remove up to `n` items from the head, oldest first.
    ///
    /// Returns as many items as are available and never more than requested;
    /// an empty vector means the ring was empty (or `n` was zero).
    pub fn pop_front_n(&mut self, n: usize) -> Vec<T> {
        let n = n.min(self.len);
        let mut items = Vec::with_capacity(n);
        while items.len() < n {
            match self.pop_front() {
                Some(item) => items.push(item),
                None => break,
            }
        }
        items
    }

    /// Reference to the head item.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    /// Iterate from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |i| self.slots[self.slot(i)].as_ref())
    }

    /// Move every item, in order, into freshly allocated storage of `capacity`.
    ///
    /// Items that do not fit are removed from the head first and returned so
    /// that the newest items survive.
    pub fn reallocate(&mut self, capacity: usize) -> Vec<T> {
        let evicted = self.pop_front_n(self.len.saturating_sub(capacity));
        let mut fresh = Self::with_capacity(capacity);
        while let Some(item) = self.pop_front() {
            // Cannot overflow: len <= capacity after eviction.
            let _ = fresh.push_back(item);
        }
        *self = fresh;
        evicted
    }

    /// Reallocate with `additional` extra slots.
    pub fn grow(&mut self, additional: usize) {
        let capacity = self.capacity() + additional;
        self.reallocate(capacity);
    }

    /// Remove every item and release the backing storage.
    pub fn release(&mut self) -> Vec<T> {
        let items = self.pop_front_n(self.len);
        *self = Self::with_capacity(0);
        items
    }
}


#[cfg(test)]
mod property_tests;
