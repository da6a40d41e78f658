use crate::error::Result;
use crate::list::{Iter, List};
use std::fmt;

/// A FIFO queue backed by a [`List`]
/// Elements are added to the back and removed from the front
pub struct Queue<T> {
    items: List<T>,
}

impl<T> Queue<T> {
    /// Creates a new empty queue
    pub fn new() -> Self {
        Queue { items: List::new() }
    }

    /// Creates an empty queue with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Queue {
            items: List::with_capacity(capacity),
        }
    }

    /// Returns the number of queued elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `data` to the back of the queue
    pub fn enqueue(&mut self, data: T) -> Result<()> {
        self.items.push_back(data)
    }

    /// Removes and returns the element at the front of the queue
    pub fn dequeue(&mut self) -> Result<T> {
        self.items.pop_front()
    }

    /// Returns the element at the front of the queue without removing it
    pub fn peek(&self) -> Result<&T> {
        self.items.front()
    }

    /// Returns the element `index` positions behind the front
    pub fn get_at(&self, index: usize) -> Result<&T> {
        self.items.get_at(index)
    }

    /// Iterates from the front of the queue to the back
    pub fn iter(&self) -> Iter<'_, T> {
        self.items.iter()
    }

    /// Tears the queue down and returns how many elements were released
    pub fn destroy(self) -> usize {
        self.items.destroy()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue").field("items", &self.items).finish()
    }
}
