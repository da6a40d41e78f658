use crate::error::Result;
use crate::list::{Iter, List};
use std::fmt;

/// A LIFO stack backed by a [`List`]
/// Elements are pushed to and popped from the front of the list
pub struct Stack<T> {
    items: List<T>,
}

impl<T> Stack<T> {
    /// Creates a new empty stack
    pub fn new() -> Self {
        Stack { items: List::new() }
    }

    /// Creates an empty stack with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Stack {
            items: List::with_capacity(capacity),
        }
    }

    /// Returns the number of elements on the stack
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the stack has no elements
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Places `data` on top of the stack
    pub fn push(&mut self, data: T) -> Result<()> {
        self.items.push_front(data)
    }

    /// Removes and returns the top element
    pub fn pop(&mut self) -> Result<T> {
        self.items.pop_front()
    }

    /// Returns the top element without removing it
    pub fn peek(&self) -> Result<&T> {
        self.items.front()
    }

    /// Iterates from the top of the stack to the bottom
    pub fn iter(&self) -> Iter<'_, T> {
        self.items.iter()
    }

    /// Tears the stack down and returns how many elements were released
    pub fn destroy(self) -> usize {
        self.items.destroy()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack").field("items", &self.items).finish()
    }
}
