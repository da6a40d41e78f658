use crate::error::Result;
use crate::list::{Iter, List};
use std::fmt;
use tracing::trace;

/// A queue that keeps its elements ordered by a caller supplied predicate
///
/// `priority(a, b)` must return true when `a` has to be dequeued strictly
/// before `b`, and false for ties. Elements of equal priority are dequeued in
/// the order they were enqueued. Without a predicate the queue is plain FIFO.
pub struct PriorityQueue<T, P = fn(&T, &T) -> bool> {
    items: List<T>,
    priority: Option<P>,
}

impl<T> PriorityQueue<T> {
    /// Creates a queue without a predicate, which behaves as a FIFO queue
    pub fn new() -> Self {
        PriorityQueue {
            items: List::new(),
            priority: None,
        }
    }
}

impl<T, P> PriorityQueue<T, P>
where
    P: Fn(&T, &T) -> bool,
{
    /// Creates a queue ordered by `priority`
    pub fn with_priority(priority: P) -> Self {
        PriorityQueue {
            items: List::new(),
            priority: Some(priority),
        }
    }

    /// Returns true if the queue orders its elements by a predicate
    pub fn is_prioritized(&self) -> bool {
        self.priority.is_some()
    }

    /// Returns the number of queued elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `data` at the back, then moves it ahead of every element it outranks
    pub fn enqueue(&mut self, data: T) -> Result<()> {
        self.items.push_back(data)?;

        if let Some(priority) = &self.priority {
            let swaps = self.items.bubble_sort_by(|a, b| priority(a, b));
            trace!(swaps, len = self.items.len(), "priority reorder");
        }
        Ok(())
    }

    /// Removes and returns the highest priority element
    pub fn dequeue(&mut self) -> Result<T> {
        self.items.pop_front()
    }

    /// Returns the highest priority element without removing it
    pub fn peek(&self) -> Result<&T> {
        self.items.front()
    }

    /// Iterates in dequeue order
    pub fn iter(&self) -> Iter<'_, T> {
        self.items.iter()
    }

    /// Tears the queue down and returns how many elements were released
    pub fn destroy(self) -> usize {
        self.items.destroy()
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, P> fmt::Debug for PriorityQueue<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("items", &self.items)
            .field("prioritized", &self.priority.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListError;

    fn lowest_first(a: &u32, b: &u32) -> bool {
        a < b
    }

    #[test]
    fn test_lowest_number_first() {
        let mut queue = PriorityQueue::with_priority(lowest_first);
        for v in [3, 1, 2] {
            queue.enqueue(v).unwrap();
        }
        assert_eq!(queue.peek(), Ok(&1));
        assert_eq!(queue.dequeue(), Ok(1));
        assert_eq!(queue.dequeue(), Ok(2));
        assert_eq!(queue.dequeue(), Ok(3));
        assert_eq!(queue.dequeue(), Err(ListError::EmptyCollection));
    }

    #[test]
    fn test_highest_number_first_with_closure() {
        let mut queue = PriorityQueue::with_priority(|a: &u32, b: &u32| a > b);
        for v in [2, 4, 1, 3] {
            queue.enqueue(v).unwrap();
        }
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_ties_keep_arrival_order() {
        let mut queue = PriorityQueue::with_priority(|a: &(u8, char), b: &(u8, char)| a.0 < b.0);
        queue.enqueue((1, 'a')).unwrap();
        queue.enqueue((0, 'x')).unwrap();
        queue.enqueue((1, 'b')).unwrap();

        assert_eq!(queue.dequeue(), Ok((0, 'x')));
        assert_eq!(queue.dequeue(), Ok((1, 'a')));
        assert_eq!(queue.dequeue(), Ok((1, 'b')));
    }

    #[test]
    fn test_no_predicate_is_fifo() {
        let mut queue = PriorityQueue::new();
        assert!(!queue.is_prioritized());
        for v in [3, 1, 2] {
            queue.enqueue(v).unwrap();
        }
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
        assert_eq!(
            format!("{queue:?}"),
            "PriorityQueue { items: [3, 1, 2], prioritized: false }"
        );
        assert_eq!(queue.destroy(), 3);
    }
}
