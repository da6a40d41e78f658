use crate::error::{ListError, Result};
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, trace, warn};

/// A node in the doubly linked list
///
/// Links are slot indices into the owning list's arena.
struct Node<T> {
    data: T,
    prev: Option<usize>,
    next: Option<usize>,
}

impl<T> Node<T> {
    fn new(data: T) -> Self {
        Node {
            data,
            prev: None,
            next: None,
        }
    }
}

/// An arena slot. Vacant slots form a free list.
enum Slot<T> {
    Occupied(Node<T>),
    Vacant(Option<usize>),
}

/// What [`List::get_front`] does with the head node after reading it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontChoice {
    /// Leave the node in the list (peek)
    Retain,
    /// Unlink and free the node (pop / dequeue)
    Delete,
}

/// A doubly linked list whose nodes live in an arena owned by the list
pub struct List<T> {
    slots: Vec<Slot<T>>,
    free: Option<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    length: usize,
}

/// Returns the length of `list`, treating an absent list as empty
pub fn length<T>(list: Option<&List<T>>) -> usize {
    list.map_or(0, List::len)
}

impl<T> List<T> {
    /// Creates a new empty doubly linked list
    pub fn new() -> Self {
        List {
            slots: Vec::new(),
            free: None,
            head: None,
            tail: None,
            length: 0,
        }
    }

    /// Creates an empty list with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        List {
            slots: Vec::with_capacity(capacity),
            free: None,
            head: None,
            tail: None,
            length: 0,
        }
    }

    /// Returns the length of the list
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if the list is empty
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Adds an element to the front of the list
    pub fn push_front(&mut self, data: T) -> Result<()> {
        self.try_push_front(data).map_err(|_| ListError::AllocationFailure)
    }

    /// Adds an element to the back of the list
    pub fn push_back(&mut self, data: T) -> Result<()> {
        self.try_push_back(data).map_err(|_| ListError::AllocationFailure)
    }

    /// Like [`List::push_front`], but hands `data` back if node storage
    /// cannot be reserved. The list is unchanged in that case.
    pub fn try_push_front(&mut self, data: T) -> std::result::Result<(), T> {
        let slot = self.alloc(data)?;

        match self.head {
            // Empty list
            None => self.tail = Some(slot),
            Some(old_head) => {
                self.node_mut(old_head).prev = Some(slot);
                self.node_mut(slot).next = Some(old_head);
            }
        }
        self.head = Some(slot);

        self.length += 1;
        trace!(slot, len = self.length, "push_front");
        Ok(())
    }

    /// Like [`List::push_back`], but hands `data` back if node storage
    /// cannot be reserved. The list is unchanged in that case.
    pub fn try_push_back(&mut self, data: T) -> std::result::Result<(), T> {
        let Some(old_tail) = self.tail else {
            return self.try_push_front(data);
        };

        let slot = self.alloc(data)?;
        self.node_mut(old_tail).next = Some(slot);
        self.node_mut(slot).prev = Some(old_tail);
        self.tail = Some(slot);

        self.length += 1;
        trace!(slot, len = self.length, "push_back");
        Ok(())
    }

    /// Removes and returns the element from the front of the list
    pub fn pop_front(&mut self) -> Result<T> {
        let old_head = self.head.ok_or(ListError::EmptyCollection)?;
        let node = self.release(old_head);

        self.head = node.next;
        match self.head {
            // This was the only node
            None => self.tail = None,
            Some(new_head) => self.node_mut(new_head).prev = None,
        }

        self.length -= 1;
        if self.length == 0 {
            // Nothing is linked, so the free list can start over
            self.slots.clear();
            self.free = None;
        }
        trace!(slot = old_head, len = self.length, "pop_front");
        Ok(node.data)
    }

    /// Reads the front element, removing it when `choice` is [`FrontChoice::Delete`]
    pub fn get_front(&mut self, choice: FrontChoice) -> Result<T>
    where
        T: Clone,
    {
        match choice {
            FrontChoice::Retain => self.front().cloned(),
            FrontChoice::Delete => self.pop_front(),
        }
    }

    /// Returns a reference to the front element without removing it
    pub fn front(&self) -> Result<&T> {
        let head = self.head.ok_or(ListError::EmptyCollection)?;
        Ok(&self.node(head).data)
    }

    /// Returns a reference to the back element without removing it
    pub fn back(&self) -> Result<&T> {
        let tail = self.tail.ok_or(ListError::EmptyCollection)?;
        Ok(&self.node(tail).data)
    }

    /// Returns a reference to the element at `index`
    pub fn get_at(&self, index: usize) -> Result<&T> {
        let slot = self.locate(index)?;
        Ok(&self.node(slot).data)
    }

    /// Returns a mutable reference to the element at `index`
    pub fn get_at_mut(&mut self, index: usize) -> Result<&mut T> {
        let slot = self.locate(index)?;
        Ok(&mut self.node_mut(slot).data)
    }

    /// Replaces the element at `index`, returning the previous one
    pub fn set_at(&mut self, index: usize, data: T) -> Result<T> {
        let slot = self.locate(index)?;
        Ok(std::mem::replace(&mut self.node_mut(slot).data, data))
    }

    /// Exchanges the elements at `i` and `j`
    ///
    /// Payloads move between nodes; the links are left alone.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        let a = self.locate(i)?;
        let b = self.locate(j)?;
        if a != b {
            self.swap_data(a, b);
        }
        Ok(())
    }

    /// Runs bubble passes from front to back until a pass makes no swaps.
    ///
    /// Adjacent elements are exchanged only when `before(later, earlier)` is
    /// true, so elements the predicate considers equal keep their order.
    /// Returns the number of swaps made.
    pub fn bubble_sort_by<F>(&mut self, mut before: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut swaps = 0;
        if self.length < 2 {
            return swaps;
        }

        for pass in 0..self.length - 1 {
            let mut swapped = false;
            let mut cursor = self.head;

            for _ in 0..self.length - 1 - pass {
                let Some(current) = cursor else { break };
                let Some(next) = self.node(current).next else {
                    break;
                };

                if before(&self.node(next).data, &self.node(current).data) {
                    self.swap_data(current, next);
                    swapped = true;
                    swaps += 1;
                }
                cursor = Some(next);
            }

            if !swapped {
                break;
            }
        }

        swaps
    }

    /// Removes all elements from the list
    pub fn clear(&mut self) {
        while self.pop_front().is_ok() {}
    }

    /// Tears the list down one node at a time and returns how many nodes were released
    pub fn destroy(mut self) -> usize {
        let mut released = 0;
        while self.pop_front().is_ok() {
            released += 1;
        }
        debug!(released, "list destroyed");
        released
    }

    /// Panics if the head/tail/length bookkeeping disagrees with the links
    #[track_caller]
    pub fn assert_valid(&self) {
        if self.length == 0 {
            assert!(self.head.is_none(), "empty list has a head");
            assert!(self.tail.is_none(), "empty list has a tail");
            return;
        }
        if self.length == 1 {
            assert_eq!(self.head, self.tail, "single node list has head != tail");
        }

        let mut seen = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            assert!(seen < self.length, "forward chain longer than {}", self.length);
            let node = self.node(slot);
            assert_eq!(node.prev, prev, "slot {slot} has a stale prev link");
            prev = Some(slot);
            cursor = node.next;
            seen += 1;
        }
        assert_eq!(seen, self.length, "forward chain length");
        assert_eq!(prev, self.tail, "forward chain does not end at tail");

        let mut seen = 0;
        let mut cursor = self.tail;
        while let Some(slot) = cursor {
            assert!(seen < self.length, "backward chain longer than {}", self.length);
            cursor = self.node(slot).prev;
            seen += 1;
        }
        assert_eq!(seen, self.length, "backward chain length");

        let occupied = self
            .slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied(_)))
            .count();
        assert_eq!(occupied, self.length, "occupied slots");
    }

    /// Finds the slot holding `index`, walking from whichever end is closer
    fn locate(&self, index: usize) -> Result<usize> {
        let out_of_range = ListError::IndexOutOfRange {
            index,
            len: self.length,
        };
        if index >= self.length {
            return Err(out_of_range);
        }

        let found = if index < self.length / 2 {
            self.walk(self.head, index, |node| node.next)
        } else {
            self.walk(self.tail, self.length - index - 1, |node| node.prev)
        };
        found.ok_or(out_of_range)
    }

    fn walk(
        &self,
        start: Option<usize>,
        hops: usize,
        step: impl Fn(&Node<T>) -> Option<usize>,
    ) -> Option<usize> {
        let mut cursor = start;
        for _ in 0..hops {
            cursor = step(self.node(cursor?));
        }
        cursor
    }

    fn alloc(&mut self, data: T) -> std::result::Result<usize, T> {
        if let Some(slot) = self.free {
            let node = Slot::Occupied(Node::new(data));
            match std::mem::replace(&mut self.slots[slot], node) {
                Slot::Vacant(next_free) => self.free = next_free,
                Slot::Occupied(_) => unreachable!("free list points at occupied slot {slot}"),
            }
            return Ok(slot);
        }

        if let Err(err) = self.slots.try_reserve(1) {
            warn!(%err, len = self.length, "node allocation failed");
            return Err(data);
        }
        self.slots.push(Slot::Occupied(Node::new(data)));
        Ok(self.slots.len() - 1)
    }

    fn release(&mut self, slot: usize) -> Node<T> {
        match std::mem::replace(&mut self.slots[slot], Slot::Vacant(self.free)) {
            Slot::Occupied(node) => {
                self.free = Some(slot);
                node
            }
            Slot::Vacant(_) => unreachable!("released vacant slot {slot}"),
        }
    }

    fn node(&self, slot: usize) -> &Node<T> {
        match &self.slots[slot] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => unreachable!("link points at vacant slot {slot}"),
        }
    }

    fn node_mut(&mut self, slot: usize) -> &mut Node<T> {
        match &mut self.slots[slot] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => unreachable!("link points at vacant slot {slot}"),
        }
    }

    fn swap_data(&mut self, a: usize, b: usize) {
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let (left, right) = self.slots.split_at_mut(high);
        if let (Slot::Occupied(x), Slot::Occupied(y)) = (&mut left[low], &mut right[0]) {
            std::mem::swap(&mut x.data, &mut y.data);
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        while self.pop_front().is_ok() {}
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// An iterator over the doubly linked list that consumes the list
pub struct IntoIter<T>(List<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// An iterator over the doubly linked list that borrows the list
pub struct Iter<'a, T> {
    list: &'a List<T>,
    current: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.current?);
        self.current = node.next;
        self.remaining -= 1;
        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// A mutable iterator over the doubly linked list that borrows the list mutably
pub struct IterMut<'a, T> {
    slots: *mut Slot<T>,
    current: Option<usize>,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.current?;

        // SAFETY: `slots` comes from a list mutably borrowed for 'a and the
        // chain has no cycles, so every slot is handed out at most once.
        let node = match unsafe { &mut *self.slots.add(slot) } {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => return None,
        };
        self.current = node.next;
        self.remaining -= 1;
        Some(&mut node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

// SAFETY: `IterMut` behaves like `&'a mut T` for every node it yields, so it
// is as thread-safe as that borrow.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> List<T> {
    /// Returns an iterator over the list that borrows the list
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
            remaining: self.length,
        }
    }

    /// Returns a mutable iterator over the list that borrows the list mutably
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            slots: self.slots.as_mut_ptr(),
            current: self.head,
            remaining: self.length,
            _marker: PhantomData,
        }
    }
}
