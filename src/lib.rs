//! A generic doubly linked list and the stack, queue and priority queue built on it.
//!
//! The list stores its nodes in an arena it owns, so links are plain slot
//! indices and tearing a list down only ever walks the forward chain. The
//! adapters hold nothing but their list and derive emptiness from its length.
//!
//! ```
//! use linkq::{PriorityQueue, Queue, Stack};
//!
//! let mut stack = Stack::new();
//! stack.push(1)?;
//! stack.push(2)?;
//! assert_eq!(stack.pop()?, 2);
//!
//! let mut queue = Queue::new();
//! queue.enqueue(1)?;
//! queue.enqueue(2)?;
//! assert_eq!(queue.dequeue()?, 1);
//!
//! let mut urgent = PriorityQueue::with_priority(|a: &u32, b: &u32| a < b);
//! for job in [3, 1, 2] {
//!     urgent.enqueue(job)?;
//! }
//! assert_eq!(urgent.dequeue()?, 1);
//! # Ok::<(), linkq::ListError>(())
//! ```

pub mod error;
pub mod list;
pub mod priority;
pub mod queue;
pub mod stack;

pub use error::{ListError, Result};
pub use list::{FrontChoice, List};
pub use priority::PriorityQueue;
pub use queue::Queue;
pub use stack::Stack;
