#![allow(dead_code)]

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::rc::Rc;
use tracing_subscriber::util::SubscriberInitExt;

/// A payload for priority tests: ordered by `priority`, identified by `label`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub priority: u32,
    pub label: String,
}

impl Job {
    pub fn new(priority: u32, label: &str) -> Self {
        Self {
            priority,
            label: label.to_string(),
        }
    }
}

pub fn lowest_number_first(a: &Job, b: &Job) -> bool {
    a.priority < b.priority
}

pub fn highest_number_first(a: &Job, b: &Job) -> bool {
    a.priority > b.priority
}

/// A payload that counts how many times values sharing its counter were dropped
#[derive(Debug)]
pub struct Tracked {
    pub id: u32,
    drops: Rc<Cell<usize>>,
}

impl Tracked {
    pub fn new(id: u32, drops: &Rc<Cell<usize>>) -> Self {
        Self {
            id,
            drops: Rc::clone(drops),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
    static FAILING: Cell<bool> = const { Cell::new(false) };
}

fn bump(delta: isize) {
    let _ = LIVE.try_with(|live| live.set(live.get() + delta));
}

fn failing() -> bool {
    FAILING.try_with(Cell::get).unwrap_or(false)
}

/// Counts live heap allocations made by the current thread
///
/// Install with `#[global_allocator]` in the test binary that needs it.
/// While [`failing_allocations`] is held, allocations on this thread fail.
pub struct CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if failing() {
            return std::ptr::null_mut();
        }
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            bump(1);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        bump(-1);
    }
}

/// Makes every allocation on this thread fail until the guard is dropped
pub fn failing_allocations() -> FailingGuard {
    FAILING.with(|f| f.set(true));
    FailingGuard(())
}

pub struct FailingGuard(());

impl Drop for FailingGuard {
    fn drop(&mut self) {
        FAILING.with(|f| f.set(false));
    }
}

/// Live allocations on this thread
pub fn live_allocations() -> isize {
    LIVE.with(Cell::get)
}

/// Runs `f` twice and returns the allocations the second run left behind.
///
/// The first run absorbs one-time allocations such as tracing callsite
/// registration.
pub fn leaked_by(mut f: impl FnMut()) -> isize {
    f();
    let before = live_allocations();
    f();
    live_allocations() - before
}

pub fn trace_init() -> tracing::dispatcher::DefaultGuard {
    tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .with_target(false)
        .with_timer(())
        .set_default()
}
