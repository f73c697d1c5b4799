//! Deferred work for the page reactors.
//!
//! Every continuation in the page (typewriter ticks, the coalesced header
//! update, the submit button revert) goes through [`Scheduler`]. The browser
//! implementation lives in `page::browser`; [`VirtualClock`] drives the same
//! reactors deterministically in tests.

use std::cell::{Cell, RefCell};

/// Unit of deferred work.
pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Run `task` once, roughly `delay_ms` milliseconds from now.
    fn after(&self, delay_ms: u32, task: Task);
    /// Run `task` before the next repaint.
    fn next_frame(&self, task: Task);
}

struct Timer {
    due_ms: u64,
    seq: u64,
    task: Task,
}

/// Manual clock: timers fire only inside [`VirtualClock::advance`] and frame
/// callbacks only inside [`VirtualClock::run_frame`].
#[derive(Default)]
pub struct VirtualClock {
    now_ms: Cell<u64>,
    seq: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
    frames: RefCell<Vec<Task>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_due(&self) -> Option<u64> {
        self.timers.borrow().iter().map(|t| t.due_ms).min()
    }

    /// Run the callbacks queued for the next frame. Callbacks queued while
    /// running wait for the following frame. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let frames = std::mem::take(&mut *self.frames.borrow_mut());
        let count = frames.len();
        for task in frames {
            task();
        }
        count
    }

    /// Move the clock forward by `ms`, firing every timer that comes due in
    /// deadline order (ties in scheduling order). Timers scheduled by fired
    /// tasks also run if they fall inside the window. Returns how many fired.
    pub fn advance(&self, ms: u64) -> usize {
        let target = self.now_ms.get() + ms;
        let mut fired = 0;
        while let Some(timer) = self.pop_due(target) {
            self.now_ms.set(timer.due_ms);
            (timer.task)();
            fired += 1;
        }
        self.now_ms.set(target);
        fired
    }

    /// Jump straight to the earliest timer and fire it alone. Returns the
    /// elapsed time, or `None` when nothing is pending.
    pub fn fire_next(&self) -> Option<u64> {
        let due = self.next_due()?;
        let elapsed = due - self.now_ms.get();
        let timer = self.pop_due(due)?;
        self.now_ms.set(due);
        (timer.task)();
        Some(elapsed)
    }

    fn pop_due(&self, limit: u64) -> Option<Timer> {
        let mut timers = self.timers.borrow_mut();
        let idx = timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= limit)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(idx, _)| idx)?;
        Some(timers.swap_remove(idx))
    }
}

impl Scheduler for VirtualClock {
    fn after(&self, delay_ms: u32, task: Task) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer {
            due_ms: self.now_ms.get() + u64::from(delay_ms),
            seq,
            task,
        });
    }

    fn next_frame(&self, task: Task) {
        self.frames.borrow_mut().push(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let clock = VirtualClock::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (delay, tag) in [(30, "c"), (10, "a"), (10, "b")] {
            let log = log.clone();
            clock.after(delay, Box::new(move || log.borrow_mut().push(tag)));
        }
        assert_eq!(clock.advance(15), 2);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(clock.now_ms(), 15);
        assert_eq!(clock.fire_next(), Some(15));
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(clock.fire_next(), None);
    }

    #[test]
    fn test_frame_callbacks_queued_during_frame_wait() {
        let clock = Rc::new(VirtualClock::new());
        let hits = Rc::new(Cell::new(0));
        let (c, h) = (clock.clone(), hits.clone());
        clock.next_frame(Box::new(move || {
            h.set(h.get() + 1);
            let h2 = h.clone();
            c.next_frame(Box::new(move || h2.set(h2.get() + 1)));
        }));
        assert_eq!(clock.run_frame(), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(clock.pending_frames(), 1);
        clock.run_frame();
        assert_eq!(hits.get(), 2);
    }
}
