//! Cancellable deferred work.
//!
//! A handle returned by [`Scheduler::schedule`] owns the pending task:
//! dropping the handle cancels it, the same way `gloo_timers` `Timeout` behaves.
//! Arming a timer of the same kind is therefore just replacing the stored handle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;

pub trait Scheduler {
    type Handle: 'static;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;

    /// Monotonic milliseconds on the same clock as touch event timestamps.
    fn now(&self) -> f64;
}

/// `setTimeout`-backed scheduler for the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }

    fn now(&self) -> f64 {
        web_sys::window()
            .and_then(|win| win.performance())
            .map(|perf| perf.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}

struct ManualEntry {
    due: f64,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ManualQueue {
    now: f64,
    next_seq: u64,
    entries: Vec<ManualEntry>,
}

/// Virtual-clock scheduler. Nothing runs until [`ManualScheduler::advance`] is called.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<ManualQueue>>,
}

pub struct ManualTimer {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward, running every due task in deadline order.
    /// Tasks scheduled by running tasks are honoured if they fall inside the window.
    pub fn advance(&self, ms: f64) {
        let target = self.queue.borrow().now + ms;
        loop {
            let next = {
                let mut q = self.queue.borrow_mut();
                q.entries.retain(|e| !e.cancelled.get());
                let idx = q
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.due <= target)
                    .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
                    .map(|(i, _)| i);
                match idx {
                    Some(i) => {
                        let entry = q.entries.remove(i);
                        q.now = q.now.max(entry.due);
                        Some(entry)
                    }
                    None => None,
                }
            };
            match next {
                // queue borrow is released before the task runs so it may schedule more work
                Some(entry) => (entry.task)(),
                None => break,
            }
        }
        self.queue.borrow_mut().now = target;
    }

    /// Live (not cancelled, not yet run) tasks.
    pub fn pending(&self) -> usize {
        self.queue.borrow().entries.iter().filter(|e| !e.cancelled.get()).count()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualTimer;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualTimer {
        let cancelled = Rc::new(Cell::new(false));
        let mut q = self.queue.borrow_mut();
        let seq = q.next_seq;
        q.next_seq += 1;
        let due = q.now + delay_ms as f64;
        q.entries.push(ManualEntry { due, seq, cancelled: cancelled.clone(), task });
        ManualTimer { cancelled }
    }

    fn now(&self) -> f64 {
        self.queue.borrow().now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_due_tasks_in_deadline_order() {
        let sched = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (log.clone(), log.clone());
        let _late = sched.schedule(300, Box::new(move || a.borrow_mut().push("late")));
        let _early = sched.schedule(100, Box::new(move || b.borrow_mut().push("early")));
        sched.advance(150.0);
        assert_eq!(*log.borrow(), vec!["early"]);
        sched.advance(200.0);
        assert_eq!(*log.borrow(), vec!["early", "late"]);
        assert_eq!(sched.now(), 350.0);
    }

    #[test]
    fn dropping_handle_cancels() {
        let sched = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        let handle = sched.schedule(10, Box::new(move || f.set(true)));
        assert_eq!(sched.pending(), 1);
        drop(handle);
        assert_eq!(sched.pending(), 0);
        sched.advance(50.0);
        assert!(!fired.get());
    }

    #[test]
    fn nested_schedule_inside_window_runs() {
        let sched = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<ManualTimer>>> = Rc::new(RefCell::new(None));
        let (s2, h2, slot2) = (sched.clone(), hits.clone(), slot.clone());
        let _outer = sched.schedule(
            10,
            Box::new(move || {
                h2.set(h2.get() + 1);
                let h3 = h2.clone();
                *slot2.borrow_mut() = Some(s2.schedule(10, Box::new(move || h3.set(h3.get() + 1))));
            }),
        );
        sched.advance(25.0);
        assert_eq!(hits.get(), 2);
    }
}
