//! Cancelable scheduled tasks for single-threaded event loops
//!
//! Time is passed in explicitly (`now`), so the owner decides how the clock
//! advances: a UI event loop passes `Instant::now()`, tests pass synthetic
//! instants.

use std::time::{Duration, Instant};

/// Settle delay after the last parameter edit before recomputing
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Identifies a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

type Task<C> = Box<dyn FnOnce(&mut C)>;

struct ScheduledTask<C> {
    handle: TaskHandle,
    due: Instant,
    task: Task<C>,
}

/// Timer queue of one-shot tasks that run against a context `C`
pub struct Scheduler<C> {
    next_id: u64,
    tasks: Vec<ScheduledTask<C>>,
}

impl<C> Scheduler<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    /// Run `task` once `delay` has elapsed after `now`
    pub fn schedule(
        &mut self,
        now: Instant,
        delay: Duration,
        task: impl FnOnce(&mut C) + 'static,
    ) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            handle,
            due: now + delay,
            task: Box::new(task),
        });
        handle
    }

    /// Cancel a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.len() != before
    }

    #[must_use]
    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    /// Number of pending tasks
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Earliest due time among pending tasks
    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.tasks.iter().map(|t| t.due).min()
    }

    /// Run every task due at or before `now`, earliest first (ties in
    /// scheduling order). Returns how many ran.
    pub fn run_due(&mut self, now: Instant, ctx: &mut C) -> usize {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|t| t.due <= now);
        self.tasks = pending;

        due.sort_by_key(|t| (t.due, t.handle.0));
        let count = due.len();
        for scheduled in due {
            (scheduled.task)(ctx);
        }
        count
    }
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps at most one pending task: scheduling again cancels the previous one
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<TaskHandle>,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending task, then schedule `task` after the settle delay
    pub fn schedule<C>(
        &mut self,
        scheduler: &mut Scheduler<C>,
        now: Instant,
        task: impl FnOnce(&mut C) + 'static,
    ) -> TaskHandle {
        self.cancel(scheduler);
        let handle = scheduler.schedule(now, self.delay, task);
        self.pending = Some(handle);
        handle
    }

    /// Cancel the pending task, if any. Returns true if one was cancelled.
    pub fn cancel<C>(&mut self, scheduler: &mut Scheduler<C>) -> bool {
        self.pending
            .take()
            .is_some_and(|handle| scheduler.cancel(handle))
    }

    #[must_use]
    pub fn is_pending<C>(&self, scheduler: &Scheduler<C>) -> bool {
        self.pending
            .is_some_and(|handle| scheduler.is_scheduled(handle))
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
