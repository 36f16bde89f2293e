//! Deferred execution of work.
//!
//! Every piece of the engine that produces a notification later (timers,
//! intervals, debounce) receives a [`Scheduler`] instead of reaching for a
//! global clock. Tests inject the virtual-time [`TestScheduler`]; programs use
//! [`LocalScheduler`] or, with the `tokio-scheduler` feature,
//! [`TokioLocalScheduler`].
use std::{cell::Cell, cell::RefCell, rc::Rc};

use futures::future::AbortHandle;
pub use std::time::Duration;

use crate::subscription::SubscriptionLike;

mod test_scheduler;
pub use test_scheduler::TestScheduler;
#[cfg(feature = "timer")]
mod local_scheduler;
#[cfg(feature = "timer")]
pub use local_scheduler::LocalScheduler;
#[cfg(feature = "tokio-scheduler")]
mod tokio_scheduler;
#[cfg(feature = "tokio-scheduler")]
pub use tokio_scheduler::TokioLocalScheduler;

/// Orders tasks in time on the current thread.
pub trait Scheduler: Clone + 'static {
  /// Run `task` once after `delay`.
  fn schedule<F>(&self, delay: Duration, task: F) -> TaskHandle
  where
    F: FnOnce() + 'static;

  /// Run `task` every `period`, the first run one `period` from now, until
  /// the returned handle is cancelled.
  fn schedule_repeating<F>(&self, period: Duration, task: F) -> TaskHandle
  where
    F: FnMut() + 'static;
}

/// A handle for a scheduled task.
///
/// Cancelling the handle guarantees the task will not run again; a run that
/// is in progress finishes normally. Clones share the same state.
#[derive(Clone, Default)]
pub struct TaskHandle(Rc<TaskState>);

#[derive(Default)]
struct TaskState {
  cancelled: Cell<bool>,
  finished: Cell<bool>,
  abort: RefCell<Option<AbortHandle>>,
}

impl TaskHandle {
  pub fn new() -> Self { Self::default() }

  /// A handle whose cancellation also aborts a spawned future.
  pub fn with_abort(abort: AbortHandle) -> Self {
    let handle = Self::default();
    *handle.0.abort.borrow_mut() = Some(abort);
    handle
  }

  /// Prevent any future run of the task.
  pub fn cancel(&self) {
    if self.0.cancelled.replace(true) {
      return;
    }
    let abort = self.0.abort.borrow_mut().take();
    if let Some(abort) = abort {
      abort.abort();
    }
  }

  #[inline]
  pub fn is_cancelled(&self) -> bool { self.0.cancelled.get() }

  /// `true` once the task was cancelled or ran to its end.
  #[inline]
  pub fn is_closed(&self) -> bool { self.0.cancelled.get() || self.0.finished.get() }

  pub(crate) fn mark_finished(&self) {
    self.0.finished.set(true);
    self.0.abort.borrow_mut().take();
  }
}

impl SubscriptionLike for TaskHandle {
  #[inline]
  fn unsubscribe(&mut self) { self.cancel() }

  #[inline]
  fn is_closed(&self) -> bool { TaskHandle::is_closed(self) }
}
