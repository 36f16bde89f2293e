//! Virtual time scheduler for deterministic testing of time-based operators.
//!
//! Time only moves when the test says so:
//!
//! ```rust
//! use rxlite::prelude::*;
//! use std::{cell::Cell, rc::Rc};
//!
//! let scheduler = TestScheduler::new();
//! let fired = Rc::new(Cell::new(false));
//! let c_fired = fired.clone();
//! observable::timer(Duration::from_millis(100), scheduler.clone())
//!   .subscribe(move |_| c_fired.set(true));
//!
//! scheduler.advance_by(Duration::from_millis(99));
//! assert!(!fired.get());
//! scheduler.advance_by(Duration::from_millis(1));
//! assert!(fired.get());
//! ```
//!
//! Clones share the same clock and queue; separate `TestScheduler::new()`
//! instances are independent, so tests never interfere with each other.
use std::{cmp::Ordering, collections::BinaryHeap};

use super::{Duration, Scheduler, TaskHandle};
use crate::rc::{MutRc, RcDeref, RcDerefMut};

#[derive(Clone, Default)]
pub struct TestScheduler(MutRc<TestSchedulerState>);

#[derive(Default)]
struct TestSchedulerState {
  virtual_time: Duration,
  task_queue: BinaryHeap<ScheduledTask>,
  next_task_id: usize,
}

enum TestTask {
  Once(Box<dyn FnOnce()>),
  Repeat { task: Box<dyn FnMut()>, period: Duration },
}

struct ScheduledTask {
  scheduled_time: Duration,
  task_id: usize,
  task: TestTask,
  handle: TaskHandle,
}

impl PartialEq for ScheduledTask {
  fn eq(&self, other: &Self) -> bool {
    self.scheduled_time == other.scheduled_time && self.task_id == other.task_id
  }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ScheduledTask {
  fn cmp(&self, other: &Self) -> Ordering {
    // Min-heap: earlier times first, then FIFO by task_id
    other
      .scheduled_time
      .cmp(&self.scheduled_time)
      .then_with(|| other.task_id.cmp(&self.task_id))
  }
}

impl TestScheduler {
  pub fn new() -> Self { Self::default() }

  /// The current virtual time, starting at zero.
  pub fn now(&self) -> Duration { self.0.rc_deref().virtual_time }

  /// Number of tasks that are neither cancelled nor finished.
  pub fn pending_count(&self) -> usize {
    self
      .0
      .rc_deref()
      .task_queue
      .iter()
      .filter(|t| !t.handle.is_closed())
      .count()
  }

  pub fn is_empty(&self) -> bool { self.pending_count() == 0 }

  /// Advance virtual time by `duration`, running every task that falls due
  /// on the way in time order. Tasks due at the same instant run in the
  /// order they were scheduled.
  pub fn advance_by(&self, duration: Duration) {
    let target = self.now() + duration;
    self.advance_to(target);
  }

  /// Advance virtual time to the absolute instant `time`. Does nothing if
  /// `time` is in the past.
  pub fn advance_to(&self, time: Duration) {
    if time < self.now() {
      return;
    }
    self.execute_tasks_until(time);
    self.0.rc_deref_mut().virtual_time = time;
  }

  /// Run every pending one-shot task, advancing virtual time to each due
  /// time. Repeating tasks run as time passes but do not keep `flush` alive.
  pub fn flush(&self) {
    while let Some(target) = self.last_once_due() {
      self.execute_tasks_until(target);
    }
  }

  fn last_once_due(&self) -> Option<Duration> {
    self
      .0
      .rc_deref()
      .task_queue
      .iter()
      .filter(|t| matches!(t.task, TestTask::Once(_)) && !t.handle.is_closed())
      .map(|t| t.scheduled_time)
      .max()
  }

  fn execute_tasks_until(&self, target: Duration) {
    loop {
      let task = {
        let mut state = self.0.rc_deref_mut();
        let due = state
          .task_queue
          .peek()
          .is_some_and(|t| t.scheduled_time <= target);
        if !due {
          return;
        }
        let task = state.task_queue.pop();
        if let Some(task) = &task {
          state.virtual_time = state.virtual_time.max(task.scheduled_time);
        }
        task
      };

      // Run without any borrow held: the task may schedule more work.
      let Some(ScheduledTask { scheduled_time, task, handle, .. }) = task else { return };
      if handle.is_closed() {
        continue;
      }
      match task {
        TestTask::Once(f) => {
          f();
          handle.mark_finished();
        }
        TestTask::Repeat { mut task, period } => {
          task();
          if !handle.is_closed() {
            self.push(scheduled_time + period, TestTask::Repeat { task, period }, handle);
          }
        }
      }
    }
  }

  fn push(&self, scheduled_time: Duration, task: TestTask, handle: TaskHandle) {
    let mut state = self.0.rc_deref_mut();
    // Cancelled tasks would otherwise sit in the heap until their due time.
    state.task_queue.retain(|t| !t.handle.is_closed());
    let task_id = state.next_task_id;
    state.next_task_id += 1;
    state
      .task_queue
      .push(ScheduledTask { scheduled_time, task_id, task, handle });
  }
}

impl Scheduler for TestScheduler {
  fn schedule<F>(&self, delay: Duration, task: F) -> TaskHandle
  where
    F: FnOnce() + 'static,
  {
    let handle = TaskHandle::new();
    self.push(self.now() + delay, TestTask::Once(Box::new(task)), handle.clone());
    handle
  }

  /// # Panics
  ///
  /// Panics if `period` is zero, such a task would never let time advance.
  fn schedule_repeating<F>(&self, period: Duration, task: F) -> TaskHandle
  where
    F: FnMut() + 'static,
  {
    assert!(!period.is_zero(), "a repeating task needs a non-zero period");
    let handle = TaskHandle::new();
    self.push(
      self.now() + period,
      TestTask::Repeat { task: Box::new(task), period },
      handle.clone(),
    );
    handle
  }
}
