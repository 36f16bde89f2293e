use futures::future::abortable;

use super::{Duration, Scheduler, TaskHandle};

/// Real-time scheduler for code running inside a tokio `LocalSet`.
///
/// Tasks are spawned with `tokio::task::spawn_local`, so every call must
/// happen within `LocalSet::run_until` or a `LocalSet` being awaited.
#[derive(Clone, Copy, Default)]
pub struct TokioLocalScheduler;

impl TokioLocalScheduler {
  fn spawn(&self, fut: impl std::future::Future<Output = ()> + 'static) -> TaskHandle {
    let (fut, abort) = abortable(fut);
    let handle = TaskHandle::with_abort(abort);
    let finished = handle.clone();
    tokio::task::spawn_local(async move {
      if fut.await.is_ok() {
        finished.mark_finished();
      }
    });
    handle
  }
}

impl Scheduler for TokioLocalScheduler {
  fn schedule<F>(&self, delay: Duration, task: F) -> TaskHandle
  where
    F: FnOnce() + 'static,
  {
    self.spawn(async move {
      tokio::time::sleep(delay).await;
      task();
    })
  }

  fn schedule_repeating<F>(&self, period: Duration, mut task: F) -> TaskHandle
  where
    F: FnMut() + 'static,
  {
    self.spawn(async move {
      loop {
        tokio::time::sleep(period).await;
        task();
      }
    })
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, rc::Rc};

  use super::*;

  #[tokio::test(flavor = "current_thread")]
  async fn runs_on_local_set() {
    let local = tokio::task::LocalSet::new();
    let hit = Rc::new(Cell::new(0));
    let c_hit = hit.clone();
    local
      .run_until(async move {
        let scheduler = TokioLocalScheduler;
        let cancelled = scheduler.schedule(Duration::from_millis(1), || unreachable!());
        cancelled.cancel();
        scheduler.schedule(Duration::from_millis(1), move || c_hit.set(c_hit.get() + 1));
        tokio::time::sleep(Duration::from_millis(20)).await;
      })
      .await;
    assert_eq!(hit.get(), 1);
  }
}
