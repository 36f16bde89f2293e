use futures::{executor::LocalSpawner, future::abortable, task::LocalSpawnExt, FutureExt};
use futures_time::task::sleep;

use super::{Duration, Scheduler, TaskHandle};
use crate::error::RxError;

/// Real-time scheduler that runs its tasks on a `futures` local executor.
///
/// ```rust
/// use futures::executor::LocalPool;
/// use rxlite::prelude::*;
///
/// let mut pool = LocalPool::new();
/// let scheduler = LocalScheduler::new(pool.spawner());
/// observable::timer(Duration::from_millis(1), scheduler)
///   .subscribe(|v| assert_eq!(v, 0));
/// pool.run();
/// ```
#[derive(Clone)]
pub struct LocalScheduler {
  spawner: LocalSpawner,
}

impl LocalScheduler {
  pub fn new(spawner: LocalSpawner) -> Self { LocalScheduler { spawner } }

  fn spawn(&self, fut: impl std::future::Future<Output = ()> + 'static) -> TaskHandle {
    let (fut, abort) = abortable(fut);
    let handle = TaskHandle::with_abort(abort);
    let finished = handle.clone();
    let fut = fut.map(move |_| finished.mark_finished());
    if let Err(err) = self.spawner.spawn_local(fut) {
      let err = RxError::from(err);
      tracing::error!(%err, "local scheduler could not spawn a task");
      handle.cancel();
    }
    handle
  }
}

impl Scheduler for LocalScheduler {
  fn schedule<F>(&self, delay: Duration, task: F) -> TaskHandle
  where
    F: FnOnce() + 'static,
  {
    self.spawn(async move {
      sleep(delay.into()).await;
      task();
    })
  }

  fn schedule_repeating<F>(&self, period: Duration, mut task: F) -> TaskHandle
  where
    F: FnMut() + 'static,
  {
    self.spawn(async move {
      loop {
        sleep(period.into()).await;
        task();
      }
    })
  }
}
