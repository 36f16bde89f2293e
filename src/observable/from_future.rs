use std::{convert::Infallible, future::Future};

use futures::{
  future::abortable,
  task::{LocalSpawn, LocalSpawnExt},
  FutureExt,
};

use crate::{
  error::RxError, observable::Observable, scheduler::TaskHandle, subscriber::Subscriber,
  subscription::Subscription,
};

/// Converts a `Future` to an observable sequence that emits the future's
/// output and then completes.
///
/// The future is spawned on `spawner` when subscribing and aborted if the
/// subscription ends first.
///
/// ```
/// use futures::{executor::LocalPool, future};
/// use rxlite::prelude::*;
///
/// let mut pool = LocalPool::new();
/// observable::from_future(future::ready(1), pool.spawner())
///   .subscribe(move |v| println!("subscribed with {}", v));
/// pool.run();
/// ```
pub fn from_future<F, Sp>(future: F, spawner: Sp) -> FromFuture<F, Sp>
where
  F: Future,
{
  FromFuture { future, spawner }
}

#[derive(Clone)]
pub struct FromFuture<F, Sp> {
  future: F,
  spawner: Sp,
}

impl<F, Sp> Observable for FromFuture<F, Sp>
where
  F: Future + 'static,
  F::Output: 'static,
  Sp: LocalSpawn,
{
  type Item = F::Output;
  type Err = Infallible;

  fn actual_subscribe(self, subscriber: Subscriber<F::Output, Infallible>) {
    let FromFuture { future, spawner } = self;
    let emitter = subscriber.clone();
    spawn_abortable(&spawner, subscriber.subscription(), async move {
      let value = future.await;
      emitter.next(value);
      emitter.complete();
    });
  }
}

/// Converts a `Future` resolving to a `Result` into an observable: `Ok`
/// becomes a value followed by completion, `Err` becomes the stream error.
pub fn from_future_result<F, Sp, Item, Err>(future: F, spawner: Sp) -> FromFutureResult<F, Sp>
where
  F: Future<Output = Result<Item, Err>>,
{
  FromFutureResult { future, spawner }
}

#[derive(Clone)]
pub struct FromFutureResult<F, Sp> {
  future: F,
  spawner: Sp,
}

impl<F, Sp, Item, Err> Observable for FromFutureResult<F, Sp>
where
  F: Future<Output = Result<Item, Err>> + 'static,
  Item: 'static,
  Err: 'static,
  Sp: LocalSpawn,
{
  type Item = Item;
  type Err = Err;

  fn actual_subscribe(self, subscriber: Subscriber<Item, Err>) {
    let FromFutureResult { future, spawner } = self;
    let emitter = subscriber.clone();
    spawn_abortable(&spawner, subscriber.subscription(), async move {
      match future.await {
        Ok(value) => {
          emitter.next(value);
          emitter.complete();
        }
        Err(err) => emitter.error(err),
      }
    });
  }
}

fn spawn_abortable(
  spawner: &impl LocalSpawn, subscription: &Subscription, fut: impl Future<Output = ()> + 'static,
) {
  let (fut, abort) = abortable(fut);
  let handle = TaskHandle::with_abort(abort);
  match spawner.spawn_local(fut.map(|_| ())) {
    Ok(()) => subscription.add(handle),
    Err(err) => {
      let err = RxError::from(err);
      tracing::error!(%err, "could not spawn the future of an observable");
      handle.cancel();
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, cell::RefCell, rc::Rc};

  use futures::{
    channel::oneshot,
    executor::LocalPool,
    future::{self, FutureExt},
  };

  use crate::prelude::*;

  #[test]
  fn resolved_value_then_complete() {
    let mut pool = LocalPool::new();
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());
    observable::from_future(future::ready(7), pool.spawner()).subscribe_complete(
      move |v| l1.borrow_mut().push(format!("next {v}")),
      move || l2.borrow_mut().push("complete".to_owned()),
    );
    assert!(log.borrow().is_empty());
    pool.run();
    assert_eq!(*log.borrow(), vec!["next 7", "complete"]);
  }

  #[test]
  fn rejected_future_is_an_error() {
    let mut pool = LocalPool::new();
    let err = Rc::new(RefCell::new(None));
    let c_err = err.clone();
    observable::from_future_result(future::ready(Err::<i32, _>("Failure")), pool.spawner())
      .subscribe_err(|_| {}, move |e| *c_err.borrow_mut() = Some(e));
    pool.run();
    assert_eq!(*err.borrow(), Some("Failure"));
  }

  #[test]
  fn unsubscribe_aborts_pending_future() {
    let mut pool = LocalPool::new();
    let (tx, rx) = oneshot::channel::<i32>();
    let hit = Rc::new(Cell::new(false));
    let c_hit = hit.clone();
    let subscription =
      observable::from_future(rx.map(|r| r.unwrap_or_default()), pool.spawner())
        .subscribe(move |_| c_hit.set(true));
    pool.run_until_stalled();
    subscription.unsubscribe();
    let _ = tx.send(1);
    pool.run();
    assert!(!hit.get());
  }
}
