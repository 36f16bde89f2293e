use std::convert::Infallible;

use crate::{
  observable::Observable,
  scheduler::{Duration, Scheduler},
  subscriber::Subscriber,
};

/// Creates an observable that emits a single `0` after `delay` and then
/// completes.
///
/// Cancelling the subscription before `delay` elapses cancels the scheduled
/// emission.
pub fn timer<S: Scheduler>(delay: Duration, scheduler: S) -> TimerObservable<S> {
  TimerObservable { delay, scheduler }
}

#[derive(Clone)]
pub struct TimerObservable<S> {
  delay: Duration,
  scheduler: S,
}

impl<S: Scheduler> Observable for TimerObservable<S> {
  type Item = usize;
  type Err = Infallible;

  fn actual_subscribe(self, subscriber: Subscriber<usize, Infallible>) {
    let emitter = subscriber.clone();
    let handle = self.scheduler.schedule(self.delay, move || {
      emitter.next(0);
      emitter.complete();
    });
    subscriber.subscription().add(handle);
  }
}
