use crate::{
  observable::Observable,
  observer::Observer,
  rc::{MutRc, RcDerefMut},
  scheduler::{Duration, Scheduler, TaskHandle},
  subscriber::Subscriber,
  subscription::Teardown,
};

/// Emits a value only after `duration` has passed without another value.
///
/// Errors are forwarded at once. Completion is forwarded at once as well and
/// drops a value that is still waiting for its quiet period.
#[derive(Clone)]
pub struct DebounceOp<S, SD> {
  pub(crate) source: S,
  pub(crate) duration: Duration,
  pub(crate) scheduler: SD,
}

impl<S, SD> Observable for DebounceOp<S, SD>
where
  S: Observable,
  SD: Scheduler,
{
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, S::Err>) {
    let DebounceOp { source, duration, scheduler } = self;
    let pending = MutRc::own(None);
    let c_pending = pending.clone();
    subscriber.subscription().add(Teardown::new(move || {
      cancel_pending(&c_pending);
    }));
    let subscription = subscriber.subscription().clone();
    let observer = DebounceObserver { observer: subscriber, duration, scheduler, pending };
    source.actual_subscribe(Subscriber::new(observer, subscription));
  }
}

pub struct DebounceObserver<O, SD> {
  observer: O,
  duration: Duration,
  scheduler: SD,
  pending: MutRc<Option<TaskHandle>>,
}

fn cancel_pending(pending: &MutRc<Option<TaskHandle>>) -> bool {
  let handle = pending.rc_deref_mut().take();
  match handle {
    Some(handle) if !handle.is_closed() => {
      handle.cancel();
      true
    }
    _ => false,
  }
}

impl<Item, Err, SD> Observer<Item, Err> for DebounceObserver<Subscriber<Item, Err>, SD>
where
  Item: 'static,
  Err: 'static,
  SD: Scheduler,
{
  fn next(&mut self, value: Item) {
    cancel_pending(&self.pending);
    let emitter = self.observer.clone();
    let handle = self.scheduler.schedule(self.duration, move || emitter.next(value));
    *self.pending.rc_deref_mut() = Some(handle);
  }

  fn error(&mut self, err: Err) {
    cancel_pending(&self.pending);
    self.observer.error(err)
  }

  fn complete(&mut self) {
    if cancel_pending(&self.pending) {
      tracing::debug!("debounce dropped a pending value on completion");
    }
    self.observer.complete()
  }

  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
