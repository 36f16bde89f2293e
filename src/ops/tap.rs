use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

/// Calls side-effect callbacks for each notification and forwards the
/// notification unchanged. The callbacks only see references, so they can't
/// alter the stream.
#[derive(Clone)]
pub struct TapOp<S, N, E, C> {
  pub(crate) source: S,
  pub(crate) next: N,
  pub(crate) error: E,
  pub(crate) complete: C,
}

impl<S, N, E, C> Observable for TapOp<S, N, E, C>
where
  S: Observable,
  N: FnMut(&S::Item) + 'static,
  E: FnMut(&S::Err) + 'static,
  C: FnMut() + 'static,
{
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, S::Err>) {
    let TapOp { source, next, error, complete } = self;
    let subscription = subscriber.subscription().clone();
    let observer = TapObserver { observer: subscriber, next, error, complete };
    source.actual_subscribe(Subscriber::new(observer, subscription));
  }
}

pub struct TapObserver<O, N, E, C> {
  observer: O,
  next: N,
  error: E,
  complete: C,
}

impl<Item, Err, N, E, C> Observer<Item, Err> for TapObserver<Subscriber<Item, Err>, N, E, C>
where
  N: FnMut(&Item),
  E: FnMut(&Err),
  C: FnMut(),
{
  fn next(&mut self, value: Item) {
    (self.next)(&value);
    self.observer.next(value)
  }

  fn error(&mut self, err: Err) {
    (self.error)(&err);
    self.observer.error(err)
  }

  fn complete(&mut self) {
    (self.complete)();
    self.observer.complete()
  }

  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
