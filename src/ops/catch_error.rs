use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

/// Replaces the error of the source with the observable returned by the
/// handler. Values and completion pass through unchanged.
#[derive(Clone)]
pub struct CatchErrorOp<S, F> {
  pub(crate) source: S,
  pub(crate) handler: F,
}

impl<S, F, R> Observable for CatchErrorOp<S, F>
where
  S: Observable,
  F: FnOnce(S::Err) -> R + 'static,
  R: Observable<Item = S::Item>,
{
  type Item = S::Item;
  type Err = R::Err;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, R::Err>) {
    // The source ends with its error, the replacement keeps going, so the
    // source gets its own subscription.
    let upstream = subscriber.subscription().child();
    let observer = CatchErrorObserver { observer: subscriber, handler: Some(self.handler) };
    self.source.actual_subscribe(Subscriber::new(observer, upstream));
  }
}

pub struct CatchErrorObserver<O, F> {
  observer: O,
  handler: Option<F>,
}

impl<Item, Err, E2, R, F> Observer<Item, Err> for CatchErrorObserver<Subscriber<Item, E2>, F>
where
  F: FnOnce(Err) -> R,
  R: Observable<Item = Item, Err = E2>,
{
  fn next(&mut self, value: Item) { self.observer.next(value) }

  fn error(&mut self, err: Err) {
    let Some(handler) = self.handler.take() else { return };
    if self.observer.is_finished() {
      return;
    }
    tracing::debug!("catch_error switched to the replacement stream");
    handler(err).actual_subscribe(self.observer.clone());
  }

  fn complete(&mut self) { self.observer.complete() }

  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
