use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

#[derive(Clone)]
pub struct MapOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<S, F, B> Observable for MapOp<S, F>
where
  S: Observable,
  F: FnMut(S::Item) -> B + 'static,
  B: 'static,
{
  type Item = B;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<B, S::Err>) {
    let subscription = subscriber.subscription().clone();
    let observer = MapObserver { observer: subscriber, map: self.func };
    self.source.actual_subscribe(Subscriber::new(observer, subscription));
  }
}

pub struct MapObserver<O, F> {
  observer: O,
  map: F,
}

impl<Item, Err, B, F> Observer<Item, Err> for MapObserver<Subscriber<B, Err>, F>
where
  F: FnMut(Item) -> B,
{
  fn next(&mut self, value: Item) { self.observer.next((self.map)(value)) }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }

  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[derive(Clone)]
pub struct TryMapOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<S, F, B> Observable for TryMapOp<S, F>
where
  S: Observable,
  F: FnMut(S::Item) -> Result<B, S::Err> + 'static,
  B: 'static,
{
  type Item = B;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<B, S::Err>) {
    let subscription = subscriber.subscription().clone();
    let observer = TryMapObserver { observer: subscriber, map: self.func };
    self.source.actual_subscribe(Subscriber::new(observer, subscription));
  }
}

pub struct TryMapObserver<O, F> {
  observer: O,
  map: F,
}

impl<Item, Err, B, F> Observer<Item, Err> for TryMapObserver<Subscriber<B, Err>, F>
where
  F: FnMut(Item) -> Result<B, Err>,
{
  fn next(&mut self, value: Item) {
    match (self.map)(value) {
      Ok(v) => self.observer.next(v),
      Err(err) => self.observer.error(err),
    }
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }

  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
