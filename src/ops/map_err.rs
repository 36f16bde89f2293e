use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

#[derive(Clone)]
pub struct MapErrOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<S, F, E2> Observable for MapErrOp<S, F>
where
  S: Observable,
  F: FnMut(S::Err) -> E2 + 'static,
  E2: 'static,
{
  type Item = S::Item;
  type Err = E2;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, E2>) {
    let subscription = subscriber.subscription().clone();
    let observer = MapErrObserver { observer: subscriber, map_err: self.func };
    self.source.actual_subscribe(Subscriber::new(observer, subscription));
  }
}

pub struct MapErrObserver<O, F> {
  observer: O,
  map_err: F,
}

impl<Item, Err, E2, F> Observer<Item, Err> for MapErrObserver<Subscriber<Item, E2>, F>
where
  F: FnMut(Err) -> E2,
{
  fn next(&mut self, value: Item) { self.observer.next(value) }

  fn error(&mut self, err: Err) { self.observer.error((self.map_err)(err)) }

  fn complete(&mut self) { self.observer.complete() }

  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn converts_error() {
    let err = Rc::new(RefCell::new(None));
    let c_err = err.clone();
    observable::throw_err::<(), _>(404)
      .map_err(|code: u16| format!("http status {code}"))
      .subscribe_err(|_| {}, move |e| *c_err.borrow_mut() = Some(e));
    assert_eq!(err.borrow().as_deref(), Some("http status 404"));
  }

  #[test]
  fn infallible_joins_a_failing_pipeline() {
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::of(1)
      .with_err::<String>()
      .try_map(|v| Ok::<_, String>(v + 1))
      .subscribe(move |v| c_seen.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![2]);
  }
}
