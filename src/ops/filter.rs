use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

/// Emit only those items from an Observable that pass a predicate test
/// # Example
///
/// ```
/// use rxlite::prelude::*;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let coll = Rc::new(RefCell::new(vec![]));
/// let coll_clone = coll.clone();
///
/// observable::from_iter(0..10)
///   .filter(|v| *v % 2 == 0)
///   .subscribe(move |v| {
///      coll_clone.borrow_mut().push(v);
///   });
///
/// // only even numbers received.
/// assert_eq!(coll.borrow().clone(), vec![0, 2, 4, 6, 8]);
/// ```
#[derive(Clone)]
pub struct FilterOp<S, F> {
  pub(crate) source: S,
  pub(crate) filter: F,
}

impl<S, F> Observable for FilterOp<S, F>
where
  S: Observable,
  F: FnMut(&S::Item) -> bool + 'static,
{
  type Item = S::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<S::Item, S::Err>) {
    let subscription = subscriber.subscription().clone();
    let observer = FilterObserver { observer: subscriber, filter: self.filter };
    self.source.actual_subscribe(Subscriber::new(observer, subscription));
  }
}

pub struct FilterObserver<O, F> {
  observer: O,
  filter: F,
}

impl<Item, Err, F> Observer<Item, Err> for FilterObserver<Subscriber<Item, Err>, F>
where
  F: FnMut(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if (self.filter)(&value) {
      self.observer.next(value)
    }
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }

  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use std::{cell::Cell, cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn fork_and_shared() {
    let evens = observable::from_iter(0..10).filter(|v| v % 2 == 0);
    let count = Rc::new(Cell::new(0));
    let (c1, c2) = (count.clone(), count.clone());
    evens.clone().subscribe(move |_| c1.set(c1.get() + 1));
    evens.subscribe(move |_| c2.set(c2.get() + 1));
    assert_eq!(count.get(), 10);
  }

  #[test]
  fn news_headlines_by_keyword() {
    let headlines = vec![
      "Rust 2024 edition released",
      "Local team wins the cup",
      "Why Rust ownership matters",
      "Weather: sunny all week",
    ];
    let picked = Rc::new(RefCell::new(vec![]));
    let completed = Rc::new(Cell::new(false));
    let (c_picked, c_completed) = (picked.clone(), completed.clone());
    observable::from_iter(headlines)
      .filter(|h| h.contains("Rust"))
      .subscribe_complete(move |h| c_picked.borrow_mut().push(h), move || c_completed.set(true));
    assert_eq!(*picked.borrow(), vec!["Rust 2024 edition released", "Why Rust ownership matters"]);
    assert!(completed.get());
  }

  #[test]
  fn error_passes_through() {
    let err = Rc::new(Cell::new(None));
    let c_err = err.clone();
    observable::throw_err::<i32, _>("boom")
      .filter(|_| false)
      .subscribe_err(|_| {}, move |e| c_err.set(Some(e)));
    assert_eq!(err.get(), Some("boom"));
  }
}
