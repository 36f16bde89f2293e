//! Type-erased observables.
//!
//! Operators return a distinct type for every pipeline, so two branches that
//! produce "the same" stream still have different types. Boxing erases the
//! pipeline type when an observable must be stored or returned from a
//! closure with several branches, such as a `catch_error` handler.
use std::rc::Rc;

use crate::{observable::Observable, subscriber::Subscriber};

pub struct BoxedObservable<Item, Err>(Rc<dyn Fn(Subscriber<Item, Err>)>);

impl<Item: 'static, Err: 'static> BoxedObservable<Item, Err> {
  pub fn new<S>(source: S) -> Self
  where
    S: Observable<Item = Item, Err = Err> + Clone + 'static,
  {
    BoxedObservable(Rc::new(move |subscriber| source.clone().actual_subscribe(subscriber)))
  }
}

impl<Item, Err> Clone for BoxedObservable<Item, Err> {
  #[inline]
  fn clone(&self) -> Self { BoxedObservable(self.0.clone()) }
}

impl<Item: 'static, Err: 'static> Observable for BoxedObservable<Item, Err> {
  type Item = Item;
  type Err = Err;

  #[inline]
  fn actual_subscribe(self, subscriber: Subscriber<Item, Err>) { (self.0)(subscriber) }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, convert::Infallible, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn branches_share_one_type() {
    let pick = |even: bool| -> BoxedObservable<i32, Infallible> {
      if even {
        observable::from_iter(vec![0, 2]).box_it()
      } else {
        observable::of(1).map(|v| v * 100).box_it()
      }
    };
    let seen = Rc::new(RefCell::new(vec![]));
    let (c1, c2) = (seen.clone(), seen.clone());
    pick(true).subscribe(move |v| c1.borrow_mut().push(v));
    pick(false).subscribe(move |v| c2.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![0, 2, 100]);
  }

  #[test]
  fn boxed_stays_cold() {
    let boxed = observable::from_iter(1..=3).box_it();
    let sum = Rc::new(RefCell::new(0));
    for _ in 0..2 {
      let sum = sum.clone();
      boxed.clone().subscribe(move |v| *sum.borrow_mut() += v);
    }
    assert_eq!(*sum.borrow(), 12);
  }
}
