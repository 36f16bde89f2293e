use std::convert::Infallible;

use crate::{observable::Observable, subscriber::Subscriber};

/// Creates an observable that produces values from an iterator.
///
/// Completes when all elements have been emitted. Never emits an error.
/// Emission stops early once the subscriber is finished.
///
/// # Arguments
///
/// * `iter` - An iterator to get all the values from.
///
/// # Examples
///
/// A simple example for a range:
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::from_iter(0..10).subscribe(|v| println!("{},", v));
/// ```
///
/// Or with a vector:
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::from_iter(vec![0, 1, 2, 3]).subscribe(|v| println!("{},", v));
/// ```
pub fn from_iter<Iter>(iter: Iter) -> ObservableFromIter<Iter>
where
  Iter: IntoIterator,
{
  ObservableFromIter(iter)
}

#[derive(Clone)]
pub struct ObservableFromIter<Iter>(Iter);

impl<Iter> Observable for ObservableFromIter<Iter>
where
  Iter: IntoIterator,
  Iter::Item: 'static,
{
  type Item = Iter::Item;
  type Err = Infallible;

  fn actual_subscribe(self, subscriber: Subscriber<Self::Item, Infallible>) {
    for v in self.0 {
      if subscriber.is_finished() {
        return;
      }
      subscriber.next(v);
    }
    subscriber.complete();
  }
}
