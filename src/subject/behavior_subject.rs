use crate::{
  observable::Observable,
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
  subject::Subject,
  subscriber::Subscriber,
};

/// A [`Subject`] that remembers the latest value and hands it to every new
/// subscriber as its first notification.
///
/// ```
/// use rxlite::prelude::*;
/// use std::convert::Infallible;
///
/// let subject = BehaviorSubject::<i32, Infallible>::new(0);
/// subject.next(1);
/// subject.clone().subscribe(|v| assert!(v >= 1));
/// assert_eq!(subject.value(), 1);
/// ```
pub struct BehaviorSubject<Item, Err> {
  subject: Subject<Item, Err>,
  value: MutRc<Item>,
}

impl<Item, Err> BehaviorSubject<Item, Err> {
  #[inline]
  pub fn new(value: Item) -> Self { BehaviorSubject { subject: Subject::new(), value: MutRc::own(value) } }

  #[inline]
  pub fn observer_count(&self) -> usize { self.subject.observer_count() }

  #[inline]
  pub fn is_closed(&self) -> bool { self.subject.is_closed() }
}

impl<Item: Clone, Err> BehaviorSubject<Item, Err> {
  /// The retained value.
  pub fn value(&self) -> Item { self.value.rc_deref().clone() }

  /// Store `value` as the current value, then multicast it. Ignored once the
  /// subject is closed.
  pub fn next(&self, value: Item) {
    if self.subject.is_closed() {
      return;
    }
    *self.value.rc_deref_mut() = value.clone();
    self.subject.next(value)
  }
}

impl<Item, Err: Clone> BehaviorSubject<Item, Err> {
  #[inline]
  pub fn error(&self, err: Err) { self.subject.error(err) }

  #[inline]
  pub fn complete(&self) { self.subject.complete() }
}

impl<Item, Err> Clone for BehaviorSubject<Item, Err> {
  fn clone(&self) -> Self {
    BehaviorSubject { subject: self.subject.clone(), value: self.value.clone() }
  }
}

impl<Item, Err> Observable for BehaviorSubject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Item = Item;
  type Err = Err;

  fn actual_subscribe(self, subscriber: Subscriber<Item, Err>) {
    // Attach first, so a value pushed from inside the handler of the current
    // value is queued behind it instead of being missed.
    self.subject.actual_subscribe(subscriber.clone());
    if !subscriber.is_finished() {
      let current = self.value.rc_deref().clone();
      subscriber.next(current);
    }
  }
}

impl<Item: Clone, Err: Clone> Observer<Item, Err> for BehaviorSubject<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { BehaviorSubject::next(self, value) }

  #[inline]
  fn error(&mut self, err: Err) { BehaviorSubject::error(self, err) }

  #[inline]
  fn complete(&mut self) { BehaviorSubject::complete(self) }

  #[inline]
  fn is_finished(&self) -> bool { self.is_closed() }
}
