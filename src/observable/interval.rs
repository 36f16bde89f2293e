use std::convert::Infallible;

use crate::{
  observable::Observable,
  scheduler::{Duration, Scheduler},
  subscriber::Subscriber,
};

/// Creates an observable which will fire at `period` intervals, emitting
/// `0, 1, 2, ...`. It never completes on its own; cancel the subscription to
/// stop it.
///
/// # Panics
///
/// Schedulers may refuse a zero `period`; `TestScheduler` panics on it.
pub fn interval<S: Scheduler>(period: Duration, scheduler: S) -> IntervalObservable<S> {
  IntervalObservable { period, scheduler }
}

#[derive(Clone)]
pub struct IntervalObservable<S> {
  period: Duration,
  scheduler: S,
}

impl<S: Scheduler> Observable for IntervalObservable<S> {
  type Item = usize;
  type Err = Infallible;

  fn actual_subscribe(self, subscriber: Subscriber<usize, Infallible>) {
    let emitter = subscriber.clone();
    let mut count = 0;
    let handle = self.scheduler.schedule_repeating(self.period, move || {
      emitter.next(count);
      count += 1;
    });
    subscriber.subscription().add(handle);
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn emits_increasing_until_cancelled() {
    let scheduler = TestScheduler::new();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    let subscription = observable::interval(Duration::from_millis(1000), scheduler.clone())
      .subscribe(move |v| c_seen.borrow_mut().push(v));

    scheduler.advance_by(Duration::from_millis(3500));
    assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    subscription.unsubscribe();
    scheduler.advance_by(Duration::from_millis(5000));
    assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    assert!(scheduler.is_empty());
  }

  #[test]
  fn subscriptions_count_independently() {
    let scheduler = TestScheduler::new();
    let first = Rc::new(RefCell::new(vec![]));
    let second = Rc::new(RefCell::new(vec![]));
    let (c_first, c_second) = (first.clone(), second.clone());
    let source = observable::interval(Duration::from_millis(10), scheduler.clone());
    let s1 = source.clone().subscribe(move |v| c_first.borrow_mut().push(v));
    scheduler.advance_by(Duration::from_millis(20));
    let s2 = source.subscribe(move |v| c_second.borrow_mut().push(v));
    scheduler.advance_by(Duration::from_millis(20));

    assert_eq!(*first.borrow(), vec![0, 1, 2, 3]);
    assert_eq!(*second.borrow(), vec![0, 1]);
    s1.unsubscribe();
    s2.unsubscribe();
  }
}
