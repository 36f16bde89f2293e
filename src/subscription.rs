//! Cancellable handles for active observations.
use std::fmt::{Debug, Formatter};

use smallvec::SmallVec;

use crate::rc::{MutRc, RcDeref, RcDerefMut};

/// Anything that can be cancelled: a [`Subscription`], a scheduled task or a
/// one-shot [`Teardown`].
pub trait SubscriptionLike {
  /// Stop the observation and release its resources. Calling this on an
  /// already closed handle does nothing.
  fn unsubscribe(&mut self);

  fn is_closed(&self) -> bool;
}

impl<T: ?Sized> SubscriptionLike for Box<T>
where
  T: SubscriptionLike,
{
  #[inline]
  fn unsubscribe(&mut self) { (**self).unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { (**self).is_closed() }
}

/// A resource-release action that runs at most once.
pub struct Teardown(Option<Box<dyn FnOnce()>>);

impl Teardown {
  pub fn new(f: impl FnOnce() + 'static) -> Self { Teardown(Some(Box::new(f))) }
}

impl SubscriptionLike for Teardown {
  fn unsubscribe(&mut self) {
    if let Some(f) = self.0.take() {
      f();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_none() }
}

/// The handle returned by `subscribe`.
///
/// A subscription owns a closed flag and the teardowns registered by the
/// producer and by every operator in the chain. Clones share the same state,
/// so a producer can hold one clone while the caller cancels through another.
#[derive(Clone, Default)]
pub struct Subscription(MutRc<Inner>);

#[derive(Default)]
struct Inner {
  closed: bool,
  teardown: SmallVec<[Box<dyn SubscriptionLike>; 1]>,
}

impl Subscription {
  /// Register a teardown. If the subscription is already closed the teardown
  /// runs immediately.
  pub fn add<S: SubscriptionLike + 'static>(&self, subscription: S) {
    let mut subscription: Box<dyn SubscriptionLike> = Box::new(subscription);
    {
      let mut inner = self.0.rc_deref_mut();
      if !inner.closed {
        inner.teardown.retain(|t| !t.is_closed());
        inner.teardown.push(subscription);
        return;
      }
    }
    subscription.unsubscribe();
  }

  /// Create a subscription that is cancelled together with `self`, but can
  /// also be cancelled on its own without affecting `self`.
  pub fn child(&self) -> Subscription {
    let child = Subscription::default();
    self.add(child.clone());
    child
  }

  /// Cancel the observation and run every registered teardown exactly once.
  ///
  /// Safe to call from inside a notification handler or a teardown.
  pub fn unsubscribe(&self) {
    let teardown = {
      let mut inner = self.0.rc_deref_mut();
      if inner.closed {
        return;
      }
      inner.closed = true;
      std::mem::take(&mut inner.teardown)
    };
    tracing::trace!(teardown = teardown.len(), "subscription closed");
    for mut t in teardown {
      t.unsubscribe();
    }
  }

  #[inline]
  pub fn is_closed(&self) -> bool { self.0.rc_deref().closed }

  /// Number of teardowns still waiting to run.
  pub fn teardown_size(&self) -> usize { self.0.rc_deref().teardown.len() }

  /// Activates "RAII" behavior for this subscription. That means
  /// `unsubscribe()` will be called automatically as soon as the returned
  /// value goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `unsubscribe()` is called immediately, which is probably not what you
  /// want!
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard<Self> { SubscriptionGuard(self) }
}

impl SubscriptionLike for Subscription {
  #[inline]
  fn unsubscribe(&mut self) { Subscription::unsubscribe(self) }

  #[inline]
  fn is_closed(&self) -> bool { Subscription::is_closed(self) }
}

impl Debug for Subscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = self.0.rc_deref();
    f.debug_struct("Subscription")
      .field("closed", &inner.closed)
      .field("teardown_count", &inner.teardown.len())
      .finish()
  }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
///
/// If you want to drop it immediately, wrap it in its own scope
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard<T: SubscriptionLike>(pub(crate) T);

impl<T: SubscriptionLike> SubscriptionGuard<T> {
  /// Wraps an existing subscription with a guard to enable RAII behavior for
  /// it.
  pub fn new(subscription: T) -> SubscriptionGuard<T> { SubscriptionGuard(subscription) }
}

impl<T: SubscriptionLike> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) { self.0.unsubscribe() }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, rc::Rc};

  use super::*;

  #[test]
  fn teardown_runs_once() {
    let hits = Rc::new(Cell::new(0));
    let subscription = Subscription::default();
    let c_hits = hits.clone();
    subscription.add(Teardown::new(move || c_hits.set(c_hits.get() + 1)));

    subscription.unsubscribe();
    subscription.unsubscribe();
    assert_eq!(hits.get(), 1);
    assert!(subscription.is_closed());
  }

  #[test]
  fn add_after_close_runs_immediately() {
    let hits = Rc::new(Cell::new(0));
    let subscription = Subscription::default();
    subscription.unsubscribe();
    let c_hits = hits.clone();
    subscription.add(Teardown::new(move || c_hits.set(c_hits.get() + 1)));
    assert_eq!(hits.get(), 1);
    assert_eq!(subscription.teardown_size(), 0);
  }

  #[test]
  fn child_closes_with_parent() {
    let parent = Subscription::default();
    let l1 = parent.child();
    let l2 = parent.child();
    assert_eq!(parent.teardown_size(), 2);

    l1.unsubscribe();
    assert!(!parent.is_closed());
    // closed children are pruned on the next insert
    let l3 = parent.child();
    assert_eq!(parent.teardown_size(), 2);

    parent.unsubscribe();
    assert!(l2.is_closed());
    assert!(l3.is_closed());
  }

  #[test]
  fn reentrant_unsubscribe_from_teardown() {
    let subscription = Subscription::default();
    let hits = Rc::new(Cell::new(0));
    let c_subscription = subscription.clone();
    let c_hits = hits.clone();
    subscription.add(Teardown::new(move || {
      c_hits.set(c_hits.get() + 1);
      c_subscription.unsubscribe();
    }));
    subscription.unsubscribe();
    assert_eq!(hits.get(), 1);
  }

  #[test]
  fn guard_unsubscribes_on_drop() {
    let subscription = Subscription::default();
    {
      let _guard = subscription.clone().unsubscribe_when_dropped();
    }
    assert!(subscription.is_closed());
  }

  #[test]
  fn guard_cancels_scheduled_task() {
    use crate::scheduler::{Duration, Scheduler, TestScheduler};

    let scheduler = TestScheduler::new();
    let fired = Rc::new(Cell::new(false));
    let c_fired = fired.clone();
    {
      let _guard =
        SubscriptionGuard::new(scheduler.schedule(Duration::from_millis(10), move || c_fired.set(true)));
    }
    scheduler.flush();
    assert!(!fired.get());
  }
}
