use std::collections::VecDeque;

use crate::{
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
  subscription::{Subscription, Teardown},
};

/// One notification of the Observable grammar.
pub enum Notification<Item, Err> {
  Next(Item),
  Error(Err),
  Complete,
}

impl<Item, Err> Notification<Item, Err> {
  #[inline]
  pub fn is_terminal(&self) -> bool { !matches!(self, Notification::Next(_)) }
}

/// The wrapper every observer is converted into when it subscribes.
///
/// A `Subscriber` owns the downstream observer and the [`Subscription`] of the
/// observation. It guarantees:
///
/// - nothing reaches the observer after a terminal notification or after the
///   subscription was cancelled;
/// - after forwarding `error` or `complete` the subscription is unsubscribed,
///   so the teardowns run even if the caller never cancels;
/// - a notification that arrives while the observer is still handling an
///   earlier one is queued and delivered once the handler returns.
///
/// Clones share the same state. Producers keep clones to emit from deferred
/// tasks.
pub struct Subscriber<Item, Err> {
  state: MutRc<SubscriberState<Item, Err>>,
  subscription: Subscription,
}

struct SubscriberState<Item, Err> {
  observer: Option<Box<dyn Observer<Item, Err>>>,
  delivering: bool,
  stopped: bool,
  pending: VecDeque<Notification<Item, Err>>,
}

impl<Item, Err> Clone for Subscriber<Item, Err> {
  fn clone(&self) -> Self {
    Subscriber { state: self.state.clone(), subscription: self.subscription.clone() }
  }
}

impl<Item: 'static, Err: 'static> Subscriber<Item, Err> {
  pub fn new(observer: impl Observer<Item, Err> + 'static, subscription: Subscription) -> Self {
    let state = MutRc::own(SubscriberState {
      observer: Some(Box::new(observer) as Box<dyn Observer<Item, Err>>),
      delivering: false,
      stopped: false,
      pending: VecDeque::new(),
    });
    let weak = state.downgrade();
    subscription.add(Teardown::new(move || {
      let Some(state) = weak.upgrade() else { return };
      let released = state.try_rc_deref_mut().map(|mut st| {
        st.pending.clear();
        st.observer.take()
      });
      // The observer may own subscriptions of its own, drop it without any
      // borrow held.
      drop(released);
    }));
    Subscriber { state, subscription }
  }
}

impl<Item, Err> Subscriber<Item, Err> {
  #[inline]
  pub fn next(&self, value: Item) { self.notify(Notification::Next(value)) }

  #[inline]
  pub fn error(&self, err: Err) { self.notify(Notification::Error(err)) }

  #[inline]
  pub fn complete(&self) { self.notify(Notification::Complete) }

  /// The subscription that tears this observation down.
  #[inline]
  pub fn subscription(&self) -> &Subscription { &self.subscription }

  /// `true` once a terminal notification was received or the subscription
  /// was cancelled.
  pub fn is_finished(&self) -> bool {
    self.state.rc_deref().stopped || self.subscription.is_closed()
  }

  pub fn notify(&self, notification: Notification<Item, Err>) {
    let mut observer = {
      let mut st = self.state.rc_deref_mut();
      if st.stopped || self.subscription.is_closed() {
        return;
      }
      if notification.is_terminal() {
        st.stopped = true;
      }
      if st.delivering {
        st.pending.push_back(notification);
        return;
      }
      let Some(observer) = st.observer.take() else { return };
      st.delivering = true;
      observer
    };

    let mut notification = notification;
    loop {
      let terminal = notification.is_terminal();
      match notification {
        Notification::Next(value) => observer.next(value),
        Notification::Error(err) => observer.error(err),
        Notification::Complete => observer.complete(),
      }

      if terminal {
        {
          let mut st = self.state.rc_deref_mut();
          st.delivering = false;
          st.pending.clear();
        }
        drop(observer);
        self.subscription.unsubscribe();
        return;
      }

      let mut st = self.state.rc_deref_mut();
      if self.subscription.is_closed() {
        st.delivering = false;
        st.pending.clear();
        drop(st);
        return;
      }
      match st.pending.pop_front() {
        Some(queued) => notification = queued,
        None => {
          st.delivering = false;
          st.observer = Some(observer);
          return;
        }
      }
    }
  }
}

impl<Item, Err> Observer<Item, Err> for Subscriber<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { Subscriber::next(self, value) }

  #[inline]
  fn error(&mut self, err: Err) { Subscriber::error(self, err) }

  #[inline]
  fn complete(&mut self) { Subscriber::complete(self) }

  #[inline]
  fn is_finished(&self) -> bool { Subscriber::is_finished(self) }
}
