//! Hot observables: a subject is an observer and an observable at once and
//! multicasts what it observes to every attached observer.
use crate::{
  observable::Observable,
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
  subscriber::Subscriber,
  subscription::Teardown,
};

mod behavior_subject;
pub use behavior_subject::BehaviorSubject;

/// Multicasts notifications to the observers attached at the time of each
/// notification, in the order they subscribed.
///
/// Once the subject completes or fails it is closed: later notifications are
/// ignored and late subscribers immediately receive the stored terminal
/// notification. Clones share the same observers.
///
/// ```
/// use rxlite::prelude::*;
/// use std::convert::Infallible;
///
/// let subject = Subject::<i32, Infallible>::new();
/// subject.clone().subscribe(|v| println!("first: {v}"));
/// subject.next(1);
/// subject.clone().subscribe(|v| println!("second: {v}"));
/// subject.next(2);
/// ```
pub struct Subject<Item, Err>(MutRc<SubjectState<Item, Err>>);

struct SubjectState<Item, Err> {
  observers: Vec<(usize, Subscriber<Item, Err>)>,
  next_id: usize,
  terminal: Option<Terminal<Err>>,
}

enum Terminal<Err> {
  Error(Err),
  Complete,
}

impl<Item, Err> Subject<Item, Err> {
  pub fn new() -> Self {
    Subject(MutRc::own(SubjectState { observers: vec![], next_id: 0, terminal: None }))
  }

  /// Number of observers currently attached.
  pub fn observer_count(&self) -> usize { self.0.rc_deref().observers.len() }

  /// `true` once the subject completed or failed.
  pub fn is_closed(&self) -> bool { self.0.rc_deref().terminal.is_some() }

  fn snapshot(&self) -> Vec<Subscriber<Item, Err>> {
    let st = self.0.rc_deref();
    if st.terminal.is_some() {
      return vec![];
    }
    st.observers.iter().map(|(_, s)| s.clone()).collect()
  }

  fn close(&self, terminal: Terminal<Err>) -> Option<Vec<Subscriber<Item, Err>>> {
    let mut st = self.0.rc_deref_mut();
    if st.terminal.is_some() {
      return None;
    }
    st.terminal = Some(terminal);
    let observers = std::mem::take(&mut st.observers);
    Some(observers.into_iter().map(|(_, s)| s).collect())
  }
}

impl<Item: Clone, Err> Subject<Item, Err> {
  pub fn next(&self, value: Item) {
    let observers = self.snapshot();
    if let Some((last, rest)) = observers.split_last() {
      for o in rest {
        o.next(value.clone());
      }
      last.next(value);
    }
  }
}

impl<Item, Err: Clone> Subject<Item, Err> {
  pub fn error(&self, err: Err) {
    let Some(observers) = self.close(Terminal::Error(err.clone())) else { return };
    tracing::debug!(observers = observers.len(), "subject failed");
    for o in observers {
      o.error(err.clone());
    }
  }

  pub fn complete(&self) {
    let Some(observers) = self.close(Terminal::Complete) else { return };
    tracing::debug!(observers = observers.len(), "subject completed");
    for o in observers {
      o.complete();
    }
  }
}

impl<Item, Err> Clone for Subject<Item, Err> {
  #[inline]
  fn clone(&self) -> Self { Subject(self.0.clone()) }
}

impl<Item, Err> Default for Subject<Item, Err> {
  fn default() -> Self { Self::new() }
}

impl<Item, Err> Observable for Subject<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Item = Item;
  type Err = Err;

  fn actual_subscribe(self, subscriber: Subscriber<Item, Err>) {
    let replay = {
      let st = self.0.rc_deref();
      match &st.terminal {
        Some(Terminal::Error(err)) => Some(Some(err.clone())),
        Some(Terminal::Complete) => Some(None),
        None => None,
      }
    };
    match replay {
      Some(Some(err)) => subscriber.error(err),
      Some(None) => subscriber.complete(),
      None => {
        let id = {
          let mut st = self.0.rc_deref_mut();
          let id = st.next_id;
          st.next_id += 1;
          st.observers.push((id, subscriber.clone()));
          id
        };
        tracing::trace!(id, "subject observer attached");
        let weak = self.0.downgrade();
        subscriber.subscription().add(Teardown::new(move || {
          let Some(state) = weak.upgrade() else { return };
          let removed = {
            let mut st = state.rc_deref_mut();
            st.observers
              .iter()
              .position(|(i, _)| *i == id)
              .map(|idx| st.observers.remove(idx))
          };
          if removed.is_some() {
            tracing::trace!(id, "subject observer detached");
          }
        }));
      }
    }
  }
}

impl<Item: Clone, Err: Clone> Observer<Item, Err> for Subject<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { Subject::next(self, value) }

  #[inline]
  fn error(&mut self, err: Err) { Subject::error(self, err) }

  #[inline]
  fn complete(&mut self) { Subject::complete(self) }

  #[inline]
  fn is_finished(&self) -> bool { self.is_closed() }
}
