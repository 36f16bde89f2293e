use std::{cell::RefCell, convert::Infallible, rc::Rc};

use crate::{
  observable::Observable,
  rc::{MutRc, RcDeref, RcDerefMut},
  subscriber::Subscriber,
  subscription::Teardown,
  type_hint::TypeHint,
};

/// Identifies a listener registered on an [`EventSource`].
pub type ListenerId = usize;

/// Something that dispatches named events to registered listeners, such as a
/// UI element or a socket wrapper.
pub trait EventSource<Event> {
  fn add_listener(&self, name: &str, listener: Box<dyn FnMut(Event)>) -> ListenerId;

  fn remove_listener(&self, name: &str, id: ListenerId);
}

/// Creates an observable of the `name` events of `source`.
///
/// A listener is added when subscribing and removed when the subscription
/// ends. The stream never completes on its own.
///
/// ```
/// use rxlite::prelude::*;
///
/// let button = EventEmitter::new();
/// let clicks = observable::from_event(button.clone(), "click")
///   .subscribe(|(x, y): (i32, i32)| println!("click at {x},{y}"));
/// button.emit("click", (10, 20));
/// clicks.unsubscribe();
/// assert_eq!(button.listener_count("click"), 0);
/// ```
pub fn from_event<Src, Event>(source: Src, name: impl Into<String>) -> FromEvent<Src, Event>
where
  Src: EventSource<Event>,
{
  FromEvent { source, name: name.into(), _hint: TypeHint::new() }
}

pub struct FromEvent<Src, Event> {
  source: Src,
  name: String,
  _hint: TypeHint<Event>,
}

impl<Src: Clone, Event> Clone for FromEvent<Src, Event> {
  fn clone(&self) -> Self {
    FromEvent { source: self.source.clone(), name: self.name.clone(), _hint: TypeHint::new() }
  }
}

impl<Src, Event> Observable for FromEvent<Src, Event>
where
  Src: EventSource<Event> + 'static,
  Event: 'static,
{
  type Item = Event;
  type Err = Infallible;

  fn actual_subscribe(self, subscriber: Subscriber<Event, Infallible>) {
    let FromEvent { source, name, .. } = self;
    let emitter = subscriber.clone();
    let id = source.add_listener(&name, Box::new(move |e| emitter.next(e)));
    tracing::trace!(event = %name, id, "event listener added");
    subscriber.subscription().add(Teardown::new(move || {
      source.remove_listener(&name, id);
      tracing::trace!(event = %name, id, "event listener removed");
    }));
  }
}

/// An in-memory [`EventSource`]. Clones share the same listeners.
pub struct EventEmitter<Event>(MutRc<EmitterState<Event>>);

struct EmitterState<Event> {
  listeners: Vec<Listener<Event>>,
  next_id: ListenerId,
}

struct Listener<Event> {
  id: ListenerId,
  name: String,
  callback: Rc<RefCell<Box<dyn FnMut(Event)>>>,
}

impl<Event> EventEmitter<Event> {
  pub fn new() -> Self { EventEmitter(MutRc::own(EmitterState { listeners: vec![], next_id: 0 })) }

  pub fn listener_count(&self, name: &str) -> usize {
    self
      .0
      .rc_deref()
      .listeners
      .iter()
      .filter(|l| l.name == name)
      .count()
  }

  fn is_registered(&self, id: ListenerId) -> bool {
    self.0.rc_deref().listeners.iter().any(|l| l.id == id)
  }
}

impl<Event: Clone> EventEmitter<Event> {
  /// Deliver `event` to every listener of `name`, in registration order.
  ///
  /// A listener removed by an earlier listener during the same dispatch is
  /// skipped; a listener that re-enters `emit` for itself does not see the
  /// nested event.
  pub fn emit(&self, name: &str, event: Event) {
    let snapshot: Vec<_> = self
      .0
      .rc_deref()
      .listeners
      .iter()
      .filter(|l| l.name == name)
      .map(|l| (l.id, l.callback.clone()))
      .collect();
    for (id, callback) in snapshot {
      if !self.is_registered(id) {
        continue;
      }
      match callback.try_borrow_mut() {
        Ok(mut f) => f(event.clone()),
        Err(_) => tracing::warn!(event = name, id, "listener is busy, nested event dropped"),
      };
    }
  }
}

impl<Event> EventSource<Event> for EventEmitter<Event> {
  fn add_listener(&self, name: &str, listener: Box<dyn FnMut(Event)>) -> ListenerId {
    let mut state = self.0.rc_deref_mut();
    let id = state.next_id;
    state.next_id += 1;
    state.listeners.push(Listener {
      id,
      name: name.to_owned(),
      callback: Rc::new(RefCell::new(listener)),
    });
    id
  }

  fn remove_listener(&self, name: &str, id: ListenerId) {
    let removed = {
      let mut state = self.0.rc_deref_mut();
      state
        .listeners
        .iter()
        .position(|l| l.id == id && l.name == name)
        .map(|idx| state.listeners.remove(idx))
    };
    // Dropping the listener may drop a subscriber, do it with no borrow held.
    drop(removed);
  }
}

impl<Event> Clone for EventEmitter<Event> {
  #[inline]
  fn clone(&self) -> Self { EventEmitter(self.0.clone()) }
}

impl<Event> Default for EventEmitter<Event> {
  fn default() -> Self { Self::new() }
}
