use crate::{
  observable::Observable,
  observer::Observer,
  rc::{MutRc, RcDerefMut},
  subscriber::Subscriber,
  subscription::Subscription,
};

/// Projects every source value to an inner observable and mirrors only the
/// most recent one: a new source value cancels the inner stream in flight.
///
/// Completes once the source and the current inner stream have completed.
#[derive(Clone)]
pub struct SwitchMapOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

#[derive(Default)]
struct SwitchState {
  inner: Option<Subscription>,
  generation: usize,
  inner_active: bool,
  outer_completed: bool,
}

impl<S, F, R> Observable for SwitchMapOp<S, F>
where
  S: Observable,
  F: FnMut(S::Item) -> R + 'static,
  R: Observable<Err = S::Err> + 'static,
{
  type Item = R::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<R::Item, S::Err>) {
    let outer = subscriber.subscription().child();
    let state = MutRc::own(SwitchState::default());
    let observer = SwitchMapObserver { downstream: subscriber, func: self.func, state };
    self.source.actual_subscribe(Subscriber::new(observer, outer));
  }
}

pub struct SwitchMapObserver<O, F> {
  downstream: O,
  func: F,
  state: MutRc<SwitchState>,
}

impl<Item, Err, B, R, F> Observer<Item, Err> for SwitchMapObserver<Subscriber<B, Err>, F>
where
  F: FnMut(Item) -> R,
  R: Observable<Item = B, Err = Err> + 'static,
  B: 'static,
  Err: 'static,
{
  fn next(&mut self, value: Item) {
    let inner = (self.func)(value);
    let subscription = self.downstream.subscription().child();
    let (previous, generation) = {
      let mut st = self.state.rc_deref_mut();
      st.generation += 1;
      st.inner_active = true;
      (st.inner.replace(subscription.clone()), st.generation)
    };
    if let Some(previous) = previous {
      if !previous.is_closed() {
        tracing::trace!("switch_map cancelled the previous inner stream");
      }
      previous.unsubscribe();
    }
    let observer = SwitchInnerObserver {
      downstream: self.downstream.clone(),
      state: self.state.clone(),
      generation,
    };
    inner.actual_subscribe(Subscriber::new(observer, subscription));
  }

  fn error(&mut self, err: Err) { self.downstream.error(err) }

  fn complete(&mut self) {
    let done = {
      let mut st = self.state.rc_deref_mut();
      st.outer_completed = true;
      !st.inner_active
    };
    if done {
      self.downstream.complete();
    }
  }

  fn is_finished(&self) -> bool { self.downstream.is_finished() }
}

struct SwitchInnerObserver<Item, Err> {
  downstream: Subscriber<Item, Err>,
  state: MutRc<SwitchState>,
  generation: usize,
}

impl<Item, Err> Observer<Item, Err> for SwitchInnerObserver<Item, Err> {
  fn next(&mut self, value: Item) { self.downstream.next(value) }

  fn error(&mut self, err: Err) { self.downstream.error(err) }

  fn complete(&mut self) {
    let done = {
      let mut st = self.state.rc_deref_mut();
      if st.generation != self.generation {
        return;
      }
      st.inner_active = false;
      st.inner = None;
      st.outer_completed
    };
    if done {
      self.downstream.complete();
    }
  }

  fn is_finished(&self) -> bool { self.downstream.is_finished() }
}
