use std::collections::VecDeque;

use crate::{
  observable::Observable,
  observer::Observer,
  rc::{MutRc, RcDerefMut},
  subscriber::Subscriber,
  subscription::Teardown,
};

/// Projects every source value to an inner observable and merges the inner
/// streams, keeping at most `concurrent` of them subscribed. Projections
/// that exceed the limit wait in a queue and start in arrival order.
///
/// `concat_map` is this operator with a limit of one, `merge_map` without a
/// limit. The result completes once the source and every inner stream have
/// completed. An error from the source or any inner stream is forwarded at
/// once and cancels all other work, queued projections included.
#[derive(Clone)]
pub struct MergeMapOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
  pub(crate) concurrent: usize,
}

struct MergeState<R> {
  queue: VecDeque<R>,
  active: usize,
  outer_completed: bool,
}

impl<S, F, R> Observable for MergeMapOp<S, F>
where
  S: Observable,
  F: FnMut(S::Item) -> R + 'static,
  R: Observable<Err = S::Err> + 'static,
{
  type Item = R::Item;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<R::Item, S::Err>) {
    let state = MutRc::own(MergeState { queue: VecDeque::new(), active: 0, outer_completed: false });
    let c_state = state.clone();
    subscriber.subscription().add(Teardown::new(move || {
      let queue = std::mem::take(&mut c_state.rc_deref_mut().queue);
      if !queue.is_empty() {
        tracing::debug!(queued = queue.len(), "merge_map dropped queued projections");
      }
    }));
    let outer = subscriber.subscription().child();
    let observer = MergeMapObserver {
      downstream: subscriber,
      func: self.func,
      state,
      concurrent: self.concurrent,
    };
    self.source.actual_subscribe(Subscriber::new(observer, outer));
  }
}

pub struct MergeMapObserver<R: Observable, F> {
  downstream: Subscriber<R::Item, R::Err>,
  func: F,
  state: MutRc<MergeState<R>>,
  concurrent: usize,
}

fn subscribe_inner<R>(inner: R, downstream: &Subscriber<R::Item, R::Err>, state: &MutRc<MergeState<R>>)
where
  R: Observable + 'static,
{
  let observer = InnerObserver { downstream: downstream.clone(), state: state.clone() };
  inner.actual_subscribe(Subscriber::new(observer, downstream.subscription().child()));
}

impl<Item, R, F> Observer<Item, R::Err> for MergeMapObserver<R, F>
where
  F: FnMut(Item) -> R,
  R: Observable + 'static,
{
  fn next(&mut self, value: Item) {
    let inner = (self.func)(value);
    let inner = {
      let mut st = self.state.rc_deref_mut();
      if st.active < self.concurrent {
        st.active += 1;
        Some(inner)
      } else {
        st.queue.push_back(inner);
        None
      }
    };
    if let Some(inner) = inner {
      subscribe_inner(inner, &self.downstream, &self.state);
    }
  }

  fn error(&mut self, err: R::Err) { self.downstream.error(err) }

  fn complete(&mut self) {
    let done = {
      let mut st = self.state.rc_deref_mut();
      st.outer_completed = true;
      st.active == 0
    };
    if done {
      self.downstream.complete();
    }
  }

  fn is_finished(&self) -> bool { self.downstream.is_finished() }
}

struct InnerObserver<R: Observable> {
  downstream: Subscriber<R::Item, R::Err>,
  state: MutRc<MergeState<R>>,
}

enum Step<R> {
  Start(R),
  Complete,
  Idle,
}

impl<R: Observable + 'static> Observer<R::Item, R::Err> for InnerObserver<R> {
  fn next(&mut self, value: R::Item) { self.downstream.next(value) }

  fn error(&mut self, err: R::Err) { self.downstream.error(err) }

  fn complete(&mut self) {
    let step = {
      let mut st = self.state.rc_deref_mut();
      match st.queue.pop_front() {
        Some(next) => Step::Start(next),
        None => {
          st.active -= 1;
          if st.active == 0 && st.outer_completed {
            Step::Complete
          } else {
            Step::Idle
          }
        }
      }
    };
    match step {
      Step::Start(next) => subscribe_inner(next, &self.downstream, &self.state),
      Step::Complete => self.downstream.complete(),
      Step::Idle => {}
    }
  }

  fn is_finished(&self) -> bool { self.downstream.is_finished() }
}
