use crate::{
  observable::Observable,
  observer::Observer,
  rc::{MutRc, RcDerefMut},
  subscriber::Subscriber,
};

/// Waits for every source to complete, then emits one `Vec` holding the last
/// value of each source, in source order, and completes.
///
/// - An error from any source is forwarded at once and cancels the others.
/// - A source that completes without a value means there is nothing to
///   combine: the result completes right away without emitting and the
///   other sources are cancelled.
/// - An empty list of sources completes immediately.
pub fn fork_join<S: Observable>(sources: Vec<S>) -> ForkJoin<S> { ForkJoin(sources) }

#[derive(Clone)]
pub struct ForkJoin<S>(Vec<S>);

impl<S: Observable> Observable for ForkJoin<S> {
  type Item = Vec<S::Item>;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<Vec<S::Item>, S::Err>) {
    let len = self.0.len();
    if len == 0 {
      subscriber.complete();
      return;
    }
    let state = MutRc::own(ForkJoinState { values: (0..len).map(|_| None).collect(), remaining: len });
    for (idx, source) in self.0.into_iter().enumerate() {
      if subscriber.is_finished() {
        break;
      }
      let observer = ForkJoinObserver { idx, state: state.clone(), downstream: subscriber.clone() };
      source.actual_subscribe(Subscriber::new(observer, subscriber.subscription().child()));
    }
  }
}

struct ForkJoinState<Item> {
  values: Vec<Option<Item>>,
  remaining: usize,
}

struct ForkJoinObserver<Item, Err> {
  idx: usize,
  state: MutRc<ForkJoinState<Item>>,
  downstream: Subscriber<Vec<Item>, Err>,
}

enum Joined<Item> {
  Waiting,
  Empty,
  Ready(Vec<Item>),
}

impl<Item, Err> Observer<Item, Err> for ForkJoinObserver<Item, Err> {
  fn next(&mut self, value: Item) { self.state.rc_deref_mut().values[self.idx] = Some(value); }

  fn error(&mut self, err: Err) { self.downstream.error(err); }

  fn complete(&mut self) {
    let joined = {
      let mut st = self.state.rc_deref_mut();
      if st.values[self.idx].is_none() {
        Joined::Empty
      } else {
        st.remaining -= 1;
        if st.remaining == 0 {
          Joined::Ready(std::mem::take(&mut st.values).into_iter().flatten().collect())
        } else {
          Joined::Waiting
        }
      }
    };
    match joined {
      Joined::Waiting => {}
      Joined::Empty => {
        tracing::debug!(source = self.idx, "fork_join source completed without a value");
        self.downstream.complete();
      }
      Joined::Ready(values) => {
        self.downstream.next(values);
        self.downstream.complete();
      }
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.downstream.is_finished() }
}
