use crate::{
  observable::Observable,
  observer::Observer,
  rc::{MutRc, RcDerefMut},
  subscriber::Subscriber,
};

/// Combines the latest value of every source each time any of them emits,
/// once all of them have emitted at least once.
///
/// A completed source keeps contributing its last value. The result
/// completes once every source has completed, and fails as soon as any
/// source fails. An empty list of sources completes immediately.
///
/// For two sources of different types see
/// [`ObservableExt::combine_latest_with`](crate::observable::ObservableExt::combine_latest_with).
pub fn combine_latest<S>(sources: Vec<S>) -> CombineLatest<S>
where
  S: Observable,
  S::Item: Clone,
{
  CombineLatest(sources)
}

#[derive(Clone)]
pub struct CombineLatest<S>(Vec<S>);

impl<S> Observable for CombineLatest<S>
where
  S: Observable,
  S::Item: Clone,
{
  type Item = Vec<S::Item>;
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<Vec<S::Item>, S::Err>) {
    let len = self.0.len();
    if len == 0 {
      subscriber.complete();
      return;
    }
    let state = MutRc::own(CombineState {
      values: (0..len).map(|_| None).collect(),
      has_value: 0,
      completed: 0,
    });
    for (idx, source) in self.0.into_iter().enumerate() {
      if subscriber.is_finished() {
        break;
      }
      let observer = CombineObserver { idx, state: state.clone(), downstream: subscriber.clone() };
      source.actual_subscribe(Subscriber::new(observer, subscriber.subscription().child()));
    }
  }
}

struct CombineState<Item> {
  values: Vec<Option<Item>>,
  has_value: usize,
  completed: usize,
}

struct CombineObserver<Item, Err> {
  idx: usize,
  state: MutRc<CombineState<Item>>,
  downstream: Subscriber<Vec<Item>, Err>,
}

impl<Item: Clone, Err> Observer<Item, Err> for CombineObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    let combined: Option<Vec<Item>> = {
      let mut st = self.state.rc_deref_mut();
      if st.values[self.idx].replace(value).is_none() {
        st.has_value += 1;
      }
      (st.has_value == st.values.len()).then(|| st.values.iter().flatten().cloned().collect())
    };
    if let Some(combined) = combined {
      self.downstream.next(combined);
    }
  }

  fn error(&mut self, err: Err) { self.downstream.error(err); }

  fn complete(&mut self) {
    let all_done = {
      let mut st = self.state.rc_deref_mut();
      st.completed += 1;
      st.completed == st.values.len()
    };
    if all_done {
      self.downstream.complete();
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.downstream.is_finished() }
}
