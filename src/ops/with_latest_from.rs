use crate::{
  observable::Observable,
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
  subscriber::Subscriber,
};

/// An Observable that pairs every value of `source` with the latest value
/// of `other`.
///
/// This struct is created by the with_latest_from method on
/// [ObservableExt](crate::observable::ObservableExt::with_latest_from). See
/// its documentation for more.
#[derive(Clone)]
pub struct WithLatestFromOp<S, FS> {
  pub(crate) source: S,
  pub(crate) other: FS,
}

impl<S, FS> Observable for WithLatestFromOp<S, FS>
where
  S: Observable,
  FS: Observable<Err = S::Err>,
  FS::Item: Clone,
{
  type Item = (S::Item, FS::Item);
  type Err = S::Err;

  fn actual_subscribe(self, subscriber: Subscriber<(S::Item, FS::Item), S::Err>) {
    let latest = MutRc::own(None);
    // `other` goes first so values it emits synchronously are already known
    // to the source's first value.
    let b_observer = BObserver { observer: subscriber.clone(), value: latest.clone() };
    self
      .other
      .actual_subscribe(Subscriber::new(b_observer, subscriber.subscription().child()));
    if subscriber.is_finished() {
      return;
    }
    let subscription = subscriber.subscription().clone();
    let a_observer = AObserver { observer: subscriber, value: latest };
    self.source.actual_subscribe(Subscriber::new(a_observer, subscription));
  }
}

pub struct AObserver<O, V> {
  observer: O,
  value: MutRc<Option<V>>,
}

impl<A, B: Clone, Err> Observer<A, Err> for AObserver<Subscriber<(A, B), Err>, B> {
  fn next(&mut self, value: A) {
    let latest = self.value.rc_deref().clone();
    if let Some(latest) = latest {
      self.observer.next((value, latest));
    }
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }

  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

pub struct BObserver<O, V> {
  observer: O,
  value: MutRc<Option<V>>,
}

impl<A, B, Err> Observer<B, Err> for BObserver<Subscriber<(A, B), Err>, B> {
  fn next(&mut self, value: B) { *self.value.rc_deref_mut() = Some(value); }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  // Completion of `other` keeps its last value in use.
  fn complete(&mut self) {}

  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
