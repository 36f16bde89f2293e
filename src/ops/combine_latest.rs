use crate::{
  observable::Observable,
  observer::Observer,
  rc::{MutRc, RcDerefMut},
  subscriber::Subscriber,
};

/// Combines the latest values of two observables with `binary_op` each time
/// either emits, once both have emitted.
#[derive(Clone)]
pub struct CombineLatestOp<A, B, BinaryOp> {
  pub(crate) a: A,
  pub(crate) b: B,
  pub(crate) binary_op: BinaryOp,
}

impl<A, B, BinaryOp, OutputItem> Observable for CombineLatestOp<A, B, BinaryOp>
where
  A: Observable,
  B: Observable<Err = A::Err>,
  A::Item: Clone,
  B::Item: Clone,
  BinaryOp: FnMut(A::Item, B::Item) -> OutputItem + 'static,
  OutputItem: 'static,
{
  type Item = OutputItem;
  type Err = A::Err;

  fn actual_subscribe(self, subscriber: Subscriber<OutputItem, A::Err>) {
    let state = MutRc::own(CombineLatestState {
      a: None,
      b: None,
      binary_op: self.binary_op,
      completed_one: false,
    });
    let a_observer = AObserver { observer: subscriber.clone(), state: state.clone() };
    self
      .a
      .actual_subscribe(Subscriber::new(a_observer, subscriber.subscription().child()));
    if subscriber.is_finished() {
      return;
    }
    let b_subscription = subscriber.subscription().child();
    let b_observer = BObserver { observer: subscriber, state };
    self.b.actual_subscribe(Subscriber::new(b_observer, b_subscription));
  }
}

enum CombineItem<A, B> {
  ItemA(A),
  ItemB(B),
}

struct CombineLatestState<A, B, BinaryOp> {
  a: Option<A>,
  b: Option<B>,
  binary_op: BinaryOp,
  completed_one: bool,
}

impl<A: Clone, B: Clone, BinaryOp> CombineLatestState<A, B, BinaryOp> {
  fn push<OutputItem>(&mut self, value: CombineItem<A, B>) -> Option<OutputItem>
  where
    BinaryOp: FnMut(A, B) -> OutputItem,
  {
    match value {
      CombineItem::ItemA(v) => self.a = Some(v),
      CombineItem::ItemB(v) => self.b = Some(v),
    }
    match (&self.a, &self.b) {
      (Some(a), Some(b)) => Some((self.binary_op)(a.clone(), b.clone())),
      _ => None,
    }
  }
}

impl<A, B, BinaryOp> CombineLatestState<A, B, BinaryOp> {
  /// `true` when both sides are done.
  fn complete_one(&mut self) -> bool { std::mem::replace(&mut self.completed_one, true) }
}

fn forward<A, B, BinaryOp, OutputItem, Err>(
  state: &MutRc<CombineLatestState<A, B, BinaryOp>>, observer: &Subscriber<OutputItem, Err>,
  value: CombineItem<A, B>,
) where
  A: Clone,
  B: Clone,
  BinaryOp: FnMut(A, B) -> OutputItem,
{
  let combined = state.rc_deref_mut().push(value);
  if let Some(combined) = combined {
    observer.next(combined);
  }
}

fn complete_side<A, B, BinaryOp, OutputItem, Err>(
  state: &MutRc<CombineLatestState<A, B, BinaryOp>>, observer: &Subscriber<OutputItem, Err>,
) {
  let both = state.rc_deref_mut().complete_one();
  if both {
    observer.complete();
  }
}

struct AObserver<O, St> {
  observer: O,
  state: MutRc<St>,
}

impl<A, B, BinaryOp, OutputItem, Err> Observer<A, Err>
  for AObserver<Subscriber<OutputItem, Err>, CombineLatestState<A, B, BinaryOp>>
where
  A: Clone,
  B: Clone,
  BinaryOp: FnMut(A, B) -> OutputItem,
{
  #[inline]
  fn next(&mut self, value: A) { forward(&self.state, &self.observer, CombineItem::ItemA(value)) }

  #[inline]
  fn error(&mut self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(&mut self) { complete_side(&self.state, &self.observer) }

  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

struct BObserver<O, St> {
  observer: O,
  state: MutRc<St>,
}

impl<A, B, BinaryOp, OutputItem, Err> Observer<B, Err>
  for BObserver<Subscriber<OutputItem, Err>, CombineLatestState<A, B, BinaryOp>>
where
  A: Clone,
  B: Clone,
  BinaryOp: FnMut(A, B) -> OutputItem,
{
  #[inline]
  fn next(&mut self, value: B) { forward(&self.state, &self.observer, CombineItem::ItemB(value)) }

  #[inline]
  fn error(&mut self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(&mut self) { complete_side(&self.state, &self.observer) }

  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
