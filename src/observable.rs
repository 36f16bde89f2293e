//! The `Observable` trait, the `ObservableExt` operator surface and the
//! creation helpers.
use std::{convert::Infallible, time::Duration};

use crate::{
  observer::{ignore_complete, ignore_err, Observer, ObserverAll},
  ops::{
    catch_error::CatchErrorOp, combine_latest::CombineLatestOp, debounce::DebounceOp,
    filter::FilterOp, map::MapOp, map::TryMapOp, map_err::MapErrOp, merge_map::MergeMapOp,
    switch_map::SwitchMapOp, tap::TapOp, with_latest_from::WithLatestFromOp,
  },
  scheduler::Scheduler,
  subscriber::Subscriber,
  subscription::Subscription,
};

mod boxed;
pub use boxed::*;
mod combine_latest;
pub use combine_latest::*;
mod create;
pub use create::*;
mod fork_join;
pub use fork_join::*;
mod from_event;
pub use from_event::*;
mod from_future;
pub use from_future::*;
mod from_iter;
pub use from_iter::*;
mod interval;
pub use interval::*;
mod of;
pub use of::*;
mod timer;
pub use timer::*;
mod trivial;
pub use trivial::*;

/// A lazy, repeatable recipe that produces notifications for a subscriber.
///
/// Holding an observable has no side effect. Every call to
/// `actual_subscribe` runs the recipe again, so two subscriptions of a cold
/// observable share nothing. Observables are consumed by subscribing; clone
/// them to subscribe more than once.
pub trait Observable: Sized {
  type Item: 'static;
  type Err: 'static;

  /// Start producing for `subscriber`. Teardowns are registered on
  /// `subscriber.subscription()`.
  fn actual_subscribe(self, subscriber: Subscriber<Self::Item, Self::Err>);
}

/// Subscription helpers and pipeable operators, available on every
/// [`Observable`].
pub trait ObservableExt: Observable {
  /// Subscribe an observer and return the handle that cancels it.
  fn subscribe_with<O>(self, observer: O) -> Subscription
  where
    O: Observer<Self::Item, Self::Err> + 'static,
  {
    let subscription = Subscription::default();
    tracing::trace!("subscribe");
    self.actual_subscribe(Subscriber::new(observer, subscription.clone()));
    subscription
  }

  /// Subscribe with a value callback only. Errors are dropped.
  fn subscribe<N>(self, next: N) -> Subscription
  where
    N: FnMut(Self::Item) + 'static,
  {
    self.subscribe_with(ObserverAll::new(
      next,
      ignore_err::<Self::Err> as fn(Self::Err),
      ignore_complete as fn(),
    ))
  }

  fn subscribe_err<N, E>(self, next: N, error: E) -> Subscription
  where
    N: FnMut(Self::Item) + 'static,
    E: FnMut(Self::Err) + 'static,
  {
    self.subscribe_with(ObserverAll::new(next, error, ignore_complete as fn()))
  }

  fn subscribe_complete<N, C>(self, next: N, complete: C) -> Subscription
  where
    N: FnMut(Self::Item) + 'static,
    C: FnMut() + 'static,
  {
    self.subscribe_with(ObserverAll::new(next, ignore_err::<Self::Err> as fn(Self::Err), complete))
  }

  fn subscribe_all<N, E, C>(self, next: N, error: E, complete: C) -> Subscription
  where
    N: FnMut(Self::Item) + 'static,
    E: FnMut(Self::Err) + 'static,
    C: FnMut() + 'static,
  {
    self.subscribe_with(ObserverAll::new(next, error, complete))
  }

  /// Apply an operator function. Chained calls compose left to right.
  ///
  /// ```
  /// use rxlite::prelude::*;
  ///
  /// fn double<S: Observable<Item = i32>>(s: S) -> impl Observable<Item = i32, Err = S::Err> {
  ///   s.map(|v| v * 2)
  /// }
  ///
  /// observable::of(21).pipe(double).subscribe(|v| assert_eq!(v, 42));
  /// ```
  #[inline]
  fn pipe<R, Op>(self, op: Op) -> R
  where
    Op: FnOnce(Self) -> R,
  {
    op(self)
  }

  /// Erase the concrete type of this observable.
  fn box_it(self) -> BoxedObservable<Self::Item, Self::Err>
  where
    Self: Clone + 'static,
  {
    BoxedObservable::new(self)
  }

  /// Creates a new stream which calls a closure on each element and uses
  /// its return as the value.
  #[inline]
  fn map<B, F>(self, func: F) -> MapOp<Self, F>
  where
    F: FnMut(Self::Item) -> B + 'static,
  {
    MapOp { source: self, func }
  }

  /// Like `map`, but an `Err` returned by the closure is emitted as the
  /// stream's error and ends the stream.
  #[inline]
  fn try_map<B, F>(self, func: F) -> TryMapOp<Self, F>
  where
    F: FnMut(Self::Item) -> Result<B, Self::Err> + 'static,
  {
    TryMapOp { source: self, func }
  }

  /// Emit only those items from an Observable that pass a predicate test
  #[inline]
  fn filter<F>(self, filter: F) -> FilterOp<Self, F>
  where
    F: FnMut(&Self::Item) -> bool + 'static,
  {
    FilterOp { source: self, filter }
  }

  /// Invoke a side effect for each value without changing the stream.
  #[inline]
  fn tap<F>(self, next: F) -> TapOp<Self, F, fn(&Self::Err), fn()>
  where
    F: FnMut(&Self::Item) + 'static,
  {
    TapOp {
      source: self,
      next,
      error: ignore_ref::<Self::Err> as fn(&Self::Err),
      complete: ignore_complete as fn(),
    }
  }

  /// `tap` with callbacks for every kind of notification.
  #[inline]
  fn tap_all<N, E, C>(self, next: N, error: E, complete: C) -> TapOp<Self, N, E, C>
  where
    N: FnMut(&Self::Item) + 'static,
    E: FnMut(&Self::Err) + 'static,
    C: FnMut() + 'static,
  {
    TapOp { source: self, next, error, complete }
  }

  /// Convert the error of the stream.
  #[inline]
  fn map_err<E2, F>(self, func: F) -> MapErrOp<Self, F>
  where
    F: FnMut(Self::Err) -> E2 + 'static,
  {
    MapErrOp { source: self, func }
  }

  /// Give a stream that never fails the error type required by another
  /// stream, e.g. to return `of(..)` from a `concat_map` projection.
  #[inline]
  fn with_err<E>(self) -> MapErrOp<Self, fn(Infallible) -> E>
  where
    Self: Observable<Err = Infallible>,
  {
    MapErrOp { source: self, func: never_error::<E> as fn(Infallible) -> E }
  }

  /// Replace an error with the observable returned by `handler`.
  #[inline]
  fn catch_error<R, F>(self, handler: F) -> CatchErrorOp<Self, F>
  where
    F: FnOnce(Self::Err) -> R + 'static,
    R: Observable<Item = Self::Item>,
  {
    CatchErrorOp { source: self, handler }
  }

  /// Emit a value only after `duration` passed without another value.
  ///
  /// Completion of the source drops a value that is still waiting.
  #[inline]
  fn debounce<SD>(self, duration: Duration, scheduler: SD) -> DebounceOp<Self, SD>
  where
    SD: Scheduler,
  {
    DebounceOp { source: self, duration, scheduler }
  }

  /// Project each value to an inner observable and subscribe to them one at
  /// a time, in order.
  #[inline]
  fn concat_map<R, F>(self, func: F) -> MergeMapOp<Self, F>
  where
    F: FnMut(Self::Item) -> R + 'static,
    R: Observable<Err = Self::Err> + 'static,
  {
    MergeMapOp { source: self, func, concurrent: 1 }
  }

  /// Project each value to an inner observable and subscribe to all of them
  /// at once.
  #[inline]
  fn merge_map<R, F>(self, func: F) -> MergeMapOp<Self, F>
  where
    F: FnMut(Self::Item) -> R + 'static,
    R: Observable<Err = Self::Err> + 'static,
  {
    MergeMapOp { source: self, func, concurrent: usize::MAX }
  }

  /// `merge_map` with at most `concurrent` active inner subscriptions; the
  /// rest wait in a queue.
  ///
  /// # Panics
  ///
  /// Panics if `concurrent` is zero.
  #[inline]
  fn merge_map_with_concurrency<R, F>(self, concurrent: usize, func: F) -> MergeMapOp<Self, F>
  where
    F: FnMut(Self::Item) -> R + 'static,
    R: Observable<Err = Self::Err> + 'static,
  {
    assert!(concurrent > 0, "merge_map_with_concurrency needs a concurrency of at least 1");
    MergeMapOp { source: self, func, concurrent }
  }

  /// Project each value to an inner observable, cancelling the previous one.
  #[inline]
  fn switch_map<R, F>(self, func: F) -> SwitchMapOp<Self, F>
  where
    F: FnMut(Self::Item) -> R + 'static,
    R: Observable<Err = Self::Err> + 'static,
  {
    SwitchMapOp { source: self, func }
  }

  /// Pair each value with the latest value of `other`. Values arriving before
  /// `other` produced anything are dropped.
  #[inline]
  fn with_latest_from<B>(self, other: B) -> WithLatestFromOp<Self, B>
  where
    B: Observable<Err = Self::Err>,
    B::Item: Clone,
  {
    WithLatestFromOp { source: self, other }
  }

  /// Combine the latest values of `self` and `other` with `binary_op` every
  /// time either emits, once both have emitted.
  #[inline]
  fn combine_latest_with<B, F, Out>(self, other: B, binary_op: F) -> CombineLatestOp<Self, B, F>
  where
    B: Observable<Err = Self::Err>,
    F: FnMut(Self::Item, B::Item) -> Out + 'static,
    Self::Item: Clone,
    B::Item: Clone,
  {
    CombineLatestOp { a: self, b: other, binary_op }
  }
}

impl<T: Observable> ObservableExt for T {}

fn ignore_ref<T>(_: &T) {}

fn never_error<E>(err: Infallible) -> E { match err {} }
