use crate::{
  observable::Observable,
  scheduler::TaskHandle,
  subscriber::Subscriber,
  subscription::{Subscription, SubscriptionLike, Teardown},
  type_hint::TypeHint,
};

/// Creates an observable from a producer function.
///
/// The producer runs synchronously on every subscription and receives a
/// [`Subscriber`] to emit into; it may keep clones of it to emit later from a
/// scheduled task. What the producer returns decides the teardown:
///
/// - `()`: nothing to release;
/// - a [`Teardown`], [`Subscription`] or [`TaskHandle`]: released when the
///   subscription ends, whether by completion, error or cancellation;
/// - `Err(err)`: the producer failed synchronously, `err` is emitted as the
///   stream error unless the stream already terminated.
///
/// ```
/// use rxlite::prelude::*;
/// use std::convert::Infallible;
///
/// observable::create(|subscriber: Subscriber<&'static str, Infallible>| {
///   subscriber.next("Alice");
///   subscriber.next("Ben");
///   subscriber.complete();
///   Teardown::new(|| println!("Teardown"))
/// })
/// .subscribe(|name| println!("{}", name));
/// ```
pub fn create<F, R, Item, Err>(producer: F) -> Create<F, Item, Err>
where
  F: FnOnce(Subscriber<Item, Err>) -> R,
  R: TeardownLogic<Err>,
{
  Create { producer, _hint: TypeHint::new() }
}

pub struct Create<F, Item, Err> {
  producer: F,
  _hint: TypeHint<(Item, Err)>,
}

impl<F: Clone, Item, Err> Clone for Create<F, Item, Err> {
  fn clone(&self) -> Self { Create { producer: self.producer.clone(), _hint: TypeHint::new() } }
}

impl<F, R, Item, Err> Observable for Create<F, Item, Err>
where
  F: FnOnce(Subscriber<Item, Err>) -> R,
  R: TeardownLogic<Err>,
  Item: 'static,
  Err: 'static,
{
  type Item = Item;
  type Err = Err;

  fn actual_subscribe(self, subscriber: Subscriber<Item, Err>) {
    match (self.producer)(subscriber.clone()).into_teardown() {
      Ok(Some(teardown)) => subscriber.subscription().add(teardown),
      Ok(None) => {}
      Err(err) => subscriber.error(err),
    }
  }
}

/// What a producer may hand back to `create`.
pub trait TeardownLogic<Err> {
  fn into_teardown(self) -> Result<Option<Box<dyn SubscriptionLike>>, Err>;
}

impl<Err> TeardownLogic<Err> for () {
  #[inline]
  fn into_teardown(self) -> Result<Option<Box<dyn SubscriptionLike>>, Err> { Ok(None) }
}

impl<Err> TeardownLogic<Err> for Teardown {
  #[inline]
  fn into_teardown(self) -> Result<Option<Box<dyn SubscriptionLike>>, Err> {
    Ok(Some(Box::new(self)))
  }
}

impl<Err> TeardownLogic<Err> for Subscription {
  #[inline]
  fn into_teardown(self) -> Result<Option<Box<dyn SubscriptionLike>>, Err> {
    Ok(Some(Box::new(self)))
  }
}

impl<Err> TeardownLogic<Err> for TaskHandle {
  #[inline]
  fn into_teardown(self) -> Result<Option<Box<dyn SubscriptionLike>>, Err> {
    Ok(Some(Box::new(self)))
  }
}

impl<T, Err> TeardownLogic<Err> for Result<T, Err>
where
  T: TeardownLogic<Err>,
{
  #[inline]
  fn into_teardown(self) -> Result<Option<Box<dyn SubscriptionLike>>, Err> {
    self.and_then(TeardownLogic::into_teardown)
  }
}
