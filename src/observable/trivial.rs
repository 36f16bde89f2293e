use std::convert::Infallible;

use crate::{observable::Observable, subscriber::Subscriber, type_hint::TypeHint};

/// Creates an observable that emits no items, just terminates with an error.
///
/// # Arguments
///
/// * `err` - An error to emit and terminate with
pub fn throw_err<Item, Err>(err: Err) -> ThrowErr<Item, Err> {
  ThrowErr { err, _hint: TypeHint::new() }
}

pub struct ThrowErr<Item, Err> {
  err: Err,
  _hint: TypeHint<Item>,
}

impl<Item, Err: Clone> Clone for ThrowErr<Item, Err> {
  fn clone(&self) -> Self { ThrowErr { err: self.err.clone(), _hint: TypeHint::new() } }
}

impl<Item: 'static, Err: 'static> Observable for ThrowErr<Item, Err> {
  type Item = Item;
  type Err = Err;

  fn actual_subscribe(self, subscriber: Subscriber<Item, Err>) { subscriber.error(self.err); }
}

/// Creates an observable that produces no values.
///
/// Completes immediately. Never emits an error.
///
/// # Examples
/// ```
/// use rxlite::prelude::*;
///
/// observable::empty().subscribe(|v: i32| println!("{},", v));
///
/// // Result: no thing printed
/// ```
pub fn empty<Item>() -> Empty<Item> { Empty(TypeHint::new()) }

pub struct Empty<Item>(TypeHint<Item>);

impl<Item> Clone for Empty<Item> {
  fn clone(&self) -> Self { Empty(TypeHint::new()) }
}

impl<Item: 'static> Observable for Empty<Item> {
  type Item = Item;
  type Err = Infallible;

  fn actual_subscribe(self, subscriber: Subscriber<Item, Infallible>) { subscriber.complete(); }
}

/// Creates an observable that never emits anything.
///
/// Neither emits a value, nor completes, nor emits an error.
pub fn never<Item>() -> Never<Item> { Never(TypeHint::new()) }

pub struct Never<Item>(TypeHint<Item>);

impl<Item> Clone for Never<Item> {
  fn clone(&self) -> Self { Never(TypeHint::new()) }
}

impl<Item: 'static> Observable for Never<Item> {
  type Item = Item;
  type Err = Infallible;

  #[inline]
  fn actual_subscribe(self, _subscriber: Subscriber<Item, Infallible>) {}
}
