use std::convert::Infallible;

use crate::{observable::Observable, subscriber::Subscriber};

/// Creates an observable producing a single value and then completing.
///
/// # Examples
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::of(123).subscribe(|v| println!("{},", v));
/// ```
pub fn of<Item>(v: Item) -> ObservableOf<Item> { ObservableOf(v) }

/// Creates an observable emitting each argument in order and then completing.
///
/// ```
/// use rxlite::{of, prelude::*};
///
/// of!("Alice", "Ben", "Charlie").subscribe(|name| println!("{}", name));
/// ```
#[macro_export]
macro_rules! of {
  ($($v:expr),+ $(,)?) => {
    $crate::observable::from_iter([$($v),+])
  };
}

#[derive(Clone)]
pub struct ObservableOf<Item>(Item);

impl<Item: 'static> Observable for ObservableOf<Item> {
  type Item = Item;
  type Err = Infallible;

  fn actual_subscribe(self, subscriber: Subscriber<Item, Infallible>) {
    subscriber.next(self.0);
    subscriber.complete();
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn of() {
    let value = Rc::new(Cell::new(0));
    let completed = Rc::new(Cell::new(false));
    let (c_value, c_completed) = (value.clone(), completed.clone());
    observable::of(100).subscribe_complete(move |v| c_value.set(v), move || c_completed.set(true));

    assert_eq!(value.get(), 100);
    assert!(completed.get());
  }

  #[test]
  fn of_macro_emits_in_order_then_completes() {
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());
    let subscription = crate::of!("Alice", "Ben", "Charlie")
      .subscribe_complete(move |v| l1.borrow_mut().push(v), move || l2.borrow_mut().push("Completed"));

    assert_eq!(*log.borrow(), vec!["Alice", "Ben", "Charlie", "Completed"]);
    assert!(subscription.is_closed());
  }

  #[test]
  fn fork() {
    let o = observable::of(1);
    let sum = Rc::new(Cell::new(0));
    let (c1, c2) = (sum.clone(), sum.clone());
    o.clone().subscribe(move |v| c1.set(c1.get() + v));
    o.subscribe(move |v| c2.set(c2.get() + v));
    assert_eq!(sum.get(), 2);
  }
}
