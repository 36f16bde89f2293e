//! # rxlite: a small push-based reactive engine
//!
//! Observables are lazy recipes that push values to subscribers. Everything
//! runs on the calling thread; time-based sources take a [`Scheduler`] so
//! tests can drive them with virtual time.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxlite::prelude::*;
//!
//! observable::from_iter(0..10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe(|v| println!("Value: {}", v));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | A lazy source, run once per subscription |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`Subject`] | Hot multicast source and observer at once |
//! | [`Scheduler`] | Defers work in time |
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** (default): `from_future` helpers on a
//!   `futures` executor
//! - **`timer`** (default): [`LocalScheduler`], a wall-clock scheduler built
//!   on `futures-time`
//! - **`tokio-scheduler`**: `TokioLocalScheduler`, for use inside a tokio
//!   `LocalSet`
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`Subject`]: subject::Subject
//! [`Scheduler`]: scheduler::Scheduler
//! [`LocalScheduler`]: scheduler::LocalScheduler
pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod subject;
pub mod subscriber;
pub mod subscription;
pub mod type_hint;

pub use prelude::*;

#[cfg(doctest)]
mod readme {
  #![doc = include_str!("../README.md")]
}
