//! Everything a typical program needs, in one import.
pub use crate::{
  error::RxError,
  observable,
  observable::{
    BoxedObservable, EventEmitter, EventSource, ListenerId, Observable, ObservableExt,
    TeardownLogic,
  },
  observer::{Observer, ObserverAll},
  scheduler::{Duration, Scheduler, TaskHandle, TestScheduler},
  subject::{BehaviorSubject, Subject},
  subscriber::{Notification, Subscriber},
  subscription::{Subscription, SubscriptionGuard, SubscriptionLike, Teardown},
};

#[cfg(feature = "timer")]
pub use crate::scheduler::LocalScheduler;
#[cfg(feature = "tokio-scheduler")]
pub use crate::scheduler::TokioLocalScheduler;
