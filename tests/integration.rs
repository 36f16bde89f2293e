use std::{
  cell::{Cell, RefCell},
  convert::Infallible,
  rc::Rc,
};

use float_cmp::approx_eq;
use rxlite::{of, prelude::*};

type Log<T> = Rc<RefCell<Vec<T>>>;

fn log<T>() -> Log<T> { Rc::new(RefCell::new(vec![])) }

/// Emits `{tag}1` after `gap` and `{tag}2` after twice `gap`, then completes.
fn pair(
  tag: &'static str,
  gap: Duration,
  scheduler: TestScheduler,
) -> impl Observable<Item = String, Err = Infallible> {
  observable::create(move |subscriber: Subscriber<String, Infallible>| {
    let first = subscriber.clone();
    let h1 = scheduler.schedule(gap, move || first.next(format!("{tag}1")));
    let h2 = scheduler.schedule(gap * 2, move || {
      subscriber.next(format!("{tag}2"));
      subscriber.complete();
    });
    Teardown::new(move || {
      h1.cancel();
      h2.cancel();
    })
  })
}

#[test]
fn of_emits_in_order_then_completes_once() {
  let events = log();
  let (e1, e2) = (events.clone(), events.clone());
  of!(3, 1, 2).subscribe_complete(
    move |v| e1.borrow_mut().push(v.to_string()),
    move || e2.borrow_mut().push("done".to_owned()),
  );
  assert_eq!(*events.borrow(), vec!["3", "1", "2", "done"]);
}

#[test]
fn cold_observable_runs_producer_per_subscription() {
  let runs = Rc::new(Cell::new(0));
  let c_runs = runs.clone();
  let source = observable::create(move |subscriber: Subscriber<i32, Infallible>| {
    c_runs.set(c_runs.get() + 1);
    let mut counter = 0;
    for _ in 0..3 {
      counter += 1;
      subscriber.next(counter);
    }
    subscriber.complete();
  });

  let (first, second) = (log(), log());
  let (c_first, c_second) = (first.clone(), second.clone());
  source.clone().subscribe(move |v| c_first.borrow_mut().push(v));
  source.subscribe(move |v| c_second.borrow_mut().push(v));

  assert_eq!(runs.get(), 2);
  assert_eq!(*first.borrow(), vec![1, 2, 3]);
  assert_eq!(*second.borrow(), vec![1, 2, 3]);
}

#[test]
fn subject_subscribers_only_see_later_values() {
  let subject = Subject::<i32, Infallible>::new();
  let (early, late) = (log(), log());
  let c_early = early.clone();
  subject.clone().subscribe(move |v| c_early.borrow_mut().push(v));
  subject.next(1);
  let c_late = late.clone();
  subject.clone().subscribe(move |v| c_late.borrow_mut().push(v));
  subject.next(2);

  assert_eq!(*early.borrow(), vec![1, 2]);
  assert_eq!(*late.borrow(), vec![2]);
}

#[test]
fn behavior_subject_starts_with_latest_value() {
  let subject = BehaviorSubject::<&'static str, Infallible>::new("Initial");
  subject.next("Updated");
  let seen = log();
  let c_seen = seen.clone();
  subject.clone().subscribe(move |v| c_seen.borrow_mut().push(v));
  subject.next("Later");
  assert_eq!(*seen.borrow(), vec!["Updated", "Later"]);
}

#[test]
fn cancel_before_timer_prevents_emission() {
  let scheduler = TestScheduler::new();
  let teardowns = Rc::new(Cell::new(0));
  let (c_scheduler, c_teardowns) = (scheduler.clone(), teardowns.clone());
  let source = observable::create(move |subscriber: Subscriber<i32, Infallible>| {
    let handle = c_scheduler.schedule(Duration::from_millis(100), move || {
      subscriber.next(1);
      subscriber.complete();
    });
    Teardown::new(move || {
      handle.cancel();
      c_teardowns.set(c_teardowns.get() + 1);
    })
  });

  let hits = Rc::new(Cell::new(0));
  let c_hits = hits.clone();
  let subscription = source.subscribe(move |_| c_hits.set(c_hits.get() + 1));
  scheduler.advance_by(Duration::from_millis(50));
  subscription.unsubscribe();
  subscription.unsubscribe();
  scheduler.advance_by(Duration::from_millis(100));

  assert_eq!(hits.get(), 0);
  assert_eq!(teardowns.get(), 1);
  assert!(scheduler.is_empty());
}

#[test]
fn concat_map_finishes_each_inner_before_the_next() {
  let scheduler = TestScheduler::new();
  let seen = log();
  let (c_seen, c_scheduler) = (seen.clone(), scheduler.clone());
  of!("A", "B")
    .concat_map(move |tag| {
      let gap = if tag == "A" { 30 } else { 10 };
      pair(tag, Duration::from_millis(gap), c_scheduler.clone())
    })
    .subscribe(move |v| c_seen.borrow_mut().push(v));

  scheduler.flush();
  assert_eq!(*seen.borrow(), vec!["A1", "A2", "B1", "B2"]);
  assert_eq!(scheduler.now(), Duration::from_millis(80));
}

#[test]
fn merge_map_interleaves_by_time() {
  let scheduler = TestScheduler::new();
  let seen = log();
  let (c_seen, c_scheduler) = (seen.clone(), scheduler.clone());
  of!("A", "B")
    .merge_map(move |tag| {
      let gap = if tag == "A" { 30 } else { 10 };
      pair(tag, Duration::from_millis(gap), c_scheduler.clone())
    })
    .subscribe(move |v| c_seen.borrow_mut().push(v));

  scheduler.flush();
  assert_eq!(*seen.borrow(), vec!["B1", "B2", "A1", "A2"]);
}

#[test]
fn switch_map_drops_the_preempted_inner() {
  let scheduler = TestScheduler::new();
  let outer = Subject::<&'static str, Infallible>::new();
  let seen = log();
  let (c_seen, c_scheduler) = (seen.clone(), scheduler.clone());
  outer
    .clone()
    .switch_map(move |tag| pair(tag, Duration::from_millis(30), c_scheduler.clone()))
    .subscribe(move |v| c_seen.borrow_mut().push(v));

  outer.next("A");
  scheduler.advance_by(Duration::from_millis(10));
  outer.next("B");
  scheduler.flush();

  assert_eq!(*seen.borrow(), vec!["B1", "B2"]);
}

#[test]
fn debounce_emits_last_value_of_each_burst() {
  let scheduler = TestScheduler::new();
  let input = Subject::<i32, Infallible>::new();
  let seen = log();
  let (c_seen, c_scheduler) = (seen.clone(), scheduler.clone());
  input
    .clone()
    .debounce(Duration::from_millis(100), scheduler.clone())
    .subscribe(move |v| c_seen.borrow_mut().push((v, c_scheduler.now().as_millis())));

  input.next(1);
  scheduler.advance_by(Duration::from_millis(50));
  input.next(2);
  scheduler.advance_by(Duration::from_millis(70));
  input.next(3);
  scheduler.advance_by(Duration::from_millis(280));
  input.next(4);
  scheduler.advance_by(Duration::from_millis(200));

  assert_eq!(*seen.borrow(), vec![(3, 220), (4, 500)]);
}

#[test]
fn fork_join_emits_once_when_the_last_input_completes() {
  let scheduler = TestScheduler::new();
  let seen = log();
  let (c_seen, c_scheduler) = (seen.clone(), scheduler.clone());
  observable::fork_join(vec![
    pair("A", Duration::from_millis(10), scheduler.clone()),
    pair("B", Duration::from_millis(25), scheduler.clone()),
  ])
  .subscribe(move |v| c_seen.borrow_mut().push((v, c_scheduler.now().as_millis())));

  scheduler.advance_by(Duration::from_millis(49));
  assert!(seen.borrow().is_empty());
  scheduler.advance_by(Duration::from_millis(1));
  assert_eq!(*seen.borrow(), vec![(vec!["A2".to_owned(), "B2".to_owned()], 50)]);
}

#[test]
fn combine_latest_waits_for_both_and_stops_on_error() {
  let (a, b) = (Subject::<i32, &'static str>::new(), Subject::<i32, &'static str>::new());
  let events = log();
  let (e1, e2) = (events.clone(), events.clone());
  observable::combine_latest(vec![a.clone(), b.clone()]).subscribe_err(
    move |v| e1.borrow_mut().push(format!("{v:?}")),
    move |e| e2.borrow_mut().push(e.to_owned()),
  );

  a.next(1);
  assert!(events.borrow().is_empty());
  b.next(10);
  a.next(2);
  b.error("boom");
  a.next(3);

  assert_eq!(*events.borrow(), vec!["[1, 10]", "[2, 10]", "boom"]);
  assert_eq!(a.observer_count(), 0);
}

#[test]
fn filtered_headlines() {
  let headlines = log();
  let c_headlines = headlines.clone();
  of!(
    "Rust 2.0 announced",
    "Local weather: sunny",
    "Rust adoption grows",
    "Sports roundup"
  )
  .filter(|title| title.contains("Rust"))
  .map(|title| title.to_uppercase())
  .subscribe(move |v| c_headlines.borrow_mut().push(v));

  assert_eq!(*headlines.borrow(), vec!["RUST 2.0 ANNOUNCED", "RUST ADOPTION GROWS"]);
}

#[test]
fn tap_observes_without_changing_values() {
  let (tapped, seen) = (log(), log());
  let (c_tapped, c_seen) = (tapped.clone(), seen.clone());
  of!(1, 2, 3)
    .tap(move |v| c_tapped.borrow_mut().push(*v))
    .map(|v| v * 10)
    .subscribe(move |v| c_seen.borrow_mut().push(v));

  assert_eq!(*tapped.borrow(), vec![1, 2, 3]);
  assert_eq!(*seen.borrow(), vec![10, 20, 30]);
}

#[test]
fn catch_error_falls_back_to_empty() {
  let events = log();
  let (e1, e2) = (events.clone(), events.clone());
  of!(1, 2, 3)
    .with_err::<String>()
    .try_map(|v| if v == 3 { Err(format!("bad value {v}")) } else { Ok(v) })
    .catch_error(|_| observable::empty())
    .subscribe_complete(
      move |v| e1.borrow_mut().push(v.to_string()),
      move || e2.borrow_mut().push("Completed".to_owned()),
    );

  assert_eq!(*events.borrow(), vec!["1", "2", "Completed"]);
}

#[test]
fn concat_map_with_synchronous_inners() {
  let seen = log();
  let c_seen = seen.clone();
  of!("Alice", "Ben")
    .concat_map(|name| of!(format!("Hello {name}"), format!("Bye {name}")))
    .subscribe(move |v| c_seen.borrow_mut().push(v));

  assert_eq!(*seen.borrow(), vec!["Hello Alice", "Bye Alice", "Hello Ben", "Bye Ben"]);
}

#[test]
fn celsius_to_fahrenheit() {
  let seen = log();
  let c_seen = seen.clone();
  of!(-40.0, 0.0, 36.6, 100.0)
    .map(|c: f64| c * 9.0 / 5.0 + 32.0)
    .subscribe(move |v| c_seen.borrow_mut().push(v));

  let expected = [-40.0, 32.0, 97.88, 212.0];
  let seen = seen.borrow();
  assert_eq!(seen.len(), expected.len());
  for (got, want) in seen.iter().zip(expected) {
    assert!(approx_eq!(f64, *got, want, epsilon = 1e-9));
  }
}

#[test]
fn interval_stops_when_unsubscribed() {
  let scheduler = TestScheduler::new();
  let ticks = log();
  let c_ticks = ticks.clone();
  let subscription = observable::interval(Duration::from_millis(100), scheduler.clone())
    .subscribe(move |v| c_ticks.borrow_mut().push(v));

  scheduler.advance_by(Duration::from_millis(350));
  subscription.unsubscribe();
  scheduler.advance_by(Duration::from_millis(1000));
  assert_eq!(*ticks.borrow(), vec![0, 1, 2]);
}

#[test]
fn events_from_an_emitter() {
  let emitter = EventEmitter::<&'static str>::new();
  let clicks = log();
  let c_clicks = clicks.clone();
  let subscription = observable::from_event(emitter.clone(), "click")
    .subscribe(move |e| c_clicks.borrow_mut().push(e));

  emitter.emit("click", "button");
  emitter.emit("keyup", "a");
  assert_eq!(emitter.listener_count("click"), 1);
  subscription.unsubscribe();
  emitter.emit("click", "ignored");

  assert_eq!(*clicks.borrow(), vec!["button"]);
  assert_eq!(emitter.listener_count("click"), 0);
}
