use rxlite::prelude::*;

mod common;
use common::{init_tracing, WORDS};

/// Must run with the override installed: `interval` and `subscribe_on` look
/// up the computation scheduler while the chain is built.
fn subscribe_words(observer: TestObserver<String>) {
  from_iter(WORDS)
    .zip(interval(Duration::from_secs(1)), |word, tick| format!("{tick:2}. {word}"))
    .subscribe_on(Schedulers::computation())
    .subscribe_with(observer);
}

#[test]
fn one_second_yields_the_first_word() {
  init_tracing();
  let scheduler = TestScheduler::new();
  let _guard = SchedulerOverride::acquire().all(scheduler.clone());
  let observer = TestObserver::new();

  subscribe_words(observer.clone());
  observer.assert_no_values();

  scheduler.advance_by(Duration::from_secs(1));
  observer
    .assert_values(&[" 0. the".to_string()])
    .assert_not_complete();

  scheduler.advance_by(Duration::from_secs(8));
  observer
    .assert_value_count(9)
    .assert_complete()
    .assert_no_errors();
  assert_eq!(observer.values()[8], " 8. dog");
}

#[test]
fn split_and_single_advances_agree() {
  init_tracing();
  let split = TestObserver::new();
  {
    let scheduler = TestScheduler::new();
    let _guard = SchedulerOverride::acquire().all(scheduler.clone());
    subscribe_words(split.clone());
    scheduler.advance_by(Duration::from_secs(1));
    scheduler.advance_by(Duration::from_secs(8));
  }

  let whole = TestObserver::new();
  {
    let scheduler = TestScheduler::new();
    let _guard = SchedulerOverride::acquire().all(scheduler.clone());
    subscribe_words(whole.clone());
    scheduler.advance_by(Duration::from_secs(9));
  }

  assert_eq!(split.values(), whole.values());
  split.assert_complete();
  whole.assert_complete();
}

#[test]
fn defaults_return_after_the_override() {
  init_tracing();
  let scheduler = TestScheduler::new();
  {
    let _guard = SchedulerOverride::acquire().all(scheduler.clone());
    let _ = interval(Duration::from_millis(1)).subscribe_with(TestObserver::new());
    assert_eq!(scheduler.pending_count(), 1);
  }

  let _guard = SchedulerOverride::acquire();
  let observer = TestObserver::new();
  let subscription = interval(Duration::from_millis(1)).subscribe_with(observer.clone());
  wait_until(Duration::from_secs(5), || observer.value_count() >= 2).unwrap();
  subscription.unsubscribe();
  assert_eq!(scheduler.pending_count(), 1);
}
