use rxlite::prelude::*;

mod common;
use common::{init_tracing, numbered, WORDS};

type NumberedWords = SubscribeOn<
  Zip<ObservableIter<[&'static str; 9]>, ObservableIter<std::ops::Range<i64>>, Numbering>,
  SchedulerRef,
>;
type Numbering = fn(&'static str, i64) -> String;

fn numbered_words() -> NumberedWords {
  from_iter(WORDS)
    .zip(range(1, usize::MAX), numbered as Numbering)
    .subscribe_on(Schedulers::computation())
}

#[test]
fn words_on_the_trampoline() {
  init_tracing();
  let _guard = SchedulerOverride::acquire().all(TrampolineScheduler);
  let observer = TestObserver::new();

  numbered_words().subscribe_with(observer.clone());

  observer
    .assert_no_errors()
    .assert_complete()
    .assert_value_count(9);
  assert_eq!(observer.values()[3], " 4. fox");
}

#[test]
fn injected_failure_replaces_completion() {
  init_tracing();
  let _guard = SchedulerOverride::acquire().all(TrampolineScheduler);
  let failure = RxError::msg("boom!");
  let observer = TestObserver::new();

  numbered_words()
    .concat_with_error(failure.clone())
    .subscribe_with(observer.clone());

  observer
    .assert_value_count(9)
    .assert_not_complete()
    .assert_error(&failure);
}

#[test]
fn words_on_the_default_thread_pool() {
  init_tracing();
  let _guard = SchedulerOverride::acquire();
  let observer = TestObserver::new();

  numbered_words().subscribe_with(observer.clone());

  assert!(observer.await_terminal_event(Duration::from_secs(5)));
  observer.assert_complete().assert_no_errors();
  let expected: Vec<_> = WORDS
    .into_iter()
    .zip(1..)
    .map(|(word, i)| numbered(word, i))
    .collect();
  observer.assert_values(&expected);
}

#[test]
fn words_through_a_blocking_iterator() {
  init_tracing();
  let words: Vec<String> = from_iter(WORDS)
    .zip(range(1, usize::MAX), numbered)
    .subscribe_on(NewThreadScheduler)
    .blocking_iter()
    .with_timeout(Duration::from_secs(5))
    .collect::<Result<_, _>>()
    .unwrap();

  assert_eq!(words.len(), 9);
  assert_eq!(words[0], " 1. the");
  assert_eq!(words[8], " 9. dog");
}

#[test]
fn cancelled_subscription_stays_silent() {
  init_tracing();
  let scheduler = TestScheduler::new();
  let observer = TestObserver::new();

  let subscription = from_iter(WORDS)
    .zip(interval_on(Duration::from_secs(1), scheduler.clone()), |word, tick| {
      format!("{tick}. {word}")
    })
    .subscribe_with(observer.clone());

  scheduler.advance_by(Duration::from_secs(3));
  subscription.unsubscribe();
  scheduler.advance_by(Duration::from_secs(10));

  observer.assert_value_count(3).assert_not_complete().assert_no_errors();
}
