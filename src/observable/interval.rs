use crate::{
  error::RxError,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
  scheduler::{Duration, Scheduler, SchedulerRef, Schedulers, Task, TaskHandle, TaskState},
};

/// Emits 0, 1, 2, ... on the `Computation` scheduler, one value per
/// `period`. The first value arrives after one period. Never completes.
///
/// The scheduler is looked up when this is called, so a registry override
/// must be installed before the chain is built.
pub fn interval(period: Duration) -> IntervalObservable<SchedulerRef> {
  interval_on(period, Schedulers::computation())
}

/// Like [`interval`], ticking on an explicit scheduler.
///
/// `period` must be non-zero on a [`TestScheduler`](crate::scheduler::TestScheduler),
/// otherwise advancing the clock never returns.
pub fn interval_on<SD>(period: Duration, scheduler: SD) -> IntervalObservable<SD> {
  IntervalObservable { scheduler, period }
}

#[derive(Clone)]
pub struct IntervalObservable<SD> {
  scheduler: SD,
  period: Duration,
}

impl<SD> ObservableType for IntervalObservable<SD> {
  type Item = usize;
  type Err = RxError;
}

impl<SD, O> CoreObservable<O> for IntervalObservable<SD>
where
  SD: Scheduler,
  O: Observer<usize, RxError> + Send + 'static,
{
  type Unsub = TaskHandle;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let Self { scheduler, period } = self;
    let state = IntervalState { observer, seq: 0, period };
    scheduler.schedule(Task::new(state, interval_task::<O>), Some(period))
  }
}

struct IntervalState<O> {
  observer: O,
  seq: usize,
  period: Duration,
}

fn interval_task<O>(state: &mut IntervalState<O>) -> TaskState
where
  O: Observer<usize, RxError>,
{
  if state.observer.is_closed() {
    return TaskState::Finished;
  }
  state.observer.next(state.seq);
  state.seq += 1;
  TaskState::Sleeping(state.period)
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;

  #[test]
  fn ticks_once_per_period() {
    let scheduler = TestScheduler::new();
    let observer = TestObserver::new();
    interval_on(Duration::from_millis(100), scheduler.clone()).subscribe_with(observer.clone());

    scheduler.advance_by(Duration::from_millis(99));
    observer.assert_no_values();

    scheduler.advance_by(Duration::from_millis(1));
    observer.assert_values(&[0]);

    scheduler.advance_by(Duration::from_millis(250));
    observer.assert_values(&[0, 1, 2]).assert_not_complete();
  }

  #[test]
  fn stops_after_unsubscribe() {
    let scheduler = TestScheduler::new();
    let observer = TestObserver::new();
    let subscription =
      interval_on(Duration::from_secs(1), scheduler.clone()).subscribe_with(observer.clone());

    scheduler.advance_by(Duration::from_secs(2));
    subscription.unsubscribe();
    scheduler.advance_by(Duration::from_secs(5));

    observer.assert_value_count(2);
    assert!(scheduler.is_empty());
  }

  #[test]
  fn real_time_on_a_thread_pool() {
    let observer = TestObserver::new();
    let subscription = interval_on(Duration::from_millis(1), ThreadPoolScheduler::new().unwrap())
      .subscribe_with(observer.clone());

    wait_until(Duration::from_secs(5), || observer.value_count() >= 5).unwrap();
    subscription.unsubscribe();
    assert_eq!(observer.values()[..5], [0, 1, 2, 3, 4]);
  }
}
