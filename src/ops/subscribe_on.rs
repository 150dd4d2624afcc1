use crate::{
  observable::{CoreObservable, ObservableType},
  scheduler::{Scheduler, Task, TaskHandle, TaskState},
  subscription::{Subscription, SubscriptionProxy, TupleSubscription},
};

/// Subscribes to the source from a task on `scheduler` instead of on the
/// caller. Unsubscribing before the task runs means the source is never
/// subscribed at all.
#[derive(Clone)]
pub struct SubscribeOn<S, SD> {
  pub(crate) source: S,
  pub(crate) scheduler: SD,
}

impl<S, SD> SubscribeOn<S, SD> {
  pub fn new(source: S, scheduler: SD) -> Self { SubscribeOn { source, scheduler } }
}

impl<S: ObservableType, SD> ObservableType for SubscribeOn<S, SD> {
  type Item = S::Item;
  type Err = S::Err;
}

impl<S, SD, O> CoreObservable<O> for SubscribeOn<S, SD>
where
  S: CoreObservable<O> + Send + 'static,
  S::Unsub: Send + 'static,
  O: Send + 'static,
  SD: Scheduler,
{
  type Unsub = TupleSubscription<TaskHandle, SubscriptionProxy>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let SubscribeOn { source, scheduler } = self;
    let proxy = SubscriptionProxy::new();
    let task = Task::new(Some((source, observer, proxy.clone())), subscribe_task::<S, O>);
    let handle = scheduler.schedule(task, None);
    TupleSubscription::new(handle, proxy)
  }
}

fn subscribe_task<S, O>(slot: &mut Option<(S, O, SubscriptionProxy)>) -> TaskState
where
  S: CoreObservable<O>,
  S::Unsub: Send + 'static,
{
  if let Some((source, observer, proxy)) = slot.take() {
    if !proxy.is_closed() {
      proxy.set(source.actual_subscribe(observer));
    }
  }
  TaskState::Finished
}

#[cfg(test)]
mod tests {
  use std::{sync::mpsc::channel, thread};

  use crate::prelude::*;

  #[test]
  fn subscribes_on_a_worker_thread() {
    let (tx, rx) = channel();
    let observer = TestObserver::new();
    from_iter(1..5)
      .subscribe_on(ThreadPoolScheduler::new().unwrap())
      .subscribe_with(observer.clone());

    from_iter(vec![()])
      .subscribe_on(NewThreadScheduler)
      .subscribe(move |_| tx.send(thread::current().id()).unwrap());

    assert!(observer.await_terminal_event(Duration::from_secs(5)));
    observer.assert_values(&[1, 2, 3, 4]).assert_complete();
    let worker = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_ne!(worker, thread::current().id());
  }

  #[test]
  fn nothing_happens_until_the_task_runs() {
    let scheduler = TestScheduler::new();
    let observer = TestObserver::new();
    from_iter(vec![1, 2])
      .subscribe_on(scheduler.clone())
      .subscribe_with(observer.clone());

    observer.assert_no_values().assert_not_complete();
    scheduler.trigger_actions();
    observer.assert_values(&[1, 2]).assert_complete();
  }

  #[test]
  fn cancel_before_run_skips_the_subscription() {
    let scheduler = TestScheduler::new();
    let observer = TestObserver::new();
    let subscription = from_iter(vec![1, 2])
      .subscribe_on(scheduler.clone())
      .subscribe_with(observer.clone());

    subscription.unsubscribe();
    scheduler.flush();
    observer.assert_no_values().assert_not_complete();
  }

  #[test]
  fn trampoline_runs_synchronously() {
    let observer = TestObserver::new();
    from_iter(vec!["a", "b"])
      .subscribe_on(TrampolineScheduler)
      .subscribe_with(observer.clone());
    observer.assert_values(&["a", "b"]).assert_complete();
  }
}
