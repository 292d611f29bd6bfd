//! Scheduled Tasks
//!
//! One-shot timers, recurring intervals and async jobs, all delivering their
//! result as a [`ShowroomEvent`] on a single unbounded channel.
//!
//! Every spawn returns a [`TaskHandle`]. Dropping the handle (or calling
//! [`TaskHandle::cancel`]) aborts the task, so an owner that is torn down
//! takes its pending work with it and nothing fires into a disposed component.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::events::ShowroomEvent;

/// Smallest period accepted by [`Scheduler::every`]
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Spawns deferred work that reports back through the event channel
#[derive(Clone, Debug)]
pub struct Scheduler {
    tx: mpsc::UnboundedSender<ShowroomEvent>,
}

impl Scheduler {
    /// Create a scheduler sending into an existing channel
    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<ShowroomEvent>) -> Self {
        Self { tx }
    }

    /// Create a scheduler together with the receiving end of its channel
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ShowroomEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Deliver `event` once, after `delay`
    pub fn after(&self, delay: Duration, event: ShowroomEvent) -> TaskHandle {
        self.spawn(async move {
            time::sleep(delay).await;
            event
        })
    }

    /// Deliver an event every `period`, first one a full period from now
    ///
    /// Late ticks are delayed rather than bunched up, matching how a browser
    /// interval behaves when the page stalls.
    pub fn every<F>(&self, period: Duration, mut make_event: F) -> TaskHandle
    where
        F: FnMut() -> ShowroomEvent + Send + 'static,
    {
        let period = period.max(MIN_PERIOD);
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(make_event()).is_err() {
                    tracing::debug!("Event channel closed, stopping recurring task");
                    break;
                }
            }
        });
        TaskHandle::new(handle.abort_handle())
    }

    /// Run `job` in the background and deliver whatever event it yields
    pub fn spawn<F>(&self, job: F) -> TaskHandle
    where
        F: Future<Output = ShowroomEvent> + Send + 'static,
    {
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let event = job.await;
            let kind = event.kind();
            if tx.send(event).is_err() {
                tracing::debug!(kind, "Event channel closed, dropping completion");
            }
        });
        TaskHandle::new(handle.abort_handle())
    }
}

/// Owner's handle to a scheduled task; aborts the task when dropped
#[derive(Debug)]
pub struct TaskHandle {
    abort: AbortHandle,
}

impl TaskHandle {
    fn new(abort: AbortHandle) -> Self {
        Self { abort }
    }

    /// Cancel the task now
    pub fn cancel(self) {
        // Drop does the abort
    }

    /// Whether the task has run to completion or been aborted
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_after_fires_once_after_delay() {
        let (scheduler, mut rx) = Scheduler::channel();
        let _handle = scheduler.after(Duration::from_millis(500), ShowroomEvent::CarouselTick);

        let early = time::timeout(Duration::from_millis(499), rx.recv()).await;
        assert!(early.is_err(), "event must not arrive before its delay");

        let event = rx.recv().await.expect("channel open");
        assert!(matches!(event, ShowroomEvent::CarouselTick));
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_rearms_after_each_tick() {
        let (scheduler, mut rx) = Scheduler::channel();
        let start = Instant::now();
        let _handle = scheduler.every(Duration::from_secs(3), || ShowroomEvent::CarouselTick);

        for n in 1..=3u32 {
            let event = rx.recv().await.expect("channel open");
            assert!(matches!(event, ShowroomEvent::CarouselTick));
            assert_eq!(start.elapsed(), Duration::from_secs(3) * n);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_cancels_pending_event() {
        let (scheduler, mut rx) = Scheduler::channel();
        let handle = scheduler.after(Duration::from_millis(100), ShowroomEvent::CarouselTick);
        handle.cancel();

        let result = time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(result.is_err(), "cancelled task must not deliver");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_recurring_handle_stops_ticks() {
        let (scheduler, mut rx) = Scheduler::channel();
        let handle = scheduler.every(Duration::from_millis(100), || ShowroomEvent::CarouselTick);

        assert!(rx.recv().await.is_some());
        drop(handle);

        let result = time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_spawn_delivers_job_output() {
        let (scheduler, mut rx) = Scheduler::channel();
        let handle = scheduler.spawn(async { ShowroomEvent::CarouselTick });

        let event = rx.recv().await.expect("channel open");
        assert_eq!(event.kind(), "carousel_tick");
        tokio::task::yield_now().await;
        drop(handle);
    }
}
