// Cancellable interval tasks
//
// Timer-driven animations (carousel autoplay, counter tween) each own
// exactly one of these. Starting always cancels the previous run before
// spawning the new one, so two callbacks for the same owner never overlap.
// Cancellation is total: abort the handle, nothing cooperative.

use std::time::Duration;
use tokio::task::JoinHandle;

pub struct IntervalTask {
    handle: Option<JoinHandle<()>>,
}

impl IntervalTask {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Spawn a periodic task, cancelling any previous run first.
    ///
    /// The first callback lands one full period after start. A callback
    /// returning false stops the task from the inside.
    pub fn start<F>(&mut self, period: Duration, mut tick: F)
    where
        F: FnMut() -> bool + Send + 'static,
    {
        self.cancel();
        let period = period.max(Duration::from_millis(1));
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first interval tick completes immediately; consume it so
            // callbacks start a full period after start()
            interval.tick().await;
            loop {
                interval.tick().await;
                if !tick() {
                    break;
                }
            }
        }));
    }

    /// Abort the running task, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    #[allow(dead_code)]
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Default for IntervalTask {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for IntervalTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::sleep;

    fn counting_task(task: &mut IntervalTask, period_ms: u64) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let ticks = count.clone();
        task.start(Duration::from_millis(period_ms), move || {
            ticks.fetch_add(1, Ordering::SeqCst);
            true
        });
        count
    }

    #[tokio::test]
    async fn test_ticks_fire_periodically() {
        let mut task = IntervalTask::new();
        let count = counting_task(&mut task, 10);
        sleep(Duration::from_millis(120)).await;
        assert!(count.load(Ordering::SeqCst) >= 3);
        assert!(task.is_running());
    }

    #[tokio::test]
    async fn test_first_tick_waits_a_full_period() {
        let mut task = IntervalTask::new();
        let count = counting_task(&mut task, 80);
        sleep(Duration::from_millis(20)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        sleep(Duration::from_millis(150)).await;
        assert!(count.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn test_cancel_stops_ticks() {
        let mut task = IntervalTask::new();
        let count = counting_task(&mut task, 10);
        sleep(Duration::from_millis(50)).await;
        task.cancel();
        assert!(!task.is_running());
        let after_cancel = count.load(Ordering::SeqCst);
        sleep(Duration::from_millis(60)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_cancel);
    }

    #[tokio::test]
    async fn test_start_cancels_previous_task() {
        let mut task = IntervalTask::new();
        let first = counting_task(&mut task, 50);
        // Replace before the first task ever ticks
        let second = counting_task(&mut task, 10);
        sleep(Duration::from_millis(120)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert!(second.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_tick_returning_false_stops_task() {
        let mut task = IntervalTask::new();
        let count = Arc::new(AtomicUsize::new(0));
        let ticks = count.clone();
        task.start(Duration::from_millis(10), move || {
            ticks.fetch_add(1, Ordering::SeqCst) < 2
        });
        sleep(Duration::from_millis(120)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(!task.is_running());
    }

    #[tokio::test]
    async fn test_drop_cancels_task() {
        let count = {
            let mut task = IntervalTask::new();
            let count = counting_task(&mut task, 10);
            sleep(Duration::from_millis(35)).await;
            count
        };
        let after_drop = count.load(Ordering::SeqCst);
        sleep(Duration::from_millis(60)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }
}
