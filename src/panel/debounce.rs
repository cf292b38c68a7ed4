// src/panel/debounce.rs
// =============================================================================
// Delay-and-coalesce for bursty input.
//
// Every call to schedule() throws away the previous pending event and starts
// a new quiet window. Only when the window passes without another event is
// the latest one delivered on the output channel.
//
// Immediate mode flips this around: the first event goes out right away and
// everything after it is dropped until the input has been quiet for a full
// window.
//
// The timer is a spawned tokio task holding a sleep; cancelling it is just
// aborting that task.
// =============================================================================

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

pub struct Debouncer<T> {
    delay: Duration,
    immediate: bool,
    output: UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, output: UnboundedSender<T>) -> Self {
        Debouncer {
            delay,
            immediate: false,
            output,
            pending: None,
        }
    }

    // Leading-edge mode; the panel itself always debounces on the trailing edge
    #[allow(dead_code)]
    pub fn immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    // Queues `event`, replacing whatever was waiting
    //
    // Must be called from inside a tokio runtime.
    pub fn schedule(&mut self, event: T) {
        let call_now = self.immediate && !self.is_pending();
        self.cancel_pending();

        let deferred = if self.immediate {
            if call_now {
                let _ = self.output.send(event);
            }
            None
        } else {
            Some(event)
        };

        let output = self.output.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(event) = deferred {
                // The receiver may be gone if the session shut down
                let _ = output.send(event);
            }
        }));
    }

    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    // True while a quiet window is still running
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    const DELAY: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_burst_delivers_only_last_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(DELAY, tx);

        for text in ["r", "re", "rea", "reac", "react"] {
            debouncer.schedule(text.to_string());
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        assert_eq!(rx.recv().await.as_deref(), Some("react"));

        tokio::time::sleep(DELAY * 2).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_is_delivered_before_the_window_passes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(DELAY, tx);

        debouncer.schedule(1);
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(rx.try_recv().is_err());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().ok(), Some(1));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_events_are_all_delivered() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(DELAY, tx);

        debouncer.schedule("go");
        tokio::time::sleep(DELAY + Duration::from_millis(10)).await;
        debouncer.schedule("gin");

        assert_eq!(rx.recv().await, Some("go"));
        assert_eq!(rx.recv().await, Some("gin"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_pending_drops_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(DELAY, tx);

        debouncer.schedule("stale");
        debouncer.cancel_pending();
        assert!(!debouncer.is_pending());

        tokio::time::sleep(DELAY * 2).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_mode_fires_first_and_suppresses_rest() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(DELAY, tx).immediate(true);

        debouncer.schedule("first");
        assert_eq!(rx.try_recv().ok(), Some("first"));

        debouncer.schedule("second");
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule("third");
        tokio::time::sleep(DELAY * 2).await;
        assert!(rx.try_recv().is_err());

        // Quiet period is over, the next event goes straight through
        debouncer.schedule("fourth");
        assert_eq!(rx.try_recv().ok(), Some("fourth"));
    }
}
