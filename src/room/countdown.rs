//! Room start countdown.
//!
//! The countdown runs on its own task and waits for a fixed deadline. An
//! interruption wakes the task, which then resumes waiting for whatever was
//! left of the delay; it never restarts from the full delay.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Signal {
    Running,
    Interrupted,
    Cancelled,
}

/// A cancellable, interruptible delay before a room starts.
#[derive(Debug, Default)]
pub struct Countdown {
    control: Option<watch::Sender<Signal>>,
    deadline: Option<Instant>,
    handle: Option<JoinHandle<()>>,
}

impl Countdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the countdown task is waiting.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Time left before expiry, if armed.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        if !self.is_armed() {
            return None;
        }
        self.deadline.map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Start counting down `delay`, then run `on_expire`.
    ///
    /// Does nothing if the countdown is already armed.
    pub fn arm<F>(&mut self, delay: Duration, on_expire: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_armed() {
            return;
        }
        let (control, signals) = watch::channel(Signal::Running);
        let deadline = Instant::now() + delay;
        info!(?delay, "countdown armed");
        self.handle = Some(tokio::spawn(run(deadline, signals, on_expire)));
        self.control = Some(control);
        self.deadline = Some(deadline);
    }

    /// Wake the task; it resumes with the remaining delay.
    pub fn interrupt(&self) {
        if let Some(control) = &self.control {
            // The task may already have finished.
            let _ = control.send(Signal::Interrupted);
        }
    }

    /// Stop the countdown without running the expiry action.
    pub fn cancel(&mut self) {
        if let Some(control) = self.control.take() {
            let _ = control.send(Signal::Cancelled);
        }
        self.deadline = None;
        self.handle = None;
    }
}

async fn run<F>(deadline: Instant, mut signals: watch::Receiver<Signal>, on_expire: F)
where
    F: Future<Output = ()>,
{
    let mut deadline = deadline;
    let expired = loop {
        tokio::select! {
            () = sleep_until(deadline) => break true,
            changed = signals.changed() => {
                if changed.is_err() {
                    break false;
                }
                let signal = *signals.borrow_and_update();
                match signal {
                    Signal::Cancelled => break false,
                    Signal::Running | Signal::Interrupted => {
                        let now = Instant::now();
                        let remaining = deadline.saturating_duration_since(now);
                        debug!(?remaining, "countdown interrupted, resuming");
                        deadline = now + remaining;
                    }
                }
            }
        }
    };

    if expired {
        debug!("countdown expired");
        on_expire.await;
    } else {
        debug!("countdown cancelled");
    }
}
