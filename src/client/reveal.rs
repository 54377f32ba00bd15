//! Character-by-character reveal of a reply, the terminal "typing" effect.

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Where revealed characters land.
pub trait RevealTarget {
    /// Called once before the first character: clear content, show the
    /// typing indicator.
    fn begin(&mut self) {}

    fn push_char(&mut self, ch: char);

    /// Keep the transcript pinned to its newest line.
    fn scroll_to_end(&mut self);

    /// Called once when the reveal stops, whether it completed or not.
    fn finish(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealTiming {
    pub initial_delay: Duration,
    pub per_char: Duration,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(300),
            per_char: Duration::from_millis(20),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Completed,
    Cancelled,
}

/// Reveal `text` into `target`, one character per tick.
///
/// Returns only after the last character has been pushed, or as soon as
/// `cancel` fires. Holds no lock; callers must not run two reveals into the
/// same target.
pub async fn reveal<T>(
    text: &str,
    target: &mut T,
    timing: RevealTiming,
    cancel: &CancellationToken,
) -> RevealOutcome
where
    T: RevealTarget + ?Sized,
{
    target.begin();
    let outcome = run(text, target, timing, cancel).await;
    target.finish();
    outcome
}

async fn run<T>(
    text: &str,
    target: &mut T,
    timing: RevealTiming,
    cancel: &CancellationToken,
) -> RevealOutcome
where
    T: RevealTarget + ?Sized,
{
    if !pause(timing.initial_delay, cancel).await {
        return RevealOutcome::Cancelled;
    }

    for ch in text.chars() {
        target.push_char(ch);
        target.scroll_to_end();
        if !pause(timing.per_char, cancel).await {
            return RevealOutcome::Cancelled;
        }
    }

    RevealOutcome::Completed
}

/// Sleep for `duration`; `false` if cancelled first.
async fn pause(duration: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}
