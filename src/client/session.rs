//! Chat session: transcript, input controls and the single-flight
//! submission pipeline.
//!
//! All state lives in one [`SessionState`] value held by a `watch` channel.
//! The pipeline is the only writer of [`SubmissionState`]; views subscribe
//! and re-render from snapshots.

use super::reveal::{RevealOutcome, RevealTarget, RevealTiming, reveal};
use super::transport::Transport;
use super::request_display_text;
use crate::types::{ChatMessage, MessageId, Origin};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Placeholder shown while the webhook is working.
pub const PENDING_TEXT: &str = "Processing request...";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    /// One request is outstanding; new submissions are ignored.
    Waiting,
}

impl SubmissionState {
    pub fn is_waiting(self) -> bool {
        matches!(self, SubmissionState::Waiting)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Controls {
    pub input: String,
    pub input_enabled: bool,
    pub send_enabled: bool,
    pub input_focused: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            input: String::new(),
            input_enabled: true,
            send_enabled: true,
            input_focused: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub submission: SubmissionState,
    pub controls: Controls,
    pub transcript: Vec<ChatMessage>,
    /// Bumped whenever the view should scroll to the newest line.
    pub scroll_epoch: u64,
    /// Bumped whenever focus should return to the input.
    pub focus_epoch: u64,
    next_id: u64,
}

impl SessionState {
    fn push(&mut self, origin: Origin, text: impl Into<String>) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.transcript.push(ChatMessage::new(id, origin, text));
        self.scroll_epoch += 1;
        id
    }

    fn remove(&mut self, id: MessageId) {
        self.transcript.retain(|msg| msg.id != id);
    }

    fn message_mut(&mut self, id: MessageId) -> Option<&mut ChatMessage> {
        self.transcript.iter_mut().find(|msg| msg.id == id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty input, or a request was already outstanding.
    Ignored,
    Replied,
    Failed,
    /// The reply arrived but the session shut down mid-reveal.
    Interrupted,
}

pub struct ChatSession<T> {
    transport: T,
    state: watch::Sender<SessionState>,
    timing: RevealTiming,
    shutdown: CancellationToken,
}

impl<T: Transport> ChatSession<T> {
    pub fn new(transport: T) -> Self {
        Self::with_timing(transport, RevealTiming::default())
    }

    pub fn with_timing(transport: T, timing: RevealTiming) -> Self {
        Self {
            transport,
            state: watch::Sender::new(SessionState::default()),
            timing,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn submission(&self) -> SubmissionState {
        self.state.borrow().submission
    }

    /// Mirror the input box. Ignored while the input is disabled.
    pub fn set_input(&self, value: impl Into<String>) {
        let value = value.into();
        self.state.send_if_modified(|state| {
            if !state.controls.input_enabled || state.controls.input == value {
                return false;
            }
            state.controls.input = value;
            true
        });
    }

    /// Append a system line outside the request cycle, e.g. a greeting.
    pub fn announce(&self, text: impl Into<String>) -> MessageId {
        let text = text.into();
        let mut id = MessageId(0);
        self.state.send_modify(|state| id = state.push(Origin::System, text));
        id
    }

    /// Stop any reveal in progress. Further reveals end immediately.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Submit whatever is currently in the input box.
    pub async fn submit(&self) -> SubmitOutcome {
        let raw = self.state.borrow().controls.input.clone();
        self.submit_text(&raw).await
    }

    pub async fn submit_text(&self, raw: &str) -> SubmitOutcome {
        let message = raw.trim();
        let Some(guard) = self.begin(message) else {
            return SubmitOutcome::Ignored;
        };

        match request_display_text(&self.transport, message).await {
            Ok(reply) => {
                let mut cursor = TranscriptCursor {
                    state: &self.state,
                    id: MessageId(0),
                };
                self.state.send_modify(|state| {
                    state.remove(guard.pending);
                    cursor.id = state.push(Origin::System, String::new());
                });
                match reveal(&reply, &mut cursor, self.timing, &self.shutdown).await {
                    RevealOutcome::Completed => SubmitOutcome::Replied,
                    RevealOutcome::Cancelled => SubmitOutcome::Interrupted,
                }
            }
            Err(err) => {
                self.state.send_modify(|state| {
                    state.remove(guard.pending);
                    state.push(Origin::Error, err.to_string());
                });
                SubmitOutcome::Failed
            }
        }
    }

    /// Accept a submission: flip the flag, lock the controls, echo the user
    /// line and add the placeholder, all in one state transition.
    fn begin(&self, message: &str) -> Option<SubmissionGuard<'_>> {
        if message.is_empty() {
            return None;
        }

        let mut pending = None;
        self.state.send_if_modified(|state| {
            if state.submission.is_waiting() {
                return false;
            }
            state.submission = SubmissionState::Waiting;
            state.controls.input.clear();
            state.controls.input_enabled = false;
            state.controls.send_enabled = false;
            state.controls.input_focused = false;
            state.push(Origin::User, message);
            pending = Some(state.push(Origin::Pending, PENDING_TEXT));
            true
        });

        pending.map(|pending| SubmissionGuard {
            state: &self.state,
            pending,
        })
    }
}

impl<T> Drop for ChatSession<T> {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Restores the idle state however the pipeline exits, including when the
/// submit future is dropped part way.
struct SubmissionGuard<'a> {
    state: &'a watch::Sender<SessionState>,
    pending: MessageId,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        let pending = self.pending;
        self.state.send_modify(|state| {
            state.remove(pending);
            for msg in state.transcript.iter_mut() {
                msg.typing = false;
            }
            state.submission = SubmissionState::Idle;
            state.controls.input_enabled = true;
            state.controls.send_enabled = true;
            state.controls.input_focused = true;
            state.focus_epoch += 1;
        });
    }
}

/// Reveal target writing into one transcript message.
struct TranscriptCursor<'a> {
    state: &'a watch::Sender<SessionState>,
    id: MessageId,
}

impl RevealTarget for TranscriptCursor<'_> {
    fn begin(&mut self) {
        let id = self.id;
        self.state.send_modify(|state| {
            if let Some(msg) = state.message_mut(id) {
                msg.text.clear();
                msg.typing = true;
            }
        });
    }

    fn push_char(&mut self, ch: char) {
        let id = self.id;
        self.state.send_modify(|state| {
            if let Some(msg) = state.message_mut(id) {
                msg.text.push(ch);
            }
        });
    }

    fn scroll_to_end(&mut self) {
        self.state.send_modify(|state| state.scroll_epoch += 1);
    }

    fn finish(&mut self) {
        let id = self.id;
        self.state.send_modify(|state| {
            if let Some(msg) = state.message_mut(id) {
                msg.typing = false;
            }
        });
    }
}
