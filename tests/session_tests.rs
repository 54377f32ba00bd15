//! Integration tests for the chat session pipeline
//!
//! Transports are in-process fakes; timers run on tokio's paused clock.

use async_trait::async_trait;
use matrix_terminal::client::{
    CONNECTION_FAILED, ChatSession, PENDING_TEXT, RevealTiming, SessionState, SubmissionState,
    SubmitOutcome, Transport, TransportError,
};
use matrix_terminal::types::Origin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

/// Replies with `body` once the test opens the gate.
struct GatedTransport {
    gate: Arc<Notify>,
    body: Result<&'static str, u16>,
    calls: AtomicUsize,
}

impl GatedTransport {
    fn new(body: Result<&'static str, u16>) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let transport = Self {
            gate: gate.clone(),
            body,
            calls: AtomicUsize::new(0),
        };
        (transport, gate)
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn send(&self, _message: &str) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        self.body
            .map(str::to_string)
            .map_err(TransportError::Status)
    }
}

/// Replies immediately.
struct Immediate(Result<&'static str, u16>);

#[async_trait]
impl Transport for Immediate {
    async fn send(&self, _message: &str) -> Result<String, TransportError> {
        self.0.map(str::to_string).map_err(TransportError::Status)
    }
}

fn lines(state: &SessionState) -> Vec<(Origin, String)> {
    state
        .transcript
        .iter()
        .map(|msg| (msg.origin, msg.text.clone()))
        .collect()
}

fn assert_idle(state: &SessionState) {
    assert_eq!(state.submission, SubmissionState::Idle);
    assert!(state.controls.input_enabled);
    assert!(state.controls.send_enabled);
    assert!(state.controls.input_focused);
    assert!(state.transcript.iter().all(|msg| !msg.typing));
}

mod submission_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_reply_is_revealed_into_a_system_line() {
        let session = ChatSession::new(Immediate(Ok(r#"[{"text":"Free your mind."}]"#)));

        assert_eq!(session.submit_text("hello").await, SubmitOutcome::Replied);

        let state = session.snapshot();
        assert_eq!(
            lines(&state),
            vec![
                (Origin::User, "hello".to_string()),
                (Origin::System, "Free your mind.".to_string()),
            ]
        );
        assert_idle(&state);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_input_is_ignored() {
        let (transport, _gate) = GatedTransport::new(Ok("{}"));
        let session = ChatSession::new(transport);

        assert_eq!(session.submit_text("   \n\t ").await, SubmitOutcome::Ignored);
        assert!(session.snapshot().transcript.is_empty());
        assert_idle(&session.snapshot());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submit_while_waiting_is_a_no_op() {
        let (transport, gate) = GatedTransport::new(Ok(r#"{"response":"first"}"#));
        let transport = Arc::new(transport);
        let session = ChatSession::new(transport.clone());

        let (first, second) = tokio::join!(session.submit_text("one"), async {
            let during = session.snapshot();
            assert_eq!(during.submission, SubmissionState::Waiting);
            assert!(!during.controls.input_enabled);
            assert!(!during.controls.send_enabled);
            assert_eq!(
                lines(&during),
                vec![
                    (Origin::User, "one".to_string()),
                    (Origin::Pending, PENDING_TEXT.to_string()),
                ]
            );

            let outcome = session.submit_text("two").await;
            assert_eq!(session.snapshot().transcript.len(), during.transcript.len());

            gate.notify_one();
            outcome
        });

        assert_eq!(first, SubmitOutcome::Replied);
        assert_eq!(second, SubmitOutcome::Ignored);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            lines(&session.snapshot()),
            vec![
                (Origin::User, "one".to_string()),
                (Origin::System, "first".to_string()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_replaces_placeholder_with_error() {
        let session = ChatSession::new(Immediate(Err(500)));

        assert_eq!(session.submit_text("hello").await, SubmitOutcome::Failed);

        let state = session.snapshot();
        assert_eq!(
            lines(&state),
            vec![
                (Origin::User, "hello".to_string()),
                (Origin::Error, CONNECTION_FAILED.to_string()),
            ]
        );
        assert_idle(&state);
    }

    #[tokio::test(start_paused = true)]
    async fn test_undecodable_reply_reads_as_connection_failure() {
        let session = ChatSession::new(Immediate(Ok("<html>502</html>")));

        assert_eq!(session.submit_text("hello").await, SubmitOutcome::Failed);
        let state = session.snapshot();
        assert_eq!(state.transcript.last().unwrap().text, CONNECTION_FAILED);
        assert_idle(&state);
    }

    #[tokio::test(start_paused = true)]
    async fn test_null_reply_reads_as_connection_failure() {
        let session = ChatSession::new(Immediate(Ok("[null]")));

        assert_eq!(session.submit_text("hello").await, SubmitOutcome::Failed);
        let state = session.snapshot();
        let last = state.transcript.last().unwrap();
        assert_eq!(last.origin, Origin::Error);
        assert_eq!(last.text, CONNECTION_FAILED);
        assert_idle(&state);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_takes_and_clears_the_input() {
        let session = ChatSession::new(Immediate(Ok("")));
        session.set_input("  wake up  ");

        assert_eq!(session.submit().await, SubmitOutcome::Replied);

        let state = session.snapshot();
        assert_eq!(state.controls.input, "");
        assert_eq!(
            lines(&state)[0],
            (Origin::User, "wake up".to_string())
        );
        assert_eq!(
            lines(&state)[1],
            (
                Origin::System,
                "Webhook triggered successfully (no response data)".to_string()
            )
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_is_ignored_while_waiting() {
        let (transport, gate) = GatedTransport::new(Ok("{}"));
        let session = ChatSession::new(transport);

        tokio::join!(session.submit_text("one"), async {
            session.set_input("sneaky");
            assert_eq!(session.snapshot().controls.input, "");
            gate.notify_one();
        });

        session.set_input("next");
        assert_eq!(session.snapshot().controls.input, "next");
    }
}

mod reveal_tests {
    use super::*;

    fn system_text<T: Transport>(session: &ChatSession<T>) -> Option<String> {
        session
            .snapshot()
            .transcript
            .iter()
            .find(|msg| msg.origin == Origin::System)
            .map(|msg| msg.text.clone())
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_appears_one_character_at_a_time() {
        let text = "Free your mind.";
        let session = ChatSession::new(Immediate(Ok(r#"{"output":"Free your mind."}"#)));
        let mut updates = session.subscribe();

        let watcher = async {
            let mut seen: Vec<String> = Vec::new();
            while updates.changed().await.is_ok() {
                let state = updates.borrow_and_update().clone();
                if let Some(msg) = state
                    .transcript
                    .iter()
                    .find(|msg| msg.origin == Origin::System)
                    && seen.last() != Some(&msg.text)
                {
                    seen.push(msg.text.clone());
                }
                if state.submission == SubmissionState::Idle {
                    break;
                }
            }
            seen
        };

        let (outcome, seen) = tokio::join!(session.submit_text("hi"), watcher);

        assert_eq!(outcome, SubmitOutcome::Replied);
        let mut expected = vec![String::new()];
        expected.extend((1..=text.len()).map(|n| text[..n].to_string()));
        assert_eq!(seen, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveal_follows_the_configured_pace() {
        let timing = RevealTiming {
            initial_delay: Duration::from_millis(300),
            per_char: Duration::from_millis(20),
        };
        let session = Arc::new(ChatSession::with_timing(
            Immediate(Ok(r#"{"text":"abc"}"#)),
            timing,
        ));

        let task = tokio::spawn({
            let session = session.clone();
            async move { session.submit_text("go").await }
        });

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(system_text(&session), Some(String::new()));
        assert_eq!(session.submission(), SubmissionState::Waiting);

        tokio::time::sleep(Duration::from_millis(160)).await;
        assert_eq!(system_text(&session), Some("a".to_string()));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(system_text(&session), Some("ab".to_string()));

        assert_eq!(task.await.unwrap(), SubmitOutcome::Replied);
        assert_eq!(system_text(&session), Some("abc".to_string()));
        assert_idle(&session.snapshot());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_interrupts_reveal_and_restores_controls() {
        let session = Arc::new(ChatSession::new(Immediate(Ok(
            r#"{"text":"a long reply that will not finish"}"#,
        ))));

        let task = tokio::spawn({
            let session = session.clone();
            async move { session.submit_text("go").await }
        });

        tokio::time::sleep(Duration::from_millis(350)).await;
        session.shutdown();

        assert_eq!(task.await.unwrap(), SubmitOutcome::Interrupted);
        let state = session.snapshot();
        let reply = &state.transcript.last().unwrap().text;
        assert!(!reply.is_empty());
        assert!(reply.len() < "a long reply that will not finish".len());
        assert_idle(&state);
    }
}

mod transcript_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_announce_adds_a_system_line_with_fresh_ids() {
        let session = ChatSession::new(Immediate(Ok(r#"{"text":"ok"}"#)));
        let boot = session.announce("Connection established.");
        session.submit_text("hello").await;

        let state = session.snapshot();
        assert_eq!(state.transcript[0].id, boot);
        assert_eq!(state.transcript[0].origin, Origin::System);
        let mut ids: Vec<_> = state.transcript.iter().map(|msg| msg.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_update_keeps_flag_and_controls_in_step() {
        let session = ChatSession::new(Immediate(Ok(r#"{"text":"sync"}"#)));
        let mut updates = session.subscribe();

        let watcher = async {
            let mut observed = 0;
            while updates.changed().await.is_ok() {
                let state = updates.borrow_and_update().clone();
                assert_eq!(
                    state.submission.is_waiting(),
                    !state.controls.input_enabled,
                    "input enabled must mirror the submission flag"
                );
                observed += 1;
                if state.submission == SubmissionState::Idle {
                    break;
                }
            }
            observed
        };

        let (_, observed) = tokio::join!(session.submit_text("hello"), watcher);
        assert!(observed > 1);
    }
}
