/// Chat client for the Matrix Terminal
///
/// - `transport` - how a message reaches the proxy (HTTP or offline demo)
/// - `normalize` - reply JSON to display text
/// - `reveal` - typing animation
/// - `session` - transcript, controls and the single-flight submit pipeline
mod normalize;
mod reveal;
mod session;
mod transport;

pub use normalize::{
    ARRAY_ITEM_FIELDS, DisplayTextError, EMPTY_REPLY_TEXT, OBJECT_FIELDS, extract_display_text,
};
pub use reveal::{RevealOutcome, RevealTarget, RevealTiming, reveal};
pub use session::{
    ChatSession, Controls, PENDING_TEXT, SessionState, SubmissionState, SubmitOutcome,
};
pub use transport::{
    DEMO_REPLIES, DemoTransport, HttpTransport, Transport, TransportError, from_config,
};

/// The only failure text a user ever sees.
pub const CONNECTION_FAILED: &str =
    "Connection failed. Check your network or webhook configuration.";

/// A failed round trip. Both kinds read the same to the user; the source
/// is kept for logs.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("{}", CONNECTION_FAILED)]
    Transport(#[source] TransportError),

    #[error("{}", CONNECTION_FAILED)]
    Decode(#[source] DisplayTextError),
}

/// Send `message` and resolve the reply to the text to show.
pub async fn request_display_text<T>(transport: &T, message: &str) -> Result<String, ChatError>
where
    T: Transport + ?Sized,
{
    let body = transport.send(message).await.map_err(|err| {
        tracing::error!(error = %err, "error communicating with webhook proxy");
        ChatError::Transport(err)
    })?;

    extract_display_text(&body).map_err(|err| {
        tracing::error!(error = %err, "webhook proxy reply could not be decoded");
        ChatError::Decode(err)
    })
}
