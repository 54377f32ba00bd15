use crate::client::{self, ChatSession, SessionState, Transport};
use crate::config::ClientConfig;
use crate::types::ChatMessage;
use dioxus::events::Key;
use dioxus::prelude::*;
use std::rc::Rc;

type Session = Rc<ChatSession<Box<dyn Transport>>>;

const BOOT_TEXT: &str = "Connection established. Type a message to begin.";
const MESSAGE_WINDOW_ID: &str = "messageWindow";
const USER_INPUT_ID: &str = "userInput";

fn scroll_script() -> String {
    format!(
        "const el = document.getElementById('{MESSAGE_WINDOW_ID}'); if (el) {{ el.scrollTop = el.scrollHeight; }}"
    )
}

fn focus_script() -> String {
    format!("const el = document.getElementById('{USER_INPUT_ID}'); if (el) {{ el.focus(); }}")
}

fn new_session() -> Session {
    let config = ClientConfig::from_env();
    let session = ChatSession::new(client::from_config(&config));
    session.announce(BOOT_TEXT);
    Rc::new(session)
}

#[component]
pub fn TerminalView() -> Element {
    let session = use_hook(new_session);
    let mut state = use_signal(|| session.snapshot());

    {
        let session = session.clone();
        use_drop(move || session.shutdown());
    }

    // Mirror the session into a signal so the view re-renders on change.
    {
        let session = session.clone();
        use_future(move || {
            let mut updates = session.subscribe();
            async move {
                while updates.changed().await.is_ok() {
                    let next = updates.borrow_and_update().clone();
                    state.set(next);
                }
            }
        });
    }

    use_effect(move || {
        let _ = state.read().scroll_epoch;
        let _ = document::eval(&scroll_script());
    });

    use_effect(move || {
        let _ = state.read().focus_epoch;
        let _ = document::eval(&focus_script());
    });

    let submit = {
        let session = session.clone();
        move || {
            let session = session.clone();
            spawn(async move {
                let outcome = session.submit().await;
                tracing::debug!(?outcome, "submission finished");
            });
        }
    };

    let snapshot: SessionState = state();
    let on_input = {
        let session = session.clone();
        move |ev: FormEvent| session.set_input(ev.value())
    };
    let on_key = {
        let submit = submit.clone();
        move |ev: KeyboardEvent| {
            if ev.key() == Key::Enter {
                ev.prevent_default();
                submit();
            }
        }
    };
    let on_click = move |_: MouseEvent| submit();

    rsx! {
        div { class: "terminal",
            div { class: "terminal-header", "Matrix Terminal" }
            div { id: MESSAGE_WINDOW_ID, class: "message-window",
                for msg in snapshot.transcript.iter() {
                    MessageLine { key: "{msg.id.0}", message: msg.clone() }
                }
            }
            div { class: "input-row",
                span { class: "prompt", ">" }
                input {
                    id: USER_INPUT_ID,
                    r#type: "text",
                    placeholder: "Enter message...",
                    autocomplete: "off",
                    autofocus: true,
                    value: "{snapshot.controls.input}",
                    disabled: !snapshot.controls.input_enabled,
                    oninput: on_input,
                    onkeydown: on_key,
                }
                button {
                    r#type: "button",
                    disabled: !snapshot.controls.send_enabled,
                    onclick: on_click,
                    "Send"
                }
            }
        }
    }
}

#[component]
fn MessageLine(message: ChatMessage) -> Element {
    let content_class = if message.typing {
        "content typing-indicator"
    } else {
        "content"
    };
    rsx! {
        div { class: format_args!("message {}", message.origin.css_class()),
            span { class: "timestamp", "{message.timestamp()}" }
            span { class: "prefix", "{message.origin.prefix()}" }
            span { class: content_class, "{message.text}" }
        }
    }
}
