/// Stylesheet for the terminal window and the rain layer behind it.
pub const TERMINAL_CSS: &str = r#"
:root {
    --color-bg-primary: #000000;
    --color-terminal-bg: rgba(0, 8, 16, 0.82);
    --color-border: #00bfff;
    --color-text-primary: #00bfff;
    --color-text-user: #ffffff;
    --color-text-error: #ff4d4d;
    --color-text-loading: #0088cc;
    --color-timestamp: #006699;
    --color-input-bg: rgba(0, 0, 0, 0.6);
}
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    background: var(--color-bg-primary);
    color: var(--color-text-primary);
    font-family: 'Courier New', monospace;
    height: 100vh;
    overflow: hidden;
}
.matrix-rain { position: fixed; inset: 0; z-index: 0; pointer-events: none; }
.matrix-rain text { font-family: monospace; font-size: 14px; }
.terminal {
    position: relative;
    z-index: 1;
    max-width: 900px;
    height: 85vh;
    margin: 7.5vh auto 0;
    display: flex;
    flex-direction: column;
    background: var(--color-terminal-bg);
    border: 1px solid var(--color-border);
    box-shadow: 0 0 24px rgba(0, 191, 255, 0.35);
}
.terminal-header {
    padding: 0.6rem 1rem;
    border-bottom: 1px solid var(--color-border);
    letter-spacing: 0.2em;
    text-transform: uppercase;
}
.message-window { flex: 1; overflow-y: auto; padding: 1rem; }
.message { margin-bottom: 0.6rem; line-height: 1.5; white-space: pre-wrap; word-break: break-word; }
.message .timestamp { color: var(--color-timestamp); margin-right: 0.5rem; }
.message .prefix { margin-right: 0.5rem; font-weight: bold; }
.user-message { color: var(--color-text-user); }
.error-message { color: var(--color-text-error); }
.loading-message .content { color: var(--color-text-loading); animation: blink 1s step-end infinite; }
.typing-indicator::after { content: '\2588'; animation: blink 0.7s step-end infinite; }
.input-row { display: flex; gap: 0.5rem; padding: 0.75rem 1rem; border-top: 1px solid var(--color-border); }
.input-row .prompt { align-self: center; }
.input-row input {
    flex: 1;
    background: var(--color-input-bg);
    border: 1px solid var(--color-border);
    color: var(--color-text-user);
    font-family: inherit;
    padding: 0.4rem 0.6rem;
}
.input-row input:disabled, .input-row button:disabled { opacity: 0.5; cursor: not-allowed; }
.input-row button {
    background: transparent;
    border: 1px solid var(--color-border);
    color: var(--color-text-primary);
    font-family: inherit;
    padding: 0.4rem 1rem;
    cursor: pointer;
}
@keyframes blink { 50% { opacity: 0; } }
"#;
