use crate::theme::TERMINAL_CSS;
use crate::views::{MatrixRain, TerminalView};
use dioxus::prelude::*;

#[component]
pub fn App() -> Element {
    rsx! {
        style { dangerous_inner_html: "{TERMINAL_CSS}" }
        MatrixRain {}
        TerminalView {}
    }
}
