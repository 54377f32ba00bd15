use crate::rain::{self, FRAME_INTERVAL, Glyph, RainField};
use dioxus::prelude::*;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const VIEWPORT_POLL: Duration = Duration::from_millis(500);
const FALLBACK_VIEWPORT: (f64, f64) = (1280.0, 720.0);
const VIEWPORT_JS: &str = "dioxus.send([window.innerWidth, window.innerHeight]);";

async fn viewport_size() -> Option<(f64, f64)> {
    let mut eval = document::eval(VIEWPORT_JS);
    eval.recv::<(f64, f64)>().await.ok()
}

/// Decorative background. Runs its own frame loop and stops on unmount.
#[component]
pub fn MatrixRain() -> Element {
    let mut frame = use_signal(Vec::<Glyph>::new);
    let mut viewport = use_signal(|| Option::<(f64, f64)>::None);
    let cancel = use_hook(CancellationToken::new);

    {
        let cancel = cancel.clone();
        use_drop(move || cancel.cancel());
    }

    // Viewport size, re-read periodically so a resize re-seeds the rain.
    use_future(move || async move {
        loop {
            if let Some(size) = viewport_size().await
                && viewport() != Some(size)
            {
                viewport.set(Some(size));
            }
            tokio::time::sleep(VIEWPORT_POLL).await;
        }
    });

    use_future(move || {
        let cancel = cancel.clone();
        async move {
            let (width, height) = viewport().unwrap_or(FALLBACK_VIEWPORT);
            let field = RainField::new(width, height, &mut rand::rng());
            rain::animate(field, FRAME_INTERVAL, cancel, move |field| {
                if let Some((width, height)) = viewport()
                    && field.size() != (width, height)
                {
                    tracing::debug!(width, height, "viewport changed, reseeding rain");
                    field.resize(width, height, &mut rand::rng());
                }
                frame.set(field.glyphs().to_vec());
            })
            .await;
        }
    });

    let (width, height) = viewport().unwrap_or(FALLBACK_VIEWPORT);

    rsx! {
        svg {
            class: "matrix-rain",
            width: "{width}",
            height: "{height}",
            for (i, glyph) in frame.read().iter().enumerate() {
                text {
                    key: "{i}",
                    x: "{glyph.x}",
                    y: "{glyph.y}",
                    fill: "{glyph.color}",
                    opacity: "{glyph.opacity}",
                    "{glyph.ch}"
                }
            }
        }
    }
}
