//! Falling-glyph background.
//!
//! Pure model: [`RainField::step`] advances one frame and produces the
//! glyphs to paint. [`animate`] drives it at a fixed rate until cancelled.
//! Nothing here knows about the chat.

use rand::Rng;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const FONT_SIZE: f64 = 14.0;
pub const TRAIL_LEN: usize = 20;
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);
pub const HEAD_COLOR: &str = "#ffffff";
pub const TRAIL_COLORS: [&str; 4] = ["#00bfff", "#0088cc", "#006699", "#004466"];

/// Chance per frame that a column which has left the screen restarts.
const RESEED_CHANCE: f64 = 0.025;
/// New columns start up to this many rows above the top edge.
const MAX_START_OFFSET: f64 = 100.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    pub x: f64,
    pub y: f64,
    pub ch: char,
    pub color: &'static str,
    pub opacity: f64,
}

#[derive(Clone, Debug, Default)]
pub struct RainField {
    width: f64,
    height: f64,
    /// Row position of each column's head; negative means not yet visible.
    drops: Vec<f64>,
    glyphs: Vec<Glyph>,
}

impl RainField {
    pub fn new(width: f64, height: f64, rng: &mut impl Rng) -> Self {
        let mut field = Self::default();
        field.resize(width, height, rng);
        field
    }

    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn drops(&self) -> &[f64] {
        &self.drops
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// New viewport: every column is re-seeded above the top edge.
    pub fn resize(&mut self, width: f64, height: f64, rng: &mut impl Rng) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        let columns = (self.width / FONT_SIZE).floor() as usize;
        self.drops = (0..columns)
            .map(|_| -rng.random_range(0.0..MAX_START_OFFSET))
            .collect();
        self.glyphs.clear();
    }

    /// Advance one frame.
    pub fn step(&mut self, rng: &mut impl Rng) {
        self.glyphs.clear();

        for (column, drop) in self.drops.iter_mut().enumerate() {
            let x = column as f64 * FONT_SIZE;
            let y = *drop * FONT_SIZE;

            if y > 0.0 {
                self.glyphs.push(Glyph {
                    x,
                    y,
                    ch: random_glyph(rng),
                    color: HEAD_COLOR,
                    opacity: 1.0,
                });

                for j in 1..TRAIL_LEN {
                    let trail_y = y - j as f64 * FONT_SIZE;
                    if trail_y <= 0.0 {
                        break;
                    }
                    self.glyphs.push(Glyph {
                        x,
                        y: trail_y,
                        ch: random_glyph(rng),
                        color: trail_color(j),
                        opacity: trail_opacity(j),
                    });
                }
            }

            if y > self.height && rng.random_bool(RESEED_CHANCE) {
                *drop = 0.0;
            }

            *drop += 1.0;
        }
    }
}

fn random_glyph(rng: &mut impl Rng) -> char {
    GLYPHS[rng.random_range(0..GLYPHS.len())] as char
}

fn trail_color(j: usize) -> &'static str {
    TRAIL_COLORS
        .get(j / 5)
        .copied()
        .unwrap_or(TRAIL_COLORS[TRAIL_COLORS.len() - 1])
}

fn trail_opacity(j: usize) -> f64 {
    (1.0 - j as f64 / TRAIL_LEN as f64) * 0.8
}

/// Step `field` every `interval` and hand each frame to `paint` until
/// `cancel` fires. `paint` may resize the field between frames.
pub async fn animate<F>(
    mut field: RainField,
    interval: Duration,
    cancel: CancellationToken,
    mut paint: F,
) -> RainField
where
    F: FnMut(&mut RainField),
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return field,
            _ = ticker.tick() => {
                field.step(&mut rand::rng());
                paint(&mut field);
            }
        }
    }
}
