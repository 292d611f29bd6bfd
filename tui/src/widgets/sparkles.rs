//! Hero Sparkles
//!
//! Twinkling points scattered over the hero banner. Placement, size, color
//! and timing are randomised once when the field is created; each frame the
//! pulse curve decides how bright a sparkle is.

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use rand::Rng;

use mirra_core::Keyframes;

use crate::theme;

/// Glyphs from faint to full brightness
const GLYPHS: [&str; 4] = ["·", "+", "*", "✦"];

/// One sparkle, positioned as a fraction of the area
#[derive(Clone, Debug)]
pub struct Sparkle {
    x: f32,
    y: f32,
    color: Color,
    pulse: Keyframes,
}

impl Sparkle {
    /// Brightness in `[0, 1]` at `elapsed`
    pub fn brightness(&self, elapsed: Duration) -> f32 {
        self.pulse.sample(elapsed).clamp(0.0, 1.0)
    }
}

/// A field of sparkles
#[derive(Clone, Debug, Default)]
pub struct SparkleField {
    sparkles: Vec<Sparkle>,
}

impl SparkleField {
    /// Scatter `count` sparkles using `rng`
    pub fn scatter(count: usize, rng: &mut impl Rng) -> Self {
        let sparkles = (0..count)
            .map(|_| {
                let roll: f32 = rng.gen();
                let color = if roll > 0.7 {
                    theme::SPARKLE_WHITE
                } else if roll > 0.35 {
                    theme::SPARKLE_PURPLE
                } else {
                    theme::SPARKLE_PINK
                };
                let duration = Duration::from_secs_f32(rng.gen_range(1.5..3.5));
                let delay = Duration::from_secs_f32(rng.gen_range(0.0..5.0));
                Sparkle {
                    x: rng.gen(),
                    y: rng.gen(),
                    color,
                    pulse: Keyframes::new([0.0, 1.0, 0.0], duration)
                        .with_delay(delay)
                        .with_easing(mirra_core::EasingFunction::EaseInOut),
                }
            })
            .collect();
        Self { sparkles }
    }

    /// Number of sparkles
    pub fn len(&self) -> usize {
        self.sparkles.len()
    }

    /// Whether the field is empty
    pub fn is_empty(&self) -> bool {
        self.sparkles.is_empty()
    }

    /// Draw every sparkle bright enough to see
    pub fn render(&self, area: Rect, buf: &mut Buffer, elapsed: Duration) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for sparkle in &self.sparkles {
            let brightness = sparkle.brightness(elapsed);
            if brightness < 0.15 {
                continue;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let glyph = GLYPHS[((brightness * GLYPHS.len() as f32) as usize).min(GLYPHS.len() - 1)];
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let (x, y) = (
                area.x + (sparkle.x * f32::from(area.width - 1)) as u16,
                area.y + (sparkle.y * f32::from(area.height - 1)) as u16,
            );
            buf.set_string(x, y, glyph, Style::default().fg(sparkle.color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_scatter_is_deterministic_for_a_seed() {
        let a = SparkleField::scatter(20, &mut StdRng::seed_from_u64(7));
        let b = SparkleField::scatter(20, &mut StdRng::seed_from_u64(7));
        assert_eq!(a.len(), 20);
        for (x, y) in a.sparkles.iter().zip(&b.sparkles) {
            assert_eq!(x.x, y.x);
            assert_eq!(x.color, y.color);
        }
    }

    #[test]
    fn test_render_stays_inside_area() {
        let field = SparkleField::scatter(50, &mut StdRng::seed_from_u64(1));
        let area = Rect::new(2, 1, 30, 8);
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 12));

        for ms in (0..6000).step_by(250) {
            field.render(area, &mut buf, Duration::from_millis(ms));
        }

        for y in 0..12 {
            for x in 0..40 {
                if buf[(x, y)].symbol() != " " {
                    assert!(x >= 2 && x < 32 && y >= 1 && y < 9, "({x},{y}) outside area");
                }
            }
        }
    }
}
