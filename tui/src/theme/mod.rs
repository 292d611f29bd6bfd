//! Theme and Colors
//!
//! MiRRA's palette: deep black backgrounds, purple-to-pink gradients for
//! headings and buttons, soft lavender for body text.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Brand Gradient
// ============================================================================

/// Gradient start - purple 400
pub const PURPLE: Color = Color::Rgb(192, 132, 252);

/// Gradient middle - pink 300
pub const PINK_LIGHT: Color = Color::Rgb(249, 168, 212);

/// Gradient end - pink 400
pub const PINK: Color = Color::Rgb(244, 114, 182);

/// Indigo accent at the tail of the hero title
pub const INDIGO: Color = Color::Rgb(129, 140, 248);

/// Button fill - purple 600
pub const BUTTON_PURPLE: Color = Color::Rgb(147, 51, 234);

/// Deep background tint - purple 950
pub const PURPLE_DEEP: Color = Color::Rgb(59, 7, 100);

// ============================================================================
// Text
// ============================================================================

/// Subheadings - purple 300
pub const HEADING: Color = Color::Rgb(216, 180, 254);

/// Card titles - purple 200
pub const CARD_TITLE: Color = Color::Rgb(233, 213, 255);

/// Body copy - gray 300
pub const BODY: Color = Color::Rgb(209, 213, 219);

/// Secondary copy - gray 400
pub const MUTED: Color = Color::Rgb(156, 163, 175);

/// Borders and separators
pub const BORDER: Color = Color::Rgb(107, 33, 168);

// ============================================================================
// Sparkles
// ============================================================================

/// White sparkle
pub const SPARKLE_WHITE: Color = Color::Rgb(255, 255, 255);

/// Purple sparkle
pub const SPARKLE_PURPLE: Color = Color::Rgb(167, 139, 250);

/// Pink sparkle
pub const SPARKLE_PINK: Color = Color::Rgb(244, 114, 182);

// ============================================================================
// Notifications
// ============================================================================

/// Informational toast background
pub const TOAST_INFO: Color = Color::Rgb(46, 16, 101);

/// Destructive toast background
pub const TOAST_DESTRUCTIVE: Color = Color::Rgb(127, 29, 29);

/// Pick a gradient color for position `i` of `len` (purple → pink → indigo)
pub fn gradient(i: usize, len: usize) -> Color {
    const STOPS: [(u8, u8, u8); 3] = [(192, 132, 252), (249, 168, 212), (129, 140, 248)];

    if len <= 1 {
        return PURPLE;
    }
    #[allow(clippy::cast_precision_loss)]
    let t = i.min(len - 1) as f32 / (len - 1) as f32 * (STOPS.len() - 1) as f32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let seg = (t.floor() as usize).min(STOPS.len() - 2);
    #[allow(clippy::cast_precision_loss)]
    let local = t - seg as f32;

    let (a, b) = (STOPS[seg], STOPS[seg + 1]);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lerp = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * local).round() as u8;
    Color::Rgb(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Section headings
pub fn heading() -> Style {
    Style::default().fg(PINK_LIGHT).add_modifier(Modifier::BOLD)
}

/// Subheadings
pub fn subheading() -> Style {
    Style::default().fg(HEADING).add_modifier(Modifier::BOLD)
}

/// Body copy
pub fn body() -> Style {
    Style::default().fg(BODY)
}

/// Secondary copy
pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

/// A button label
pub fn button() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(BUTTON_PURPLE)
        .add_modifier(Modifier::BOLD)
}
