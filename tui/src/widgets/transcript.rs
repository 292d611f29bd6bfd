//! Transcript Widget
//!
//! Chat bubbles for the stylist transcript: the stylist's on the left, the
//! visitor's on the right, each wrapped to at most 80% of the width.
//! Stays pinned to the newest message unless scrolled up.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::StatefulWidget;
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use mirra_core::{ChatMessage, Sender};

use crate::theme;

/// Scroll state for the transcript
#[derive(Debug, Default)]
pub struct TranscriptState {
    /// Lines scrolled up from the bottom (0 = newest visible)
    pub scroll_from_bottom: usize,
    /// Rendered line count, updated on each render
    pub total_lines: usize,
}

impl TranscriptState {
    /// Scroll by delta lines (positive = towards older messages)
    pub fn scroll(&mut self, delta: isize) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add_signed(delta);
    }

    /// Jump back to the newest message
    pub fn follow(&mut self) {
        self.scroll_from_bottom = 0;
    }
}

/// Chat bubbles over a transcript
pub struct Transcript<'a> {
    messages: &'a [ChatMessage],
    typing: bool,
}

impl<'a> Transcript<'a> {
    pub fn new(messages: &'a [ChatMessage]) -> Self {
        Self {
            messages,
            typing: false,
        }
    }

    /// Show a "typing" line under the last message
    pub fn typing(mut self, typing: bool) -> Self {
        self.typing = typing;
        self
    }

    fn bubble_style(sender: Sender) -> Style {
        match sender {
            Sender::User => Style::default().fg(Color::White).bg(theme::BUTTON_PURPLE),
            Sender::Bot => Style::default().fg(theme::BODY).bg(theme::PURPLE_DEEP),
        }
    }

    /// Lay out every bubble line as (x offset, text, style)
    fn layout(&self, width: u16) -> Vec<(u16, String, Style)> {
        let bubble_width = (usize::from(width) * 4 / 5).max(1);
        let text_width = bubble_width.saturating_sub(2).max(1);
        let mut lines = Vec::new();

        for message in self.messages {
            let style = Self::bubble_style(message.sender);
            let wrapped: Vec<String> = wrap(&message.text, text_width)
                .into_iter()
                .map(|cow| format!(" {cow} "))
                .collect();
            let inner = wrapped.iter().map(|l| l.width()).max().unwrap_or(0);

            for line in wrapped {
                let padded = format!("{line:<inner$}");
                let x = match message.sender {
                    Sender::Bot => 0,
                    Sender::User => width.saturating_sub(u16::try_from(inner).unwrap_or(width)),
                };
                lines.push((x, padded, style));
            }
            lines.push((0, String::new(), Style::default()));
        }

        if self.typing {
            lines.push((0, " ...".to_string(), theme::muted()));
        }
        lines
    }
}

impl StatefulWidget for Transcript<'_> {
    type State = TranscriptState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let lines = self.layout(area.width);
        state.total_lines = lines.len();

        let height = usize::from(area.height);
        let max_scroll = state.total_lines.saturating_sub(height);
        state.scroll_from_bottom = state.scroll_from_bottom.min(max_scroll);

        let end = state.total_lines - state.scroll_from_bottom;
        let start = end.saturating_sub(height);

        for (row, (x, text, style)) in (0u16..).zip(&lines[start..end]) {
            let max = usize::from(area.width.saturating_sub(*x));
            buf.set_stringn(area.x + x, area.y + row, text, max, *style);
        }
    }
}
