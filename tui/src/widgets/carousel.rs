//! Product Carousel Widget
//!
//! One product card at a time with previous/next arrows and a row of
//! pagination dots. The active dot is drawn wide, like the page's pill.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Widget};
use unicode_width::UnicodeWidthStr;

use mirra_core::sections::copy;
use mirra_core::Product;

use crate::theme;

/// Shop carousel view over a product list
pub struct ProductCarousel<'a> {
    products: &'a [Product],
    active: usize,
}

impl<'a> ProductCarousel<'a> {
    pub fn new(products: &'a [Product], active: usize) -> Self {
        Self { products, active }
    }

    /// Pagination row, e.g. `● ● ━━ ● ●`
    pub fn dots(len: usize, active: usize) -> String {
        (0..len)
            .map(|i| if i == active { "━━" } else { "●" })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Top-left of the dots row when rendered into `area`
    pub fn dots_origin(area: Rect, len: usize, active: usize) -> (u16, u16) {
        let card_height = area.height.saturating_sub(2).min(7);
        let w = u16::try_from(Self::dots(len, active).width()).unwrap_or(area.width);
        (
            area.x + area.width.saturating_sub(w) / 2,
            area.y + card_height + 1,
        )
    }

    /// Screen columns of each dot in a dots row starting at `x`
    pub fn dot_columns(len: usize, active: usize, x: u16) -> Vec<(usize, u16, u16)> {
        let mut col = x;
        (0..len)
            .map(|i| {
                let w: u16 = if i == active { 2 } else { 1 };
                let span = (i, col, w);
                col += w + 1;
                span
            })
            .collect()
    }
}

fn centered(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: Style) {
    let w = u16::try_from(text.width()).unwrap_or(area.width).min(area.width);
    let x = area.x + (area.width - w) / 2;
    buf.set_stringn(x, y, text, usize::from(area.width), style);
}

impl Widget for ProductCarousel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 16 || area.height < 7 || self.products.is_empty() {
            return;
        }
        let Some(product) = self.products.get(self.active) else {
            return;
        };

        let card_width = area.width.saturating_sub(8).min(40);
        let card = Rect::new(
            area.x + (area.width - card_width) / 2,
            area.y,
            card_width,
            area.height.saturating_sub(2).min(7),
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::BORDER));
        let inner = block.inner(card);
        block.render(card, buf);

        centered(buf, inner, inner.y, "[ ◇ ]", theme::muted());
        centered(
            buf,
            inner,
            inner.y + 1,
            product.name,
            Style::default()
                .fg(theme::CARD_TITLE)
                .add_modifier(Modifier::BOLD),
        );
        centered(
            buf,
            inner,
            inner.y + 2,
            product.price,
            Style::default().fg(theme::PINK).add_modifier(Modifier::BOLD),
        );
        if inner.height > 4 {
            centered(buf, inner, inner.y + 4, &format!(" {} ", copy::ADD_TO_CART), theme::button());
        }

        let arrow_y = card.y + card.height / 2;
        buf.set_string(area.x + 1, arrow_y, "‹", theme::subheading());
        buf.set_string(area.x + area.width - 2, arrow_y, "›", theme::subheading());

        let dots = Self::dots(self.products.len(), self.active);
        let (dots_x, dots_y) = Self::dots_origin(area, self.products.len(), self.active);
        if dots_y < area.y + area.height {
            buf.set_stringn(
                dots_x,
                dots_y,
                &dots,
                usize::from(area.width),
                Style::default().fg(theme::PURPLE),
            );
        }
    }
}
