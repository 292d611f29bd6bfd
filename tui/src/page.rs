//! Section Pages
//!
//! Draws each section of the showroom into the body layer. Every function
//! takes a layer-local buffer (origin at 0,0) and reads state straight from
//! the core; nothing here mutates the showroom.

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, StatefulWidget, Widget};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use mirra_core::contact::{ADDRESS, EMAIL, PHONE};
use mirra_core::reveal::FADE_IN_OFFSET;
use mirra_core::sections::{copy, BRAND, TAGLINE};
use mirra_core::{
    ChatSession, ContactField, ContactForm, FadeIn, Keyframes, Section, UploadPipeline,
    UploadState, RECOMMENDED, SHOWCASE,
};

use crate::theme;
use crate::widgets::{ProductCarousel, Transcript, TranscriptState};

/// Regions of the last rendered page that react to the mouse
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hotspots {
    /// Try-on drop area
    pub drop_zone: Option<Rect>,
    /// Shop carousel (arrows and dots)
    pub carousel: Option<Rect>,
}

/// What a page needs beyond the showroom state
pub struct PageContext<'a> {
    /// Time since the section was entered
    pub in_section: Duration,
    /// Time since the app started
    pub since_start: Duration,
    /// Typed try-on path
    pub path_input: &'a str,
}

/// Write `text` if row `y` lies inside the buffer
fn put(buf: &mut Buffer, x: u16, y: u16, text: impl AsRef<str>, max_width: usize, style: Style) {
    let area = buf.area;
    if y >= area.y && y < area.y + area.height && x < area.x + area.width {
        buf.set_stringn(x, y, text, max_width, style);
    }
}

/// Write `text` centred on row `y`
fn centered(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: Style) {
    if y >= area.y + area.height {
        return;
    }
    let w = u16::try_from(text.width()).unwrap_or(area.width).min(area.width);
    let x = area.x + (area.width - w) / 2;
    put(buf, x, y, text, usize::from(area.width), style);
}

/// Wrap `text` into `area` from row `y`; returns the row after the last line
fn paragraph(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: Style) -> u16 {
    let mut row = y;
    for line in wrap(text, usize::from(area.width.max(1))) {
        if row >= area.y + area.height {
            break;
        }
        put(buf, area.x, row, &line, usize::from(area.width), style);
        row += 1;
    }
    row
}

/// Style for content that is fading in, or `None` while still invisible
fn faded(style: Style, opacity: f32) -> Option<Style> {
    if opacity < 0.2 {
        None
    } else if opacity < 0.7 {
        Some(style.add_modifier(Modifier::DIM))
    } else {
        Some(style)
    }
}

/// Rows still to rise for a fade-in
fn rise(fade: &FadeIn, elapsed: Duration) -> u16 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (fade.offset(elapsed) / FADE_IN_OFFSET * 2.0).round() as u16
    }
}

/// Body area inset from the layer edges
fn inset(area: Rect, horizontal: u16, vertical: u16) -> Rect {
    Rect::new(
        area.x + horizontal.min(area.width / 2),
        area.y + vertical.min(area.height / 2),
        area.width.saturating_sub(horizontal * 2),
        area.height.saturating_sub(vertical * 2),
    )
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::BORDER))
        .title(format!(" {title} "))
        .title_style(theme::subheading())
}

/// Draw one section; returns the regions the mouse can act on
pub fn render_section(
    section: Section,
    buf: &mut Buffer,
    showroom: &mirra_core::Showroom,
    transcript: &mut TranscriptState,
    ctx: &PageContext<'_>,
) -> Hotspots {
    let area = buf.area;
    if area.width < 20 || area.height < 8 {
        put(buf, 0, 0, "Terminal too small", usize::from(area.width), theme::muted());
        return Hotspots::default();
    }

    let fade = FadeIn::default();
    let heading_row = area.y + 1 + rise(&fade, ctx.in_section);
    if section != Section::Hero {
        if let Some(style) = faded(theme::heading(), fade.opacity(ctx.in_section)) {
            centered(buf, area, heading_row, section.title(), style);
        }
    }
    let body = Rect::new(
        area.x,
        area.y + 3,
        area.width,
        area.height.saturating_sub(3),
    );

    match section {
        Section::Hero => {
            render_hero(buf, area, ctx.since_start);
            Hotspots::default()
        }
        Section::Overview => {
            render_overview(buf, inset(body, 4, 0), ctx.in_section);
            Hotspots::default()
        }
        Section::TryOn => Hotspots {
            drop_zone: Some(render_try_on(
                buf,
                inset(body, 2, 0),
                showroom.upload(),
                ctx.path_input,
            )),
            ..Hotspots::default()
        },
        Section::Stylist => {
            render_stylist(buf, inset(body, 2, 0), showroom.chat(), transcript);
            Hotspots::default()
        }
        Section::Shop => Hotspots {
            carousel: Some(render_shop(buf, inset(body, 2, 0), showroom.carousel().active())),
            ..Hotspots::default()
        },
        Section::Contact => {
            render_contact(buf, inset(body, 2, 0), showroom.contact());
            Hotspots::default()
        }
    }
}

fn render_hero(buf: &mut Buffer, area: Rect, since_start: Duration) {
    let title_row = area.y + area.height / 3;
    let spaced: Vec<char> = BRAND.chars().collect();
    let width = u16::try_from(spaced.len() * 2 - 1).unwrap_or(area.width);
    let x0 = area.x + area.width.saturating_sub(width) / 2;
    for (i, (c, x)) in spaced.iter().zip((x0..).step_by(2)).enumerate() {
        let style = Style::default()
            .fg(theme::gradient(i, spaced.len()))
            .add_modifier(Modifier::BOLD);
        put(buf, x, title_row, c.to_string(), 1, style);
    }

    centered(
        buf,
        area,
        title_row + 2,
        TAGLINE,
        Style::default()
            .fg(theme::HEADING)
            .add_modifier(Modifier::ITALIC),
    );
    centered(
        buf,
        area,
        title_row + 4,
        &format!(" {} ", copy::DISCOVER_MORE),
        theme::button(),
    );

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bounce = (Keyframes::bounce().sample(since_start) / 5.0).round() as u16;
    let hint_row = (area.y + area.height).saturating_sub(2 + bounce);
    centered(buf, area, hint_row, "⌄", theme::muted());
}

fn render_overview(buf: &mut Buffer, area: Rect, in_section: Duration) {
    let fade = FadeIn::default();
    let Some(body_style) = faded(theme::body(), fade.opacity(in_section)) else {
        return;
    };
    let mut row = area.y + rise(&fade, in_section);
    centered(buf, area, row, copy::OVERVIEW_HEADING, theme::subheading());
    row = paragraph(buf, area, row + 2, copy::OVERVIEW_BODY, body_style) + 1;

    for (i, (title, blurb)) in (0u32..).zip(copy::FEATURES) {
        let fade = FadeIn::staggered(i + 1);
        let Some(style) = faded(theme::subheading(), fade.opacity(in_section)) else {
            continue;
        };
        let y = row + rise(&fade, in_section);
        put(buf, area.x, y, format!("✦ {title}"), usize::from(area.width), style);
        put(
            buf,
            area.x + 2,
            y + 1,
            blurb,
            usize::from(area.width.saturating_sub(2)),
            theme::muted(),
        );
        row += 3;
    }

    centered(buf, area, row + 1, &format!(" {} ", copy::TRY_IT_NOW), theme::button());
}

/// Returns the drop area
fn render_try_on(buf: &mut Buffer, area: Rect, upload: &UploadPipeline, path_input: &str) -> Rect {
    let half = area.width / 2;
    let left = Rect::new(area.x, area.y, half.saturating_sub(1), area.height);
    let right = Rect::new(area.x + half, area.y, area.width - half, area.height);

    let block = panel(copy::UPLOAD_HEADING);
    let inner = block.inner(left);
    block.render(left, buf);
    let mut row = paragraph(buf, inner, inner.y, copy::UPLOAD_BODY, theme::body()) + 1;

    let prompt = format!("Path: {path_input}_");
    put(buf, inner.x, row, &prompt, usize::from(inner.width), theme::subheading());
    row += 1;
    put(
        buf,
        inner.x,
        row,
        "Enter to upload · paste or drop a file anywhere",
        usize::from(inner.width),
        theme::muted(),
    );
    row += 2;

    let drop_height = (inner.y + inner.height).saturating_sub(row).min(5);
    let drop_zone = Rect::new(inner.x, row, inner.width, drop_height);
    let dragging = upload.drop_zone().is_dragging();
    let (border, text, style) = if dragging {
        (theme::PINK, copy::DROP_ACTIVE, theme::subheading())
    } else {
        (theme::BORDER, copy::DROP_IDLE, theme::muted())
    };
    if drop_zone.height >= 3 {
        let zone = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Plain)
            .border_style(Style::default().fg(border));
        let zone_inner = zone.inner(drop_zone);
        zone.render(drop_zone, buf);
        paragraph(buf, zone_inner, zone_inner.y, text, style);
    }

    let block = panel(copy::RESULTS_HEADING);
    let inner = block.inner(right);
    block.render(right, buf);
    match upload.state() {
        UploadState::Idle => {
            centered(buf, inner, inner.y + inner.height / 2, copy::RESULTS_EMPTY, theme::muted());
        }
        UploadState::Uploading => {
            centered(buf, inner, inner.y + inner.height / 2, "Uploading…", theme::subheading());
        }
        UploadState::Ready(image) => {
            centered(buf, inner, inner.y + 1, "[ photo preview ]", theme::subheading());
            let details = format!("{} · {} bytes", image.mime(), image.byte_len());
            centered(buf, inner, inner.y + 3, &details, theme::body());
            let uri: String = image.uri().chars().take(usize::from(inner.width)).collect();
            centered(buf, inner, inner.y + 4, &uri, theme::muted());
        }
        UploadState::Failed(reason) => {
            centered(buf, inner, inner.y + inner.height / 2, reason, Style::default().fg(theme::PINK));
        }
    }

    drop_zone
}

fn render_stylist(
    buf: &mut Buffer,
    area: Rect,
    chat: &ChatSession,
    transcript: &mut TranscriptState,
) {
    let recommended_width = if area.width >= 70 { 28 } else { 0 };
    let chat_area = Rect::new(
        area.x,
        area.y,
        area.width.saturating_sub(recommended_width),
        area.height,
    );

    let block = panel(copy::CHAT_HEADING);
    let inner = block.inner(chat_area);
    block.render(chat_area, buf);

    let messages_area = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(2));
    Transcript::new(chat.transcript())
        .typing(chat.is_awaiting_reply())
        .render(messages_area, buf, transcript);

    let input_row = inner.y + inner.height.saturating_sub(1);
    put(
        buf,
        inner.x,
        input_row.saturating_sub(1),
        "─".repeat(usize::from(inner.width)),
        usize::from(inner.width),
        Style::default().fg(theme::BORDER),
    );
    if chat.compose().is_empty() {
        put(buf, inner.x, input_row, copy::CHAT_PLACEHOLDER, usize::from(inner.width), theme::muted());
    } else {
        let shown = format!("{}_", chat.compose());
        let skip = shown.width().saturating_sub(usize::from(inner.width));
        let tail: String = shown.chars().skip(skip).collect();
        put(buf, inner.x, input_row, &tail, usize::from(inner.width), theme::body());
    }

    if recommended_width > 0 {
        let side = Rect::new(
            chat_area.x + chat_area.width,
            area.y,
            recommended_width,
            area.height,
        );
        let block = panel(copy::RECOMMENDED_HEADING);
        let inner = block.inner(side);
        block.render(side, buf);
        for (product, row) in RECOMMENDED.iter().zip((inner.y..).step_by(3)) {
            if row + 1 >= inner.y + inner.height {
                break;
            }
            put(
                buf,
                inner.x + 1,
                row,
                product.name,
                usize::from(inner.width),
                Style::default().fg(theme::CARD_TITLE),
            );
            put(
                buf,
                inner.x + 1,
                row + 1,
                product.price,
                usize::from(inner.width),
                Style::default().fg(theme::PINK),
            );
        }
    }
}

/// Returns the carousel area
fn render_shop(buf: &mut Buffer, area: Rect, active: usize) -> Rect {
    let carousel = Rect::new(area.x, area.y + 1, area.width, area.height.min(11).saturating_sub(1));
    ProductCarousel::new(&SHOWCASE, active).render(carousel, buf);
    if carousel.y + carousel.height + 1 < area.y + area.height {
        centered(
            buf,
            area,
            carousel.y + carousel.height + 1,
            "← → browse · 1-5 jump",
            theme::muted(),
        );
    }
    carousel
}

fn render_contact(buf: &mut Buffer, area: Rect, form: &ContactForm) {
    let half = area.width / 2;
    let left = Rect::new(area.x, area.y, half.saturating_sub(1), area.height);
    let right = Rect::new(area.x + half, area.y, area.width - half, area.height);

    let mut row = left.y;
    put(buf, left.x, row, copy::CONTACT_HEADING, usize::from(left.width), theme::subheading());
    row = paragraph(buf, left, row + 2, copy::CONTACT_BODY, theme::body()) + 1;
    for (label, value) in [("✉", EMAIL), ("☏", PHONE), ("⌂", ADDRESS)] {
        put(buf, left.x, row, format!("{label} {value}"), usize::from(left.width), theme::muted());
        row += 1;
    }

    let block = panel(copy::SEND_MESSAGE);
    let inner = block.inner(right);
    block.render(right, buf);

    let mut row = inner.y;
    for field in ContactField::ALL {
        let focused = form.focus() == field;
        let value = form.value(field);
        let marker = if focused { "▸ " } else { "  " };
        let (text, style) = if value.is_empty() {
            (field.placeholder().to_string(), theme::muted())
        } else {
            (value.replace('\n', " ⏎ "), theme::body())
        };
        let style = if focused {
            style.add_modifier(Modifier::UNDERLINED)
        } else {
            style
        };
        put(buf, inner.x, row, marker, 2, theme::subheading());
        put(buf, inner.x + 2, row, &text, usize::from(inner.width.saturating_sub(2)), style);
        row += if field.is_multiline() { 3 } else { 2 };
    }
    centered(buf, inner, row, &format!(" {} ", copy::SEND_MESSAGE), theme::button());
}
