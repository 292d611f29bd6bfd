//! Main Application
//!
//! The App is a thin surface over the showroom:
//! - Event loop (keyboard, mouse, paste, resize)
//! - Routes input to the component behind the section in view
//! - Applies completions from scheduled work and turns notifications into toasts
//! - Composites the nav bar, page body, sparkles, status line and toasts
//!
//! Terminal handling stays in [`App::run`]; everything else works on a plain
//! size, so tests drive an App without a TTY.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::Terminal;

use mirra_core::sections::BRAND;
use mirra_core::{Section, Showroom, Severity};

use crate::compositor::{Compositor, LayerId};
use crate::page::{self, Hotspots, PageContext};
use crate::theme;
use crate::toast::ToastStack;
use crate::widgets::{ProductCarousel, SparkleField, TranscriptState};

/// Frame tick
const FRAME: Duration = Duration::from_millis(16);

/// Sparkles over the hero banner
const SPARKLE_COUNT: usize = 40;

/// Toast column width
const TOAST_WIDTH: u16 = 44;

/// Rows per toast
const TOAST_ROWS: u16 = 3;

/// Transcript lines per mouse wheel step
const WHEEL_LINES: isize = 3;

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// The interactive showroom
    showroom: Showroom,

    // === Navigation ===
    /// Section in view
    section: Section,
    /// When the section came into view (drives fade-ins)
    section_entered: Instant,

    // === UI Components ===
    /// The layered compositor
    compositor: Compositor,
    /// Layer assignments
    layers: AppLayers,
    /// Notifications on screen
    toasts: ToastStack,
    /// Hero sparkles
    sparkles: SparkleField,
    /// Chat scroll position
    transcript: TranscriptState,
    /// Mouse targets from the last frame
    hotspots: Hotspots,

    // === Input State ===
    /// Typed try-on path
    path_input: String,

    // === Misc State ===
    /// Start time (for looping animations)
    started: Instant,
    /// Terminal size
    size: (u16, u16),
}

/// Layer IDs for UI regions
struct AppLayers {
    nav: LayerId,
    body: LayerId,
    sparkles: LayerId,
    status: LayerId,
    toasts: LayerId,
}

/// Screen regions for a terminal size
struct Regions {
    nav: Rect,
    body: Rect,
    status: Rect,
    toasts: Rect,
}

impl Regions {
    fn for_size((width, height): (u16, u16)) -> Self {
        let toast_width = TOAST_WIDTH.min(width);
        Self {
            nav: Rect::new(0, 0, width, height.min(1)),
            body: Rect::new(0, height.min(1), width, height.saturating_sub(2)),
            status: Rect::new(0, height.saturating_sub(1), width, height.min(1)),
            toasts: Rect::new(
                width.saturating_sub(toast_width + 1),
                height.min(1),
                toast_width,
                (TOAST_ROWS * 3).min(height.saturating_sub(2)),
            ),
        }
    }
}

/// Nav tabs as (section, x, width)
fn nav_spans(width: u16) -> Vec<(Section, u16, u16)> {
    let mut x = u16::try_from(BRAND.len()).unwrap_or(0) + 4;
    Section::ALL
        .iter()
        .filter_map(|&section| {
            let w = u16::try_from(section.nav_label().len() + 2).ok()?;
            let span = (section, x, w);
            x = x.saturating_add(w + 1);
            (span.1 + w <= width).then_some(span)
        })
        .collect()
}

/// A pasted path, as terminals deliver a dropped file
fn dropped_path(text: &str) -> Option<PathBuf> {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    let unquoted = line
        .strip_prefix('\'')
        .and_then(|l| l.strip_suffix('\''))
        .or_else(|| line.strip_prefix('"').and_then(|l| l.strip_suffix('"')))
        .unwrap_or(line);
    let path = unquoted.strip_prefix("file://").unwrap_or(unquoted);
    Some(PathBuf::from(path.replace("\\ ", " ")))
}

impl App {
    /// Create an App over a (mounted or not) showroom for a screen size
    pub fn new(showroom: Showroom, size: (u16, u16)) -> Self {
        let area = Rect::new(0, 0, size.0, size.1);
        let regions = Regions::for_size(size);

        let mut compositor = Compositor::new(area);
        let body = compositor.create_layer(regions.body, 0);
        let sparkles = compositor.create_layer(regions.body, 5);
        let nav = compositor.create_layer(regions.nav, 10);
        let status = compositor.create_layer(regions.status, 10);
        let toasts = compositor.create_layer(regions.toasts, 100);

        let toast_lifetime = showroom.config().toast_duration;
        let now = Instant::now();

        Self {
            running: true,
            showroom,
            section: Section::Hero,
            section_entered: now,
            compositor,
            layers: AppLayers {
                nav,
                body,
                sparkles,
                status,
                toasts,
            },
            toasts: ToastStack::new(toast_lifetime),
            sparkles: SparkleField::scatter(SPARKLE_COUNT, &mut rand::thread_rng()),
            transcript: TranscriptState::default(),
            hotspots: Hotspots::default(),
            path_input: String::new(),
            started: now,
            size,
        }
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        // Render initial frame immediately so the page shows before any input
        self.draw(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event).await,
                        Some(Err(e)) => tracing::warn!("Terminal event error: {}", e),
                        None => self.quit(),
                    }
                }

                // Timers and decodes finishing
                Some(event) = self.showroom.next_event() => self.showroom.apply(event),

                // Frame tick
                _ = tokio::time::sleep(FRAME) => {}
            }

            self.update(Instant::now());
            self.draw(terminal)?;
        }

        self.showroom.teardown();
        Ok(())
    }

    /// Whether the app is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Section in view
    pub fn section(&self) -> Section {
        self.section
    }

    /// The showroom behind the page
    pub fn showroom(&self) -> &Showroom {
        &self.showroom
    }

    /// Mutable access to the showroom
    pub fn showroom_mut(&mut self) -> &mut Showroom {
        &mut self.showroom
    }

    /// Notifications on screen
    pub fn toasts(&self) -> &ToastStack {
        &self.toasts
    }

    /// Typed try-on path
    pub fn path_input(&self) -> &str {
        &self.path_input
    }

    /// Bring a section into view
    pub fn go_to(&mut self, section: Section) {
        if section == self.section {
            return;
        }
        tracing::debug!(from = ?self.section, to = ?section, "Navigating");
        self.section = section;
        self.section_entered = Instant::now();
        if section == Section::Stylist {
            self.transcript.follow();
        }
    }

    fn quit(&mut self) {
        self.running = false;
        self.showroom.teardown();
    }

    /// Apply finished work and refresh toasts
    pub fn update(&mut self, now: Instant) {
        self.showroom.apply_pending();
        for notification in self.showroom.drain_notifications() {
            tracing::debug!(title = %notification.title, "Toast");
            self.toasts.push(notification, now);
        }
        self.toasts.expire(now);
    }

    /// Handle one terminal event
    pub async fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key).await,
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Paste(text) => self.handle_paste(&text).await,
            Event::Resize(w, h) => self.handle_resize(w, h),
            _ => {}
        }
    }

    /// Handle keyboard input
    async fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            // Quit
            KeyCode::Char('c') if ctrl => return self.quit(),
            KeyCode::Esc => {
                if self.toasts.dismiss_latest().is_none() {
                    self.quit();
                }
                return;
            }

            // Section navigation
            KeyCode::Tab => return self.go_to(self.section.next()),
            KeyCode::BackTab => return self.go_to(self.section.prev()),
            KeyCode::F(n @ 1..=6) => {
                if let Some(section) = Section::from_index(usize::from(n - 1)) {
                    self.go_to(section);
                }
                return;
            }
            _ => {}
        }

        match self.section {
            Section::Hero | Section::Overview => self.handle_landing_key(key),
            Section::TryOn => self.handle_try_on_key(key).await,
            Section::Stylist => self.handle_stylist_key(key),
            Section::Shop => self.handle_shop_key(key),
            Section::Contact => self.handle_contact_key(key),
        }
    }

    fn handle_landing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if let Some((_, target)) = self.section.call_to_action() {
                    self.go_to(target);
                }
            }
            KeyCode::Down | KeyCode::PageDown => self.go_to(self.section.next()),
            KeyCode::Up | KeyCode::PageUp => self.go_to(self.section.prev()),
            KeyCode::Char(c @ '1'..='6') => {
                if let Some(section) = c
                    .to_digit(10)
                    .and_then(|n| Section::from_index(n as usize - 1))
                {
                    self.go_to(section);
                }
            }
            _ => {}
        }
    }

    async fn handle_try_on_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => self.path_input.clear(),
            KeyCode::Char(c) if !ctrl => self.path_input.push(c),
            KeyCode::Backspace => {
                self.path_input.pop();
            }
            KeyCode::Enter => {
                let typed = std::mem::take(&mut self.path_input);
                let path = typed.trim();
                if !path.is_empty() {
                    self.showroom.pick_path(path).await;
                }
            }
            _ => {}
        }
    }

    fn handle_stylist_key(&mut self, key: KeyEvent) {
        let page = isize::try_from(self.size.1 / 2).unwrap_or(1).max(1);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let chat = self.showroom.chat_mut();
        match key.code {
            KeyCode::Char('u') if ctrl => chat.set_compose(""),
            KeyCode::Char(c) if !ctrl => chat.push_char(c),
            KeyCode::Backspace => chat.pop_char(),
            KeyCode::Enter => {
                if chat.send_compose().is_some() {
                    self.transcript.follow();
                }
            }
            KeyCode::PageUp => self.transcript.scroll(page),
            KeyCode::PageDown => self.transcript.scroll(-page),
            KeyCode::End => self.transcript.follow(),
            _ => {}
        }
    }

    fn handle_shop_key(&mut self, key: KeyEvent) {
        let carousel = self.showroom.carousel_mut();
        match key.code {
            KeyCode::Left => {
                carousel.retreat();
            }
            KeyCode::Right => {
                carousel.advance();
            }
            KeyCode::Home => carousel.jump_to(0),
            KeyCode::End => carousel.jump_to(carousel.len() - 1),
            KeyCode::Char(c) => {
                let slot = c.to_digit(10).and_then(|d| usize::try_from(d).ok());
                if let Some(slot) = slot.filter(|s| (1..=carousel.len()).contains(s)) {
                    carousel.jump_to(slot - 1);
                }
            }
            _ => {}
        }
    }

    fn handle_contact_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let form = self.showroom.contact_mut();
        match key.code {
            KeyCode::Char('u') if ctrl => {
                let field = form.focus();
                form.set(field, "");
            }
            KeyCode::Up => form.focus_prev(),
            KeyCode::Down => form.focus_next(),
            KeyCode::Enter => {
                if form.focus().is_multiline() {
                    form.push_char('\n');
                } else {
                    form.focus_next();
                }
            }
            KeyCode::Char(c) if !ctrl => form.push_char(c),
            KeyCode::Backspace => form.pop_char(),
            _ => {}
        }
    }

    /// Screen position relative to the body layer, if inside it
    fn body_position(&self, x: u16, y: u16) -> Option<Position> {
        let bounds = self.compositor.layer_bounds(self.layers.body)?;
        bounds
            .contains(Position::new(x, y))
            .then(|| Position::new(x - bounds.x, y - bounds.y))
    }

    /// Handle mouse input
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                self.track_drag(mouse.column, mouse.row, matches!(mouse.kind, MouseEventKind::Drag(_)));
            }
            MouseEventKind::Up(_) => self.showroom.upload_mut().drop_zone_mut().drag_leave(),
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row),
            MouseEventKind::ScrollUp => {
                if self.section == Section::Stylist {
                    self.transcript.scroll(WHEEL_LINES);
                } else {
                    self.go_to(self.section.prev());
                }
            }
            MouseEventKind::ScrollDown => {
                if self.section == Section::Stylist {
                    self.transcript.scroll(-WHEEL_LINES);
                } else {
                    self.go_to(self.section.next());
                }
            }
            _ => {}
        }
    }

    /// Highlight the drop area while a drag hovers over it
    fn track_drag(&mut self, x: u16, y: u16, dragging: bool) {
        let over = self.section == Section::TryOn
            && self
                .body_position(x, y)
                .zip(self.hotspots.drop_zone)
                .is_some_and(|(pos, zone)| zone.contains(pos));
        let zone = self.showroom.upload_mut().drop_zone_mut();
        if over && dragging {
            zone.drag_enter();
        } else if zone.is_dragging() {
            zone.drag_leave();
        }
    }

    fn click(&mut self, x: u16, y: u16) {
        if let Some(nav) = self.compositor.layer_bounds(self.layers.nav) {
            if y == nav.y {
                let hit = nav_spans(self.size.0)
                    .into_iter()
                    .find(|&(_, start, w)| x >= start && x < start + w);
                if let Some((section, _, _)) = hit {
                    self.go_to(section);
                }
                return;
            }
        }

        let Some(pos) = self.body_position(x, y) else {
            return;
        };
        if self.section != Section::Shop {
            return;
        }
        let Some(area) = self.hotspots.carousel.filter(|a| a.contains(pos)) else {
            return;
        };

        let carousel = self.showroom.carousel_mut();
        let (len, active) = (carousel.len(), carousel.active());
        let (dots_x, dots_y) = ProductCarousel::dots_origin(area, len, active);
        if pos.y == dots_y {
            let dot = ProductCarousel::dot_columns(len, active, dots_x)
                .into_iter()
                .find(|&(_, start, w)| pos.x >= start && pos.x < start + w);
            if let Some((index, _, _)) = dot {
                carousel.jump_to(index);
            }
        } else if pos.x <= area.x + 2 {
            carousel.retreat();
        } else if pos.x + 3 >= area.x + area.width {
            carousel.advance();
        }
    }

    /// Handle bracketed paste: text for the chat and form, a dropped file elsewhere
    async fn handle_paste(&mut self, text: &str) {
        match self.section {
            Section::Stylist => {
                let chat = self.showroom.chat_mut();
                for c in text.chars().filter(|c| !c.is_control()) {
                    chat.push_char(c);
                }
            }
            Section::Contact => {
                let form = self.showroom.contact_mut();
                for c in text.chars().filter(|&c| c != '\r') {
                    form.push_char(c);
                }
            }
            _ => {
                let Some(path) = dropped_path(text) else {
                    return;
                };
                self.go_to(Section::TryOn);
                self.showroom.upload_mut().drop_zone_mut().drag_enter();
                self.showroom.drop_path(path).await;
            }
        }
    }

    /// Handle terminal resize
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.compositor.resize(Rect::new(0, 0, width, height));

        let regions = Regions::for_size(self.size);
        self.compositor.place_layer(self.layers.nav, regions.nav);
        self.compositor.place_layer(self.layers.body, regions.body);
        self.compositor.place_layer(self.layers.sparkles, regions.body);
        self.compositor.place_layer(self.layers.status, regions.status);
        self.compositor.place_layer(self.layers.toasts, regions.toasts);
    }

    /// Render every layer and composite them
    pub fn render_frame(&mut self, now: Instant) -> &Buffer {
        self.render_nav();
        self.render_body(now);
        self.render_sparkles(now);
        self.render_status();
        self.render_toasts();
        self.compositor.composite()
    }

    /// Render the UI
    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let output = self.render_frame(Instant::now());

        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    if let Some(cell) = output.cell((x, y)) {
                        buf[(x, y)] = cell.clone();
                    }
                }
            }
        })?;

        Ok(())
    }

    fn render_nav(&mut self) {
        let width = self.size.0;
        let active = self.section;
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.nav) else {
            return;
        };
        buf.reset();
        if buf.area.height == 0 {
            return;
        }

        for (i, (c, x)) in BRAND.chars().zip(1u16..).enumerate() {
            if x < buf.area.width {
                let style = Style::default()
                    .fg(theme::gradient(i, BRAND.len()))
                    .add_modifier(Modifier::BOLD);
                buf.set_string(x, 0, c.to_string(), style);
            }
        }

        for (section, x, w) in nav_spans(width) {
            let style = if section == active {
                theme::button()
            } else {
                theme::muted()
            };
            buf.set_stringn(x, 0, format!(" {} ", section.nav_label()), usize::from(w), style);
        }
    }

    fn render_body(&mut self, now: Instant) {
        let ctx = PageContext {
            in_section: now.saturating_duration_since(self.section_entered),
            since_start: now.saturating_duration_since(self.started),
            path_input: &self.path_input,
        };
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.body) else {
            return;
        };
        buf.reset();
        self.hotspots =
            page::render_section(self.section, buf, &self.showroom, &mut self.transcript, &ctx);
    }

    fn render_sparkles(&mut self, now: Instant) {
        let visible = self.section == Section::Hero;
        self.compositor.set_visible(self.layers.sparkles, visible);
        if !visible {
            return;
        }
        let elapsed = now.saturating_duration_since(self.started);
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.sparkles) {
            buf.reset();
            let area = buf.area;
            self.sparkles.render(area, buf, elapsed);
        }
    }

    fn render_status(&mut self) {
        let hint = match self.section {
            Section::Hero | Section::Overview => "Enter continue",
            Section::TryOn => "type a path + Enter · paste a file to drop it",
            Section::Stylist => "Enter send · PgUp/PgDn scroll",
            Section::Shop => "←/→ browse · 1-5 jump",
            Section::Contact => "↑/↓ field · type to fill",
        };
        let carousel = self.showroom.carousel();
        let status = format!(
            " Tab/F1-F6 sections · Esc quit │ {} │ upload: {} │ slide {}/{}{}",
            hint,
            self.showroom.upload().state().label(),
            carousel.active() + 1,
            carousel.len(),
            if carousel.is_autoplaying() { " ▶" } else { "" },
        );

        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.status) {
            buf.reset();
            if buf.area.height > 0 {
                buf.set_stringn(0, 0, &status, usize::from(buf.area.width), theme::muted());
            }
        }
    }

    fn render_toasts(&mut self) {
        let toasts: Vec<_> = self.toasts.visible().cloned().collect();
        self.compositor
            .set_visible(self.layers.toasts, !toasts.is_empty());

        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.toasts) else {
            return;
        };
        buf.reset();
        let area = buf.area;

        for (toast, top) in toasts.iter().zip((0..area.height).step_by(usize::from(TOAST_ROWS))) {
            if top + 1 >= area.height {
                break;
            }
            let bg = match toast.notification.severity {
                Severity::Info => theme::TOAST_INFO,
                Severity::Destructive => theme::TOAST_DESTRUCTIVE,
            };
            let fill = " ".repeat(usize::from(area.width));
            for row in top..(top + TOAST_ROWS - 1).min(area.height) {
                buf.set_string(0, row, &fill, Style::default().bg(bg));
            }
            let width = usize::from(area.width.saturating_sub(2));
            buf.set_stringn(
                1,
                top,
                &toast.notification.title,
                width,
                Style::default()
                    .fg(Color::White)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            );
            buf.set_stringn(
                1,
                top + 1,
                &toast.notification.description,
                width,
                Style::default().fg(theme::BODY).bg(bg),
            );
        }
    }
}
