//! App Integration Tests
//!
//! Drive the App with synthetic terminal events, the way the event loop
//! does, and check what reaches the showroom and the screen.

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use pretty_assertions::assert_eq;
use ratatui::buffer::Buffer;
use tempfile::NamedTempFile;

use mirra_core::chat::SCRIPTED_REPLY;
use mirra_core::{
    ChatMessage, ContactField, Responder, Section, Sender, Severity, Showroom, ShowroomConfig,
    UploadState,
};
use mirra_tui::App;

fn app() -> App {
    let mut showroom = Showroom::new(ShowroomConfig::default());
    showroom.mount();
    App::new(showroom, (100, 30))
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

async fn press(app: &mut App, code: KeyCode) {
    app.handle_event(key(code)).await;
}

async fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c)).await;
    }
}

fn click(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

async fn settle_one(app: &mut App) {
    let event = tokio::time::timeout(Duration::from_secs(30), app.showroom_mut().next_event())
        .await
        .expect("an event within 30s")
        .expect("channel open");
    app.showroom_mut().apply(event);
    app.update(Instant::now());
}

fn screen_text(buf: &Buffer) -> String {
    (0..buf.area.height)
        .map(|y| {
            (0..buf.area.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn photo(extension: &str, len: usize) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(extension)
        .tempfile()
        .unwrap();
    file.write_all(&vec![0x42; len]).unwrap();
    file
}

// =============================================================================
// Navigation
// =============================================================================

#[tokio::test]
async fn test_tab_and_function_keys_navigate() {
    let mut app = app();
    assert_eq!(app.section(), Section::Hero);

    press(&mut app, KeyCode::Tab).await;
    assert_eq!(app.section(), Section::Overview);

    press(&mut app, KeyCode::F(5)).await;
    assert_eq!(app.section(), Section::Shop);

    press(&mut app, KeyCode::F(1)).await;
    press(&mut app, KeyCode::BackTab).await;
    assert_eq!(app.section(), Section::Contact);

    press(&mut app, KeyCode::F(1)).await;
    press(&mut app, KeyCode::Char('4')).await;
    assert_eq!(app.section(), Section::Stylist);
}

#[tokio::test]
async fn test_calls_to_action_lead_to_try_on() {
    let mut app = app();
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.section(), Section::Overview);
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.section(), Section::TryOn);
}

#[tokio::test]
async fn test_clicking_nav_tab() {
    let mut app = app();
    app.render_frame(Instant::now());

    // "MiRRA" then tabs " Home " " Overview " " Try-On " " Stylist " " Shop "
    app.handle_event(click(47, 0)).await;
    assert_eq!(app.section(), Section::Shop);
}

// =============================================================================
// Shop
// =============================================================================

#[tokio::test]
async fn test_shop_keys_drive_carousel() {
    let mut app = app();
    app.go_to(Section::Shop);

    press(&mut app, KeyCode::Right).await;
    assert_eq!(app.showroom().carousel().active(), 1);

    press(&mut app, KeyCode::Left).await;
    press(&mut app, KeyCode::Left).await;
    assert_eq!(app.showroom().carousel().active(), 4);

    press(&mut app, KeyCode::Char('3')).await;
    assert_eq!(app.showroom().carousel().active(), 2);

    press(&mut app, KeyCode::Char('9')).await;
    assert_eq!(app.showroom().carousel().active(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_autoplay_reaches_the_screen() {
    let mut app = app();
    app.go_to(Section::Shop);

    settle_one(&mut app).await;

    let text = screen_text(app.render_frame(Instant::now()));
    assert!(text.contains("Casual Jeans"));
    assert!(text.contains("slide 2/5"));
}

// =============================================================================
// Stylist
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_chat_round_trip() {
    let mut app = app();
    app.go_to(Section::Stylist);

    type_text(&mut app, "casual looks?").await;
    assert_eq!(app.showroom().chat().compose(), "casual looks?");

    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.showroom().chat().compose(), "");
    assert_eq!(app.showroom().chat().transcript().len(), 2);

    settle_one(&mut app).await;
    let transcript = app.showroom().chat().transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[2].sender, Sender::Bot);
    assert_eq!(transcript[2].text, SCRIPTED_REPLY);
}

fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

#[tokio::test]
async fn test_control_keys_do_not_type() {
    let mut app = app();
    app.go_to(Section::Stylist);
    type_text(&mut app, "hello").await;
    app.handle_event(ctrl('b')).await;
    assert_eq!(app.showroom().chat().compose(), "hello");
    app.handle_event(ctrl('u')).await;
    assert_eq!(app.showroom().chat().compose(), "");

    app.go_to(Section::Contact);
    type_text(&mut app, "Ada").await;
    app.handle_event(ctrl('b')).await;
    assert_eq!(app.showroom().contact().value(ContactField::Name), "Ada");
    app.handle_event(ctrl('u')).await;
    assert_eq!(app.showroom().contact().value(ContactField::Name), "");
}

#[tokio::test]
async fn test_blank_chat_input_is_ignored() {
    let mut app = app();
    app.go_to(Section::Stylist);

    type_text(&mut app, "   ").await;
    press(&mut app, KeyCode::Enter).await;

    assert_eq!(app.showroom().chat().transcript().len(), 1);
    assert_eq!(app.showroom().chat().pending_replies(), 0);
}

struct Offline;

#[async_trait]
impl Responder for Offline {
    fn name(&self) -> &str {
        "offline"
    }

    async fn respond(&self, _transcript: &[ChatMessage]) -> anyhow::Result<String> {
        anyhow::bail!("no stylist on duty")
    }
}

#[tokio::test(start_paused = true)]
async fn test_responder_failure_shows_toast() {
    let showroom = Showroom::with_responder(ShowroomConfig::default(), Arc::new(Offline));
    let mut app = App::new(showroom, (100, 30));
    app.go_to(Section::Stylist);

    type_text(&mut app, "hello").await;
    press(&mut app, KeyCode::Enter).await;
    settle_one(&mut app).await;

    assert_eq!(app.showroom().chat().transcript().len(), 2);
    let toast = app.toasts().visible().next().expect("a toast");
    assert_eq!(toast.notification.title, "Stylist unavailable");
    assert_eq!(toast.notification.severity, Severity::Destructive);
}

// =============================================================================
// Try-On
// =============================================================================

#[tokio::test]
async fn test_pasted_photo_is_dropped_and_previewed() {
    let file = photo(".png", 2048);
    let mut app = app();

    app.handle_event(Event::Paste(format!("'{}'", file.path().display())))
        .await;
    assert_eq!(app.section(), Section::TryOn);
    assert!(app.showroom().upload().is_uploading());
    assert!(!app.showroom().upload().drop_zone().is_dragging());

    settle_one(&mut app).await;
    let UploadState::Ready(image) = app.showroom().upload().state() else {
        panic!("expected Ready, got {:?}", app.showroom().upload().state());
    };
    assert_eq!(image.mime(), "image/png");
    assert_eq!(image.byte_len(), 2048);

    let titles: Vec<_> = app
        .toasts()
        .visible()
        .map(|t| t.notification.title.clone())
        .collect();
    assert_eq!(titles, vec!["Image uploaded".to_string()]);

    let text = screen_text(app.render_frame(Instant::now()));
    assert!(text.contains("image/png"));
    assert!(text.contains("upload: ready"));
}

#[tokio::test]
async fn test_typed_path_with_wrong_type_is_rejected() {
    let file = photo(".txt", 16);
    let mut app = app();
    app.go_to(Section::TryOn);

    type_text(&mut app, &file.path().display().to_string()).await;
    press(&mut app, KeyCode::Enter).await;
    app.update(Instant::now());

    assert_eq!(app.path_input(), "");
    assert_eq!(app.showroom().upload().state(), &UploadState::Idle);
    let toast = app.toasts().visible().next().expect("a toast");
    assert_eq!(toast.notification.title, "Invalid file type");
}

#[tokio::test]
async fn test_missing_file_reports_upload_failed() {
    let mut app = app();
    app.handle_event(Event::Paste("/definitely/not/here.png".into()))
        .await;
    app.update(Instant::now());

    assert_eq!(app.showroom().upload().state(), &UploadState::Idle);
    assert!(!app.showroom().upload().drop_zone().is_dragging());
    let toast = app.toasts().visible().next().expect("a toast");
    assert_eq!(toast.notification.title, "Upload failed");
}

// =============================================================================
// Contact
// =============================================================================

#[tokio::test]
async fn test_contact_form_typing_and_focus() {
    let mut app = app();
    app.go_to(Section::Contact);

    type_text(&mut app, "Ada").await;
    press(&mut app, KeyCode::Enter).await;
    type_text(&mut app, "ada@example.com").await;
    press(&mut app, KeyCode::Down).await;
    press(&mut app, KeyCode::Down).await;
    type_text(&mut app, "Hi").await;
    press(&mut app, KeyCode::Enter).await;
    type_text(&mut app, "there").await;

    let form = app.showroom().contact();
    assert_eq!(form.value(ContactField::Name), "Ada");
    assert_eq!(form.value(ContactField::Email), "ada@example.com");
    assert_eq!(form.value(ContactField::Subject), "");
    assert_eq!(form.value(ContactField::Message), "Hi\nthere");
}

// =============================================================================
// Toasts and shutdown
// =============================================================================

#[tokio::test]
async fn test_toasts_expire_and_escape_dismisses_then_quits() {
    let mut app = app();
    app.handle_event(Event::Paste("/nope/a.png".into())).await;
    app.handle_event(Event::Paste("/nope/b.png".into())).await;
    let now = Instant::now();
    app.update(now);
    assert_eq!(app.toasts().len(), 2);

    press(&mut app, KeyCode::Esc).await;
    assert_eq!(app.toasts().len(), 1);
    assert!(app.is_running());

    app.update(now + ShowroomConfig::default().toast_duration);
    assert!(app.toasts().is_empty());

    press(&mut app, KeyCode::Esc).await;
    assert!(!app.is_running());
    assert!(!app.showroom().is_mounted());
}

#[tokio::test]
async fn test_ctrl_c_quits() {
    let mut app = app();
    app.handle_event(Event::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    )))
    .await;
    assert!(!app.is_running());
}

#[tokio::test]
async fn test_resize_and_render_every_section() {
    let mut app = app();
    app.handle_event(Event::Resize(120, 40)).await;

    for section in Section::ALL {
        app.go_to(section);
        let buf = app.render_frame(Instant::now() + Duration::from_secs(5));
        assert_eq!(buf.area.width, 120);
        assert_eq!(buf.area.height, 40);
        assert!(screen_text(buf).contains("Tab/F1-F6 sections"));
    }

    app.handle_event(Event::Resize(12, 4)).await;
    app.render_frame(Instant::now());
}
