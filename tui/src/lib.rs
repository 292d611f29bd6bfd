//! MiRRA TUI - Terminal showroom for MiRRA
//!
//! A full-screen rendition of the MiRRA page: hero banner with sparkles,
//! overview, virtual try-on upload, smart stylist chat, product carousel and
//! contact form.
//!
//! # Architecture
//!
//! The TUI is a thin surface over `mirra-core`. All interaction state lives
//! in the core's [`mirra_core::Showroom`]; this crate maps terminal input to
//! showroom calls and draws what it reads back.
//!
//! - **App**: event loop, key/mouse/paste handling, layer layout
//! - **Compositor**: layered rendering with z-ordering
//! - **Page**: per-section drawing
//! - **Widgets**: carousel, chat transcript, sparkles
//! - **Toast**: on-screen notifications with expiry
//!
//! ## Event Flow
//!
//! ```text
//! Terminal Events -> App -> Showroom calls
//! Scheduled work -> ShowroomEvent -> Showroom::apply -> Render
//! Notifications -> ToastStack -> Render
//! ```

pub mod app;
pub mod compositor;
pub mod page;
pub mod theme;
pub mod toast;
pub mod widgets;

pub use app::App;
