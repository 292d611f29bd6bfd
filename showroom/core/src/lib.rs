//! MiRRA Core - Headless Showroom Interaction State
//!
//! This crate owns the interactive state behind the MiRRA showroom page,
//! completely independent of any UI framework. A surface (the terminal UI,
//! a test harness, anything else) forwards user actions in and renders the
//! state it reads back out.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         UI Surface                            │
//! │     keys / paste / mouse          render state + toasts       │
//! └───────────────┬──────────────────────────────▲───────────────┘
//!                 │ direct calls                 │ Notification
//! ┌───────────────▼──────────────────────────────┴───────────────┐
//! │                          Showroom                             │
//! │  ┌────────────┐  ┌────────────────┐  ┌────────────────────┐  │
//! │  │  Carousel  │  │ UploadPipeline │  │    ChatSession     │  │
//! │  │ Controller │  │  (+ DropZone)  │  │ (+ Responder)      │  │
//! │  └─────▲──────┘  └───────▲────────┘  └─────────▲──────────┘  │
//! │        └─────────────────┼─────────────────────┘             │
//! │                    ShowroomEvent                              │
//! │                          │                                    │
//! │                    ┌─────┴─────┐                              │
//! │                    │ Scheduler │  timers + async decode       │
//! │                    └───────────┘                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deferred work never touches component state directly. A scheduled task
//! only produces a [`ShowroomEvent`]; the surface's event loop receives it and
//! hands it back to the [`Showroom`], which routes it to the owning component.
//! Every scheduled task is held through a [`TaskHandle`] that aborts the task
//! when cancelled or dropped.
//!
//! # Module Overview
//!
//! - [`carousel`]: slide index over the showcase products, with autoplay
//! - [`upload`]: try-on photo validation and data URI decoding
//! - [`chat`]: append-only stylist transcript with a delayed scripted reply
//! - [`scheduler`]: cancellable one-shot, recurring and async tasks
//! - [`notify`]: user-facing toast notifications
//! - [`catalog`]: the fixed product lists
//! - [`sections`]: page sections and static copy
//! - [`reveal`]: keyframe and fade-in timing
//! - [`contact`]: the (non-submitting) contact form
//! - [`config`]: TOML / environment / CLI configuration
//! - [`showroom`]: aggregate that owns the components and channels
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod carousel;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod contact;
pub mod events;
pub mod notify;
pub mod reveal;
pub mod scheduler;
pub mod sections;
pub mod showroom;
pub mod upload;

// Re-exports for convenience
pub use carousel::CarouselController;
pub use catalog::{Product, RECOMMENDED, SHOWCASE, SHOWCASE_LEN};
pub use chat::{ChatMessage, ChatSession, ReplyId, Responder, ScriptedResponder, Sender};
pub use config::{
    default_config_path, load_config, load_config_from_path, load_config_with_env, ConfigError,
    ConfigOverrides, ConfigSource, ShowroomConfig, ShowroomToml,
};
pub use contact::{ContactField, ContactForm};
pub use events::ShowroomEvent;
pub use notify::{Notification, Notifier, Severity};
pub use reveal::{EasingFunction, FadeIn, Keyframes};
pub use scheduler::{Scheduler, TaskHandle};
pub use sections::Section;
pub use showroom::Showroom;
pub use upload::{
    DecodeError, DropZone, FileCandidate, FileSource, ImageData, UploadError, UploadPipeline,
    UploadState, UploadTicket, MAX_UPLOAD_BYTES,
};
