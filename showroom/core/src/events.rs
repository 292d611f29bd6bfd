//! Showroom Events
//!
//! Completions produced by deferred work (timers, file decoding) and delivered
//! back to the event loop. A scheduled task never mutates component state
//! itself; it only yields one of these, and the [`Showroom`](crate::Showroom)
//! routes it to the component that scheduled it.

use crate::chat::ReplyId;
use crate::upload::{DecodeError, ImageData, UploadTicket};

/// Events from scheduled tasks back to the event loop
#[derive(Debug)]
pub enum ShowroomEvent {
    /// The carousel autoplay interval elapsed
    CarouselTick,

    /// A scheduled stylist reply is ready to be appended
    ChatReply {
        /// Which pending reply this is
        reply_id: ReplyId,
        /// Reply text, or the responder's error description
        result: Result<String, String>,
    },

    /// An upload finished reading and encoding
    UploadSettled {
        /// Ticket issued when the upload was accepted
        ticket: UploadTicket,
        /// The encoded image, or why decoding failed
        outcome: Result<ImageData, DecodeError>,
    },
}

impl ShowroomEvent {
    /// Short name for log lines
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CarouselTick => "carousel_tick",
            Self::ChatReply { .. } => "chat_reply",
            Self::UploadSettled { .. } => "upload_settled",
        }
    }
}
