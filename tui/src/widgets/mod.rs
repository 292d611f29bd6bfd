//! Showroom Widgets

mod carousel;
mod sparkles;
mod transcript;

pub use carousel::ProductCarousel;
pub use sparkles::{Sparkle, SparkleField};
pub use transcript::{Transcript, TranscriptState};
