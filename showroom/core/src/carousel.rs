//! Carousel Controller
//!
//! Tracks which showcase product is on screen. The index always stays in
//! `[0, len)` and wraps in both directions.
//!
//! While mounted, a recurring autoplay task advances the slide every interval.
//! The task is re-armed after each tick by the scheduler and aborted exactly
//! once on [`CarouselController::unmount`] (or when the controller is dropped).
//! Manual navigation does not reset the autoplay timer.

use std::num::NonZeroUsize;
use std::time::Duration;

use crate::catalog::Product;
use crate::events::ShowroomEvent;
use crate::scheduler::{Scheduler, TaskHandle};

/// Slide index over a fixed, non-empty list
#[derive(Debug)]
pub struct CarouselController {
    len: NonZeroUsize,
    active: usize,
    autoplay: Option<TaskHandle>,
}

impl CarouselController {
    /// Create a controller over `len` slides, starting at slide 0
    #[must_use]
    pub fn new(len: NonZeroUsize) -> Self {
        Self {
            len,
            active: 0,
            autoplay: None,
        }
    }

    /// Create a controller for a product list; `None` if the list is empty
    #[must_use]
    pub fn for_products(products: &[Product]) -> Option<Self> {
        NonZeroUsize::new(products.len()).map(Self::new)
    }

    /// Number of slides
    #[must_use]
    pub fn len(&self) -> usize {
        self.len.get()
    }

    /// Always false; present for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Current slide index
    #[must_use]
    pub fn active(&self) -> usize {
        self.active
    }

    /// The product on the current slide
    ///
    /// # Panics
    ///
    /// Panics if `products` is not the list this controller was sized for.
    #[must_use]
    pub fn active_product<'a>(&self, products: &'a [Product]) -> &'a Product {
        assert_eq!(products.len(), self.len(), "carousel sized for a different list");
        &products[self.active]
    }

    /// Horizontal offset of the slide strip, in percent of one slide width
    #[must_use]
    pub fn slide_offset_percent(&self) -> usize {
        self.active * 100
    }

    /// Move to the next slide, wrapping to the first
    pub fn advance(&mut self) -> usize {
        self.active = (self.active + 1) % self.len.get();
        tracing::debug!(active = self.active, "Carousel advanced");
        self.active
    }

    /// Move to the previous slide, wrapping to the last
    pub fn retreat(&mut self) -> usize {
        let len = self.len.get();
        self.active = (self.active + len - 1) % len;
        tracing::debug!(active = self.active, "Carousel retreated");
        self.active
    }

    /// Jump straight to slide `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`. Callers such as pagination dots produce
    /// valid indices by construction.
    pub fn jump_to(&mut self, index: usize) {
        assert!(
            index < self.len.get(),
            "carousel index {index} out of range for {} slides",
            self.len
        );
        self.active = index;
        tracing::debug!(active = self.active, "Carousel jumped");
    }

    /// Mount the carousel: reset to the first slide and, if `autoplay` is
    /// given, start advancing every interval
    ///
    /// Mounting an already mounted carousel replaces its autoplay task.
    pub fn mount(&mut self, scheduler: &Scheduler, autoplay: Option<Duration>) {
        self.unmount();
        self.active = 0;
        if let Some(interval) = autoplay {
            self.autoplay = Some(scheduler.every(interval, || ShowroomEvent::CarouselTick));
            tracing::info!(interval_ms = interval.as_millis() as u64, "Carousel autoplay started");
        }
    }

    /// Stop autoplay. Returns whether a running timer was stopped.
    pub fn unmount(&mut self) -> bool {
        match self.autoplay.take() {
            Some(handle) => {
                handle.cancel();
                tracing::info!("Carousel autoplay stopped");
                true
            }
            None => false,
        }
    }

    /// Whether the autoplay timer is running
    #[must_use]
    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_some()
    }

    /// Handle an autoplay tick
    ///
    /// A tick that was already queued when autoplay stopped is ignored.
    pub fn on_tick(&mut self) {
        if self.autoplay.is_some() {
            self.advance();
        } else {
            tracing::debug!("Ignoring carousel tick after unmount");
        }
    }
}
