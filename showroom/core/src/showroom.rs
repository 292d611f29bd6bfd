//! Showroom Aggregate
//!
//! Owns the three interactive components, the scheduler that runs their
//! deferred work and both receiving channels. The components never call each
//! other; the showroom only hands each completed event back to the component
//! that scheduled it.
//!
//! A surface drives it like this:
//!
//! ```text
//! let mut showroom = Showroom::new(config);
//! showroom.mount();
//! loop {
//!     select! {
//!         input = terminal.next() => { /* call carousel_mut(), chat_mut(), ... */ }
//!         Some(event) = showroom.next_event() => showroom.apply(event),
//!     }
//!     for toast in showroom.drain_notifications() { /* show it */ }
//! }
//! showroom.teardown();
//! ```

use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::carousel::CarouselController;
use crate::catalog::SHOWCASE_LEN;
use crate::chat::{ChatSession, Responder, ScriptedResponder};
use crate::config::ShowroomConfig;
use crate::contact::ContactForm;
use crate::events::ShowroomEvent;
use crate::notify::{Notification, Notifier};
use crate::scheduler::Scheduler;
use crate::upload::{FileCandidate, UploadError, UploadPipeline, UploadTicket};

/// The showroom's interactive state
#[derive(Debug)]
pub struct Showroom {
    config: ShowroomConfig,
    carousel: CarouselController,
    upload: UploadPipeline,
    chat: ChatSession,
    contact: ContactForm,
    scheduler: Scheduler,
    notifier: Notifier,
    events: mpsc::UnboundedReceiver<ShowroomEvent>,
    notifications: mpsc::UnboundedReceiver<Notification>,
    mounted: bool,
}

impl Showroom {
    /// Showroom with the scripted stylist from `config`
    #[must_use]
    pub fn new(config: ShowroomConfig) -> Self {
        let responder = Arc::new(ScriptedResponder::new(config.scripted_reply.clone()));
        Self::with_responder(config, responder)
    }

    /// Showroom with a custom stylist
    #[must_use]
    pub fn with_responder(config: ShowroomConfig, responder: Arc<dyn Responder>) -> Self {
        let (scheduler, events) = Scheduler::channel();
        let (notifier, notifications) = Notifier::channel();

        let carousel = CarouselController::new(SHOWCASE_LEN);
        let upload = UploadPipeline::new(
            scheduler.clone(),
            notifier.clone(),
            config.max_upload_bytes,
        );
        let chat = ChatSession::new(
            scheduler.clone(),
            notifier.clone(),
            responder,
            config.greeting.clone(),
            config.reply_delay,
        );

        Self {
            config,
            carousel,
            upload,
            chat,
            contact: ContactForm::new(),
            scheduler,
            notifier,
            events,
            notifications,
            mounted: false,
        }
    }

    /// Start the carousel (and its autoplay, if enabled)
    pub fn mount(&mut self) {
        self.carousel
            .mount(&self.scheduler, self.config.autoplay_interval());
        self.mounted = true;
        tracing::info!(autoplay = self.config.autoplay, "Showroom mounted");
    }

    /// Stop every timer and in-flight task
    pub fn teardown(&mut self) {
        self.carousel.unmount();
        self.upload.teardown();
        self.chat.teardown();
        if std::mem::replace(&mut self.mounted, false) {
            tracing::info!("Showroom torn down");
        }
    }

    /// Whether [`Self::mount`] has run without a matching teardown
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &ShowroomConfig {
        &self.config
    }

    /// Carousel state
    #[must_use]
    pub fn carousel(&self) -> &CarouselController {
        &self.carousel
    }

    /// Carousel controls
    pub fn carousel_mut(&mut self) -> &mut CarouselController {
        &mut self.carousel
    }

    /// Upload state
    #[must_use]
    pub fn upload(&self) -> &UploadPipeline {
        &self.upload
    }

    /// Upload controls
    pub fn upload_mut(&mut self) -> &mut UploadPipeline {
        &mut self.upload
    }

    /// Chat state
    #[must_use]
    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    /// Chat controls
    pub fn chat_mut(&mut self) -> &mut ChatSession {
        &mut self.chat
    }

    /// Contact form
    #[must_use]
    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    /// Contact form editing
    pub fn contact_mut(&mut self) -> &mut ContactForm {
        &mut self.contact
    }

    /// Upload a file chosen by path (the "Upload Photo" button)
    ///
    /// Refused as busy while another upload is in flight, before the path
    /// is looked at. A path that cannot be inspected is reported as a failed
    /// upload.
    pub async fn pick_path(&mut self, path: impl AsRef<Path>) -> Option<UploadTicket> {
        if self.reject_if_busy(path.as_ref()) {
            return None;
        }
        let candidate = self.candidate_for(path.as_ref()).await?;
        self.upload.submit(candidate).ok()
    }

    /// Upload a file dropped onto the drop area
    pub async fn drop_path(&mut self, path: impl AsRef<Path>) -> Option<UploadTicket> {
        if self.reject_if_busy(path.as_ref()) {
            self.upload.drop_zone_mut().drag_leave();
            return None;
        }
        let Some(candidate) = self.candidate_for(path.as_ref()).await else {
            self.upload.drop_zone_mut().drag_leave();
            return None;
        };
        self.upload.drop_file(candidate).ok()
    }

    fn reject_if_busy(&self, path: &Path) -> bool {
        if !self.upload.is_uploading() {
            return false;
        }
        let err = UploadError::Busy;
        tracing::warn!(path = %path.display(), error = %err, "Upload rejected");
        self.notifier.emit(err.notification());
        true
    }

    async fn candidate_for(&self, path: &Path) -> Option<FileCandidate> {
        match FileCandidate::from_path(path).await {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Cannot open photo");
                self.notifier.emit(Notification::destructive(
                    "Upload failed",
                    "There was an error uploading your image",
                ));
                None
            }
        }
    }

    /// Wait for the next completion from scheduled work
    ///
    /// Never yields `None` while the showroom is alive, since it keeps its
    /// own sender.
    pub async fn next_event(&mut self) -> Option<ShowroomEvent> {
        self.events.recv().await
    }

    /// Take a completion if one is already waiting
    pub fn try_next_event(&mut self) -> Option<ShowroomEvent> {
        self.events.try_recv().ok()
    }

    /// Hand a completion to the component that scheduled it
    pub fn apply(&mut self, event: ShowroomEvent) {
        tracing::trace!(kind = event.kind(), "Applying event");
        match event {
            ShowroomEvent::CarouselTick => self.carousel.on_tick(),
            ShowroomEvent::ChatReply { reply_id, result } => self.chat.on_reply(reply_id, result),
            ShowroomEvent::UploadSettled { ticket, outcome } => {
                self.upload.on_settled(ticket, outcome);
            }
        }
    }

    /// Apply every completion that is already waiting; returns how many
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.try_next_event() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Take every notification emitted since the last call
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        let mut drained = Vec::new();
        while let Ok(notification) = self.notifications.try_recv() {
            drained.push(notification);
        }
        drained
    }
}

impl Drop for Showroom {
    fn drop(&mut self) {
        self.teardown();
    }
}
