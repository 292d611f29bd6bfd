//! Try-On Photo Upload Pipeline
//!
//! Turns a user-chosen file into a displayable preview:
//!
//! ```text
//! submit(file)
//!   ├─ Uploading already?    → Err(Busy)          state unchanged
//!   ├─ mime !~ "image/*"     → Err(InvalidType)   state unchanged
//!   ├─ size > limit          → Err(TooLarge)      state unchanged
//!   └─ ok                    → Uploading ── read + base64 (async) ──┐
//!                                                                   │
//! on_settled(ticket, outcome) ◄─────────── ShowroomEvent ───────────┘
//!   ├─ Ok(image)  → Ready(image)   "Image uploaded"
//!   └─ Err(e)     → Failed(reason) "Upload failed"
//! ```
//!
//! File-picker selection and drag-and-drop share [`UploadPipeline::submit`].
//! The [`DropZone`] hover flag is purely visual and never feeds validation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;
use tokio::io::AsyncReadExt;

use crate::events::ShowroomEvent;
use crate::notify::{Notification, Notifier};
use crate::scheduler::{Scheduler, TaskHandle};

/// Largest accepted photo, in bytes (5 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// MIME used when the extension gives nothing better
const FALLBACK_MIME: &str = "application/octet-stream";

// ============================================================================
// Errors
// ============================================================================

/// Why a file was refused before decoding started
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    /// The MIME type is not `image/*`
    #[error("unsupported file type `{mime}`")]
    InvalidType {
        /// The offending MIME type
        mime: String,
    },

    /// The file exceeds the size cap
    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge {
        /// Size of the file
        size: u64,
        /// Configured limit
        limit: u64,
    },

    /// Another upload is still decoding
    #[error("an upload is already in progress")]
    Busy,
}

impl UploadError {
    /// The toast shown for this rejection
    #[must_use]
    pub fn notification(&self) -> Notification {
        match self {
            Self::InvalidType { .. } => Notification::destructive(
                "Invalid file type",
                "Please upload an image file (JPEG, PNG, etc.)",
            ),
            Self::TooLarge { limit, .. } => Notification::destructive(
                "File too large",
                format!("Please upload an image smaller than {}", display_size(*limit)),
            ),
            Self::Busy => Notification::destructive(
                "Upload in progress",
                "Please wait for the current photo to finish uploading",
            ),
        }
    }
}

/// Human-readable size for toasts: `5MB`, `512KB` or `1000 bytes`
fn display_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;
    match bytes {
        0 => "0 bytes".to_string(),
        b if b % MIB == 0 => format!("{}MB", b / MIB),
        b if b % KIB == 0 => format!("{}KB", b / KIB),
        b => format!("{b} bytes"),
    }
}

/// Why reading or encoding a file failed
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The bytes could not be read
    #[error("failed to read image: {0}")]
    Read(String),

    /// The file grew past the cap after it was accepted
    #[error("image exceeds the {limit} byte limit")]
    Oversized {
        /// Configured limit
        limit: u64,
    },

    /// A data URI did not have the `data:<mime>;base64,<payload>` shape
    #[error("malformed data URI: {0}")]
    MalformedUri(String),
}

// ============================================================================
// Input
// ============================================================================

/// Where a candidate's bytes come from
#[derive(Clone, Debug)]
pub enum FileSource {
    /// Bytes already in memory
    Memory(Arc<[u8]>),
    /// A file on disk, read when decoding starts
    Path(PathBuf),
}

/// A file offered for upload
#[derive(Clone, Debug)]
pub struct FileCandidate {
    /// File name for logs and display
    pub name: String,
    /// Declared MIME type
    pub mime: String,
    /// Declared size in bytes
    pub size: u64,
    /// Byte source
    pub source: FileSource,
}

impl FileCandidate {
    /// Candidate backed by in-memory bytes
    pub fn from_bytes(
        name: impl Into<String>,
        mime: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            mime: mime.into(),
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    /// Candidate for a file on disk
    ///
    /// Size comes from the file's metadata and the MIME type is guessed from
    /// its extension.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the path cannot be inspected or is not a file.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            ));
        }

        let mime = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(FALLBACK_MIME)
            .to_string();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("photo")
            .to_string();

        Ok(Self {
            name,
            mime,
            size: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    /// Read the bytes, never more than one past `limit`
    async fn read(&self, limit: u64) -> Result<Arc<[u8]>, DecodeError> {
        let bytes = match &self.source {
            FileSource::Memory(bytes) => Arc::clone(bytes),
            FileSource::Path(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .map_err(|e| DecodeError::Read(e.to_string()))?;
                let mut bytes = Vec::new();
                file.take(limit.saturating_add(1))
                    .read_to_end(&mut bytes)
                    .await
                    .map_err(|e| DecodeError::Read(e.to_string()))?;
                Arc::from(bytes)
            }
        };
        if bytes.len() as u64 > limit {
            return Err(DecodeError::Oversized { limit });
        }
        Ok(bytes)
    }
}

// ============================================================================
// Output
// ============================================================================

/// An accepted photo, encoded as a self-contained data URI
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageData {
    mime: String,
    byte_len: usize,
    uri: String,
}

impl ImageData {
    /// Encode raw bytes as `data:<mime>;base64,<payload>`
    #[must_use]
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        let uri = format!("data:{mime};base64,{}", STANDARD.encode(bytes));
        Self {
            mime: mime.to_string(),
            byte_len: bytes.len(),
            uri,
        }
    }

    /// The data URI
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// MIME type of the image
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Size of the original bytes
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Recover the original bytes from the data URI
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MalformedUri`] if the URI is not base64 data.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, DecodeError> {
        let rest = self
            .uri
            .strip_prefix("data:")
            .ok_or_else(|| DecodeError::MalformedUri("missing `data:` scheme".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| DecodeError::MalformedUri("missing `,` separator".into()))?;
        if !header.ends_with(";base64") {
            return Err(DecodeError::MalformedUri("payload is not base64".into()));
        }
        STANDARD
            .decode(payload)
            .map_err(|e| DecodeError::MalformedUri(e.to_string()))
    }
}

// ============================================================================
// State
// ============================================================================

/// Where the pipeline is
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum UploadState {
    /// Nothing uploaded yet
    #[default]
    Idle,
    /// Reading and encoding the accepted file
    Uploading,
    /// The most recent upload, ready to display
    Ready(ImageData),
    /// The most recent upload failed
    Failed(String),
}

impl UploadState {
    /// Short label for status lines
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Uploading => "uploading",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

/// Identifies one accepted upload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UploadTicket(u64);

/// Drag-over affordance for the drop area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropZone {
    dragging: bool,
}

impl DropZone {
    /// Something is being dragged over the zone
    pub fn drag_enter(&mut self) {
        self.dragging = true;
    }

    /// The drag left the zone
    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Whether to show the "drop your photo here" highlight
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

/// Validates and decodes try-on photos, one at a time
#[derive(Debug)]
pub struct UploadPipeline {
    state: UploadState,
    max_bytes: u64,
    drop_zone: DropZone,
    scheduler: Scheduler,
    notifier: Notifier,
    next_ticket: u64,
    in_flight: Option<(UploadTicket, TaskHandle)>,
}

impl UploadPipeline {
    /// Create an idle pipeline accepting files up to `max_bytes`
    #[must_use]
    pub fn new(scheduler: Scheduler, notifier: Notifier, max_bytes: u64) -> Self {
        Self {
            state: UploadState::Idle,
            max_bytes,
            drop_zone: DropZone::default(),
            scheduler,
            notifier,
            next_ticket: 0,
            in_flight: None,
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// The image to display, if one is ready
    #[must_use]
    pub fn preview(&self) -> Option<&ImageData> {
        match &self.state {
            UploadState::Ready(image) => Some(image),
            _ => None,
        }
    }

    /// Whether a decode is in flight
    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.state == UploadState::Uploading
    }

    /// Configured size cap
    #[must_use]
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// The drop area's hover flag
    #[must_use]
    pub fn drop_zone(&self) -> &DropZone {
        &self.drop_zone
    }

    /// Mutable access to the drop area's hover flag
    pub fn drop_zone_mut(&mut self) -> &mut DropZone {
        &mut self.drop_zone
    }

    /// Check a candidate without starting anything
    ///
    /// # Errors
    ///
    /// [`UploadError::Busy`] while uploading, then [`UploadError::InvalidType`]
    /// and [`UploadError::TooLarge`] in that order.
    pub fn validate(&self, file: &FileCandidate) -> Result<(), UploadError> {
        if self.is_uploading() {
            return Err(UploadError::Busy);
        }
        if !file.mime.starts_with("image/") {
            return Err(UploadError::InvalidType {
                mime: file.mime.clone(),
            });
        }
        if file.size > self.max_bytes {
            return Err(UploadError::TooLarge {
                size: file.size,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }

    /// Submit a file from the picker
    ///
    /// On acceptance the state becomes [`UploadState::Uploading`] and the
    /// outcome arrives later as [`ShowroomEvent::UploadSettled`].
    ///
    /// # Errors
    ///
    /// Any [`UploadError`] from [`Self::validate`]; a matching notification
    /// has already been emitted and the state is left untouched.
    pub fn submit(&mut self, file: FileCandidate) -> Result<UploadTicket, UploadError> {
        if let Err(err) = self.validate(&file) {
            tracing::warn!(file = %file.name, error = %err, "Upload rejected");
            self.notifier.emit(err.notification());
            return Err(err);
        }

        let ticket = UploadTicket(self.next_ticket);
        self.next_ticket += 1;

        tracing::debug!(file = %file.name, size = file.size, mime = %file.mime, "Upload accepted");
        self.state = UploadState::Uploading;

        let limit = self.max_bytes;
        let handle = self.scheduler.spawn(async move {
            let outcome = file
                .read(limit)
                .await
                .map(|bytes| ImageData::encode(&file.mime, &bytes));
            ShowroomEvent::UploadSettled { ticket, outcome }
        });
        self.in_flight = Some((ticket, handle));

        Ok(ticket)
    }

    /// Submit a file dropped onto the drop area
    ///
    /// Clears the hover flag, then behaves exactly like [`Self::submit`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit`].
    pub fn drop_file(&mut self, file: FileCandidate) -> Result<UploadTicket, UploadError> {
        self.drop_zone.drag_leave();
        self.submit(file)
    }

    /// Apply a decode completion
    ///
    /// Completions for anything but the in-flight ticket are ignored.
    pub fn on_settled(&mut self, ticket: UploadTicket, outcome: Result<ImageData, DecodeError>) {
        match &self.in_flight {
            Some((current, _)) if *current == ticket => {}
            _ => {
                tracing::debug!(?ticket, "Ignoring stale upload completion");
                return;
            }
        }
        self.in_flight = None;

        match outcome {
            Ok(image) => {
                tracing::info!(bytes = image.byte_len(), mime = image.mime(), "Upload ready");
                self.state = UploadState::Ready(image);
                self.notifier.emit(Notification::info(
                    "Image uploaded",
                    "Your photo has been uploaded successfully",
                ));
            }
            Err(err) => {
                tracing::warn!(error = %err, "Upload failed");
                self.state = UploadState::Failed(err.to_string());
                self.notifier.emit(Notification::destructive(
                    "Upload failed",
                    "There was an error uploading your image",
                ));
            }
        }
    }

    /// Cancel any in-flight decode and return to idle if it was uploading
    pub fn teardown(&mut self) {
        if let Some((ticket, handle)) = self.in_flight.take() {
            handle.cancel();
            tracing::info!(?ticket, "Cancelled in-flight upload");
        }
        if self.is_uploading() {
            self.state = UploadState::Idle;
        }
        self.drop_zone.drag_leave();
    }
}
