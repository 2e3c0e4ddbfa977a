//! Speech and camera capabilities.
//!
//! Both are optional collaborators of the [`Session`](crate::session::Session):
//! a missing or refused capability is reported to the user as a card, never
//! as a fatal error. The matcher and classifier do not depend on this module.
//!
//! | Trait | Built-in implementations |
//! |-------|--------------------------|
//! | [`TranscriptionService`] | [`CommandTranscriber`], [`UnsupportedTranscriber`] |
//! | [`CameraService`] | [`FileCamera`] |

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::classifier::{Frame, FrameError};

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("{0} is not supported on this system")]
    Unsupported(&'static str),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("device unavailable: {0}")]
    Unavailable(String),
    #[error("capture failed: {0}")]
    Failed(String),
    #[error(transparent)]
    Frame(#[from] FrameError),
}

// ═══════════════════════════════════════════════════════════════════════
// Transcription
// ═══════════════════════════════════════════════════════════════════════

/// Turns one spoken utterance into text.
///
/// A call runs to completion or error; there is no cancellation.
#[async_trait]
pub trait TranscriptionService: Send + Sync {
    async fn transcribe(&self, lang: &str) -> Result<String, CaptureError>;
}

/// Used when no speech-to-text program is configured.
pub struct UnsupportedTranscriber;

#[async_trait]
impl TranscriptionService for UnsupportedTranscriber {
    async fn transcribe(&self, _lang: &str) -> Result<String, CaptureError> {
        Err(CaptureError::Unsupported("speech recognition"))
    }
}

/// Runs an external speech-to-text program and reads the transcript from
/// its stdout. `{lang}` in any argument is replaced with the language tag.
pub struct CommandTranscriber {
    argv: Vec<String>,
}

impl CommandTranscriber {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    fn args_for(&self, lang: &str) -> Vec<String> {
        self.argv.iter().map(|a| a.replace("{lang}", lang)).collect()
    }
}

#[async_trait]
impl TranscriptionService for CommandTranscriber {
    async fn transcribe(&self, lang: &str) -> Result<String, CaptureError> {
        let args = self.args_for(lang);
        let (program, rest) = args
            .split_first()
            .ok_or(CaptureError::Unsupported("speech recognition"))?;

        tracing::debug!(program = %program, lang, "starting transcription");

        let output = tokio::process::Command::new(program)
            .args(rest)
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CaptureError::Unsupported("speech recognition"),
                ErrorKind::PermissionDenied => CaptureError::PermissionDenied(program.clone()),
                _ => CaptureError::Failed(e.to_string()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CaptureError::Failed(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Camera
// ═══════════════════════════════════════════════════════════════════════

/// A camera stream that can be opened, sampled, and released.
///
/// `capture` requires an open stream. `release` must be safe to call
/// whether or not the stream is open.
#[async_trait]
pub trait CameraService: Send + Sync {
    async fn open(&mut self) -> Result<(), CaptureError>;

    async fn capture(&mut self) -> Result<Frame, CaptureError>;

    fn release(&mut self);

    fn is_open(&self) -> bool;
}

/// Serves a raw RGBA8 frame file as the camera image.
pub struct FileCamera {
    path: PathBuf,
    width: u32,
    height: u32,
    open: bool,
}

impl FileCamera {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
            open: false,
        }
    }

    fn map_io(&self, e: std::io::Error) -> CaptureError {
        let path = self.path.display().to_string();
        match e.kind() {
            ErrorKind::PermissionDenied => CaptureError::PermissionDenied(path),
            ErrorKind::NotFound => CaptureError::Unavailable(format!("{} not found", path)),
            _ => CaptureError::Failed(format!("{}: {}", path, e)),
        }
    }
}

#[async_trait]
impl CameraService for FileCamera {
    async fn open(&mut self) -> Result<(), CaptureError> {
        tokio::fs::File::open(&self.path)
            .await
            .map_err(|e| self.map_io(e))?;
        self.open = true;
        Ok(())
    }

    async fn capture(&mut self) -> Result<Frame, CaptureError> {
        if !self.open {
            return Err(CaptureError::Unavailable("camera is not started".to_string()));
        }
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|e| self.map_io(e))?;
        Ok(Frame::new(self.width, self.height, data)?)
    }

    fn release(&mut self) {
        if self.open {
            tracing::debug!(path = %self.path.display(), "camera released");
        }
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
