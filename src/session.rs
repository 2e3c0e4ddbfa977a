//! Interactive session state.
//!
//! A [`Session`] is the explicit context that ties user actions to the
//! store: it tracks the active input mode (exactly one of text, voice, or
//! image) and whether a voice recording is in progress. Camera streams are
//! owned by the [`CameraService`] and released through the session on
//! [`Session::close`]. Every action returns the [`AdviceCard`] to show.

use crate::advice::{self, AdviceCard};
use crate::capture::{CameraService, CaptureError, TranscriptionService};
use crate::classifier;
use crate::matcher;
use crate::store::KnowledgeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Text,
    Voice,
    Image,
}

pub struct Session<'a> {
    store: &'a KnowledgeStore,
    mode: InputMode,
    recording: bool,
}

impl<'a> Session<'a> {
    pub fn new(store: &'a KnowledgeStore) -> Self {
        Self {
            store,
            mode: InputMode::default(),
            recording: false,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        if self.mode != mode {
            tracing::debug!(from = ?self.mode, to = ?mode, "input mode changed");
        }
        self.mode = mode;
    }

    /// Match free text. Blank input is rejected with `None`.
    pub fn submit(&self, text: &str) -> Option<AdviceCard> {
        let content = text.trim();
        if content.is_empty() {
            return None;
        }
        let found = matcher::search(self.store, content);
        tracing::info!(query = content, matches = found.len(), "query matched");
        Some(advice::search_card(&found))
    }

    /// Record one utterance and answer it.
    ///
    /// Returns `None` if the transcript is blank. The recording flag is
    /// cleared even when the returned future is dropped mid-transcription.
    pub async fn record_voice(
        &mut self,
        transcriber: &dyn TranscriptionService,
        lang: &str,
    ) -> Option<AdviceCard> {
        self.set_mode(InputMode::Voice);

        let result = {
            let _recording = RecordingFlag::raise(&mut self.recording);
            transcriber.transcribe(lang).await
        };

        match result {
            Ok(transcript) => {
                tracing::debug!(transcript = %transcript, "voice transcript received");
                self.submit(&transcript)
            }
            Err(CaptureError::Unsupported(_)) => Some(advice::voice_unsupported_card()),
            Err(e) => {
                tracing::warn!(error = %e, "transcription failed");
                Some(advice::voice_failed_card(&e.to_string()))
            }
        }
    }

    /// Open the camera. On failure the card explaining why is returned.
    pub async fn start_camera(
        &mut self,
        camera: &mut dyn CameraService,
    ) -> Result<(), AdviceCard> {
        self.set_mode(InputMode::Image);
        camera.open().await.map_err(camera_error_card)
    }

    /// Grab a frame, run the green heuristic, and describe the result.
    pub async fn capture_and_identify(&mut self, camera: &mut dyn CameraService) -> AdviceCard {
        self.set_mode(InputMode::Image);
        let frame = match camera.capture().await {
            Ok(frame) => frame,
            Err(e) => return camera_error_card(e),
        };

        let analysis = classifier::analyze(frame.pixels());
        tracing::info!(
            width = frame.width(),
            height = frame.height(),
            green = analysis.green,
            total = analysis.total,
            ratio = analysis.ratio,
            plant_like = analysis.plant_like,
            "frame classified"
        );
        advice::identify_card(analysis.plant_like, self.store)
    }

    pub fn stop_camera(&mut self, camera: &mut dyn CameraService) {
        camera.release();
    }

    /// Release held resources when the user leaves.
    pub fn close(mut self, camera: Option<&mut dyn CameraService>) {
        if let Some(camera) = camera {
            self.stop_camera(camera);
        }
        self.set_mode(InputMode::Text);
    }
}

/// Holds the recording flag up until dropped.
struct RecordingFlag<'f>(&'f mut bool);

impl<'f> RecordingFlag<'f> {
    fn raise(flag: &'f mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for RecordingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

fn camera_error_card(e: CaptureError) -> AdviceCard {
    match e {
        CaptureError::PermissionDenied(_) => advice::camera_permission_card(),
        other => {
            tracing::warn!(error = %other, "camera error");
            advice::camera_unavailable_card(&other.to_string())
        }
    }
}
