//! Integration tests for the extension traits.
//!
//! These tests plug custom `DatasetLoader`, `TranscriptionService`, and
//! `CameraService` implementations into the public API and check that they
//! flow through the store, matcher, classifier, and session end-to-end.

use anyhow::{bail, Result};
use async_trait::async_trait;
use offline_advisor::advice::CardBody;
use offline_advisor::capture::{CameraService, CaptureError, TranscriptionService};
use offline_advisor::classifier::Frame;
use offline_advisor::loader::{DatasetLoader, FallbackLoader};
use offline_advisor::matcher::{search, AREA_MEDICAL, AREA_PLANTS};
use offline_advisor::models::{MatchResult, Topic};
use offline_advisor::session::{InputMode, Session};
use offline_advisor::store::KnowledgeStore;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

// ─── Test Loaders ───────────────────────────────────────────────────

/// Serves fixed JSON and counts how often each topic is requested.
struct InMemoryLoader {
    calls: AtomicUsize,
}

impl InMemoryLoader {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DatasetLoader for InMemoryLoader {
    fn name(&self) -> &str {
        "inmemory"
    }

    async fn load(&self, topic: Topic) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(match topic {
            Topic::Health => json!({
                "symptoms": [
                    { "keywords": ["chest pain"], "advice": "Call emergency services" },
                    { "advice": "Symptom without keywords never matches" }
                ]
            }),
            Topic::Plants => json!({
                "diseases": [
                    { "name": "Rust", "signs": "orange pustules", "care": "Remove leaves" },
                    { "name": "Wilt", "care": "Water deeply" }
                ]
            }),
            Topic::Women => json!({ "pcodPcos": ["Stay active", "Sleep well"] }),
            Topic::Emergency => json!({}),
        })
    }
}

struct OfflineLoader;

#[async_trait]
impl DatasetLoader for OfflineLoader {
    fn name(&self) -> &str {
        "offline"
    }

    async fn load(&self, _topic: Topic) -> Result<Value> {
        bail!("fetch blocked")
    }
}

// ─── Test Capabilities ──────────────────────────────────────────────

struct ScriptedTranscriber(&'static str);

#[async_trait]
impl TranscriptionService for ScriptedTranscriber {
    async fn transcribe(&self, _lang: &str) -> Result<String, CaptureError> {
        Ok(self.0.to_string())
    }
}

/// Camera whose frames are `green` green pixels out of 100.
struct SyntheticCamera {
    green: usize,
    open: bool,
}

#[async_trait]
impl CameraService for SyntheticCamera {
    async fn open(&mut self) -> Result<(), CaptureError> {
        self.open = true;
        Ok(())
    }

    async fn capture(&mut self) -> Result<Frame, CaptureError> {
        let mut data = Vec::with_capacity(400);
        for i in 0..100 {
            let px: [u8; 4] = if i < self.green {
                [30, 160, 40, 255]
            } else {
                [120, 120, 120, 255]
            };
            data.extend_from_slice(&px);
        }
        Ok(Frame::new(10, 10, data)?)
    }

    fn release(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_custom_loader_feeds_matcher() {
    let loader = InMemoryLoader::new();
    let store = KnowledgeStore::load(&loader).await;
    assert_eq!(loader.calls.load(Ordering::SeqCst), 4);
    assert_eq!(store.loader_name(), "inmemory");

    assert_eq!(
        search(&store, "sudden chest pain"),
        vec![MatchResult::new(AREA_MEDICAL, "Call emergency services")]
    );

    // "leaf" selects every disease, including one without signs
    let plants = search(&store, "brown leaf");
    assert_eq!(
        plants,
        vec![
            MatchResult::new(AREA_PLANTS, "Rust: Remove leaves"),
            MatchResult::new(AREA_PLANTS, "Wilt: Water deeply"),
        ]
    );
}

#[tokio::test]
async fn test_offline_loader_yields_empty_store() {
    let store = KnowledgeStore::load(&OfflineLoader).await;
    assert!(search(&store, "pcos period leaf chest pain").is_empty());
    assert!(store.statuses().iter().all(|s| !s.loaded && s.entries == 0));
}

#[tokio::test]
async fn test_fallback_loader_with_custom_primary() {
    let loader = FallbackLoader::new(Box::new(OfflineLoader), Box::new(InMemoryLoader::new()));
    let store = KnowledgeStore::load(&loader).await;
    assert_eq!(store.loader_name(), "offline+inmemory");
    assert_eq!(store.women.pcod_pcos, vec!["Stay active", "Sleep well"]);
    assert!(store.statuses().iter().all(|s| s.loaded));
}

#[tokio::test]
async fn test_voice_session_with_custom_transcriber() {
    let store = KnowledgeStore::load(&InMemoryLoader::new()).await;
    let mut session = Session::new(&store);

    let card = session
        .record_voice(&ScriptedTranscriber("Is PCOS treatable?"), "en-IN")
        .await
        .unwrap();
    assert_eq!(session.mode(), InputMode::Voice);
    assert_eq!(
        card.body,
        CardBody::Lines(vec![
            "Women (PCOS): Stay active".to_string(),
            "Women (PCOS): Sleep well".to_string(),
        ])
    );
}

#[tokio::test]
async fn test_image_session_threshold() {
    let store = KnowledgeStore::load(&InMemoryLoader::new()).await;
    let mut session = Session::new(&store);

    let mut at_threshold = SyntheticCamera {
        green: 25,
        open: false,
    };
    session.start_camera(&mut at_threshold).await.unwrap();
    let card = session.capture_and_identify(&mut at_threshold).await;
    assert_eq!(card.title, "Could Not Identify");
    session.stop_camera(&mut at_threshold);
    assert!(!at_threshold.is_open());

    let mut above = SyntheticCamera {
        green: 26,
        open: false,
    };
    session.start_camera(&mut above).await.unwrap();
    let card = session.capture_and_identify(&mut above).await;
    assert_eq!(card.title, "Plant Identified (Offline Heuristic)");

    session.close(Some(&mut above as &mut dyn CameraService));
    assert!(!above.open);
}
