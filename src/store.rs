//! The in-memory knowledge store.
//!
//! Holds the four topic datasets for the lifetime of the process. The store
//! is built once by [`KnowledgeStore::load`] and is read-only afterwards;
//! callers pass it around by reference.
//!
//! Loading never fails. A dataset whose loader errors, or whose JSON does not
//! have the expected shape, is replaced by an empty dataset and a warning is
//! logged. The matcher therefore only ever sees well-formed (possibly empty)
//! collections.

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::loader::DatasetLoader;
use crate::models::{EmergencyData, HealthData, PlantsData, Topic, WomenData};

/// How a topic ended up in the store.
#[derive(Debug, Clone, Serialize)]
pub struct TopicStatus {
    pub topic: String,
    /// `true` when the loader produced a usable dataset.
    pub loaded: bool,
    /// Number of top-level entries (tips, symptoms, diseases, ...).
    pub entries: usize,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    pub emergency: EmergencyData,
    pub health: HealthData,
    pub plants: PlantsData,
    pub women: WomenData,
    loader_name: String,
    failures: Vec<(Topic, String)>,
}

impl KnowledgeStore {
    /// Build a store directly from already-decoded datasets.
    pub fn from_parts(
        emergency: EmergencyData,
        health: HealthData,
        plants: PlantsData,
        women: WomenData,
    ) -> Self {
        Self {
            emergency,
            health,
            plants,
            women,
            loader_name: "memory".to_string(),
            failures: Vec::new(),
        }
    }

    /// Load all four topics concurrently through `loader`.
    pub async fn load(loader: &dyn DatasetLoader) -> Self {
        let (emergency, health, plants, women) = tokio::join!(
            loader.load(Topic::Emergency),
            loader.load(Topic::Health),
            loader.load(Topic::Plants),
            loader.load(Topic::Women),
        );

        let mut failures = Vec::new();
        let emergency: EmergencyData = decode_or_empty(Topic::Emergency, emergency, &mut failures);
        let health: HealthData = decode_or_empty(Topic::Health, health, &mut failures);
        let plants: PlantsData = decode_or_empty(Topic::Plants, plants, &mut failures);
        let women: WomenData = decode_or_empty(Topic::Women, women, &mut failures);

        tracing::debug!(
            loader = loader.name(),
            symptoms = health.symptoms.len(),
            diseases = plants.diseases.len(),
            failed = failures.len(),
            "knowledge store loaded"
        );

        Self {
            emergency,
            health,
            plants,
            women,
            loader_name: loader.name().to_string(),
            failures,
        }
    }

    pub fn loader_name(&self) -> &str {
        &self.loader_name
    }

    /// Per-topic load status, in [`Topic::ALL`] order.
    pub fn statuses(&self) -> Vec<TopicStatus> {
        Topic::ALL
            .into_iter()
            .map(|topic| {
                let failure = self
                    .failures
                    .iter()
                    .find(|(t, _)| *t == topic)
                    .map(|(_, msg)| msg.clone());
                TopicStatus {
                    topic: topic.to_string(),
                    loaded: failure.is_none(),
                    entries: self.entry_count(topic),
                    notes: failure,
                }
            })
            .collect()
    }

    fn entry_count(&self, topic: Topic) -> usize {
        match topic {
            Topic::Emergency => {
                self.emergency.cpr.brief.len()
                    + self.emergency.cpr.detailed.len()
                    + self.emergency.contacts.len()
            }
            Topic::Health => self.health.general_tips.len() + self.health.symptoms.len(),
            Topic::Plants => self.plants.diseases.len(),
            Topic::Women => {
                self.women.pcod_pcos.len()
                    + self.women.menstrual_care.len()
                    + self.women.wellness.len()
            }
        }
    }
}

fn decode_or_empty<T: DeserializeOwned + Default>(
    topic: Topic,
    loaded: Result<Value>,
    failures: &mut Vec<(Topic, String)>,
) -> T {
    let decoded = loaded.and_then(|value| {
        // A dataset that is `null` as a whole decodes like one with every field absent.
        let value = if value.is_null() {
            Value::Object(Default::default())
        } else {
            value
        };
        serde_json::from_value::<T>(value).map_err(anyhow::Error::from)
    });

    match decoded {
        Ok(data) => data,
        Err(e) => {
            let msg = format!("{:#}", e);
            tracing::warn!(topic = %topic, error = %msg, "dataset unavailable, using empty");
            failures.push((topic, msg));
            T::default()
        }
    }
}
