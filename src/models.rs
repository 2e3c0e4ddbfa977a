//! Core data models used throughout Offline Advisor.
//!
//! The four topic datasets are decoded leniently: every field carries
//! `#[serde(default)]` and reads an explicit `null` as the default too, so a
//! dataset missing a collection behaves as if that collection were empty.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four independently loaded knowledge bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Emergency,
    Health,
    Plants,
    Women,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Emergency, Topic::Health, Topic::Plants, Topic::Women];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Emergency => "emergency",
            Topic::Health => "health",
            Topic::Plants => "plants",
            Topic::Women => "women",
        }
    }

    /// File name used by the filesystem and HTTP loaders.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown topic: {}", s))
    }
}

/// `null` decodes to the type's default, the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============ Emergency ============

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct EmergencyData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cpr: CprGuide,
    #[serde(default, rename = "contactsHyderabad", deserialize_with = "null_as_default")]
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct CprGuide {
    #[serde(default, deserialize_with = "null_as_default")]
    pub brief: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detailed: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Contact {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: String,
}

// ============ Health ============

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct HealthData {
    #[serde(default, rename = "generalTips", deserialize_with = "null_as_default")]
    pub general_tips: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub symptoms: Vec<Symptom>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Symptom {
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub advice: String,
}

// ============ Plants ============

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PlantsData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub diseases: Vec<Disease>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Disease {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub signs: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub care: String,
}

// ============ Women's health ============

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct WomenData {
    #[serde(default, rename = "pcodPcos", deserialize_with = "null_as_default")]
    pub pcod_pcos: Vec<String>,
    #[serde(default, rename = "menstrualCare", deserialize_with = "null_as_default")]
    pub menstrual_care: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wellness: Vec<String>,
}

// ============ Matching ============

/// A single piece of advice produced by the matcher for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub area: String,
    pub advice: String,
}

impl MatchResult {
    pub fn new(area: &str, advice: impl Into<String>) -> Self {
        Self {
            area: area.to_string(),
            advice: advice.into(),
        }
    }
}
