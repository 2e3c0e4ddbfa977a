//! Advice cards: what gets shown to the user.
//!
//! Every user-facing outcome, including the fallbacks (no match, image not
//! identifiable, capability missing), is an [`AdviceCard`]. Cards render to
//! the terminal via `Display` and to JSON via `Serialize`.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::models::MatchResult;
use crate::store::KnowledgeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Info,
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "value")]
pub enum CardBody {
    Lines(Vec<String>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdviceCard {
    pub title: String,
    pub body: CardBody,
    pub tags: Vec<String>,
    pub kind: CardKind,
    /// Display-only confidence badge, in percent.
    pub confidence: Option<u8>,
}

impl AdviceCard {
    fn new(title: &str, body: CardBody, tags: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            body,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            kind: CardKind::Info,
            confidence: None,
        }
    }

    fn warn(mut self) -> Self {
        self.kind = CardKind::Warn;
        self
    }

    fn with_confidence(mut self, confidence: u8) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

impl fmt::Display for AdviceCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.kind {
            CardKind::Info => "[i]",
            CardKind::Warn => "[!]",
        };
        write!(f, "{} {}", marker, self.title)?;
        if let Some(c) = self.confidence {
            write!(f, "  ({}% confidence)", c)?;
        }
        writeln!(f)?;

        match &self.body {
            CardBody::Lines(lines) => {
                for line in lines {
                    if line.is_empty() {
                        writeln!(f)?;
                    } else {
                        writeln!(f, "  - {}", line)?;
                    }
                }
            }
            CardBody::Text(text) => writeln!(f, "  {}", text)?,
        }

        if !self.tags.is_empty() {
            writeln!(f, "  tags: {}", self.tags.join(", "))?;
        }
        Ok(())
    }
}

/// Browsable categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Medical,
    Plant,
    Women,
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "medical" => Ok(Category::Medical),
            "plant" | "plants" => Ok(Category::Plant),
            "women" => Ok(Category::Women),
            other => Err(format!(
                "unknown category: {}. Use medical, plant, or women.",
                other
            )),
        }
    }
}

// ============ Emergency ============

/// Brief CPR steps followed by the detailed guide.
pub fn cpr_cards(store: &KnowledgeStore) -> [AdviceCard; 2] {
    let cpr = &store.emergency.cpr;
    [
        AdviceCard::new(
            "CPR: Brief Steps",
            CardBody::Lines(cpr.brief.clone()),
            &["Emergency", "CPR", "Immediate Action"],
        )
        .warn()
        .with_confidence(98),
        AdviceCard::new(
            "CPR: Detailed Guide",
            CardBody::Lines(cpr.detailed.clone()),
            &["CPR", "Detailed"],
        )
        .with_confidence(96),
    ]
}

pub fn contacts_card(store: &KnowledgeStore) -> AdviceCard {
    let lines = store
        .emergency
        .contacts
        .iter()
        .map(|c| format!("{}: {}", c.name, c.number))
        .collect();
    AdviceCard::new(
        "Emergency Contacts (Hyderabad / India)",
        CardBody::Lines(lines),
        &["112", "100", "108", "101", "102", "1091", "1098"],
    )
}

// ============ Categories ============

pub fn category_card(store: &KnowledgeStore, category: Category) -> AdviceCard {
    match category {
        Category::Medical => AdviceCard::new(
            "General Medical Guidance",
            CardBody::Lines(store.health.general_tips.clone()),
            &["Medical", "General"],
        ),
        Category::Plant => {
            let lines = store
                .plants
                .diseases
                .iter()
                .map(|d| format!("{} ({}). Care: {}", d.name, d.signs, d.care))
                .collect();
            AdviceCard::new(
                "Common Plant Diseases & Care",
                CardBody::Lines(lines),
                &["Plants", "Care"],
            )
        }
        Category::Women => {
            let w = &store.women;
            let mut lines = vec!["PCOD/PCOS:".to_string()];
            lines.extend(w.pcod_pcos.iter().cloned());
            lines.push(String::new());
            lines.push("Menstrual Care:".to_string());
            lines.extend(w.menstrual_care.iter().cloned());
            lines.push(String::new());
            lines.push("Wellness:".to_string());
            lines.extend(w.wellness.iter().cloned());
            AdviceCard::new(
                "Women's Health: PCOD/PCOS & Menstrual Care",
                CardBody::Lines(lines),
                &["Women", "PCOS", "Menstrual"],
            )
        }
    }
}

// ============ Query results ============

pub fn search_card(results: &[MatchResult]) -> AdviceCard {
    if results.is_empty() {
        return no_match_card();
    }
    let lines = results
        .iter()
        .map(|r| format!("{}: {}", r.area, r.advice))
        .collect();
    AdviceCard::new(
        "Advice (Offline Knowledge Base)",
        CardBody::Lines(lines),
        &["Offline", "KB"],
    )
    .with_confidence(87)
}

pub fn no_match_card() -> AdviceCard {
    AdviceCard::new(
        "No Direct Match",
        CardBody::Text(
            "I couldn't find an exact match. Try adding more detail like symptom duration, \
             severity, or affected plant part."
                .to_string(),
        ),
        &["Hint"],
    )
}

pub fn identify_card(is_plant: bool, store: &KnowledgeStore) -> AdviceCard {
    if is_plant {
        let mut lines = vec!["Detected plant-like image (heuristic).".to_string()];
        lines.extend(
            store
                .plants
                .diseases
                .iter()
                .map(|d| format!("{}: {}. Care: {}", d.name, d.signs, d.care)),
        );
        AdviceCard::new(
            "Plant Identified (Offline Heuristic)",
            CardBody::Lines(lines),
            &["Image", "Plants"],
        )
    } else {
        AdviceCard::new(
            "Could Not Identify",
            CardBody::Text(
                "No strong plant features detected. Try better lighting, closer focus, \
                 or provide text description."
                    .to_string(),
            ),
            &["Image"],
        )
    }
}

// ============ Capability fallbacks ============

pub fn voice_unsupported_card() -> AdviceCard {
    AdviceCard::new(
        "Voice Not Supported",
        CardBody::Text(
            "Speech recognition is not available here. Please use text input.".to_string(),
        ),
        &["Voice"],
    )
}

pub fn voice_failed_card(reason: &str) -> AdviceCard {
    AdviceCard::new(
        "Voice Input Failed",
        CardBody::Text(format!("{}. Please try again or use text input.", reason)),
        &["Voice"],
    )
}

pub fn camera_permission_card() -> AdviceCard {
    AdviceCard::new(
        "Camera Permission Needed",
        CardBody::Text("Allow camera access in your system or app permissions.".to_string()),
        &["Camera"],
    )
    .warn()
}

pub fn camera_unavailable_card(reason: &str) -> AdviceCard {
    AdviceCard::new(
        "Camera Not Available",
        CardBody::Text(reason.to_string()),
        &["Camera"],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Contact, CprGuide, Disease, EmergencyData, HealthData, PlantsData, WomenData,
    };

    fn store() -> KnowledgeStore {
        KnowledgeStore::from_parts(
            EmergencyData {
                cpr: CprGuide {
                    brief: vec!["Call 108".into()],
                    detailed: vec!["Lock elbows".into(), "Let chest recoil".into()],
                },
                contacts: vec![Contact {
                    name: "Police".into(),
                    number: "100".into(),
                }],
            },
            HealthData {
                general_tips: vec!["Drink water".into()],
                symptoms: Vec::new(),
            },
            PlantsData {
                diseases: vec![Disease {
                    name: "Leaf spot".into(),
                    signs: "brown spots".into(),
                    care: "Remove leaves".into(),
                }],
            },
            WomenData {
                pcod_pcos: vec!["Exercise".into()],
                menstrual_care: vec!["Warm compress".into()],
                wellness: vec!["Rest".into()],
            },
        )
    }

    #[test]
    fn test_cpr_cards() {
        let [brief, detailed] = cpr_cards(&store());
        assert_eq!(brief.kind, CardKind::Warn);
        assert_eq!(brief.confidence, Some(98));
        assert_eq!(brief.body, CardBody::Lines(vec!["Call 108".into()]));
        assert_eq!(detailed.kind, CardKind::Info);
        assert_eq!(detailed.confidence, Some(96));
    }

    #[test]
    fn test_contacts_card() {
        let card = contacts_card(&store());
        assert_eq!(card.body, CardBody::Lines(vec!["Police: 100".into()]));
        assert!(card.tags.contains(&"1098".to_string()));
    }

    #[test]
    fn test_women_category_sections() {
        let card = category_card(&store(), Category::Women);
        let CardBody::Lines(lines) = card.body else {
            panic!("expected lines");
        };
        assert_eq!(
            lines,
            vec![
                "PCOD/PCOS:",
                "Exercise",
                "",
                "Menstrual Care:",
                "Warm compress",
                "",
                "Wellness:",
                "Rest"
            ]
        );
    }

    #[test]
    fn test_plant_category_line() {
        let card = category_card(&store(), Category::Plant);
        assert_eq!(
            card.body,
            CardBody::Lines(vec!["Leaf spot (brown spots). Care: Remove leaves".into()])
        );
    }

    #[test]
    fn test_search_card_and_no_match() {
        let card = search_card(&[MatchResult::new("Medical", "Rest")]);
        assert_eq!(card.body, CardBody::Lines(vec!["Medical: Rest".into()]));
        assert_eq!(card.confidence, Some(87));

        let empty = search_card(&[]);
        assert_eq!(empty, no_match_card());
        assert_eq!(empty.title, "No Direct Match");
    }

    #[test]
    fn test_identify_card() {
        let s = store();
        let plant = identify_card(true, &s);
        assert_eq!(plant.title, "Plant Identified (Offline Heuristic)");
        let CardBody::Lines(lines) = plant.body else {
            panic!("expected lines");
        };
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Leaf spot: brown spots. Care: Remove leaves");

        assert_eq!(identify_card(false, &s).title, "Could Not Identify");
    }

    #[test]
    fn test_display_rendering() {
        let rendered = cpr_cards(&store())[0].to_string();
        assert!(rendered.starts_with("[!] CPR: Brief Steps  (98% confidence)"));
        assert!(rendered.contains("  - Call 108"));
        assert!(rendered.contains("tags: Emergency, CPR, Immediate Action"));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("plants".parse::<Category>().unwrap(), Category::Plant);
        assert!("cars".parse::<Category>().is_err());
    }

    #[test]
    fn test_card_json_shape() {
        let json = serde_json::to_value(no_match_card()).unwrap();
        assert_eq!(json["kind"], "info");
        assert_eq!(json["body"]["type"], "text");
        assert!(json["confidence"].is_null());
    }
}
