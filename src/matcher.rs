//! Keyword matching over the knowledge store.
//!
//! [`search`] runs a fixed list of containment rules against a lower-cased
//! query and returns the union of their hits. There is no scoring: results
//! are grouped by rule in the order below and each group keeps dataset order.
//!
//! | Rule | Gate | Emits |
//! |------|------|-------|
//! | Medical | any symptom keyword is a substring of the query | that symptom's advice |
//! | Women (PCOS) | query contains `pcos` or `pcod` | every PCOD/PCOS entry |
//! | Menstrual Care | query contains `period` or `menstru` | every menstrual-care entry |
//! | Plants | query contains the disease name or signs, or `plant` / `leaf` | `"<name>: <care>"` |
//!
//! The `plant` / `leaf` gate is deliberately broad: it selects every disease,
//! not only ones whose name or signs appear in the query.
//!
//! Callers must reject empty (after trimming) input before calling
//! [`search`]; an empty result is the caller's cue to show a "no match" hint.

use crate::models::{Disease, MatchResult};
use crate::store::KnowledgeStore;

pub const AREA_MEDICAL: &str = "Medical";
pub const AREA_PCOS: &str = "Women (PCOS)";
pub const AREA_MENSTRUAL: &str = "Menstrual Care";
pub const AREA_PLANTS: &str = "Plants";

const PCOS_TERMS: [&str; 2] = ["pcos", "pcod"];
const MENSTRUAL_TERMS: [&str; 2] = ["period", "menstru"];
const PLANT_TERMS: [&str; 2] = ["plant", "leaf"];

/// Search the store for advice matching `query`.
pub fn search(store: &KnowledgeStore, query: &str) -> Vec<MatchResult> {
    let q = query.to_lowercase();
    let mut results = Vec::new();

    // Medical
    for symptom in &store.health.symptoms {
        if symptom
            .keywords
            .iter()
            .any(|k| q.contains(&k.to_lowercase()))
        {
            results.push(MatchResult::new(AREA_MEDICAL, symptom.advice.as_str()));
        }
    }

    // Women's health
    if contains_any(&q, &PCOS_TERMS) {
        results.extend(
            store
                .women
                .pcod_pcos
                .iter()
                .map(|a| MatchResult::new(AREA_PCOS, a.as_str())),
        );
    }
    if contains_any(&q, &MENSTRUAL_TERMS) {
        results.extend(
            store
                .women
                .menstrual_care
                .iter()
                .map(|a| MatchResult::new(AREA_MENSTRUAL, a.as_str())),
        );
    }

    // Plants
    let broad = contains_any(&q, &PLANT_TERMS);
    for disease in &store.plants.diseases {
        if broad || mentions_disease(&q, disease) {
            results.push(MatchResult::new(
                AREA_PLANTS,
                format!("{}: {}", disease.name, disease.care),
            ));
        }
    }

    results
}

fn contains_any(q: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| q.contains(t))
}

/// Empty name/signs fields never match on their own.
fn mentions_disease(q: &str, disease: &Disease) -> bool {
    [&disease.name, &disease.signs]
        .into_iter()
        .filter(|text| !text.is_empty())
        .any(|text| q.contains(&text.to_lowercase()))
}
