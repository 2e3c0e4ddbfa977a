//! Dataset status listing.
//!
//! Reports, per topic, whether the configured loader produced a usable
//! dataset and how many entries it holds. Used by `advisor sources`.

use anyhow::Result;

use crate::store::{KnowledgeStore, TopicStatus};

pub fn get_sources(store: &KnowledgeStore) -> Vec<TopicStatus> {
    store.statuses()
}

pub fn list_sources(store: &KnowledgeStore) -> Result<()> {
    println!("loader: {}", store.loader_name());
    println!("{:<12} {:<8} {:<8} NOTES", "TOPIC", "STATUS", "ENTRIES");
    for status in get_sources(store) {
        println!(
            "{:<12} {:<8} {:<8} {}",
            status.topic,
            if status.loaded { "OK" } else { "EMPTY" },
            status.entries,
            status.notes.as_deref().unwrap_or("")
        );
    }
    Ok(())
}
