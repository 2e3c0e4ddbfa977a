//! # Offline Advisor
//!
//! Offline advice from four small knowledge bases: emergency, health,
//! plants, and women's health.
//!
//! Datasets are loaded once at startup (bundled, from disk, or over HTTP
//! with a bundled fallback) into an immutable [`store::KnowledgeStore`].
//! Users then query it by typed text, a voice transcript, or a camera frame.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐
//! │   Loaders    │──▶│ KnowledgeStore │
//! │ Fs/Http/Emb. │   │  (read-only)   │
//! └──────────────┘   └───────┬────────┘
//!                            │
//!        ┌───────────────────┼───────────────────┐
//!        ▼                   ▼                   ▼
//!  ┌──────────┐       ┌────────────┐      ┌────────────┐
//!  │ matcher  │       │ classifier │      │  advice    │
//!  │ keywords │       │ green px   │      │  cards     │
//!  └──────────┘       └────────────┘      └────────────┘
//!        ▲                   ▲
//!        └───── session (text / voice / image) ─────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! advisor search "fever and headache"
//! advisor cpr
//! advisor category women
//! advisor identify ./frame.rgba --width 640 --height 480
//! advisor sources
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Topic datasets and match results |
//! | [`loader`] | Dataset loader trait and built-in loaders |
//! | [`store`] | In-memory knowledge store |
//! | [`matcher`] | Keyword matching |
//! | [`classifier`] | Green-dominance image heuristic |
//! | [`advice`] | Advice cards and fallbacks |
//! | [`capture`] | Speech and camera capabilities |
//! | [`session`] | Input mode and per-user actions |
//! | [`sources`] | Dataset status listing |

pub mod advice;
pub mod capture;
pub mod classifier;
pub mod config;
pub mod loader;
pub mod matcher;
pub mod models;
pub mod session;
pub mod sources;
pub mod store;
