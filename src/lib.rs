//! # about-harvest
//!
//! Harvests "about us" narrative text from business websites and classifies
//! whether the text a record ends up with is usable.
//!
//! ## Architecture
//!
//! ```text
//! Store → Orchestrator ─ pre-filter (Classifier)
//!              │
//!              ├─ Supervisor ─ isolated ScrapeSession ─ Normalizer / Extractor / Discovery
//!              │
//!              └─ merge → final classification → Store
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Scrape and classify a dataset
//! about-harvest run data/businesses.json
//!
//! # Score existing text only
//! about-harvest classify data/businesses.json
//!
//! # Try a single site
//! about-harvest scrape-url example.com
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires configuration into the
/// classifier, supervisor and orchestrator.
pub mod app;

/// Classification of scraped text.
///
/// - [`ScrapeClassifier`](classifier::ScrapeClassifier): weighted signal scoring
/// - [`StructuralSignals`](classifier::StructuralSignals): markup-level about detection
pub mod classifier;

/// Command-line interface using clap.
///
/// - `run <input>` - Scrape and classify a dataset
/// - `classify <input>` - Score existing text without scraping
/// - `analyze <input>` - URL/content breakdown of a dataset
/// - `scrape-url <url>` - One supervised attempt for a single site
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/about-harvest/config.toml` with `[scraper]`,
/// `[classifier]` and `[run]` sections.
pub mod config;

/// Core domain models.
///
/// - [`BusinessRecord`](domain::BusinessRecord): one dataset entry
/// - [`ScrapeStatus`](domain::ScrapeStatus): terminal outcome of an attempt
/// - [`ScrapeResult`](domain::ScrapeResult): what an attempt hands back
pub mod domain;

/// URL canonicalization used for navigation and "same page" checks.
pub mod normalizer;

/// Batch orchestration: pre-filter, throttled batches, merge, final verdicts.
pub mod orchestrator;

/// Browser-driven scraping.
///
/// Uses headless Chrome via chromiumoxide behind the
/// [`Browser`](scraper::Browser) trait.
pub mod scraper;

/// JSON dataset persistence.
pub mod store;

/// Isolated, deadline-bounded scrape attempts.
pub mod supervisor;
