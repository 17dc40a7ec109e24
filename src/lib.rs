//! Product listing authenticity checks.
//!
//! A product page is fetched, its rating, review count, seller and leading
//! reviews are extracted, review text is analysed, and the resulting trust
//! signals feed a random-forest classifier whose verdict may be overruled by
//! a small set of heuristics.

pub mod api;
pub mod classifier;
pub mod config;
pub mod fetcher;
pub mod models;
pub mod pipeline;
pub mod processor;
