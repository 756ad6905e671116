//! `userlink-engine` — entity resolution over in-memory user records.
//!
//! Pure engine crate: receives a pre-loaded [`Dataset`], returns one group id
//! per row. No CLI or file I/O dependencies.

pub mod config;
pub mod disjoint_set;
pub mod engine;
pub mod error;
pub mod index;
pub mod model;
pub mod normalize;

pub use config::{MatchProfile, MatchType, Selection};
pub use disjoint_set::DisjointSet;
pub use engine::resolve;
pub use error::ResolveError;
pub use model::{Dataset, MatchTypeStats, Record, Resolution, ResolutionSummary};
pub use normalize::normalize;
