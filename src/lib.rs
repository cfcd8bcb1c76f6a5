//! Short-range weather briefings for free-text place queries.
//!
//! A query is resolved to a place, the next few forecast hours are cut out of an
//! hourly series, and a short comment in the place's regional dialect is attached.
//! [`pipeline::Pipeline`] ties the stages together.

pub mod classify;
pub mod commentary;
pub mod config;
pub mod data;
pub mod error;
pub mod fetch;
pub mod gazetteer;
pub mod location;
pub mod pipeline;
pub mod region;
pub mod table;
mod templates;
pub mod window;

pub use config::Settings;
pub use pipeline::{Briefing, Pipeline};
