//! Shared core of the inkpost front-end.
//!
//! Everything in here is platform independent: the drag surface state machine,
//! drop payload classification, the acceptance policy, and the ingestion
//! orchestrator that turns a drop into files the caller can upload. Browser
//! specifics (DOM events, `fetch`, timers) reach this crate through the traits
//! in [`ingest::surface`] and [`ingest::orchestrator`].

pub mod error;
pub mod ingest;
pub mod model;

pub use error::IngestError;
