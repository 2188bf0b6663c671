//! # Normalizer Module
//!
//! Reduces handler-specific response payloads to the flat `{status, message}`
//! envelope sent to messaging clients. Pure and synchronous: no I/O, no shared
//! state, safe to call from any number of requests at once.
//!
//! ## Components
//! - `label`: the closed set of classification labels
//! - `payload`: handler response and output envelope types
//! - `fallback`: fixed strings used when extraction finds nothing
//! - `exam`: ordered lookup for exam responses
//! - `dispatch`: the label-driven entry points

pub mod dispatch;
pub mod exam;
pub mod fallback;
pub mod label;
pub mod payload;

pub use dispatch::{normalize, normalize_classification, normalize_tagged};
pub use label::{ClassificationLabel, UnknownLabel};
pub use payload::{HandlerData, NormalizedResponse, RawHandlerResponse, ResponseBody, ResponseStatus};
