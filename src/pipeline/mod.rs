//! Visit pipeline: extraction, urgency classification, dispatch run.

pub mod extract;
pub mod processor;
pub mod rules;
pub mod types;

pub use extract::VisitExtractor;
pub use processor::{DispatchOutcome, DispatchPipeline};
pub use types::{UrgencyTier, VisitRecord};
