//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the callflow crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use callflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let registry = StepRegistry::new();
//! let flow_json = std::fs::read_to_string("path/to/state.json")?;
//! let flow = FlowDocument::from_json(&flow_json, &registry)?;
//!
//! for step in flow.steps() {
//!     println!("{} ({})", step.name(), step.kind());
//! }
//! # Ok(())
//! # }
//! ```

// Registry and naming
pub use crate::registry::{IdentifierGenerator, StepRegistry, UnknownTargetPolicy};

// Step models
pub use crate::step::{
    DialStep, DialTarget, DialType, ExternalServiceStep, GatherStep, GatherType, PlayStep,
    PlayType, SayStep, Step, StepHeader, StepKind, StepModel,
};

// Value extraction
pub use crate::extract::{AccessKind, AccessOperation, Assignment, Scope, ValueExtractor};

// Flow documents
pub use crate::flow::{FlowDocument, FlowNode};

// Error types
pub use crate::error::{ExtractorError, FlowError, StepError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
