//! # callflow - Call-Flow Step Models
//!
//! **callflow** is the data-modeling core of a visual IVR designer. It holds the polymorphic
//! "step" objects that make up a telephony call flow (announce, play audio, gather digits,
//! dial, redirect, reject, pause, hang up, call an external service) together with the
//! value-path builder that describes how a value is pulled out of a JSON service response.
//!
//! ## Core Workflow
//!
//! Everything outside this crate talks to it through two entry points:
//!
//! 1.  **Hydrate**: hand the stored JSON of a step to [`StepRegistry::hydrate`](registry::StepRegistry::hydrate).
//!     The registry dispatches on `kind`, merges the stored fields over that kind's defaults,
//!     rebuilds nested children (dial targets, assignments, extraction paths) through their own
//!     hydrate functions, and validates the result.
//! 2.  **Edit**: mutate the returned [`Step`](step::Step) in place. Call `validate()` whenever
//!     the editor wants normalized state; it never fails.
//! 3.  **Serialize**: `to_canonical()` returns the stored form with every field of the
//!     inactive alternative branch removed (a remote `play` step carries no `local` block).
//!
//! New steps are created through [`StepRegistry::create`](registry::StepRegistry::create),
//! which names them from an [`IdentifierGenerator`](registry::IdentifierGenerator).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use callflow::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let registry = StepRegistry::new();
//!
//!     // A stored dial step with one target the registry cannot place.
//!     let raw = json!({
//!         "kind": "dial",
//!         "name": "step4",
//!         "targets": [
//!             { "dialType": "number", "destination": "+15550100" },
//!             { "dialType": "fax", "destination": "+15550101" }
//!         ]
//!     });
//!
//!     let step = registry.hydrate(&raw)?;
//!     if let Step::Dial(dial) = &step {
//!         println!("-> {} target(s) kept", dial.targets.len());
//!     }
//!
//!     // Build an extraction path: .items[2] value
//!     let mut extractor = ValueExtractor::new();
//!     if let Some(pending) = extractor.pending_mut() {
//!         *pending = AccessOperation::property("items");
//!     }
//!     extractor.add_operation()?;
//!     if let Some(pending) = extractor.pending_mut() {
//!         *pending = AccessOperation::index(2);
//!     }
//!     extractor.add_operation()?;
//!     if let Some(pending) = extractor.pending_mut() {
//!         *pending = AccessOperation::terminal();
//!     }
//!     extractor.finish()?;
//!     println!("-> {}", extractor.render_expression());
//!
//!     println!("{}", serde_json::to_string_pretty(&step.to_canonical()?)?);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod extract;
pub mod flow;
pub mod prelude;
pub mod registry;
pub mod step;
