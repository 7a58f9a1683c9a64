use super::serde_ext;
use super::{StepHeader, StepKind, StepModel};
use crate::error::StepError;
use crate::extract::{Assignment, ValueExtractor};
use crate::registry::StepRegistry;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How an external service step picks the step that runs after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NextType {
    /// Always continue with the literal `next` step.
    #[default]
    Fixed,
    /// Read the next step's name out of the service response.
    Computed,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlParameter {
    pub name: String,
    pub value: String,
}

/// Calls an HTTP service, stores parts of its JSON response in flow variables and optionally
/// routes on the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExternalServiceStep {
    #[serde(flatten)]
    header: StepHeader,
    pub url: String,
    #[serde(alias = "urlParams", deserialize_with = "serde_ext::null_as_default")]
    pub url_parameters: Vec<UrlParameter>,
    #[serde(skip_deserializing)]
    pub assignments: Vec<Assignment>,
    pub next: String,
    pub do_routing: bool,
    pub next_type: NextType,
    #[serde(skip_deserializing)]
    pub next_value_extractor: ValueExtractor,
}

impl Default for ExternalServiceStep {
    fn default() -> Self {
        Self {
            header: StepHeader::for_kind(StepKind::ExternalService),
            url: String::new(),
            url_parameters: Vec::new(),
            assignments: Vec::new(),
            next: String::new(),
            do_routing: false,
            next_type: NextType::Fixed,
            next_value_extractor: ValueExtractor::new(),
        }
    }
}

impl ExternalServiceStep {
    /// Appends a blank assignment and returns it for editing.
    pub fn add_assignment(&mut self) -> &mut Assignment {
        let index = self.assignments.len();
        self.assignments.push(Assignment::default());
        &mut self.assignments[index]
    }

    /// Checks that response-driven routing, when enabled, has what the engine needs to pick
    /// the next step. Editing and persistence never depend on this.
    pub fn check_routing(&self) -> Result<(), StepError> {
        if !self.do_routing {
            return Ok(());
        }
        let reason = match self.next_type {
            NextType::Fixed if self.next.is_empty() => "fixed routing has no next step",
            NextType::Computed if !self.next_value_extractor.is_well_formed() => {
                "computed routing needs a non-empty path ending in a value"
            }
            _ => return Ok(()),
        };
        Err(StepError::IncompleteRouting {
            step: self.header.name().to_string(),
            reason: reason.to_string(),
        })
    }
}

impl StepModel for ExternalServiceStep {
    const KIND: StepKind = StepKind::ExternalService;

    fn header(&self) -> &StepHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut StepHeader {
        &mut self.header
    }

    fn hydrate_children(&mut self, raw: &Value, _registry: &StepRegistry) -> Result<(), StepError> {
        if let Some(stored) = raw.get("assignments").and_then(Value::as_array) {
            self.assignments = stored
                .iter()
                .map(Assignment::hydrate)
                .collect::<Result<_, _>>()?;
        }
        if let Some(stored) = raw.get("nextValueExtractor") {
            self.next_value_extractor = ValueExtractor::hydrate(stored)?;
        }
        Ok(())
    }
}
