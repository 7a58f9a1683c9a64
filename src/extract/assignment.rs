use super::ValueExtractor;
use crate::error::StepError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a flow variable lives. The executing engine gives these meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Module,
    #[serde(alias = "application")]
    Global,
}

/// Binds the value found by an extraction path to a flow variable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Assignment {
    #[serde(alias = "destVariable")]
    pub destination_variable: String,
    pub scope: Scope,
    #[serde(skip_deserializing)]
    pub value_extractor: ValueExtractor,
}

impl Assignment {
    pub fn new(destination_variable: impl Into<String>, scope: Scope) -> Self {
        Self {
            destination_variable: destination_variable.into(),
            scope,
            value_extractor: ValueExtractor::new(),
        }
    }

    /// Reads the flat fields from `raw` and rebuilds the extractor through
    /// [`ValueExtractor::hydrate`].
    pub fn hydrate(raw: &Value) -> Result<Self, StepError> {
        let mut assignment: Assignment = serde_json::from_value(raw.clone())
            .map_err(|e| StepError::malformed("assignment", e))?;
        if let Some(stored) = raw.get("valueExtractor") {
            assignment.value_extractor = ValueExtractor::hydrate(stored)?;
        }
        Ok(assignment)
    }
}
