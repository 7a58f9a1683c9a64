use super::serde_ext;
use super::target::StoredTarget;
use super::{DialTarget, StepHeader, StepKind, StepModel};
use crate::error::StepError;
use crate::registry::{StepRegistry, UnknownTargetPolicy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Connects the caller to one or more targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DialStep {
    #[serde(flatten)]
    header: StepHeader,
    /// Rebuilt element by element on hydrate; see [`DialStep::hydrate_children`].
    #[serde(skip_deserializing)]
    pub targets: Vec<DialTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_ext::optional_u32"
    )]
    pub timeout: Option<u32>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_ext::optional_u32"
    )]
    pub time_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<bool>,
}

impl Default for DialStep {
    fn default() -> Self {
        Self {
            header: StepHeader::for_kind(StepKind::Dial),
            targets: Vec::new(),
            next_module: None,
            action: None,
            method: None,
            timeout: None,
            time_limit: None,
            caller_id: None,
            record: None,
        }
    }
}

impl DialStep {
    pub fn with_target(mut self, target: impl Into<DialTarget>) -> Self {
        self.targets.push(target.into());
        self
    }
}

impl StepModel for DialStep {
    const KIND: StepKind = StepKind::Dial;

    fn header(&self) -> &StepHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut StepHeader {
        &mut self.header
    }

    /// Each stored target is dispatched on its `dialType`. Entries whose type is unknown are
    /// dropped or rejected according to the registry's [`UnknownTargetPolicy`].
    fn hydrate_children(&mut self, raw: &Value, registry: &StepRegistry) -> Result<(), StepError> {
        let stored = raw
            .get("targets")
            .and_then(Value::as_array)
            .or_else(|| raw.get("dialNouns").and_then(Value::as_array));
        let Some(stored) = stored else {
            return Ok(());
        };

        let mut targets = Vec::with_capacity(stored.len());
        for entry in stored {
            match DialTarget::hydrate(entry)? {
                StoredTarget::Known(target) => targets.push(target),
                StoredTarget::Unrecognized(dial_type) => match registry.unknown_target_policy() {
                    UnknownTargetPolicy::Drop => {
                        warn!(
                            step = self.header.name(),
                            dial_type = %dial_type,
                            "dropping dial target with unrecognized dialType"
                        );
                    }
                    UnknownTargetPolicy::Fail => {
                        return Err(StepError::UnrecognizedDialType {
                            step: self.header.name().to_string(),
                            dial_type,
                        });
                    }
                },
            }
        }
        self.targets = targets;
        Ok(())
    }
}
