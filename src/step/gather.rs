use super::serde_ext;
use super::{SayStep, Step, StepHeader, StepKind, StepModel};
use crate::error::StepError;
use crate::extract::Scope;
use crate::registry::StepRegistry;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Which of the two capture modes a gather step uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GatherType {
    #[default]
    Menu,
    #[serde(alias = "collectdigits")]
    CollectDigits,
}

/// One menu choice: the digits the caller presses and the step they lead to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuMapping {
    #[serde(deserialize_with = "serde_ext::string_or_number")]
    pub digits: String,
    pub next: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Menu {
    #[serde(deserialize_with = "serde_ext::null_as_default")]
    pub mappings: Vec<MenuMapping>,
}

/// Free-form capture of the caller's digits into a variable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectDigits {
    pub collect_variable: String,
    pub next: String,
    pub scope: Scope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PatternType {
    #[default]
    #[serde(rename = "One of")]
    OneOf,
    Regex,
}

/// The editor's structured view of the input pattern.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatternInterface {
    pub user_pattern: String,
    pub user_pattern_type: PatternType,
}

/// Input validation for a gather: the pattern the digits must match and the announcement
/// played when they don't.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GatherValidation {
    #[serde(skip_deserializing, serialize_with = "serde_ext::canonical")]
    pub message_step: SayStep,
    /// Flat pattern string written by older editors.
    #[serde(deserialize_with = "serde_ext::null_as_default")]
    pub pattern: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_ext::non_empty"
    )]
    pub iface: Option<PatternInterface>,
}

impl Default for GatherValidation {
    fn default() -> Self {
        Self {
            message_step: SayStep::default(),
            pattern: String::new(),
            iface: Some(PatternInterface::default()),
        }
    }
}

impl GatherValidation {
    /// Derives the structured pattern from the flat one when the structured one is missing
    /// or blank, so an authored legacy pattern is never lost.
    fn reconcile_pattern(&mut self) {
        let blank = self
            .iface
            .as_ref()
            .is_none_or(|iface| iface.user_pattern.is_empty() && !self.pattern.is_empty());
        if blank {
            debug!(pattern = %self.pattern, "deriving structured gather pattern from legacy pattern");
            self.iface = Some(PatternInterface {
                user_pattern: self.pattern.clone(),
                user_pattern_type: PatternType::Regex,
            });
        }
    }
}

/// Collects digits from the caller, either as a menu choice or as free-form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GatherStep {
    #[serde(flatten)]
    header: StepHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    pub method: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_ext::optional_u32"
    )]
    pub timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_on_key: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_ext::optional_u32"
    )]
    pub num_digits: Option<u32>,
    /// Prompt steps played while gathering.
    #[serde(skip_deserializing)]
    pub steps: Vec<Step>,
    #[serde(deserialize_with = "serde_ext::null_as_default")]
    pub validation: GatherValidation,
    pub gather_type: GatherType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu: Option<Menu>,
    #[serde(alias = "collectdigits", skip_serializing_if = "Option::is_none")]
    pub collect_digits: Option<CollectDigits>,
}

impl Default for GatherStep {
    fn default() -> Self {
        Self {
            header: StepHeader::for_kind(StepKind::Gather),
            action: None,
            method: "GET".to_string(),
            timeout: None,
            finish_on_key: None,
            num_digits: None,
            steps: Vec::new(),
            validation: GatherValidation::default(),
            gather_type: GatherType::Menu,
            menu: Some(Menu::default()),
            collect_digits: Some(CollectDigits::default()),
        }
    }
}

impl StepModel for GatherStep {
    const KIND: StepKind = StepKind::Gather;

    fn header(&self) -> &StepHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut StepHeader {
        &mut self.header
    }

    fn hydrate_children(&mut self, raw: &Value, registry: &StepRegistry) -> Result<(), StepError> {
        if let Some(stored) = raw.pointer("/validation/messageStep") {
            self.validation.message_step = SayStep::hydrate(stored, registry)?;
        }
        if let Some(stored) = raw.get("steps").and_then(Value::as_array) {
            self.steps = stored
                .iter()
                .map(|step| registry.hydrate(step))
                .collect::<Result<_, _>>()?;
        }
        Ok(())
    }

    fn normalize(&mut self) {
        self.validation.message_step.validate();
        self.validation.reconcile_pattern();
        self.menu.get_or_insert_with(Menu::default);
        self.collect_digits.get_or_insert_with(CollectDigits::default);
        for step in &mut self.steps {
            step.validate();
        }
    }

    fn prune(&mut self) {
        match self.gather_type {
            GatherType::Menu => self.collect_digits = None,
            GatherType::CollectDigits => self.menu = None,
        }
    }
}
