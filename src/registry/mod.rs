use crate::error::StepError;
use crate::step::{self, Step, StepKind, StepModel};
use ahash::AHashMap;
use serde_json::Value;
use tracing::debug;

mod identifier;

pub use identifier::IdentifierGenerator;

/// What hydrating a dial step does with a target whose `dialType` is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTargetPolicy {
    /// Leave the entry out of the hydrated step and log a warning.
    #[default]
    Drop,
    /// Fail the whole hydrate with [`StepError::UnrecognizedDialType`].
    Fail,
}

/// Constructor and hydrator for one step kind.
#[derive(Clone, Copy)]
pub struct StepFactory {
    kind: StepKind,
    create: fn(String) -> Step,
    hydrate: fn(&Value, &StepRegistry) -> Result<Step, StepError>,
}

fn create_step<M: StepModel + Into<Step>>(name: String) -> Step {
    M::named(name).into()
}

fn hydrate_step<M: StepModel + Into<Step>>(
    raw: &Value,
    registry: &StepRegistry,
) -> Result<Step, StepError> {
    M::hydrate(raw, registry).map(Into::into)
}

impl StepFactory {
    pub fn of<M: StepModel + Into<Step>>() -> Self {
        Self {
            kind: M::KIND,
            create: create_step::<M>,
            hydrate: hydrate_step::<M>,
        }
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }
}

/// Maps stored `kind` discriminators to the step variant that handles them.
///
/// This is the single way stored data becomes a live step: callers hand it the raw JSON and
/// get back a hydrated, validated [`Step`].
pub struct StepRegistry {
    factories: AHashMap<String, StepFactory>,
    unknown_targets: UnknownTargetPolicy,
}

pub struct StepRegistryBuilder {
    factories: AHashMap<String, StepFactory>,
    unknown_targets: UnknownTargetPolicy,
}

impl StepRegistryBuilder {
    pub fn new() -> Self {
        let mut factories = AHashMap::new();
        step::register_default_kinds(&mut factories);
        Self {
            factories,
            unknown_targets: UnknownTargetPolicy::default(),
        }
    }

    /// Accepts `alias` as another stored spelling of `kind`.
    pub fn with_kind_alias(mut self, alias: &str, kind: StepKind) -> Self {
        self.factories
            .insert(alias.to_string(), step::factory_for(kind));
        self
    }

    pub fn with_unknown_target_policy(mut self, policy: UnknownTargetPolicy) -> Self {
        self.unknown_targets = policy;
        self
    }

    pub fn build(self) -> StepRegistry {
        StepRegistry {
            factories: self.factories,
            unknown_targets: self.unknown_targets,
        }
    }
}

impl Default for StepRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> StepRegistryBuilder {
        StepRegistryBuilder::new()
    }

    pub fn is_registered(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn unknown_target_policy(&self) -> UnknownTargetPolicy {
        self.unknown_targets
    }

    fn factory(&self, kind: &str) -> Result<&StepFactory, StepError> {
        self.factories
            .get(kind)
            .ok_or_else(|| StepError::UnrecognizedKind(kind.to_string()))
    }

    /// A fresh step of `kind` with defaults, named by `ids`.
    ///
    /// The generator only advances when `kind` is registered.
    pub fn create(&self, kind: &str, ids: &mut IdentifierGenerator) -> Result<Step, StepError> {
        let factory = self.factory(kind)?;
        let step = (factory.create)(ids.next_name()?);
        debug!(kind = %factory.kind, name = step.name(), "created step");
        Ok(step)
    }

    /// Turns a stored step into a live one, dispatching on its `kind`.
    pub fn hydrate(&self, raw: &Value) -> Result<Step, StepError> {
        let kind = raw
            .get("kind")
            .and_then(Value::as_str)
            .ok_or(StepError::MissingKind)?;
        let factory = self.factory(kind)?;
        let step = (factory.hydrate)(raw, self)?;
        debug!(kind = %factory.kind, name = step.name(), "hydrated step");
        Ok(step)
    }

    pub fn hydrate_str(&self, json: &str) -> Result<Step, StepError> {
        let raw: Value =
            serde_json::from_str(json).map_err(|e| StepError::malformed("step", e))?;
        self.hydrate(&raw)
    }
}
