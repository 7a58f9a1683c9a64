//! Step models: one struct per kind of call-flow node, all sharing the [`StepModel`] lifecycle,
//! and the closed [`Step`] enum the rest of the crate passes around.

use crate::error::StepError;
use crate::registry::{StepFactory, StepRegistry};
use ahash::AHashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer, ser};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub mod control;
pub mod dial;
pub mod external;
pub mod gather;
pub mod play;
pub mod say;
pub(crate) mod serde_ext;
pub mod target;

pub use control::*;
pub use dial::*;
pub use external::*;
pub use gather::*;
pub use play::*;
pub use say::*;
pub use target::*;

/// Fields every step carries regardless of its kind.
///
/// `name` identifies the step within its flow and is fixed once assigned. `title` always
/// follows the kind. `iface` is editor scratch state that is persisted but never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepHeader {
    name: String,
    pub label: String,
    title: String,
    #[serde(default = "serde_ext::empty_object")]
    pub iface: Value,
}

impl Default for StepHeader {
    fn default() -> Self {
        Self {
            name: String::new(),
            label: String::new(),
            title: String::new(),
            iface: serde_ext::empty_object(),
        }
    }
}

impl StepHeader {
    pub fn for_kind(kind: StepKind) -> Self {
        Self {
            label: kind.default_label().to_string(),
            title: kind.title().to_string(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    fn normalize(&mut self, kind: StepKind) {
        if self.label.is_empty() {
            self.label = kind.default_label().to_string();
        }
        if self.title != kind.title() {
            self.title = kind.title().to_string();
        }
        if !self.iface.is_object() {
            self.iface = serde_ext::empty_object();
        }
    }
}

/// The lifecycle every step variant implements: construct with defaults, hydrate from the
/// stored form, normalize, and produce the canonical stored form.
pub trait StepModel: Clone + Default + Serialize + DeserializeOwned {
    const KIND: StepKind;

    fn header(&self) -> &StepHeader;
    fn header_mut(&mut self) -> &mut StepHeader;

    /// A fresh step with this kind's defaults.
    fn named(name: impl Into<String>) -> Self {
        let mut step = Self::default();
        step.header_mut().name = name.into();
        step
    }

    /// Builds a step from its stored representation.
    ///
    /// Plain fields are merged over the defaults; anything polymorphic or composite is rebuilt
    /// by [`hydrate_children`](Self::hydrate_children). The result is already validated.
    fn hydrate(raw: &Value, registry: &StepRegistry) -> Result<Self, StepError> {
        if !raw.is_object() {
            return Err(StepError::malformed(
                Self::KIND.as_str(),
                "expected a JSON object",
            ));
        }
        let mut step: Self = serde_json::from_value(raw.clone())
            .map_err(|e| StepError::malformed(Self::KIND.as_str(), e))?;
        step.hydrate_children(raw, registry)?;
        step.validate();
        Ok(step)
    }

    /// Rebuilds nested sub-models from `raw` through their own hydrate functions.
    fn hydrate_children(&mut self, _raw: &Value, _registry: &StepRegistry) -> Result<(), StepError> {
        Ok(())
    }

    /// Idempotent normalization. Never fails.
    fn validate(&mut self) {
        self.header_mut().normalize(Self::KIND);
        self.normalize();
    }

    /// Variant-specific part of [`validate`](Self::validate).
    fn normalize(&mut self) {}

    /// Drops the fields of whichever alternative branch the step is not using.
    fn prune(&mut self) {}

    /// The canonical stored form: a validated copy with inactive branches removed and the
    /// `kind` discriminator written alongside the fields.
    fn to_canonical(&self) -> Result<Value, StepError> {
        let mut copy = self.clone();
        copy.validate();
        copy.prune();
        let mut value = serde_json::to_value(&copy)
            .map_err(|e| StepError::malformed(Self::KIND.as_str(), e))?;
        if let Value::Object(fields) = &mut value {
            fields.insert(
                "kind".to_string(),
                Value::String(Self::KIND.as_str().to_string()),
            );
        }
        Ok(value)
    }
}

/// Defines the step kinds, the [`Step`] enum over their models, and the registry hooks.
macro_rules! define_step_kinds {
    ( $( ($variant:ident, $model:ty, $kind:literal, $label:literal, $title:literal) ),* $(,)? ) => {
        /// Discriminator selecting which step variant's fields and behavior apply.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum StepKind {
            $( $variant, )*
        }

        impl StepKind {
            pub const ALL: &'static [StepKind] = &[ $( StepKind::$variant, )* ];

            /// The discriminator as stored in the `kind` field.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( StepKind::$variant => $kind, )*
                }
            }

            pub fn default_label(&self) -> &'static str {
                match self {
                    $( StepKind::$variant => $label, )*
                }
            }

            pub fn title(&self) -> &'static str {
                match self {
                    $( StepKind::$variant => $title, )*
                }
            }
        }

        impl FromStr for StepKind {
            type Err = StepError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $kind => Ok(StepKind::$variant), )*
                    other => Err(StepError::UnrecognizedKind(other.to_string())),
                }
            }
        }

        /// One node of a call flow.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Step {
            $( $variant($model), )*
        }

        impl Step {
            pub fn kind(&self) -> StepKind {
                match self {
                    $( Step::$variant(_) => StepKind::$variant, )*
                }
            }

            pub fn header(&self) -> &StepHeader {
                match self {
                    $( Step::$variant(step) => step.header(), )*
                }
            }

            pub fn header_mut(&mut self) -> &mut StepHeader {
                match self {
                    $( Step::$variant(step) => step.header_mut(), )*
                }
            }

            pub fn validate(&mut self) {
                match self {
                    $( Step::$variant(step) => step.validate(), )*
                }
            }

            pub fn to_canonical(&self) -> Result<Value, StepError> {
                match self {
                    $( Step::$variant(step) => step.to_canonical(), )*
                }
            }
        }

        $(
            impl From<$model> for Step {
                fn from(step: $model) -> Self {
                    Step::$variant(step)
                }
            }
        )*

        pub(crate) fn factory_for(kind: StepKind) -> StepFactory {
            match kind {
                $( StepKind::$variant => StepFactory::of::<$model>(), )*
            }
        }

        pub(crate) fn register_default_kinds(registry: &mut AHashMap<String, StepFactory>) {
            $( registry.insert($kind.to_string(), StepFactory::of::<$model>()); )*
        }
    };
}

define_step_kinds! {
    (Say, SayStep, "say", "say", "say"),
    (Play, PlayStep, "play", "play", "play"),
    (Gather, GatherStep, "gather", "gather", "collect"),
    (Dial, DialStep, "dial", "dial", "dial"),
    (Redirect, RedirectStep, "redirect", "redirect", "redirect"),
    (HangUp, HangUpStep, "hungup", "hang up", "hang up"),
    (Reject, RejectStep, "reject", "reject", "reject"),
    (Pause, PauseStep, "pause", "pause", "pause"),
    (ExternalService, ExternalServiceStep, "externalService", "externalService", "external service"),
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Step {
    pub fn name(&self) -> &str {
        self.header().name()
    }

    /// Steps embedded in this one as full flow steps (a gather's prompt steps).
    pub fn nested_steps(&self) -> &[Step] {
        match self {
            Step::Gather(gather) => &gather.steps,
            _ => &[],
        }
    }
}

impl Serialize for Step {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_canonical()
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}
