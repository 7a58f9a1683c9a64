//! Steps that end, pause or hand off the call.

use super::serde_ext;
use super::{StepHeader, StepKind, StepModel};
use serde::{Deserialize, Serialize};

/// Hands the call over to another RCML document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectStep {
    #[serde(flatten)]
    header: StepHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl Default for RedirectStep {
    fn default() -> Self {
        Self {
            header: StepHeader::for_kind(StepKind::Redirect),
            url: None,
            method: None,
        }
    }
}

impl StepModel for RedirectStep {
    const KIND: StepKind = StepKind::Redirect;

    fn header(&self) -> &StepHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut StepHeader {
        &mut self.header
    }

    fn normalize(&mut self) {
        if self.method.as_deref() == Some("") {
            self.method = None;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HangUpStep {
    #[serde(flatten)]
    header: StepHeader,
}

impl Default for HangUpStep {
    fn default() -> Self {
        Self {
            header: StepHeader::for_kind(StepKind::HangUp),
        }
    }
}

impl StepModel for HangUpStep {
    const KIND: StepKind = StepKind::HangUp;

    fn header(&self) -> &StepHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut StepHeader {
        &mut self.header
    }
}

/// Refuses the incoming call, optionally giving a reason such as `busy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RejectStep {
    #[serde(flatten)]
    header: StepHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Default for RejectStep {
    fn default() -> Self {
        Self {
            header: StepHeader::for_kind(StepKind::Reject),
            reason: None,
        }
    }
}

impl StepModel for RejectStep {
    const KIND: StepKind = StepKind::Reject;

    fn header(&self) -> &StepHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut StepHeader {
        &mut self.header
    }
}

/// Waits silently; `length` is in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PauseStep {
    #[serde(flatten)]
    header: StepHeader,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_ext::optional_u32"
    )]
    pub length: Option<u32>,
}

impl Default for PauseStep {
    fn default() -> Self {
        Self {
            header: StepHeader::for_kind(StepKind::Pause),
            length: None,
        }
    }
}

impl StepModel for PauseStep {
    const KIND: StepKind = StepKind::Pause;

    fn header(&self) -> &StepHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut StepHeader {
        &mut self.header
    }
}
