use super::serde_ext;
use super::{StepHeader, StepKind, StepModel};
use serde::{Deserialize, Serialize};

/// Announces a phrase to the caller with text-to-speech.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SayStep {
    #[serde(flatten)]
    header: StepHeader,
    pub phrase: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(
        rename = "loop",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_ext::optional_u32"
    )]
    pub repeat: Option<u32>,
}

impl Default for SayStep {
    fn default() -> Self {
        Self {
            header: StepHeader::for_kind(StepKind::Say),
            phrase: String::new(),
            voice: None,
            language: None,
            repeat: None,
        }
    }
}

impl SayStep {
    pub fn with_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.phrase = phrase.into();
        self
    }
}

impl StepModel for SayStep {
    const KIND: StepKind = StepKind::Say;

    fn header(&self) -> &StepHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut StepHeader {
        &mut self.header
    }

    fn normalize(&mut self) {
        // The editor clears the voice and language pickers to "".
        if self.voice.as_deref() == Some("") {
            self.voice = None;
        }
        if self.language.as_deref() == Some("") {
            self.language = None;
        }
    }
}
