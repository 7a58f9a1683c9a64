use super::serde_ext;
use super::{StepHeader, StepKind, StepModel};
use serde::{Deserialize, Serialize};

/// Where a play step takes its audio from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayType {
    #[default]
    Local,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalAudio {
    pub wav_local_filename: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoteAudio {
    pub wav_url: String,
}

/// Plays an audio file, either uploaded with the project or fetched from a URL.
///
/// Both sources are kept while editing so switching `play_type` back and forth loses nothing;
/// the canonical form only carries the active one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayStep {
    #[serde(flatten)]
    header: StepHeader,
    pub play_type: PlayType,
    #[serde(
        rename = "loop",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_ext::optional_u32"
    )]
    pub repeat: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local: Option<LocalAudio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteAudio>,
}

impl Default for PlayStep {
    fn default() -> Self {
        Self {
            header: StepHeader::for_kind(StepKind::Play),
            play_type: PlayType::Local,
            repeat: None,
            local: Some(LocalAudio::default()),
            remote: Some(RemoteAudio::default()),
        }
    }
}

impl StepModel for PlayStep {
    const KIND: StepKind = StepKind::Play;

    fn header(&self) -> &StepHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut StepHeader {
        &mut self.header
    }

    fn normalize(&mut self) {
        self.local.get_or_insert_with(LocalAudio::default);
        self.remote.get_or_insert_with(RemoteAudio::default);
    }

    fn prune(&mut self) {
        match self.play_type {
            PlayType::Local => self.remote = None,
            PlayType::Remote => self.local = None,
        }
    }
}
