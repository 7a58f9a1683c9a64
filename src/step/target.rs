use super::serde_ext;
use crate::error::StepError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Discriminator of a dial target, stored as `dialType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialType {
    Number,
    Client,
    Conference,
    SipUri,
}

impl DialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialType::Number => "number",
            DialType::Client => "client",
            DialType::Conference => "conference",
            DialType::SipUri => "sipuri",
        }
    }
}

impl fmt::Display for DialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "number" => Ok(DialType::Number),
            "client" => Ok(DialType::Client),
            "conference" => Ok(DialType::Conference),
            "sipuri" => Ok(DialType::SipUri),
            other => Err(other.to_string()),
        }
    }
}

/// A phone number to ring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberTarget {
    pub destination: String,
    /// Digits sent once the number answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_digits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_connect_module: Option<String>,
}

/// A registered client of the platform.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientTarget {
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_connect_module: Option<String>,
}

/// A named conference room.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConferenceTarget {
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beep: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_conference_on_enter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_conference_on_exit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_method: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_ext::optional_u32"
    )]
    pub max_participants: Option<u32>,
}

/// A SIP URI.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SipUriTarget {
    pub destination: String,
}

/// One destination a dial step rings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dialType", rename_all = "lowercase")]
pub enum DialTarget {
    Number(NumberTarget),
    Client(ClientTarget),
    Conference(ConferenceTarget),
    #[serde(rename = "sipuri")]
    SipUri(SipUriTarget),
}

/// Outcome of reading one stored dial target.
#[derive(Debug)]
pub(crate) enum StoredTarget {
    Known(DialTarget),
    /// The entry's `dialType` matched no variant; carries what was found.
    Unrecognized(String),
}

impl DialTarget {
    pub fn dial_type(&self) -> DialType {
        match self {
            DialTarget::Number(_) => DialType::Number,
            DialTarget::Client(_) => DialType::Client,
            DialTarget::Conference(_) => DialType::Conference,
            DialTarget::SipUri(_) => DialType::SipUri,
        }
    }

    pub fn destination(&self) -> &str {
        match self {
            DialTarget::Number(t) => &t.destination,
            DialTarget::Client(t) => &t.destination,
            DialTarget::Conference(t) => &t.destination,
            DialTarget::SipUri(t) => &t.destination,
        }
    }

    /// Dispatches a stored entry on its `dialType` and reads that variant's fields.
    pub(crate) fn hydrate(raw: &Value) -> Result<StoredTarget, StepError> {
        let dial_type = raw.get("dialType").and_then(Value::as_str).unwrap_or("");
        if dial_type.parse::<DialType>().is_err() {
            return Ok(StoredTarget::Unrecognized(dial_type.to_string()));
        }
        serde_json::from_value(raw.clone())
            .map(StoredTarget::Known)
            .map_err(|e| StepError::malformed("dial target", e))
    }
}

impl From<NumberTarget> for DialTarget {
    fn from(target: NumberTarget) -> Self {
        DialTarget::Number(target)
    }
}

impl From<ClientTarget> for DialTarget {
    fn from(target: ClientTarget) -> Self {
        DialTarget::Client(target)
    }
}

impl From<ConferenceTarget> for DialTarget {
    fn from(target: ConferenceTarget) -> Self {
        DialTarget::Conference(target)
    }
}

impl From<SipUriTarget> for DialTarget {
    fn from(target: SipUriTarget) -> Self {
        DialTarget::SipUri(target)
    }
}
