use crate::error::ExtractorError;
use crate::step::serde_ext;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of hop an access operation makes into a JSON-shaped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    /// `.name` — read a named property of an object.
    #[default]
    #[serde(alias = "object")]
    Property,
    /// `[n]` — read the item at a position of an array.
    #[serde(alias = "array")]
    Index,
    /// Take the value reached so far. Always the last hop of a path.
    #[serde(rename = "value", alias = "terminal")]
    Terminal,
}

impl AccessKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessKind::Property => "property",
            AccessKind::Index => "index",
            AccessKind::Terminal => "value",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AccessKind::Terminal)
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "property" | "object" => Ok(AccessKind::Property),
            "index" | "array" => Ok(AccessKind::Index),
            "value" | "terminal" => Ok(AccessKind::Terminal),
            other => Err(format!("unknown access operation kind '{}'", other)),
        }
    }
}

/// One hop of a value-extraction path.
///
/// While an operation is pending it is freely editable: the editor may switch its kind and
/// leave the other kind's field behind. Committing validates the fields the kind needs and
/// freezes the textual notation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccessOperation {
    pub kind: AccessKind,
    #[serde(skip)]
    pub fixed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_ext::optional_u32"
    )]
    pub position: Option<u32>,
    #[serde(skip)]
    notation: Option<String>,
}

impl AccessOperation {
    /// The uncommitted property-access operation every fresh pending slot starts from.
    pub fn template() -> Self {
        Self::default()
    }

    pub fn property(name: impl Into<String>) -> Self {
        Self {
            property: Some(name.into()),
            ..Self::template()
        }
    }

    pub fn index(position: u32) -> Self {
        Self {
            kind: AccessKind::Index,
            position: Some(position),
            ..Self::template()
        }
    }

    pub fn terminal() -> Self {
        Self {
            kind: AccessKind::Terminal,
            ..Self::template()
        }
    }

    /// Notation computed when the operation was committed; empty while pending.
    pub fn notation(&self) -> &str {
        self.notation.as_deref().unwrap_or("")
    }

    /// Returns the committed form of this operation, or why it cannot be committed.
    pub(crate) fn commit(&self) -> Result<Self, ExtractorError> {
        let notation = match self.kind {
            AccessKind::Property => match self.property.as_deref() {
                Some(name) if !name.is_empty() => format!(".{}", name),
                _ => return Err(ExtractorError::MissingProperty),
            },
            AccessKind::Index => match self.position {
                Some(position) => format!("[{}]", position),
                None => return Err(ExtractorError::MissingPosition),
            },
            AccessKind::Terminal => " value".to_string(),
        };

        // Only the field the kind reads survives the commit.
        let (property, position) = match self.kind {
            AccessKind::Property => (self.property.clone(), None),
            AccessKind::Index => (None, self.position),
            AccessKind::Terminal => (None, None),
        };

        Ok(Self {
            kind: self.kind,
            fixed: true,
            property,
            position,
            notation: Some(notation),
        })
    }

    /// Turns a committed operation back into an editable one.
    pub(crate) fn reopen(mut self) -> Self {
        self.fixed = false;
        self.notation = None;
        self
    }
}
