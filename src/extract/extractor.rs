use super::{AccessKind, AccessOperation};
use crate::error::{ExtractorError, StepError};
use itertools::Itertools;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Builds and holds one path into a nested JSON-shaped value, hop by hop.
///
/// Committed operations form the path. A single pending operation is the one currently being
/// edited; it never shows up in [`operations`](Self::operations) or the rendered expression
/// until it is committed. Once a terminal operation is committed the path is closed and there
/// is no pending operation until [`pop_operation`](Self::pop_operation) reopens it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueExtractor {
    operations: Vec<AccessOperation>,
    pending: Option<AccessOperation>,
}

/// Stored shape of an extractor: just the committed operations.
#[derive(Deserialize)]
struct StoredExtractor {
    #[serde(default, alias = "accessOperations")]
    operations: Vec<AccessOperation>,
}

impl Default for ValueExtractor {
    fn default() -> Self {
        Self {
            operations: Vec::new(),
            pending: Some(AccessOperation::template()),
        }
    }
}

impl ValueExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an extractor from its stored form by replaying every operation through
    /// [`add_operation`](Self::add_operation), so a stored path gets the same checks as an
    /// edited one. A missing or `null` value yields an empty extractor.
    pub fn hydrate(raw: &Value) -> Result<Self, StepError> {
        let mut extractor = Self::new();
        if raw.is_null() {
            return Ok(extractor);
        }

        let stored: StoredExtractor = serde_json::from_value(raw.clone())
            .map_err(|e| StepError::malformed("valueExtractor", e))?;
        for operation in stored.operations {
            if extractor.is_closed() {
                return Err(ExtractorError::PathClosed.into());
            }
            extractor.pending = Some(operation);
            extractor.add_operation()?;
        }
        Ok(extractor)
    }

    pub fn operations(&self) -> &[AccessOperation] {
        &self.operations
    }

    pub fn pending(&self) -> Option<&AccessOperation> {
        self.pending.as_ref()
    }

    /// The operation being edited, or `None` while the path is closed.
    pub fn pending_mut(&mut self) -> Option<&mut AccessOperation> {
        self.pending.as_mut()
    }

    pub fn is_closed(&self) -> bool {
        self.pending.is_none()
    }

    /// Non-empty and ending in a terminal value.
    pub fn is_well_formed(&self) -> bool {
        self.operations
            .last()
            .is_some_and(|operation| operation.kind.is_terminal())
    }

    /// Commits the pending operation and starts a fresh property-access template.
    ///
    /// Committing a terminal operation closes the path instead.
    pub fn add_operation(&mut self) -> Result<(), ExtractorError> {
        let pending = self.pending.as_ref().ok_or(ExtractorError::PathClosed)?;
        let committed = pending.commit()?;
        let closes = committed.kind.is_terminal();
        self.operations.push(committed);
        self.pending = if closes {
            None
        } else {
            Some(AccessOperation::template())
        };
        Ok(())
    }

    /// Moves the last committed operation back into the pending slot for re-editing,
    /// discarding whatever was pending. Does nothing on an empty path.
    pub fn pop_operation(&mut self) {
        if let Some(last) = self.operations.pop() {
            self.pending = Some(last.reopen());
        }
    }

    /// Commits the pending terminal operation and closes the path.
    pub fn finish(&mut self) -> Result<(), ExtractorError> {
        match &self.pending {
            None => Err(ExtractorError::PathClosed),
            Some(operation) if !operation.kind.is_terminal() => {
                Err(ExtractorError::UnterminatedPath)
            }
            Some(_) => self.add_operation(),
        }
    }

    /// Whether an operation of the given textual kind ends a path. Unknown kinds do not.
    pub fn is_terminal(kind: &str) -> bool {
        kind.parse::<AccessKind>()
            .map(|kind| kind.is_terminal())
            .unwrap_or(false)
    }

    /// Human-readable form of the committed path, e.g. `.items[2] value`.
    ///
    /// Descriptive only: whoever runs the flow walks [`operations`](Self::operations).
    pub fn render_expression(&self) -> String {
        self.operations.iter().map(AccessOperation::notation).join("")
    }
}

impl fmt::Display for ValueExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_expression())
    }
}

impl Serialize for ValueExtractor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Canonical<'a> {
            operations: &'a [AccessOperation],
        }

        Canonical {
            operations: &self.operations,
        }
        .serialize(serializer)
    }
}
