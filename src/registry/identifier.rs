use crate::error::StepError;

/// Issues `step1`, `step2`, ... for newly created steps.
///
/// One generator belongs to one editing session; hydrated steps keep their stored names and
/// never draw from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierGenerator {
    last: u64,
}

impl IdentifierGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator whose next name is `step{last + 1}`.
    pub fn starting_after(last: u64) -> Self {
        Self { last }
    }

    /// Advances the counter and returns the new name.
    pub fn next_name(&mut self) -> Result<String, StepError> {
        self.last = self
            .last
            .checked_add(1)
            .ok_or(StepError::IdentifiersExhausted(self.last))?;
        Ok(format!("step{}", self.last))
    }

    /// Moves the counter to `to`, or back to zero when `None`.
    pub fn reset(&mut self, to: Option<u64>) {
        self.last = to.unwrap_or(0);
    }

    pub fn current(&self) -> u64 {
        self.last
    }
}
