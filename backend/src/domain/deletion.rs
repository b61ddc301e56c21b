//! Soft versus hard deletion.

/// How a delete request removes a record.
///
/// Soft deletes flip the `deleted` flag and keep the row; hard deletes remove
/// it and let the store cascade join rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    /// Mark the record deleted.
    #[default]
    Soft,
    /// Remove the record.
    Hard,
}

impl DeleteMode {
    /// Map the `soft` query flag onto a mode.
    #[must_use]
    pub const fn from_soft_flag(soft: bool) -> Self {
        if soft { Self::Soft } else { Self::Hard }
    }
}
