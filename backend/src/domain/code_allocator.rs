//! Sequential program-code allocation.
//!
//! Codes are `prefix + max(existing suffix) + 1`, zero padded to at least
//! four digits. The computation itself is pure; [`CategoryLocks`] serialises
//! callers that must hold the allocated code until it is persisted.

use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use super::program::{ProgramCategory, ProgramCode};

/// Minimum number of digits in a code suffix.
pub const CODE_DIGITS: usize = 4;

/// Failures raised while deriving the next code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeAllocationError {
    /// A stored code does not match `prefix + digits`.
    #[error("stored program code `{code}` is malformed for category {category}")]
    MalformedCode {
        /// Offending stored code.
        code: String,
        /// Category being allocated.
        category: ProgramCategory,
    },
    /// The numeric suffix cannot be incremented further.
    #[error("program codes for category {category} are exhausted")]
    Exhausted {
        /// Category being allocated.
        category: ProgramCategory,
    },
}

/// Compute the next code in `category` from every code already issued.
///
/// Deleted programs must be included in `existing` so codes are never
/// reused.
///
/// # Errors
/// Returns [`CodeAllocationError::MalformedCode`] when a stored code has the
/// wrong prefix or a non-numeric suffix, and
/// [`CodeAllocationError::Exhausted`] when the suffix would overflow.
///
/// # Examples
/// ```
/// use org_registry::domain::{next_program_code, ProgramCategory, ProgramCode};
///
/// let existing = [ProgramCode::new("BB0001"), ProgramCode::new("BB0009")];
/// let next = next_program_code(ProgramCategory::UnitBased, &existing).unwrap();
/// assert_eq!(next.as_str(), "BB0010");
/// ```
pub fn next_program_code(
    category: ProgramCategory,
    existing: &[ProgramCode],
) -> Result<ProgramCode, CodeAllocationError> {
    let prefix = category.prefix();
    let mut highest: u64 = 0;
    for code in existing {
        let suffix = parse_suffix(prefix, code.as_str()).ok_or_else(|| {
            CodeAllocationError::MalformedCode {
                code: code.to_string(),
                category,
            }
        })?;
        highest = highest.max(suffix);
    }

    let next = highest
        .checked_add(1)
        .ok_or(CodeAllocationError::Exhausted { category })?;
    Ok(ProgramCode::new(format!(
        "{prefix}{next:0width$}",
        width = CODE_DIGITS
    )))
}

fn parse_suffix(prefix: &str, code: &str) -> Option<u64> {
    let digits = code.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// One async mutex per program category.
///
/// Holding the guard across allocation and insertion keeps two concurrent
/// creations in the same process from receiving the same code.
#[derive(Debug, Clone, Default)]
pub struct CategoryLocks {
    process_based: Arc<Mutex<()>>,
    unit_based: Arc<Mutex<()>>,
}

impl CategoryLocks {
    /// Create a fresh pair of locks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `category`.
    pub async fn acquire(&self, category: ProgramCategory) -> OwnedMutexGuard<()> {
        let lock = match category {
            ProgramCategory::ProcessBased => &self.process_based,
            ProgramCategory::UnitBased => &self.unit_based,
        };
        Arc::clone(lock).lock_owned().await
    }
}
