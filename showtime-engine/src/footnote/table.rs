//! Shared lookup from footnote code to parsed rule.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::domain::Period;

use super::code::FootnoteCode;
use super::error::FootnoteError;
use super::rule::FootnoteRule;

/// What happened when a footnote was offered to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The rule was parsed and stored
    Inserted {
        /// Date tokens that looked like dates but were not valid
        rejected_dates: Vec<String>,
    },
    /// A rule for this code was already present; the hint was not parsed
    AlreadyKnown,
}

/// Thread-safe footnote lookup for one listing page.
///
/// The lock is held only around map access, never while parsing a hint, so
/// rows of the same page can be processed on several threads. The first
/// rule stored for a code wins; footnotes are assumed stable within a page.
#[derive(Debug, Default)]
pub struct FootnoteTable {
    inner: RwLock<HashMap<FootnoteCode, Arc<FootnoteRule>>>,
}

impl FootnoteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the rule for a code.
    pub fn resolve(&self, code: FootnoteCode) -> Option<Arc<FootnoteRule>> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(&code).cloned()
    }

    /// Whether a rule for `code` has been stored.
    pub fn contains(&self, code: FootnoteCode) -> bool {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard.contains_key(&code)
    }

    /// Parse `hint` and store it under `code`, unless the code is already known.
    pub fn insert(
        &self,
        code: FootnoteCode,
        hint: &str,
        period: &Period,
    ) -> Result<InsertOutcome, FootnoteError> {
        if self.contains(code) {
            return Ok(InsertOutcome::AlreadyKnown);
        }

        let parsed = FootnoteRule::parse(code, hint, period)?;
        debug!(
            %code,
            kind = ?parsed.rule.kind,
            days = parsed.rule.days.len(),
            "Parsed footnote"
        );

        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match guard.entry(code) {
            // Another caller stored this code while the hint was being parsed
            Entry::Occupied(_) => Ok(InsertOutcome::AlreadyKnown),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(parsed.rule));
                Ok(InsertOutcome::Inserted {
                    rejected_dates: parsed.rejected_dates,
                })
            }
        }
    }

    /// Number of stored rules.
    pub fn len(&self) -> usize {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard.len()
    }

    /// Whether no rules are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
