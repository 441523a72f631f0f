use core::str::FromStr;

use serde::{Deserialize, Serialize};

use campuserp_core::{DomainError, DomainResult, ValueObject};

/// Hierarchical, dash-delimited account code (e.g. `"1-01-002"`).
///
/// The number of segments encodes the level in the chart: `"1"` is a group,
/// `"1-01"` a control account under it, `"1-01-002"` a ledger account.
/// Codes are opaque strings compared verbatim; ordering is lexicographic,
/// which matches allocation order because child suffixes are zero-padded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountCode(String);

/// Width of an allocated child suffix (`000`, `001`, ...).
pub(crate) const SUFFIX_WIDTH: usize = 3;

impl AccountCode {
    /// Parse and validate a code. Every dash-separated segment must be
    /// non-empty and free of whitespace.
    pub fn parse(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::invalid_id("AccountCode: empty"));
        }
        for segment in value.split('-') {
            if segment.is_empty() || segment.chars().any(char::is_whitespace) {
                return Err(DomainError::invalid_id(format!(
                    "AccountCode: malformed segment in '{value}'"
                )));
            }
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('-')
    }

    /// Number of dash-delimited segments (= account level).
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Code of the parent in the hierarchy, if any (`"1-01-002"` → `"1-01"`).
    pub fn parent(&self) -> Option<AccountCode> {
        self.0.rsplit_once('-').map(|(head, _)| Self(head.to_string()))
    }

    /// Build a child code with a zero-padded numeric suffix.
    pub fn child(&self, suffix: u32) -> AccountCode {
        Self(format!("{}-{:0width$}", self.0, suffix, width = SUFFIX_WIDTH))
    }

    /// The trailing segment parsed as a number, if it is numeric.
    pub fn trailing_number(&self) -> Option<u32> {
        self.0.rsplit('-').next().and_then(|seg| seg.parse().ok())
    }
}

impl ValueObject for AccountCode {}

impl core::fmt::Display for AccountCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
