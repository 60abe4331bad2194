//! Generation guard for responses that cannot be cancelled.
//!
//! Every request is stamped with a [`Generation`] when it is issued. When it
//! resolves, its result is applied only if no newer request has been issued
//! since, which stands in for aborting the superseded network call.

use std::fmt;
use std::str::FromStr;

use crate::error::PolicyParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: u64,
}

impl GenerationCounter {
    /// Issues the stamp for a new request, superseding all earlier ones.
    pub fn advance(&mut self) -> Generation {
        self.current += 1;
        Generation(self.current)
    }

    pub fn current(&self) -> Generation {
        Generation(self.current)
    }

    pub fn is_current(&self, issued: Generation) -> bool {
        issued.0 == self.current
    }
}

/// What to do with a response that resolves after a newer request was issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StaleResponsePolicy {
    /// Discard it. Only the most recent request may update the view.
    #[default]
    LatestRequestWins,
    /// Apply it anyway: whichever response resolves last overwrites the view,
    /// even if it answers an older request.
    LastResolvedWins,
}

impl StaleResponsePolicy {
    pub fn admits(self, counter: &GenerationCounter, issued: Generation) -> bool {
        match self {
            StaleResponsePolicy::LatestRequestWins => counter.is_current(issued),
            StaleResponsePolicy::LastResolvedWins => true,
        }
    }
}

impl FromStr for StaleResponsePolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" | "latest-request" => Ok(StaleResponsePolicy::LatestRequestWins),
            "last-resolved" => Ok(StaleResponsePolicy::LastResolvedWins),
            other => Err(PolicyParseError(other.to_string())),
        }
    }
}

impl fmt::Display for StaleResponsePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StaleResponsePolicy::LatestRequestWins => write!(f, "latest"),
            StaleResponsePolicy::LastResolvedWins => write!(f, "last-resolved"),
        }
    }
}
