//! Composition strategy selection.
//!
//! Two parents are merged either by copying the second parent's own members
//! once (snapshot) or by delegating lookups to them on every access (live).
//! The strategy is an explicit [`ClassFactory`](crate::ClassFactory) setting;
//! the process-wide default used by the free functions is resolved once from
//! the environment and never changes afterwards.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use tracing::warn;

use crate::errors::UnknownStrategy;

/// Environment variable consulted for the process default.
pub const STRATEGY_ENV: &str = "PROTOCLASS_STRATEGY";

static ACTIVE: OnceLock<Strategy> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// No delegation support. Composition falls back to snapshot copies and
    /// the live-inheritance gate refuses.
    None,
    /// One-time shallow copy of the mixin's own members.
    Snapshot,
    /// Lookups consult the mixin's current own members.
    #[default]
    Live,
}

impl Strategy {
    /// The process-wide strategy, resolved on first use.
    pub fn active() -> Strategy {
        *ACTIVE.get_or_init(Strategy::from_env)
    }

    /// Pin the process-wide strategy before anything reads it.
    ///
    /// Returns the strategy that ends up active, which is the earlier one if
    /// the default was already resolved.
    pub fn install(strategy: Strategy) -> Strategy {
        *ACTIVE.get_or_init(|| strategy)
    }

    fn from_env() -> Strategy {
        Strategy::from_value(std::env::var(STRATEGY_ENV).ok().as_deref())
    }

    /// Resolve a configured value, falling back to the default when it is
    /// unset or unrecognised.
    pub(crate) fn from_value(value: Option<&str>) -> Strategy {
        let Some(value) = value else {
            return Strategy::default();
        };
        value.parse().unwrap_or_else(|err: UnknownStrategy| {
            warn!("{err}; falling back to `{}`", Strategy::default());
            Strategy::default()
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::None => "none",
            Strategy::Snapshot => "snapshot",
            Strategy::Live => "live",
        }
    }

    /// Whether composed classes see later changes to their mixin.
    pub fn is_live(self) -> bool {
        matches!(self, Strategy::Live)
    }

    /// Whether any delegation primitive exists at all.
    pub fn supports_live_inheritance(self) -> bool {
        !matches!(self, Strategy::None)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Strategy::None),
            "snapshot" => Ok(Strategy::Snapshot),
            "live" => Ok(Strategy::Live),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}
