//! Error types for the class runtime.

use derive_more::{Display, Error, From};

use crate::strategy::Strategy;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything the runtime can report back to a caller.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    #[display("{_0}")]
    Capability(CapabilityError),

    #[display("{_0}")]
    Member(MemberError),

    #[display("{_0}")]
    Strategy(UnknownStrategy),
}

/// Live inheritance was requested but the configured strategy has no
/// delegation support at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("live inheritance is unavailable: composition strategy is `{strategy}`")]
pub struct CapabilityError {
    #[error(not(source))]
    pub strategy: Strategy,
}

/// Failure to dispatch a call through a namespace chain.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MemberError {
    #[display("no member named `{key}`")]
    Missing { key: String },

    #[display("member `{key}` is not callable")]
    NotCallable { key: String },
}

impl MemberError {
    pub(crate) fn missing(key: &str) -> Self {
        MemberError::Missing {
            key: key.to_string(),
        }
    }

    pub(crate) fn not_callable(key: &str) -> Self {
        MemberError::NotCallable {
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            MemberError::Missing { key } | MemberError::NotCallable { key } => key,
        }
    }
}

/// A strategy name that is not one of `none`, `snapshot` or `live`.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("unknown composition strategy `{_0}` (expected none, snapshot or live)")]
pub struct UnknownStrategy(#[error(not(source))] pub String);
