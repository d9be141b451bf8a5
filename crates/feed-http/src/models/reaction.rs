//! Reaction wire models

use serde::Deserialize;

/// Body of `GET /reactions/{id}?type=...`
///
/// The documented schema is a bare JSON boolean. Older servers answer with
/// `{"reacted": bool}` or `null`; all shapes are resolved here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ReactedFlag {
    Flag(bool),
    Object { reacted: bool },
    Absent(()),
}

impl ReactedFlag {
    /// Whether the current actor has reacted
    pub fn reacted(self) -> bool {
        match self {
            Self::Flag(reacted) | Self::Object { reacted } => reacted,
            Self::Absent(()) => false,
        }
    }
}
