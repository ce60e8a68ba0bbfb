//! Window origins.
//!
//! An origin is either a tuple origin such as `http://localhost:3000` or the
//! opaque origin reported for documents loaded from `file://`, which
//! serializes as the literal string `"null"`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// String form of the opaque origin.
pub const OPAQUE_ORIGIN: &str = "null";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Origin {
    /// `scheme://host[:port]`
    Tuple(String),
    /// Origin-less context (`file://` frames, sandboxed frames).
    Opaque,
}

impl Origin {
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        if origin == OPAQUE_ORIGIN {
            Origin::Opaque
        } else {
            Origin::Tuple(origin)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Origin::Tuple(s) => s,
            Origin::Opaque => OPAQUE_ORIGIN,
        }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, Origin::Opaque)
    }
}

impl From<String> for Origin {
    fn from(s: String) -> Self {
        Origin::new(s)
    }
}

impl From<&str> for Origin {
    fn from(s: &str) -> Self {
        Origin::new(s)
    }
}

impl From<Origin> for String {
    fn from(origin: Origin) -> Self {
        match origin {
            Origin::Tuple(s) => s,
            Origin::Opaque => OPAQUE_ORIGIN.to_string(),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
