//! Type-safe identifiers for curriculum entities.
//!
//! Superblocks and blocks are keyed by their dashed name (which is also the
//! file name they are stored under); challenges by an opaque id. All three
//! reject the empty string and anything that could escape a directory when
//! joined into a path, and can be used to look up `&str` keys in maps.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An identifier that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {kind} \"{value}\": {reason}")]
pub struct InvalidIdentifier {
    /// Which identifier type rejected the input
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
    /// What is wrong with it
    pub reason: &'static str,
}

fn check_identifier(kind: &'static str, id: &str) -> Result<(), InvalidIdentifier> {
    let reason = if id.is_empty() {
        "identifier must not be empty"
    } else if id.contains(['/', '\\']) || id == "." || id == ".." {
        "identifier must not be a path"
    } else {
        return Ok(());
    };

    Err(InvalidIdentifier {
        kind,
        value: id.to_string(),
        reason,
    })
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new validated identifier.
            ///
            /// # Errors
            ///
            /// Returns an error if the identifier is empty or contains a
            /// path separator.
            pub fn new(id: impl Into<String>) -> Result<Self, InvalidIdentifier> {
                let id = id.into();
                check_identifier($kind, &id)?;
                Ok(Self(id))
            }

            /// Get the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = InvalidIdentifier;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidIdentifier;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

identifier!(
    /// Dashed name of a superblock, e.g. `responsive-web-design`.
    ///
    /// # Example
    ///
    /// ```
    /// use curriculum_types::SuperblockId;
    ///
    /// let id = SuperblockId::new("responsive-web-design").unwrap();
    /// assert_eq!(id.as_str(), "responsive-web-design");
    /// assert!(SuperblockId::new("").is_err());
    /// ```
    SuperblockId,
    "superblock id"
);

identifier!(
    /// Dashed name of a block, e.g. `basic-html-and-html5`.
    BlockId,
    "block id"
);

identifier!(
    /// Challenge identifier (an ObjectId-style hex string upstream).
    ChallengeId,
    "challenge id"
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_identifier_validation() {
        assert!(BlockId::new("basic-html-and-html5").is_ok());
        assert!(ChallengeId::new("bd7123c8c441eddfaeb5bdef").is_ok());

        let err = BlockId::new("").unwrap_err();
        assert_eq!(err.kind, "block id");
    }

    #[test]
    fn test_path_like_identifiers_rejected() {
        for bad in ["../secrets", "nested/block", "a\\b", "..", "."] {
            let err = BlockId::new(bad).unwrap_err();
            assert_eq!(err.reason, "identifier must not be a path");
        }
        assert!(SuperblockId::new("2022/responsive-web-design").is_err());
        assert!(BlockId::new("es6..features").is_ok());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = SuperblockId::new("responsive-web-design").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"responsive-web-design\"");

        let back: SuperblockId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_empty_identifier_rejected_on_deserialize() {
        let result: Result<Vec<BlockId>, _> = serde_json::from_str(r#"["ok", ""]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(BlockId::new("basic-css").unwrap(), 1);
        assert_eq!(map.get("basic-css"), Some(&1));
        assert_eq!(map.get("ghost-block"), None);
    }
}
