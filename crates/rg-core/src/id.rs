//! Identifiers for chat groups and the members acting in them.

use serde::{Deserialize, Serialize};

/// A chat group. Each group plays its own independent game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

/// A chat member issuing a command or sending a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            /// Wrap a raw platform identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $ty {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $ty {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(GroupId);
string_id!(ActorId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_raw_id() {
        assert_eq!(GroupId::from("123456").to_string(), "123456");
        assert_eq!(ActorId::new(String::from("alice")).as_str(), "alice");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&GroupId::from("g1")).unwrap();
        assert_eq!(json, "\"g1\"");
    }
}
