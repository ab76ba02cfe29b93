//! Identifiers for accounts and characters
//!
//! Both wrap a UUID so an account id can never be passed where a character
//! id is expected. They render and parse as the plain hyphenated UUID.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// A fresh random id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

uuid_id!(
    /// The external account that owns a character
    AccountId
);
uuid_id!(
    /// A player character
    CharacterId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse_agree() {
        let id = CharacterId::new();
        assert_eq!(id.to_string().parse::<CharacterId>().unwrap(), id);
        assert!("not-a-uuid".parse::<AccountId>().is_err());
    }

    #[test]
    fn test_serializes_as_bare_uuid() {
        let id = AccountId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
