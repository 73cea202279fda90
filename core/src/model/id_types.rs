use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! impl_id {
    ($ident:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $ident(pub String);

        impl $ident {
            /// Fresh id of the form `{unix_millis}-{9 base36 chars}`.
            pub fn generate() -> Self {
                $ident(crate::util::generate_id())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $ident {
            fn from(value: String) -> Self {
                $ident(value)
            }
        }

        impl From<&str> for $ident {
            fn from(value: &str) -> Self {
                $ident(value.to_owned())
            }
        }

        impl PartialEq<str> for $ident {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl Display for $ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

impl_id!(ResourceId);
impl_id!(CategoryId);
