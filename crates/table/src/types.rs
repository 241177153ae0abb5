use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseEnumError;

/// Billing mode applied when none is declared.
pub const DEFAULT_BILLING_MODE: BillingMode = BillingMode::Provisioned;

/// Read capacity units applied when none are declared.
pub const DEFAULT_READ_CAPACITY: i64 = 3;

/// Write capacity units applied when none are declared.
pub const DEFAULT_WRITE_CAPACITY: i64 = 3;

/// Implements `as_str`, `Display` and `FromStr` for an enum whose variants
/// map one-to-one onto the service's string constants.
macro_rules! wire_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The string the service uses for this value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(ParseEnumError {
                        kind: $kind,
                        value: s.to_owned(),
                    }),
                }
            }
        }
    };
}

/// Scalar type of a key attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    /// String.
    S,
    /// Number.
    N,
    /// Binary.
    B,
}

wire_enum!(ScalarType, "scalar attribute type", {
    S => "S",
    N => "N",
    B => "B",
});

/// Role of an attribute within a key schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyType {
    /// Partition key.
    Hash,
    /// Sort key.
    Range,
}

wire_enum!(KeyType, "key type", {
    Hash => "HASH",
    Range => "RANGE",
});

/// How the table is billed for reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingMode {
    /// Fixed read/write capacity units.
    #[default]
    Provisioned,
    /// On-demand; no throughput is declared.
    PayPerRequest,
}

wire_enum!(BillingMode, "billing mode", {
    Provisioned => "PROVISIONED",
    PayPerRequest => "PAY_PER_REQUEST",
});

/// Which item attributes are copied into a secondary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectionType {
    /// Only the index and table keys.
    KeysOnly,
    /// Every attribute.
    All,
    /// The keys plus an explicit list of non-key attributes.
    Include,
}

wire_enum!(ProjectionType, "projection type", {
    KeysOnly => "KEYS_ONLY",
    All => "ALL",
    Include => "INCLUDE",
});

/// What a table stream record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamViewType {
    KeysOnly,
    NewImage,
    OldImage,
    NewAndOldImages,
}

wire_enum!(StreamViewType, "stream view type", {
    KeysOnly => "KEYS_ONLY",
    NewImage => "NEW_IMAGE",
    OldImage => "OLD_IMAGE",
    NewAndOldImages => "NEW_AND_OLD_IMAGES",
});

/// A named, typed attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: ScalarType,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<String>, attribute_type: ScalarType) -> Self {
        Self {
            name: name.into(),
            attribute_type,
        }
    }
}
