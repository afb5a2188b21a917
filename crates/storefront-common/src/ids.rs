//! Typed ID wrappers for the storefront entities.
//!
//! Each ID is a newtype over the `i64` primary key stored in SQLite, so a
//! `CustomerId` cannot be passed where an `OrderId` is expected. IDs are
//! assigned by the caller (the seed dataset), never generated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generate a newtype ID wrapper over `i64`.
///
/// The macro produces a struct with:
/// - `get()` returning the raw key
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`,
///   `Serialize`, `Deserialize`
/// - `Display` and `FromStr` delegating to the inner integer
/// - `From<i64>` and `Into<i64>` conversions
macro_rules! typed_id {
    ($($(#[doc = $doc:expr])* $name:ident),+ $(,)?) => {
        $(
            $(#[doc = $doc])*
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            )]
            #[serde(transparent)]
            pub struct $name(i64);

            impl $name {
                /// Return the raw primary key.
                #[must_use]
                pub const fn get(self) -> i64 {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl FromStr for $name {
                type Err = std::num::ParseIntError;

                fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                    s.trim().parse::<i64>().map(Self)
                }
            }

            impl From<i64> for $name {
                fn from(raw: i64) -> Self {
                    Self(raw)
                }
            }

            impl From<$name> for i64 {
                fn from(id: $name) -> Self {
                    id.0
                }
            }
        )+
    };
}

typed_id! {
    /// Identifier of a customer row.
    CustomerId,
    /// Identifier of a product row.
    ProductId,
    /// Identifier of an order row.
    OrderId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn roundtrip_i64() {
        let id = CustomerId::from(6);
        let raw: i64 = id.into();
        assert_eq!(raw, 6);
        assert_eq!(id.get(), 6);
    }

    #[test]
    fn display_and_from_str() {
        let id: OrderId = " 5 ".parse().unwrap();
        assert_eq!(id, OrderId::from(5));
        assert_eq!(id.to_string(), "5");
    }

    #[test]
    fn invalid_from_str() {
        assert!("five".parse::<ProductId>().is_err());
    }

    #[test]
    fn serde_is_transparent() {
        let json = serde_json::to_string(&ProductId::from(7)).unwrap();
        assert_eq!(json, "7");
        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(), 7);
    }

    #[test]
    fn ordered_like_the_key() {
        let set: BTreeSet<_> = [3, 1, 2].into_iter().map(CustomerId::from).collect();
        let ordered: Vec<i64> = set.into_iter().map(CustomerId::get).collect();
        assert_eq!(ordered, vec![1, 2, 3]);
    }
}
