//! Newtype IDs for catalog entities.
//!
//! Every admin resource gets its own ID type so a product ID can never be
//! passed where an order ID is expected.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `new()`, `as_i32()`, `Display`, `FromStr`
/// - `From<i32>` and `Into<i32>` implementations
///
/// # Example
///
/// ```rust
/// # use souq_core::define_id;
/// define_id!(CouponId);
/// define_id!(ShipmentId);
///
/// let coupon = CouponId::new(1);
/// let parsed: CouponId = "1".parse().unwrap();
/// assert_eq!(coupon, parsed);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(CategoryId);
define_id!(OrderId);
define_id!(AffiliateId);
define_id!(WholesalerId);
define_id!(PlanId);
define_id!(AdminUserId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parse_trims_whitespace() {
        let id: ProductId = " 42 ".parse().unwrap();
        assert_eq!(id.as_i32(), 42);
    }

    #[test]
    fn test_id_parse_rejects_garbage() {
        assert!("abc".parse::<OrderId>().is_err());
    }

    #[test]
    fn test_id_serde_is_transparent() {
        let json = serde_json::to_string(&CategoryId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: CategoryId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CategoryId::new(7));
    }
}
