//! Ids from Peshkariki's reference appendices (statuses, payment systems, cities, order
//! types).
//!
//! The service owns these tables, so any integer is accepted and sent on the wire as is.

use std::fmt;

macro_rules! reference_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            /// Body field name used by Peshkariki.
            pub const FIELD: &'static str = $field;

            pub fn new(id: u32) -> Self {
                Self(id)
            }

            /// Id as sent to Peshkariki.
            pub fn id(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

reference_id!(
    /// Order status id, as reported by `checkStatus` and accepted by `changeStatus`.
    OrderStatusId,
    "status"
);

reference_id!(
    /// Payment system that receives cash collected by the courier (`ewalletType`).
    EwalletType,
    "ewalletType"
);

reference_id!(
    /// City the delivery happens in (`city_id`).
    CityId,
    "city_id"
);

reference_id!(
    /// Kind of order, which decides the courier type (`order_type_id`).
    OrderTypeId,
    "order_type_id"
);
