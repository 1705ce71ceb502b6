//! Domain layer: strong types with validation and invariants (no I/O).

mod reference;
mod request;
mod response;
mod validation;
mod value;

pub use reference::{CityId, EwalletType, OrderStatusId, OrderTypeId};
pub use request::{
    AddOrder, ChangeStatus, CheckPhone, CheckStatus, Item, OneOrMany, Order, OrderDetails,
    OrderMode, OrderOptions, RoutePoint, StatusChange,
};
pub use response::ServiceError;
pub use validation::ValidationError;
pub use value::{
    ErrorCode, InnerId, KnownErrorCode, Login, OrderId, Password, PhoneNumber, RawPhoneNumber,
    ServiceId, Token, UnixTimestamp,
};
