//! Typed Rust client for the Peshkariki courier delivery HTTP API.
//!
//! The crate is split into a domain layer of strong types, a transport layer for the
//! JSON wire format and response envelope, and a small client layer that owns the
//! session token and orchestrates requests.
//!
//! Every call is a JSON `POST` to `https://api.peshkariki.ru/commonApi/<method>`. The
//! client logs in when it is built, attaches the token to each request, and when the
//! service reports the token as invalid (error code 12) logs in once more and repeats
//! the call once.
//!
//! ```rust,no_run
//! use peshkariki::{CheckStatus, Credentials, OrderId, PeshkarikiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), peshkariki::PeshkarikiError> {
//!     let client = PeshkarikiClient::new(Credentials::new("login", "password")?).await?;
//!     let status = client.check_status(CheckStatus::one(OrderId::new(42))).await?;
//!     println!("{status}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    Credentials, PeshkarikiClient, PeshkarikiClientBuilder, PeshkarikiError, RequestOptions,
};
pub use domain::{
    AddOrder, ChangeStatus, CheckPhone, CheckStatus, CityId, ErrorCode, EwalletType, InnerId,
    Item, KnownErrorCode, Login, OneOrMany, Order, OrderDetails, OrderId, OrderMode,
    OrderOptions, OrderStatusId, OrderTypeId, Password, PhoneNumber, RawPhoneNumber, RoutePoint,
    ServiceError, ServiceId, StatusChange, Token, UnixTimestamp, ValidationError,
};
