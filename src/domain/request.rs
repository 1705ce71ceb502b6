use crate::domain::reference::{CityId, EwalletType, OrderStatusId, OrderTypeId};
use crate::domain::validation::ValidationError;
use crate::domain::value::{InnerId, OrderId, RawPhoneNumber, ServiceId, UnixTimestamp};

/// A single value or a batch of values sent under the same body field.
///
/// Peshkariki dispatches on the payload shape: a scalar asks about one entity, an array
/// about several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn many(values: Vec<T>, field: &'static str) -> Result<Self, ValidationError> {
        if values.is_empty() {
            return Err(ValidationError::Empty { field });
        }
        Ok(Self::Many(values))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// `checkStatus` request.
pub struct CheckStatus {
    order_ids: OneOrMany<OrderId>,
}

impl CheckStatus {
    pub fn one(order_id: OrderId) -> Self {
        Self {
            order_ids: OneOrMany::One(order_id),
        }
    }

    pub fn many(order_ids: Vec<OrderId>) -> Result<Self, ValidationError> {
        Ok(Self {
            order_ids: OneOrMany::many(order_ids, OrderId::FIELD)?,
        })
    }

    pub fn order_ids(&self) -> &OneOrMany<OrderId> {
        &self.order_ids
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Order details request.
pub struct OrderDetails {
    order_ids: OneOrMany<OrderId>,
}

impl OrderDetails {
    pub fn one(order_id: OrderId) -> Self {
        Self {
            order_ids: OneOrMany::One(order_id),
        }
    }

    pub fn many(order_ids: Vec<OrderId>) -> Result<Self, ValidationError> {
        Ok(Self {
            order_ids: OneOrMany::many(order_ids, OrderId::FIELD)?,
        })
    }

    pub fn order_ids(&self) -> &OneOrMany<OrderId> {
        &self.order_ids
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// `checkPhone` request.
pub struct CheckPhone {
    phones: OneOrMany<RawPhoneNumber>,
}

impl CheckPhone {
    pub fn one(phone: RawPhoneNumber) -> Self {
        Self {
            phones: OneOrMany::One(phone),
        }
    }

    pub fn many(phones: Vec<RawPhoneNumber>) -> Result<Self, ValidationError> {
        Ok(Self {
            phones: OneOrMany::many(phones, RawPhoneNumber::FIELD)?,
        })
    }

    pub fn phones(&self) -> &OneOrMany<RawPhoneNumber> {
        &self.phones
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Whether `addOrder` only prices the order or actually publishes it (`calculate`).
pub enum OrderMode {
    /// Compute the delivery cost; no order is created and no id is returned.
    #[default]
    Calculate,
    /// Publish the order to couriers.
    Publish,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Optional order-level fields of `addOrder`.
///
/// The service validates these; the client forwards them unchanged.
pub struct OrderOptions {
    pub mode: OrderMode,
    /// Pay from the Peshkariki account balance instead of cash from sender/recipient.
    pub clearing: bool,
    /// Courier collects cash for the goods from the recipient(s).
    pub cash: bool,
    /// Extra payment to the courier on top of the computed price.
    pub courier_addition: Option<u32>,
    /// Where collected cash is forwarded. Required by the service when `cash` is set.
    pub ewallet_type: Option<EwalletType>,
    /// Requisites for `ewallet_type` (card number, wallet id, ...).
    pub ewallet: Option<String>,
    pub promo_code: Option<String>,
    pub city: Option<CityId>,
    pub order_type: Option<OrderTypeId>,
    pub services: Vec<ServiceId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A goods item carried to a route point.
pub struct Item {
    pub name: String,
    /// Weight of one item.
    pub weight: u32,
    /// Price of one item.
    pub price: u32,
    pub quant: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// One address of the delivery route. The first point is the pickup point.
pub struct RoutePoint {
    pub name: Option<String>,
    pub phone: Option<RawPhoneNumber>,
    /// Only set for suburbs.
    pub city: Option<String>,
    pub street: Option<String>,
    pub building: Option<String>,
    pub apartments: Option<String>,
    pub subway_id: Option<String>,
    pub time_from: Option<UnixTimestamp>,
    pub time_to: Option<UnixTimestamp>,
    /// Free-form comment for the courier.
    pub target: Option<String>,
    /// Return undelivered goods here. Defaults to the pickup point on the service side.
    pub return_dot: bool,
    /// Delivery fee the courier collects at this point and returns to the customer.
    pub delivery_price_to_return: Option<u32>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One order of an `addOrder` request.
pub struct Order {
    inner_id: InnerId,
    comment: String,
    route: Vec<RoutePoint>,
    options: OrderOptions,
}

impl Order {
    /// `comment` is a short description of the goods ("headphones", "documents").
    pub fn new(
        inner_id: InnerId,
        comment: impl Into<String>,
        route: Vec<RoutePoint>,
        options: OrderOptions,
    ) -> Self {
        Self {
            inner_id,
            comment: comment.into(),
            route,
            options,
        }
    }

    pub fn inner_id(&self) -> &InnerId {
        &self.inner_id
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn route(&self) -> &[RoutePoint] {
        &self.route
    }

    pub fn options(&self) -> &OrderOptions {
        &self.options
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// `addOrder` request.
pub struct AddOrder {
    orders: Vec<Order>,
}

impl AddOrder {
    pub fn one(order: Order) -> Self {
        Self {
            orders: vec![order],
        }
    }

    pub fn many(orders: Vec<Order>) -> Result<Self, ValidationError> {
        if orders.is_empty() {
            return Err(ValidationError::Empty { field: "orders" });
        }
        Ok(Self { orders })
    }

    /// Minimal order with no route, mirroring the simplest form the service accepts.
    pub fn simple(
        inner_id: InnerId,
        comment: impl Into<String>,
        mode: OrderMode,
    ) -> Self {
        Self::one(Order::new(
            inner_id,
            comment,
            Vec::new(),
            OrderOptions {
                mode,
                ..Default::default()
            },
        ))
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub order_id: OrderId,
    pub status: OrderStatusId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// `changeStatus` request.
pub struct ChangeStatus {
    changes: Vec<StatusChange>,
}

impl ChangeStatus {
    pub fn one(order_id: OrderId, status: impl Into<OrderStatusId>) -> Self {
        let status = status.into();
        Self {
            changes: vec![StatusChange { order_id, status }],
        }
    }

    pub fn many(changes: Vec<StatusChange>) -> Result<Self, ValidationError> {
        if changes.is_empty() {
            return Err(ValidationError::Empty { field: "orders" });
        }
        Ok(Self { changes })
    }

    pub fn changes(&self) -> &[StatusChange] {
        &self.changes
    }
}
