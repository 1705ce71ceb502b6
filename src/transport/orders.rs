use serde::Serialize;
use serde_json::{Value, json};

use super::{ApiCall, TransportError};
use crate::domain::{
    AddOrder, ChangeStatus, CheckStatus, Item, OneOrMany, Order, OrderDetails, OrderId,
    OrderMode, RoutePoint,
};

const CHECK_STATUS_PATH: &str = "checkStatus";
const ADD_ORDER_PATH: &str = "addOrder";
const CHANGE_STATUS_PATH: &str = "changeStatus";
// The service answers order detail queries on the order creation method.
const ORDER_DETAILS_PATH: &str = ADD_ORDER_PATH;

#[derive(Debug, Serialize)]
struct AddOrderBody<'a> {
    orders: Vec<WireOrder<'a>>,
}

#[derive(Debug, Serialize)]
struct WireOrder<'a> {
    inner_id: &'a str,
    comment: &'a str,
    calculate: bool,
    #[serde(skip_serializing_if = "is_false")]
    clearing: bool,
    #[serde(skip_serializing_if = "is_false")]
    cash: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    courier_addition: Option<u32>,
    #[serde(rename = "ewalletType", skip_serializing_if = "Option::is_none")]
    ewallet_type: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ewallet: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    promo_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_type_id: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    route: Vec<WireRoutePoint<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    services: Vec<WireService>,
}

#[derive(Debug, Serialize)]
struct WireRoutePoint<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    street: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    building: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    apartments: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subway_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_from: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_to: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<&'a str>,
    #[serde(skip_serializing_if = "is_false")]
    return_dot: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_price_to_return: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    items: Vec<WireItem<'a>>,
}

#[derive(Debug, Serialize)]
struct WireItem<'a> {
    name: &'a str,
    weight: u32,
    price: u32,
    quant: u32,
}

#[derive(Debug, Serialize)]
struct WireService {
    service_id: u32,
}

#[derive(Debug, Serialize)]
struct ChangeStatusBody {
    orders: Vec<WireStatusChange>,
}

#[derive(Debug, Serialize)]
struct WireStatusChange {
    order_id: u64,
    status: u32,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn order_ids_value(order_ids: &OneOrMany<OrderId>) -> Value {
    match order_ids {
        OneOrMany::One(id) => json!(id.value()),
        OneOrMany::Many(ids) => ids.iter().map(|id| json!(id.value())).collect(),
    }
}

impl<'a> From<&'a Order> for WireOrder<'a> {
    fn from(order: &'a Order) -> Self {
        let options = order.options();
        Self {
            inner_id: order.inner_id().as_str(),
            comment: order.comment(),
            calculate: options.mode == OrderMode::Calculate,
            clearing: options.clearing,
            cash: options.cash,
            courier_addition: options.courier_addition,
            ewallet_type: options.ewallet_type.map(|it| it.id()),
            ewallet: options.ewallet.as_deref(),
            promo_code: options.promo_code.as_deref(),
            city_id: options.city.map(|it| it.id()),
            order_type_id: options.order_type.map(|it| it.id()),
            route: order.route().iter().map(WireRoutePoint::from).collect(),
            services: options
                .services
                .iter()
                .map(|service| WireService {
                    service_id: service.value(),
                })
                .collect(),
        }
    }
}

impl<'a> From<&'a RoutePoint> for WireRoutePoint<'a> {
    fn from(point: &'a RoutePoint) -> Self {
        Self {
            name: point.name.as_deref(),
            phone: point.phone.as_ref().map(|it| it.raw()),
            city: point.city.as_deref(),
            street: point.street.as_deref(),
            building: point.building.as_deref(),
            apartments: point.apartments.as_deref(),
            subway_id: point.subway_id.as_deref(),
            time_from: point.time_from.map(|it| it.value()),
            time_to: point.time_to.map(|it| it.value()),
            target: point.target.as_deref(),
            return_dot: point.return_dot,
            delivery_price_to_return: point.delivery_price_to_return,
            items: point.items.iter().map(WireItem::from).collect(),
        }
    }
}

impl<'a> From<&'a Item> for WireItem<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            name: &item.name,
            weight: item.weight,
            price: item.price,
            quant: item.quant,
        }
    }
}

pub fn encode_check_status(request: &CheckStatus) -> ApiCall {
    ApiCall::with_field(
        CHECK_STATUS_PATH,
        OrderId::FIELD,
        order_ids_value(request.order_ids()),
    )
}

pub fn encode_order_details(request: &OrderDetails) -> ApiCall {
    ApiCall::with_field(
        ORDER_DETAILS_PATH,
        OrderId::FIELD,
        order_ids_value(request.order_ids()),
    )
}

pub fn encode_add_order(request: &AddOrder) -> Result<ApiCall, TransportError> {
    let body = AddOrderBody {
        orders: request.orders().iter().map(WireOrder::from).collect(),
    };
    ApiCall::serialized(ADD_ORDER_PATH, &body)
}

pub fn encode_change_status(request: &ChangeStatus) -> Result<ApiCall, TransportError> {
    let body = ChangeStatusBody {
        orders: request
            .changes()
            .iter()
            .map(|change| WireStatusChange {
                order_id: change.order_id.value(),
                status: change.status.id(),
            })
            .collect(),
    };
    ApiCall::serialized(CHANGE_STATUS_PATH, &body)
}

#[cfg(test)]
mod tests {
    use crate::domain::{
        CityId, EwalletType, InnerId, OrderOptions, OrderStatusId, OrderTypeId, RawPhoneNumber,
        ServiceId, StatusChange, UnixTimestamp,
    };

    use super::*;

    fn body(call: ApiCall) -> Value {
        Value::Object(call.body)
    }

    #[test]
    fn check_status_sends_scalar_or_array() {
        let call = encode_check_status(&CheckStatus::one(OrderId::new(42)));
        assert_eq!(call.path, "checkStatus");
        assert_eq!(body(call), json!({"order_id": 42}));

        let request = CheckStatus::many(vec![OrderId::new(1), OrderId::new(2)]).unwrap();
        let call = encode_check_status(&request);
        assert_eq!(call.path, "checkStatus");
        assert_eq!(body(call), json!({"order_id": [1, 2]}));
    }

    #[test]
    fn order_details_reuse_the_add_order_path() {
        let call = encode_order_details(&OrderDetails::one(OrderId::new(7)));
        assert_eq!(call.path, "addOrder");
        assert_eq!(body(call), json!({"order_id": 7}));

        let request = OrderDetails::many(vec![OrderId::new(7), OrderId::new(8)]).unwrap();
        let call = encode_order_details(&request);
        assert_eq!(call.path, "addOrder");
        assert_eq!(body(call), json!({"order_id": [7, 8]}));
    }

    #[test]
    fn simple_add_order_sends_only_required_fields() {
        let request = AddOrder::simple(
            InnerId::new("A-1").unwrap(),
            "headphones",
            OrderMode::Calculate,
        );
        let call = encode_add_order(&request).unwrap();
        assert_eq!(call.path, "addOrder");
        assert_eq!(
            body(call),
            json!({"orders": [{"inner_id": "A-1", "comment": "headphones", "calculate": true}]})
        );
    }

    #[test]
    fn full_add_order_forwards_every_field() {
        let pickup = RoutePoint {
            name: Some("Warehouse".to_owned()),
            phone: Some(RawPhoneNumber::new("+79251234567").unwrap()),
            street: Some("Tverskaya".to_owned()),
            building: Some("1".to_owned()),
            time_from: Some(UnixTimestamp::new(1_700_000_000)),
            time_to: Some(UnixTimestamp::new(1_700_003_600)),
            return_dot: true,
            ..Default::default()
        };
        let drop_off = RoutePoint {
            name: Some("Ivan".to_owned()),
            city: Some("Khimki".to_owned()),
            apartments: Some("12".to_owned()),
            subway_id: Some("101".to_owned()),
            target: Some("call before arrival".to_owned()),
            delivery_price_to_return: Some(300),
            items: vec![Item {
                name: "CD".to_owned(),
                weight: 100,
                price: 500,
                quant: 2,
            }],
            ..Default::default()
        };
        let options = OrderOptions {
            mode: OrderMode::Publish,
            clearing: true,
            cash: true,
            courier_addition: Some(150),
            ewallet_type: Some(EwalletType::new(3)),
            ewallet: Some("4276000000000000".to_owned()),
            promo_code: Some("SPRING".to_owned()),
            city: Some(CityId::new(2)),
            order_type: Some(OrderTypeId::new(4)),
            services: vec![ServiceId::BUYOUT],
        };
        let order = Order::new(
            InnerId::new("A-2").unwrap(),
            "CD disks",
            vec![pickup, drop_off],
            options,
        );

        let call = encode_add_order(&AddOrder::one(order)).unwrap();
        assert_eq!(
            body(call),
            json!({"orders": [{
                "inner_id": "A-2",
                "comment": "CD disks",
                "calculate": false,
                "clearing": true,
                "cash": true,
                "courier_addition": 150,
                "ewalletType": 3,
                "ewallet": "4276000000000000",
                "promo_code": "SPRING",
                "city_id": 2,
                "order_type_id": 4,
                "route": [
                    {
                        "name": "Warehouse",
                        "phone": "+79251234567",
                        "street": "Tverskaya",
                        "building": "1",
                        "time_from": 1_700_000_000u64,
                        "time_to": 1_700_003_600u64,
                        "return_dot": true
                    },
                    {
                        "name": "Ivan",
                        "city": "Khimki",
                        "apartments": "12",
                        "subway_id": "101",
                        "target": "call before arrival",
                        "delivery_price_to_return": 300,
                        "items": [{"name": "CD", "weight": 100, "price": 500, "quant": 2}]
                    }
                ],
                "services": [{"service_id": 25}]
            }]})
        );
    }

    #[test]
    fn change_status_wraps_entries_in_orders() {
        let call =
            encode_change_status(&ChangeStatus::one(OrderId::new(5), OrderStatusId::new(5)))
                .unwrap();
        assert_eq!(call.path, "changeStatus");
        assert_eq!(body(call), json!({"orders": [{"order_id": 5, "status": 5}]}));

        let request = ChangeStatus::many(vec![
            StatusChange {
                order_id: OrderId::new(1),
                status: OrderStatusId::new(4),
            },
            StatusChange {
                order_id: OrderId::new(2),
                status: OrderStatusId::new(117),
            },
        ])
        .unwrap();
        let call = encode_change_status(&request).unwrap();
        assert_eq!(
            body(call),
            json!({"orders": [{"order_id": 1, "status": 4}, {"order_id": 2, "status": 117}]})
        );
    }
}
