use std::io;

use peshkariki::{
    AddOrder, CityId, Credentials, InnerId, Item, Order, OrderMode, OrderOptions,
    PeshkarikiClient, RawPhoneNumber, RoutePoint,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let login = std::env::var("PESHKARIKI_LOGIN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "PESHKARIKI_LOGIN environment variable is required",
        )
    })?;
    let password = std::env::var("PESHKARIKI_PASSWORD").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "PESHKARIKI_PASSWORD environment variable is required",
        )
    })?;

    let city_id = std::env::var("PESHKARIKI_CITY_ID")
        .ok()
        .map(|raw| raw.trim().parse::<u32>())
        .transpose()?;

    let pickup = RoutePoint {
        name: Some("Warehouse".to_owned()),
        phone: Some(RawPhoneNumber::new("+74950000000")?),
        street: Some("Tverskaya".to_owned()),
        building: Some("1".to_owned()),
        ..Default::default()
    };
    let drop_off = RoutePoint {
        name: Some("Recipient".to_owned()),
        phone: Some(RawPhoneNumber::new("+79250000000")?),
        street: Some("Arbat".to_owned()),
        building: Some("10".to_owned()),
        items: vec![Item {
            name: "Headphones".to_owned(),
            weight: 300,
            price: 2500,
            quant: 1,
        }],
        ..Default::default()
    };
    let order = Order::new(
        InnerId::new("demo-1")?,
        "Headphones",
        vec![pickup, drop_off],
        OrderOptions {
            mode: OrderMode::Calculate,
            city: city_id.map(CityId::new),
            ..Default::default()
        },
    );

    let client = PeshkarikiClient::new(Credentials::new(login, password)?).await?;
    let estimate = client.add_order(AddOrder::one(order)).await?;

    println!("estimate: {estimate}");

    Ok(())
}
