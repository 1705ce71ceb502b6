use std::io;

use peshkariki::{CheckStatus, Credentials, OrderDetails, OrderId, PeshkarikiClient};
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
    let order_ids_raw = std::env::var("PESHKARIKI_ORDER_IDS").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "PESHKARIKI_ORDER_IDS environment variable is required (comma-separated ids)",
        )
    })?;

    let order_ids = order_ids_raw
        .split(',')
        .map(|raw| raw.trim().parse::<u64>().map(OrderId::new))
        .collect::<Result<Vec<_>, _>>()?;

    let client = PeshkarikiClient::new(Credentials::new(login, password)?).await?;
    let statuses = client
        .check_status(CheckStatus::many(order_ids.clone())?)
        .await?;
    let details = client
        .get_order_details(OrderDetails::many(order_ids)?)
        .await?;

    println!("statuses: {statuses}");
    println!("details: {details}");

    Ok(())
}
