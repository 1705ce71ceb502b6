use std::io;

use peshkariki::{Credentials, PeshkarikiClient};
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

    let client = PeshkarikiClient::new(Credentials::new(login, password)?).await?;
    let balance = client.check_balance().await?;
    let services = client.get_services_list().await?;

    println!("balance: {balance}");
    println!("services: {services}");

    Ok(())
}
