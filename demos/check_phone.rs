use std::io;

use peshkariki::{CheckPhone, Credentials, PeshkarikiClient, PhoneNumber, RawPhoneNumber};
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
    let phone = std::env::var("PESHKARIKI_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "PESHKARIKI_PHONE environment variable is required",
        )
    })?;

    let phone: RawPhoneNumber =
        PhoneNumber::parse(Some(phonenumber::country::Id::RU), phone)?.into();

    let client = PeshkarikiClient::new(Credentials::new(login, password)?).await?;
    let response = client.check_phone(CheckPhone::one(phone)).await?;

    println!("phone check: {response}");

    Ok(())
}
