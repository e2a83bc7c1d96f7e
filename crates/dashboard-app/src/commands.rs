use anyhow::Result;
use dashboard_auth::{ApiClient, Credentials, SessionResolver};
use dashboard_core::config::AppConfig;
use dashboard_store::KeyValueStore;
use serde_json::Value;

use crate::setup::create_store;

pub async fn login(config: &AppConfig, username: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ")?,
    };
    let credentials = Credentials::new(username, password);
    credentials.validate()?;

    let store = create_store(config).await?;
    let resolver = SessionResolver::from_config(config, store)?;
    let session = resolver.resolve(&credentials).await?;
    println!(
        "Logged in to {} as {} ({})",
        session.backend.display_name(),
        session.user.username,
        session.user.role_label()
    );
    Ok(())
}

pub async fn logout(config: &AppConfig) -> Result<()> {
    let store = create_store(config).await?;
    SessionResolver::from_config(config, store)?.logout().await?;
    println!("Logged out");
    Ok(())
}

pub async fn clear_cache(config: &AppConfig) -> Result<()> {
    let store = create_store(config).await?;
    store.clear_cache().await?;
    println!("Cache cleared");
    Ok(())
}

pub async fn whoami(config: &AppConfig) -> Result<()> {
    let store = create_store(config).await?;
    match store.load_session().await? {
        Some(session) => {
            println!(
                "{}\t{}\t{}",
                session.backend,
                session.user.username,
                session.user.role_label()
            );
            let brands = if session.backend.supports_brands() {
                "enabled"
            } else {
                "unavailable"
            };
            println!("brands: {brands}");
        }
        None => println!("Not logged in"),
    }
    Ok(())
}

pub async fn get(config: &AppConfig, path: String) -> Result<()> {
    let store = create_store(config).await?;
    let client = ApiClient::from_store(config, store).await?;
    let body: Value = client.get_json(&path).await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
