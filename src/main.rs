use ost_client::{ListParams, OstClient, OstConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Reads OST_API_KEY / OST_API_SECRET (and optionally OST_BASE_URL) from .env or the environment
    #[cfg(feature = "env-file")]
    let config = OstConfig::from_env_file("OST")?;
    #[cfg(not(feature = "env-file"))]
    let config = OstConfig::from_env("OST")?;

    let client = OstClient::from_config(config)?;
    println!("Connected to {}", client.base_url());

    let users = client.users().list(ListParams::default().limit(5)).await?;
    println!("Found {} users", users.len());
    for user in &users {
        println!(
            "User {} ({}), balance {}",
            user.id,
            user.name.as_deref().unwrap_or("<unnamed>"),
            user.token_balance
        );
    }

    let actions = client.actions().list(ListParams::default().limit(5)).await?;
    for action in &actions {
        println!(
            "Action {}: {} [{} / {}]",
            action.id, action.name, action.kind, action.currency
        );
    }

    Ok(())
}
