//! Login/logout command handlers.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use shelf_core::auth::{IdentityClient, SessionStore};
use shelf_core::config::{Config, paths};

pub async fn run_login(config: &Config, email: Option<&str>) -> Result<()> {
    let email = match email {
        Some(value) => value.to_string(),
        None => prompt("Email: ")?,
    };
    let secret = prompt("Password: ")?;

    let client = IdentityClient::new(&config.identity.base_url, &config.identity.api_key);
    let session = client.sign_in(&email, &secret).await?;

    let store = SessionStore::new();
    store.establish(session.clone())?;
    println!("Signed in as {}", session.email);
    Ok(())
}

pub fn run_logout() -> Result<()> {
    if !paths::session_path().exists() {
        println!("Not signed in.");
        return Ok(());
    }

    SessionStore::new().sign_out()?;
    println!("Signed out.");
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush().context("flush prompt")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read input")?;
    Ok(line.trim().to_string())
}
