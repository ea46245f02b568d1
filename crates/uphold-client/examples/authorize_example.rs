/*
[INPUT]:  UPHOLD_* environment variables, authorization code argument
[OUTPUT]: Authorization link, access token and current user
[POS]:    Examples - web authorization flow demonstration
[UPDATE]: When the authorization flow changes
*/

use std::sync::Arc;

use uphold_client::*;

/// Example: Web authorization flow
///
/// 1. Load configuration from the environment (sandbox by default)
/// 2. Print the authorization link for every supported scope
/// 3. Exchange the code passed as first argument for a token
/// 4. Fetch the user owning the token
#[tokio::main]
async fn main() {
    let config = Arc::new(UpholdConfig::from_env());
    if let Err(e) = logging::init_from_config(&config) {
        eprintln!("Failed to initialize logging: {}", e);
        return;
    }

    println!("=== Uphold Authorization Example ===\n");
    println!("Open in a browser:\n  {}\n", config.web_authorization_all_scopes_url());

    let Some(code) = std::env::args().nth(1) else {
        println!("Re-run with the returned code: cargo run --example authorize_example -- <code>");
        return;
    };

    let uphold = Uphold::new(config);
    let token = match uphold.authorize_by_code(&code).await {
        Ok(token) => token,
        Err(e) => {
            eprintln!("Authorization failed (status {}): {}", e.status_code(), e);
            return;
        }
    };
    println!("✓ Access token obtained ({})", token.token_type);

    match uphold.get_user(&token.access_token).await {
        Ok(user) => println!("✓ Authorized as {}", user.email),
        Err(e) => eprintln!("Failed to fetch user: {}", e),
    }
}
