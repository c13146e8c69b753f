//! Resolves the environment record and prints it in the front end's shape.

use dotenvy::dotenv;

use coffee_shop_env::domain::login::LoginLink;
use coffee_shop_env::settings::{self, SettingsSources};

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let sources = SettingsSources::from_env();

    let environment = match settings::init(&sources) {
        Ok(environment) => environment,
        Err(err) => {
            log::error!("Error loading environment: {err}");
            std::process::exit(1);
        }
    };

    log::info!(
        "Loaded `{}` profile: api server {}, auth0 tenant {}",
        sources.profile,
        environment.api_server_url(),
        environment.auth0().issuer()
    );

    match LoginLink::new(environment.auth0()).build() {
        Ok(link) => log::info!("Login link: {link}"),
        Err(err) => log::warn!("Cannot build login link: {err}"),
    }

    match serde_json::to_string_pretty(environment) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("Error serializing environment: {err}");
            std::process::exit(1);
        }
    }
}
