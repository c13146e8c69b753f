#![cfg(feature = "loader")]

use std::fs;

use coffee_shop_env::settings::{SettingsError, SettingsSources, load};
use config::Map;
use tempfile::TempDir;

fn sources(dir: &TempDir, profile: &str, env: &[(&str, &str)]) -> SettingsSources {
    SettingsSources {
        config_dir: dir.path().to_path_buf(),
        profile: profile.to_string(),
        env_overrides: Some(
            env.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Map<String, String>>(),
        ),
    }
}

fn write(dir: &TempDir, name: &str, contents: &str) {
    fs::write(dir.path().join(name), contents).unwrap();
}

#[test]
fn reads_template_values_verbatim() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "default.yaml",
        r#"
production: false
api_server_url: "http://127.0.0.1:5000"
auth0:
  url: "dev-5biwot8b"
  audience: "coffee"
  client_id: "AbjqglZv0nc2G6tVcNy0MC9z80R6ISq1"
  callback_url: "http://127.0.0.1:8100"
"#,
    );

    let environment = load(&sources(&dir, "local", &[])).unwrap();

    assert_eq!(environment.api_server_url().as_str(), "http://127.0.0.1:5000");
    assert_eq!(environment.auth0().audience().as_str(), "coffee");
    assert_eq!(
        environment.auth0().callback_url().as_str(),
        "http://127.0.0.1:8100"
    );
}

#[test]
fn layers_override_in_order() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "default.yaml",
        r#"
api_server_url: "http://default.example:5000"
auth0:
  audience: "default-audience"
  client_id: "default-client"
"#,
    );
    write(
        &dir,
        "staging.yaml",
        r#"
auth0:
  audience: "staging-audience"
  client_id: "staging-client"
"#,
    );

    let environment = load(&sources(
        &dir,
        "staging",
        &[("APP_AUTH0__CLIENT_ID", "env-client")],
    ))
    .unwrap();

    // default file beats built-ins
    assert_eq!(
        environment.api_server_url().as_str(),
        "http://default.example:5000"
    );
    // profile beats default file
    assert_eq!(environment.auth0().audience().as_str(), "staging-audience");
    // env beats profile
    assert_eq!(environment.auth0().client_id().as_str(), "env-client");
    // untouched keys keep the built-in literal
    assert_eq!(environment.auth0().url().as_str(), "dev-5biwot8b");
}

#[test]
fn other_profiles_are_ignored() {
    let dir = TempDir::new().unwrap();
    write(&dir, "production.yaml", "production: true\n");

    let environment = load(&sources(&dir, "local", &[])).unwrap();
    assert!(!environment.production());
}

#[test]
fn production_profile_with_https_urls_loads() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "production.yaml",
        r#"
production: true
api_server_url: "https://api.coffee.example"
auth0:
  callback_url: "https://coffee.example"
"#,
    );

    let environment = load(&sources(&dir, "production", &[])).unwrap();
    assert!(environment.production());
    assert!(environment.api_server_url().is_https());
}

#[test]
fn production_rejects_plain_http_callback() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "production.yaml",
        r#"
production: true
api_server_url: "https://api.coffee.example"
"#,
    );

    let err = load(&sources(&dir, "production", &[])).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::InsecureUrl {
            field: "auth0.callback_url"
        }
    ));
}

#[test]
fn tenant_domain_with_scheme_is_rejected() {
    let dir = TempDir::new().unwrap();

    let err = load(&sources(
        &dir,
        "local",
        &[("APP_AUTH0__URL", "https://dev-5biwot8b.auth0.com")],
    ))
    .unwrap_err();

    match err {
        SettingsError::Field(field) => assert_eq!(field.field, "auth0.url"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_yaml_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    write(&dir, "default.yaml", "auth0: [unclosed\n");

    assert!(matches!(
        load(&sources(&dir, "local", &[])).unwrap_err(),
        SettingsError::Config(_)
    ));
}
