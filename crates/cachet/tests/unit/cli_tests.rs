//! Command Line Tests

use cachet::cli::{Cli, Command, execute, write_backends, write_config};
use cachet::infrastructure::config::AppConfig;
use cachet::{CacheConfig, CacheProvider};
use clap::Parser;
use serde_json::json;
use std::time::Duration;

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_parse_get_with_global_config() {
    let cli = Cli::try_parse_from(["cachet", "get", "u:1", "--config", "/etc/cachet.toml"]).unwrap();
    assert_eq!(cli.command, Command::Get { key: "u:1".to_string() });
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/etc/cachet.toml"))
    );
}

#[test]
fn test_parse_set_with_ttl() {
    let cli = Cli::try_parse_from(["cachet", "set", "u:1", r#"{"id":1}"#, "--ttl", "10m"]).unwrap();
    assert_eq!(
        cli.command,
        Command::Set {
            key: "u:1".to_string(),
            value: json!({"id": 1}),
            ttl: Some(Duration::from_secs(600)),
        }
    );
}

#[test]
fn test_parse_set_rejects_invalid_json() {
    assert!(Cli::try_parse_from(["cachet", "set", "u:1", "{not json"]).is_err());
}

#[test]
fn test_parse_set_rejects_invalid_ttl() {
    assert!(Cli::try_parse_from(["cachet", "set", "u:1", "1", "--ttl", "soon"]).is_err());
}

#[test]
fn test_parse_del_requires_keys() {
    assert!(Cli::try_parse_from(["cachet", "del"]).is_err());

    let cli = Cli::try_parse_from(["cachet", "del", "a", "b"]).unwrap();
    assert_eq!(
        cli.command,
        Command::Del {
            keys: vec!["a".to_string(), "b".to_string()]
        }
    );
}

#[test]
fn test_parse_not_found() {
    let cli = Cli::try_parse_from(["cachet", "not-found", "u:2"]).unwrap();
    assert_eq!(cli.command, Command::NotFound { key: "u:2".to_string() });
}

#[tokio::test]
async fn test_execute_set_get_del() {
    let provider = CacheProvider::new(CacheConfig::memory().with_key_prefix("cli")).unwrap();
    let cache = provider.cache();

    let mut out = Vec::new();
    execute(
        &Command::Set {
            key: "u:1".to_string(),
            value: json!({"id": 1, "name": "A"}),
            ttl: None,
        },
        cache,
        &mut out,
    )
    .await
    .unwrap();
    assert_eq!(output(out), "OK\n");

    let mut out = Vec::new();
    execute(&Command::Get { key: "u:1".to_string() }, cache, &mut out)
        .await
        .unwrap();
    let printed: serde_json::Value = serde_json::from_str(output(out).trim()).unwrap();
    assert_eq!(printed, json!({"id": 1, "name": "A"}));

    let mut out = Vec::new();
    execute(
        &Command::Del {
            keys: vec!["u:1".to_string()],
        },
        cache,
        &mut out,
    )
    .await
    .unwrap();

    let mut out = Vec::new();
    let err = execute(&Command::Get { key: "u:1".to_string() }, cache, &mut out)
        .await
        .unwrap_err();
    assert!(err.is_miss());
    assert!(out.is_empty());

    provider.close().await.unwrap();
}

#[tokio::test]
async fn test_execute_not_found_reports_placeholder() {
    let provider = CacheProvider::new(CacheConfig::memory()).unwrap();
    let cache = provider.cache();

    let mut out = Vec::new();
    execute(&Command::NotFound { key: "u:2".to_string() }, cache, &mut out)
        .await
        .unwrap();

    let err = execute(&Command::Get { key: "u:2".to_string() }, cache, &mut Vec::new())
        .await
        .unwrap_err();
    assert!(err.is_placeholder());

    provider.close().await.unwrap();
}

#[tokio::test]
async fn test_execute_rejects_config_command() {
    let provider = CacheProvider::new(CacheConfig::memory()).unwrap();
    let err = execute(&Command::Config, provider.cache(), &mut Vec::new())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("config command"));
}

#[test]
fn test_write_backends_lists_registered() {
    let mut out = Vec::new();
    write_backends(&mut out).unwrap();
    let out = output(out);

    let names: Vec<&str> = out
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(names, vec!["memory", "redis", "redis_cluster"]);
}

#[test]
fn test_write_config_fills_defaults() {
    let mut config = AppConfig::default();
    config.cache.key_prefix = "app".to_string();
    config.cache.default_ttl_secs = 0;

    let mut out = Vec::new();
    write_config(&config, &mut out).unwrap();
    let rendered = output(out);

    let parsed: AppConfig = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed.cache.key_prefix, "app");
    assert_eq!(parsed.cache.default_ttl_secs, 86_400);
    assert!(rendered.contains("type = \"memory\""));
}
