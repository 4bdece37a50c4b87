use anyhow::Context;
use serde_json::json;

use xguard::dom::Document;
use xguard::{install_global_listeners, GuardConfig, Guards};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {}", path))?;
            GuardConfig::from_json_str(&content)?
        }
        None => GuardConfig::default(),
    };

    let _listeners = install_global_listeners(config.listeners.clone())?;
    let guards = Guards::builder().config(config).build()?;

    println!("=== xguard ===\n");

    // 1. Check code for syntax errors
    let code = "function test() { console.log('Hello'); }";
    println!("{}", guards.check_syntax(code));

    // 2. Safely access nested properties
    let obj = json!({ "user": { "name": "John" } });
    println!("{}", guards.safe_access(&obj, "user.name", None));
    println!("{}", guards.safe_access(&obj, "user.age", None));

    // 3. Safe DOM query
    let document = Document::new();
    if let Some(element) = guards.safe_query_selector("#myElement", &document, None) {
        println!("found element {}", element);
    }

    // 4. Safe JSON parsing
    let data = guards.safe_json_parse(r#"{"name": "John"}"#, None);
    println!("{}", data);

    Ok(())
}
