use ct_domain::config::{Config, ProviderKind};

#[test]
fn default_host_is_localhost() {
    let config = Config::default();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 5000);
}

#[test]
fn default_cors_allows_only_localhost() {
    let config = Config::default();
    assert!(config.server.cors.allowed_origins.contains(&"http://localhost:*".to_string()));
    assert!(config.server.cors.allowed_origins.contains(&"http://127.0.0.1:*".to_string()));
}

#[test]
fn conversation_defaults_match_training_scenario() {
    let config = Config::default();
    assert_eq!(config.conversation.default_session_key, "default");
    assert_eq!(config.conversation.context_window_turns, 20);
    assert_eq!(config.conversation.ceiling(), Some(10));
}

#[test]
fn full_config_parses() {
    let toml_str = r#"
[server]
host = "0.0.0.0"
port = 8000

[llm]
provider = "ollama"
base_url = "http://gpu-box:11434"
timeout_ms = 30000

[llm.models]
moderation = "llama3.2"
generation = "3.1swallow 8B"
scoring = "3.1swallow 8B"

[conversation]
context_window_turns = 10
turn_ceiling = 3

[classifier]
farewell_keywords = ["goodbye", "end"]
error_keywords = ["error"]
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.llm.provider, ProviderKind::Ollama);
    assert_eq!(config.llm.models.generation, "3.1swallow 8B");
    assert_eq!(config.conversation.ceiling(), Some(3));
    assert_eq!(config.classifier.farewell_keywords, vec!["goodbye", "end"]);
    // Unspecified list keeps its default.
    assert_eq!(config.classifier.question_markers, vec!["?", "？"]);
}

#[test]
fn toml_roundtrip_preserves_ceiling() {
    let mut config = Config::default();
    config.conversation.turn_ceiling = 4;
    let raw = toml::to_string_pretty(&config).unwrap();
    let back: Config = toml::from_str(&raw).unwrap();
    assert_eq!(back.conversation.ceiling(), Some(4));
}
