use super::*;
use serde_json::json;

fn sample_spec() -> WebhookSpec {
    let mut configuration = WebhookConfiguration::new("https://example.com/webhook");
    configuration.content_type = ContentType::Json;
    configuration.insecure_ssl = true;
    configuration.secret = Some("s3cret".to_string());

    WebhookSpec {
        repository: "foo".to_string(),
        events: vec!["pull_request".to_string(), "push".to_string()],
        active: true,
        configuration,
    }
}

#[test]
fn test_to_remote_config_converts_flags_and_content_type() {
    let config = sample_spec().configuration;

    let details = to_remote_config(&config);

    assert_eq!(details.url.as_deref(), Some("https://example.com/webhook"));
    assert_eq!(details.content_type.as_deref(), Some("json"));
    assert_eq!(details.insecure_ssl.as_deref(), Some("1"));
    assert_eq!(details.secret.as_deref(), Some("s3cret"));
    assert!(details.extra.is_empty());
}

#[test]
fn test_to_remote_config_always_sends_defaults() {
    let config = WebhookConfiguration::new("https://example.com/webhook");

    let json = serde_json::to_value(to_remote_config(&config)).unwrap();

    assert_eq!(
        json,
        json!({
            "url": "https://example.com/webhook",
            "content_type": "form",
            "insecure_ssl": "0"
        })
    );
}

#[test]
fn test_to_remote_config_omits_empty_secret() {
    let mut config = WebhookConfiguration::new("https://example.com/webhook");
    config.secret = Some(String::new());

    let details = to_remote_config(&config);

    assert!(details.secret.is_none());
}

#[test]
fn test_to_remote_config_extra_never_overrides_known_keys() {
    let mut config = WebhookConfiguration::new("https://example.com/webhook");
    config
        .extra
        .insert("url".to_string(), json!("https://evil.example.com"));
    config
        .extra
        .insert("insecure_ssl".to_string(), json!("1"));
    config
        .extra
        .insert("digest".to_string(), json!("sha256"));

    let details = to_remote_config(&config);

    assert_eq!(details.url.as_deref(), Some("https://example.com/webhook"));
    assert_eq!(details.insecure_ssl.as_deref(), Some("0"));
    assert_eq!(details.extra.len(), 1);
    assert_eq!(details.extra["digest"], json!("sha256"));
}

#[test]
fn test_insecure_ssl_boundary_conversion() {
    for (declared, wire) in [(true, "1"), (false, "0")] {
        let mut config = WebhookConfiguration::new("https://example.com/webhook");
        config.insecure_ssl = declared;

        let details = to_remote_config(&config);
        assert_eq!(details.insecure_ssl.as_deref(), Some(wire));

        let restored = from_remote_config(&details, None).unwrap();
        assert_eq!(restored.insecure_ssl, declared);
    }
}

#[test]
fn test_round_trip_keeps_every_field_and_the_retained_secret() {
    let mut config = sample_spec().configuration;
    config
        .extra
        .insert("digest".to_string(), json!("sha256"));

    let restored = from_remote_config(&to_remote_config(&config), Some("retained")).unwrap();

    assert_eq!(restored.url, config.url);
    assert_eq!(restored.content_type, config.content_type);
    assert_eq!(restored.insecure_ssl, config.insecure_ssl);
    assert_eq!(restored.extra, config.extra);
    assert_eq!(restored.secret.as_deref(), Some("retained"));
}

#[test]
fn test_from_remote_config_ignores_masked_secret() {
    let details = WebhookDetails {
        url: Some("https://example.com/webhook".to_string()),
        content_type: Some("json".to_string()),
        insecure_ssl: Some("0".to_string()),
        secret: Some("********".to_string()),
        ..Default::default()
    };

    let without_retained = from_remote_config(&details, None).unwrap();
    assert!(without_retained.secret.is_none());

    let with_retained = from_remote_config(&details, Some("s3cret")).unwrap();
    assert_eq!(with_retained.secret.as_deref(), Some("s3cret"));
}

#[test]
fn test_from_remote_config_applies_defaults_for_missing_keys() {
    let details = WebhookDetails {
        url: Some("https://example.com/webhook".to_string()),
        ..Default::default()
    };

    let config = from_remote_config(&details, None).unwrap();

    assert_eq!(config.content_type, ContentType::Form);
    assert!(!config.insecure_ssl);
    assert!(config.extra.is_empty());
}

#[test]
fn test_from_remote_config_accepts_textual_booleans() {
    let mut details = WebhookDetails {
        url: Some("https://example.com/webhook".to_string()),
        insecure_ssl: Some("true".to_string()),
        ..Default::default()
    };
    assert!(from_remote_config(&details, None).unwrap().insecure_ssl);

    details.insecure_ssl = Some("false".to_string());
    assert!(!from_remote_config(&details, None).unwrap().insecure_ssl);
}

#[test]
fn test_from_remote_config_rejects_unknown_content_type() {
    let details = WebhookDetails {
        url: Some("https://example.com/webhook".to_string()),
        content_type: Some("xml".to_string()),
        ..Default::default()
    };

    match from_remote_config(&details, None) {
        Err(ReconcileError::InvalidRemoteConfig { key, value }) => {
            assert_eq!(key, "content_type");
            assert_eq!(value, "xml");
        }
        other => panic!("Expected InvalidRemoteConfig, got {other:?}"),
    }
}

#[test]
fn test_from_remote_config_rejects_unknown_insecure_ssl() {
    let details = WebhookDetails {
        url: Some("https://example.com/webhook".to_string()),
        insecure_ssl: Some("maybe".to_string()),
        ..Default::default()
    };

    match from_remote_config(&details, None) {
        Err(ReconcileError::InvalidRemoteConfig { key, value }) => {
            assert_eq!(key, "insecure_ssl");
            assert_eq!(value, "maybe");
        }
        other => panic!("Expected InvalidRemoteConfig, got {other:?}"),
    }
}

#[test]
fn test_unknown_values_keep_their_json_type() {
    let details: WebhookDetails = serde_json::from_value(json!({
        "url": "https://example.com/webhook",
        "content_type": "json",
        "insecure_ssl": 0,
        "digest": "sha256",
        "retries": 3,
        "verified": true,
        "labels": null,
        "headers": { "x-team": "platform" }
    }))
    .unwrap();

    let config = from_remote_config(&details, None).unwrap();

    assert!(!config.insecure_ssl);
    assert_eq!(config.extra["digest"], json!("sha256"));
    assert_eq!(config.extra["retries"], json!(3));
    assert_eq!(config.extra["verified"], json!(true));
    assert_eq!(config.extra["labels"], Value::Null);
    assert_eq!(config.extra["headers"], json!({ "x-team": "platform" }));

    // Sending the configuration back must not change any of the values
    let resent = to_remote_config(&config);
    assert_eq!(resent.extra, details.extra);
}

#[test]
fn test_to_remote_payload_uses_web_hook_name() {
    let spec = sample_spec();

    let payload = to_remote_payload(&spec);

    assert_eq!(payload.name.as_deref(), Some("web"));
    assert_eq!(payload.events, spec.events);
    assert!(payload.active);
    assert_eq!(payload.config.content_type.as_deref(), Some("json"));
}

#[test]
fn test_to_update_payload_leaves_name_out() {
    let payload = to_update_payload(&sample_spec());

    let json = serde_json::to_value(&payload).unwrap();

    assert!(json.get("name").is_none());
    assert_eq!(json["config"]["insecure_ssl"], "1");
    assert_eq!(json["events"], json!(["pull_request", "push"]));
}

#[test]
fn test_from_remote_webhook() {
    let webhook: Webhook = serde_json::from_value(json!({
        "id": 987654,
        "name": "web",
        "active": false,
        "events": ["issues"],
        "config": {
            "url": "https://example.com/webhook",
            "content_type": "form",
            "insecure_ssl": "0",
            "secret": "********"
        }
    }))
    .unwrap();

    let spec = from_remote_webhook(&webhook, "foo", Some("s3cret")).unwrap();

    assert_eq!(spec.repository, "foo");
    assert_eq!(spec.events, vec!["issues".to_string()]);
    assert!(!spec.active);
    assert_eq!(spec.configuration.content_type, ContentType::Form);
    assert_eq!(spec.configuration.secret.as_deref(), Some("s3cret"));
}
