use super::{apply_env, apply_file, Settings};

use std::collections::HashMap;

#[test]
fn defaults_point_at_phased_loci_service() {
    let settings = Settings::default();
    assert_eq!(settings.server_bind, "127.0.0.1:8080");
    assert_eq!(
        settings.service_ref().to_string(),
        "meyerslab/srna_phased_loci_v0.1"
    );
    assert!(settings.adama_token.is_none());
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
bind_addr = "0.0.0.0:9000"
adama_url = "http://localhost:4000/community/v0.3"
service = "srna_phased_loci_v0.2"
"#,
    )
    .expect("parse");

    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.adama_base_url, "http://localhost:4000/community/v0.3");
    assert_eq!(settings.namespace, "meyerslab");
    assert_eq!(settings.service, "srna_phased_loci_v0.2");
}

#[test]
fn malformed_file_is_an_error() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "bind_addr = [1, 2]").is_err());
    assert_eq!(settings, Settings::default());
}

#[test]
fn prefixed_env_keys_win_over_short_ones() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("PORTAL_BIND", "127.0.0.1:1"),
        ("APP__BIND_ADDR", "127.0.0.1:2"),
        ("ADAMA_TOKEN", "host-token"),
        ("APP__NAMESPACE", "otherlab"),
    ]);
    let mut settings = Settings::default();
    apply_env(&mut settings, |key| env.get(key).map(|v| v.to_string()));

    assert_eq!(settings.server_bind, "127.0.0.1:2");
    assert_eq!(settings.adama_token.as_deref(), Some("host-token"));
    assert_eq!(settings.namespace, "otherlab");
    assert_eq!(settings.service, "srna_phased_loci_v0.1");
}
