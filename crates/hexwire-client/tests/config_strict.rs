#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hexwire_client::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  url: "ws://127.0.0.1:8080/ws"
  outbound_qeue: 16 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
server:
  url: "ws://game.local/ws"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.url, "ws://game.local/ws");
    assert_eq!(cfg.server.outbound_queue, 1024);
    assert_eq!(cfg.server.close_code, 1000);
    assert!(!cfg.reconnect.enabled);
    assert_eq!(cfg.reconnect.max_attempts, 10);
}

#[test]
fn server_section_is_required() {
    let err = config::load_from_str("version: 1\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}

#[test]
fn rejects_non_websocket_url() {
    let bad = r#"
version: 1
server:
  url: "http://game.local/ws"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("server.url"), "{err}");
}

#[test]
fn rejects_reserved_close_code() {
    let bad = r#"
version: 1
server:
  url: "wss://game.local/ws"
  close_code: 1006
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("close_code"), "{err}");
}

#[test]
fn rejects_inverted_backoff_bounds() {
    let bad = r#"
version: 1
server:
  url: "ws://game.local/ws"
reconnect:
  enabled: true
  initial_delay_ms: 5000
  max_delay_ms: 1000
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("max_delay_ms"), "{err}");
}

#[test]
fn rejects_unsupported_version() {
    let bad = r#"
version: 2
server:
  url: "ws://game.local/ws"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}
