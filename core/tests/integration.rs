//! Exercises `Clavis` over real HTTP against the mock store.
//!
//! # Design
//! Each test starts the mock server on a random port in a background thread
//! with its own tokio runtime, then drives the blocking client from the test
//! thread.

use std::net::SocketAddr;

use clavis_core::{Clavis, ClavisConfig, ClavisError};

const TOKEN: &str = "integration-token";

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, TOKEN).await
        })
        .unwrap();
    });

    addr
}

fn clavis(base_url: &str, token: &str) -> Clavis {
    Clavis::new(ClavisConfig::new(base_url, token).unwrap())
}

#[test]
fn set_get_lifecycle() {
    let addr = start_server();
    let client = clavis(&format!("http://{addr}"), TOKEN);

    // Step 1: unknown key is a remote error with the server's message.
    let err = client.get("api_key").unwrap_err();
    assert_eq!(err, ClavisError::Remote("not found".to_string()));
    assert_eq!(err.to_string(), "not found");

    // Step 2: set, then read back.
    client.set("api_key", "s3cr3t").unwrap();
    assert_eq!(client.get("api_key").unwrap(), "s3cr3t");

    // Step 3: overwrite.
    client.set("api_key", "rotated").unwrap();
    assert_eq!(client.get("api_key").unwrap(), "rotated");

    // Step 4: empty values are legal.
    client.set("empty", "").unwrap();
    assert_eq!(client.get("empty").unwrap(), "");
}

#[test]
fn values_above_ten_megabytes_are_read_whole() {
    let addr = start_server();
    let client = clavis(&format!("http://{addr}"), TOKEN);

    let big = "x".repeat(11 * 1024 * 1024);
    client.set("blob", &big).unwrap();
    let fetched = client.get("blob").unwrap();
    assert_eq!(fetched.len(), big.len());
    assert!(fetched == big);
}

#[test]
fn trailing_slash_base_url_reaches_server() {
    let addr = start_server();
    let client = clavis(&format!("http://{addr}/"), TOKEN);

    client.set("k", "v").unwrap();
    assert_eq!(client.get("k").unwrap(), "v");
}

#[test]
fn wrong_token_is_rejected_by_server() {
    let addr = start_server();
    let client = clavis(&format!("http://{addr}"), "not-the-token");

    let err = client.set("k", "v").unwrap_err();
    assert_eq!(err, ClavisError::Remote("unauthorized".to_string()));
    let err = client.get("k").unwrap_err();
    assert_eq!(err, ClavisError::Remote("unauthorized".to_string()));
}

#[test]
fn non_json_response_is_a_decode_error() {
    let addr = start_server();
    // Unknown route: axum answers 404 with an empty body.
    let client = clavis(&format!("http://{addr}/nowhere"), TOKEN);

    let err = client.get("k").unwrap_err();
    assert!(matches!(err, ClavisError::Decode(_)), "got {err:?}");
    let err = client.set("k", "v").unwrap_err();
    assert!(matches!(err, ClavisError::Decode(_)), "got {err:?}");
}

#[test]
fn connection_refused_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = clavis(&format!("http://{addr}"), TOKEN);

    assert!(matches!(client.get("k"), Err(ClavisError::Transport(_))));
    assert!(matches!(client.set("k", "v"), Err(ClavisError::Transport(_))));
}

#[test]
fn clones_share_one_client_across_threads() {
    let addr = start_server();
    let client = clavis(&format!("http://{addr}"), TOKEN);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = client.clone();
            std::thread::spawn(move || {
                let key = format!("key{i}");
                client.set(&key, &format!("value{i}")).unwrap();
                client.get(&key).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("value{i}"));
    }
}
