//! BackendClient against a mock server.

use mockito::{Matcher, Server};
use tts_ui_client::audio::AudioObject;
use tts_ui_client::backend::SynthesisRequest;
use tts_ui_client::settings::Filters;
use tts_ui_client::{BackendClient, Error};

fn client() -> BackendClient {
    BackendClient::builder().build().expect("client")
}

#[tokio::test]
async fn health_reports_ok() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/health")
        .with_status(200)
        .with_body(r#"{"status":"ok"}"#)
        .create_async()
        .await;

    let health = client().health(&server.url()).await.unwrap();
    assert!(health.is_ok());
}

#[tokio::test]
async fn config_with_missing_field_is_empty() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/config")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let cfg = client().fetch_config(&format!("{}/", server.url())).await.unwrap();
    assert_eq!(cfg.deepgram_api_url, None);
}

#[tokio::test]
async fn malformed_voices_body_is_serialization_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/voices")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>")
        .create_async()
        .await;

    let err = client()
        .fetch_voices(&server.url(), &Filters::default(), "https://api.deepgram.com")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}

#[tokio::test]
async fn synthesis_defaults_when_headers_absent() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/api/tts")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("pcm")
        .create_async()
        .await;

    let request = SynthesisRequest::from_input("hi", "", "");
    let result = client()
        .synthesize(&server.url(), "https://api.deepgram.com", &request)
        .await
        .unwrap();
    assert_eq!(result.audio.as_ref(), b"pcm");
    assert_eq!(result.filename, "tts.wav");
    assert_eq!(result.metadata, Default::default());
}

#[tokio::test]
async fn disposition_path_is_stripped_before_saving() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/api/tts")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-disposition", "inline; filename=../escaped.wav")
        .with_body("pcm")
        .create_async()
        .await;

    let request = SynthesisRequest::from_input("hi", "", "");
    let result = client()
        .synthesize(&server.url(), "https://api.deepgram.com", &request)
        .await
        .unwrap();
    assert_eq!(result.filename, "escaped.wav");

    let root = tempfile::tempdir().unwrap();
    let out = root.path().join("out");
    std::fs::create_dir(&out).unwrap();
    let saved = AudioObject::from_result(&result).save_to(&out).unwrap();
    assert_eq!(saved, out.join("escaped.wav"));
    assert!(!root.path().join("escaped.wav").exists());
}

#[tokio::test]
async fn remote_error_keeps_status_text() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/api/tts")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("TTS request failed: timed out")
        .create_async()
        .await;

    let request = SynthesisRequest::from_input("hi", "", "");
    let err = client()
        .synthesize(&server.url(), "https://api.deepgram.com", &request)
        .await
        .unwrap_err();
    match err {
        Error::Remote {
            status,
            status_text,
            body,
        } => {
            assert_eq!(status, 502);
            assert_eq!(status_text, "Bad Gateway");
            assert_eq!(body, "TTS request failed: timed out");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn truncated_error_body_still_reports_status() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        // Promise more body than is sent, then hang up.
        let _ = socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 64\r\n\r\npartial")
            .await;
        let _ = socket.shutdown().await;
    });

    let request = SynthesisRequest::from_input("hi", "", "");
    let err = client()
        .synthesize(&format!("http://{addr}"), "https://api.deepgram.com", &request)
        .await
        .unwrap_err();
    match err {
        Error::Remote { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "");
        }
        other => panic!("unexpected error: {other}"),
    }
}
