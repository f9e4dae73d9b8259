use httpmock::prelude::*;
use serde_json::json;
use ttskit_fishaudio::{
    AudioFormat, Client, CreateModelRequest, Error, ListModelsQuery, TtsRequest, Visibility,
    VoiceFile,
};

fn client(server: &MockServer, retries: u32) -> Client {
    Client::builder("test-key")
        .base_url(server.base_url())
        .max_retries(retries)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_tts_convert_returns_audio() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/tts")
                .header("authorization", "Bearer test-key")
                .header("model", "s1")
                .body_contains("\"reference_id\":\"voice-1\"")
                .body_contains("\"format\":\"wav\"")
                .body_contains("\"speed\":1.5");
            then.status(200)
                .header("content-type", "audio/wav")
                .body(b"RIFFfake-audio");
        })
        .await;

    let req = TtsRequest::new("Hello there", "voice-1")
        .format(AudioFormat::Wav)
        .speed(1.5)
        .model("s1");
    let audio = client(&server, 0).tts().convert(&req).await.unwrap();

    assert_eq!(audio, b"RIFFfake-audio");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_tts_rejects_empty_text_without_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.path("/v1/tts");
            then.status(200).body(b"audio");
        })
        .await;

    let err = client(&server, 0)
        .tts()
        .convert(&TtsRequest::new("   ", "voice-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Other(_)));
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_api_error_is_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/tts");
            then.status(401)
                .json_body(json!({"status": 401, "message": "Invalid api key"}));
        })
        .await;

    let err = client(&server, 3)
        .tts()
        .convert(&TtsRequest::new("Hi", "voice-1"))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(err.to_string().contains("Invalid api key"));
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/tts");
            then.status(503).body("unavailable");
        })
        .await;

    let err = client(&server, 1)
        .tts()
        .convert(&TtsRequest::new("Hi", "voice-1"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    mock.assert_hits_async(2).await;
}

#[tokio::test]
async fn test_create_model_multipart() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/model")
                .header("authorization", "Bearer test-key")
                .body_contains("name=\"title\"")
                .body_contains("Narrator")
                .body_contains("name=\"voices\"; filename=\"en_1.wav\"")
                .body_contains("name=\"texts\"")
                .body_contains("Hello there")
                .body_contains("unlist");
            then.status(201).json_body(json!({
                "_id": "model-42",
                "title": "Narrator",
                "visibility": "unlist",
                "state": "trained"
            }));
        })
        .await;

    let req = CreateModelRequest {
        visibility: Visibility::Unlist,
        texts: vec!["Hello there".to_string()],
        tags: vec!["en".to_string()],
        ..CreateModelRequest::new("Narrator")
    };
    let voices = vec![VoiceFile::new("en_1.wav", b"RIFFdata".to_vec())];

    let model = client(&server, 0).model().create(&req, voices).await.unwrap();
    assert_eq!(model.id, "model-42");
    assert_eq!(model.state.as_deref(), Some("trained"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_model_validates_transcript_count() {
    let server = MockServer::start_async().await;

    let req = CreateModelRequest {
        texts: vec!["one".to_string(), "two".to_string()],
        ..CreateModelRequest::new("Narrator")
    };
    let voices = vec![VoiceFile::new("a.wav", b"RIFF".to_vec())];

    let err = client(&server, 0).model().create(&req, voices).await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[tokio::test]
async fn test_list_models() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/model")
                .query_param("self", "true")
                .query_param("page_size", "100")
                .query_param("page_number", "1");
            then.status(200).json_body(json!({
                "total": 2,
                "items": [
                    {"_id": "a", "title": "First", "languages": ["en"]},
                    {"_id": "b", "title": "Second", "description": "calm"}
                ]
            }));
        })
        .await;

    let query = ListModelsQuery {
        page_size: 100,
        ..Default::default()
    };
    let list = client(&server, 0).model().list(&query).await.unwrap();

    assert_eq!(list.total, 2);
    assert_eq!(list.items[0].id, "a");
    assert_eq!(list.items[0].languages, vec!["en"]);
    assert_eq!(list.items[1].description, "calm");
    mock.assert_async().await;
}
