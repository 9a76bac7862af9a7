use std::sync::Arc;

use braillevoice_appcore::AppService;
use braillevoice_core::types::Page;
use braillevoice_core::upload::SelectedFile;
use braillevoice_engine::workflow::WorkflowStage;
use braillevoice_runtime::kv::{FileKvStore, KvStore};
use braillevoice_runtime::remote::{ApiAuthGateway, ApiBrailleConverter};
use braillevoice_runtime::router::PageLoad;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(store: Arc<dyn KvStore>, server: &MockServer) -> AppService {
    let gateway = Arc::new(ApiAuthGateway::new(&server.uri()).unwrap());
    let converter = Arc::new(ApiBrailleConverter::new(&server.uri()).unwrap());
    AppService::new(store, gateway, converter, None)
}

fn sample_file() -> SelectedFile {
    SelectedFile {
        file_name: "braille.png".into(),
        mime_type: "image/png".into(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    }
}

#[tokio::test]
async fn login_persists_and_a_restart_restores_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-1",
            "user": { "username": "amina", "email": "amina@example.com" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/check"))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "authenticated": true })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn KvStore> = Arc::new(FileKvStore::at_dir(dir.path()));

    let app = service(store.clone(), &server);
    assert!(!app.is_authenticated().await);
    app.login("amina", "pw").await.unwrap();
    assert!(app.is_authenticated().await);
    drop(app);

    // A fresh service against the same store picks the session back up and
    // revalidates it.
    let app = service(store, &server);
    assert!(app.is_authenticated().await);
    assert!(app.validate_session().await);
    assert_eq!(app.current_user().await.unwrap().username, "amina");
}

#[tokio::test]
async fn failed_validation_destroys_the_restored_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-stale",
            "user": { "username": "amina", "email": "amina@example.com" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/check"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "expired" })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn KvStore> = Arc::new(FileKvStore::at_dir(dir.path()));

    let app = service(store.clone(), &server);
    app.login("amina", "pw").await.unwrap();
    drop(app);

    let app = service(store, &server);
    assert!(!app.validate_session().await);
    assert!(!app.is_authenticated().await);
    assert!(app.auth_headers().await.is_empty());
}

#[tokio::test]
async fn login_denial_surfaces_the_server_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn KvStore> = Arc::new(FileKvStore::at_dir(dir.path()));
    let app = service(store, &server);

    let err = app.login("amina", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(!app.is_authenticated().await);
}

#[tokio::test]
async fn conversion_records_history_and_feeds_the_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/convert"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "আমার সোনার বাংলা",
            "confidence": 0.9,
            "audio_url": "/static/audio/out.wav",
            "duration": 2.0
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn KvStore> = Arc::new(FileKvStore::at_dir(dir.path()));
    let app = service(store, &server);

    app.select_file(sample_file()).await.unwrap();
    let preview = app.preview().await.unwrap();
    assert!(preview.data_url.starts_with("data:image/png;base64,"));

    let checkpoints = std::sync::Mutex::new(Vec::new());
    let report = app
        .convert_with_progress(|stage, pct| {
            checkpoints.lock().unwrap().push((stage, pct));
            async {}
        })
        .await
        .unwrap();
    assert_eq!(report.stage, WorkflowStage::Completed);
    assert_eq!(checkpoints.lock().unwrap().len(), 4);
    let outcome = report.outcome.unwrap();
    assert_eq!(
        outcome.audio_url.as_deref(),
        Some(format!("{}/static/audio/out.wav", server.uri()).as_str())
    );

    let nav = app.navigate(Page::History).await.unwrap();
    match nav.load {
        PageLoad::History(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].text, "আমার সোনার বাংলা");
            assert_eq!(rows[0].confidence_label, "90%");
        }
        other => panic!("expected history rows, got {other:?}"),
    }

    let nav = app.navigate(Page::Converter).await.unwrap();
    match nav.load {
        PageLoad::ConverterSummary(summary) => {
            assert_eq!(summary.count, 1);
            assert_eq!(summary.avg_accuracy, "90%");
            assert_eq!(summary.avg_time, "2.0s");
        }
        other => panic!("expected summary, got {other:?}"),
    }

    let export = app.export_history().unwrap().unwrap();
    assert!(export.json.contains("আমার সোনার বাংলা"));
}

#[tokio::test]
async fn clear_history_requires_confirmation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/convert"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "x", "confidence": 0.5, "duration": 1.0
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn KvStore> = Arc::new(FileKvStore::at_dir(dir.path()));
    let app = service(store, &server);

    app.select_file(sample_file()).await.unwrap();
    app.convert().await.unwrap();

    assert!(!app.clear_history(false).unwrap());
    assert!(app.export_history().unwrap().is_some());

    assert!(app.clear_history(true).unwrap());
    assert!(app.export_history().unwrap().is_none());
}

#[tokio::test]
async fn settings_round_trip_across_restarts() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn KvStore> = Arc::new(FileKvStore::at_dir(dir.path()));

    let app = service(store.clone(), &server);
    app.save_setting("speechRate", json!(1.5)).unwrap();
    app.save_setting("theme", json!("dark")).unwrap();
    drop(app);

    let app = service(store, &server);
    let settings = app.load_settings().unwrap();
    assert_eq!(settings.speech_rate, Some(1.5));
    assert_eq!(settings.theme.as_deref(), Some("dark"));
}
