use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use intake::config::{Config, DEFAULT_MAX_UPLOAD_SIZE};
use intake::db::SubmissionStore;
use intake::error::AppError;
use intake::models::{NewSubmission, Submission};

/// In-memory store that records every insert and can be told to fail.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Submission>>,
    fail: AtomicBool,
}

impl MemoryStore {
    pub fn fail_inserts(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<Submission> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert(&self, new: &NewSubmission) -> Result<Submission, AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Internal(
                "connection refused (db.internal:5432)".to_string(),
            ));
        }

        let row = Submission {
            id: Uuid::new_v4(),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            dob: new.dob.clone(),
            age: new.age,
            photo_base64: new.photo.as_ref().map(|p| p.base64.clone()),
            photo_mime_type: new.photo.as_ref().map(|p| p.mime_type.clone()),
            submitted_at: new.submitted_at,
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }
}

/// A running test server backed by a `MemoryStore`.
pub struct TestApp {
    pub addr: SocketAddr,
    pub store: Arc<MemoryStore>,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a multipart form to `/upload`, return (body, status).
    pub async fn upload(&self, form: Form) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
            .expect("upload request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Text-only form from name/value pairs.
pub fn text_form(fields: &[(&str, &str)]) -> Form {
    fields.iter().fold(Form::new(), |form, (name, value)| {
        form.text(name.to_string(), value.to_string())
    })
}

/// Adds a `photo` file part to a form.
pub fn with_photo(form: Form, bytes: Vec<u8>, mime: &str) -> Form {
    let part = Part::bytes(bytes)
        .file_name("photo.jpg")
        .mime_str(mime)
        .expect("valid mime type");
    form.part("photo", part)
}

pub fn test_config(max_upload_size: usize) -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_upload_size,
        db_max_connections: 1,
        cors_origins: vec![],
        log_level: "warn".to_string(),
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_limit(DEFAULT_MAX_UPLOAD_SIZE).await
}

/// Spawn a test app whose attachment ceiling is `max_upload_size` bytes.
pub async fn spawn_app_with_limit(max_upload_size: usize) -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let app = intake::build_app(store.clone(), test_config(max_upload_size));

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        store,
        client: Client::new(),
    }
}
