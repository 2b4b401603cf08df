use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::header,
    test, web, App,
};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use crate::config::{Config, FileNaming};
use crate::database::{memory::MemoryStore, Repository};

const BOUNDARY: &str = "----projectservicetestboundary";

/// In-memory store plus a scratch upload directory for one test.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub config: Config,
    _upload_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let upload_dir = tempfile::tempdir().expect("tempdir");
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            mongo_uri: "mongodb://localhost:27017".to_string(),
            mongo_database: None,
            upload_dir: upload_dir.path().to_path_buf(),
            file_naming: FileNaming::Unique,
        };

        Self {
            store: Arc::new(MemoryStore::default()),
            config,
            _upload_dir: upload_dir,
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.config.upload_dir
    }
}

pub fn test_app(
    ctx: &TestContext,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let store: Arc<dyn Repository> = ctx.store.clone();
    let db = web::Data::from(store);
    let config = web::Data::new(ctx.config.clone());

    App::new().configure(move |cfg| super::configure(cfg, db, config))
}

/// Builds a `multipart/form-data` POST with text fields followed by `files` parts.
pub fn multipart(uri: &str, fields: &[(&str, &str)], files: &[(&str, &[u8])]) -> test::TestRequest {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }

    for (filename, content) in files {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    test::TestRequest::post()
        .uri(uri)
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(body)
}
