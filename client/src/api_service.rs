use crate::config::ClientConfig;
use crate::error::{ClientError, Operation, Result};
use crate::file_picker::SelectedFile;
use crate::models::*;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// HTTP access to the question-answering backend.
pub struct ApiService {
    client: Client,
    api_base: String,
}

impl ApiService {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_base: config.api_base.clone(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub async fn upload_pdf(&self, file: &SelectedFile) -> Result<UploadResponse> {
        let operation = Operation::Upload;
        let media_type = file.media_type.as_deref().unwrap_or(FALLBACK_MEDIA_TYPE);

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(media_type)
            .map_err(|e| ClientError::unexpected(operation, e))?;
        let form = Form::new().part("file", part);

        log::info!("Uploading {} ({} bytes)", file.name, file.bytes.len());

        let response = self
            .client
            .post(self.url("/upload-pdf"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::unexpected(operation, e))?;

        Self::decode(operation, response).await
    }

    /// Sends an already trimmed question.
    pub async fn ask(&self, question: &str) -> Result<AskResponse> {
        let operation = Operation::Ask;
        let request = AskRequest {
            question: question.to_string(),
        };

        log::info!("Asking question ({} chars)", question.chars().count());

        let response = self
            .client
            .post(self.url("/ask"))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::unexpected(operation, e))?;

        Self::decode(operation, response).await
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let operation = Operation::Health;

        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|e| ClientError::unexpected(operation, e))?;

        Self::decode(operation, response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    async fn decode<T: DeserializeOwned>(operation: Operation, response: Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            // An unreadable body is treated like one without a detail.
            let body = response.bytes().await.unwrap_or_default();
            let error = ErrorResponse::from_body(&body);
            log::warn!(
                "{} request failed with {}: {}",
                operation,
                status,
                error.detail.as_deref().unwrap_or("<no detail>")
            );
            return Err(ClientError::http(operation, status.as_u16(), error.detail));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::unexpected(operation, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, body_string_contains, header, header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(server: &MockServer) -> ApiService {
        ApiService::new(&ClientConfig::default().with_api_base(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn upload_sends_multipart_file_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload-pdf"))
            .and(header_regex("content-type", "^multipart/form-data; boundary="))
            .and(body_string_contains("name=\"file\"; filename=\"report.pdf\""))
            .and(body_string_contains("%PDF-1.4"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"message": "PDF processed successfully.", "chunks": 42})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let file = SelectedFile::new("report.pdf", Some("application/pdf"), b"%PDF-1.4 body".to_vec());
        let response = service(&server).upload_pdf(&file).await.unwrap();
        assert_eq!(response.chunks, 42);
    }

    #[tokio::test]
    async fn ask_posts_json_question() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"question": "What is the total?"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"answer": "$1,200"})))
            .expect(1)
            .mount(&server)
            .await;

        let response = service(&server).ask("What is the total?").await.unwrap();
        assert_eq!(response.answer, "$1,200");
    }

    #[tokio::test]
    async fn error_status_uses_detail_or_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({"detail": "index not found"})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/upload-pdf"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let api = service(&server);

        match api.ask("anything").await {
            Err(ClientError::Http { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "index not found");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let file = SelectedFile::new("a.pdf", None, vec![]);
        match api.upload_pdf(&file).await {
            Err(ClientError::Http { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "Failed to upload PDF.");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_success_body_is_unexpected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let error = service(&server).ask("anything").await.unwrap_err();
        assert!(matches!(error, ClientError::Unexpected(ref message) if !message.is_empty()));
    }

    #[tokio::test]
    async fn health_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
            .mount(&server)
            .await;

        assert_eq!(service(&server).health().await.unwrap().status, "ok");
    }

    #[tokio::test]
    async fn unreachable_backend_is_unexpected() {
        // Grab a free port and release it so nothing is listening there.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let config = ClientConfig::default().with_api_base(format!("http://127.0.0.1:{port}"));
        let api = ApiService::new(&config).unwrap();

        let error = api.ask("anything").await.unwrap_err();
        assert!(matches!(error, ClientError::Unexpected(_)));
    }
}
