//! Domain methods for the backend API.

use async_trait::async_trait;
use bytes::Bytes;
use docshade_core::constants::UPLOAD_FIELD;
use docshade_core::{
    ClientError, ClientResult, DocumentBackend, HealthReport, PdfFile, SessionId, UploadResponse,
};

use crate::{transport_error, ApiClient};

impl ApiClient {
    /// Probe `GET /v1/health`. Never fails: any error becomes `NOT_OK`.
    pub async fn health(&self) -> HealthReport {
        let url = self.endpoints().health_url();

        let response = match self.client().get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Health check request failed");
                return HealthReport::not_ok();
            }
        };

        let response = match Self::ensure_success(response).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Health check returned an error");
                return HealthReport::not_ok();
            }
        };

        match response.json::<serde_json::Value>().await {
            Ok(data) => HealthReport::ok(data),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Health check body is not JSON");
                HealthReport::not_ok()
            }
        }
    }

    /// `POST /v1/upload` as multipart with the file under `file`.
    pub async fn upload_pdf(&self, file: &PdfFile) -> ClientResult<UploadResponse> {
        let url = self.endpoints().upload_url();

        let part = reqwest::multipart::Part::bytes(file.data.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| ClientError::Validation(format!("Invalid content type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client()
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error("Failed to send upload request", e))?;
        let response = Self::ensure_success(response).await?;

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| transport_error("Failed to parse upload response as JSON", e))?;

        tracing::info!(
            session_id = %body.session_id,
            document_id = body.document_id.as_deref().unwrap_or("-"),
            message = body.message.as_deref().unwrap_or(""),
            "Upload accepted"
        );
        Ok(body)
    }

    /// Download the processed artifact; relative links resolve against the
    /// backend origin.
    pub async fn download_artifact(&self, link: &str) -> ClientResult<Bytes> {
        let url = self.endpoints().resolve(link);
        tracing::debug!(url = %url, "Fetching artifact");

        let response = self
            .client()
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error("Failed to send artifact request", e))?;
        let response = Self::ensure_success(response).await?;

        response
            .bytes()
            .await
            .map_err(|e| transport_error("Failed to read artifact body", e))
    }
}

#[async_trait]
impl DocumentBackend for ApiClient {
    async fn submit(&self, file: &PdfFile) -> ClientResult<SessionId> {
        self.upload_pdf(file).await.map(|r| r.session_id)
    }

    async fn fetch_artifact(&self, url: &str) -> ClientResult<Bytes> {
        self.download_artifact(url).await
    }
}
