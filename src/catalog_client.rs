//! Mechanisms to upload normalized documents to a catalog service.
//!
//! The [CatalogClient] trait abstracts how the communication with the
//! catalog is done, so the upload command can be exercised without a network.
//! An implementation using HTTP is available: [CatalogHttpClient].

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode, Url};
use slog::{Logger, debug};
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use crate::StdError;
use crate::StdResult;
use crate::document::NormalizedDocument;

/// Route of the catalog upload endpoint, relative to the base URL.
const UPLOAD_ROUTE: &str = "api/catalogs.upload";

/// Name of the multipart form field carrying the document.
const UPLOAD_FIELD_NAME: &str = "file";

/// Error tied with the catalog client
#[derive(Error, Debug)]
pub enum CatalogClientError {
    /// Error raised when the catalog answered the upload with a non-2xx status.
    #[error("catalog refused the upload (status {status}): {body}")]
    UploadFailed {
        /// HTTP status code returned by the catalog.
        status: StatusCode,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// HTTP subsystem error
    #[error("HTTP subsystem error")]
    SubsystemError(#[source] StdError),
}

/// Outcome of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Name under which the document was uploaded.
    pub uploaded_file: String,

    /// Raw response body returned by the catalog.
    pub response_body: String,
}

/// API that defines a client for the catalog service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogClient: Sync + Send {
    /// Upload a normalized document to the given catalog.
    async fn upload_document(
        &self,
        catalog_id: &str,
        document: &NormalizedDocument,
    ) -> Result<UploadReceipt, CatalogClientError>;
}

/// Responsible for HTTP transport of the upload request.
pub struct CatalogHttpClient {
    http_client: reqwest::Client,
    base_url: Url,
    api_token: String,
    logger: Logger,
}

impl CatalogHttpClient {
    /// Constructs a new `CatalogHttpClient`
    pub fn new(base_url: Url, api_token: &str, logger: Logger) -> StdResult<Self> {
        let http_client = reqwest::ClientBuilder::new()
            .build()
            .with_context(|| "Building http client for the catalog client failed")?;

        // Trailing slash is significant because url::join
        // (https://docs.rs/url/latest/url/struct.Url.html#method.join) will remove
        // the 'path' part of the url if it doesn't end with a trailing slash.
        let base_url = if base_url.as_str().ends_with('/') {
            base_url
        } else {
            let mut url = base_url.clone();
            url.set_path(&format!("{}/", base_url.path()));
            url
        };

        Ok(Self {
            http_client,
            base_url,
            api_token: api_token.to_owned(),
            logger,
        })
    }

    fn upload_url(&self, catalog_id: &str) -> Result<Url, CatalogClientError> {
        let mut url = self
            .base_url
            .join(UPLOAD_ROUTE)
            .with_context(|| {
                format!(
                    "Invalid url when joining upload route to catalog url '{}'",
                    self.base_url
                )
            })
            .map_err(CatalogClientError::SubsystemError)?;
        url.query_pairs_mut().append_pair("catalogId", catalog_id);

        Ok(url)
    }

    /// Perform the multipart HTTP POST carrying the document.
    async fn post(
        &self,
        url: Url,
        document: &NormalizedDocument,
    ) -> Result<Response, CatalogClientError> {
        debug!(self.logger, "POST url='{url}' file='{}'", document.file_name);
        let part = Part::bytes(document.json_content.clone().into_bytes())
            .file_name(document.file_name.clone())
            .mime_str("application/json")
            .map_err(|e| CatalogClientError::SubsystemError(anyhow!(e)))?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        let response = self
            .http_client
            .post(url.clone())
            .bearer_auth(&self.api_token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                CatalogClientError::SubsystemError(anyhow!(e).context(format!(
                    "Cannot perform a POST against the catalog HTTP server (url='{url}')"
                )))
            })?;

        match response.status() {
            status if status.is_success() => Ok(response),
            status => Err(CatalogClientError::UploadFailed {
                status,
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

#[async_trait]
impl CatalogClient for CatalogHttpClient {
    async fn upload_document(
        &self,
        catalog_id: &str,
        document: &NormalizedDocument,
    ) -> Result<UploadReceipt, CatalogClientError> {
        let response = self.post(self.upload_url(catalog_id)?, document).await?;

        let response_body = response.text().await.map_err(|e| {
            CatalogClientError::SubsystemError(
                anyhow!(e).context("Could not find a text body in the response."),
            )
        })?;

        Ok(UploadReceipt {
            uploaded_file: document.file_name.clone(),
            response_body,
        })
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;

    use super::*;

    fn test_logger() -> Logger {
        Logger::root(slog::Discard, slog::o!())
    }

    fn setup_client(server_url: &str) -> CatalogHttpClient {
        CatalogHttpClient::new(Url::parse(server_url).unwrap(), "token-123", test_logger())
            .expect("building catalog http client should not fail")
    }

    fn petstore_document() -> NormalizedDocument {
        NormalizedDocument {
            json_content: r#"{"openapi": "3.0.0"}"#.to_string(),
            file_name: "petstore.json".to_string(),
        }
    }

    #[test]
    fn always_append_trailing_slash_at_build() {
        for (expected, url) in [
            ("http://www.test.net/", "http://www.test.net/"),
            ("http://www.test.net/", "http://www.test.net"),
            (
                "http://www.test.net/catalog/",
                "http://www.test.net/catalog/",
            ),
            ("http://www.test.net/catalog/", "http://www.test.net/catalog"),
        ] {
            let client = setup_client(url);

            assert_eq!(expected, client.base_url.as_str());
        }
    }

    #[test]
    fn upload_url_targets_the_catalog_scoped_endpoint() {
        let client = setup_client("http://www.test.net");

        let url = client.upload_url("cat-123").unwrap();

        assert_eq!(
            "http://www.test.net/api/catalogs.upload?catalogId=cat-123",
            url.as_str()
        );
    }

    #[tokio::test]
    async fn upload_sends_one_multipart_post_with_bearer_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/api/catalogs.upload")
                .query_param("catalogId", "cat-123")
                .header("authorization", "Bearer token-123")
                .body_contains("application/json")
                .body_contains("name=\"file\"")
                .body_contains("filename=\"petstore.json\"")
                .body_contains(r#"{"openapi": "3.0.0"}"#);
            then.status(201).body("created");
        });
        let client = setup_client(&server.url(""));

        let receipt = client
            .upload_document("cat-123", &petstore_document())
            .await
            .expect("upload should succeed on a 2xx status");

        mock.assert();
        assert_eq!(
            UploadReceipt {
                uploaded_file: "petstore.json".to_string(),
                response_body: "created".to_string(),
            },
            receipt
        );
    }

    #[tokio::test]
    async fn upload_fails_on_non_2xx_status_with_status_and_body() {
        let server = MockServer::start();
        server.mock(|_when, then| {
            then.status(500).body("server error");
        });
        let client = setup_client(&server.url(""));

        let error = client
            .upload_document("cat-123", &petstore_document())
            .await
            .unwrap_err();

        let rendering = error.to_string();
        assert!(rendering.contains("500"), "missing status: {rendering}");
        assert!(
            rendering.contains("server error"),
            "missing body: {rendering}"
        );
        match error {
            CatalogClientError::UploadFailed { status, body } => {
                assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status);
                assert_eq!("server error", body);
            }
            _ => panic!("unexpected error: {error:?}"),
        }
    }

    #[tokio::test]
    async fn upload_fails_with_subsystem_error_on_transport_failure() {
        // Nothing listens on this port, the connection is refused before any
        // HTTP exchange happens.
        let client = setup_client("http://127.0.0.1:1");

        let error = client
            .upload_document("cat-123", &petstore_document())
            .await
            .unwrap_err();

        assert!(
            matches!(error, CatalogClientError::SubsystemError(_)),
            "unexpected error: {error:?}"
        );
    }
}
