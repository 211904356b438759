//! HTTP plumbing for the Gemini API.
//!
//! [`GeminiClient`] owns the reqwest client and knows how to reach each
//! endpoint; the cloneable [`Gemini`] facade wraps it in an `Arc` and is
//! what the rest of the crate talks to.

use std::sync::Arc;

use mime::Mime;
use reqwest::Client;
use snafu::{OptionExt, ResultExt, Snafu};
use tracing::instrument;
use url::Url;

use crate::file_search::model::{
    CreateFileSearchStoreRequest, FileSearchStore, ListFileSearchStoresResponse, Operation,
    UploadToFileSearchStoreRequest,
};
use crate::file_search::OperationHandle;
use crate::generation::builder::ContentBuilder;
use crate::generation::model::{GenerateContentRequest, GenerationResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
const UPLOAD_BASE_URL: &str = "https://generativelanguage.googleapis.com/upload/v1beta/";
const DEFAULT_MODEL: &str = "models/gemini-2.5-flash";

/// Errors that can occur when talking to the Gemini API
#[derive(Debug, Snafu)]
pub enum Error {
    /// Error from the reqwest HTTP client
    #[snafu(display("HTTP error: {source}"))]
    Http { source: reqwest::Error },

    /// Non-success status returned by the API, raw body preserved
    #[snafu(display("Gemini API error: {status_code} - {message}"))]
    Api { status_code: u16, message: String },

    /// The API answered with a body this crate could not decode
    #[snafu(display("failed to decode API response: {source}"))]
    Decode { source: reqwest::Error },

    /// Error building a valid request URL
    #[snafu(display("invalid request URL '{url}': {source}"))]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    /// The resumable upload start call did not return an upload URL
    #[snafu(display("upload to '{store_name}' returned no upload URL"))]
    MissingUploadUrl { store_name: String },

    /// A polled operation exceeded the caller-supplied timeout
    #[snafu(display("operation '{name}' did not finish in time"))]
    OperationTimeout { name: String },

    /// A polled operation reached a terminal error state
    #[snafu(display("operation '{name}' failed: {message} (code {code})"))]
    OperationFailed {
        name: String,
        code: i32,
        message: String,
    },
}

impl Error {
    /// Whether this error is the API reporting a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { status_code: 404, .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Internal client for making requests to the Gemini API
#[derive(Debug)]
pub(crate) struct GeminiClient {
    http_client: Client,
    api_key: String,
    pub(crate) model: String,
    base_url: String,
    upload_base_url: String,
}

impl GeminiClient {
    fn new(api_key: String, model: String) -> Result<Self> {
        for base in [DEFAULT_BASE_URL, UPLOAD_BASE_URL] {
            Url::parse(base).context(InvalidUrlSnafu { url: base })?;
        }
        Ok(Self {
            http_client: Client::new(),
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            upload_base_url: UPLOAD_BASE_URL.to_string(),
        })
    }

    /// Generate content
    #[instrument(skip_all, fields(model = %self.model))]
    pub(crate) async fn generate_content_raw(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerationResponse> {
        let url = self.build_url(&format!("{}:generateContent", self.model))?;

        let response = self
            .http_client
            .post(url)
            .json(&request)
            .send()
            .await
            .context(HttpSnafu)?;
        let response = Self::error_for_status(response).await?;

        response.json().await.context(DecodeSnafu)
    }

    /// Create a file search store
    #[instrument(skip_all, fields(display_name = request.display_name.as_deref()))]
    pub(crate) async fn create_file_search_store(
        &self,
        request: CreateFileSearchStoreRequest,
    ) -> Result<FileSearchStore> {
        let url = self.build_url("fileSearchStores")?;

        let response = self
            .http_client
            .post(url)
            .json(&request)
            .send()
            .await
            .context(HttpSnafu)?;
        let response = Self::error_for_status(response).await?;

        response.json().await.context(DecodeSnafu)
    }

    /// List one page of file search stores
    #[instrument(skip_all, fields(page.token.present = page_token.is_some()))]
    pub(crate) async fn list_file_search_stores(
        &self,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<ListFileSearchStoresResponse> {
        let mut url = self.build_url("fileSearchStores")?;

        if let Some(size) = page_size {
            url.query_pairs_mut()
                .append_pair("pageSize", &size.to_string());
        }
        if let Some(token) = page_token {
            url.query_pairs_mut().append_pair("pageToken", &token);
        }

        let response = self.http_client.get(url).send().await.context(HttpSnafu)?;
        let response = Self::error_for_status(response).await?;

        response.json().await.context(DecodeSnafu)
    }

    /// Get a file search store by resource name
    #[instrument(skip_all, fields(store.name = name))]
    pub(crate) async fn get_file_search_store(&self, name: &str) -> Result<FileSearchStore> {
        let url = self.build_url(name)?;

        let response = self.http_client.get(url).send().await.context(HttpSnafu)?;
        let response = Self::error_for_status(response).await?;

        response.json().await.context(DecodeSnafu)
    }

    /// Delete a file search store
    #[instrument(skip_all, fields(store.name = name, force))]
    pub(crate) async fn delete_file_search_store(&self, name: &str, force: bool) -> Result<()> {
        let mut url = self.build_url(name)?;
        url.query_pairs_mut()
            .append_pair("force", if force { "true" } else { "false" });

        let response = self
            .http_client
            .delete(url)
            .send()
            .await
            .context(HttpSnafu)?;
        Self::error_for_status(response).await?;

        Ok(())
    }

    /// Get a long-running operation by name
    #[instrument(skip_all, fields(operation.name = name))]
    pub(crate) async fn get_operation(&self, name: &str) -> Result<Operation> {
        let url = self.build_url(name)?;

        let response = self.http_client.get(url).send().await.context(HttpSnafu)?;
        let response = Self::error_for_status(response).await?;

        response.json().await.context(DecodeSnafu)
    }

    /// Upload file data directly into a store.
    ///
    /// Uses the resumable upload protocol: a start request carrying the
    /// metadata returns a session URL, then a single finalize request
    /// carries the bytes and yields the indexing [`Operation`].
    #[instrument(skip_all, fields(
        store.name = store_name,
        file.size = data.len(),
        display_name = request.display_name.as_deref(),
        mime.type = %request.mime_type,
    ))]
    pub(crate) async fn upload_to_file_search_store(
        &self,
        store_name: &str,
        data: Vec<u8>,
        request: UploadToFileSearchStoreRequest,
    ) -> Result<Operation> {
        let url = self.build_upload_url(store_name)?;

        let response = self
            .http_client
            .post(url)
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", data.len().to_string())
            .header(
                "X-Goog-Upload-Header-Content-Type",
                request.mime_type.to_string(),
            )
            .json(&request)
            .send()
            .await
            .context(HttpSnafu)?;
        let response = Self::error_for_status(response).await?;

        let upload_url = response
            .headers()
            .get("x-goog-upload-url")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .context(MissingUploadUrlSnafu { store_name })?;

        let response = self
            .http_client
            .post(upload_url)
            .header("X-Goog-Upload-Command", "upload, finalize")
            .header("X-Goog-Upload-Offset", "0")
            .body(data)
            .send()
            .await
            .context(HttpSnafu)?;
        let response = Self::error_for_status(response).await?;

        response.json().await.context(DecodeSnafu)
    }

    async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.context(HttpSnafu)?;
        ApiSnafu {
            status_code: status.as_u16(),
            message,
        }
        .fail()
    }

    /// Build a URL for the API
    fn build_url(&self, path: &str) -> Result<Url> {
        let url_str = format!("{}{}?key={}", self.base_url, path, self.api_key);
        Url::parse(&url_str).with_context(|_| InvalidUrlSnafu {
            url: url_str.clone(),
        })
    }

    /// Build a URL for the media upload endpoint
    fn build_upload_url(&self, store_name: &str) -> Result<Url> {
        let url_str = format!(
            "{}{}:uploadToFileSearchStore?key={}",
            self.upload_base_url, store_name, self.api_key
        );
        Url::parse(&url_str).with_context(|_| InvalidUrlSnafu {
            url: url_str.clone(),
        })
    }
}

/// Client for the Gemini API
#[derive(Debug, Clone)]
pub struct Gemini {
    client: Arc<GeminiClient>,
}

impl Gemini {
    /// Create a new client with the specified API key and the default model
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_model(api_key, DEFAULT_MODEL.to_string())
    }

    /// Create a new client with the specified API key and model
    ///
    /// Bare model names are normalized to the `models/` resource form.
    pub fn with_model(api_key: impl Into<String>, model: String) -> Result<Self> {
        let model = if model.starts_with("models/") {
            model
        } else {
            format!("models/{model}")
        };
        let client = GeminiClient::new(api_key.into(), model)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// The model resource name requests are sent to
    pub fn model(&self) -> &str {
        &self.client.model
    }

    /// Start building a content generation request
    pub fn generate_content(&self) -> ContentBuilder {
        ContentBuilder::new(self.client.clone())
    }

    /// Create a file search store
    pub async fn create_file_search_store(
        &self,
        display_name: Option<String>,
    ) -> Result<FileSearchStore> {
        self.client
            .create_file_search_store(CreateFileSearchStoreRequest { display_name })
            .await
    }

    /// Lists all file search stores, following pagination.
    ///
    /// Stores are returned in the order the service yields them.
    pub async fn list_file_search_stores(&self) -> Result<Vec<FileSearchStore>> {
        let mut stores = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let response = self
                .client
                .list_file_search_stores(None, page_token.take())
                .await?;
            stores.extend(response.file_search_stores);

            match response.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(stores)
    }

    /// Get a file search store by resource name
    pub async fn get_file_search_store(&self, name: &str) -> Result<FileSearchStore> {
        self.client.get_file_search_store(name).await
    }

    /// Delete a file search store
    pub async fn delete_file_search_store(&self, name: &str, force: bool) -> Result<()> {
        self.client.delete_file_search_store(name, force).await
    }

    /// Upload file data into a store, returning a handle on the indexing
    /// operation.
    pub async fn upload_to_file_search_store(
        &self,
        store_name: &str,
        data: Vec<u8>,
        display_name: Option<String>,
        mime_type: Mime,
    ) -> Result<OperationHandle> {
        let request = UploadToFileSearchStoreRequest {
            display_name,
            mime_type,
        };
        let operation = self
            .client
            .upload_to_file_search_store(store_name, data, request)
            .await?;
        Ok(OperationHandle::new(self.client.clone(), operation))
    }
}
