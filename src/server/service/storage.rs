//! Client for the object storage HTTP API.
//!
//! Objects are written with `PUT {url}/storage/v1/object/{bucket}/{key}` using the service
//! key as a bearer token and read back through the public path
//! `{url}/storage/v1/object/public/{bucket}/{key}`.

use reqwest::header;
use url::Url;

use crate::server::{
    config::StorageConfig,
    error::{storage::StorageError, AppError},
    util::random::random_token,
};

const MB: usize = 1024 * 1024;

/// The three upload endpoints and their acceptance rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Cover,
    Pdf,
    Epub,
}

impl UploadKind {
    /// Top-level folder inside the bucket.
    pub fn folder(&self) -> &'static str {
        match self {
            Self::Cover => "covers",
            Self::Pdf => "pdfs",
            Self::Epub => "epubs",
        }
    }

    pub fn max_bytes(&self) -> usize {
        match self {
            Self::Cover => 5 * MB,
            Self::Pdf | Self::Epub => 50 * MB,
        }
    }

    /// Returns the file extension for an accepted content type.
    pub fn extension_for(&self, content_type: &str) -> Option<&'static str> {
        match (self, content_type) {
            (Self::Cover, "image/jpeg") => Some("jpg"),
            (Self::Cover, "image/png") => Some("png"),
            (Self::Cover, "image/webp") => Some("webp"),
            (Self::Cover, "image/gif") => Some("gif"),
            (Self::Pdf, "application/pdf") => Some("pdf"),
            (Self::Epub, "application/epub+zip") => Some("epub"),
            _ => None,
        }
    }

    /// Checks content type and size before anything is sent upstream.
    ///
    /// # Returns
    /// - `Ok(&str)` - Extension to use in the object key
    /// - `Err(StorageError::UnsupportedFileType)` - Content type not accepted for this kind
    /// - `Err(StorageError::FileTooLarge)` - Payload exceeds the kind's limit
    pub fn validate(&self, content_type: &str, size: usize) -> Result<&'static str, StorageError> {
        let extension = self
            .extension_for(content_type)
            .ok_or_else(|| StorageError::UnsupportedFileType(content_type.to_string()))?;

        if size > self.max_bytes() {
            return Err(StorageError::FileTooLarge {
                limit_mb: self.max_bytes() / MB,
            });
        }

        Ok(extension)
    }
}

/// A stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub url: String,
    pub key: String,
    pub size: usize,
    pub content_type: String,
}

#[derive(Clone)]
pub struct StorageClient {
    http_client: reqwest::Client,
    config: Option<StorageConfig>,
}

impl StorageClient {
    pub fn new(http_client: reqwest::Client, config: Option<StorageConfig>) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Validates and uploads a file under a fresh random key.
    ///
    /// # Arguments
    /// - `kind` - Upload endpoint, selecting folder and acceptance rules
    /// - `content_type` - MIME type declared by the multipart field
    /// - `bytes` - File contents
    ///
    /// # Returns
    /// - `Ok(StoredObject)` - Public URL and key of the new object
    /// - `Err(AppError::StorageErr)` - Validation failed, storage unconfigured, or upstream
    ///   rejected the write
    /// - `Err(AppError::ReqwestErr)` - Storage service unreachable
    pub async fn upload(
        &self,
        kind: UploadKind,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredObject, AppError> {
        let extension = kind.validate(content_type, bytes.len())?;
        let config = self.config()?;

        let key = format!("{}/{}.{}", kind.folder(), random_token(32), extension);
        let size = bytes.len();

        let response = self
            .http_client
            .put(object_url(config, &key))
            .bearer_auth(&config.service_key)
            .header(header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        check_status(response).await?;

        tracing::debug!("Uploaded {} ({} bytes)", key, size);

        Ok(StoredObject {
            url: public_url(config, &key),
            key,
            size,
            content_type: content_type.to_string(),
        })
    }

    /// Deletes an object given the public URL returned by `upload`.
    ///
    /// # Returns
    /// - `Ok(String)` - Key of the deleted object
    /// - `Err(AppError::StorageErr)` - URL is outside the bucket, storage unconfigured, or
    ///   upstream rejected the delete
    pub async fn delete(&self, public: &str) -> Result<String, AppError> {
        let config = self.config()?;
        let key = key_from_public_url(config, public)?;

        let response = self
            .http_client
            .delete(object_url(config, &key))
            .bearer_auth(&config.service_key)
            .send()
            .await?;

        check_status(response).await?;

        Ok(key)
    }

    fn config(&self) -> Result<&StorageConfig, StorageError> {
        self.config.as_ref().ok_or(StorageError::NotConfigured)
    }
}

fn object_url(config: &StorageConfig, key: &str) -> String {
    format!("{}/storage/v1/object/{}/{}", config.url, config.bucket, key)
}

fn public_url(config: &StorageConfig, key: &str) -> String {
    format!(
        "{}/storage/v1/object/public/{}/{}",
        config.url, config.bucket, key
    )
}

/// Recovers the object key from a public URL pointing into the configured bucket.
fn key_from_public_url(config: &StorageConfig, public: &str) -> Result<String, StorageError> {
    let invalid = || StorageError::InvalidUrl(public.to_string());

    let parsed = Url::parse(public).map_err(|_| invalid())?;
    let base = Url::parse(&config.url).map_err(|_| invalid())?;
    if parsed.origin() != base.origin() {
        return Err(invalid());
    }

    let prefix = format!(
        "{}/storage/v1/object/public/{}/",
        base.path().trim_end_matches('/'),
        config.bucket
    );

    match parsed.path().strip_prefix(&prefix) {
        Some(key) if !key.is_empty() && !key.split('/').any(|s| s == "..") => Ok(key.to_string()),
        _ => Err(invalid()),
    }
}

async fn check_status(response: reqwest::Response) -> Result<(), StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();

    Err(StorageError::Upstream {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StorageConfig {
        StorageConfig {
            url: "https://store.example.com".to_string(),
            service_key: "key".to_string(),
            bucket: "books".to_string(),
        }
    }

    #[test]
    fn cover_accepts_images_up_to_five_megabytes() {
        assert_eq!(UploadKind::Cover.validate("image/png", 1024).ok(), Some("png"));
        assert!(matches!(
            UploadKind::Cover.validate("image/png", 5 * MB + 1),
            Err(StorageError::FileTooLarge { limit_mb: 5 })
        ));
        assert!(matches!(
            UploadKind::Cover.validate("application/pdf", 10),
            Err(StorageError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn documents_accept_only_their_type() {
        assert_eq!(
            UploadKind::Pdf.validate("application/pdf", 50 * MB).ok(),
            Some("pdf")
        );
        assert_eq!(
            UploadKind::Epub.validate("application/epub+zip", 1).ok(),
            Some("epub")
        );
        assert!(UploadKind::Epub.validate("application/pdf", 1).is_err());
    }

    #[test]
    fn public_url_round_trips_to_key() {
        let config = config();
        let url = public_url(&config, "covers/abc.png");

        assert_eq!(
            url,
            "https://store.example.com/storage/v1/object/public/books/covers/abc.png"
        );
        assert_eq!(
            key_from_public_url(&config, &url).ok().as_deref(),
            Some("covers/abc.png")
        );
    }

    #[test]
    fn foreign_urls_are_rejected() {
        let config = config();

        assert!(key_from_public_url(&config, "https://evil.example.com/storage/v1/object/public/books/a.png").is_err());
        assert!(key_from_public_url(&config, "https://store.example.com/storage/v1/object/public/other/a.png").is_err());
        assert!(key_from_public_url(&config, "not a url").is_err());
    }
}
