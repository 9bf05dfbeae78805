use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::config::ArchiveConfig;
use crate::error::{RelayError, Result};
use crate::interfaces::storage::ObjectStore;

const ACL_HEADER: &str = "x-amz-acl";
const PUBLIC_READ: &str = "public-read";

/// S3-compatible bucket reached with plain `PUT` requests.
pub struct HttpObjectStore {
    client: reqwest::Client,
    bucket_url: String,
    public_root: String,
    authorization: Option<String>,
}

impl HttpObjectStore {
    pub fn new(config: &ArchiveConfig) -> Result<Self> {
        let endpoint = config.endpoint.trim().trim_end_matches('/');
        let bucket = config.bucket.trim().trim_matches('/');
        if endpoint.is_empty() || bucket.is_empty() {
            return Err(RelayError::Config(
                "archive endpoint and bucket are required".to_string(),
            ));
        }
        let bucket_url = format!("{endpoint}/{bucket}");
        let public_root = config
            .public_root
            .as_deref()
            .map(|root| root.trim().trim_end_matches('/').to_string())
            .filter(|root| !root.is_empty())
            .unwrap_or_else(|| bucket_url.clone());

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RelayError::Http(e.to_string()))?;

        Ok(Self {
            client,
            bucket_url,
            public_root,
            authorization: config.authorization.clone(),
        })
    }

    fn headers(&self, content_type: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACL_HEADER, HeaderValue::from_static(PUBLIC_READ));
        headers.insert(
            CONTENT_TYPE,
            content_type
                .parse::<HeaderValue>()
                .map_err(|e| RelayError::Http(e.to_string()))?,
        );
        if let Some(authorization) = &self.authorization {
            headers.insert(
                AUTHORIZATION,
                authorization
                    .parse::<HeaderValue>()
                    .map_err(|e| RelayError::Http(e.to_string()))?,
            );
        }
        Ok(headers)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put_public(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        let url = format!("{}/{key}", self.bucket_url);
        let response = self
            .client
            .put(&url)
            .headers(self.headers(content_type)?)
            .body(body)
            .send()
            .await
            .map_err(|e| RelayError::Storage(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(RelayError::Storage(format!(
                "upload of {key} failed with {status}: {text}"
            )));
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_root)
    }
}
