//! DigitalOcean Spaces storage backend.
//!
//! Stores each set as one object in a space (bucket), keyed by the set id.
//! Works with any S3-compatible store when given a custom endpoint.
//!
//! ## Usage
//!
//! ```ignore
//! let store = Spaces::new("my-space", "nyc3", access_key, secret_key)?;
//! store.write(&vars)?;
//! let vars = store.read("production")?;
//! ```
//!
//! Credentials and target are passed in by the caller; nothing here reads
//! the process environment or shared AWS config files.

use std::sync::Arc;

use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tokio::runtime::Runtime;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::Storage;
use crate::core::codec::{Codec, PlainText};
use crate::core::constants;
use crate::core::domain::Variables;
use crate::error::{ConfigError, StorageError};

/// Connection settings for a space.
#[derive(Clone)]
pub struct SpacesConfig {
    /// Space (bucket) name
    pub space: String,
    /// Region slug, e.g. `nyc3`
    pub region: String,
    pub access_key: String,
    pub secret_key: Zeroizing<String>,
    /// Custom endpoint; defaults to `https://<region>.digitaloceanspaces.com`
    pub endpoint: Option<String>,
    /// Address objects as `<endpoint>/<space>/<key>` instead of
    /// `<space>.<endpoint>/<key>`.
    pub path_style: bool,
}

impl std::fmt::Debug for SpacesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpacesConfig")
            .field("space", &self.space)
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("path_style", &self.path_style)
            .finish()
    }
}

impl SpacesConfig {
    /// Settings for a DigitalOcean space in `region`.
    pub fn new(
        space: impl Into<String>,
        region: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            space: space.into(),
            region: region.into(),
            access_key: access_key.into(),
            secret_key: Zeroizing::new(secret_key.into()),
            endpoint: None,
            path_style: false,
        }
    }

    /// Endpoint the client talks to.
    pub fn endpoint_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => constants::SPACES_ENDPOINT.replace("{region}", &self.region),
        }
    }

    /// Check the settings before building a client.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.space.is_empty()
            || self
                .space
                .chars()
                .any(|c| c == '/' || c.is_whitespace() || c.is_control())
        {
            return Err(ConfigError::InvalidSpace(self.space.clone()));
        }

        if self.region.is_empty()
            || !self
                .region
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ConfigError::InvalidRegion(self.region.clone()));
        }

        if let Some(endpoint) = &self.endpoint {
            validate_endpoint(endpoint)?;
        }

        if self.access_key.is_empty() {
            return Err(ConfigError::InvalidCredentials("access key"));
        }
        if self.secret_key.is_empty() {
            return Err(ConfigError::InvalidCredentials("secret key"));
        }

        Ok(())
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    let rest = endpoint
        .strip_prefix("https://")
        .or_else(|| endpoint.strip_prefix("http://"))
        .ok_or_else(|| ConfigError::InvalidEndpoint(endpoint.to_string()))?;

    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() || host.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ConfigError::InvalidEndpoint(endpoint.to_string()));
    }

    Ok(())
}

/// DigitalOcean Spaces backend.
///
/// The S3 client is async; calls are driven on a current-thread runtime
/// owned by the backend. Concurrent calls for different ids are
/// independent. Concurrent writes to the same id race in the store and
/// the last one wins.
///
/// # Runtime
///
/// Every call blocks on the owned runtime, so `write`, `read` and
/// `delete` must not be called from inside another tokio runtime (tokio
/// panics with "Cannot start a runtime from within a runtime"). From
/// async code, run them on `spawn_blocking`.
pub struct Spaces {
    client: Client,
    space: String,
    codec: Arc<dyn Codec>,
    runtime: Runtime,
}

impl Spaces {
    /// Connect to a DigitalOcean space.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a setting is malformed or the client
    /// cannot be initialized.
    pub fn new(
        space: &str,
        region: &str,
        access_key: &str,
        secret_key: &str,
    ) -> Result<Self, ConfigError> {
        Self::from_config(&SpacesConfig::new(space, region, access_key, secret_key))
    }

    /// Connect using full settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a setting is malformed or the client
    /// cannot be initialized.
    pub fn from_config(config: &SpacesConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ConfigError::Runtime)?;

        let endpoint = config.endpoint_url();
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.as_str(),
            None,
            None,
            constants::CREDENTIALS_PROVIDER,
        );

        let sdk_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(&endpoint)
            .credentials_provider(credentials)
            .force_path_style(config.path_style)
            .retry_config(RetryConfig::disabled())
            .build();

        debug!(space = %config.space, endpoint = %endpoint, "created spaces client");

        Ok(Self {
            client: Client::from_conf(sdk_config),
            space: config.space.clone(),
            codec: Arc::new(PlainText),
            runtime,
        })
    }

    /// Replace the codec used for encoding and decoding documents.
    pub fn with_codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codec = codec;
        self
    }

    /// Name of the space this backend writes to.
    pub fn space(&self) -> &str {
        &self.space
    }

    /// Delete the object stored under `id`.
    ///
    /// Deleting a missing object succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Backend` if the request fails.
    pub fn delete(&self, id: &str) -> Result<(), StorageError> {
        debug!(space = %self.space, id, "deleting object");

        self.runtime
            .block_on(
                self.client
                    .delete_object()
                    .bucket(&self.space)
                    .key(id)
                    .send(),
            )
            .map_err(|e| StorageError::backend("unable to delete object from space", e))?;
        Ok(())
    }
}

impl Storage for Spaces {
    fn write(&self, vars: &Variables) -> Result<(), StorageError> {
        let doc = self.codec.encode(vars);
        debug!(
            space = %self.space,
            id = vars.id(),
            bytes = doc.len(),
            codec = self.codec.name(),
            "writing object"
        );

        self.runtime
            .block_on(
                self.client
                    .put_object()
                    .bucket(&self.space)
                    .key(vars.id())
                    .content_type("text/plain; charset=utf-8")
                    .body(ByteStream::from(doc))
                    .send(),
            )
            .map_err(|e| StorageError::backend("unable to write object to space", e))?;
        Ok(())
    }

    fn read(&self, id: &str) -> Result<Variables, StorageError> {
        debug!(space = %self.space, id, "reading object");

        let output = self
            .runtime
            .block_on(self.client.get_object().bucket(&self.space).key(id).send())
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    StorageError::NotFound(id.to_string())
                } else {
                    StorageError::backend("unable to read object from space", e)
                }
            })?;

        // Objects are small; buffer the whole body before decoding.
        let data = self
            .runtime
            .block_on(output.body.collect())
            .map_err(|e| StorageError::backend("unable to read object data", e))?
            .into_bytes();

        trace!(id, bytes = data.len(), "fetched object");
        super::decode(self.codec.as_ref(), id, &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    fn config() -> SpacesConfig {
        SpacesConfig::new("my-space", "nyc3", "access", "secret")
    }

    const NO_SUCH_KEY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>NoSuchKey</Code><Message>The specified key does not exist.</Message><Key>missing</Key><RequestId>tx00000</RequestId></Error>"#;

    /// Answer a single HTTP request on a local port with a canned response.
    ///
    /// Returns the endpoint and a channel that yields the request line.
    fn serve_once(
        status: &'static str,
        content_type: &'static str,
        body: &'static str,
    ) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut chunk = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => head.extend_from_slice(&chunk[..n]),
                }
            }
            let head = String::from_utf8_lossy(&head);
            let _ = tx.send(head.lines().next().unwrap_or_default().to_string());

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        (format!("http://{addr}"), rx)
    }

    fn stub_store(endpoint: String) -> Spaces {
        let mut config = config();
        config.endpoint = Some(endpoint);
        config.path_style = true;
        Spaces::from_config(&config).unwrap()
    }

    #[test]
    fn test_default_endpoint_uses_region() {
        assert_eq!(
            config().endpoint_url(),
            "https://nyc3.digitaloceanspaces.com"
        );
    }

    #[test]
    fn test_custom_endpoint_trims_trailing_slash() {
        let mut config = config();
        config.endpoint = Some("http://localhost:9000/".to_string());

        assert_eq!(config.endpoint_url(), "http://localhost:9000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_good_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_region() {
        for region in ["", "NYC3", "nyc 3", "nyc3.evil.com/", "ams3/"] {
            let mut config = config();
            config.region = region.to_string();
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidRegion(_))),
                "region {region:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_rejects_bad_space() {
        for space in ["", "a/b", "my space"] {
            let mut config = config();
            config.space = space.to_string();
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidSpace(_))
            ));
        }
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        for endpoint in ["nyc3.digitaloceanspaces.com", "ftp://host", "https://", "https:///x"] {
            let mut config = config();
            config.endpoint = Some(endpoint.to_string());
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidEndpoint(_))),
                "endpoint {endpoint:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_rejects_empty_credentials() {
        let mut config = config();
        config.access_key.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCredentials("access key"))
        ));

        let config = SpacesConfig::new("my-space", "nyc3", "access", "");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCredentials("secret key"))
        ));
    }

    #[test]
    fn test_new_builds_client_without_network() {
        let store = Spaces::new("my-space", "nyc3", "access", "secret").unwrap();
        assert_eq!(store.space(), "my-space");
    }

    #[test]
    fn test_new_rejects_malformed_region() {
        assert!(matches!(
            Spaces::new("my-space", "not a region", "access", "secret"),
            Err(ConfigError::InvalidRegion(_))
        ));
    }

    #[test]
    fn test_unreachable_endpoint_is_backend_error() {
        let mut config = config();
        // Port 9 (discard) on localhost is closed on test machines.
        config.endpoint = Some("http://127.0.0.1:9".to_string());
        config.path_style = true;
        let store = Spaces::from_config(&config).unwrap();

        let err = store.read("anything").unwrap_err();
        assert!(matches!(err, StorageError::Backend { .. }), "got {err:?}");
    }

    #[test]
    fn test_read_no_such_key_is_not_found() {
        let (endpoint, requests) = serve_once("404 Not Found", "application/xml", NO_SUCH_KEY);
        let store = stub_store(endpoint);

        match store.read("missing") {
            Err(StorageError::NotFound(id)) => assert_eq!(id, "missing"),
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(requests.recv().unwrap().starts_with("GET /my-space/missing"));
    }

    #[test]
    fn test_read_malformed_object_is_decode_error() {
        let (endpoint, _requests) = serve_once("200 OK", "text/plain", "NOPE\n");
        let store = stub_store(endpoint);

        match store.read("broken") {
            Err(StorageError::Decode { id, source }) => {
                assert_eq!(id, "broken");
                assert_eq!(source, CodecError::MalformedLine("NOPE".to_string()));
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_decodes_object_body() {
        let (endpoint, requests) = serve_once(
            "200 OK",
            "text/plain",
            "API_KEY=12345\nDB_HOST=localhost\nDB_PORT=5432\n",
        );
        let store = stub_store(endpoint);

        let vars = store.read("test-env").unwrap();

        assert_eq!(vars.id(), "test-env");
        assert_eq!(vars.list_keys(), vec!["API_KEY", "DB_HOST", "DB_PORT"]);
        assert_eq!(vars.get("DB_HOST"), Ok("localhost"));
        assert!(requests.recv().unwrap().starts_with("GET /my-space/test-env"));
    }
}
