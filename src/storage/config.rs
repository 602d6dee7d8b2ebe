// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Environment variable consulted when no Azure connection string is supplied
/// as an explicit option.
pub const ENV_CONNECTION_STRING: &str = "AZURE_STORAGE_CONNECTION_STRING";

/// Environment variable consulted when no default container is configured.
pub const ENV_DEFAULT_CONTAINER: &str = "BLOB_BRIDGE_CONTAINER";

/// Storage backend type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// In-memory storage (tests and ephemeral use)
    Memory,
    /// Local filesystem storage
    Local,
    /// AWS S3 storage
    Aws,
    /// Azure Blob Storage
    Azure,
    /// Google Cloud Storage
    Gcs,
}

/// Generic configuration for storage backends using object_store
///
/// Provider-specific settings are stored in a string option map and passed
/// directly to the object_store builders, leveraging object_store's own
/// configuration system instead of one config struct per backend.
///
/// # Examples
///
/// ## Local filesystem
/// ```rust,no_run
/// use blob_bridge::StoreConfig;
///
/// let config = StoreConfig::local()
///     .with_option("path", "/tmp/data")
///     .with_default_container("raw-data");
/// ```
///
/// ## Azure Blob Storage
/// ```rust,no_run
/// use blob_bridge::StoreConfig;
///
/// let config = StoreConfig::azure()
///     .with_option("container", "mycontainer")
///     .with_option("account_name", "myaccount")
///     .with_option("access_key", "ACCOUNT_KEY");
/// ```
///
/// ## AWS S3
/// ```rust,no_run
/// use blob_bridge::StoreConfig;
///
/// let config = StoreConfig::aws()
///     .with_option("bucket", "my-bucket")
///     .with_option("region", "us-east-1")
///     .with_option("access_key_id", "ACCESS_KEY")
///     .with_option("secret_access_key", "SECRET_ACCESS_KEY");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Storage backend type
    #[serde(rename = "type")]
    pub storage_type: StorageType,

    /// Backend-specific configuration options
    ///
    /// These options are passed directly to the object_store builders.
    /// Common options include:
    ///
    /// Azure:
    /// - container: Root container name (required)
    /// - connection_string: Full connection string, falls back to
    ///   AZURE_STORAGE_CONNECTION_STRING
    /// - account_name: Storage account name
    /// - access_key: Account key
    /// - sas_token: SAS token
    /// - tenant_id / client_id / client_secret: Service principal credentials
    ///
    /// AWS S3:
    /// - bucket: Bucket name (required)
    /// - region: AWS region (e.g., "us-east-1")
    /// - access_key_id / secret_access_key / session_token: Credentials
    /// - endpoint: Custom endpoint URL (for S3-compatible services)
    /// - allow_http: "true" to allow HTTP connections
    ///
    /// GCS:
    /// - bucket: Bucket name (required)
    /// - service_account_key_path: Path to service account JSON key file
    /// - service_account_key: Service account key as JSON string
    ///
    /// Local:
    /// - path: Base directory (required, must exist)
    #[serde(default)]
    pub options: HashMap<String, String>,

    /// Container used when a per-call operation omits an explicit container.
    ///
    /// Resolved once at construction time, falling back to the
    /// `BLOB_BRIDGE_CONTAINER` environment variable when not set here.
    #[serde(default)]
    pub default_container: Option<String>,
}

impl StoreConfig {
    /// Create a new storage configuration.
    ///
    /// # Arguments
    ///
    /// * `storage_type` - The backend type ("memory", "local", "aws", "azure", "gcs")
    ///
    /// # Returns
    ///
    /// A new `StoreConfig` instance for the specified backend.
    ///
    /// # Panics
    ///
    /// Panics if `storage_type` is not a known backend name.
    pub fn new(storage_type: impl Into<String>) -> Self {
        let storage_type_str = storage_type.into();
        let storage_type = match storage_type_str.to_lowercase().as_str() {
            "memory" => StorageType::Memory,
            "local" => StorageType::Local,
            "aws" | "s3" => StorageType::Aws,
            "azure" => StorageType::Azure,
            "gcs" | "gcp" => StorageType::Gcs,
            _ => panic!("Unknown storage type: {}", storage_type_str),
        };

        Self {
            storage_type,
            options: HashMap::new(),
            default_container: None,
        }
    }

    /// Create an in-memory storage configuration.
    pub fn memory() -> Self {
        Self::new("memory")
    }

    /// Create a local filesystem storage configuration.
    pub fn local() -> Self {
        Self::new("local")
    }

    /// Create an AWS S3 storage configuration.
    pub fn aws() -> Self {
        Self::new("aws")
    }

    /// Create an Azure Blob Storage configuration.
    pub fn azure() -> Self {
        Self::new("azure")
    }

    /// Create a Google Cloud Storage configuration.
    pub fn gcs() -> Self {
        Self::new("gcs")
    }

    /// Add a configuration option.
    ///
    /// # Arguments
    ///
    /// * `key` - The option key
    /// * `value` - The option value
    ///
    /// # Returns
    ///
    /// The `StoreConfig` instance with the added option (for method chaining).
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Add multiple configuration options.
    ///
    /// # Arguments
    ///
    /// * `options` - HashMap of options to add
    ///
    /// # Returns
    ///
    /// The `StoreConfig` instance with the added options (for method chaining).
    pub fn with_options(mut self, options: HashMap<String, String>) -> Self {
        self.options.extend(options);
        self
    }

    /// Set the default container used when per-call operations omit one.
    ///
    /// # Arguments
    ///
    /// * `container` - The container name
    ///
    /// # Returns
    ///
    /// The `StoreConfig` instance with the default container set (for method chaining).
    pub fn with_default_container(mut self, container: impl Into<String>) -> Self {
        self.default_container = Some(container.into());
        self
    }

    /// Get a configuration option.
    ///
    /// # Arguments
    ///
    /// * `key` - The option key to retrieve
    ///
    /// # Returns
    ///
    /// `Some(&String)` if the option exists, `None` otherwise.
    pub fn get_option(&self, key: &str) -> Option<&String> {
        self.options.get(key)
    }

    /// Get the storage type as a string.
    ///
    /// # Returns
    ///
    /// A string slice representing the backend type.
    pub fn storage_type_str(&self) -> &str {
        match self.storage_type {
            StorageType::Memory => "memory",
            StorageType::Local => "local",
            StorageType::Aws => "aws",
            StorageType::Azure => "azure",
            StorageType::Gcs => "gcs",
        }
    }
}

/// Resolve a setting from an explicit value or an environment variable.
///
/// The explicit value wins when present and non-empty; otherwise the
/// environment variable is consulted. Evaluated once at construction time,
/// never re-read per call.
pub(crate) fn resolve_setting(explicit: Option<String>, env_var: &str) -> Option<String> {
    explicit
        .filter(|value| !value.is_empty())
        .or_else(|| std::env::var(env_var).ok().filter(|value| !value.is_empty()))
}
