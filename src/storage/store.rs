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

use super::builder::build_store;
use super::config::{resolve_setting, StoreConfig, ENV_DEFAULT_CONTAINER};
use super::error::{StoreError, StoreResult};
use crate::tabular;
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::StreamExt;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutMode, PutPayload};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::info;

/// Marker object written when a container is created, so that empty containers
/// stay visible to listing.
const CONTAINER_MARKER: &str = ".container";

/// Metadata about a stored blob
#[derive(Debug, Clone)]
pub struct BlobMetadata {
    /// Blob name within its container
    pub name: String,

    /// Blob size in bytes
    pub size: u64,

    /// Last modified timestamp (if available)
    pub last_modified: Option<DateTime<Utc>>,
}

/// Typed facade over an object storage backend
///
/// A `BlobStore` owns one client handle, built once at construction and reused
/// by every operation. Containers are modeled as first-level key prefixes
/// within the configured backend root, so the same operations work against
/// Azure, S3, GCS, local directories, and the in-memory backend.
///
/// Every operation is a single synchronous round trip to the backend: it either
/// fully succeeds or fails with a normalized [`StoreError`], and nothing is
/// retried or recovered locally. Thread-safety is inherited from the wrapped
/// `object_store` client, not added by this layer.
pub struct BlobStore {
    config: StoreConfig,
    store: Arc<dyn ObjectStore>,
    default_container: Option<String>,
}

impl BlobStore {
    /// Connect to the configured storage backend.
    ///
    /// The default container is resolved argument-first with an environment
    /// fallback (`BLOB_BRIDGE_CONTAINER`), once, here. The client handle is
    /// built immediately; no further connection setup happens per call.
    ///
    /// # Arguments
    ///
    /// * `config` - The storage configuration specifying the backend and options
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(BlobStore)` - A connected store ready to use
    /// * `Err(StoreError)` - If the configuration is incomplete or the client cannot be built
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * A required credential or option is missing (`StoreError::Config`)
    /// * The client handle cannot be constructed from the given credentials (`StoreError::Connection`)
    /// * The resolved default container name is invalid
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        let default_container =
            resolve_setting(config.default_container.clone(), ENV_DEFAULT_CONTAINER);
        if let Some(name) = &default_container {
            validate_container_name(name)?;
        }

        let store = build_store(&config)?;

        info!(
            "Connected {} store, default_container={:?}",
            config.storage_type_str(),
            default_container
        );

        Ok(Self {
            config,
            store: Arc::from(store),
            default_container,
        })
    }

    /// Get the storage configuration this store was built from.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get the resolved default container, if any.
    pub fn default_container(&self) -> Option<&str> {
        self.default_container.as_deref()
    }

    /// Validate the connection to the storage backend.
    ///
    /// Performs a single root listing to ensure credentials and connectivity
    /// work.
    ///
    /// # Errors
    ///
    /// This function will return `StoreError::Connection` if:
    /// * Credentials are invalid or expired
    /// * Network connectivity issues occur
    pub async fn validate_connection(&self) -> StoreResult<()> {
        self.store.list_with_delimiter(None).await.map_err(|e| {
            StoreError::Connection(format!(
                "Failed to reach {} store: {}",
                self.config.storage_type_str(),
                e
            ))
        })?;
        Ok(())
    }

    /// Create a new container.
    ///
    /// Materializes the container by writing a zero-byte marker object with
    /// create-only semantics, so a name collision surfaces as a conflict in a
    /// single backend call.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the container to create
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(String)` - A confirmation message
    /// * `Err(StoreError)` - If the name is invalid or the container already exists
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The name is empty or contains '/' (`StoreError::Config`)
    /// * A container with this name already exists (`StoreError::Conflict`)
    /// * The backend reports any other failure
    pub async fn create_container(&self, name: &str) -> StoreResult<String> {
        validate_container_name(name)?;

        let marker = ObjectPath::from(format!("{}/{}", name, CONTAINER_MARKER));
        self.store
            .put_opts(&marker, PutPayload::new(), PutMode::Create.into())
            .await
            .map_err(|e| match e {
                object_store::Error::AlreadyExists { .. } => StoreError::Conflict {
                    path: name.to_string(),
                },
                other => other.into(),
            })?;

        info!("Created container name={}", name);
        Ok(format!("Container '{}' created successfully", name))
    }

    /// Delete a container and everything inside it.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the container to delete
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(String)` - A confirmation message
    /// * `Err(StoreError)` - If the container does not exist
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The name is empty or contains '/' (`StoreError::Config`)
    /// * The container does not exist (`StoreError::NotFound`)
    /// * The backend reports any other failure
    pub async fn delete_container(&self, name: &str) -> StoreResult<String> {
        validate_container_name(name)?;

        let prefix = ObjectPath::from(name);
        let mut stream = self.store.list(Some(&prefix));
        let mut locations = Vec::new();
        while let Some(meta) = stream.next().await {
            locations.push(meta?.location);
        }

        if locations.is_empty() {
            return Err(StoreError::NotFound {
                path: name.to_string(),
            });
        }

        let object_count = locations.len();
        for location in locations {
            self.store.delete(&location).await?;
        }

        info!("Deleted container name={} object_count={}", name, object_count);
        Ok(format!("Container '{}' deleted successfully", name))
    }

    /// List all containers in the storage root.
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Vec<String>)` - Sorted container names; empty is a valid result
    /// * `Err(StoreError)` - If listing fails
    pub async fn list_containers(&self) -> StoreResult<Vec<String>> {
        let listing = self.store.list_with_delimiter(None).await?;

        let mut names: Vec<String> = listing
            .common_prefixes
            .iter()
            .map(|prefix| prefix.to_string())
            .collect();
        names.sort();

        Ok(names)
    }

    /// Upload raw bytes as a blob.
    ///
    /// # Arguments
    ///
    /// * `container` - Container to upload into, or `None` to use the default
    /// * `blob_name` - Name of the blob
    /// * `data` - Data to upload
    /// * `overwrite` - Whether to replace an existing blob of the same name
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(String)` - A confirmation message
    /// * `Err(StoreError)` - If the upload fails
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * No container is specified and no default is configured (`StoreError::Config`)
    /// * `overwrite` is false and the blob already exists (`StoreError::Conflict`)
    /// * The backend reports any other failure
    pub async fn upload_blob(
        &self,
        container: Option<&str>,
        blob_name: &str,
        data: impl Into<Bytes>,
        overwrite: bool,
    ) -> StoreResult<String> {
        let container = self.resolve_container(container)?;
        let path = blob_path(&container, blob_name)?;

        let mode = if overwrite {
            PutMode::Overwrite
        } else {
            PutMode::Create
        };
        self.store
            .put_opts(&path, PutPayload::from(data.into()), mode.into())
            .await?;

        info!(
            "Uploaded blob container={} name={} overwrite={}",
            container, blob_name, overwrite
        );
        Ok(format!("Blob '{}' uploaded successfully", blob_name))
    }

    /// Download a blob's content.
    ///
    /// # Arguments
    ///
    /// * `container` - Container to download from, or `None` to use the default
    /// * `blob_name` - Name of the blob to download
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Bytes)` - The blob content
    /// * `Err(StoreError)` - If the blob cannot be read
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * No container is specified and no default is configured (`StoreError::Config`)
    /// * The blob does not exist (`StoreError::NotFound`)
    /// * The backend reports any other failure
    pub async fn download_blob(
        &self,
        container: Option<&str>,
        blob_name: &str,
    ) -> StoreResult<Bytes> {
        let container = self.resolve_container(container)?;
        let path = blob_path(&container, blob_name)?;

        let result = self.store.get(&path).await?;
        let bytes = result.bytes().await?;

        info!(
            "Downloaded blob container={} name={} size={}",
            container,
            blob_name,
            bytes.len()
        );
        Ok(bytes)
    }

    /// Delete a blob.
    ///
    /// Existence is verified first so that every backend reports a missing
    /// blob uniformly as `NotFound`.
    ///
    /// # Arguments
    ///
    /// * `container` - Container to delete from, or `None` to use the default
    /// * `blob_name` - Name of the blob to delete
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(String)` - A confirmation message
    /// * `Err(StoreError)` - If the blob does not exist or deletion fails
    pub async fn delete_blob(
        &self,
        container: Option<&str>,
        blob_name: &str,
    ) -> StoreResult<String> {
        let container = self.resolve_container(container)?;
        let path = blob_path(&container, blob_name)?;

        self.store.head(&path).await?;
        self.store.delete(&path).await?;

        info!("Deleted blob container={} name={}", container, blob_name);
        Ok(format!("Blob '{}' deleted successfully", blob_name))
    }

    /// List all blobs in a container.
    ///
    /// # Arguments
    ///
    /// * `container` - Container to list, or `None` to use the default
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Vec<String>)` - Sorted blob names; empty is a valid result
    /// * `Err(StoreError)` - If listing fails
    pub async fn blob_list(&self, container: Option<&str>) -> StoreResult<Vec<String>> {
        let container = self.resolve_container(container)?;

        let prefix = ObjectPath::from(container.as_str());
        let strip = format!("{}/", container);

        let mut stream = self.store.list(Some(&prefix));
        let mut names = Vec::new();
        while let Some(meta) = stream.next().await {
            let location = meta?.location.to_string();
            let name = location
                .strip_prefix(&strip)
                .unwrap_or(location.as_str())
                .to_string();
            if name != CONTAINER_MARKER {
                names.push(name);
            }
        }
        names.sort();

        Ok(names)
    }

    /// Check whether a blob exists.
    ///
    /// # Arguments
    ///
    /// * `container` - Container to check in, or `None` to use the default
    /// * `blob_name` - Name of the blob
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(true)` - The blob exists
    /// * `Ok(false)` - The blob does not exist
    /// * `Err(StoreError)` - If the existence check fails (not including NotFound)
    pub async fn blob_exists(
        &self,
        container: Option<&str>,
        blob_name: &str,
    ) -> StoreResult<bool> {
        let container = self.resolve_container(container)?;
        let path = blob_path(&container, blob_name)?;

        match self.store.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Get metadata for a blob.
    ///
    /// # Arguments
    ///
    /// * `container` - Container to look in, or `None` to use the default
    /// * `blob_name` - Name of the blob
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(BlobMetadata)` - The blob's name, size, and last modified time
    /// * `Err(StoreError)` - If the blob does not exist or metadata cannot be read
    pub async fn blob_metadata(
        &self,
        container: Option<&str>,
        blob_name: &str,
    ) -> StoreResult<BlobMetadata> {
        let container = self.resolve_container(container)?;
        let path = blob_path(&container, blob_name)?;

        let meta = self.store.head(&path).await?;

        Ok(BlobMetadata {
            name: blob_name.to_string(),
            size: meta.size,
            last_modified: Some(meta.last_modified),
        })
    }

    /// Download a CSV blob and decode it into a tabular frame.
    ///
    /// # Arguments
    ///
    /// * `container` - Container to download from, or `None` to use the default
    /// * `blob_name` - Name of the CSV blob
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(RecordBatch)` - The decoded frame
    /// * `Err(StoreError)` - If the blob is missing or the bytes are not valid CSV
    pub async fn csv_to_df(
        &self,
        container: Option<&str>,
        blob_name: &str,
    ) -> StoreResult<RecordBatch> {
        let data = self.download_blob(container, blob_name).await?;
        tabular::csv::frame_from_csv(&data)
    }

    /// Download a Parquet blob and decode it into a tabular frame.
    ///
    /// # Arguments
    ///
    /// * `container` - Container to download from, or `None` to use the default
    /// * `blob_name` - Name of the Parquet blob
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(RecordBatch)` - The decoded frame
    /// * `Err(StoreError)` - If the blob is missing or the bytes are not valid Parquet
    pub async fn parquet_to_df(
        &self,
        container: Option<&str>,
        blob_name: &str,
    ) -> StoreResult<RecordBatch> {
        let data = self.download_blob(container, blob_name).await?;
        tabular::parquet::frame_from_parquet(data)
    }

    /// Encode a frame as CSV and upload it as a blob.
    ///
    /// # Arguments
    ///
    /// * `container` - Container to upload into, or `None` to use the default
    /// * `frame` - The frame to encode
    /// * `blob_name` - Name for the CSV blob (should end with .csv)
    /// * `overwrite` - Whether to replace an existing blob of the same name
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(String)` - A confirmation message
    /// * `Err(StoreError)` - If encoding fails or the upload conflicts
    pub async fn df_to_csv(
        &self,
        container: Option<&str>,
        frame: &RecordBatch,
        blob_name: &str,
        overwrite: bool,
    ) -> StoreResult<String> {
        let data = tabular::csv::frame_to_csv(frame)?;
        self.upload_blob(container, blob_name, data, overwrite).await
    }

    /// Encode a frame as Parquet and upload it as a blob.
    ///
    /// # Arguments
    ///
    /// * `container` - Container to upload into, or `None` to use the default
    /// * `frame` - The frame to encode
    /// * `blob_name` - Name for the Parquet blob (should end with .parquet)
    /// * `overwrite` - Whether to replace an existing blob of the same name
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(String)` - A confirmation message
    /// * `Err(StoreError)` - If encoding fails or the upload conflicts
    pub async fn df_to_parquet(
        &self,
        container: Option<&str>,
        frame: &RecordBatch,
        blob_name: &str,
        overwrite: bool,
    ) -> StoreResult<String> {
        let data = tabular::parquet::frame_to_parquet(frame)?;
        self.upload_blob(container, blob_name, data, overwrite).await
    }

    /// Encode a frame as an Excel workbook and upload it as a blob.
    ///
    /// # Arguments
    ///
    /// * `container` - Container to upload into, or `None` to use the default
    /// * `frame` - The frame to encode
    /// * `blob_name` - Name for the Excel blob (should end with .xlsx)
    /// * `overwrite` - Whether to replace an existing blob of the same name
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(String)` - A confirmation message
    /// * `Err(StoreError)` - If encoding fails or the upload conflicts
    pub async fn df_to_excel(
        &self,
        container: Option<&str>,
        frame: &RecordBatch,
        blob_name: &str,
        overwrite: bool,
    ) -> StoreResult<String> {
        let data = tabular::excel::frame_to_excel(frame)?;
        self.upload_blob(container, blob_name, data, overwrite).await
    }

    /// Resolve the container for a per-call operation: the explicit argument
    /// wins, else the configured default, else a configuration error.
    fn resolve_container(&self, container: Option<&str>) -> StoreResult<String> {
        let name = match container {
            Some(name) => name.to_string(),
            None => self.default_container.clone().ok_or_else(|| {
                StoreError::Config(
                    "No container specified: pass one explicitly or configure a default container"
                        .to_string(),
                )
            })?,
        };
        validate_container_name(&name)?;
        Ok(name)
    }
}

impl Debug for BlobStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BlobStore(type={}, default_container={:?})",
            self.config.storage_type_str(),
            self.default_container
        )
    }
}

fn validate_container_name(name: &str) -> StoreResult<()> {
    if name.is_empty() || name.contains('/') {
        return Err(StoreError::Config(format!(
            "Invalid container name '{}': must be non-empty and must not contain '/'",
            name
        )));
    }
    Ok(())
}

fn blob_path(container: &str, blob_name: &str) -> StoreResult<ObjectPath> {
    if blob_name.is_empty() {
        return Err(StoreError::Config(
            "Blob name must not be empty".to_string(),
        ));
    }
    Ok(ObjectPath::from(format!("{}/{}", container, blob_name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use tempfile::TempDir;

    async fn memory_store() -> BlobStore {
        BlobStore::connect(StoreConfig::memory().with_default_container("data"))
            .await
            .unwrap()
    }

    fn sample_frame() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, true),
            Field::new("score", DataType::Float64, true),
            Field::new("name", DataType::Utf8, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![1, 2])),
                Arc::new(Float64Array::from(vec![0.5, 1.5])),
                Arc::new(StringArray::from(vec!["alpha", "beta"])),
            ],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_connect_memory() {
        let store = memory_store().await;
        assert_eq!(store.default_container(), Some("data"));
        assert_eq!(store.config().storage_type_str(), "memory");
    }

    #[tokio::test]
    async fn test_validate_connection() {
        let store = memory_store().await;
        assert!(store.validate_connection().await.is_ok());
    }

    #[tokio::test]
    async fn test_connect_invalid_default_container() {
        let result =
            BlobStore::connect(StoreConfig::memory().with_default_container("bad/name")).await;

        match result {
            Err(StoreError::Config(msg)) => assert!(msg.contains("Invalid container name")),
            _ => panic!("Expected Config error for invalid default container"),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_containers() {
        let store = memory_store().await;

        store.create_container("raw-data").await.unwrap();
        store.create_container("archive").await.unwrap();

        let containers = store.list_containers().await.unwrap();
        assert_eq!(containers, vec!["archive", "raw-data"]);
    }

    #[tokio::test]
    async fn test_list_containers_empty() {
        let store = memory_store().await;
        assert!(store.list_containers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_container_conflict() {
        let store = memory_store().await;
        store.create_container("raw-data").await.unwrap();

        match store.create_container("raw-data").await {
            Err(StoreError::Conflict { path }) => assert_eq!(path, "raw-data"),
            _ => panic!("Expected Conflict for duplicate container"),
        }
    }

    #[tokio::test]
    async fn test_create_container_invalid_name() {
        let store = memory_store().await;

        match store.create_container("bad/name").await {
            Err(StoreError::Config(_)) => (),
            _ => panic!("Expected Config error for invalid name"),
        }
    }

    #[tokio::test]
    async fn test_delete_container_not_found() {
        let store = memory_store().await;

        match store.delete_container("missing").await {
            Err(StoreError::NotFound { path }) => assert_eq!(path, "missing"),
            _ => panic!("Expected NotFound for missing container"),
        }
    }

    #[tokio::test]
    async fn test_delete_container_removes_contents() {
        let store = memory_store().await;
        store.create_container("raw-data").await.unwrap();
        store
            .upload_blob(Some("raw-data"), "a.bin", vec![1u8, 2, 3], true)
            .await
            .unwrap();

        let message = store.delete_container("raw-data").await.unwrap();
        assert!(message.contains("deleted successfully"));
        assert!(store.list_containers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_download_round_trip() {
        let store = memory_store().await;
        let payload = vec![0u8, 1, 2, 3, 250, 251, 252];

        store
            .upload_blob(None, "bytes.bin", payload.clone(), true)
            .await
            .unwrap();
        let downloaded = store.download_blob(None, "bytes.bin").await.unwrap();

        assert_eq!(downloaded.as_ref(), payload.as_slice());
    }

    #[tokio::test]
    async fn test_upload_no_overwrite_conflict_preserves_original() {
        let store = memory_store().await;

        store
            .upload_blob(None, "once.bin", b"first".to_vec(), false)
            .await
            .unwrap();
        let result = store
            .upload_blob(None, "once.bin", b"second".to_vec(), false)
            .await;

        match result {
            Err(StoreError::Conflict { .. }) => (),
            _ => panic!("Expected Conflict for disallowed overwrite"),
        }

        let stored = store.download_blob(None, "once.bin").await.unwrap();
        assert_eq!(stored.as_ref(), b"first");
    }

    #[tokio::test]
    async fn test_upload_overwrite_replaces() {
        let store = memory_store().await;

        store
            .upload_blob(None, "twice.bin", b"first".to_vec(), true)
            .await
            .unwrap();
        store
            .upload_blob(None, "twice.bin", b"second".to_vec(), true)
            .await
            .unwrap();

        let stored = store.download_blob(None, "twice.bin").await.unwrap();
        assert_eq!(stored.as_ref(), b"second");
    }

    #[tokio::test]
    async fn test_download_missing_not_found() {
        let store = memory_store().await;

        match store.download_blob(None, "missing.bin").await {
            Err(StoreError::NotFound { .. }) => (),
            _ => panic!("Expected NotFound for missing blob"),
        }
    }

    #[tokio::test]
    async fn test_delete_blob_missing_not_found() {
        let store = memory_store().await;

        match store.delete_blob(None, "missing.bin").await {
            Err(StoreError::NotFound { .. }) => (),
            _ => panic!("Expected NotFound for missing blob"),
        }
    }

    #[tokio::test]
    async fn test_blob_list_empty() {
        let store = memory_store().await;
        assert!(store.blob_list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blob_list_sorted_and_excludes_marker() {
        let store = memory_store().await;
        store.create_container("data").await.unwrap();
        store
            .upload_blob(None, "b.bin", b"b".to_vec(), true)
            .await
            .unwrap();
        store
            .upload_blob(None, "a.bin", b"a".to_vec(), true)
            .await
            .unwrap();

        let names = store.blob_list(None).await.unwrap();
        assert_eq!(names, vec!["a.bin", "b.bin"]);
    }

    #[tokio::test]
    async fn test_explicit_container_overrides_default() {
        let store = memory_store().await;
        store
            .upload_blob(Some("other"), "x.bin", b"x".to_vec(), true)
            .await
            .unwrap();

        assert!(store.blob_list(None).await.unwrap().is_empty());
        assert_eq!(
            store.blob_list(Some("other")).await.unwrap(),
            vec!["x.bin"]
        );
    }

    #[tokio::test]
    async fn test_no_container_specified() {
        let store = BlobStore::connect(StoreConfig::memory()).await.unwrap();

        match store.blob_list(None).await {
            Err(StoreError::Config(msg)) => assert!(msg.contains("No container specified")),
            _ => panic!("Expected Config error when no container is resolvable"),
        }
    }

    #[tokio::test]
    async fn test_empty_blob_name_rejected() {
        let store = memory_store().await;

        match store.download_blob(None, "").await {
            Err(StoreError::Config(msg)) => assert!(msg.contains("Blob name")),
            _ => panic!("Expected Config error for empty blob name"),
        }
    }

    #[tokio::test]
    async fn test_blob_exists() {
        let store = memory_store().await;
        store
            .upload_blob(None, "here.bin", b"x".to_vec(), true)
            .await
            .unwrap();

        assert!(store.blob_exists(None, "here.bin").await.unwrap());
        assert!(!store.blob_exists(None, "gone.bin").await.unwrap());
    }

    #[tokio::test]
    async fn test_blob_metadata() {
        let store = memory_store().await;
        store
            .upload_blob(None, "sized.bin", vec![0u8; 64], true)
            .await
            .unwrap();

        let meta = store.blob_metadata(None, "sized.bin").await.unwrap();
        assert_eq!(meta.name, "sized.bin");
        assert_eq!(meta.size, 64);
        assert!(meta.last_modified.is_some());
    }

    #[tokio::test]
    async fn test_csv_round_trip() {
        let store = memory_store().await;
        let frame = sample_frame();

        store
            .df_to_csv(None, &frame, "table.csv", true)
            .await
            .unwrap();
        let decoded = store.csv_to_df(None, "table.csv").await.unwrap();

        assert_eq!(decoded, frame);
    }

    #[tokio::test]
    async fn test_parquet_round_trip() {
        let store = memory_store().await;
        let frame = sample_frame();

        store
            .df_to_parquet(None, &frame, "table.parquet", true)
            .await
            .unwrap();
        let decoded = store.parquet_to_df(None, "table.parquet").await.unwrap();

        assert_eq!(decoded, frame);
    }

    #[tokio::test]
    async fn test_df_to_excel_uploads_workbook() {
        let store = memory_store().await;
        let frame = sample_frame();

        store
            .df_to_excel(None, &frame, "table.xlsx", true)
            .await
            .unwrap();
        let stored = store.download_blob(None, "table.xlsx").await.unwrap();

        // xlsx is a zip archive
        assert_eq!(&stored[..2], b"PK");
    }

    #[tokio::test]
    async fn test_csv_to_df_invalid_bytes() {
        let store = memory_store().await;
        store
            .upload_blob(None, "bad.csv", vec![0xff, 0xfe, 0x01], true)
            .await
            .unwrap();

        match store.csv_to_df(None, "bad.csv").await {
            Err(StoreError::Format(_)) => (),
            _ => panic!("Expected Format error for invalid CSV bytes"),
        }
    }

    #[tokio::test]
    async fn test_parquet_to_df_invalid_bytes() {
        let store = memory_store().await;
        store
            .upload_blob(None, "bad.parquet", b"not parquet".to_vec(), true)
            .await
            .unwrap();

        match store.parquet_to_df(None, "bad.parquet").await {
            Err(StoreError::Format(_)) => (),
            _ => panic!("Expected Format error for invalid Parquet bytes"),
        }
    }

    #[tokio::test]
    async fn test_df_to_format_no_overwrite_conflict() {
        let store = memory_store().await;
        let frame = sample_frame();

        store
            .df_to_csv(None, &frame, "table.csv", false)
            .await
            .unwrap();
        match store.df_to_csv(None, &frame, "table.csv", false).await {
            Err(StoreError::Conflict { .. }) => (),
            _ => panic!("Expected Conflict for disallowed overwrite"),
        }
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let store = memory_store().await;

        store.create_container("raw-data").await.unwrap();

        let csv = b"event,count\nlogin,3\nlogout,1\n".to_vec();
        store
            .upload_blob(Some("raw-data"), "events.csv", csv, true)
            .await
            .unwrap();

        let frame = store.csv_to_df(Some("raw-data"), "events.csv").await.unwrap();
        assert_eq!(frame.num_rows(), 2);
        let schema = frame.schema();
        let columns: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(columns, vec!["event", "count"]);

        let names = store.blob_list(Some("raw-data")).await.unwrap();
        assert!(names.contains(&"events.csv".to_string()));

        store.delete_blob(Some("raw-data"), "events.csv").await.unwrap();

        match store.download_blob(Some("raw-data"), "events.csv").await {
            Err(StoreError::NotFound { .. }) => (),
            _ => panic!("Expected NotFound after deletion"),
        }
    }

    #[tokio::test]
    async fn test_local_backend_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::local()
            .with_option("path", temp_dir.path().to_str().unwrap())
            .with_default_container("data");
        let store = BlobStore::connect(config).await.unwrap();

        store.create_container("data").await.unwrap();
        store
            .upload_blob(None, "nested/file.bin", b"local".to_vec(), true)
            .await
            .unwrap();

        let downloaded = store.download_blob(None, "nested/file.bin").await.unwrap();
        assert_eq!(downloaded.as_ref(), b"local");

        let names = store.blob_list(None).await.unwrap();
        assert_eq!(names, vec!["nested/file.bin"]);

        let containers = store.list_containers().await.unwrap();
        assert_eq!(containers, vec!["data"]);
    }
}
