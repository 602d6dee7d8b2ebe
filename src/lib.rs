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

//! # Blob Bridge
//!
//! A Rust library providing a typed, error-normalized facade over cloud object
//! storage with container/blob CRUD operations and conversions between stored
//! tabular files (CSV, Parquet, Excel) and in-memory Arrow frames.
//!
//! Blob Bridge delegates all storage I/O to the `object_store` crate, so the
//! same operations work against Azure Blob Storage, AWS S3, Google Cloud
//! Storage, local directories, and an in-memory backend for tests. Tabular
//! (de)serialization is delegated to the `arrow`, `parquet`, and
//! `rust_xlsxwriter` crates.
//!
//! ## Features
//!
//! - **Container operations**: create, delete, list
//! - **Blob operations**: upload (with overwrite control), download, delete,
//!   list, existence check, metadata
//! - **Tabular conversions**: `csv_to_df` / `parquet_to_df` and `df_to_csv` /
//!   `df_to_parquet` / `df_to_excel`, with Arrow `RecordBatch` as the frame type
//! - **Normalized errors**: configuration, connection, not-found, conflict,
//!   and format failures surface as one [`StoreError`] taxonomy
//!
//! ## Quick Start
//!
//! ### In-memory example
//!
//! ```rust,no_run
//! use blob_bridge::{BlobStore, StoreConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = StoreConfig::memory().with_default_container("raw-data");
//! let store = BlobStore::connect(config).await?;
//!
//! store.create_container("raw-data").await?;
//! store
//!     .upload_blob(None, "events.csv", b"event,count\nlogin,3\n".to_vec(), true)
//!     .await?;
//!
//! let frame = store.csv_to_df(None, "events.csv").await?;
//! println!("{} rows", frame.num_rows());
//! # Ok(())
//! # }
//! ```
//!
//! ### Azure Blob Storage example
//!
//! ```rust,no_run
//! use blob_bridge::{BlobStore, StoreConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! // The connection string may also come from AZURE_STORAGE_CONNECTION_STRING,
//! // and the default container from BLOB_BRIDGE_CONTAINER.
//! let config = StoreConfig::azure()
//!     .with_option("container", "my-container")
//!     .with_option("connection_string", "AccountName=...;AccountKey=...")
//!     .with_default_container("raw-data");
//!
//! let store = BlobStore::connect(config).await?;
//! let blobs = store.blob_list(None).await?;
//! println!("{:?}", blobs);
//! # Ok(())
//! # }
//! ```
//!
//! ### Local filesystem example
//!
//! ```rust,no_run
//! use blob_bridge::{BlobStore, StoreConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = StoreConfig::local()
//!     .with_option("path", "./data")
//!     .with_default_container("raw-data");
//!
//! let store = BlobStore::connect(config).await?;
//! let bytes = store.download_blob(None, "events.parquet").await?;
//! println!("{} bytes", bytes.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`storage`] - Storage facade: configuration, errors, and the [`BlobStore`]
//! - [`tabular`] - CSV/Parquet/Excel codecs for Arrow frames

pub mod storage;
pub mod tabular;

// Re-export commonly used types
pub use storage::{BlobMetadata, BlobStore, StorageType, StoreConfig, StoreError, StoreResult};
