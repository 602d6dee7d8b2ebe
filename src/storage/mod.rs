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

//! Cloud storage facade
//!
//! This module provides a uniform, error-normalized interface over different
//! storage backends (Azure Blob Storage, AWS S3, GCS, local filesystem,
//! in-memory).
//!
//! The implementation uses the `object_store` crate's built-in configuration
//! system: one client handle is built from a [`StoreConfig`] at construction
//! time and reused by every operation.

pub mod config;
pub mod error;
pub mod store;

mod builder;

// Public exports
pub use config::{StorageType, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use store::{BlobMetadata, BlobStore};
