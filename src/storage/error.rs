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

use thiserror::Error;

/// Errors that can occur during storage and conversion operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required credential or option was missing at construction time, or no
    /// container could be resolved for a per-call operation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The client handle could not be built from the given credentials, or the
    /// connection could not be validated.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The referenced container or blob does not exist.
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// The target already exists and overwriting was disallowed.
    #[error("Already exists: {path}")]
    Conflict { path: String },

    /// Bytes could not be decoded as the requested tabular format, or a frame
    /// could not be encoded into it.
    #[error("Format error: {0}")]
    Format(String),

    /// Any other failure reported by the underlying object store.
    #[error("Storage error: {0}")]
    Storage(#[source] object_store::Error),
}

/// Result type for storage and conversion operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Mapping table from underlying failure categories to normalized error kinds,
/// applied uniformly at every call site.
impl From<object_store::Error> for StoreError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { path, .. } => StoreError::NotFound { path },
            object_store::Error::AlreadyExists { path, .. } => StoreError::Conflict { path },
            other => StoreError::Storage(other),
        }
    }
}

impl From<arrow::error::ArrowError> for StoreError {
    fn from(err: arrow::error::ArrowError) -> Self {
        StoreError::Format(err.to_string())
    }
}

impl From<parquet::errors::ParquetError> for StoreError {
    fn from(err: parquet::errors::ParquetError) -> Self {
        StoreError::Format(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for StoreError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        StoreError::Format(err.to_string())
    }
}
