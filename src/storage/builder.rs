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

use super::config::{resolve_setting, StorageType, StoreConfig, ENV_CONNECTION_STRING};
use super::error::{StoreError, StoreResult};
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::ObjectStore;
use std::path::PathBuf;
use tracing::warn;

/// Build the object store client handle for the configured backend.
///
/// Missing required credentials or options are reported as `Config` errors
/// before any client is constructed; a builder failure for a present
/// credential is reported as a `Connection` error.
pub(crate) fn build_store(config: &StoreConfig) -> StoreResult<Box<dyn ObjectStore>> {
    match config.storage_type {
        StorageType::Memory => Ok(Box::new(InMemory::new())),
        StorageType::Local => build_local_store(config),
        StorageType::Aws => build_aws_store(config),
        StorageType::Azure => build_azure_store(config),
        StorageType::Gcs => build_gcs_store(config),
    }
}

/// Build a local filesystem store.
///
/// # Errors
///
/// This function will return an error if:
/// * The 'path' option is missing from configuration
/// * The path cannot be canonicalized (doesn't exist or permission denied)
/// * The path is not a directory
fn build_local_store(config: &StoreConfig) -> StoreResult<Box<dyn ObjectStore>> {
    let path = config.get_option("path").ok_or_else(|| {
        StoreError::Config("Local storage requires 'path' option".to_string())
    })?;
    let base_path = PathBuf::from(path);

    // Canonicalize the path (handles both relative and absolute paths, resolves symlinks)
    let canonical_path = base_path.canonicalize().map_err(|e| {
        StoreError::Config(format!(
            "Failed to resolve path '{}': {} (path must exist)",
            path, e
        ))
    })?;

    if !canonical_path.is_dir() {
        return Err(StoreError::Config(format!(
            "Base path is not a directory: {}",
            canonical_path.display()
        )));
    }

    let store = LocalFileSystem::new_with_prefix(&canonical_path).map_err(|e| {
        StoreError::Connection(format!("Failed to create local store: {}", e))
    })?;

    Ok(Box::new(store))
}

/// Build an AWS S3 store.
///
/// # Errors
///
/// This function will return an error if:
/// * The 'bucket' option is missing from configuration
/// * The S3 client cannot be constructed from the given options
fn build_aws_store(config: &StoreConfig) -> StoreResult<Box<dyn ObjectStore>> {
    config.get_option("bucket").ok_or_else(|| {
        StoreError::Config("AWS S3 requires 'bucket' option".to_string())
    })?;

    let mut builder = AmazonS3Builder::new();

    for (key, value) in &config.options {
        match key.as_str() {
            "bucket" => builder = builder.with_bucket_name(value),
            "region" => builder = builder.with_region(value),
            "access_key_id" => builder = builder.with_access_key_id(value),
            "secret_access_key" => builder = builder.with_secret_access_key(value),
            "session_token" | "token" => builder = builder.with_token(value),
            "endpoint" => builder = builder.with_endpoint(value),
            "allow_http" => {
                if value.to_lowercase() == "true" {
                    builder = builder.with_allow_http(true);
                }
            }
            _ => {
                warn!("Unknown AWS S3 option: {}", key);
            }
        }
    }

    let store = builder
        .build()
        .map_err(|e| StoreError::Connection(format!("Failed to create S3 client: {}", e)))?;

    Ok(Box::new(store))
}

/// Build an Azure Blob Storage store.
///
/// The connection credential is resolved argument-first: an explicit
/// 'connection_string' option wins, then the AZURE_STORAGE_CONNECTION_STRING
/// environment variable, then explicit 'account_name' plus key/SAS/service
/// principal options.
///
/// # Errors
///
/// This function will return an error if:
/// * No connection credential is resolvable from options or environment
/// * The 'container' option is missing from configuration
/// * The Azure client cannot be constructed from the given credentials
fn build_azure_store(config: &StoreConfig) -> StoreResult<Box<dyn ObjectStore>> {
    let connection_string = resolve_setting(
        config.get_option("connection_string").cloned(),
        ENV_CONNECTION_STRING,
    );

    if connection_string.is_none() && config.get_option("account_name").is_none() {
        return Err(StoreError::Config(format!(
            "Missing Azure credential: provide a 'connection_string' or 'account_name' \
             option, or set {}",
            ENV_CONNECTION_STRING
        )));
    }

    config.get_option("container").ok_or_else(|| {
        StoreError::Config("Azure requires 'container' option".to_string())
    })?;

    let mut builder = MicrosoftAzureBuilder::new();

    if let Some(connection_string) = &connection_string {
        for (key, value) in parse_connection_string(connection_string) {
            match key.as_str() {
                "AccountName" => builder = builder.with_account(&value),
                "AccountKey" => builder = builder.with_access_key(&value),
                "BlobEndpoint" => builder = builder.with_endpoint(value),
                "UseDevelopmentStorage" => {
                    if value.to_lowercase() == "true" {
                        builder = builder.with_use_emulator(true);
                    }
                }
                // DefaultEndpointsProtocol and EndpointSuffix are covered by the
                // builder's endpoint defaults
                _ => (),
            }
        }
    }

    for (key, value) in &config.options {
        match key.as_str() {
            "connection_string" => (),
            "container" => builder = builder.with_container_name(value),
            "account_name" => builder = builder.with_account(value),
            "access_key" | "account_key" => builder = builder.with_access_key(value),
            "sas_token" => {
                // Parse SAS token query parameters
                let pairs: Vec<(String, String)> = value
                    .trim_start_matches('?')
                    .split('&')
                    .filter_map(|pair| {
                        let mut parts = pair.split('=');
                        match (parts.next(), parts.next()) {
                            (Some(k), Some(v)) => Some((k.to_string(), v.to_string())),
                            _ => None,
                        }
                    })
                    .collect();
                builder = builder.with_sas_authorization(pairs);
            }
            "tenant_id" => builder = builder.with_tenant_id(value),
            "client_id" => builder = builder.with_client_id(value),
            "client_secret" => builder = builder.with_client_secret(value),
            "endpoint" => builder = builder.with_endpoint(value.clone()),
            _ => {
                warn!("Unknown Azure option: {}", key);
            }
        }
    }

    let store = builder
        .build()
        .map_err(|e| StoreError::Connection(format!("Failed to create Azure client: {}", e)))?;

    Ok(Box::new(store))
}

/// Build a GCS store.
///
/// # Errors
///
/// This function will return an error if:
/// * The 'bucket' option is missing from configuration
/// * The GCS client cannot be constructed from the given options
fn build_gcs_store(config: &StoreConfig) -> StoreResult<Box<dyn ObjectStore>> {
    config.get_option("bucket").ok_or_else(|| {
        StoreError::Config("GCS requires 'bucket' option".to_string())
    })?;

    let mut builder = GoogleCloudStorageBuilder::new();

    for (key, value) in &config.options {
        match key.as_str() {
            "bucket" => builder = builder.with_bucket_name(value),
            "service_account_key_path" => builder = builder.with_service_account_path(value),
            "service_account_key" => builder = builder.with_service_account_key(value),
            _ => {
                warn!("Unknown GCS option: {}", key);
            }
        }
    }

    let store = builder
        .build()
        .map_err(|e| StoreError::Connection(format!("Failed to create GCS client: {}", e)))?;

    Ok(Box::new(store))
}

/// Split an Azure connection string of `Key=Value;...` pairs.
///
/// Values may themselves contain '=' (base64 account keys), so each segment is
/// split on the first '=' only.
fn parse_connection_string(value: &str) -> Vec<(String, String)> {
    value
        .split(';')
        .filter(|segment| !segment.trim().is_empty())
        .filter_map(|segment| {
            let mut parts = segment.splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(k), Some(v)) => Some((k.trim().to_string(), v.trim().to_string())),
                _ => None,
            }
        })
        .collect()
}
