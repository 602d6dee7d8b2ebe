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

use crate::storage::error::{StoreError, StoreResult};
use arrow::compute::concat_batches;
use arrow::csv::reader::Format;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::record_batch::RecordBatch;
use std::io::Cursor;
use std::sync::Arc;

/// Decode CSV bytes (with a header row) into a single frame.
///
/// The schema is inferred from the data; column types follow Arrow's CSV
/// inference, so text data coerces numeric-looking columns to numeric types.
pub fn frame_from_csv(data: &[u8]) -> StoreResult<RecordBatch> {
    let csv_format = Format::default().with_header(true);
    let (schema, _) = csv_format
        .infer_schema(Cursor::new(data), None)
        .map_err(|e| StoreError::Format(format!("Failed to parse CSV: {}", e)))?;
    let schema = Arc::new(schema);

    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .build(Cursor::new(data))
        .map_err(|e| StoreError::Format(format!("Failed to parse CSV: {}", e)))?;

    let batches = reader
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StoreError::Format(format!("Failed to parse CSV: {}", e)))?;

    Ok(concat_batches(&schema, &batches)?)
}

/// Encode a frame as CSV bytes with a header row.
pub fn frame_to_csv(frame: &RecordBatch) -> StoreResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut writer = WriterBuilder::new().with_header(true).build(&mut buffer);
    writer.write(frame)?;
    drop(writer);
    Ok(buffer)
}
