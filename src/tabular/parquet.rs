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
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use std::sync::Arc;

/// Decode Parquet bytes into a single frame.
///
/// All row groups are read into memory and concatenated, so this is intended
/// for tabular files, not large datasets.
pub fn frame_from_parquet(data: Bytes) -> StoreResult<RecordBatch> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(data)
        .map_err(|e| StoreError::Format(format!("Failed to parse Parquet: {}", e)))?;
    let schema = Arc::clone(builder.schema());

    let reader = builder
        .build()
        .map_err(|e| StoreError::Format(format!("Failed to parse Parquet: {}", e)))?;

    let batches = reader
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StoreError::Format(format!("Failed to parse Parquet: {}", e)))?;

    Ok(concat_batches(&schema, &batches)?)
}

/// Encode a frame as Parquet bytes in memory.
pub fn frame_to_parquet(frame: &RecordBatch) -> StoreResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let props = WriterProperties::builder().build();

    let mut writer = ArrowWriter::try_new(&mut buffer, frame.schema(), Some(props))?;
    writer.write(frame)?;
    writer.close()?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, BooleanArray, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};

    fn sample_frame() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, true),
            Field::new("name", DataType::Utf8, true),
            Field::new("active", DataType::Boolean, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![Some(1), None, Some(3)])),
                Arc::new(StringArray::from(vec![Some("alpha"), Some("beta"), None])),
                Arc::new(BooleanArray::from(vec![true, false, true])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let frame = sample_frame();
        let encoded = frame_to_parquet(&frame).unwrap();
        let decoded = frame_from_parquet(Bytes::from(encoded)).unwrap();

        assert_eq!(decoded, frame);
    }

    #[test]
    fn test_round_trip_preserves_nulls() {
        let frame = sample_frame();
        let encoded = frame_to_parquet(&frame).unwrap();
        let decoded = frame_from_parquet(Bytes::from(encoded)).unwrap();

        assert_eq!(decoded.column(0).null_count(), 1);
        assert_eq!(decoded.column(1).null_count(), 1);
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = frame_from_parquet(Bytes::from_static(b"not a parquet file"));

        match result {
            Err(StoreError::Format(msg)) => assert!(msg.contains("Failed to parse Parquet")),
            _ => panic!("Expected Format error"),
        }
    }

    #[test]
    fn test_encode_empty_frame() {
        let schema = Arc::new(Schema::new(vec![Field::new("id", DataType::Int64, true)]));
        let frame = RecordBatch::new_empty(schema);

        let encoded = frame_to_parquet(&frame).unwrap();
        let decoded = frame_from_parquet(Bytes::from(encoded)).unwrap();

        assert_eq!(decoded.num_rows(), 0);
        assert_eq!(decoded.num_columns(), 1);
    }
}
