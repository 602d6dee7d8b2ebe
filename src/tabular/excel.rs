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

use crate::storage::error::StoreResult;
use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use rust_xlsxwriter::Workbook;

/// Encode a frame as an Excel workbook in memory.
///
/// Row 0 holds the column names; numeric columns are written as numbers
/// (normalized to f64), booleans as booleans, strings as strings, and any
/// other type through Arrow's display formatting. Null cells are left blank.
pub fn frame_to_excel(frame: &RecordBatch) -> StoreResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let schema = frame.schema();
    for (col, field) in schema.fields().iter().enumerate() {
        worksheet.write_string(0, col as u16, field.name())?;
    }

    for (col, column) in frame.columns().iter().enumerate() {
        let col = col as u16;
        match column.data_type() {
            data_type if data_type.is_numeric() => {
                let values = cast(column, &DataType::Float64)?;
                let values = values.as_primitive::<Float64Type>();
                for row in 0..values.len() {
                    if values.is_valid(row) {
                        worksheet.write_number(row as u32 + 1, col, values.value(row))?;
                    }
                }
            }
            DataType::Boolean => {
                let values = column.as_boolean();
                for row in 0..values.len() {
                    if values.is_valid(row) {
                        worksheet.write_boolean(row as u32 + 1, col, values.value(row))?;
                    }
                }
            }
            DataType::Utf8 => {
                let values = column.as_string::<i32>();
                for row in 0..values.len() {
                    if values.is_valid(row) {
                        worksheet.write_string(row as u32 + 1, col, values.value(row))?;
                    }
                }
            }
            _ => {
                for row in 0..column.len() {
                    if column.is_valid(row) {
                        let text = array_value_to_string(column, row)?;
                        worksheet.write_string(row as u32 + 1, col, &text)?;
                    }
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{BooleanArray, Date32Array, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use std::sync::Arc;

    #[test]
    fn test_encode_produces_workbook() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, true),
            Field::new("score", DataType::Float64, true),
            Field::new("name", DataType::Utf8, true),
            Field::new("active", DataType::Boolean, true),
        ]));
        let frame = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![Some(1), None])),
                Arc::new(Float64Array::from(vec![0.5, 1.5])),
                Arc::new(StringArray::from(vec!["alpha", "beta"])),
                Arc::new(BooleanArray::from(vec![true, false])),
            ],
        )
        .unwrap();

        let encoded = frame_to_excel(&frame).unwrap();

        // xlsx is a zip archive
        assert_eq!(&encoded[..2], b"PK");
        assert!(encoded.len() > 100);
    }

    #[test]
    fn test_encode_empty_frame() {
        let schema = Arc::new(Schema::new(vec![Field::new("id", DataType::Int64, true)]));
        let frame = RecordBatch::new_empty(schema);

        let encoded = frame_to_excel(&frame).unwrap();
        assert_eq!(&encoded[..2], b"PK");
    }

    #[test]
    fn test_encode_display_fallback_types() {
        let schema = Arc::new(Schema::new(vec![Field::new(
            "day",
            DataType::Date32,
            true,
        )]));
        let frame = RecordBatch::try_new(
            schema,
            vec![Arc::new(Date32Array::from(vec![Some(19_000), None]))],
        )
        .unwrap();

        let encoded = frame_to_excel(&frame).unwrap();
        assert_eq!(&encoded[..2], b"PK");
    }
}
