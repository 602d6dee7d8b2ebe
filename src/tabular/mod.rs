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

//! Tabular format codecs
//!
//! In-memory conversions between Arrow [`RecordBatch`] frames and CSV,
//! Parquet, and Excel bytes. These are pure functions; the
//! [`BlobStore`](crate::BlobStore) conversion methods compose them with blob
//! download/upload.
//!
//! [`RecordBatch`]: arrow::record_batch::RecordBatch

pub mod csv;
pub mod excel;
pub mod parquet;

pub use csv::{frame_from_csv, frame_to_csv};
pub use excel::frame_to_excel;
pub use parquet::{frame_from_parquet, frame_to_parquet};
