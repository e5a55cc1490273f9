// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for report export and parsing.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// An error raised while writing a report to disk.
///
/// The recorder's sample buffer is never touched by a failed export, so the
/// same export can be retried.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The destination could not be created or written.
    #[error("Failed to write report '{path}': {source}")]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// An error raised while reading back a CSV report.
#[derive(Error, Debug)]
pub enum CsvParseError {
    /// The source could not be read.
    #[error("Failed to read CSV: {0}")]
    Io(#[from] io::Error),
    /// The input was empty.
    #[error("CSV input is empty, expected a header line")]
    MissingHeader,
    /// The first line is not the expected header.
    #[error("Unexpected CSV header '{found}'")]
    InvalidHeader {
        /// The header line that was found.
        found: String,
    },
    /// A data row could not be parsed.
    #[error("Invalid CSV row at line {line}: {reason}")]
    InvalidRow {
        /// 1-based line number in the input.
        line: usize,
        /// What went wrong.
        reason: String,
    },
}
