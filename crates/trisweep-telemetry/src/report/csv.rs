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

//! CSV sample export and the matching reader.

use crate::error::CsvParseError;
use crate::sample::Sample;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;

/// The exact header line of every CSV export.
pub const CSV_HEADER: &str =
    "Timestamp,FPS,CPU_Usage,GPU_Usage,Triangle_Count,Has_Lighting,Has_Textures";

const COLUMN_COUNT: usize = 7;

/// Writes the header followed by one row per sample, in order.
///
/// Floating point fields use the shortest representation that round-trips.
pub fn write_csv<W: Write>(mut writer: W, samples: &[Sample]) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for s in samples {
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            s.timestamp_seconds,
            s.fps,
            s.cpu_usage_percent,
            s.gpu_usage_percent,
            s.triangle_count,
            s.lighting_enabled,
            s.texturing_enabled
        )?;
    }
    writer.flush()
}

/// Parses a CSV export back into samples.
///
/// Blank lines are ignored. The header must match [`CSV_HEADER`].
pub fn read_csv<R: BufRead>(reader: R) -> Result<Vec<Sample>, CsvParseError> {
    let mut lines = reader.lines();
    let header = lines.next().ok_or(CsvParseError::MissingHeader)??;
    let header = header.trim_end_matches('\r');
    if header != CSV_HEADER {
        return Err(CsvParseError::InvalidHeader {
            found: header.to_string(),
        });
    }

    let mut samples = Vec::new();
    for (index, line) in lines.enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        // Header is line 1.
        samples.push(parse_row(line, index + 2)?);
    }
    Ok(samples)
}

/// Opens `path` and parses it with [`read_csv`].
pub fn read_csv_file(path: impl AsRef<Path>) -> Result<Vec<Sample>, CsvParseError> {
    let file = File::open(path.as_ref())?;
    read_csv(BufReader::new(file))
}

fn parse_row(line: &str, line_number: usize) -> Result<Sample, CsvParseError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != COLUMN_COUNT {
        return Err(CsvParseError::InvalidRow {
            line: line_number,
            reason: format!("expected {COLUMN_COUNT} fields, found {}", fields.len()),
        });
    }

    Ok(Sample {
        timestamp_seconds: parse_field(fields[0], "Timestamp", line_number)?,
        fps: parse_field(fields[1], "FPS", line_number)?,
        cpu_usage_percent: parse_field(fields[2], "CPU_Usage", line_number)?,
        gpu_usage_percent: parse_field(fields[3], "GPU_Usage", line_number)?,
        triangle_count: parse_field(fields[4], "Triangle_Count", line_number)?,
        lighting_enabled: parse_bool(fields[5], "Has_Lighting", line_number)?,
        texturing_enabled: parse_bool(fields[6], "Has_Textures", line_number)?,
    })
}

fn parse_field<T: FromStr>(value: &str, column: &str, line: usize) -> Result<T, CsvParseError> {
    value.parse().map_err(|_| CsvParseError::InvalidRow {
        line,
        reason: format!("invalid {column} value '{value}'"),
    })
}

fn parse_bool(value: &str, column: &str, line: usize) -> Result<bool, CsvParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(CsvParseError::InvalidRow {
            line,
            reason: format!("{column} must be 'true' or 'false', found '{value}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(timestamp: f64, triangles: usize) -> Sample {
        Sample {
            timestamp_seconds: timestamp,
            fps: 59.94,
            cpu_usage_percent: 12.5,
            gpu_usage_percent: 0.0,
            triangle_count: triangles,
            lighting_enabled: true,
            texturing_enabled: false,
        }
    }

    #[test]
    fn empty_buffer_writes_header_only() {
        let mut out = Vec::new();
        write_csv(&mut out, &[]).expect("in-memory write");
        assert_eq!(String::from_utf8(out).expect("utf8"), format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn rows_follow_insertion_order() {
        let samples = [sample(1.0, 1), sample(2.0, 26), sample(3.0, 51)];
        let mut out = Vec::new();
        write_csv(&mut out, &samples).expect("in-memory write");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "1,59.94,12.5,0,1,true,false");
        assert!(lines[2].starts_with("2,"));
        assert!(lines[3].ends_with(",51,true,false"));
    }

    #[test]
    fn reader_accepts_what_writer_produces() {
        let samples = [sample(0.123456789, 7), sample(1.5, 32)];
        let mut out = Vec::new();
        write_csv(&mut out, &samples).expect("in-memory write");
        let parsed = read_csv(out.as_slice()).expect("valid csv");
        assert_eq!(parsed, samples);
    }

    #[test]
    fn reader_rejects_bad_input() {
        assert!(matches!(read_csv("".as_bytes()), Err(CsvParseError::MissingHeader)));
        assert!(matches!(
            read_csv("a,b,c\n".as_bytes()),
            Err(CsvParseError::InvalidHeader { .. })
        ));

        let bad_bool = format!("{CSV_HEADER}\n1,60,0,0,10,yes,false\n");
        match read_csv(bad_bool.as_bytes()) {
            Err(CsvParseError::InvalidRow { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {other:?}"),
        }

        let short = format!("{CSV_HEADER}\n\n1,60,0\n");
        match read_csv(short.as_bytes()) {
            Err(CsvParseError::InvalidRow { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
