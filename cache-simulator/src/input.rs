//! Input data handling for cache simulation
//!
//! Reads address traces from a directory. Every `*.trace` or `*.txt` file is a
//! trace; files are replayed in name order. Each line holds one address;
//! blank lines and lines starting with `#` are skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use thiserror::Error;

const TRACE_EXTENSIONS: [&str; 2] = ["trace", "txt"];

/// Error types for trace parsing
#[derive(Debug, Error)]
pub enum TraceParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path}:{line}: invalid address `{text}`: {source}")]
    InvalidAddress {
        path: PathBuf,
        line: usize,
        text: String,
        #[source]
        source: ParseIntError,
    },
    #[error("invalid trace directory pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("failed to list trace files: {0}")]
    Glob(#[from] glob::GlobError),
}

/// Reader for address trace files
pub struct TraceReader {
    input_dir: PathBuf,
}

impl TraceReader {
    /// Create a new reader for the given input directory
    pub fn new<P: AsRef<Path>>(input_dir: P) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
        }
    }

    /// Get all trace files in the input directory, sorted by name
    pub fn trace_files(&self) -> Result<Vec<PathBuf>, TraceParseError> {
        let dir = glob::Pattern::escape(&self.input_dir.to_string_lossy());
        let mut files = Vec::new();
        for extension in TRACE_EXTENSIONS {
            for entry in glob::glob(&format!("{dir}/*.{extension}"))? {
                let path = entry?;
                if path.is_file() {
                    files.push(path);
                }
            }
        }

        // Sort files by name for consistent ordering
        files.sort();
        Ok(files)
    }

    /// Parse a single line into an address
    fn parse_line(line: &str) -> Result<Option<usize>, ParseIntError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        line.parse().map(Some)
    }

    /// Parse a single trace file
    pub fn read_file(path: &Path) -> Result<Vec<usize>, TraceParseError> {
        let io_error = |source| TraceParseError::Io {
            path: path.to_path_buf(),
            source,
        };
        let reader = BufReader::new(File::open(path).map_err(io_error)?);

        let mut trace = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(io_error)?;
            match Self::parse_line(&line) {
                Ok(Some(address)) => trace.push(address),
                Ok(None) => {}
                Err(source) => {
                    return Err(TraceParseError::InvalidAddress {
                        path: path.to_path_buf(),
                        line: index + 1,
                        text: line.trim().to_string(),
                        source,
                    })
                }
            }
        }
        Ok(trace)
    }

    /// Parse all trace files in the input directory, concatenated in name order
    pub fn read_all(&self) -> Result<Vec<usize>, TraceParseError> {
        let mut trace = Vec::new();
        for file in self.trace_files()? {
            let addresses = Self::read_file(&file)?;
            tracing::info!(file = %file.display(), addresses = addresses.len(), "loaded trace file");
            trace.extend(addresses);
        }
        Ok(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_line_skips_comments_and_blanks() {
        assert_eq!(TraceReader::parse_line("  42 "), Ok(Some(42)));
        assert_eq!(TraceReader::parse_line(""), Ok(None));
        assert_eq!(TraceReader::parse_line("# header"), Ok(None));
        assert!(TraceReader::parse_line("-1").is_err());
    }

    #[test]
    fn test_read_all_orders_files_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.trace"), "3\n4\n").unwrap();
        fs::write(dir.path().join("a.txt"), "# first\n1\n\n2\n").unwrap();
        fs::write(dir.path().join("ignored.csv"), "99\n").unwrap();

        let reader = TraceReader::new(dir.path());
        assert_eq!(reader.trace_files().unwrap().len(), 2);
        assert_eq!(reader.read_all().unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_invalid_address_reports_file_and_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.trace");
        fs::write(&path, "1\n# note\nabc\n").unwrap();

        match TraceReader::read_file(&path) {
            Err(TraceParseError::InvalidAddress { line, text, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(text, "abc");
            }
            other => panic!("expected InvalidAddress, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = TraceReader::read_file(&dir.path().join("missing.trace"));
        assert!(matches!(result, Err(TraceParseError::Io { .. })));
    }
}
