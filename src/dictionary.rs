//! Dictionary loading: a dictionary is consumed as a raw byte prefix, never
//! trained or indexed ahead of time.
//!
//! Ground truth: lz4ultra's `-D <file>` handling, which reads the whole
//! dictionary file and retains only its last HISTORY bytes.

use std::fs;
use std::path::Path;

use crate::frame::HISTORY;
use crate::status::Status;

/// Load a dictionary file, keeping only the last [`HISTORY`] bytes (the
/// maximum distance a match offset can reach back).
pub fn load_dictionary(path: &Path) -> Result<Vec<u8>, Status> {
    let bytes = fs::read(path).map_err(|_| Status::DictionaryRead)?;
    if bytes.len() > HISTORY {
        Ok(bytes[bytes.len() - HISTORY..].to_vec())
    } else {
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn truncates_to_history_window() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&vec![7u8; HISTORY + 100]).unwrap();
        let dict = load_dictionary(file.path()).unwrap();
        assert_eq!(dict.len(), HISTORY);
    }

    #[test]
    fn missing_file_reports_dictionary_read_error() {
        let err = load_dictionary(Path::new("/nonexistent/path/to/dict")).unwrap_err();
        assert_eq!(err, Status::DictionaryRead);
    }
}
