//! File-based data source.
//!
//! Polls a JSON file holding a single reading, in the same shape the sensor
//! endpoint returns.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use vitalwatch_types::SensorReading;

use super::DataSource;

/// A data source that reads a sensor reading from a JSON file.
///
/// The source tracks the file's modification time and only returns new data
/// when the file has been updated. A file that cannot be read or parsed
/// yields the error sentinel once, when the failure first appears, just like
/// a failed fetch.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being monitored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&self) -> Result<SensorReading, String> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| format!("Read error: {}", e))?;
        let reading: SensorReading =
            serde_json::from_str(&content).map_err(|e| format!("Parse error: {}", e))?;
        reading
            .check_shape()
            .map_err(|e| format!("Parse error: {}", e))?;
        Ok(reading)
    }

    /// Record a failure; the sentinel is returned only on the first one.
    fn fail(&mut self, error: String) -> Option<SensorReading> {
        let first = self.last_error.is_none();
        if first {
            tracing::warn!(path = %self.path.display(), %error, "Error reading sensor file");
        }
        self.last_error = Some(error);
        first.then(SensorReading::error_sentinel)
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<SensorReading> {
        let Some(current_modified) = self.get_modified_time() else {
            return self.fail(format!("Read error: {} not found", self.path.display()));
        };

        // Check if file has been modified since last read
        if let Some(last) = self.last_modified {
            if current_modified <= last {
                return None;
            }
        }

        self.last_modified = Some(current_modified);
        match self.read_file() {
            Ok(reading) => {
                self.last_error = None;
                Some(reading)
            }
            Err(e) => self.fail(e),
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.last_error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, Write};
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{"bloodPressure":"120/80","oxygenSaturation":98,"heartRate":70,"glucose":90}"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/reading.json");
        assert_eq!(source.path(), Path::new("/tmp/reading.json"));
        assert_eq!(source.description(), "file: /tmp/reading.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_poll_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());

        let reading = source.poll().unwrap();
        assert_eq!(reading, SensorReading::new("120/80", 98.0, 70.0, 90.0));

        // Second poll without file change should return None
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_detects_changes() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        assert!(source.poll().is_some());

        file.rewind().unwrap();
        writeln!(
            file,
            r#"{{"bloodPressure":"140/95","oxygenSaturation":98,"heartRate":70,"glucose":90}}"#
        )
        .unwrap();
        file.flush().unwrap();

        // Push the mtime forward so coarse filesystem clocks still see a change
        let later = SystemTime::now() + Duration::from_secs(5);
        file.as_file().set_modified(later).unwrap();

        let reading = source.poll().expect("change not detected");
        assert_eq!(reading.blood_pressure_parts(), (Some(140.0), Some(95.0)));
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_rejects_reading_without_text_blood_pressure() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"bloodPressure":120,"oxygenSaturation":98,"heartRate":70,"glucose":90}}"#
        )
        .unwrap();

        let mut source = FileSource::new(file.path());

        let reading = source.poll().unwrap();
        assert!(reading.is_error_sentinel());
        assert_eq!(
            source.error().as_deref(),
            Some("Parse error: bloodPressure is not text")
        );
    }

    #[test]
    fn test_file_source_missing_file_yields_sentinel_once() {
        let mut source = FileSource::new("/nonexistent/path/reading.json");

        let reading = source.poll().unwrap();
        assert!(reading.is_error_sentinel());
        assert!(source.error().unwrap().contains("Read error"));

        assert!(source.poll().is_none());
        assert!(source.error().is_some());
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());

        let reading = source.poll().unwrap();
        assert!(reading.is_error_sentinel());
        assert!(source.error().unwrap().contains("Parse error"));
        assert!(source.poll().is_none());
    }
}
