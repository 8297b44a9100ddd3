//! Storage layer for takt.
//!
//! Records live in a single CSV file, newest first:
//!
//! ```text
//! timestamp,kind,notes
//! 2024-01-15 17:30:00,out,
//! 2024-01-15 09:00:00,in,standup
//! ```
//!
//! Whitespace around headers and fields is ignored on read, and a row may
//! omit the `notes` column. Every write rewrites the whole file through a
//! temporary file in the same directory that is renamed into place.
//!
//! There is no locking: two processes writing at once race, and the last
//! rename wins.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use takt_core::Record;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Column names, in file order.
pub const HEADER: [&str; 3] = ["timestamp", "kind", "notes"];

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be opened, written or renamed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A row could not be turned into a [`Record`].
    #[error("malformed row at line {line} of {}: {message}", path.display())]
    MalformedRow {
        path: PathBuf,
        line: u64,
        message: String,
    },
    /// Any other CSV encoding or decoding failure.
    #[error("csv error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn csv(path: &Path, source: csv::Error) -> Self {
        if let csv::ErrorKind::Deserialize { err, .. } = source.kind() {
            return Self::MalformedRow {
                path: path.to_path_buf(),
                line: source.position().map_or(0, csv::Position::line),
                message: err.to_string(),
            };
        }
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// The record file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every record, newest first.
    ///
    /// A missing file means no records yet and yields an empty list.
    pub fn load(&self) -> Result<Vec<Record>, StoreError> {
        self.read(None)
    }

    /// Loads at most `n` records from the top of the file.
    pub fn head(&self, n: usize) -> Result<Vec<Record>, StoreError> {
        self.read(Some(n))
    }

    /// Returns the most recent record, if any.
    pub fn first(&self) -> Result<Option<Record>, StoreError> {
        Ok(self.head(1)?.into_iter().next())
    }

    /// Loads every record, failing if the file does not exist.
    pub fn load_existing(&self) -> Result<Vec<Record>, StoreError> {
        let file = File::open(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        self.read_from(file, None)
    }

    /// Inserts `record` above all existing records.
    pub fn prepend(&self, record: Record) -> Result<(), StoreError> {
        let mut records = self.load()?;
        records.insert(0, record);
        self.save(&records)
    }

    /// Places the records of `source` above the existing ones.
    ///
    /// Returns the number of records imported.
    pub fn import_from(&self, source: &Path) -> Result<usize, StoreError> {
        let mut records = Self::new(source).load_existing()?;
        let imported = records.len();
        records.extend(self.load()?);
        self.save(&records)?;
        tracing::info!(imported, source = %source.display(), "imported records");
        Ok(imported)
    }

    /// Removes every record, leaving only the header.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.save(&[])
    }

    /// Creates the file with a header if it does not exist yet.
    ///
    /// Returns `true` if the file was created.
    pub fn ensure_exists(&self) -> Result<bool, StoreError> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&[])?;
        Ok(true)
    }

    /// Overwrites the file with `records`.
    ///
    /// The header is always written, even for an empty list.
    pub fn save(&self, records: &[Record]) -> Result<(), StoreError> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
                parent
            }
            None => Path::new("."),
        };

        // Dropped without being persisted on any error, which removes it.
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        let tmp_path = tmp.path().to_path_buf();
        {
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file_mut());
            writer
                .write_record(HEADER)
                .map_err(|e| StoreError::csv(&tmp_path, e))?;
            for record in records {
                writer
                    .serialize(record)
                    .map_err(|e| StoreError::csv(&tmp_path, e))?;
            }
            writer.flush().map_err(|e| StoreError::io(&tmp_path, e))?;
        }

        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "saved records");
        Ok(())
    }

    fn read(&self, limit: Option<usize>) -> Result<Vec<Record>, StoreError> {
        match File::open(&self.path) {
            Ok(file) => self.read_from(file, limit),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "record file missing, no records yet");
                Ok(Vec::new())
            }
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    fn read_from<R: io::Read>(
        &self,
        reader: R,
        limit: Option<usize>,
    ) -> Result<Vec<Record>, StoreError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let rows = reader.deserialize::<Record>();
        let records = match limit {
            Some(n) => rows.take(n).collect::<Result<Vec<_>, _>>(),
            None => rows.collect::<Result<Vec<_>, _>>(),
        }
        .map_err(|e| StoreError::csv(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), records = records.len(), "loaded records");
        Ok(records)
    }
}
