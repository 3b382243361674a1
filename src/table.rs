use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, SampleError};
use crate::features::FeatureRow;

/// Fixed-capacity, append-only collection of feature rows in sampling order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    capacity: usize,
    rows: Vec<FeatureRow>,
}

impl Table {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn commit(&mut self, row: FeatureRow) -> Result<usize> {
        if self.is_full() {
            return Err(SampleError::TableFull {
                capacity: self.capacity,
            });
        }
        self.rows.push(row);
        Ok(self.rows.len() - 1)
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.rows.len() >= self.capacity
    }

    /// Writes every row as a comma separated line, replacing `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        create_parent(path)?;
        let mut out = BufWriter::new(File::create(path)?);
        for row in self.rows() {
            write_row(&mut out, row)?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Writes rows to disk one at a time as they are accepted.
pub struct RowAppender {
    file: File,
}

impl RowAppender {
    pub fn create(path: &Path) -> Result<Self> {
        create_parent(path)?;
        Ok(Self {
            file: File::create(path)?,
        })
    }

    pub fn append(&mut self, row: &FeatureRow) -> Result<()> {
        write_row(&mut self.file, row)?;
        self.file.flush()?;
        Ok(())
    }
}

fn write_row<W: Write>(out: &mut W, row: &FeatureRow) -> std::io::Result<()> {
    let line = row
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",");
    writeln!(out, "{line}")
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW_A: FeatureRow = [1, 0, 0, 0, 0, 0, 0, 365, 1, 10, 20, 5, 2];
    const ROW_B: FeatureRow = [0, 0, 0, 0, 0, 0, 1, 4000, 0, 0, 3, 123456, 78];

    #[test]
    fn test_commit_until_full() {
        let mut table = Table::with_capacity(2);
        assert_eq!(table.commit(ROW_A).unwrap(), 0);
        assert_eq!(table.commit(ROW_B).unwrap(), 1);
        assert!(table.is_full());
        assert!(matches!(
            table.commit(ROW_A),
            Err(SampleError::TableFull { capacity: 2 })
        ));
        assert_eq!(table.rows(), &[ROW_A, ROW_B]);
    }

    #[test]
    fn test_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("out.csv");
        let mut table = Table::with_capacity(2);
        table.commit(ROW_A).unwrap();
        table.commit(ROW_B).unwrap();
        table.write(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "1,0,0,0,0,0,0,365,1,10,20,5,2\n0,0,0,0,0,0,1,4000,0,0,3,123456,78\n"
        );
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "old contents\nmore\nand more\n").unwrap();
        let mut table = Table::with_capacity(1);
        table.commit(ROW_B).unwrap();
        table.write(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "0,0,0,0,0,0,1,4000,0,0,3,123456,78\n"
        );
    }

    #[test]
    fn test_write_to_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let table = Table::with_capacity(0);
        assert!(matches!(table.write(dir.path()), Err(SampleError::Io(_))));
    }

    #[test]
    fn test_appender() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.csv");
        fs::write(&path, "stale\n").unwrap();
        let mut appender = RowAppender::create(&path).unwrap();
        appender.append(&ROW_A).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "1,0,0,0,0,0,0,365,1,10,20,5,2\n"
        );
        appender.append(&ROW_B).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
    }
}
