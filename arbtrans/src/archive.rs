//! Zip packaging for jobs that produce more than one file.

use std::{
    fs::File,
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use tracing::debug;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::error::Error;

/// Name of the archive written into a job directory.
pub const ARCHIVE_NAME: &str = "archive.zip";

/// Writes `files` into a new zip archive at `destination`. Entries are named by file base
/// name. Returns `destination`.
pub fn write_archive<P: AsRef<Path>>(files: &[PathBuf], destination: P) -> Result<PathBuf, Error> {
    let destination = destination.as_ref();
    let mut zip = ZipWriter::new(BufWriter::new(File::create(destination)?));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for file in files {
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::NotAResourceFile(file.clone()))?;
        zip.start_file(name, options)?;
        io::copy(&mut File::open(file)?, &mut zip)?;
    }

    let mut writer = zip.finish()?;
    io::Write::flush(&mut writer)?;

    debug!(path = %destination.display(), files = files.len(), "wrote archive");
    Ok(destination.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, io::Read};
    use tempfile::TempDir;
    use zip::ZipArchive;

    #[test]
    fn test_archive_contains_every_file_by_base_name() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("translated_intl_en.arb");
        let b = temp_dir.path().join("translated_intl_de.arb");
        fs::write(&a, "{\"title\": \"Входящие\"}\n").unwrap();
        fs::write(&b, "{}\n").unwrap();

        let path =
            write_archive(&[a.clone(), b.clone()], temp_dir.path().join(ARCHIVE_NAME)).unwrap();

        let mut archive = ZipArchive::new(File::open(&path).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);

        let mut content = String::new();
        archive
            .by_name("translated_intl_en.arb")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "{\"title\": \"Входящие\"}\n");
        assert!(archive.by_name("translated_intl_de.arb").is_ok());
    }

    #[test]
    fn test_missing_input_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone.arb");
        assert!(write_archive(&[missing], temp_dir.path().join(ARCHIVE_NAME)).is_err());
    }
}
