//! The read/write contract every on-disk resource format implements.

use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::error::Error;

/// Reads and writes one resource document.
///
/// Implementors supply [`Parser::from_reader`] and [`Parser::to_writer`]; the path helpers
/// add file handling on top.
///
/// ```rust,no_run
/// use arbtrans::traits::Parser;
/// let format = arbtrans::formats::arb::Format::read_from("intl_en.arb")?;
/// format.write_to("downloads/translated_intl_en.arb")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser: Sized {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>;

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Parses an in-memory document.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Parses the file at `path`. Parse failures name the file.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        Self::from_reader(reader).map_err(|e| match e {
            Error::MalformedResource(reason) => {
                Error::MalformedResource(format!("{}: {}", path.display(), reason))
            }
            other => other,
        })
    }

    /// Writes to `path` through a sibling `.part` file that is renamed into place, so a
    /// failed write never leaves a truncated document behind.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let mut partial = path.as_os_str().to_owned();
        partial.push(".part");

        let result = File::create(&partial).map_err(Error::from).and_then(|file| {
            let mut writer = BufWriter::new(file);
            self.to_writer(&mut writer)?;
            writer.flush()?;
            Ok(())
        });
        if let Err(e) = result {
            let _ = fs::remove_file(&partial);
            return Err(e);
        }
        fs::rename(&partial, path)?;
        Ok(())
    }
}
