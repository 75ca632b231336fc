//! File-level helpers for reading resource documents from disk and writing translated
//! documents next to them.
//!
//! Inputs must be existing `.arb` files. An output never replaces its source.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    error::Error,
    formats::{ArbFormat, OUTPUT_PREFIX, RESOURCE_EXTENSION},
    traits::Parser,
    types::Resource,
};

/// Returns `true` when `path` carries the resource extension (case-insensitive).
pub fn has_resource_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(RESOURCE_EXTENSION))
}

/// Checks that `path` names an existing regular file with the resource extension.
pub fn ensure_resource_file<P: AsRef<Path>>(path: P) -> Result<(), Error> {
    let path = path.as_ref();
    if !path.is_file() || !has_resource_extension(path) {
        return Err(Error::NotAResourceFile(path.to_path_buf()));
    }
    Ok(())
}

/// Reads a resource document from `path`.
///
/// # Errors
///
/// - [`Error::NotAResourceFile`] if the path does not exist or lacks the `.arb` extension.
/// - [`Error::MalformedResource`] if the content is not a valid resource document.
pub fn read_resource<P: AsRef<Path>>(path: P) -> Result<Resource, Error> {
    let path = path.as_ref();
    ensure_resource_file(path)?;

    let format = ArbFormat::read_from(path)?;

    debug!(path = %path.display(), entries = format.entries.len(), "read resource");
    Ok(Resource::from(format))
}

/// Name of the translated output for `source`: `translated_<stem>.arb`.
pub fn output_file_name<P: AsRef<Path>>(source: P) -> Result<String, Error> {
    let source = source.as_ref();
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::NotAResourceFile(source.to_path_buf()))?;
    Ok(format!("{}{}.{}", OUTPUT_PREFIX, stem, RESOURCE_EXTENSION))
}

/// Writes `resource` into `output_dir` under the name derived from `source`, creating the
/// directory if needed. Returns the full output path.
///
/// Exactly one file is created. The source file is never touched.
pub fn write_translated<P: AsRef<Path>, Q: AsRef<Path>>(
    resource: &Resource,
    source: P,
    output_dir: Q,
) -> Result<PathBuf, Error> {
    let source = source.as_ref();
    let output_dir = output_dir.as_ref();
    let output_path = output_dir.join(output_file_name(source)?);

    if is_same_file(source, &output_path) {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!(
                "refusing to overwrite source file {}",
                source.display()
            ),
        )));
    }

    std::fs::create_dir_all(output_dir)?;
    ArbFormat::from(resource.clone()).write_to(&output_path)?;

    debug!(path = %output_path.display(), entries = resource.len(), "wrote translated resource");
    Ok(output_path)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
