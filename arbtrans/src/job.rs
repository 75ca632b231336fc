//! Translation jobs.
//!
//! A job is one run over a set of uploaded resource files. It owns a directory of its own
//! (`<output_root>/<job_id>`) so concurrent jobs never write into each other's outputs.
//! Files are processed in order and the first failure aborts the rest of the batch.

use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
    str::FromStr,
};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{
    archive::{ARCHIVE_NAME, write_archive},
    codec::{ensure_resource_file, output_file_name},
    error::Error,
    options::TranslateOptions,
    pipeline::localize_file,
    provider::Translator,
};

/// Identifier of a job; also the name of its output directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    /// A fresh random id, `job-` followed by 16 hex digits.
    pub fn generate() -> Self {
        let n: u64 = rand::thread_rng().r#gen();
        JobId(format!("job-{:016x}", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for JobId {
    type Err = Error;

    /// Accepts ASCII letters, digits, `-` and `_` only, so an id is always a single
    /// path component.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = !s.is_empty()
            && s.len() <= 64
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(Error::Config(format!("invalid job id `{}`", s)));
        }
        Ok(JobId(s.to_string()))
    }
}

impl Display for JobId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upper bounds on what one job accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobLimits {
    pub max_files: usize,
    /// In bytes.
    pub max_file_size: u64,
}

impl Default for JobLimits {
    fn default() -> Self {
        JobLimits {
            max_files: 5,
            max_file_size: 1024 * 1024,
        }
    }
}

/// Everything a job needs: its id, where it writes, and which files belong to it.
#[derive(Debug, Clone)]
pub struct JobContext {
    id: JobId,
    output_dir: PathBuf,
    sources: Vec<PathBuf>,
    limits: JobLimits,
}

impl JobContext {
    pub fn new<P: AsRef<Path>>(id: JobId, output_root: P) -> Self {
        let output_dir = output_root.as_ref().join(id.as_str());
        JobContext {
            id,
            output_dir,
            sources: Vec::new(),
            limits: JobLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: JobLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &JobLimits {
        &self.limits
    }

    pub fn id(&self) -> &JobId {
        &self.id
    }

    /// Directory this job writes into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn add_source<P: Into<PathBuf>>(&mut self, path: P) {
        self.sources.push(path.into());
    }

    pub fn with_sources<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.sources.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Translates every source and packages the outputs.
    ///
    /// All sources are checked before the provider is called for any of them.
    pub fn run<T: Translator + ?Sized>(
        &self,
        translator: &T,
        options: &TranslateOptions,
    ) -> Result<JobOutput, Error> {
        self.check_sources()?;

        let mut outputs = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            match localize_file(source, &self.output_dir, translator, options) {
                Ok(path) => outputs.push(path),
                Err(e) => {
                    error!(
                        job = %self.id,
                        source = %source.display(),
                        error = %e,
                        "job aborted"
                    );
                    return Err(e);
                }
            }
        }

        let output = package(outputs, &self.output_dir)?;
        info!(
            job = %self.id,
            download = %output.download_path().display(),
            "job finished"
        );
        Ok(output)
    }

    /// Checks count, type and size of every source, and that no two sources share an
    /// output name. Output names are compared case-insensitively.
    fn check_sources(&self) -> Result<(), Error> {
        if self.sources.is_empty() {
            return Err(Error::NoInput);
        }
        if self.sources.len() > self.limits.max_files {
            return Err(Error::TooManyFiles {
                limit: self.limits.max_files,
                actual: self.sources.len(),
            });
        }

        let mut names: HashMap<String, &PathBuf> = HashMap::new();
        for source in &self.sources {
            ensure_resource_file(source)?;

            let size = std::fs::metadata(source)?.len();
            if size > self.limits.max_file_size {
                return Err(Error::FileTooLarge {
                    path: source.clone(),
                    size,
                    limit: self.limits.max_file_size,
                });
            }

            let name = output_file_name(source)?;
            if let Some(first) = names.insert(name.to_lowercase(), source) {
                return Err(Error::DuplicateOutput {
                    name,
                    first: first.clone(),
                    second: source.clone(),
                });
            }
        }
        Ok(())
    }
}

/// What a finished job hands back for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutput {
    /// Exactly one translated file.
    Single(PathBuf),
    /// Several translated files packed into one zip archive.
    Archive { path: PathBuf, files: Vec<PathBuf> },
}

impl JobOutput {
    /// The one path to deliver to the user.
    pub fn download_path(&self) -> &Path {
        match self {
            JobOutput::Single(path) => path,
            JobOutput::Archive { path, .. } => path,
        }
    }

    /// Every translated file produced by the job.
    pub fn files(&self) -> &[PathBuf] {
        match self {
            JobOutput::Single(path) => std::slice::from_ref(path),
            JobOutput::Archive { files, .. } => files,
        }
    }
}

/// Returns the single output as-is, or zips several outputs into `dir/archive.zip`.
pub fn package<P: AsRef<Path>>(mut outputs: Vec<PathBuf>, dir: P) -> Result<JobOutput, Error> {
    match outputs.len() {
        0 => Err(Error::NoInput),
        1 => Ok(JobOutput::Single(outputs.remove(0))),
        _ => {
            let path = write_archive(&outputs, dir.as_ref().join(ARCHIVE_NAME))?;
            Ok(JobOutput::Archive {
                path,
                files: outputs,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_distinct_and_valid() {
        let a = JobId::generate();
        let b = JobId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("job-"));
        assert_eq!(a.as_str().len(), 20);
        assert_eq!(JobId::from_str(a.as_str()).unwrap(), a);
    }

    #[test]
    fn test_job_id_rejects_path_components() {
        assert!(JobId::from_str("../escape").is_err());
        assert!(JobId::from_str("a/b").is_err());
        assert!(JobId::from_str("").is_err());
        assert!(JobId::from_str("nightly_2024-05").is_ok());
    }

    #[test]
    fn test_output_dir_is_scoped_by_id() {
        let id = JobId::from_str("job-1").unwrap();
        let ctx = JobContext::new(id, "/srv/downloads");
        assert_eq!(ctx.output_dir(), Path::new("/srv/downloads/job-1"));
    }

    #[test]
    fn test_with_sources_keeps_order() {
        let ctx = JobContext::new(JobId::generate(), "out").with_sources(["b.arb", "a.arb"]);
        assert_eq!(
            ctx.sources(),
            &[PathBuf::from("b.arb"), PathBuf::from("a.arb")]
        );
    }

    #[test]
    fn test_run_without_sources_fails() {
        let ctx = JobContext::new(JobId::generate(), "out");
        let err = ctx
            .run(&crate::provider::IdentityTranslator, &TranslateOptions::new())
            .unwrap_err();
        assert!(matches!(err, Error::NoInput));
    }

    #[test]
    fn test_default_limits() {
        let ctx = JobContext::new(JobId::generate(), "out");
        assert_eq!(ctx.limits().max_files, 5);
        assert_eq!(ctx.limits().max_file_size, 1_048_576);
    }

    #[test]
    fn test_too_many_sources_fail_before_reading() {
        let ctx = JobContext::new(JobId::generate(), "out")
            .with_limits(JobLimits {
                max_files: 2,
                ..JobLimits::default()
            })
            .with_sources(["a.arb", "b.arb", "c.arb"]);
        let err = ctx
            .run(&crate::provider::IdentityTranslator, &TranslateOptions::new())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::TooManyFiles {
                limit: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_single_output_files() {
        let output = JobOutput::Single(PathBuf::from("x.arb"));
        assert_eq!(output.download_path(), Path::new("x.arb"));
        assert_eq!(output.files(), &[PathBuf::from("x.arb")]);
    }
}
