use std::path::PathBuf;

use arbtrans::{
    BatchStrategy, Error, HttpTranslator, IdentityTranslator, JobContext, JobId, JobOutput,
    Retrying, Translator, config::Config, language::is_known_language,
};
use tracing::{info, warn};

/// Shown after every failure; details go to the line above it.
pub const RETRY_PROMPT: &str = "Something went wrong. Please try again.";

/// Options of the `translate` subcommand. `None` fields fall back to the configuration.
#[derive(Debug, Clone, Default)]
pub struct TranslateArgs {
    pub inputs: Vec<String>,
    pub target_language: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub job_id: Option<String>,
    pub strategy: Option<BatchStrategy>,
    pub config: Option<PathBuf>,
    pub endpoint: Option<String>,
    /// Skip the provider and copy values unchanged.
    pub identity: bool,
}

/// Resolves the configuration for `args`: file, then environment, then flags.
pub fn resolve_config(args: &TranslateArgs) -> Result<Config, Error> {
    let mut config = Config::load(args.config.as_deref())?;

    if let Some(target) = &args.target_language {
        config.target_language = target.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if let Some(endpoint) = &args.endpoint {
        config.provider.endpoint = endpoint.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Runs one translation job over `args.inputs`.
pub fn run_translate_command(args: TranslateArgs) -> Result<JobOutput, Error> {
    let config = resolve_config(&args)?;

    if !is_known_language(&config.target_language) {
        warn!(
            target_language = %config.target_language,
            "language is not in the known list, the provider may reject it"
        );
    }

    let job_id = match &args.job_id {
        Some(id) => id.parse::<JobId>()?,
        None => JobId::generate(),
    };
    let ctx = JobContext::new(job_id, &config.output_dir)
        .with_limits(config.limits)
        .with_sources(&args.inputs);

    let translator: Box<dyn Translator> = if args.identity {
        Box::new(IdentityTranslator)
    } else {
        Box::new(Retrying::new(
            HttpTranslator::new(&config.provider)?,
            config.retry_policy(),
        ))
    };

    info!(
        job = %ctx.id(),
        files = ctx.sources().len(),
        provider = translator.name(),
        "starting job"
    );
    ctx.run(&*translator, &config.translate_options())
}

/// Human-readable summary of a finished job.
pub fn describe_output(output: &JobOutput) -> String {
    match output {
        JobOutput::Single(path) => format!("✅ Translated 1 file\nDownload: {}", path.display()),
        JobOutput::Archive { path, files } => format!(
            "✅ Translated {} files\nDownload: {}",
            files.len(),
            path.display()
        ),
    }
}
