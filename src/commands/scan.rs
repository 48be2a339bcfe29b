use std::io::{self, Write};
use std::time::Duration;

use crate::config::Config;
use crate::docker::DockerCli;
use crate::error::AppError;
use crate::pipeline::{ScanOutcome, find_unused_images};
use crate::report::{ScanStats, render};
use crate::shell::ShellRunner;
use crate::utils::format_bytes;

pub struct ScanOptions {
    /// Overrides the configured runtime binary.
    pub runtime: Option<String>,
    /// Overrides the configured timeout; zero disables it.
    pub timeout_secs: Option<u64>,
}

pub fn execute_scan(options: ScanOptions) -> Result<ScanOutcome, AppError> {
    let mut config = Config::load()?;
    if let Some(runtime) = options.runtime {
        config.runtime = runtime;
    }
    if let Some(secs) = options.timeout_secs {
        config.timeout_secs = Some(secs);
    }

    let exclude = config.compile_excludes()?;
    let runner = ShellRunner::new(config.timeout());
    let docker = DockerCli::new(config.runtime.clone(), runner);

    let outcome = find_unused_images(&docker, exclude.as_ref())?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(render(&outcome.unused).as_bytes())?;
    stdout.flush()?;

    log_summary(&outcome.stats, config.timeout());
    Ok(outcome)
}

fn log_summary(stats: &ScanStats, timeout: Option<Duration>) {
    tracing::info!(
        images = stats.images,
        containers = stats.containers,
        unused = stats.unused,
        excluded = stats.excluded,
        reclaimable = %format_bytes(stats.reclaimable_bytes),
        skipped_rows = stats.skipped_rows,
        unresolved_containers = stats.unresolved_containers,
        missing_layers = stats.missing_layers,
        unknown_ancestors = stats.unknown_ancestors,
        history_calls = stats.history_calls,
        history_cache_hits = stats.history_cache_hits,
        timeout_secs = timeout.map(|t| t.as_secs()),
        "scan finished"
    );
}
