use crate::cli::args::Cli;
use crate::core::{ProgressReporter, RunSummary};
use crate::engine::create_filtered_extractor;
use crate::services::{
    AnyFilter, ConsoleProgressReporter, HiddenFileFilter, RunConfig, SuffixFilter,
};
use anyhow::{Context, Result};

/// コマンドライン引数からファイル名フィルタを組み立てる
pub fn build_filter(cli: &Cli) -> AnyFilter {
    let mut filter = AnyFilter::new();
    if cli.skip_hidden {
        filter = filter.with(HiddenFileFilter);
    }
    if !cli.exclude_suffixes.is_empty() {
        filter = filter.with(SuffixFilter::new(cli.exclude_suffixes.iter().cloned()));
    }
    filter
}

/// Execute extract command with the console reporter
pub async fn execute_extract(cli: &Cli) -> Result<RunSummary> {
    let reporter = if cli.quiet {
        ConsoleProgressReporter::quiet()
    } else {
        ConsoleProgressReporter::new()
    };
    execute_extract_with_reporter(cli, reporter).await
}

/// Execute extract command with an arbitrary progress reporter
pub async fn execute_extract_with_reporter<R>(cli: &Cli, reporter: R) -> Result<RunSummary>
where
    R: ProgressReporter + 'static,
{
    let config = RunConfig::from(cli);
    tracing::debug!(?config, "parsed run configuration");

    let extractor = create_filtered_extractor(config, build_filter(cli), reporter);
    let summary = extractor.run().await.with_context(|| {
        format!(
            "Extraction failed for: {}",
            cli.root_source_dir.display()
        )
    })?;

    if cli.fail_on_error && summary.has_failures() {
        anyhow::bail!(
            "{} of {} dispatched files failed to process",
            summary.failed,
            summary.dispatched
        );
    }

    Ok(summary)
}
