use crate::services::config::{
    RunConfig, DEFAULT_MAX_WORKERS, DEFAULT_OUTPUT_EXTENSION, DEFAULT_VALID_EXTENSION,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "dir_extract")]
#[command(about = "Mirror a directory tree, writing per-file image statistics as JSON records")]
#[command(version)]
pub struct Cli {
    /// Root source directory to walk
    #[arg(short = 's', long, alias = "root_source_dir", default_value = ".")]
    pub root_source_dir: PathBuf,

    /// Root directory the mirrored output tree is created under
    #[arg(short = 'd', long, alias = "root_save_dir", default_value = ".")]
    pub root_save_dir: PathBuf,

    /// File extensions to process (case-insensitive)
    #[arg(
        short = 'e',
        long,
        alias = "valid_file_ext",
        num_args = 1..,
        default_value = DEFAULT_VALID_EXTENSION
    )]
    pub valid_file_ext: Vec<String>,

    /// Appended verbatim to the output file stem (no dot is inserted)
    #[arg(short = 'o', long, alias = "file_out_ext", default_value = DEFAULT_OUTPUT_EXTENSION)]
    pub file_out_ext: String,

    /// Overwrite all previous extractions
    #[arg(short = 'r', long, alias = "restart_job")]
    pub restart_job: bool,

    /// Maximum number of concurrent workers
    #[arg(short = 'p', long, alias = "max_processes", default_value_t = DEFAULT_MAX_WORKERS)]
    pub max_processes: usize,

    /// Skip files whose name starts with '.'
    #[arg(long)]
    pub skip_hidden: bool,

    /// Skip files whose name ends with this suffix (repeatable)
    #[arg(long = "exclude-suffix", value_name = "SUFFIX")]
    pub exclude_suffixes: Vec<String>,

    /// Exit with a non-zero status if any file failed to process
    #[arg(long)]
    pub fail_on_error: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl From<&Cli> for RunConfig {
    fn from(cli: &Cli) -> Self {
        RunConfig::new(&cli.root_source_dir, &cli.root_save_dir)
            .with_accepted_extensions(&cli.valid_file_ext)
            .with_output_extension(&cli.file_out_ext)
            .with_restart(cli.restart_job)
            .with_max_workers(cli.max_processes)
    }
}
