//! Command line arguments.

use std::path::PathBuf;

/// plyview command line interface arguments.
#[derive(clap::Parser, Debug, Clone, PartialEq, Eq)]
#[clap(
    name = "plyview",
    version,
    about = "Interactive viewer for binary little-endian PLY point clouds."
)]
pub struct CliArgs {
    /// Point cloud to display.
    #[clap(
        value_name = "FILE",
        required_unless_present = "list_adapters",
        help = "Binary little-endian PLY file with x, y, z, intensity floats"
    )]
    pub file: Option<PathBuf>,

    /// Preferred adapter name substring.
    #[clap(
        long,
        value_name = "SUBSTRING",
        help = "Use the first GPU adapter whose name contains SUBSTRING"
    )]
    pub device: Option<String>,

    /// List GPU adapters and exit.
    #[clap(long, help = "Print available GPU adapters and exit")]
    pub list_adapters: bool,

    /// Path to a TOML options file.
    #[clap(long, value_name = "TOML", help = "Load viewer options from a TOML file")]
    pub options: Option<PathBuf>,

    /// Whether to log at debug level by default.
    #[clap(short, long, help = "Use verbose output (default log level = debug)")]
    pub verbose: bool,
}

impl CliArgs {
    /// Default log filter; `RUST_LOG` overrides it.
    #[must_use]
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
