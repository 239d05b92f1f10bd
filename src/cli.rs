use std::path::PathBuf;

use clap::Parser;

use crate::config;

#[derive(Parser, Debug)]
#[command(
    name = "rmcache",
    about = "Remove cache files of installed programs",
    version
)]
pub struct Cli {
    /// Config file listing programs and their cache paths
    #[arg(long, value_name = "PATH", default_value_os_t = config::default_config_path())]
    pub config: PathBuf,

    /// Only report what would be removed
    #[arg(long = "dryrun", short = 'd')]
    pub dry_run: bool,
}
