use std::path::PathBuf;
use structopt::StructOpt;

use crate::parser::Format;

#[derive(Debug, StructOpt)]
#[structopt(name = "sim-config", about = "Validate a simulated service configuration")]
pub struct CliOptions {
    #[structopt(short, long, parse(from_os_str))]
    /// Path to the configuration document
    pub input: PathBuf,

    #[structopt(short, long)]
    /// Document format (yaml or json); guessed from the file extension when omitted
    pub format: Option<Format>,

    #[structopt(short, long)]
    /// Print the validated configuration as JSON to stdout
    pub print: bool,
}

pub fn parse_cli_args() -> CliOptions {
    CliOptions::from_args()
}
