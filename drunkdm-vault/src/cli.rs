use clap::crate_authors;
use clap::crate_description;
use clap::crate_version;
pub use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

const DRUNKDM_AUTHOR: &str = crate_authors!();
const DRUNKDM_VERSION: &str = crate_version!();
const DRUNKDM_ABOUT: &str = crate_description!();
const DRUNKDM_FLAG_D_SHORT: char = 'd';
const DRUNKDM_FLAG_D_HELP: &str = "Enable Debug logging";
const DRUNKDM_FLAG_V_SHORT: char = 'v';
const DRUNKDM_FLAG_V_HELP: &str = "Vault directory holding the notes";
const DRUNKDM_VAULT_ENV: &str = "DRUNKDM_VAULT";

#[derive(Parser, Debug)]
#[command(author = DRUNKDM_AUTHOR, version = DRUNKDM_VERSION, about = DRUNKDM_ABOUT)]
pub struct Args {
    #[arg(short = DRUNKDM_FLAG_D_SHORT, long, help = DRUNKDM_FLAG_D_HELP, action)]
    pub debug: bool,
    #[arg(short = DRUNKDM_FLAG_V_SHORT, long, help = DRUNKDM_FLAG_V_HELP, env = DRUNKDM_VAULT_ENV)]
    pub vault: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Roll dice and append the result to the current note, asks on stdin without EXPR
    Roll {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        expr: Vec<String>,
    },
    /// Show the note receiving the rolls, or change it
    File { name: Option<String> },
    /// List the notes of a folder
    List { folder: String },
}
