use clap::Parser;
use drunkdm_lib::RandomSource;
use drunkdm_vault::error::Result;
use drunkdm_vault::prompt::StdinPrompt;
use drunkdm_vault::store::FsVault;
use drunkdm_vault::DrunkDm;
use drunkdm_vault::NoteStatus;
use drunkdm_vault::Rolled;
use drunkdm_vault::Settings;
use itertools::Itertools;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing::info;
use tracing::Level;

mod cli;

fn main() -> ExitCode {
    // a missing `.env` is fine, the vault can come from the flag or the working directory
    dotenv::dotenv().ok();

    let args = cli::Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true)
        .with_max_level(if args.debug {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{}", error);
            ExitCode::FAILURE
        }
    }
}

#[tracing::instrument(skip_all)]
fn run(args: cli::Args) -> Result<()> {
    let vault = args.vault.unwrap_or_else(|| PathBuf::from("."));
    let settings = Settings::load(&vault)?;
    let mut dm = DrunkDm::new(settings, FsVault::new(&vault));
    match args.command {
        cli::Command::Roll { expr } => {
            let mut rng = rand::thread_rng();
            let mut source = RandomSource { generator: &mut rng };
            let rolled = if expr.is_empty() {
                dm.prompt_and_roll(&mut StdinPrompt::stdin(), &mut source)?
            } else {
                Some(dm.roll_and_record(&expr.join(" "), &mut source)?)
            };
            match rolled {
                Some(rolled) => report(&rolled),
                None => info!("Nothing rolled"),
            }
        }
        cli::Command::File { name: Some(name) } => {
            dm.set_current_file(&name);
            dm.settings().save(&vault)?;
            println!("{}", dm.settings().note_path());
        }
        cli::Command::File { name: None } => println!("{}", dm.settings().note_path()),
        cli::Command::List { folder } => {
            println!("{}", dm.list_notes(&folder)?.iter().format("\n"));
        }
    }
    Ok(())
}

fn report(rolled: &Rolled) {
    println!("{}", rolled.notice());
    println!("{}", rolled.result.breakdown());
    if let NoteStatus::NotFound(path) = &rolled.note {
        eprintln!("File {} not found", path);
    }
}
