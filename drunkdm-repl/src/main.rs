mod helper;
mod prompt;
use prompt::ReplPrompt;

use colored::Colorize;
use drunkdm_lib::RandomSource;
use drunkdm_vault::store::FsVault;
use drunkdm_vault::DrunkDm;
use drunkdm_vault::NoteStatus;
use drunkdm_vault::Settings;
use rustyline::Result;
use std::env;
use std::path::PathBuf;
use termimad::crossterm::style::Color;
use termimad::MadSkin;

const HISTORY_FILE: &str = "history";
const VAULT_ENV: &str = "DRUNKDM_VAULT";

fn main() -> Result<()> {
    let vault = env::args_os()
        .nth(1)
        .or_else(|| env::var_os(VAULT_ENV))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let settings = Settings::load(&vault).unwrap_or_else(|error| {
        eprintln!("{}", format!("repl: warn: {}", error).bold().yellow());
        Settings::default()
    });
    eprintln!(
        "{}",
        format!("repl: info: rolls go to `{}`", settings.note_path()).dimmed()
    );
    let mut dm = DrunkDm::new(settings, FsVault::new(&vault));
    let mut skin = MadSkin::default();
    skin.bold.set_fg(Color::Yellow);
    skin.inline_code.set_fg(Color::Magenta);
    let mut prompt = ReplPrompt::new()?;
    if prompt.load_history(HISTORY_FILE).is_err() {
        eprintln!("{}", "repl: warn: no previous history".bold().yellow());
    }
    let mut rng = rand::thread_rng();
    while !prompt.is_closed() {
        let mut source = RandomSource { generator: &mut rng };
        match dm.prompt_and_roll(&mut prompt, &mut source) {
            Ok(Some(rolled)) => {
                let text = format!(
                    "`{}` = **{}**",
                    rolled.result.breakdown(),
                    rolled.result.get_total()
                );
                println!("{}", skin.inline(&text));
                match rolled.note {
                    NoteStatus::Appended(path) => {
                        eprintln!("{}", format!("repl: info: added to `{}`", path).dimmed())
                    }
                    NoteStatus::NotFound(path) => eprintln!(
                        "{}",
                        format!("repl: warn: file `{}` not found", path)
                            .bold()
                            .yellow()
                    ),
                }
            }
            Ok(None) => (),
            Err(error) => eprintln!("{}", format!("{}", error).bold().red()),
        }
    }
    prompt.append_history(HISTORY_FILE)
}
