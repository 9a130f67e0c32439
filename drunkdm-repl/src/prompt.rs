use crate::helper::ReplHelper;
use colored::Colorize;
use drunkdm_vault::prompt::UserPrompt;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::hint::HistoryHinter;
use rustyline::CompletionType;
use rustyline::Config;
use rustyline::EditMode;
use rustyline::Editor;
use rustyline::Result;

/// Line editor answering the dice prompt, one question per line
pub(crate) struct ReplPrompt {
    rline: Editor<ReplHelper, DefaultHistory>,
    count: u64,
    label: Option<String>,
    closed: bool,
}

impl ReplPrompt {
    pub(crate) fn new() -> Result<Self> {
        let config = Config::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .edit_mode(EditMode::Emacs)
            .build();
        let helper = ReplHelper {
            hinter: HistoryHinter {},
            colored: "".to_owned(),
        };
        let mut rline = Editor::with_config(config)?;
        rline.set_helper(Some(helper));
        Ok(Self {
            rline,
            count: 1,
            label: None,
            closed: false,
        })
    }

    /// True once the user hit CTRL-C or CTRL-D
    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn load_history(&mut self, path: &str) -> Result<()> {
        self.rline.load_history(path)
    }

    pub(crate) fn append_history(&mut self, path: &str) -> Result<()> {
        self.rline.append_history(path)
    }
}

impl UserPrompt for ReplPrompt {
    fn ask(&mut self, label: &str) -> Option<String> {
        if self.label.as_deref() != Some(label) {
            println!("{}", label.bold());
            self.label = Some(label.to_owned());
        }
        let prompt = format!("roll: {}> ", self.count);
        if let Some(helper) = self.rline.helper_mut() {
            helper.colored = prompt.bold().green().to_string();
        }
        match self.rline.readline(&prompt) {
            Ok(line) => {
                self.count += 1;
                if let Err(error) = self.rline.add_history_entry(line.as_str()) {
                    eprintln!("{}", format!("repl: warn: `{}`", error).yellow());
                }
                Some(line)
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("{}", "repl: signal: CTRL-C".bold().yellow());
                self.closed = true;
                None
            }
            Err(ReadlineError::Eof) => {
                eprintln!("{}", "repl: signal: CTRL-D".bold().yellow());
                self.closed = true;
                None
            }
            Err(error) => {
                eprintln!("{}", format!("repl: error: `{:?}`", error).bold().red());
                self.closed = true;
                None
            }
        }
    }
}
