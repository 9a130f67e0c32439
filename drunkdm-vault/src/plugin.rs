use crate::error::Error;
use crate::error::Result;
use crate::prompt::UserPrompt;
use crate::settings::Settings;
use crate::store::DocumentStore;
use drunkdm_lib::RollResult;
use drunkdm_lib::Solver;
use drunkdm_lib::Source;
use tracing::debug;
use tracing::error;
use tracing::info;

/// Question asked before each roll
pub const DICE_PROMPT: &str = "Enter Dice Roll (e.g., 1d6, 2d10)";

/// What happened to the note after a roll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteStatus {
    Appended(String),
    NotFound(String),
}

/// A roll and the line recorded for it
#[derive(Debug, Clone)]
pub struct Rolled {
    pub solver: Solver,
    pub result: RollResult,
    pub line: String,
    pub note: NoteStatus,
}

impl Rolled {
    /// Short message for the user
    pub fn notice(&self) -> String {
        format!(
            "Rolled {}: {}",
            self.result.expression(),
            self.result.get_total()
        )
    }
}

/// Rolls dice on request and keeps a log of them in the current note
pub struct DrunkDm<S: DocumentStore> {
    settings: Settings,
    store: S,
}

impl<S: DocumentStore> DrunkDm<S> {
    pub fn new(settings: Settings, store: S) -> Self {
        info!("Loading Drunk DM, rolls go to `{}`", settings.note_path());
        Self { settings, store }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Change the note receiving the rolls, the caller persists the settings
    pub fn set_current_file(&mut self, name: &str) {
        let name = name.trim();
        let name = name.strip_suffix(".md").unwrap_or(name);
        info!("Current File setting changed: `{}`", name);
        self.settings.current_file = name.to_owned();
    }

    pub fn roll<R: Source>(&self, input: &str, source: &mut R) -> Result<(Solver, RollResult)> {
        debug!("Rolling dice `{}`", input);
        let solver = Solver::new(input)?;
        let result = solver.solve_with_source(source)?;
        debug!("Roll result `{}`", result);
        Ok((solver, result))
    }

    /// Append `content` as a new line of the current note
    pub fn append(&mut self, content: &str) -> Result<NoteStatus> {
        let path = self.settings.note_path();
        match self.store.read(&path) {
            Ok(data) => {
                self.store.write(&path, &format!("{data}\n{content}"))?;
                info!("Content added to file `{}`", path);
                Ok(NoteStatus::Appended(path))
            }
            Err(Error::NotFound(_)) => {
                error!("File not found `{}`", path);
                Ok(NoteStatus::NotFound(path))
            }
            Err(error) => Err(error),
        }
    }

    /// Roll `input` and record the outcome in the current note
    pub fn roll_and_record<R: Source>(&mut self, input: &str, source: &mut R) -> Result<Rolled> {
        let (solver, result) = self.roll(input, source)?;
        let line = Self::format_line(&solver, &result);
        let note = self.append(&line)?;
        Ok(Rolled {
            solver,
            result,
            line,
            note,
        })
    }

    /// Ask for a dice expression, a cancelled or blank answer rolls nothing
    pub fn prompt_and_roll<P: UserPrompt, R: Source>(
        &mut self,
        prompt: &mut P,
        source: &mut R,
    ) -> Result<Option<Rolled>> {
        match prompt.ask(DICE_PROMPT) {
            Some(input) if !input.trim().is_empty() => {
                self.roll_and_record(&input, source).map(Some)
            }
            _ => {
                debug!("Dice prompt cancelled");
                Ok(None)
            }
        }
    }

    /// Flat listing of the notes of `folder`
    pub fn list_notes(&self, folder: &str) -> Result<Vec<String>> {
        self.store.list(folder)
    }

    fn format_line(solver: &Solver, result: &RollResult) -> String {
        match solver.reason() {
            Some(reason) => format!(
                "Rolled {} for {}: {} ({})",
                result.expression(),
                reason,
                result.get_total(),
                result.breakdown()
            ),
            None => format!(
                "Rolled {}: {} ({})",
                result.expression(),
                result.get_total(),
                result.breakdown()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DrunkDm;
    use super::NoteStatus;
    use super::DICE_PROMPT;
    use crate::error::Error;
    use crate::prompt::UserPrompt;
    use crate::settings::Settings;
    use crate::store::MemoryVault;
    use drunkdm_lib::ScriptedSource;

    struct Answers {
        answers: Vec<Option<&'static str>>,
        asked: Vec<String>,
    }

    impl UserPrompt for Answers {
        fn ask(&mut self, label: &str) -> Option<String> {
            self.asked.push(label.to_owned());
            self.answers.remove(0).map(str::to_owned)
        }
    }

    fn answers(answers: Vec<Option<&'static str>>) -> Answers {
        Answers {
            answers,
            asked: Vec::new(),
        }
    }

    fn dm() -> DrunkDm<MemoryVault> {
        DrunkDm::new(
            Settings::default(),
            MemoryVault::new().with("session.md", "# Session 1"),
        )
    }

    #[test]
    fn roll_is_appended_to_current_note() {
        let mut dm = dm();
        let rolled = dm
            .roll_and_record("2d6+1", &mut ScriptedSource::new(vec![3, 5]))
            .unwrap();
        assert_eq!("Rolled 2d6+1: 9", rolled.notice());
        assert_eq!("Rolled 2d6+1: 9 (2d6: [3, 5] (+1))", rolled.line);
        assert_eq!(NoteStatus::Appended("session.md".to_owned()), rolled.note);
        assert_eq!(
            Some("# Session 1\nRolled 2d6+1: 9 (2d6: [3, 5] (+1))"),
            dm.store().get("session.md")
        );
    }

    #[test]
    fn successive_rolls_stack_up() {
        let mut dm = dm();
        let mut source = ScriptedSource::new(vec![4, 20]);
        dm.roll_and_record("1d6", &mut source).unwrap();
        dm.roll_and_record("d20 : initiative", &mut source).unwrap();
        assert_eq!(
            Some("# Session 1\nRolled 1d6: 4 (1d6: [4])\nRolled 1d20 for initiative: 20 (1d20: [20])"),
            dm.store().get("session.md")
        );
    }

    #[test]
    fn missing_note_still_rolls() {
        let mut dm = DrunkDm::new(Settings::default(), MemoryVault::new());
        let rolled = dm
            .roll_and_record("1d6", &mut ScriptedSource::new(vec![2]))
            .unwrap();
        assert_eq!(2, rolled.result.get_total());
        assert_eq!(NoteStatus::NotFound("session.md".to_owned()), rolled.note);
        assert_eq!(None, dm.store().get("session.md"));
    }

    #[test]
    fn malformed_roll_writes_nothing() {
        let mut dm = dm();
        let error = dm
            .roll_and_record("2d6x", &mut ScriptedSource::new(vec![]))
            .unwrap_err();
        assert!(matches!(error, Error::Roll(ref e) if e.is_parse()));
        assert_eq!(Some("# Session 1"), dm.store().get("session.md"));
    }

    #[test]
    fn prompt_drives_the_roll() {
        let mut dm = dm();
        let mut prompt = answers(vec![Some("1d20"), None, Some("  ")]);
        let mut source = ScriptedSource::new(vec![11]);
        let rolled = dm.prompt_and_roll(&mut prompt, &mut source).unwrap();
        assert_eq!(11, rolled.unwrap().result.get_total());
        assert!(dm.prompt_and_roll(&mut prompt, &mut source).unwrap().is_none());
        assert!(dm.prompt_and_roll(&mut prompt, &mut source).unwrap().is_none());
        assert_eq!(vec![DICE_PROMPT; 3], prompt.asked);
        assert_eq!(0, source.remaining());
    }

    #[test]
    fn current_file_can_be_changed() {
        let mut dm = DrunkDm::new(
            Settings::default(),
            MemoryVault::new().with("campaign/session 2.md", ""),
        );
        dm.set_current_file(" campaign/session 2.md ");
        assert_eq!("campaign/session 2", dm.settings().current_file);
        dm.roll_and_record("1d4", &mut ScriptedSource::new(vec![1]))
            .unwrap();
        assert_eq!(
            Some("\nRolled 1d4: 1 (1d4: [1])"),
            dm.store().get("campaign/session 2.md")
        );
    }

    #[test]
    fn lists_notes() {
        let dm = DrunkDm::new(
            Settings::default(),
            MemoryVault::new()
                .with("campaign/goblins.md", "")
                .with("campaign/dragons.md", ""),
        );
        assert_eq!(vec!["dragons", "goblins"], dm.list_notes("campaign").unwrap());
    }
}
