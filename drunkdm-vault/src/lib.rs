pub mod error;
pub mod plugin;
pub mod prompt;
pub mod settings;
pub mod store;

pub use plugin::DrunkDm;
pub use plugin::NoteStatus;
pub use plugin::Rolled;
pub use settings::Settings;
