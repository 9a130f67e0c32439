use crate::error::Error;
use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::error;

const NOTE_EXTENSION: &str = ".md";

/// Storage holding the notes, documents are addressed by their vault relative path
pub trait DocumentStore {
    /// Full text of `id`, `Error::NotFound` when there is no such document
    fn read(&self, id: &str) -> Result<String>;

    fn write(&mut self, id: &str, text: &str) -> Result<()>;

    /// Names of the documents directly inside `folder`, note extension removed
    fn list(&self, folder: &str) -> Result<Vec<String>>;
}

fn note_name(file_name: &str) -> String {
    file_name
        .strip_suffix(NOTE_EXTENSION)
        .unwrap_or(file_name)
        .to_owned()
}

/// Notes stored as files under a root directory
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, id: &str) -> Result<PathBuf> {
        let relative = Path::new(id);
        if relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        {
            Ok(self.root.join(relative))
        } else {
            Err(Error::InvalidId(id.to_owned()))
        }
    }
}

impl DocumentStore for FsVault {
    fn read(&self, id: &str) -> Result<String> {
        let path = self.resolve(id)?;
        if !path.is_file() {
            return Err(Error::NotFound(id.to_owned()));
        }
        Ok(fs::read_to_string(path)?)
    }

    fn write(&mut self, id: &str, text: &str) -> Result<()> {
        let path = self.resolve(id)?;
        fs::write(&path, text)?;
        debug!("Wrote {} bytes to `{:?}`", text.len(), path);
        Ok(())
    }

    fn list(&self, folder: &str) -> Result<Vec<String>> {
        let path = self.resolve(folder)?;
        if !path.is_dir() {
            error!("Folder not found or is not a valid folder: `{}`", folder);
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(note_name(&entry.file_name().to_string_lossy()));
            }
        }
        names.sort_unstable();
        Ok(names)
    }
}

/// Notes kept in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryVault {
    docs: BTreeMap<String, String>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, id: &str, text: &str) -> Self {
        self.docs.insert(id.to_owned(), text.to_owned());
        self
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.docs.get(id).map(String::as_str)
    }
}

impl DocumentStore for MemoryVault {
    fn read(&self, id: &str) -> Result<String> {
        self.get(id)
            .map(str::to_owned)
            .ok_or_else(|| Error::NotFound(id.to_owned()))
    }

    fn write(&mut self, id: &str, text: &str) -> Result<()> {
        self.docs.insert(id.to_owned(), text.to_owned());
        Ok(())
    }

    fn list(&self, folder: &str) -> Result<Vec<String>> {
        let prefix = if folder.is_empty() {
            String::new()
        } else {
            format!("{}/", folder.trim_end_matches('/'))
        };
        let mut found = false;
        let mut names = Vec::new();
        for id in self.docs.keys() {
            if let Some(rest) = id.strip_prefix(&prefix) {
                found = true;
                if !rest.contains('/') {
                    names.push(note_name(rest));
                }
            }
        }
        if !found {
            error!("Folder not found or is not a valid folder: `{}`", folder);
        }
        Ok(names)
    }
}
