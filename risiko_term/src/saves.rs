use std::{
    fs, io,
    path::{Path, PathBuf},
};

use risiko_engine::{capability::Persistence, error::PersistenceError, state::GameSession};

pub const SAVE_EXTENSION: &str = "save";

/// One pretty-printed JSON file per saved session, named `<name>.save`.
#[derive(Debug, Clone)]
pub struct JsonSaves {
    dir: PathBuf,
}

impl JsonSaves {
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save names are plain file stems inside the saves directory.
    fn path(&self, name: &str) -> io::Result<PathBuf> {
        if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{name:?} is not a valid save name"),
            ));
        }
        Ok(self.dir.join(format!("{name}.{SAVE_EXTENSION}")))
    }
}

/// Drops a trailing `.save` typed by the player.
pub fn save_name(input: &str) -> &str {
    let input = input.trim();
    input
        .strip_suffix(&format!(".{SAVE_EXTENSION}"))
        .unwrap_or(input)
}

impl Persistence for JsonSaves {
    fn save(&mut self, session: &GameSession, name: &str) -> Result<(), PersistenceError> {
        let path = self.path(name)?;
        fs::write(&path, session.encode()?)?;
        tracing::debug!(path = %path.display(), "wrote save file");
        Ok(())
    }

    fn load(&mut self, name: &str) -> Result<GameSession, PersistenceError> {
        let path = self.path(name)?;
        let blob = match fs::read_to_string(&path) {
            Ok(blob) => blob,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound(name.to_owned()))
            }
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(path = %path.display(), "read save file");
        GameSession::decode(&blob)
    }

    fn list_saves(&self) -> Result<Vec<String>, PersistenceError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some(SAVE_EXTENSION)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
