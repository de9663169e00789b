use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use risiko_engine::capability::Log;

pub const COUNTER_FILE: &str = "game_counter.txt";

/// Game journals as plain text files in one directory. Every line gets a
/// local timestamp.
#[derive(Debug, Clone)]
pub struct FileLog {
    dir: PathBuf,
    active: Option<String>,
}

impl FileLog {
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, active: None })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }
}

fn stamp(time: DateTime<Local>, text: &str) -> String {
    let prefix = time.format("[%Y-%m-%d %H:%M:%S]");
    text.lines().map(|line| format!("{prefix} {line}\n")).collect()
}

impl Log for FileLog {
    fn append(&mut self, text: &str) -> io::Result<()> {
        let name = self
            .active
            .as_deref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no active log"))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.dir.join(name))?;
        file.write_all(stamp(Local::now(), text).as_bytes())
    }

    fn set_active_log(&mut self, name: &str) {
        self.active = Some(name.to_owned());
    }

    fn rename(&mut self, old: &str, new: &str) -> io::Result<()> {
        if old == new {
            return Ok(());
        }
        fs::rename(self.dir.join(old), self.dir.join(new))
    }
}

/// Names the journal of a new game `game_<n>_<dd-mm-yyyy>.log`, bumping the
/// counter kept in the logs directory.
pub fn next_game_log_name(dir: &Path) -> String {
    let n = match bump_counter(&dir.join(COUNTER_FILE)) {
        Ok(n) => n,
        Err(err) => {
            tracing::warn!(%err, "could not update the game counter");
            1
        }
    };
    format!("game_{n}_{}.log", Local::now().format("%d-%m-%Y"))
}

fn bump_counter(path: &Path) -> io::Result<u64> {
    let previous = match fs::read_to_string(path) {
        Ok(text) => text.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(path = %path.display(), "game counter is not a number, restarting");
            0
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => 0,
        Err(err) => return Err(err),
    };
    let next = previous + 1;
    fs::write(path, next.to_string())?;
    Ok(next)
}
