//! Everything the engine needs from the outside world.
//!
//! The engine never touches a terminal or a file system directly. Front ends
//! implement these traits; [`memory`] holds in-memory versions for tests and
//! headless play.

use std::io;

use thiserror::Error;

use crate::{error::PersistenceError, state::GameSession};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("input stream closed")]
pub struct InputClosed;

pub trait Input {
    /// Reads until a line parses as an integer.
    fn read_int(&mut self) -> Result<i64, InputClosed>;

    /// Reads until a line parses as one of `allowed`.
    fn read_int_among(&mut self, allowed: &[i64]) -> Result<i64, InputClosed>;

    /// Reads until a non-blank line arrives, returned trimmed.
    fn read_line(&mut self) -> Result<String, InputClosed>;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Style {
    Plain,
    Title,
    Info,
    Prompt,
    Success,
    Warning,
    Error,
}

pub trait Output {
    fn emit(&mut self, text: &str, style: Style);
}

pub trait Persistence {
    fn save(&mut self, session: &GameSession, name: &str) -> Result<(), PersistenceError>;
    fn load(&mut self, name: &str) -> Result<GameSession, PersistenceError>;
    fn list_saves(&self) -> Result<Vec<String>, PersistenceError>;
}

/// Append-only game journal. Failures are reported to the caller, which
/// logs them and carries on.
pub trait Log {
    fn append(&mut self, text: &str) -> io::Result<()>;
    fn set_active_log(&mut self, name: &str);
    fn rename(&mut self, old: &str, new: &str) -> io::Result<()>;
}

pub struct Capabilities {
    pub input: Box<dyn Input>,
    pub output: Box<dyn Output>,
    pub persistence: Box<dyn Persistence>,
    pub log: Box<dyn Log>,
}

impl Capabilities {
    pub fn new(
        input: impl Input + 'static,
        output: impl Output + 'static,
        persistence: impl Persistence + 'static,
        log: impl Log + 'static,
    ) -> Self {
        Self {
            input: Box::new(input),
            output: Box::new(output),
            persistence: Box::new(persistence),
            log: Box::new(log),
        }
    }

    pub fn emit(&mut self, style: Style, text: impl AsRef<str>) {
        self.output.emit(text.as_ref(), style);
    }

    pub fn journal(&mut self, text: &str) {
        if let Err(err) = self.log.append(text) {
            tracing::warn!(%err, "could not append to the game log");
        }
    }

    pub fn rename_log(&mut self, old: &str, new: &str) {
        if let Err(err) = self.log.rename(old, new) {
            tracing::warn!(%err, old, new, "could not rename the game log");
        }
    }
}

pub mod memory {
    use std::{
        cell::RefCell,
        collections::{BTreeMap, VecDeque},
        io,
        rc::Rc,
    };

    use super::{Input, InputClosed, Log, Output, Persistence, Style};
    use crate::{error::PersistenceError, state::GameSession};

    /// Replays a fixed list of input lines, skipping lines that would be
    /// rejected just like a person retyping would.
    #[derive(Debug, Default)]
    pub struct ScriptedInput {
        lines: VecDeque<String>,
    }

    impl ScriptedInput {
        pub fn new<I, S>(lines: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                lines: lines.into_iter().map(Into::into).collect(),
            }
        }

        pub fn remaining(&self) -> usize {
            self.lines.len()
        }

        fn next(&mut self) -> Result<String, InputClosed> {
            self.lines.pop_front().ok_or(InputClosed)
        }
    }

    impl Input for ScriptedInput {
        fn read_int(&mut self) -> Result<i64, InputClosed> {
            loop {
                if let Ok(value) = self.next()?.trim().parse() {
                    return Ok(value);
                }
            }
        }

        fn read_int_among(&mut self, allowed: &[i64]) -> Result<i64, InputClosed> {
            loop {
                let value = self.read_int()?;
                if allowed.contains(&value) {
                    return Ok(value);
                }
            }
        }

        fn read_line(&mut self) -> Result<String, InputClosed> {
            loop {
                let line = self.next()?;
                let line = line.trim();
                if !line.is_empty() {
                    return Ok(line.to_owned());
                }
            }
        }
    }

    #[derive(Clone, Debug, Default)]
    pub struct RecordingOutput {
        lines: Rc<RefCell<Vec<(Style, String)>>>,
    }

    impl RecordingOutput {
        pub fn lines(&self) -> Vec<String> {
            self.lines.borrow().iter().map(|(_, l)| l.clone()).collect()
        }

        pub fn styled(&self, style: Style) -> Vec<String> {
            self.lines
                .borrow()
                .iter()
                .filter(|(s, _)| *s == style)
                .map(|(_, l)| l.clone())
                .collect()
        }

        pub fn contains(&self, needle: &str) -> bool {
            self.lines.borrow().iter().any(|(_, l)| l.contains(needle))
        }
    }

    impl Output for RecordingOutput {
        fn emit(&mut self, text: &str, style: Style) {
            self.lines.borrow_mut().push((style, text.to_owned()));
        }
    }

    /// Keeps saves as encoded documents so loading goes through the same
    /// decoding as a file would.
    #[derive(Clone, Debug, Default)]
    pub struct MemorySaves {
        saves: Rc<RefCell<BTreeMap<String, String>>>,
    }

    impl MemorySaves {
        pub fn insert_raw(&self, name: &str, blob: &str) {
            self.saves
                .borrow_mut()
                .insert(name.to_owned(), blob.to_owned());
        }

        pub fn raw(&self, name: &str) -> Option<String> {
            self.saves.borrow().get(name).cloned()
        }
    }

    impl Persistence for MemorySaves {
        fn save(&mut self, session: &GameSession, name: &str) -> Result<(), PersistenceError> {
            let blob = session.encode()?;
            self.saves.borrow_mut().insert(name.to_owned(), blob);
            Ok(())
        }

        fn load(&mut self, name: &str) -> Result<GameSession, PersistenceError> {
            let saves = self.saves.borrow();
            let blob = saves
                .get(name)
                .ok_or_else(|| PersistenceError::NotFound(name.to_owned()))?;
            GameSession::decode(blob)
        }

        fn list_saves(&self) -> Result<Vec<String>, PersistenceError> {
            Ok(self.saves.borrow().keys().cloned().collect())
        }
    }

    #[derive(Debug, Default)]
    struct LogBook {
        active: Option<String>,
        logs: BTreeMap<String, Vec<String>>,
    }

    #[derive(Clone, Debug, Default)]
    pub struct MemoryLog {
        book: Rc<RefCell<LogBook>>,
    }

    impl MemoryLog {
        pub fn active(&self) -> Option<String> {
            self.book.borrow().active.clone()
        }

        pub fn entries(&self, name: &str) -> Vec<String> {
            self.book
                .borrow()
                .logs
                .get(name)
                .cloned()
                .unwrap_or_default()
        }

        pub fn active_entries(&self) -> Vec<String> {
            self.active()
                .map(|name| self.entries(&name))
                .unwrap_or_default()
        }
    }

    impl Log for MemoryLog {
        fn append(&mut self, text: &str) -> io::Result<()> {
            let mut book = self.book.borrow_mut();
            let LogBook { active, logs } = &mut *book;
            let active = active
                .as_ref()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no active log"))?;
            logs.entry(active.clone())
                .or_default()
                .extend(text.lines().map(str::to_owned));
            Ok(())
        }

        fn set_active_log(&mut self, name: &str) {
            self.book.borrow_mut().active = Some(name.to_owned());
        }

        fn rename(&mut self, old: &str, new: &str) -> io::Result<()> {
            let mut book = self.book.borrow_mut();
            let entries = book.logs.remove(old).ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no log named {old}"))
            })?;
            book.logs.insert(new.to_owned(), entries);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::*;
    use super::*;

    #[test]
    fn test_scripted_input_skips_rejected_lines() {
        let mut input = ScriptedInput::new(["x", "9", "", "2", "  ", " hello "]);
        assert_eq!(input.read_int_among(&[1, 2, 3]), Ok(2));
        assert_eq!(input.read_line(), Ok("hello".to_owned()));
        assert_eq!(input.read_int(), Err(InputClosed));
    }

    #[test]
    fn test_memory_log_rename_moves_entries() {
        let mut log = MemoryLog::default();
        assert!(log.append("lost").is_err());

        log.set_active_log("a.log");
        log.append("first\nsecond").unwrap();
        log.rename("a.log", "b.log").unwrap();
        log.set_active_log("b.log");
        log.append("third").unwrap();

        assert!(log.entries("a.log").is_empty());
        assert_eq!(log.entries("b.log"), ["first", "second", "third"]);
        assert!(log.rename("missing.log", "x.log").is_err());
    }

    #[test]
    fn test_recording_output_is_shared_between_clones() {
        let output = RecordingOutput::default();
        let mut writer = output.clone();
        writer.emit("hello", Style::Warning);
        assert!(output.contains("hell"));
        assert_eq!(output.styled(Style::Warning), ["hello"]);
        assert!(output.styled(Style::Error).is_empty());
    }
}
