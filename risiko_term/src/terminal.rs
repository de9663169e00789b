use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crossterm::style::Stylize;
use risiko_engine::capability::{Input, InputClosed, Output, Style};

/// Line-oriented input. Invalid lines are reported on the paired writer and
/// read again; end of stream is [`InputClosed`].
pub struct TerminalInput<R, W> {
    reader: R,
    writer: W,
}

impl TerminalInput<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn next_line(&mut self) -> Result<String, InputClosed> {
        // Prompts may not end in a newline.
        if let Err(err) = write!(self.writer, "> ").and_then(|()| self.writer.flush()) {
            tracing::warn!(%err, "could not write to the terminal");
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Err(InputClosed),
            Ok(_) => Ok(line.trim().to_owned()),
            Err(err) => {
                tracing::warn!(%err, "could not read from the terminal");
                Err(InputClosed)
            }
        }
    }

    fn complain(&mut self, text: &str) {
        if let Err(err) = writeln!(self.writer, "{text}") {
            tracing::warn!(%err, "could not write to the terminal");
        }
    }
}

impl<R: BufRead, W: Write> Input for TerminalInput<R, W> {
    fn read_int(&mut self) -> Result<i64, InputClosed> {
        loop {
            match self.next_line()?.parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.complain("Invalid input. Enter a number."),
            }
        }
    }

    fn read_int_among(&mut self, allowed: &[i64]) -> Result<i64, InputClosed> {
        loop {
            let value = self.read_int()?;
            if allowed.contains(&value) {
                return Ok(value);
            }
            let options: Vec<String> = allowed.iter().map(i64::to_string).collect();
            self.complain(&format!(
                "Invalid choice. Enter one of: {}.",
                options.join(", ")
            ));
        }
    }

    fn read_line(&mut self) -> Result<String, InputClosed> {
        loop {
            let line = self.next_line()?;
            if !line.is_empty() {
                return Ok(line);
            }
            self.complain("Invalid input. Enter some text.");
        }
    }
}

pub struct TerminalOutput<W> {
    writer: W,
    plain: bool,
}

impl TerminalOutput<Stdout> {
    pub fn stdout(plain: bool) -> Self {
        Self::new(io::stdout(), plain)
    }
}

impl<W: Write> TerminalOutput<W> {
    pub fn new(writer: W, plain: bool) -> Self {
        Self { writer, plain }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&self, text: &str, style: Style) -> String {
        if self.plain {
            return match style {
                Style::Title => format!("\n== {text} =="),
                _ => text.to_owned(),
            };
        }
        match style {
            Style::Plain => text.to_owned(),
            Style::Title => format!("\n{}", text.bold().underlined()),
            Style::Info => text.cyan().to_string(),
            Style::Prompt => text.bold().to_string(),
            Style::Success => text.green().to_string(),
            Style::Warning => text.yellow().to_string(),
            Style::Error => text.red().bold().to_string(),
        }
    }
}

impl<W: Write> Output for TerminalOutput<W> {
    fn emit(&mut self, text: &str, style: Style) {
        let rendered = self.render(text, style);
        if let Err(err) = writeln!(self.writer, "{rendered}").and_then(|()| self.writer.flush()) {
            tracing::warn!(%err, "could not write to the terminal");
        }
    }
}
