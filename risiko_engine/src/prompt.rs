//! Numbered-menu prompts built on [`Input`](crate::capability::Input).

use risiko_shared::map::TerritoryId;

use crate::{
    capability::{Capabilities, InputClosed, Style},
    state::GameSession,
};

impl Capabilities {
    /// Shows `options` numbered from 1 and returns the zero-based choice.
    pub fn choose(&mut self, title: &str, options: &[String]) -> Result<usize, InputClosed> {
        self.list(title, options);
        let allowed: Vec<i64> = (1..=options.len() as i64).collect();
        let choice = self.input.read_int_among(&allowed)?;
        Ok(choice as usize - 1)
    }

    /// Like [`Capabilities::choose`] with an extra `0` entry that backs out.
    pub fn choose_or_back(
        &mut self,
        title: &str,
        options: &[String],
    ) -> Result<Option<usize>, InputClosed> {
        self.list(title, options);
        self.emit(Style::Plain, "0. Back");
        let allowed: Vec<i64> = (0..=options.len() as i64).collect();
        let choice = self.input.read_int_among(&allowed)?;
        Ok((choice > 0).then(|| choice as usize - 1))
    }

    pub fn choose_number(&mut self, title: &str, min: u32, max: u32) -> Result<u32, InputClosed> {
        self.emit(Style::Prompt, format!("{title} ({min}-{max})"));
        loop {
            let value = self.input.read_int()?;
            match u32::try_from(value) {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                _ => self.emit(
                    Style::Warning,
                    format!("Enter a number between {min} and {max}."),
                ),
            }
        }
    }

    pub fn confirm(&mut self, question: &str) -> Result<bool, InputClosed> {
        self.emit(Style::Prompt, format!("{question} (y/n)"));
        loop {
            match self.input.read_line()?.to_lowercase().as_str() {
                "y" | "yes" | "s" | "si" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.emit(Style::Warning, "Answer y or n."),
            }
        }
    }

    pub fn ask(&mut self, question: &str) -> Result<String, InputClosed> {
        self.emit(Style::Prompt, question);
        self.input.read_line()
    }

    pub fn choose_territory(
        &mut self,
        session: &GameSession,
        title: &str,
        options: &[TerritoryId],
    ) -> Result<TerritoryId, InputClosed> {
        let labels = territory_labels(session, options);
        Ok(options[self.choose(title, &labels)?])
    }

    pub fn choose_territory_or_back(
        &mut self,
        session: &GameSession,
        title: &str,
        options: &[TerritoryId],
    ) -> Result<Option<TerritoryId>, InputClosed> {
        let labels = territory_labels(session, options);
        Ok(self.choose_or_back(title, &labels)?.map(|i| options[i]))
    }

    fn list(&mut self, title: &str, options: &[String]) {
        self.emit(Style::Prompt, title);
        for (i, option) in options.iter().enumerate() {
            self.emit(Style::Plain, format!("{}. {option}", i + 1));
        }
    }
}

pub fn territory_labels(session: &GameSession, territories: &[TerritoryId]) -> Vec<String> {
    territories
        .iter()
        .map(|&id| {
            let territory = session.map().territory(id);
            format!("{} ({} armies)", territory.name(), territory.troops())
        })
        .collect()
}
