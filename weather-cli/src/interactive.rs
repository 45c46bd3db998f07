//! Welcome screen followed by a search/list/detail loop.

use std::fmt;

use anyhow::Result;
use inquire::{
    CustomUserError, InquireError, Select, Text,
    autocompletion::{Autocomplete, Replacement},
};
use myweather_core::{MAJOR_CITIES, WeatherReading, filter_cities};

use crate::{cli::Session, cli::report, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Search,
    Open,
    Delete,
    Quit,
}

impl MenuItem {
    fn all(has_entries: bool) -> Vec<MenuItem> {
        if has_entries {
            vec![MenuItem::Search, MenuItem::Open, MenuItem::Delete, MenuItem::Quit]
        } else {
            vec![MenuItem::Search, MenuItem::Quit]
        }
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuItem::Search => "Search for a city...",
            MenuItem::Open => "Open a saved entry",
            MenuItem::Delete => "Delete a saved entry",
            MenuItem::Quit => "Quit",
        })
    }
}

/// Offers up to three city names while typing.
#[derive(Debug, Clone, Default)]
struct CitySuggester;

impl Autocomplete for CitySuggester {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        Ok(filter_cities(input, MAJOR_CITIES)
            .into_iter()
            .map(|c| c.label.to_string())
            .collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

struct EntryChoice<'a> {
    position: usize,
    reading: &'a WeatherReading,
}

impl fmt::Display for EntryChoice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render::list_line(self.position, self.reading))
    }
}

/// `Ok(None)` when the user backs out with Esc or Ctrl-C.
fn optional<T>(answer: Result<Option<T>, InquireError>) -> Result<Option<T>> {
    match answer {
        Ok(value) => Ok(value),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn pick_entry(session: &Session, prompt: &str) -> Result<Option<String>> {
    let choices: Vec<EntryChoice<'_>> = session
        .entries()
        .iter()
        .enumerate()
        .map(|(i, reading)| EntryChoice {
            position: i + 1,
            reading,
        })
        .collect();

    Ok(optional(Select::new(prompt, choices).prompt_skippable())?
        .map(|choice| choice.reading.id.clone()))
}

pub async fn run(session: &mut Session) -> Result<()> {
    render::welcome();

    loop {
        render::entry_list(session.entries());
        println!();

        let menu = MenuItem::all(!session.entries().is_empty());
        let Some(item) = optional(Select::new("What next?", menu).prompt_skippable())? else {
            break;
        };

        match item {
            MenuItem::Search => {
                let answer = Text::new("City:")
                    .with_placeholder("Search for a city...")
                    .with_autocomplete(CitySuggester)
                    .prompt_skippable();
                let Some(term) = optional(answer)? else {
                    continue;
                };

                session.set_search_term(&term);
                let outcome = session.submit().await;
                report(session, outcome);
            }
            MenuItem::Open => {
                if let Some(id) = pick_entry(session, "Open which entry?")? {
                    if let Some(reading) = session.entry(&id) {
                        render::entry_detail(reading);
                    }
                }
            }
            MenuItem::Delete => {
                if let Some(id) = pick_entry(session, "Delete which entry?")? {
                    // A failed write is logged by the session; the list stays as it was.
                    session.delete(&id);
                }
            }
            MenuItem::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggester_offers_at_most_three_labels() {
        let mut s = CitySuggester;
        let got = s.get_suggestions("san").unwrap();
        assert_eq!(got, ["San Antonio", "San Diego", "San Francisco"]);
        assert!(s.get_suggestions("").unwrap().is_empty());
    }

    #[test]
    fn menu_hides_entry_actions_when_empty() {
        assert_eq!(MenuItem::all(false), [MenuItem::Search, MenuItem::Quit]);
        assert_eq!(MenuItem::all(true).len(), 4);
    }
}
