use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, PasswordDisplayMode, Select};
use myweather_core::{
    AppState, Config, EntryStore, FileStorage, KeyValueStorage, MAJOR_CITIES, ReadingDetail,
    SubmitOutcome, UnitSystem, WeatherProvider, WeatherReading, client_from_config, filter_cities,
};

use crate::{interactive, render};

/// App state wired to the configured provider and on-disk entries.
pub type Session = AppState<Box<dyn WeatherProvider>, FileStorage>;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "myweather",
    version,
    about = "Look up, save and revisit the weather in your cities"
)]
pub struct Cli {
    /// Unit system for this run: imperial, metric or standard. Defaults to the configured one.
    #[arg(long, global = true)]
    pub units: Option<UnitSystem>,

    /// Without a subcommand the interactive screen starts.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the API key, unit system and how much detail saved entries keep.
    Configure,

    /// Suggest up to three known cities matching a partial name.
    Search {
        query: String,
    },

    /// Fetch the current weather for a city and save it.
    Add {
        city: String,
    },

    /// List saved entries.
    List,

    /// Show one saved entry in detail.
    Show {
        /// Entry id, or its 1-based position in `list`.
        entry: String,
    },

    /// Delete a saved entry.
    Remove {
        /// Entry id, or its 1-based position in `list`.
        entry: String,
    },

    /// Delete every saved entry.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// Welcome screen followed by the search-and-save loop.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;
        let units = self.units.unwrap_or(config.units);

        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(config)?,
            Command::Search { query } => {
                render::suggestions(&filter_cities(&query, MAJOR_CITIES));
            }
            Command::Add { city } => {
                let mut session = open_session(&config, units)?;
                session.set_search_term(&city);
                let outcome = session.submit().await;
                report(&session, outcome);
            }
            Command::List => {
                let store = open_store(&config)?;
                render::entry_list(store.entries());
            }
            Command::Show { entry } => {
                let store = open_store(&config)?;
                let reading = resolve_entry(store.entries(), &entry)?;
                render::entry_detail(reading);
            }
            Command::Remove { entry } => {
                let mut store = open_store(&config)?;
                let id = resolve_entry(store.entries(), &entry)?.id.clone();
                if delete_saved(&mut store, &id) {
                    println!("Deleted {id}");
                }
            }
            Command::Clear { yes } => {
                let confirmed = yes
                    || Confirm::new("Delete every saved entry?")
                        .with_default(false)
                        .prompt()?;
                if confirmed && clear_saved(&mut open_store(&config)?) {
                    println!("All saved entries deleted.");
                }
            }
            Command::Interactive => {
                let mut session = open_session(&config, units)?;
                interactive::run(&mut session).await?;
            }
        }

        Ok(())
    }
}

pub fn report(session: &Session, outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::Saved(reading) => {
            println!("Saved:");
            render::entry_detail(&reading);
        }
        SubmitOutcome::NotSaved(reading) => {
            // Storage trouble is only logged; show what was fetched anyway.
            render::entry_detail(&reading);
        }
        SubmitOutcome::Failed(_) => {
            if let Some(msg) = session.error() {
                render::inline_error(msg);
            }
        }
        SubmitOutcome::Ignored => {}
    }
}

fn open_store(config: &Config) -> Result<EntryStore<FileStorage>> {
    let mut store = EntryStore::new(FileStorage::new(config.data_dir()?));
    store.load();
    Ok(store)
}

/// Storage failures are logged and never reach the terminal.
fn delete_saved<S: KeyValueStorage>(store: &mut EntryStore<S>, id: &str) -> bool {
    match store.remove(id) {
        Ok(_) => true,
        Err(err) => {
            tracing::error!(error = %err, id, "Error deleting weather entry");
            false
        }
    }
}

fn clear_saved<S: KeyValueStorage>(store: &mut EntryStore<S>) -> bool {
    match store.clear() {
        Ok(()) => true,
        Err(err) => {
            tracing::error!(error = %err, "Error clearing weather entries");
            false
        }
    }
}

fn open_session(config: &Config, units: UnitSystem) -> Result<Session> {
    let client = client_from_config(config)?;
    let mut session = AppState::new(client, open_store(config)?, units);
    session.mount();
    Ok(session)
}

/// Finds an entry by exact id, falling back to a 1-based list position.
pub fn resolve_entry<'a>(entries: &'a [WeatherReading], key: &str) -> Result<&'a WeatherReading> {
    if let Some(found) = entries.iter().find(|e| e.id == key) {
        return Ok(found);
    }

    key.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| entries.get(i))
        .ok_or_else(|| anyhow!("No saved entry '{key}'. Run `myweather list` to see them."))
}

fn configure(mut config: Config) -> Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Leave empty to keep the current key")
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    let choices = UnitSystem::all().to_vec();
    let cursor = choices.iter().position(|u| *u == config.units).unwrap_or(0);
    config.units = Select::new("Unit system:", choices)
        .with_starting_cursor(cursor)
        .prompt()?;

    let extended = Confirm::new("Keep humidity, pressure and wind speed on saved entries?")
        .with_default(config.detail == ReadingDetail::Extended)
        .prompt()?;
    config.detail = if extended {
        ReadingDetail::Extended
    } else {
        ReadingDetail::Basic
    };

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());

    if !config.is_configured() {
        println!("No API key is set yet; lookups will fail until one is configured.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use myweather_core::{MemoryStorage, PersistenceError};
    use std::io;

    /// Reads like a normal backend, refuses every write.
    #[derive(Debug, Default)]
    struct ReadOnlyStorage(MemoryStorage);

    impl KeyValueStorage for ReadOnlyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
            Err(read_only())
        }

        fn remove(&self, _key: &str) -> Result<(), PersistenceError> {
            Err(read_only())
        }
    }

    fn read_only() -> PersistenceError {
        PersistenceError::Io {
            path: "entries.json".into(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        }
    }

    fn reading(id: &str) -> WeatherReading {
        WeatherReading {
            id: id.to_string(),
            city: "Boston".into(),
            temperature: 50,
            description: "rain".into(),
            units: UnitSystem::Imperial,
            humidity: None,
            pressure: None,
            wind_speed: None,
        }
    }

    #[test]
    fn resolve_entry_by_id_or_position() {
        let entries = vec![
            reading("2024-01-01T00:00:00.000Z"),
            reading("2024-01-02T00:00:00.000Z"),
        ];

        assert_eq!(resolve_entry(&entries, "2").unwrap().id, "2024-01-02T00:00:00.000Z");
        assert_eq!(
            resolve_entry(&entries, "2024-01-01T00:00:00.000Z").unwrap().id,
            "2024-01-01T00:00:00.000Z"
        );
        assert!(resolve_entry(&entries, "0").is_err());
        assert!(resolve_entry(&entries, "3").is_err());
        assert!(resolve_entry(&entries, "nope").is_err());
    }

    #[test]
    fn write_failures_are_swallowed_and_keep_entries() {
        let seeded = MemoryStorage::new();
        EntryStore::new(&seeded)
            .append(reading("2024-01-01T00:00:00.000Z"))
            .unwrap();

        let mut store = EntryStore::new(ReadOnlyStorage(seeded));
        store.load();

        assert!(!delete_saved(&mut store, "2024-01-01T00:00:00.000Z"));
        assert!(!clear_saved(&mut store));
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn delete_and_clear_report_success() {
        let mut store = EntryStore::new(MemoryStorage::new());
        store.append(reading("2024-01-01T00:00:00.000Z")).unwrap();
        store.append(reading("2024-01-02T00:00:00.000Z")).unwrap();

        assert!(delete_saved(&mut store, "2024-01-01T00:00:00.000Z"));
        assert_eq!(store.entries().len(), 1);
        assert!(clear_saved(&mut store));
        assert!(store.entries().is_empty());
    }

    #[test]
    fn cli_parses_subcommands_and_units() {
        let cli = Cli::try_parse_from(["myweather", "--units", "metric", "add", "Boston"]).unwrap();
        assert_eq!(cli.units, Some(UnitSystem::Metric));
        assert!(matches!(cli.command, Some(Command::Add { ref city }) if city == "Boston"));

        let cli = Cli::try_parse_from(["myweather"]).unwrap();
        assert!(cli.command.is_none());

        assert!(Cli::try_parse_from(["myweather", "--units", "kelvin", "list"]).is_err());
    }
}
