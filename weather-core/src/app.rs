//! State owned by the top-level screen controller.
//!
//! The entry store is the single source of truth for saved readings; everything a
//! screen renders is read from here.

use crate::{
    cities::{City, MAJOR_CITIES, filter_cities, find_by_label},
    error::FetchError,
    model::{UnitSystem, WeatherReading},
    provider::{WeatherClient, WeatherProvider},
    storage::KeyValueStorage,
    store::EntryStore,
};

/// What became of a submitted search.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A fetch was already running, nothing was started.
    Ignored,
    /// Reading fetched and persisted.
    Saved(WeatherReading),
    /// Lookup failed; the inline error text is set.
    Failed(FetchError),
    /// Reading fetched but the store refused it; logged only.
    NotSaved(WeatherReading),
}

#[derive(Debug)]
pub struct AppState<P, S> {
    client: WeatherClient<P>,
    store: EntryStore<S>,
    units: UnitSystem,
    cities: &'static [City],
    search_term: String,
    suggestions: Vec<City>,
    error: Option<String>,
    in_flight: bool,
}

impl<P: WeatherProvider, S: KeyValueStorage> AppState<P, S> {
    pub fn new(client: WeatherClient<P>, store: EntryStore<S>, units: UnitSystem) -> Self {
        Self {
            client,
            store,
            units,
            cities: MAJOR_CITIES,
            search_term: String::new(),
            suggestions: Vec::new(),
            error: None,
            in_flight: false,
        }
    }

    /// Replace the built-in city list used for suggestions.
    pub fn with_cities(mut self, cities: &'static [City]) -> Self {
        self.cities = cities;
        self
    }

    /// Reads saved entries from storage.
    pub fn mount(&mut self) -> &[WeatherReading] {
        self.store.load()
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.suggestions = filter_cities(term, self.cities).into_iter().copied().collect();
    }

    /// Marks a fetch as running and returns the city to look up, or `None` if one is
    /// already running.
    ///
    /// A term that names one of the suggestions exactly (ignoring case) is sent with
    /// that suggestion's spelling; anything else is sent as typed.
    pub fn begin_submit(&mut self) -> Option<String> {
        let query = {
            let term = self.search_term.trim();
            let refs: Vec<&City> = self.suggestions.iter().collect();
            match find_by_label(term, &refs) {
                Some(city) => city.label.to_string(),
                None => term.to_string(),
            }
        };

        self.begin_fetch(query)
    }

    /// Picks suggestion `index`: it becomes the search term and its fetch begins.
    pub fn begin_select(&mut self, index: usize) -> Option<String> {
        if self.in_flight {
            return None;
        }
        let label = self.suggestions.get(index)?.label;

        self.search_term = label.to_string();
        self.suggestions.clear();
        self.begin_fetch(label.to_string())
    }

    fn begin_fetch(&mut self, query: String) -> Option<String> {
        if self.in_flight {
            tracing::debug!(query = %query, "fetch already in flight, ignoring submit");
            return None;
        }

        self.in_flight = true;
        Some(query)
    }

    /// Applies the result of the fetch started by [`begin_submit`](Self::begin_submit)
    /// or [`begin_select`](Self::begin_select).
    pub fn finish_fetch(&mut self, result: Result<WeatherReading, FetchError>) -> SubmitOutcome {
        self.in_flight = false;

        let reading = match result {
            Ok(reading) => reading,
            Err(err) => {
                self.error = Some(err.user_message());
                return SubmitOutcome::Failed(err);
            }
        };

        // The lookup itself succeeded, so the search screen resets either way.
        self.search_term.clear();
        self.suggestions.clear();
        self.error = None;

        match self.store.append(reading.clone()) {
            Ok(_) => SubmitOutcome::Saved(reading),
            Err(err) => {
                tracing::error!(error = %err, id = %reading.id, "Error saving weather entry");
                SubmitOutcome::NotSaved(reading)
            }
        }
    }

    /// Fetches the current search term and saves the result.
    pub async fn submit(&mut self) -> SubmitOutcome {
        match self.begin_submit() {
            Some(query) => self.run_fetch(&query).await,
            None => SubmitOutcome::Ignored,
        }
    }

    /// Fetches suggestion `index` and saves the result. `None` if there is no such suggestion.
    pub async fn select_suggestion(&mut self, index: usize) -> Option<SubmitOutcome> {
        if index >= self.suggestions.len() {
            return None;
        }

        Some(match self.begin_select(index) {
            Some(query) => self.run_fetch(&query).await,
            None => SubmitOutcome::Ignored,
        })
    }

    async fn run_fetch(&mut self, query: &str) -> SubmitOutcome {
        let result = self.client.fetch_reading(query, self.units).await;
        self.finish_fetch(result)
    }

    /// Removes a saved entry. Returns whether an entry with `id` existed and is now gone.
    pub fn delete(&mut self, id: &str) -> bool {
        if self.store.get(id).is_none() {
            return false;
        }

        match self.store.remove(id) {
            Ok(_) => {
                self.error = None;
                true
            }
            Err(err) => {
                tracing::error!(error = %err, id, "Error deleting weather entry");
                false
            }
        }
    }

    /// Deletes every saved entry. A storage failure is logged and leaves the entries in place.
    pub fn clear_entries(&mut self) -> bool {
        match self.store.clear() {
            Ok(()) => {
                self.error = None;
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "Error clearing weather entries");
                false
            }
        }
    }

    /// The reading handed to the detail screen.
    pub fn entry(&self, id: &str) -> Option<&WeatherReading> {
        self.store.get(id)
    }

    pub fn entries(&self) -> &[WeatherReading] {
        self.store.entries()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn suggestions(&self) -> &[City] {
        &self.suggestions
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight
    }
}
