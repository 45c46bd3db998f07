//! Built-in city list and the autocomplete filter over it.

/// Maximum number of suggestions returned by [`filter_cities`].
pub const SUGGESTION_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub label: &'static str,
    pub state: &'static str,
    pub value: &'static str,
}

const fn city(label: &'static str, state: &'static str, value: &'static str) -> City {
    City { label, state, value }
}

pub const MAJOR_CITIES: &[City] = &[
    city("New York", "NY", "new-york"),
    city("Los Angeles", "CA", "los-angeles"),
    city("Chicago", "IL", "chicago"),
    city("Houston", "TX", "houston"),
    city("Phoenix", "AZ", "phoenix"),
    city("Philadelphia", "PA", "philadelphia"),
    city("San Antonio", "TX", "san-antonio"),
    city("San Diego", "CA", "san-diego"),
    city("Dallas", "TX", "dallas"),
    city("San Jose", "CA", "san-jose"),
    city("Austin", "TX", "austin"),
    city("Jacksonville", "FL", "jacksonville"),
    city("Fort Worth", "TX", "fort-worth"),
    city("Columbus", "OH", "columbus"),
    city("Charlotte", "NC", "charlotte"),
    city("San Francisco", "CA", "san-francisco"),
    city("Indianapolis", "IN", "indianapolis"),
    city("Seattle", "WA", "seattle"),
    city("Denver", "CO", "denver"),
    city("Washington", "DC", "washington"),
    city("Boston", "MA", "boston"),
    city("Nashville", "TN", "nashville"),
    city("Detroit", "MI", "detroit"),
    city("Portland", "OR", "portland"),
    city("Las Vegas", "NV", "las-vegas"),
    city("Memphis", "TN", "memphis"),
    city("Louisville", "KY", "louisville"),
    city("Baltimore", "MD", "baltimore"),
    city("Milwaukee", "WI", "milwaukee"),
    city("Albuquerque", "NM", "albuquerque"),
    city("Tucson", "AZ", "tucson"),
    city("Fresno", "CA", "fresno"),
    city("Sacramento", "CA", "sacramento"),
    city("Kansas City", "MO", "kansas-city"),
    city("Atlanta", "GA", "atlanta"),
    city("Miami", "FL", "miami"),
    city("Raleigh", "NC", "raleigh"),
    city("Omaha", "NE", "omaha"),
    city("Minneapolis", "MN", "minneapolis"),
    city("Tulsa", "OK", "tulsa"),
    city("Cleveland", "OH", "cleveland"),
    city("New Orleans", "LA", "new-orleans"),
    city("Tampa", "FL", "tampa"),
    city("Pittsburgh", "PA", "pittsburgh"),
    city("Cincinnati", "OH", "cincinnati"),
    city("St. Louis", "MO", "st-louis"),
    city("Salt Lake City", "UT", "salt-lake-city"),
    city("Orlando", "FL", "orlando"),
    city("Springfield", "IL", "springfield"),
    city("Honolulu", "HI", "honolulu"),
    city("Anchorage", "AK", "anchorage"),
];

/// Cities whose label contains `query` (case-insensitive), sorted by label, at most
/// [`SUGGESTION_LIMIT`] of them. An empty query matches nothing.
pub fn filter_cities<'a>(query: &str, cities: &'a [City]) -> Vec<&'a City> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();

    let mut matches: Vec<&City> = cities
        .iter()
        .filter(|c| c.label.to_lowercase().contains(&needle))
        .collect();

    matches.sort_by(|a, b| {
        a.label
            .to_lowercase()
            .cmp(&b.label.to_lowercase())
            .then_with(|| a.label.cmp(b.label))
    });
    matches.truncate(SUGGESTION_LIMIT);
    matches
}

/// Case-insensitive exact label lookup among `cities`.
pub fn find_by_label<'a>(label: &str, cities: &[&'a City]) -> Option<&'a City> {
    cities
        .iter()
        .find(|c| c.label.eq_ignore_ascii_case(label))
        .copied()
}
