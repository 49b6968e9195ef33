use serde::{Deserialize, Serialize};

/// One of the three geographic clusters the map is anchored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Santiago,
    Valparaiso,
    Concepcion,
}

impl City {
    pub const ALL: [City; 3] = [City::Santiago, City::Valparaiso, City::Concepcion];

    /// Where unmatched free text lands.
    pub const FALLBACK: City = City::Santiago;

    pub fn index(self) -> usize {
        match self {
            City::Santiago => 0,
            City::Valparaiso => 1,
            City::Concepcion => 2,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            City::Santiago => "santiago",
            City::Valparaiso => "valparaiso",
            City::Concepcion => "concepcion",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            City::Santiago => "Santiago",
            City::Valparaiso => "Valparaíso",
            City::Concepcion => "Concepción",
        }
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            City::Santiago => &["santiago", "stgo", "metropolitana", "rm"],
            City::Valparaiso => &["valparaiso", "valparaíso", "viña", "vina", "valpo"],
            City::Concepcion => &["concepcion", "concepción", "biobio", "biobío", "talcahuano"],
        }
    }
}

/// Maps free-text location to a canonical city. Total: never fails.
pub fn normalize(raw: &str) -> City {
    let text = raw.trim().to_lowercase();
    if !text.is_empty() {
        // Non-fallback cities are checked first so "Viña, RM" style noise
        // resolves to the more specific match.
        for city in [City::Valparaiso, City::Concepcion, City::Santiago] {
            if city.keywords().iter().any(|kw| matches_keyword(&text, kw)) {
                return city;
            }
        }
    }
    tracing::debug!(raw, fallback = City::FALLBACK.slug(), "unresolved city text");
    City::FALLBACK
}

fn matches_keyword(text: &str, kw: &str) -> bool {
    // Two-letter abbreviations only count as whole words ("rm" must not hit "firma").
    if kw.chars().count() <= 2 {
        text.split(|c: char| !c.is_alphanumeric()).any(|word| word == kw)
    } else {
        text.contains(kw)
    }
}
