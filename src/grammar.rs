//! Semantic control grammar composition.
//!
//! A grammar is `intent(slot=value,...)`. The lookup key is the literal
//! concatenation; the display form escapes `*` so it survives markdown rendering.
//! Only [`SemanticControlGrammar::lookup_key`] may be used to query a table.

use std::fmt;

use serde::Serialize;

/// Slot constraints offered before the user edits anything.
pub const DEFAULT_SLOT_CONSTRAINTS: &str = "day.p=*,location=*";

/// Sample grammars known to have rows in the shipped tables.
pub const TEMPLATES: &[&str] = &[
    "weather.general(day.p=*,location=*)",
    "weather.humidity(day.p=*,location=서울,ti_range.p=점심)",
    "weather.humidity(day.p=*,location=*)",
    "weather.rainfall(day.p=내일,location=*)",
    "weather.sunset(day.p=*,location=논산)",
    "weather.temperature(day.p=내일,location=울산)",
    "weather.temperature(day.p=*,location=*,time=5시)",
    "weather.uv(day.p=*,ti_range.p=*)",
    "weather.uv(day.p=*,location=*)",
    "weather.windchill(location=*)",
];

/// Escape every `*` as `\*`.
pub fn escape_wildcards(text: &str) -> String {
    text.replace('*', "\\*")
}

/// An intent plus free-text slot constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemanticControlGrammar {
    intent: String,
    slots: String,
}

impl SemanticControlGrammar {
    pub fn new<I: Into<String>, S: Into<String>>(intent: I, slots: S) -> Self {
        SemanticControlGrammar {
            intent: intent.into(),
            slots: slots.into(),
        }
    }

    /// Grammar with [`DEFAULT_SLOT_CONSTRAINTS`].
    pub fn with_default_slots<I: Into<String>>(intent: I) -> Self {
        Self::new(intent, DEFAULT_SLOT_CONSTRAINTS)
    }

    pub fn intent(&self) -> &str {
        &self.intent
    }

    pub fn slots(&self) -> &str {
        &self.slots
    }

    /// Exact key matched against the table's `query` column. Never escaped.
    pub fn lookup_key(&self) -> String {
        format!("{}({})", self.intent, self.slots)
    }

    /// Presentation form with `*` escaped.
    pub fn display_key(&self) -> String {
        format!("{}({})", self.intent, escape_wildcards(&self.slots))
    }
}

impl fmt::Display for SemanticControlGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.intent, self.slots)
    }
}
