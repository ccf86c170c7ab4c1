use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

/// Protein / carbohydrate / fat breakdown in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macros {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub protein: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub carbs: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub fat: u32,
}

/// One recorded meal.
///
/// Field names on disk follow the journal record layout
/// (`additionalDetails` is camel-cased), optional fields are omitted when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub kcal: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macros: Option<Macros>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_details: Option<String>,
    pub timestamp: DateTime<Local>,
}

impl Entry {
    /// Clock label used on the chart axis, e.g. `8:05` or `13:40`.
    pub fn clock_label(&self) -> String {
        self.timestamp.format("%-H:%M").to_string()
    }
}

/// The partial entry handed to the journal; id and timestamp are assigned
/// by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEntry {
    pub name: String,
    /// Raw estimate; coerced to a non-negative integer when stored.
    pub kcal: f64,
    pub macros: Option<Macros>,
    pub description: Option<String>,
    pub reasoning: Option<String>,
    pub additional_details: Option<String>,
}

impl NewEntry {
    pub fn new(name: impl Into<String>, kcal: f64) -> Self {
        Self {
            name: name.into(),
            kcal,
            ..Default::default()
        }
    }

    pub fn with_macros(mut self, macros: Macros) -> Self {
        self.macros = Some(macros);
        self
    }

    pub fn into_entry(self, id: String, timestamp: DateTime<Local>) -> Entry {
        Entry {
            id,
            name: self.name,
            kcal: coerce_kcal(self.kcal),
            macros: self.macros,
            description: non_empty(self.description),
            reasoning: non_empty(self.reasoning),
            additional_details: non_empty(self.additional_details),
            timestamp,
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

/// Turn an arbitrary estimate into a storable calorie count.
/// Non-finite and negative values become 0; large values saturate.
pub fn coerce_kcal(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let rounded = value.round();
    if rounded >= u32::MAX as f64 {
        u32::MAX
    } else {
        rounded as u32
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Num(f64),
    Text(String),
}

/// Accept numbers, numeric strings and `null` where an integer is expected.
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawNumber::Num(n)) => coerce_kcal(n),
        Some(RawNumber::Text(s)) => s.trim().parse::<f64>().map(coerce_kcal).unwrap_or(0),
        None => 0,
    })
}
