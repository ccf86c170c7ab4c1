use crate::errors::{AppError, AppResult};
use crate::models::{Entry, Macros, NewEntry};
use crate::store::{Clock, JournalStore, KeyValueStore};

/// Raw values of `add` as typed on the command line.
#[derive(Debug, Default)]
pub struct AddRequest<'a> {
    pub name: &'a str,
    pub kcal: &'a str,
    pub protein: Option<u32>,
    pub carbs: Option<u32>,
    pub fat: Option<u32>,
    pub description: Option<&'a str>,
    pub details: Option<&'a str>,
}

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Validate the request and turn it into an entry candidate.
    pub fn build(req: &AddRequest<'_>) -> AppResult<NewEntry> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::Other("Meal name must not be empty".into()));
        }

        let kcal = parse_kcal(req.kcal)?;

        let mut new = NewEntry::new(name, kcal);
        if req.protein.is_some() || req.carbs.is_some() || req.fat.is_some() {
            new = new.with_macros(Macros {
                protein: req.protein.unwrap_or(0),
                carbs: req.carbs.unwrap_or(0),
                fat: req.fat.unwrap_or(0),
            });
        }
        new.description = req.description.map(str::to_string);
        new.additional_details = req.details.map(str::to_string);
        Ok(new)
    }

    pub fn apply<K: KeyValueStore, C: Clock>(
        store: &mut JournalStore<K, C>,
        req: &AddRequest<'_>,
    ) -> AppResult<Entry> {
        let new = Self::build(req)?;
        Ok(store.add_entry(new))
    }
}

/// Hand-typed calories must be a finite, non-negative number.
pub fn parse_kcal(raw: &str) -> AppResult<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidKcal(raw.to_string()))?;

    if !value.is_finite() || value < 0.0 {
        return Err(AppError::InvalidKcal(raw.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FixedClock, JournalSettings, MemoryKv};
    use chrono::{Local, TimeZone};

    #[test]
    fn kcal_must_be_a_non_negative_number() {
        assert_eq!(parse_kcal("450").expect("int"), 450.0);
        assert_eq!(parse_kcal(" 120.5 ").expect("float"), 120.5);
        assert!(matches!(parse_kcal("abc"), Err(AppError::InvalidKcal(_))));
        assert!(matches!(parse_kcal("-10"), Err(AppError::InvalidKcal(_))));
        assert!(matches!(parse_kcal("NaN"), Err(AppError::InvalidKcal(_))));
    }

    #[test]
    fn macros_only_when_some_are_given() {
        let req = AddRequest {
            name: "Pizza",
            kcal: "450",
            ..Default::default()
        };
        assert_eq!(AddLogic::build(&req).expect("build").macros, None);

        let req = AddRequest {
            name: "Steak",
            kcal: "600",
            protein: Some(50),
            ..Default::default()
        };
        assert_eq!(
            AddLogic::build(&req).expect("build").macros,
            Some(Macros {
                protein: 50,
                carbs: 0,
                fat: 0
            })
        );
    }

    #[test]
    fn blank_name_is_rejected() {
        let req = AddRequest {
            name: "  ",
            kcal: "100",
            ..Default::default()
        };
        assert!(AddLogic::build(&req).is_err());
    }

    #[test]
    fn apply_adds_to_the_journal() {
        let kv = MemoryKv::new();
        let clock = FixedClock::new(
            Local
                .with_ymd_and_hms(2025, 6, 18, 12, 30, 0)
                .single()
                .expect("time"),
        );
        let mut store = JournalStore::open(&kv, &clock, JournalSettings::default());

        let req = AddRequest {
            name: "Salad",
            kcal: "150",
            details: Some("no dressing"),
            ..Default::default()
        };
        let entry = AddLogic::apply(&mut store, &req).expect("apply");

        assert_eq!(entry.kcal, 150);
        assert_eq!(entry.additional_details.as_deref(), Some("no dressing"));
        assert_eq!(store.total_kcal(), 150);
    }
}
