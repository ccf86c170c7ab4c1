use crate::analyzer::{Analysis, ImagePayload, MealAnalyzer};
use crate::models::Entry;
use crate::store::{Clock, JournalStore, KeyValueStore};

/// What `scan` recorded.
#[derive(Debug)]
pub struct ScanOutcome {
    pub entry: Entry,
    /// Set when the entry holds the default estimate instead of a real one.
    pub fallback_reason: Option<String>,
}

pub struct ScanLogic;

impl ScanLogic {
    /// Analyze the photo and record the result. The journal is only touched
    /// after the analysis has completed.
    pub async fn apply<K, C, A>(
        store: &mut JournalStore<K, C>,
        analyzer: &A,
        image: &ImagePayload,
        hint: Option<&str>,
    ) -> ScanOutcome
    where
        K: KeyValueStore,
        C: Clock,
        A: MealAnalyzer + ?Sized,
    {
        let hint = hint.map(str::trim).filter(|h| !h.is_empty());
        let analysis: Analysis = analyzer.analyze(image, hint).await;
        let fallback_reason = analysis.fallback_reason().map(ToString::to_string);

        let entry = store.add_entry(analysis.into_new_entry(hint));
        ScanOutcome {
            entry,
            fallback_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalyzerError, EstimateSource, MealEstimate};
    use crate::store::{FixedClock, JournalSettings, MemoryKv};
    use async_trait::async_trait;
    use chrono::{Local, TimeZone};

    struct Canned(Option<MealEstimate>);

    #[async_trait]
    impl MealAnalyzer for Canned {
        async fn analyze(&self, _image: &ImagePayload, _hint: Option<&str>) -> Analysis {
            match &self.0 {
                Some(e) => Analysis::Estimated(e.clone()),
                None => Analysis::fallback(AnalyzerError::Decode("garbage".into())),
            }
        }
    }

    fn clock() -> FixedClock {
        FixedClock::new(
            Local
                .with_ymd_and_hms(2025, 6, 18, 19, 45, 0)
                .single()
                .expect("time"),
        )
    }

    fn image() -> ImagePayload {
        ImagePayload::new(vec![0xff, 0xd8, 0xff], "image/jpeg")
    }

    #[tokio::test]
    async fn estimate_is_recorded_with_hint() {
        let kv = MemoryKv::new();
        let clock = clock();
        let mut store = JournalStore::open(&kv, &clock, JournalSettings::default());
        let analyzer = Canned(Some(MealEstimate {
            name: "Ramen".into(),
            kcal: 520,
            protein: 22,
            carbs: 70,
            fat: 16,
            reasoning: "Large bowl".into(),
            description: None,
            source: EstimateSource::Model,
        }));

        let out = ScanLogic::apply(&mut store, &analyzer, &image(), Some(" extra egg ")).await;

        assert!(out.fallback_reason.is_none());
        assert_eq!(out.entry.name, "Ramen");
        assert_eq!(out.entry.additional_details.as_deref(), Some("extra egg"));
        assert_eq!(store.total_kcal(), 520);
    }

    #[tokio::test]
    async fn fallback_is_recorded_and_reported() {
        let kv = MemoryKv::new();
        let clock = clock();
        let mut store = JournalStore::open(&kv, &clock, JournalSettings::default());

        let out = ScanLogic::apply(&mut store, &Canned(None), &image(), None).await;

        assert!(out.fallback_reason.is_some());
        assert_eq!(out.entry.kcal, 300);
        assert_eq!(out.entry.name, "Unknown meal");
        assert_eq!(store.entries().len(), 1);
    }
}
