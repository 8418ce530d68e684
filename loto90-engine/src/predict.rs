use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use loto90_db::models::DrawRecord;

use crate::ensemble::combine;
use crate::heuristics::{all_heuristics, PredictionResult};
use crate::sampler::make_rng;

/// Prédictions d'une catégorie : l'hybride recommandé d'abord, puis chaque
/// méthode par ordre alphabétique.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionBundle {
    pub category: String,
    pub results: Vec<PredictionResult>,
    pub recommended: PredictionResult,
    pub analyzed_count: usize,
}

/// Un seul résultat par nom de méthode, le premier l'emporte.
fn dedup_by_method(results: Vec<PredictionResult>) -> Vec<PredictionResult> {
    let mut seen: HashSet<String> = HashSet::new();
    results
        .into_iter()
        .filter(|r| seen.insert(r.method.clone()))
        .collect()
}

/// Point d'entrée prédiction. `records` doit être pré-filtré sur `category` ;
/// `today` sert de référence au calcul des retards et `seed` fige l'aléa.
pub fn predict(
    records: &[DrawRecord],
    category: &str,
    today: NaiveDate,
    seed: Option<u64>,
) -> PredictionBundle {
    debug!(category, records = records.len(), "lancement des prédictions");

    let mut rng = make_rng(seed);
    let mut results: Vec<PredictionResult> = all_heuristics(today)
        .iter()
        .map(|h| h.predict(records, &mut rng))
        .collect();

    let recommended = combine(&results, records.len(), &mut rng);

    results.sort_by(|a, b| a.method.cmp(&b.method));
    let mut all = Vec::with_capacity(results.len() + 1);
    all.push(recommended.clone());
    all.extend(results);

    PredictionBundle {
        category: category.to_string(),
        results: dedup_by_method(all),
        recommended,
        analyzed_count: records.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::Confidence;
    use crate::ensemble::HYBRID;
    use crate::heuristics::{make_test_records, ASSOCIATION, DELAY, DISTRIBUTION, FREQUENCY};

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_bundle_shape_and_ordering() {
        let records = make_test_records(30);
        let bundle = predict(&records, "Étoile", june_first(), Some(42));

        assert_eq!(bundle.category, "Étoile");
        assert_eq!(bundle.analyzed_count, 30);
        let methods: Vec<&str> = bundle.results.iter().map(|r| r.method.as_str()).collect();
        assert_eq!(
            methods,
            vec![HYBRID, ASSOCIATION, DISTRIBUTION, FREQUENCY, DELAY]
        );
        assert_eq!(bundle.recommended.method, HYBRID);
    }

    #[test]
    fn test_same_seed_same_bundle() {
        let records = make_test_records(45);
        let a = predict(&records, "Étoile", june_first(), Some(123));
        let b = predict(&records, "Étoile", june_first(), Some(123));
        for (x, y) in a.results.iter().zip(b.results.iter()) {
            assert_eq!(x.method, y.method);
            assert_eq!(x.numbers, y.numbers);
            assert_eq!(x.confidence, y.confidence);
        }
        assert_eq!(a.recommended.numbers, b.recommended.numbers);
    }

    #[test]
    fn test_empty_history_all_very_low() {
        let bundle = predict(&[], "Étoile", june_first(), Some(1));
        assert_eq!(bundle.analyzed_count, 0);
        assert_eq!(bundle.results.len(), 5);
        for result in &bundle.results {
            assert_eq!(result.confidence, Confidence::VeryLow);
            assert!(result.numbers.windows(2).all(|w| w[0] < w[1]));
            assert!(result.numbers.iter().all(|n| (1..=90).contains(n)));
        }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let make = |method: &str, first: u8| PredictionResult {
            method: method.to_string(),
            numbers: [first, 10, 20, 30, 40],
            explanation: String::new(),
            confidence: Confidence::Low,
        };
        let deduped = dedup_by_method(vec![
            make(HYBRID, 1),
            make(FREQUENCY, 2),
            make(HYBRID, 3),
            make(FREQUENCY, 4),
        ]);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].method, HYBRID);
        assert_eq!(deduped[0].numbers[0], 1);
        assert_eq!(deduped[1].numbers[0], 2);
    }
}
