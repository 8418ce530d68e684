use rand::rngs::StdRng;
use rand::Rng;

use loto90_db::models::{DrawRecord, PICK_COUNT};

use super::{random_result, Heuristic, PredictionResult, DISTRIBUTION};
use crate::confidence::Confidence;
use crate::sampler::{complete_selection, sample_distinct};

/// Les neuf dizaines du domaine 1-90.
const RANGE_COUNT: usize = 9;
const RANGE_WIDTH: u8 = 10;

fn range_of(n: u8) -> usize {
    ((n - 1) / RANGE_WIDTH) as usize
}

fn range_bounds(range: usize) -> (u8, u8) {
    let low = range as u8 * RANGE_WIDTH + 1;
    (low, low + RANGE_WIDTH - 1)
}

/// Reproduit la répartition observée par dizaine : chaque dizaine alimente
/// le bassin proportionnellement à sa moyenne d'occurrences par tirage.
pub struct DistributionHeuristic;

impl Heuristic for DistributionHeuristic {
    fn name(&self) -> &'static str {
        DISTRIBUTION
    }

    fn predict(&self, records: &[DrawRecord], rng: &mut StdRng) -> PredictionResult {
        if records.is_empty() {
            return random_result(
                self.name(),
                rng,
                "Aucun historique : sélection uniforme au hasard".to_string(),
            );
        }

        let mut range_counts = [0u32; RANGE_COUNT];
        for record in records {
            for &n in &record.winning {
                range_counts[range_of(n)] += 1;
            }
        }

        let analyzed = records.len() as f64;
        let mut averages: Vec<(usize, f64)> = range_counts
            .iter()
            .enumerate()
            .map(|(range, &count)| (range, count as f64 / analyzed))
            .collect();
        averages.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        let cap = 3 * PICK_COUNT;
        let mut pool: Vec<u8> = Vec::with_capacity(cap);
        'ranges: for &(range, average) in &averages {
            let draws = ((average * PICK_COUNT as f64 / 5.0).round() as usize).max(1);
            let (low, high) = range_bounds(range);
            for _ in 0..draws {
                if pool.len() >= cap {
                    break 'ranges;
                }
                pool.push(rng.random_range(low..=high));
            }
        }

        let picked = sample_distinct(rng, &pool, PICK_COUNT);
        let numbers = complete_selection(rng, &picked);

        PredictionResult {
            method: self.name().to_string(),
            numbers,
            explanation: format!(
                "Tirage pondéré par la répartition des dizaines sur {} tirages",
                records.len()
            ),
            // Volontairement moins bien notée que les autres méthodes à
            // échantillon égal : l'effectif est divisé par deux avant l'escalier.
            confidence: Confidence::from_sample_size(records.len() / 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::make_test_records;
    use crate::sampler::make_rng;

    fn record(date: &str, winning: [u8; 5]) -> DrawRecord {
        DrawRecord {
            category: "Étoile".to_string(),
            date: date.to_string(),
            winning,
            machine: None,
        }
    }

    #[test]
    fn test_range_of_boundaries() {
        assert_eq!(range_of(1), 0);
        assert_eq!(range_of(10), 0);
        assert_eq!(range_of(11), 1);
        assert_eq!(range_of(20), 1);
        assert_eq!(range_of(81), 8);
        assert_eq!(range_of(90), 8);
    }

    #[test]
    fn test_range_bounds() {
        assert_eq!(range_bounds(0), (1, 10));
        assert_eq!(range_bounds(4), (41, 50));
        assert_eq!(range_bounds(8), (81, 90));
    }

    #[test]
    fn test_halved_confidence() {
        let mut rng = make_rng(Some(4));
        // 60 tirages : moyenne sans division → moyenne, avec division → faible
        let result = DistributionHeuristic.predict(&make_test_records(60), &mut rng);
        assert_eq!(result.confidence, Confidence::Low);
        // 15 tirages : 7 après division → très faible
        let result = DistributionHeuristic.predict(&make_test_records(15), &mut rng);
        assert_eq!(result.confidence, Confidence::VeryLow);
        // 500 tirages : 250 après division → élevée
        let result = DistributionHeuristic.predict(&make_test_records(500), &mut rng);
        assert_eq!(result.confidence, Confidence::High);
    }

    #[test]
    fn test_dominant_range_overrepresented() {
        // Tout l'historique vit dans la dizaine 1-10 : elle alimente le
        // bassin à hauteur de 5 entrées par passe contre 1 pour chacune des
        // huit autres. Sa part des sélections doit dépasser nettement le
        // poids d'une dizaine uniforme (1/9 ≈ 11 %).
        let records: Vec<DrawRecord> = (0..20)
            .map(|i| record(&format!("2024-01-{:02}", i + 1), [1, 3, 5, 7, 9]))
            .collect();
        let mut rng = make_rng(Some(21));
        let mut in_dominant = 0usize;
        let mut total = 0usize;
        for _ in 0..40 {
            let result = DistributionHeuristic.predict(&records, &mut rng);
            total += result.numbers.len();
            in_dominant += result.numbers.iter().filter(|n| (1..=10).contains(*n)).count();
        }
        assert!(
            in_dominant * 5 > total,
            "la dizaine dominante devrait peser plus de 20 % des sélections : {in_dominant}/{total}"
        );
    }

    #[test]
    fn test_valid_output_shape() {
        let mut rng = make_rng(Some(4));
        let result = DistributionHeuristic.predict(&make_test_records(40), &mut rng);
        assert!(result.numbers.windows(2).all(|w| w[0] < w[1]));
        assert!(result.numbers.iter().all(|n| (1..=90).contains(n)));
    }
}
