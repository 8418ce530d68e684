use rand::rngs::StdRng;

use loto90_db::models::{DrawRecord, PICK_COUNT};

use super::{random_result, Heuristic, PredictionResult, FREQUENCY};
use crate::confidence::Confidence;
use crate::sampler::{complete_selection, sample_distinct};
use crate::tables::{rank_descending, FrequencyTable};

/// Favorise les numéros sortis le plus souvent, avec un tirage aléatoire
/// dans le haut du classement pour ne pas toujours rejouer le même quinté.
pub struct FrequencyHeuristic;

impl Heuristic for FrequencyHeuristic {
    fn name(&self) -> &'static str {
        FREQUENCY
    }

    fn predict(&self, records: &[DrawRecord], rng: &mut StdRng) -> PredictionResult {
        if records.is_empty() {
            return random_result(
                self.name(),
                rng,
                "Aucun historique : sélection uniforme au hasard".to_string(),
            );
        }

        let mut counts = FrequencyTable::new();
        for record in records {
            for &n in &record.winning {
                *counts.entry(n).or_insert(0) += 1;
            }
        }
        let ranked = rank_descending(&counts);

        let numbers = if ranked.len() < PICK_COUNT {
            let partial: Vec<u8> = ranked.iter().map(|&(n, _)| n).collect();
            complete_selection(rng, &partial)
        } else {
            let pool_len = (2 * PICK_COUNT).max(10).min(ranked.len());
            let pool: Vec<u8> = ranked[..pool_len].iter().map(|&(n, _)| n).collect();
            let picked = sample_distinct(rng, &pool, PICK_COUNT);
            complete_selection(rng, &picked)
        };

        PredictionResult {
            method: self.name().to_string(),
            numbers,
            explanation: format!(
                "Sélection parmi les numéros les plus fréquents sur {} tirages",
                records.len()
            ),
            confidence: Confidence::from_sample_size(records.len()),
        }
    }
}
