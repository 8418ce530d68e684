use rand::rngs::StdRng;

use loto90_db::models::{DrawRecord, PICK_COUNT};

use super::{random_result, Heuristic, PredictionResult, ASSOCIATION};
use crate::confidence::Confidence;
use crate::sampler::{complete_selection, sample_distinct};
use crate::tables::PairFrequencyTable;

/// En dessous de ce volume, le signal de paires n'est pas jugé significatif.
const MIN_RECORDS: usize = 5;

/// Favorise les numéros qui sortent ensemble : les membres des paires les
/// plus fréquentes forment le bassin de tirage.
pub struct AssociationHeuristic;

/// Toutes les paires non ordonnées d'un quinté, canoniques (petit, grand).
pub(crate) fn count_pairs(records: &[DrawRecord]) -> PairFrequencyTable {
    let mut pairs = PairFrequencyTable::new();
    for record in records {
        for i in 0..record.winning.len() {
            for j in (i + 1)..record.winning.len() {
                let a = record.winning[i];
                let b = record.winning[j];
                let key = if a < b { (a, b) } else { (b, a) };
                *pairs.entry(key).or_insert(0) += 1;
            }
        }
    }
    pairs
}

impl Heuristic for AssociationHeuristic {
    fn name(&self) -> &'static str {
        ASSOCIATION
    }

    fn predict(&self, records: &[DrawRecord], rng: &mut StdRng) -> PredictionResult {
        if records.len() < MIN_RECORDS {
            return random_result(
                self.name(),
                rng,
                format!(
                    "Historique insuffisant ({} tirages, minimum {}) : sélection au hasard",
                    records.len(),
                    MIN_RECORDS
                ),
            );
        }

        let pairs = count_pairs(records);
        let mut ranked: Vec<((u8, u8), u32)> = pairs.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let keep = (2 * PICK_COUNT).max(15).min(ranked.len());
        let mut pool: Vec<u8> = Vec::new();
        for &((a, b), _) in &ranked[..keep] {
            if !pool.contains(&a) {
                pool.push(a);
            }
            if !pool.contains(&b) {
                pool.push(b);
            }
        }

        let picked = sample_distinct(rng, &pool, PICK_COUNT);
        let numbers = complete_selection(rng, &picked);

        PredictionResult {
            method: self.name().to_string(),
            numbers,
            explanation: format!(
                "Membres des {} paires les plus associées sur {} tirages",
                keep,
                records.len()
            ),
            confidence: Confidence::from_sample_size(records.len()),
        }
    }
}
