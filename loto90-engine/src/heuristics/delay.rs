use chrono::NaiveDate;
use rand::rngs::StdRng;

use loto90_db::models::{DrawRecord, NUMBER_MAX, NUMBER_MIN, PICK_COUNT};

use super::{random_result, Heuristic, PredictionResult, DELAY};
use crate::confidence::Confidence;
use crate::sampler::complete_selection;

/// Retard sentinelle d'un numéro jamais vu, hors de portée de tout retard réel.
const NEVER_SEEN: i64 = 100 * NUMBER_MAX as i64;

/// Favorise les numéros au plus long retard : ceux qui ne sont pas sortis
/// depuis le plus de jours par rapport à une date de référence explicite.
pub struct DelayHeuristic {
    today: NaiveDate,
}

impl DelayHeuristic {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Retard en jours entiers de chaque numéro du domaine.
    fn delays(&self, records: &[DrawRecord]) -> Vec<(u8, i64)> {
        // La date ISO AAAA-MM-JJ suit l'ordre lexicographique : le maximum
        // de chaîne est bien la dernière apparition.
        let mut last_seen: Vec<Option<&str>> = vec![None; NUMBER_MAX as usize];
        for record in records {
            for &n in &record.winning {
                let idx = (n - 1) as usize;
                match last_seen[idx] {
                    Some(prev) if prev >= record.date.as_str() => {}
                    _ => last_seen[idx] = Some(record.date.as_str()),
                }
            }
        }

        (NUMBER_MIN..=NUMBER_MAX)
            .map(|n| {
                let delay = last_seen[(n - 1) as usize]
                    .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
                    .map(|d| (self.today - d).num_days().max(0))
                    .unwrap_or(NEVER_SEEN);
                (n, delay)
            })
            .collect()
    }
}

impl Heuristic for DelayHeuristic {
    fn name(&self) -> &'static str {
        DELAY
    }

    fn predict(&self, records: &[DrawRecord], rng: &mut StdRng) -> PredictionResult {
        if records.is_empty() {
            return random_result(
                self.name(),
                rng,
                "Aucun historique : sélection uniforme au hasard".to_string(),
            );
        }

        let mut delays = self.delays(records);
        delays.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let top: Vec<u8> = delays.iter().take(PICK_COUNT).map(|&(n, _)| n).collect();
        // Garde-fou contre tout doublon issu des ex æquo sentinelles
        let numbers = complete_selection(rng, &top);

        PredictionResult {
            method: self.name().to_string(),
            numbers,
            explanation: format!(
                "Numéros au plus long retard d'apparition sur {} tirages",
                records.len()
            ),
            confidence: Confidence::from_sample_size(records.len()),
        }
    }
}
