pub mod association;
pub mod delay;
pub mod distribution;
pub mod frequency;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use serde::Serialize;

use loto90_db::models::{DrawRecord, PICK_COUNT};

use crate::confidence::Confidence;
use crate::sampler::complete_selection;

pub const FREQUENCY: &str = "Fréquence";
pub const DELAY: &str = "Retard";
pub const ASSOCIATION: &str = "Association";
pub const DISTRIBUTION: &str = "Dizaines";

/// Prédiction d'une méthode : exactement 5 numéros distincts de [1, 90],
/// triés en ordre croissant.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub method: String,
    pub numbers: [u8; PICK_COUNT],
    pub explanation: String,
    pub confidence: Confidence,
}

pub trait Heuristic: Send + Sync {
    fn name(&self) -> &'static str;
    /// `records` est déjà filtré sur une seule catégorie.
    fn predict(&self, records: &[DrawRecord], rng: &mut StdRng) -> PredictionResult;
}

pub fn all_heuristics(today: NaiveDate) -> Vec<Box<dyn Heuristic>> {
    vec![
        Box::new(frequency::FrequencyHeuristic),
        Box::new(delay::DelayHeuristic::new(today)),
        Box::new(association::AssociationHeuristic),
        Box::new(distribution::DistributionHeuristic),
    ]
}

/// Repli dégénéré commun : 5 numéros uniformes, confiance minimale.
pub(crate) fn random_result(name: &str, rng: &mut StdRng, explanation: String) -> PredictionResult {
    PredictionResult {
        method: name.to_string(),
        numbers: complete_selection(rng, &[]),
        explanation,
        confidence: Confidence::VeryLow,
    }
}

pub fn make_test_records(n: usize) -> Vec<DrawRecord> {
    (0..n)
        .map(|i| {
            let base = (i % 18) as u8 * 5;
            let machine_base = ((i % 17) as u8) * 5;
            DrawRecord {
                category: "Étoile".to_string(),
                date: format!("2024-{:02}-{:02}", i / 28 % 12 + 1, i % 28 + 1),
                winning: [base + 1, base + 2, base + 3, base + 4, base + 5],
                machine: if i % 3 == 0 {
                    Some([
                        machine_base + 1,
                        machine_base + 2,
                        machine_base + 3,
                        machine_base + 4,
                        machine_base + 5,
                    ])
                } else {
                    None
                },
            }
        })
        .collect()
}
