use std::collections::HashMap;

use rand::rngs::StdRng;

use loto90_db::models::PICK_COUNT;

use crate::confidence::Confidence;
use crate::heuristics::{PredictionResult, ASSOCIATION, DELAY, FREQUENCY};
use crate::sampler::complete_selection;

pub const HYBRID: &str = "Hybride";

/// Poids structurel de chaque méthode dans le score hybride.
fn base_weight(method: &str) -> f64 {
    if method == FREQUENCY || method == DELAY {
        1.2
    } else if method == ASSOCIATION {
        1.1
    } else {
        1.0
    }
}

/// Promotion d'un niveau quand les méthodes convergent : passer à Élevée
/// exige un accord moyen ≥ 3, les promotions inférieures ≥ 2.
fn promote_on_agreement(base: Confidence, average_support: f64) -> Confidence {
    match base {
        Confidence::Medium if average_support >= 3.0 => base.promote(),
        Confidence::VeryLow | Confidence::Low if average_support >= 2.0 => base.promote(),
        _ => base,
    }
}

/// Fusionne les prédictions des méthodes en un seul quinté : chaque numéro
/// proposé cumule le poids (confiance × poids de base) de chaque méthode qui
/// le propose, et les 5 meilleurs scores l'emportent.
pub fn combine(
    results: &[PredictionResult],
    analyzed_count: usize,
    rng: &mut StdRng,
) -> PredictionResult {
    let mut scores: HashMap<u8, f64> = HashMap::new();
    let mut support: HashMap<u8, u32> = HashMap::new();

    for result in results {
        let weight = result.confidence.weight() * base_weight(&result.method);
        for &n in &result.numbers {
            *scores.entry(n).or_insert(0.0) += weight;
            *support.entry(n).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(u8, f64)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    let top: Vec<u8> = ranked.iter().take(PICK_COUNT).map(|&(n, _)| n).collect();
    let numbers = complete_selection(rng, &top);

    // Accord moyen des méthodes sur les 5 numéros retenus ; un numéro issu
    // du remplissage aléatoire compte pour zéro.
    let average_support = numbers
        .iter()
        .map(|n| support.get(n).copied().unwrap_or(0))
        .sum::<u32>() as f64
        / PICK_COUNT as f64;

    let all_very_low = results.iter().all(|r| r.confidence == Confidence::VeryLow);
    let confidence = if results.is_empty() || all_very_low {
        Confidence::VeryLow
    } else {
        promote_on_agreement(Confidence::from_sample_size(analyzed_count), average_support)
    };

    PredictionResult {
        method: HYBRID.to_string(),
        numbers,
        explanation: "Combinaison des quatre méthodes, pondérées par leur niveau de confiance"
            .to_string(),
        confidence,
    }
}
