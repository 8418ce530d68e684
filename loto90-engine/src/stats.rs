use std::collections::HashMap;

use tracing::debug;

use loto90_db::models::{DrawRecord, Pool, PICK_COUNT};

use crate::tables::{bottom_by_count, top_by_count, FrequencyTable, PairFrequencyTable};

const TOP_NUMBERS: usize = 5;
const TOP_PAIRS: usize = 10;

/// Statistiques descriptives d'une catégorie : fréquences, paires,
/// parité et sommes. Aucune part d'aléa.
#[derive(Debug, Clone)]
pub struct StatisticsReport {
    pub category: String,
    pub analyzed_count: usize,
    pub winning_counts: FrequencyTable,
    pub machine_counts: FrequencyTable,
    pub top_winning: Vec<(u8, u32)>,
    pub bottom_winning: Vec<(u8, u32)>,
    pub top_machine: Vec<(u8, u32)>,
    pub bottom_machine: Vec<(u8, u32)>,
    pub pair_counts: PairFrequencyTable,
    pub top_pairs: Vec<((u8, u8), u32)>,
    pub average_odds: f64,
    pub average_evens: f64,
    /// Nombre de tirages par quantité de numéros impairs (0 à 5).
    pub odd_histogram: [u32; 6],
    pub average_sum: f64,
    pub min_sum: Option<u32>,
    pub max_sum: Option<u32>,
    pub sum_histogram: HashMap<u32, u32>,
}

fn count_occurrences(records: &[DrawRecord], pool: Pool) -> FrequencyTable {
    let mut counts = FrequencyTable::new();
    for record in records {
        for &n in pool.numbers_from(record) {
            *counts.entry(n).or_insert(0) += 1;
        }
    }
    counts
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Point d'entrée statistiques. `records` doit être pré-filtré sur `category`.
pub fn compute_statistics(records: &[DrawRecord], category: &str) -> StatisticsReport {
    debug!(category, records = records.len(), "calcul des statistiques");

    let analyzed_count = records.len();
    let winning_counts = count_occurrences(records, Pool::Winning);
    let machine_counts = count_occurrences(records, Pool::Machine);

    // Paires gagnantes ; le rang de première apparition départage les ex æquo
    let mut pair_counts = PairFrequencyTable::new();
    let mut first_seen: HashMap<(u8, u8), usize> = HashMap::new();
    for record in records {
        for i in 0..record.winning.len() {
            for j in (i + 1)..record.winning.len() {
                let a = record.winning[i];
                let b = record.winning[j];
                let key = if a < b { (a, b) } else { (b, a) };
                let rank = first_seen.len();
                first_seen.entry(key).or_insert(rank);
                *pair_counts.entry(key).or_insert(0) += 1;
            }
        }
    }
    let mut top_pairs: Vec<((u8, u8), u32)> =
        pair_counts.iter().map(|(&p, &c)| (p, c)).collect();
    top_pairs.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| first_seen[&a.0].cmp(&first_seen[&b.0]))
    });
    top_pairs.truncate(TOP_PAIRS);

    // Parité et sommes en une passe
    let mut odd_histogram = [0u32; 6];
    let mut total_odds = 0u32;
    let mut sum_histogram: HashMap<u32, u32> = HashMap::new();
    let mut total_sum = 0u64;
    let mut min_sum: Option<u32> = None;
    let mut max_sum: Option<u32> = None;
    for record in records {
        let odds = record.winning.iter().filter(|&&n| n % 2 == 1).count();
        odd_histogram[odds] += 1;
        total_odds += odds as u32;

        let sum: u32 = record.winning.iter().map(|&n| u32::from(n)).sum();
        *sum_histogram.entry(sum).or_insert(0) += 1;
        total_sum += u64::from(sum);
        min_sum = Some(min_sum.map_or(sum, |m| m.min(sum)));
        max_sum = Some(max_sum.map_or(sum, |m| m.max(sum)));
    }

    let (average_odds, average_evens, average_sum) = if analyzed_count == 0 {
        (0.0, 0.0, 0.0)
    } else {
        let n = analyzed_count as f64;
        let total_evens = (analyzed_count * PICK_COUNT) as u32 - total_odds;
        (
            round2(total_odds as f64 / n),
            round2(total_evens as f64 / n),
            round2(total_sum as f64 / n),
        )
    };

    StatisticsReport {
        category: category.to_string(),
        analyzed_count,
        top_winning: top_by_count(&winning_counts, TOP_NUMBERS),
        bottom_winning: bottom_by_count(&winning_counts, TOP_NUMBERS),
        top_machine: top_by_count(&machine_counts, TOP_NUMBERS),
        bottom_machine: bottom_by_count(&machine_counts, TOP_NUMBERS),
        winning_counts,
        machine_counts,
        pair_counts,
        top_pairs,
        average_odds,
        average_evens,
        odd_histogram,
        average_sum,
        min_sum,
        max_sum,
        sum_histogram,
    }
}
