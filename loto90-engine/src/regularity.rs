use tracing::debug;

use loto90_db::models::DrawRecord;

use crate::tables::{top_by_count, FrequencyTable};

const TOP_NUMBERS: usize = 5;

/// Profil d'apparition d'un numéro cible : avec qui il sort, et ce qui sort
/// au tirage immédiatement suivant chacune de ses apparitions.
#[derive(Debug, Clone)]
pub struct RegularityReport {
    pub category: String,
    pub target: u8,
    pub occurrence_count: u32,
    pub cooccurrence_counts: FrequencyTable,
    pub next_draw_counts: FrequencyTable,
    pub top_cooccurring: Vec<(u8, u32)>,
    pub top_next_draw: Vec<(u8, u32)>,
}

/// Point d'entrée régularité. `records` doit être pré-filtré sur `category` ;
/// l'ordre d'entrée est libre, le tri chronologique est interne (stable,
/// les dates ex æquo gardent l'ordre d'arrivée).
pub fn analyze_regularity(records: &[DrawRecord], target: u8, category: &str) -> RegularityReport {
    debug!(category, target, records = records.len(), "analyse de régularité");

    let mut sorted: Vec<&DrawRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    let mut occurrence_count = 0u32;
    let mut cooccurrence_counts = FrequencyTable::new();
    let mut next_draw_counts = FrequencyTable::new();

    for (i, record) in sorted.iter().enumerate() {
        if !record.winning.contains(&target) {
            continue;
        }
        occurrence_count += 1;
        for &n in &record.winning {
            if n != target {
                *cooccurrence_counts.entry(n).or_insert(0) += 1;
            }
        }
        // Seul le tirage immédiatement suivant compte, jamais deux crans plus loin
        if let Some(next) = sorted.get(i + 1) {
            for &n in &next.winning {
                if n != target {
                    *next_draw_counts.entry(n).or_insert(0) += 1;
                }
            }
        }
    }

    RegularityReport {
        category: category.to_string(),
        target,
        occurrence_count,
        top_cooccurring: top_by_count(&cooccurrence_counts, TOP_NUMBERS),
        top_next_draw: top_by_count(&next_draw_counts, TOP_NUMBERS),
        cooccurrence_counts,
        next_draw_counts,
    }
}
