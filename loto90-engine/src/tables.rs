use std::collections::HashMap;

pub type FrequencyTable = HashMap<u8, u32>;
pub type PairFrequencyTable = HashMap<(u8, u8), u32>;

/// Classement par effectif décroissant, ex æquo au plus petit numéro.
pub fn rank_descending(table: &FrequencyTable) -> Vec<(u8, u32)> {
    let mut ranked: Vec<(u8, u32)> = table.iter().map(|(&n, &c)| (n, c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

/// Top-k inclusif aux ex æquo : le seuil est l'effectif au rang k, tous les
/// numéros d'effectif ≥ seuil sont retenus, puis la liste est tronquée à k.
pub fn top_by_count(table: &FrequencyTable, k: usize) -> Vec<(u8, u32)> {
    let ranked = rank_descending(table);
    if ranked.is_empty() || k == 0 {
        return Vec::new();
    }
    let cutoff = ranked[ranked.len().min(k) - 1].1;
    let mut kept: Vec<(u8, u32)> = ranked.into_iter().filter(|&(_, c)| c >= cutoff).collect();
    kept.truncate(k);
    kept
}

/// Symétrique de `top_by_count` : effectifs croissants, seuil ≤ au rang k.
pub fn bottom_by_count(table: &FrequencyTable, k: usize) -> Vec<(u8, u32)> {
    let mut ranked: Vec<(u8, u32)> = table.iter().map(|(&n, &c)| (n, c)).collect();
    ranked.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
    if ranked.is_empty() || k == 0 {
        return Vec::new();
    }
    let cutoff = ranked[ranked.len().min(k) - 1].1;
    let mut kept: Vec<(u8, u32)> = ranked.into_iter().filter(|&(_, c)| c <= cutoff).collect();
    kept.truncate(k);
    kept
}
