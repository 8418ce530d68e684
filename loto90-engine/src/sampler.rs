use chrono::Datelike;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use loto90_db::models::{NUMBER_MAX, NUMBER_MIN, PICK_COUNT};

/// Source aléatoire injectable : seed fixé pour la reproductibilité,
/// entropie système sinon.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Génère un seed déterministe basé sur la date du jour (AAAAMMJJ).
pub fn date_seed() -> u64 {
    let today = chrono::Local::now().date_naive();
    let y = today.year() as u64;
    let m = today.month() as u64;
    let d = today.day() as u64;
    y * 10_000 + m * 100 + d
}

/// `count` numéros distincts uniformes dans [min, max], hors `excluding`.
/// Retourne moins que `count` si le domaine restant est trop petit.
pub fn unique_random_numbers(
    rng: &mut StdRng,
    count: usize,
    min: u8,
    max: u8,
    excluding: &[u8],
) -> Vec<u8> {
    let domain = (max - min + 1) as usize;
    let excluded = (min..=max).filter(|n| excluding.contains(n)).count();
    let target = count.min(domain.saturating_sub(excluded));

    let mut picked = Vec::with_capacity(target);
    while picked.len() < target {
        let n = rng.random_range(min..=max);
        if !excluding.contains(&n) && !picked.contains(&n) {
            picked.push(n);
        }
    }
    picked
}

/// Tire jusqu'à `count` numéros distincts du bassin, sans remise.
/// Le bassin peut contenir des doublons ; ils ne comptent qu'une fois.
pub fn sample_distinct(rng: &mut StdRng, pool: &[u8], count: usize) -> Vec<u8> {
    let mut remaining = pool.to_vec();
    let mut picked = Vec::with_capacity(count);
    while picked.len() < count && !remaining.is_empty() {
        let idx = rng.random_range(0..remaining.len());
        let n = remaining.swap_remove(idx);
        if !picked.contains(&n) {
            picked.push(n);
        }
    }
    picked
}

/// Normalise une sélection en exactement 5 numéros distincts : déduplique,
/// complète au hasard dans [1, 90], puis trie en ordre croissant.
pub fn complete_selection(rng: &mut StdRng, picked: &[u8]) -> [u8; PICK_COUNT] {
    let mut distinct: Vec<u8> = Vec::with_capacity(PICK_COUNT);
    for &n in picked {
        if distinct.len() == PICK_COUNT {
            break;
        }
        if !distinct.contains(&n) {
            distinct.push(n);
        }
    }
    if distinct.len() < PICK_COUNT {
        let fill = unique_random_numbers(
            rng,
            PICK_COUNT - distinct.len(),
            NUMBER_MIN,
            NUMBER_MAX,
            &distinct,
        );
        distinct.extend(fill);
    }

    let mut numbers = [0u8; PICK_COUNT];
    for (i, &n) in distinct.iter().take(PICK_COUNT).enumerate() {
        numbers[i] = n;
    }
    numbers.sort();
    numbers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_rng_seed_deterministic() {
        let mut a = make_rng(Some(42));
        let mut b = make_rng(Some(42));
        let xs: Vec<u8> = (0..10).map(|_| a.random_range(1..=90)).collect();
        let ys: Vec<u8> = (0..10).map(|_| b.random_range(1..=90)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_date_seed_format() {
        let seed = date_seed();
        assert!(seed >= 20_000_000, "seed trop petit : {seed}");
        assert!(seed <= 99_991_231, "seed trop grand : {seed}");
    }

    #[test]
    fn test_unique_random_numbers_distinct_in_range() {
        let mut rng = make_rng(Some(7));
        let numbers = unique_random_numbers(&mut rng, 20, 1, 90, &[]);
        assert_eq!(numbers.len(), 20);
        for &n in &numbers {
            assert!((1..=90).contains(&n));
        }
        for i in 0..numbers.len() {
            for j in (i + 1)..numbers.len() {
                assert_ne!(numbers[i], numbers[j]);
            }
        }
    }

    #[test]
    fn test_unique_random_numbers_excluding() {
        let mut rng = make_rng(Some(7));
        let excluded = [10, 20, 30, 40, 50];
        for _ in 0..20 {
            let numbers = unique_random_numbers(&mut rng, 5, 1, 90, &excluded);
            assert!(numbers.iter().all(|n| !excluded.contains(n)));
        }
    }

    #[test]
    fn test_unique_random_numbers_domain_exhausted() {
        let mut rng = make_rng(Some(7));
        // Domaine de 5 valeurs dont 2 exclues : au plus 3 résultats
        let numbers = unique_random_numbers(&mut rng, 10, 1, 5, &[1, 2]);
        assert_eq!(numbers.len(), 3);
        assert!(numbers.iter().all(|n| (3..=5).contains(n)));
    }

    #[test]
    fn test_sample_distinct_subset_of_pool() {
        let mut rng = make_rng(Some(11));
        let pool = [4, 8, 15, 16, 23, 42];
        let picked = sample_distinct(&mut rng, &pool, 4);
        assert_eq!(picked.len(), 4);
        assert!(picked.iter().all(|n| pool.contains(n)));
    }

    #[test]
    fn test_sample_distinct_duplicate_pool_entries() {
        let mut rng = make_rng(Some(11));
        let pool = [7, 7, 7, 7, 9];
        let picked = sample_distinct(&mut rng, &pool, 5);
        assert_eq!(picked.len(), 2);
        assert!(picked.contains(&7));
        assert!(picked.contains(&9));
    }

    #[test]
    fn test_complete_selection_exactly_five_sorted() {
        let mut rng = make_rng(Some(3));
        let numbers = complete_selection(&mut rng, &[50, 10]);
        assert!(numbers.contains(&50));
        assert!(numbers.contains(&10));
        assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        assert!(numbers.iter().all(|n| (1..=90).contains(n)));
    }

    #[test]
    fn test_complete_selection_dedups_input() {
        let mut rng = make_rng(Some(3));
        let numbers = complete_selection(&mut rng, &[33, 33, 33, 33, 33, 33]);
        assert!(numbers.contains(&33));
        assert!(numbers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_complete_selection_truncates_overflow() {
        let mut rng = make_rng(Some(3));
        let numbers = complete_selection(&mut rng, &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(numbers, [1, 2, 3, 4, 5]);
    }
}
