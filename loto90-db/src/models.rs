use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

pub const NUMBER_MIN: u8 = 1;
pub const NUMBER_MAX: u8 = 90;
pub const PICK_COUNT: usize = 5;

/// Un tirage historique d'une catégorie (ex. "Étoile", "Fortune").
/// `machine` vaut None quand l'opérateur n'a pas publié de second tirage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub category: String,
    pub date: String,
    pub winning: [u8; 5],
    pub machine: Option<[u8; 5]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Winning,
    Machine,
}

impl Pool {
    pub fn numbers_from<'a>(&self, record: &'a DrawRecord) -> &'a [u8] {
        match self {
            Pool::Winning => &record.winning,
            Pool::Machine => record
                .machine
                .as_ref()
                .map(|m| m.as_slice())
                .unwrap_or(&[]),
        }
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pool::Winning => write!(f, "gagnants"),
            Pool::Machine => write!(f, "machine"),
        }
    }
}

/// Un quintuple machine entièrement à zéro est la convention "absent".
pub fn normalize_machine(machine: [u8; 5]) -> Option<[u8; 5]> {
    if machine.iter().all(|&n| n == 0) {
        None
    } else {
        Some(machine)
    }
}

fn validate_numbers(numbers: &[u8; 5], label: &str) -> Result<()> {
    for &n in numbers {
        if n < NUMBER_MIN || n > NUMBER_MAX {
            bail!("Numéro {} {} hors limites (1-90)", label, n);
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("Numéro {} en double : {}", label, numbers[i]);
            }
        }
    }
    Ok(())
}

pub fn validate_date(date: &str) -> Result<()> {
    let parts: Vec<&str> = date.split('-').collect();
    let shape_ok = parts.len() == 3
        && parts[0].len() == 4
        && parts[1].len() == 2
        && parts[2].len() == 2
        && parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit()));
    if !shape_ok {
        bail!("Date invalide (format attendu AAAA-MM-JJ) : '{}'", date);
    }
    Ok(())
}

pub fn validate_record(record: &DrawRecord) -> Result<()> {
    if record.category.trim().is_empty() {
        bail!("Catégorie vide");
    }
    validate_date(&record.date)?;
    validate_numbers(&record.winning, "gagnant")?;
    if let Some(machine) = &record.machine {
        validate_numbers(machine, "machine")?;
    }
    Ok(())
}
