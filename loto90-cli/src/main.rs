mod display;

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use loto90_db::db::{
    count_records, db_path, fetch_category, insert_record, list_categories, migrate, open_db,
};
use loto90_db::models::{
    normalize_machine, validate_date, validate_record, DrawRecord, NUMBER_MAX, NUMBER_MIN,
};
use loto90_engine::sampler::date_seed;
use loto90_engine::{analyze_regularity, compute_statistics, predict};

use crate::display::{
    display_bundle, display_categories, display_records, display_regularity, display_stats,
};

#[derive(Parser)]
#[command(name = "loto90", about = "Analyseur de tirages Loto 5/90")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ajouter un tirage manuellement
    Add,

    /// Lister les derniers tirages d'une catégorie
    List {
        /// Catégorie de tirage (ex: Étoile)
        category: String,

        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// Afficher les catégories connues
    Categories,

    /// Prédire le prochain tirage d'une catégorie
    Predict {
        /// Catégorie de tirage
        category: String,

        /// Seed pour la reproductibilité (défaut: date du jour AAAAMMJJ)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Statistiques descriptives d'une catégorie
    Stats {
        /// Catégorie de tirage
        category: String,
    },

    /// Profil de régularité d'un numéro dans une catégorie
    Regularity {
        /// Catégorie de tirage
        category: String,

        /// Numéro cible (1-90)
        number: u8,
    },

    /// Afficher le chemin de la base de données
    DbPath,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let path = db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Add => cmd_add(&conn),
        Command::List { category, last } => cmd_list(&conn, &category, last),
        Command::Categories => cmd_categories(&conn),
        Command::Predict { category, seed } => cmd_predict(&conn, &category, seed),
        Command::Stats { category } => cmd_stats(&conn, &category),
        Command::Regularity { category, number } => cmd_regularity(&conn, &category, number),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Tirages d'une catégorie, ou None avec un message d'orientation.
fn fetch_or_guide(
    conn: &loto90_db::rusqlite::Connection,
    category: &str,
) -> Result<Option<Vec<DrawRecord>>> {
    if count_records(conn)? == 0 {
        println!("Base vide. Lancez d'abord : loto90 add");
        return Ok(None);
    }
    let records = fetch_category(conn, category)?;
    if records.is_empty() {
        println!("Aucun tirage pour la catégorie '{category}'. Catégories connues :");
        display_categories(&list_categories(conn)?);
        return Ok(None);
    }
    Ok(Some(records))
}

fn cmd_list(conn: &loto90_db::rusqlite::Connection, category: &str, last: usize) -> Result<()> {
    let Some(records) = fetch_or_guide(conn, category)? else {
        return Ok(());
    };
    // Les plus récents d'abord
    let recent: Vec<DrawRecord> = records.iter().rev().take(last).cloned().collect();
    display_records(&recent);
    Ok(())
}

fn cmd_categories(conn: &loto90_db::rusqlite::Connection) -> Result<()> {
    display_categories(&list_categories(conn)?);
    Ok(())
}

fn cmd_predict(
    conn: &loto90_db::rusqlite::Connection,
    category: &str,
    seed: Option<u64>,
) -> Result<()> {
    let Some(records) = fetch_or_guide(conn, category)? else {
        return Ok(());
    };
    let today = Local::now().date_naive();
    let seed = seed.unwrap_or_else(date_seed);
    let bundle = predict(&records, category, today, Some(seed));
    display_bundle(&bundle);
    Ok(())
}

fn cmd_stats(conn: &loto90_db::rusqlite::Connection, category: &str) -> Result<()> {
    let Some(records) = fetch_or_guide(conn, category)? else {
        return Ok(());
    };
    let report = compute_statistics(&records, category);
    display_stats(&report);
    Ok(())
}

fn cmd_regularity(
    conn: &loto90_db::rusqlite::Connection,
    category: &str,
    number: u8,
) -> Result<()> {
    if !(NUMBER_MIN..=NUMBER_MAX).contains(&number) {
        bail!("Numéro {} hors limites (1-90)", number);
    }
    let Some(records) = fetch_or_guide(conn, category)? else {
        return Ok(());
    };
    let report = analyze_regularity(&records, number, category);
    if report.occurrence_count == 0 {
        println!(
            "Le numéro {} n'a jamais été observé dans la catégorie '{}'.",
            number, category
        );
        return Ok(());
    }
    display_regularity(&report);
    Ok(())
}

fn cmd_add(conn: &loto90_db::rusqlite::Connection) -> Result<()> {
    println!("Ajout d'un tirage manuellement\n");

    let category = prompt("Catégorie (ex: Étoile) : ")?;
    let date = prompt_date()?;
    let winning = prompt_numbers("5 numéros gagnants (séparés par des espaces, 1-90) : ")?;
    let machine = prompt_machine()?;

    let record = DrawRecord {
        category,
        date,
        winning,
        machine,
    };
    validate_record(&record)?;

    println!("\nTirage à insérer :");
    display_records(&[record.clone()]);

    let confirm = prompt("\nConfirmer l'insertion ? (o/n) : ")?;
    if confirm.trim().to_lowercase() == "o" {
        let inserted = insert_record(conn, &record)?;
        if inserted {
            println!("Tirage inséré avec succès.");
        } else {
            println!("Ce tirage existe déjà pour cette catégorie et cette date.");
        }
    } else {
        println!("Insertion annulée.");
    }

    Ok(())
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    Ok(input.trim().to_string())
}

fn prompt_date() -> Result<String> {
    loop {
        let input = prompt("Date (AAAA-MM-JJ) : ")?;
        if validate_date(&input).is_ok() {
            return Ok(input);
        }
        println!("Format de date invalide. Réessayez.");
    }
}

fn parse_quintuple(input: &str) -> Option<[u8; 5]> {
    let numbers: Result<Vec<u8>, _> = input
        .split_whitespace()
        .map(|s| s.parse::<u8>())
        .collect();
    match numbers {
        Ok(v) if v.len() == 5 => Some([v[0], v[1], v[2], v[3], v[4]]),
        _ => None,
    }
}

fn quintuple_valid(numbers: &[u8; 5]) -> bool {
    let mut sorted = *numbers;
    sorted.sort();
    numbers.iter().all(|n| (NUMBER_MIN..=NUMBER_MAX).contains(n))
        && sorted.windows(2).all(|w| w[0] != w[1])
}

fn prompt_numbers(msg: &str) -> Result<[u8; 5]> {
    loop {
        let input = prompt(msg)?;
        match parse_quintuple(&input) {
            Some(numbers) if quintuple_valid(&numbers) => return Ok(numbers),
            Some(_) => println!("Numéros invalides (1-90, pas de doublons). Réessayez."),
            None => println!("Entrez exactement 5 numéros. Réessayez."),
        }
    }
}

fn prompt_machine() -> Result<Option<[u8; 5]>> {
    loop {
        let input = prompt("5 numéros machine (vide si absent) : ")?;
        if input.is_empty() {
            return Ok(None);
        }
        // "0 0 0 0 0" est la convention "absent"
        match parse_quintuple(&input).map(normalize_machine) {
            Some(None) => return Ok(None),
            Some(Some(numbers)) if quintuple_valid(&numbers) => return Ok(Some(numbers)),
            Some(Some(_)) => println!("Numéros invalides (1-90, pas de doublons). Réessayez."),
            None => println!("Entrez 5 numéros ou laissez vide. Réessayez."),
        }
    }
}
