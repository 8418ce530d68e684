use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use loto90_db::models::DrawRecord;
use loto90_engine::confidence::Confidence;
use loto90_engine::{PredictionBundle, RegularityReport, StatisticsReport};

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn confidence_cell(confidence: Confidence) -> Cell {
    let color = match confidence {
        Confidence::VeryLow => Color::Red,
        Confidence::Low => Color::Yellow,
        Confidence::Medium => Color::White,
        Confidence::High => Color::Green,
    };
    Cell::new(confidence.to_string()).fg(color)
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn display_records(records: &[DrawRecord]) {
    if records.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = new_table(vec!["Date", "Catégorie", "Gagnants", "Machine"]);
    for record in records {
        let mut winning = record.winning;
        winning.sort();
        let machine = match record.machine {
            Some(mut m) => {
                m.sort();
                join_numbers(&m)
            }
            None => "—".to_string(),
        };
        table.add_row(vec![
            &record.date,
            &record.category,
            &join_numbers(&winning),
            &machine,
        ]);
    }
    println!("{table}");
}

pub fn display_categories(categories: &[(String, u32)]) {
    if categories.is_empty() {
        println!("Aucune catégorie en base.");
        return;
    }

    let mut table = new_table(vec!["Catégorie", "Tirages"]);
    for (name, count) in categories {
        table.add_row(vec![name, &count.to_string()]);
    }
    println!("{table}");
}

pub fn display_bundle(bundle: &PredictionBundle) {
    println!(
        "\n🎯 Prédictions pour {} ({} tirages analysés)\n",
        bundle.category, bundle.analyzed_count
    );

    let mut table = new_table(vec!["Méthode", "Numéros", "Confiance", "Justification"]);
    for result in &bundle.results {
        table.add_row(vec![
            Cell::new(&result.method),
            Cell::new(join_numbers(&result.numbers)),
            confidence_cell(result.confidence),
            Cell::new(&result.explanation),
        ]);
    }
    println!("{table}");

    println!(
        "\nRecommandation : {} (confiance {})",
        join_numbers(&bundle.recommended.numbers),
        bundle.recommended.confidence
    );
}

fn display_number_ranking(title: &str, entries: &[(u8, u32)]) {
    if entries.is_empty() {
        return;
    }
    println!("\n── {title} ──");
    let mut table = new_table(vec!["Numéro", "Occurrences"]);
    for &(n, count) in entries {
        table.add_row(vec![format!("{:2}", n), count.to_string()]);
    }
    println!("{table}");
}

pub fn display_stats(report: &StatisticsReport) {
    println!(
        "\n📊 Statistiques de {} ({} tirages)\n",
        report.category, report.analyzed_count
    );

    display_number_ranking("Gagnants les plus fréquents", &report.top_winning);
    display_number_ranking("Gagnants les moins fréquents", &report.bottom_winning);
    display_number_ranking("Machine les plus fréquents", &report.top_machine);
    display_number_ranking("Machine les moins fréquents", &report.bottom_machine);

    if !report.top_pairs.is_empty() {
        println!("\n── Paires les plus associées ──");
        let mut table = new_table(vec!["Paire", "Occurrences"]);
        for &((a, b), count) in &report.top_pairs {
            table.add_row(vec![format!("{:2} & {:2}", a, b), count.to_string()]);
        }
        println!("{table}");
    }

    println!("\n── Parité ──");
    println!(
        "Impairs par tirage : {:.2}   Pairs par tirage : {:.2}",
        report.average_odds, report.average_evens
    );
    let mut table = new_table(vec!["Impairs", "Tirages"]);
    for (odds, &count) in report.odd_histogram.iter().enumerate() {
        table.add_row(vec![odds.to_string(), count.to_string()]);
    }
    println!("{table}");

    println!("\n── Sommes des quintés ──");
    match (report.min_sum, report.max_sum) {
        (Some(min), Some(max)) => println!(
            "Minimum : {}   Maximum : {}   Moyenne : {:.2}",
            min, max, report.average_sum
        ),
        _ => println!("Aucun tirage analysé."),
    }
}

pub fn display_regularity(report: &RegularityReport) {
    println!(
        "\n🔁 Régularité du numéro {} dans {} : {} apparitions\n",
        report.target, report.category, report.occurrence_count
    );

    display_number_ranking("Sortent le plus souvent avec lui", &report.top_cooccurring);
    display_number_ranking("Sortent le plus au tirage suivant", &report.top_next_draw);
}
