use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

use crate::models::{normalize_machine, DrawRecord};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    category      TEXT NOT NULL,
    date          TEXT NOT NULL,
    win_1         INTEGER NOT NULL,
    win_2         INTEGER NOT NULL,
    win_3         INTEGER NOT NULL,
    win_4         INTEGER NOT NULL,
    win_5         INTEGER NOT NULL,
    mac_1         INTEGER NOT NULL DEFAULT 0,
    mac_2         INTEGER NOT NULL DEFAULT 0,
    mac_3         INTEGER NOT NULL DEFAULT 0,
    mac_4         INTEGER NOT NULL DEFAULT 0,
    mac_5         INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (category, date)
);
";

pub fn db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("loto90.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossible d'ouvrir la base {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Échec de la migration")?;
    Ok(())
}

/// Insère un tirage ; retourne false si le couple (catégorie, date) existe déjà.
pub fn insert_record(conn: &Connection, record: &DrawRecord) -> Result<bool> {
    let machine = record.machine.unwrap_or([0; 5]);
    let changed = conn.execute(
        "INSERT OR IGNORE INTO draws (category, date, win_1, win_2, win_3, win_4, win_5, mac_1, mac_2, mac_3, mac_4, mac_5)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        rusqlite::params![
            record.category,
            record.date,
            record.winning[0],
            record.winning[1],
            record.winning[2],
            record.winning[3],
            record.winning[4],
            machine[0],
            machine[1],
            machine[2],
            machine[3],
            machine[4],
        ],
    ).context("Échec de l'insertion")?;
    Ok(changed > 0)
}

/// Tirages d'une catégorie, du plus ancien au plus récent.
pub fn fetch_category(conn: &Connection, category: &str) -> Result<Vec<DrawRecord>> {
    let mut stmt = conn.prepare(
        "SELECT category, date, win_1, win_2, win_3, win_4, win_5, mac_1, mac_2, mac_3, mac_4, mac_5
         FROM draws WHERE category = ?1 ORDER BY date ASC"
    )?;
    let records = stmt.query_map([category], |row| {
        Ok(DrawRecord {
            category: row.get(0)?,
            date: row.get(1)?,
            winning: [
                row.get::<_, u8>(2)?,
                row.get::<_, u8>(3)?,
                row.get::<_, u8>(4)?,
                row.get::<_, u8>(5)?,
                row.get::<_, u8>(6)?,
            ],
            machine: normalize_machine([
                row.get::<_, u8>(7)?,
                row.get::<_, u8>(8)?,
                row.get::<_, u8>(9)?,
                row.get::<_, u8>(10)?,
                row.get::<_, u8>(11)?,
            ]),
        })
    })?.collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

pub fn count_category(conn: &Connection, category: &str) -> Result<u32> {
    let count: u32 = conn.query_row(
        "SELECT COUNT(*) FROM draws WHERE category = ?1",
        [category],
        |row| row.get(0),
    )?;
    Ok(count)
}

pub fn count_records(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}

/// Catégories présentes en base avec leur nombre de tirages.
pub fn list_categories(conn: &Connection) -> Result<Vec<(String, u32)>> {
    let mut stmt = conn.prepare(
        "SELECT category, COUNT(*) FROM draws GROUP BY category ORDER BY category ASC",
    )?;
    let categories = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_record(category: &str, date: &str, machine: Option<[u8; 5]>) -> DrawRecord {
        DrawRecord {
            category: category.to_string(),
            date: date.to_string(),
            winning: [3, 17, 42, 68, 90],
            machine,
        }
    }

    #[test]
    fn test_insert_and_count() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert_eq!(count_records(&conn).unwrap(), 0);

        insert_record(&conn, &test_record("Étoile", "2024-01-01", None)).unwrap();
        assert_eq!(count_records(&conn).unwrap(), 1);
        assert_eq!(count_category(&conn, "Étoile").unwrap(), 1);
        assert_eq!(count_category(&conn, "Fortune").unwrap(), 0);
    }

    #[test]
    fn test_duplicate_category_date_ignored() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        assert!(insert_record(&conn, &test_record("Étoile", "2024-01-01", None)).unwrap());
        assert!(!insert_record(&conn, &test_record("Étoile", "2024-01-01", None)).unwrap());
        // Même date, autre catégorie : pas un doublon
        assert!(insert_record(&conn, &test_record("Fortune", "2024-01-01", None)).unwrap());
        assert_eq!(count_records(&conn).unwrap(), 2);
    }

    #[test]
    fn test_fetch_category_sorted_ascending() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        insert_record(&conn, &test_record("Étoile", "2024-01-15", None)).unwrap();
        insert_record(&conn, &test_record("Étoile", "2024-01-01", None)).unwrap();
        insert_record(&conn, &test_record("Fortune", "2024-01-08", None)).unwrap();

        let records = fetch_category(&conn, "Étoile").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, "2024-01-01");
        assert_eq!(records[1].date, "2024-01-15");
        assert!(records.iter().all(|r| r.category == "Étoile"));
    }

    #[test]
    fn test_machine_roundtrip_and_zero_collapse() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        insert_record(&conn, &test_record("Étoile", "2024-01-01", None)).unwrap();
        insert_record(
            &conn,
            &test_record("Étoile", "2024-01-08", Some([5, 25, 45, 65, 85])),
        )
        .unwrap();

        let records = fetch_category(&conn, "Étoile").unwrap();
        assert_eq!(records[0].machine, None);
        assert_eq!(records[1].machine, Some([5, 25, 45, 65, 85]));
    }

    #[test]
    fn test_list_categories() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        insert_record(&conn, &test_record("Fortune", "2024-01-01", None)).unwrap();
        insert_record(&conn, &test_record("Étoile", "2024-01-01", None)).unwrap();
        insert_record(&conn, &test_record("Fortune", "2024-01-08", None)).unwrap();

        let categories = list_categories(&conn).unwrap();
        assert_eq!(categories.len(), 2);
        assert!(categories.contains(&("Fortune".to_string(), 2)));
        assert!(categories.contains(&("Étoile".to_string(), 1)));
    }
}
