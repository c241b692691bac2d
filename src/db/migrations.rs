use rusqlite::Connection;
use tracing::info;

use super::schema::{CREATE_TABLES, SCHEMA_VERSION};
use crate::utils::error::AppResult;

/// Jalankan semua migrasi yang diperlukan
pub fn run_migrations(conn: &Connection) -> AppResult<()> {
    let current_version = get_current_version(conn)?;

    if current_version == 0 {
        // Basis data baru - buat semuanya
        info!("Membuat basis data baru dengan skema versi {}", SCHEMA_VERSION);
        initial_setup(conn)?;
    } else if current_version < SCHEMA_VERSION {
        // Perbarui basis data lama
        info!(
            "Memigrasi basis data dari versi {} ke {}",
            current_version, SCHEMA_VERSION
        );
        migrate_from(conn, current_version)?;
    } else {
        info!("Basis data sudah mutakhir (versi {})", current_version);
    }

    Ok(())
}

fn get_current_version(conn: &Connection) -> AppResult<i32> {
    // Periksa apakah tabel schema_migrations sudah ada
    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_migrations')",
        [],
        |row| row.get(0),
    )?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> = conn
        .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
            row.get(0)
        })
        .ok();

    Ok(version.unwrap_or(0))
}

fn initial_setup(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(CREATE_TABLES)?;

    conn.execute(
        "INSERT INTO schema_migrations (version) VALUES (?)",
        [SCHEMA_VERSION],
    )?;

    info!("Penyiapan awal selesai");
    Ok(())
}

fn migrate_from(conn: &Connection, from_version: i32) -> AppResult<()> {
    // Jalankan migrasi bertahap
    for version in (from_version + 1)..=SCHEMA_VERSION {
        match version {
            2 => migrate_v1_to_v2(conn)?,
            _ => {}
        }

        conn.execute(
            "INSERT INTO schema_migrations (version) VALUES (?)",
            [version],
        )?;

        info!("Bermigrasi ke versi {}", version);
    }

    Ok(())
}

/// Migrasi v1 -> v2: tambahkan indeks NIP
///
/// Pencarian lewat NIP pada v1 memindai seluruh tabel.
fn migrate_v1_to_v2(conn: &Connection) -> AppResult<()> {
    info!("Migrasi v2: menambahkan indeks idx_asn_nip");

    conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_asn_nip ON asn(nip);")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_initial_migration() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"asn".to_string()));
        assert!(tables.contains(&"schema_migrations".to_string()));
    }

    #[test]
    fn test_idempotent_migration() {
        let conn = Connection::open_in_memory().unwrap();

        // Jalankan migrasi dua kali, tidak boleh gagal
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let version = get_current_version(&conn).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }
}
