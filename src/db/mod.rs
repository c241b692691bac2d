pub mod asn_repo;
pub mod migrations;
pub mod schema;

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub use asn_repo::AsnRepository;

use crate::utils::error::AppResult;

/// Pembungkus basis data dengan akses thread-safe.
///
/// Dibuat eksplisit di titik masuk program dan dioper ke pemakainya;
/// tidak ada koneksi global.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Buka atau buat basis data
    pub fn open(path: &Path) -> AppResult<Self> {
        // Buat direktori induk bila belum ada
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Konfigurasi SQLite
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA busy_timeout = 5000;
            ",
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Buka basis data in-memory (untuk pengujian)
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.migrate()?;
        Ok(db)
    }

    /// Jalankan migrasi skema
    pub fn migrate(&self) -> AppResult<()> {
        let conn = self.conn.lock().unwrap();
        migrations::run_migrations(&conn)
    }

    /// Ambil repository ASN
    pub fn asns(&self) -> AsnRepository {
        AsnRepository::new(Arc::clone(&self.conn))
    }

    /// Waktu penyimpanan saat ini; dipakai pemeriksaan kesehatan untuk
    /// membuktikan penyimpanan masih dapat dijangkau
    pub fn now(&self) -> AppResult<String> {
        let conn = self.conn.lock().unwrap();
        let now: String = conn.query_row("SELECT datetime('now')", [], |row| row.get(0))?;
        Ok(now)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}
