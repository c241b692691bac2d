/// Skema SQL untuk ASN Monitor

pub const SCHEMA_VERSION: i32 = 2;

pub const CREATE_TABLES: &str = r#"
-- Data pegawai (ASN)
CREATE TABLE IF NOT EXISTS asn (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nama TEXT NOT NULL,
    nip TEXT NOT NULL,
    tmt_pns TEXT,
    riwayat_tmt_kgb TEXT,
    riwayat_tmt_pangkat TEXT,
    jadwal_kgb_berikutnya TEXT,
    jadwal_pangkat_berikutnya TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_asn_nama ON asn(nama);
CREATE INDEX IF NOT EXISTS idx_asn_nip ON asn(nip);

-- Riwayat migrasi skema
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
