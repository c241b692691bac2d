use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};
use tracing::warn;

use crate::models::{Asn, AsnInput, AsnPatch};
use crate::utils::date::parse_date;
use crate::utils::error::{AppError, AppResult};

const KOLOM: &str = "id, nama, nip, tmt_pns, riwayat_tmt_kgb, riwayat_tmt_pangkat, \
                     jadwal_kgb_berikutnya, jadwal_pangkat_berikutnya, created_at";

pub struct AsnRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AsnRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Seluruh data pegawai, yang terbaru dulu
    pub fn find_all(&self) -> AppResult<Vec<Asn>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM asn ORDER BY id DESC",
            KOLOM
        ))?;

        let daftar = stmt
            .query_map([], |row| Ok(Self::row_to_asn(row)))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(daftar)
    }

    /// Cari berdasarkan nama atau NIP (LIKE, tidak peka huruf besar)
    pub fn search(&self, kata: &str) -> AppResult<Vec<Asn>> {
        let kata = kata.trim();
        if kata.is_empty() {
            return self.find_all();
        }

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM asn WHERE nama LIKE ?1 OR nip LIKE ?1 ORDER BY id DESC",
            KOLOM
        ))?;

        let pola = format!("%{}%", kata);
        let daftar = stmt
            .query_map([pola], |row| Ok(Self::row_to_asn(row)))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(daftar)
    }

    /// Ambil satu pegawai lewat ID
    pub fn find_by_id(&self, id: i64) -> AppResult<Option<Asn>> {
        let conn = self.conn.lock().unwrap();
        Self::ambil(&conn, id)
    }

    /// Buat pegawai baru.
    ///
    /// Validasi dijalankan sebelum ada penulisan; field jadwal dihitung
    /// dari riwayatnya, apa pun yang dikirim pemanggil.
    pub fn create(&self, input: AsnInput) -> AppResult<Asn> {
        let asn = Asn::from_input(input);
        asn.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO asn (nama, nip, tmt_pns, riwayat_tmt_kgb, riwayat_tmt_pangkat,
                              jadwal_kgb_berikutnya, jadwal_pangkat_berikutnya)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                asn.nama,
                asn.nip,
                asn.tmt_pns,
                asn.riwayat_tmt_kgb,
                asn.riwayat_tmt_pangkat,
                asn.jadwal_kgb_berikutnya,
                asn.jadwal_pangkat_berikutnya,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::ambil(&conn, id)?
            .ok_or_else(|| AppError::other("baris yang baru dibuat tidak terbaca"))
    }

    /// Perbarui pegawai dengan patch parsial.
    ///
    /// Baca-ubah-tulis dalam satu genggaman kunci; jadwal turunan
    /// dihitung ulang di operasi yang sama, tidak pernah ditunda.
    /// `created_at` dan `id` tidak pernah ikut ditulis.
    pub fn update(&self, id: i64, patch: AsnPatch) -> AppResult<Asn> {
        let conn = self.conn.lock().unwrap();
        let mut asn = Self::ambil(&conn, id)?
            .ok_or_else(|| AppError::not_found(format!("ASN dengan id {}", id)))?;

        asn.terapkan(patch);
        asn.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        conn.execute(
            "UPDATE asn SET nama = ?1, nip = ?2, tmt_pns = ?3, riwayat_tmt_kgb = ?4,
                    riwayat_tmt_pangkat = ?5, jadwal_kgb_berikutnya = ?6,
                    jadwal_pangkat_berikutnya = ?7
             WHERE id = ?8",
            params![
                asn.nama,
                asn.nip,
                asn.tmt_pns,
                asn.riwayat_tmt_kgb,
                asn.riwayat_tmt_pangkat,
                asn.jadwal_kgb_berikutnya,
                asn.jadwal_pangkat_berikutnya,
                id,
            ],
        )?;

        Self::ambil(&conn, id)?
            .ok_or_else(|| AppError::other("baris hilang setelah pembaruan"))
    }

    /// Hapus pegawai. Idempoten: id yang tidak ada bukan kesalahan.
    pub fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM asn WHERE id = ?", [id])?;
        Ok(())
    }

    /// Jumlah pegawai tersimpan
    pub fn count(&self) -> AppResult<i64> {
        let conn = self.conn.lock().unwrap();
        let jumlah: i64 = conn.query_row("SELECT COUNT(*) FROM asn", [], |row| row.get(0))?;
        Ok(jumlah)
    }

    /// Impor massal dalam satu transaksi.
    ///
    /// Baris dengan id mempertahankan id-nya (menimpa bila sudah ada),
    /// baris tanpa id dibuat baru. Jadwal turunan dihitung ulang dan
    /// setiap baris divalidasi; satu baris gagal membatalkan semuanya.
    pub fn import_bulk(&self, daftar: Vec<Asn>) -> AppResult<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let mut jumlah = 0;

        for (urut, mut asn) in daftar.into_iter().enumerate() {
            asn.hitung_ulang_jadwal();
            asn.validate()
                .map_err(|e| AppError::validation(format!("baris {}: {}", urut + 1, e)))?;

            match asn.id {
                Some(id) => {
                    tx.execute(
                        "INSERT OR REPLACE INTO asn
                            (id, nama, nip, tmt_pns, riwayat_tmt_kgb, riwayat_tmt_pangkat,
                             jadwal_kgb_berikutnya, jadwal_pangkat_berikutnya, created_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8,
                                 COALESCE(?9, datetime('now')))",
                        params![
                            id,
                            asn.nama,
                            asn.nip,
                            asn.tmt_pns,
                            asn.riwayat_tmt_kgb,
                            asn.riwayat_tmt_pangkat,
                            asn.jadwal_kgb_berikutnya,
                            asn.jadwal_pangkat_berikutnya,
                            asn.created_at,
                        ],
                    )?;
                }
                None => {
                    tx.execute(
                        "INSERT INTO asn
                            (nama, nip, tmt_pns, riwayat_tmt_kgb, riwayat_tmt_pangkat,
                             jadwal_kgb_berikutnya, jadwal_pangkat_berikutnya, created_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7,
                                 COALESCE(?8, datetime('now')))",
                        params![
                            asn.nama,
                            asn.nip,
                            asn.tmt_pns,
                            asn.riwayat_tmt_kgb,
                            asn.riwayat_tmt_pangkat,
                            asn.jadwal_kgb_berikutnya,
                            asn.jadwal_pangkat_berikutnya,
                            asn.created_at,
                        ],
                    )?;
                }
            }
            jumlah += 1;
        }

        tx.commit()?;
        Ok(jumlah)
    }

    fn ambil(conn: &Connection, id: i64) -> AppResult<Option<Asn>> {
        let asn = conn
            .query_row(
                &format!("SELECT {} FROM asn WHERE id = ?", KOLOM),
                [id],
                |row| Ok(Self::row_to_asn(row)),
            )
            .optional()?;
        Ok(asn)
    }

    fn row_to_asn(row: &Row) -> Asn {
        Asn {
            id: row.get(0).ok(),
            nama: row.get(1).unwrap_or_default(),
            nip: row.get(2).unwrap_or_default(),
            tmt_pns: Self::baca_tanggal(row, 3, "tmt_pns"),
            riwayat_tmt_kgb: Self::baca_tanggal(row, 4, "riwayat_tmt_kgb"),
            riwayat_tmt_pangkat: Self::baca_tanggal(row, 5, "riwayat_tmt_pangkat"),
            jadwal_kgb_berikutnya: Self::baca_tanggal(row, 6, "jadwal_kgb_berikutnya"),
            jadwal_pangkat_berikutnya: Self::baca_tanggal(row, 7, "jadwal_pangkat_berikutnya"),
            created_at: row.get(8).ok(),
        }
    }

    /// Baca kolom tanggal; nilai tak terbaca menjadi None, bukan galat,
    /// agar satu baris rusak tidak menggagalkan pembacaan lainnya
    fn baca_tanggal(row: &Row, idx: usize, kolom: &str) -> Option<NaiveDate> {
        let teks = row.get::<_, Option<String>>(idx).ok().flatten()?;
        let hasil = parse_date(&teks);
        if hasil.is_none() {
            warn!("Kolom {} berisi tanggal tak terbaca, diabaikan: {:?}", kolom, teks);
        }
        hasil
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn tgl(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn masukan(nama: &str, nip: &str) -> AsnInput {
        AsnInput {
            nama: nama.into(),
            nip: nip.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_dan_find() {
        let db = setup_db();
        let repo = db.asns();

        let asn = repo
            .create(AsnInput {
                riwayat_tmt_kgb: Some(tgl(2023, 8, 1)),
                riwayat_tmt_pangkat: Some(tgl(2022, 1, 10)),
                ..masukan("Andi Saputra", "198501012010011001")
            })
            .unwrap();

        let id = asn.id.unwrap();
        assert!(id > 0);
        assert!(asn.created_at.is_some());
        // jadwal dihitung saat pembuatan
        assert_eq!(asn.jadwal_kgb_berikutnya, Some(tgl(2025, 8, 1)));
        assert_eq!(asn.jadwal_pangkat_berikutnya, Some(tgl(2026, 1, 10)));

        let lagi = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(lagi.nama, "Andi Saputra");
    }

    #[test]
    fn test_find_all_terbaru_dulu() {
        let db = setup_db();
        let repo = db.asns();

        repo.create(masukan("Andi", "1")).unwrap();
        repo.create(masukan("Budi", "2")).unwrap();
        repo.create(masukan("Citra", "3")).unwrap();

        let daftar = repo.find_all().unwrap();
        let nama: Vec<&str> = daftar.iter().map(|a| a.nama.as_str()).collect();
        assert_eq!(nama, vec!["Citra", "Budi", "Andi"]);
    }

    #[test]
    fn test_create_validasi_gagal_tanpa_tulis() {
        let db = setup_db();
        let repo = db.asns();

        let hasil = repo.create(masukan("", "123"));
        assert!(matches!(hasil, Err(AppError::Validation(_))));
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_update_merge_patch() {
        let db = setup_db();
        let repo = db.asns();

        let asn = repo
            .create(AsnInput {
                riwayat_tmt_kgb: Some(tgl(2023, 8, 1)),
                riwayat_tmt_pangkat: Some(tgl(2022, 1, 10)),
                ..masukan("Andi", "111")
            })
            .unwrap();
        let id = asn.id.unwrap();

        // patch nama saja: field lain bertahan
        let hasil = repo
            .update(
                id,
                AsnPatch {
                    nama: Some("Andi S.".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(hasil.nama, "Andi S.");
        assert_eq!(hasil.nip, "111");
        assert_eq!(hasil.jadwal_kgb_berikutnya, Some(tgl(2025, 8, 1)));
        assert_eq!(hasil.jadwal_pangkat_berikutnya, Some(tgl(2026, 1, 10)));
        assert_eq!(hasil.created_at, asn.created_at);

        // patch riwayat kgb: hanya jadwal kgb yang dihitung ulang
        let hasil = repo
            .update(
                id,
                AsnPatch {
                    riwayat_tmt_kgb: Some(tgl(2024, 3, 1)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(hasil.jadwal_kgb_berikutnya, Some(tgl(2026, 3, 1)));
        assert_eq!(hasil.jadwal_pangkat_berikutnya, Some(tgl(2026, 1, 10)));
    }

    #[test]
    fn test_update_tidak_ditemukan() {
        let db = setup_db();
        let repo = db.asns();

        let hasil = repo.update(999, AsnPatch::default());
        assert!(matches!(hasil, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_delete_idempoten() {
        let db = setup_db();
        let repo = db.asns();

        let id = repo.create(masukan("Andi", "1")).unwrap().id.unwrap();

        repo.delete(id).unwrap();
        assert!(repo.find_by_id(id).unwrap().is_none());

        // hapus kedua kali tetap Ok
        repo.delete(id).unwrap();
    }

    #[test]
    fn test_search() {
        let db = setup_db();
        let repo = db.asns();

        repo.create(masukan("Andi Saputra", "198501")).unwrap();
        repo.create(masukan("Budi Hartono", "199002")).unwrap();
        repo.create(masukan("Citra Andira", "199103")).unwrap();

        assert_eq!(repo.search("andi").unwrap().len(), 2);
        assert_eq!(repo.search("199002").unwrap().len(), 1);
        assert_eq!(repo.search("").unwrap().len(), 3);
        assert_eq!(repo.search("zzz").unwrap().len(), 0);
    }

    #[test]
    fn test_import_bulk() {
        let db = setup_db();
        let repo = db.asns();

        let mut lama = Asn::from_input(AsnInput {
            riwayat_tmt_kgb: Some(tgl(2023, 8, 1)),
            ..masukan("Andi", "1")
        });
        lama.id = Some(7);
        lama.created_at = Some("2024-01-01 00:00:00".into());

        let baru = Asn::from_input(masukan("Budi", "2"));

        let jumlah = repo.import_bulk(vec![lama, baru]).unwrap();
        assert_eq!(jumlah, 2);

        // id kiriman dipertahankan beserta created_at-nya
        let asn7 = repo.find_by_id(7).unwrap().unwrap();
        assert_eq!(asn7.nama, "Andi");
        assert_eq!(asn7.created_at.as_deref(), Some("2024-01-01 00:00:00"));
        assert_eq!(asn7.jadwal_kgb_berikutnya, Some(tgl(2025, 8, 1)));

        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_import_bulk_transaksional() {
        let db = setup_db();
        let repo = db.asns();

        let sah = Asn::from_input(masukan("Andi", "1"));
        let cacat = Asn::from_input(masukan("", "2"));

        let hasil = repo.import_bulk(vec![sah, cacat]);
        assert!(matches!(hasil, Err(AppError::Validation(_))));
        // baris sah ikut dibatalkan
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_tanggal_rusak_menjadi_kosong() {
        let db = setup_db();
        let repo = db.asns();

        repo.conn
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO asn (nama, nip, riwayat_tmt_kgb, jadwal_kgb_berikutnya)
                 VALUES ('Rusak', '9', 'bukan-tanggal', 'bukan-tanggal')",
                [],
            )
            .unwrap();

        let daftar = repo.find_all().unwrap();
        assert_eq!(daftar.len(), 1);
        assert_eq!(daftar[0].nama, "Rusak");
        assert_eq!(daftar[0].riwayat_tmt_kgb, None);
        assert_eq!(daftar[0].jadwal_kgb_berikutnya, None);
    }
}
