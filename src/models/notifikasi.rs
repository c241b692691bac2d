use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::date::days_until_from;

/// Batas "segera": jadwal dalam 90 hari ke depan
pub const BATAS_HARI_SEGERA: i64 = 90;

/// Jenis jadwal yang dipantau
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JenisJadwal {
    /// Kenaikan gaji berkala (siklus 2 tahun)
    Kgb,
    /// Kenaikan pangkat (siklus 4 tahun)
    Pangkat,
}

impl JenisJadwal {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Kgb => "Kenaikan Gaji Berikutnya",
            Self::Pangkat => "Kenaikan Pangkat Berikutnya",
        }
    }
}

/// Status sebuah tanggal jadwal relatif terhadap hari ini
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusJadwal {
    /// Jatuh tempo dalam 90 hari ke depan (termasuk hari ini)
    Segera,
    /// Sudah lewat jatuh tempo
    Terlewat,
    /// Masih lebih dari 90 hari
    Aman,
}

impl StatusJadwal {
    /// Klasifikasi tanggal jadwal: negatif terlewat, 0..=90 segera,
    /// selebihnya aman. Batas 0 dan 90 hari hanya didefinisikan di sini.
    pub fn klasifikasi(tanggal: NaiveDate, hari_ini: NaiveDate) -> Self {
        let selisih = days_until_from(tanggal, hari_ini);
        if selisih < 0 {
            Self::Terlewat
        } else if selisih <= BATAS_HARI_SEGERA {
            Self::Segera
        } else {
            Self::Aman
        }
    }
}

/// Satu item notifikasi jadwal.
///
/// Bersifat sementara: dihitung ulang dari data ASN pada setiap
/// pembacaan dan tidak pernah disimpan.
#[derive(Debug, Clone, Serialize)]
pub struct NotifItem {
    pub asn_id: i64,
    pub nama: String,
    pub nip: String,
    pub jenis: JenisJadwal,
    pub tanggal: NaiveDate,
    pub status: StatusJadwal,
    /// Selisih hari dari hari ini (negatif = sudah lewat)
    pub selisih_hari: i64,
}
