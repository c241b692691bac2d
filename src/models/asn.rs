use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::date::add_years;

/// Siklus kenaikan gaji berkala: 2 tahun
pub const SIKLUS_KGB_TAHUN: i32 = 2;
/// Siklus kenaikan pangkat: 4 tahun
pub const SIKLUS_PANGKAT_TAHUN: i32 = 4;

/// Data seorang pegawai (ASN).
///
/// Kedua field `jadwal_*` adalah turunan murni dari field `riwayat_*`-nya
/// dan dihitung ulang lewat [`Asn::hitung_ulang_jadwal`] pada setiap jalur
/// tulis. Keduanya tidak pernah dapat diubah langsung oleh pemanggil.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asn {
    pub id: Option<i64>,
    pub nama: String,
    pub nip: String,
    pub tmt_pns: Option<NaiveDate>,
    pub riwayat_tmt_kgb: Option<NaiveDate>,
    pub riwayat_tmt_pangkat: Option<NaiveDate>,
    /// Turunan: riwayat_tmt_kgb + 2 tahun
    pub jadwal_kgb_berikutnya: Option<NaiveDate>,
    /// Turunan: riwayat_tmt_pangkat + 4 tahun
    pub jadwal_pangkat_berikutnya: Option<NaiveDate>,
    /// Diisi penyimpanan saat pembuatan, tidak pernah berubah
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Data masukan saat membuat ASN baru.
///
/// Tidak memuat field jadwal: nilai jadwal kiriman pemanggil diabaikan
/// (field JSON yang tidak dikenal dibuang oleh serde).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AsnInput {
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub nip: String,
    #[serde(default, deserialize_with = "crate::utils::date::tanggal_lunak::deserialize")]
    pub tmt_pns: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::utils::date::tanggal_lunak::deserialize")]
    pub riwayat_tmt_kgb: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::utils::date::tanggal_lunak::deserialize")]
    pub riwayat_tmt_pangkat: Option<NaiveDate>,
}

/// Patch parsial untuk pembaruan.
///
/// Field yang tidak dikirim (atau tidak terbaca) mempertahankan nilai
/// lama, mengikuti semantik merge-patch. Mengosongkan tanggal lewat patch
/// tidak dimungkinkan.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AsnPatch {
    pub nama: Option<String>,
    pub nip: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::date::tanggal_lunak::deserialize")]
    pub tmt_pns: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::utils::date::tanggal_lunak::deserialize")]
    pub riwayat_tmt_kgb: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::utils::date::tanggal_lunak::deserialize")]
    pub riwayat_tmt_pangkat: Option<NaiveDate>,
}

impl Asn {
    pub fn from_input(input: AsnInput) -> Self {
        let mut asn = Self {
            id: None,
            nama: input.nama,
            nip: input.nip,
            tmt_pns: input.tmt_pns,
            riwayat_tmt_kgb: input.riwayat_tmt_kgb,
            riwayat_tmt_pangkat: input.riwayat_tmt_pangkat,
            jadwal_kgb_berikutnya: None,
            jadwal_pangkat_berikutnya: None,
            created_at: None,
        };
        asn.hitung_ulang_jadwal();
        asn
    }

    /// Hitung ulang kedua field jadwal dari field riwayatnya.
    ///
    /// Satu-satunya tempat aturan +2/+4 tahun diterapkan; dipanggil di
    /// jalur create maupun update sebelum data disimpan.
    pub fn hitung_ulang_jadwal(&mut self) {
        self.jadwal_kgb_berikutnya = self
            .riwayat_tmt_kgb
            .map(|d| add_years(d, SIKLUS_KGB_TAHUN));
        self.jadwal_pangkat_berikutnya = self
            .riwayat_tmt_pangkat
            .map(|d| add_years(d, SIKLUS_PANGKAT_TAHUN));
    }

    /// Terapkan patch parsial, lalu hitung ulang jadwal turunan
    pub fn terapkan(&mut self, patch: AsnPatch) {
        if let Some(nama) = patch.nama {
            self.nama = nama;
        }
        if let Some(nip) = patch.nip {
            self.nip = nip;
        }
        if let Some(tmt) = patch.tmt_pns {
            self.tmt_pns = Some(tmt);
        }
        if let Some(tmt) = patch.riwayat_tmt_kgb {
            self.riwayat_tmt_kgb = Some(tmt);
        }
        if let Some(tmt) = patch.riwayat_tmt_pangkat {
            self.riwayat_tmt_pangkat = Some(tmt);
        }
        self.hitung_ulang_jadwal();
    }

    pub fn validate(&self) -> Result<(), AsnValidationError> {
        if self.nama.trim().is_empty() {
            return Err(AsnValidationError::NamaKosong);
        }
        if self.nip.trim().is_empty() {
            return Err(AsnValidationError::NipKosong);
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AsnValidationError {
    #[error("Nama wajib diisi")]
    NamaKosong,
    #[error("NIP wajib diisi")]
    NipKosong,
}
