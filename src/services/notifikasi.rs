//! Agregator notifikasi jadwal.
//!
//! Memindai seluruh data pegawai dan menurunkan daftar jadwal yang
//! segera jatuh tempo atau sudah terlewat. Hasilnya tidak pernah
//! disimpan; setiap pembacaan menghitung ulang dari satu snapshot data.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::models::{Asn, JenisJadwal, NotifItem, StatusJadwal};
use crate::utils::date::days_until_from;

/// Hasil pemindaian, terbagi per status
#[derive(Debug, Clone, Default, Serialize)]
pub struct Notifikasi {
    pub segera: Vec<NotifItem>,
    pub terlewat: Vec<NotifItem>,
}

impl Notifikasi {
    pub fn total(&self) -> usize {
        self.segera.len() + self.terlewat.len()
    }

    /// Gabungkan kedua daftar, tanggal terdekat dulu
    pub fn gabung(self) -> Vec<NotifItem> {
        let mut semua = self.terlewat;
        semua.extend(self.segera);
        semua.sort_by_key(|n| n.tanggal);
        semua
    }
}

/// Pindai `daftar` dan kelompokkan jadwal yang jatuh tempo.
///
/// Per pegawai paling banyak dua kandidat (KGB dan pangkat), hanya bila
/// tanggal jadwalnya ada. Jadwal berstatus aman dibuang. Kedua daftar
/// hasil diurutkan menaik menurut tanggal; pengurutan stabil sehingga
/// pemanggilan berulang atas data yang sama memberi urutan yang sama.
pub fn kumpulkan(daftar: &[Asn], hari_ini: NaiveDate) -> Notifikasi {
    let mut hasil = Notifikasi::default();

    for asn in daftar {
        let Some(asn_id) = asn.id else { continue };

        let kandidat = [
            (JenisJadwal::Kgb, asn.jadwal_kgb_berikutnya),
            (JenisJadwal::Pangkat, asn.jadwal_pangkat_berikutnya),
        ];

        for (jenis, tanggal) in kandidat {
            let Some(tanggal) = tanggal else { continue };

            let status = StatusJadwal::klasifikasi(tanggal, hari_ini);
            let item = NotifItem {
                asn_id,
                nama: asn.nama.clone(),
                nip: asn.nip.clone(),
                jenis,
                tanggal,
                status,
                selisih_hari: days_until_from(tanggal, hari_ini),
            };

            match status {
                StatusJadwal::Segera => hasil.segera.push(item),
                StatusJadwal::Terlewat => hasil.terlewat.push(item),
                StatusJadwal::Aman => {}
            }
        }
    }

    // sort_by_key stabil: urutan masukan bertahan untuk tanggal sama
    hasil.segera.sort_by_key(|n| n.tanggal);
    hasil.terlewat.sort_by_key(|n| n.tanggal);
    hasil
}

pub fn kumpulkan_hari_ini(daftar: &[Asn]) -> Notifikasi {
    kumpulkan(daftar, Local::now().date_naive())
}

/// Angka ikhtisar untuk dasbor
#[derive(Debug, Clone, Serialize)]
pub struct Ringkasan {
    pub total_pegawai: usize,
    pub segera: usize,
    pub terlewat: usize,
}

pub fn ringkasan(daftar: &[Asn], hari_ini: NaiveDate) -> Ringkasan {
    let notif = kumpulkan(daftar, hari_ini);
    Ringkasan {
        total_pegawai: daftar.len(),
        segera: notif.segera.len(),
        terlewat: notif.terlewat.len(),
    }
}

/// Status jadwal terdekat seorang pegawai.
///
/// Tanggal jadwal paling awal menentukan status baris pada tampilan
/// daftar; tanpa jadwal sama sekali dianggap aman.
pub fn status_asn(asn: &Asn, hari_ini: NaiveDate) -> StatusJadwal {
    [asn.jadwal_kgb_berikutnya, asn.jadwal_pangkat_berikutnya]
        .into_iter()
        .flatten()
        .min()
        .map(|tanggal| StatusJadwal::klasifikasi(tanggal, hari_ini))
        .unwrap_or(StatusJadwal::Aman)
}
