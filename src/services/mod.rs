//! Layanan di atas penyimpanan.
//!
//! Berisi logika yang bukan milik lapisan HTTP maupun basis data.

pub mod notifikasi;

pub use notifikasi::{kumpulkan, kumpulkan_hari_ini, ringkasan, status_asn, Notifikasi, Ringkasan};
