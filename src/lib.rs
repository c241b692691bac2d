//! ASN Monitor — pemantauan jadwal kenaikan gaji berkala & kenaikan
//! pangkat ASN
//!
//! Server HTTP kecil di atas SQLite: CRUD data pegawai serta agregasi
//! notifikasi jadwal yang jatuh tempo dalam 90 hari atau sudah terlewat.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod utils;

// Re-exports
pub use config::Config;
pub use db::Database;
pub use models::*;
