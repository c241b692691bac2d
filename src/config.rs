//! Konfigurasi aplikasi
//!
//! Urutan: nilai bawaan, lalu `config.toml` di direktori konfigurasi
//! platform (bila ada), lalu penimpaan lewat variabel lingkungan
//! `ASN_MONITOR_ADDR` dan `ASN_MONITOR_DB`.

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

use crate::utils::path::{get_config_path, get_database_path};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Alamat bind server HTTP
    pub listen_addr: SocketAddr,
    /// Lokasi berkas basis data SQLite
    pub database_path: PathBuf,
    /// Batas jumlah item pada /notifications
    pub batas_notif: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8990)),
            database_path: get_database_path(),
            batas_notif: 200,
        }
    }
}

impl Config {
    /// Muat konfigurasi lengkap
    pub fn load() -> Self {
        let mut config = Self::from_file(&get_config_path());

        if let Ok(addr) = std::env::var("ASN_MONITOR_ADDR") {
            match addr.parse() {
                Ok(addr) => config.listen_addr = addr,
                Err(_) => warn!("ASN_MONITOR_ADDR tidak valid, diabaikan: {:?}", addr),
            }
        }
        if let Ok(path) = std::env::var("ASN_MONITOR_DB") {
            config.database_path = PathBuf::from(path);
        }

        config
    }

    fn from_file(path: &std::path::Path) -> Self {
        let Ok(teks) = std::fs::read_to_string(path) else {
            return Self::default();
        };

        match toml::from_str(&teks) {
            Ok(config) => config,
            Err(e) => {
                warn!("config.toml tidak terbaca, memakai bawaan: {}", e);
                Self::default()
            }
        }
    }
}
