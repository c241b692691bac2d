use std::path::PathBuf;

/// Lokasi berkas basis data
pub fn get_database_path() -> PathBuf {
    directories::ProjectDirs::from("id", "asn-monitor", "AsnMonitor")
        .map(|dirs| dirs.data_dir().join("asn-monitor.db"))
        .unwrap_or_else(|| PathBuf::from("asn-monitor.db"))
}

/// Lokasi berkas konfigurasi
pub fn get_config_path() -> PathBuf {
    directories::ProjectDirs::from("id", "asn-monitor", "AsnMonitor")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}
