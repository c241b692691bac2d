use chrono::{Datelike, Local, NaiveDate};

/// Parse tanggal dari string (format fleksibel)
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Coba beberapa format
    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%Y/%m/%d", // 2024/01/15
        "%d-%m-%Y", // 15-01-2024
        "%d/%m/%Y", // 15/01/2024
        "%Y%m%d",   // 20240115
    ];

    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    None
}

/// Format tanggal untuk tampilan
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Geser tahun sebanyak `years` (boleh negatif).
///
/// 29 Februari jatuh ke 28 Februari bila tahun tujuan bukan kabisat.
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(date)
}

/// Selisih hari dari `today` ke `date`.
///
/// Hari ini = 0, kemarin = -1. Tanggal yang jatuh tempo lebih awal hari
/// ini tetap bernilai 0 sampai lewat tengah malam.
pub fn days_until_from(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Selisih hari dihitung dari tanggal lokal hari ini
pub fn days_until(date: NaiveDate) -> i64 {
    days_until_from(date, Local::now().date_naive())
}

/// Apakah `date` jatuh dalam `days` hari ke depan (termasuk hari ini)
pub fn within_next_days_from(date: NaiveDate, days: i64, today: NaiveDate) -> bool {
    let n = days_until_from(date, today);
    n >= 0 && n <= days
}

pub fn within_next_days(date: NaiveDate, days: i64) -> bool {
    within_next_days_from(date, days, Local::now().date_naive())
}

/// Serde helper untuk field tanggal dari klien.
///
/// Nilai kosong atau tak terbaca diperlakukan sebagai tidak ada, bukan
/// sebagai kegagalan permintaan. Nilai tak terbaca dicatat di log.
pub mod tanggal_lunak {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};
    use tracing::warn;

    use super::parse_date;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(|s| {
            if s.trim().is_empty() {
                return None;
            }
            let hasil = parse_date(s);
            if hasil.is_none() {
                warn!("Tanggal tidak dikenali, diabaikan: {:?}", s);
            }
            hasil
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tgl(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-15"), Some(tgl(2024, 1, 15)));
        assert_eq!(parse_date("15-01-2024"), Some(tgl(2024, 1, 15)));
        assert_eq!(parse_date("15/01/2024"), Some(tgl(2024, 1, 15)));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("bukan tanggal"), None);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(tgl(2025, 8, 1)), "2025-08-01");
    }

    #[test]
    fn test_add_years() {
        assert_eq!(add_years(tgl(2020, 3, 15), 2), tgl(2022, 3, 15));
        assert_eq!(add_years(tgl(2020, 3, 15), 4), tgl(2024, 3, 15));
        assert_eq!(add_years(tgl(2022, 3, 15), -2), tgl(2020, 3, 15));
    }

    #[test]
    fn test_add_years_kabisat() {
        // 29 Feb ke tahun non-kabisat jatuh ke 28 Feb
        assert_eq!(add_years(tgl(2020, 2, 29), 1), tgl(2021, 2, 28));
        // kabisat ke kabisat tetap 29 Feb
        assert_eq!(add_years(tgl(2020, 2, 29), 4), tgl(2024, 2, 29));
    }

    #[test]
    fn test_add_years_bolak_balik() {
        // selain 29 Feb, +n lalu -n kembali ke tanggal semula
        for &(y, m, d) in &[(2023, 8, 1), (2022, 1, 10), (2024, 12, 31)] {
            let asal = tgl(y, m, d);
            assert_eq!(add_years(add_years(asal, 4), -4), asal);
        }
    }

    #[test]
    fn test_days_until_from() {
        let hari_ini = tgl(2025, 6, 1);
        assert_eq!(days_until_from(hari_ini, hari_ini), 0);
        assert_eq!(days_until_from(tgl(2025, 5, 31), hari_ini), -1);
        assert_eq!(days_until_from(tgl(2025, 6, 11), hari_ini), 10);
    }

    #[test]
    fn test_within_next_days() {
        let hari_ini = tgl(2025, 6, 1);
        assert!(within_next_days_from(hari_ini, 90, hari_ini));
        assert!(within_next_days_from(tgl(2025, 8, 30), 90, hari_ini)); // hari ke-90
        assert!(!within_next_days_from(tgl(2025, 8, 31), 90, hari_ini)); // hari ke-91
        assert!(!within_next_days_from(tgl(2025, 5, 31), 90, hari_ini)); // kemarin
    }

    #[test]
    fn test_tanggal_lunak() {
        #[derive(serde::Deserialize)]
        struct Uji {
            #[serde(default, deserialize_with = "tanggal_lunak::deserialize")]
            tanggal: Option<NaiveDate>,
        }

        let a: Uji = serde_json::from_str(r#"{"tanggal": "2024-01-15"}"#).unwrap();
        assert_eq!(a.tanggal, Some(tgl(2024, 1, 15)));

        let b: Uji = serde_json::from_str(r#"{"tanggal": ""}"#).unwrap();
        assert_eq!(b.tanggal, None);

        let c: Uji = serde_json::from_str(r#"{"tanggal": "xx-yy"}"#).unwrap();
        assert_eq!(c.tanggal, None);

        let d: Uji = serde_json::from_str(r#"{"tanggal": null}"#).unwrap();
        assert_eq!(d.tanggal, None);

        let e: Uji = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(e.tanggal, None);
    }
}
