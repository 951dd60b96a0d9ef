use serde::Serialize;

const UNIT_STEP: f64 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    pub total_bytes: u64,
    pub count: usize,
}

/// Sums document sizes. A missing size contributes 0 bytes but still counts as a document.
pub fn aggregate<I>(sizes: I) -> StorageStats
where
    I: IntoIterator<Item = Option<u64>>,
{
    sizes
        .into_iter()
        .fold(StorageStats { total_bytes: 0, count: 0 }, |acc, size| StorageStats {
            total_bytes: acc.total_bytes.saturating_add(size.unwrap_or(0)),
            count: acc.count + 1,
        })
}

/// Human-readable size: integer bytes below 1 KB, otherwise two decimals in
/// KB, MB or GB. GB is the largest unit.
pub fn format_bytes(bytes: u64) -> String {
    let kb = 1024_u64;
    let mb = kb * 1024;
    let gb = mb * 1024;

    if bytes < kb {
        return format!("{bytes} B");
    }

    let value = bytes as f64;
    if bytes < mb {
        format!("{:.2} KB", value / UNIT_STEP)
    } else if bytes < gb {
        format!("{:.2} MB", value / (UNIT_STEP * UNIT_STEP))
    } else {
        format!("{:.2} GB", value / (UNIT_STEP * UNIT_STEP * UNIT_STEP))
    }
}

/// Per-document size: two decimals in every unit, bytes included.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= UNIT_STEP && unit < UNITS.len() - 1 {
        value /= UNIT_STEP;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5.00 GB");
    }

    #[test]
    fn test_gb_has_no_further_unit() {
        assert_eq!(format_bytes(2048 * 1024 * 1024 * 1024), "2048.00 GB");
    }

    #[test]
    fn test_format_size_keeps_decimals_for_bytes() {
        assert_eq!(format_size(0), "0.00 B");
        assert_eq!(format_size(512), "512.00 B");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_size(2048 * 1024 * 1024 * 1024), "2048.00 GB");
    }

    #[test]
    fn test_aggregate_empty() {
        let stats = aggregate(Vec::new());
        assert_eq!(stats, StorageStats { total_bytes: 0, count: 0 });
        assert_eq!(format_bytes(stats.total_bytes), "0 B");
    }

    #[test]
    fn test_aggregate_treats_missing_as_zero() {
        let stats = aggregate(vec![Some(1000), None, Some(536)]);
        assert_eq!(stats.total_bytes, 1536);
        assert_eq!(stats.count, 3);
    }
}
