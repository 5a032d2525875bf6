//! Human-readable byte sizes.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with 1024-based units.
///
/// Values under 10 in any unit above bytes get one decimal place; everything
/// else is shown as an integer. TB is the largest unit.
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let places = if unit > 0 && value < 10.0 { 1 } else { 0 };
    format!("{value:.places$} {}", UNITS[unit])
}
