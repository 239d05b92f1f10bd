use std::path::Path;

const KIB: u64 = 1024;
const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

/// Format byte count as human-readable string.
///
/// Moves up a unit once the value would print as `1024.00`.
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / KIB as f64;
    let mut unit = 0;
    while unit + 1 < UNITS.len() && (value * 100.0).round() >= 1024.0 * 100.0 {
        value /= KIB as f64;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

/// Shorten a path for display by replacing the home dir with `~`.
pub fn display_path(path: &Path, home: Option<&Path>) -> String {
    match home.and_then(|h| path.strip_prefix(h).ok()) {
        Some(relative) => format!("~/{}", relative.display()),
        None => path.display().to_string(),
    }
}
