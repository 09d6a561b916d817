use colored::Colorize;

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", title.cyan().bold());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Print a tree item at the given depth
pub fn item(depth: usize, msg: &str) {
    println!("{}{} {}", "  ".repeat(depth), "•".dimmed(), msg);
}

/// Color a health string the way the service means it
pub fn health(health: &str) -> String {
    match health {
        "OK" => health.green().to_string(),
        "Warning" => health.yellow().to_string(),
        "Critical" => health.red().bold().to_string(),
        "" => "unknown".dimmed().to_string(),
        other => other.to_string(),
    }
}

// ============================================================================
// Size Formatting
// ============================================================================

// Drive vendors and the service count in powers of ten.
const KB: u64 = 1000;
const MB: u64 = KB * 1000;
const GB: u64 = MB * 1000;
const TB: u64 = GB * 1000;

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(999), "999 B");
    }

    #[test]
    fn test_format_size_decimal_units() {
        assert_eq!(format_size(1_500), "1.5 KB");
        assert_eq!(format_size(100_000_000), "100.0 MB");
        assert_eq!(format_size(300_000_000_000), "300.0 GB");
        assert_eq!(format_size(1_200_000_000_000), "1.20 TB");
    }

    #[test]
    fn test_health_unknown() {
        colored::control::set_override(false);
        assert_eq!(health(""), "unknown");
        assert_eq!(health("OK"), "OK");
    }
}
