use colored::{ColoredString, Colorize};
use rtxtune_core::{LogEntry, LogLevel, TuneReport};
use std::path::Path;

/// Colored severity tag for one log line.
pub(crate) fn level_tag(level: LogLevel) -> ColoredString {
    let tag = format!("{:<5}", level.tag());
    match level {
        LogLevel::Info => tag.blue(),
        LogLevel::Warning => tag.yellow().bold(),
        LogLevel::Error => tag.red().bold(),
    }
}

/// Path shown for a log line, relative to the pack when possible.
pub(crate) fn display_path(path: &Path, roots: &[&Path]) -> String {
    roots
        .iter()
        .find_map(|root| path.strip_prefix(root).ok())
        .unwrap_or(path)
        .display()
        .to_string()
}

fn print_entry(entry: &LogEntry, roots: &[&Path]) {
    match &entry.path {
        Some(path) => println!(
            "{} {} {}",
            level_tag(entry.level),
            display_path(path, roots).dimmed(),
            entry.message
        ),
        None => println!("{} {}", level_tag(entry.level), entry.message),
    }
}

/// Print every log line of a run followed by a summary line.
pub(crate) fn print_report(report: &TuneReport, roots: &[&Path]) {
    for entry in &report.entries {
        print_entry(entry, roots);
    }

    let summary = format!(
        "{} written, {} unchanged, {} skipped, {} warning(s), {} error(s)",
        report.files.written,
        report.files.unchanged,
        report.files.failed,
        report.count(LogLevel::Warning),
        report.count(LogLevel::Error)
    );
    if report.success {
        println!("\n{} {}", "Tune PASSED".green().bold(), summary.dimmed());
    } else {
        println!("\n{} {}", "Tune FAILED".red().bold(), summary.dimmed());
    }
    println!("{} {}", "Seed:".dimmed(), report.seed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_path_strips_pack_root() {
        let root = Path::new("/packs/vanilla_rtx");
        let file = Path::new("/packs/vanilla_rtx/textures/blocks/stone_mer.tga");
        assert_eq!(
            display_path(file, &[root]),
            Path::new("textures/blocks/stone_mer.tga").display().to_string()
        );
        let other = Path::new("/elsewhere/a.tga");
        assert_eq!(display_path(other, &[root]), other.display().to_string());
    }
}
