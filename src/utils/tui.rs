//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI: the tab-separated run lines, the
//! validation diagnostics and the optional summary and listing boxes.

use super::clock::unit_name;
use super::timer::{Outcome, Sample, VariantStats};
use terminal_size::{terminal_size, Width};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Singular form of the tick unit for rate headers
fn unit_singular() -> &'static str {
    match unit_name() {
        "cycles" => "cycle",
        "ticks" => "tick",
        other => other,
    }
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Header line preceding the run lines
pub fn run_header() -> String {
    format!(
        "  Name  \tflops\t{}\tflops/{}",
        unit_name(),
        unit_singular()
    )
}

pub fn print_run_header() {
    println!("{}", run_header());
}

/// Tab-separated run line: name, operation count, elapsed ticks, throughput
pub fn format_sample(sample: &Sample) -> String {
    format!(
        "{:>8}\t{}\t{}\t{:8.2}\t",
        sample.name, sample.ops, sample.ticks, sample.throughput
    )
}

/// Diagnostic lines for a sample that did not validate
pub fn format_diagnostics(outcome: &Outcome) -> Vec<String> {
    match outcome {
        Outcome::Valid => Vec::new(),
        Outcome::Mismatch { got, expected } => vec![format!(
            "Result {} failed to validate with expected value {}",
            got, expected
        )],
        Outcome::CellMismatches(cells) => cells
            .iter()
            .map(|cell| {
                format!(
                    "Result[{},{}] = {} failed to validate with expected value {}",
                    cell.row, cell.col, cell.got, cell.expected
                )
            })
            .collect(),
        Outcome::Failed(err) => vec![format!("Error, {}", err)],
    }
}

/// Print diagnostics (if any) followed by the run line
pub fn print_sample(sample: &Sample) {
    for line in format_diagnostics(&sample.outcome) {
        println!("{}", line);
    }
    println!("{}", format_sample(sample));
}

/// Print per-variant statistics after the raw runs
pub fn print_summary_table(stats: &[VariantStats]) {
    if stats.is_empty() {
        return;
    }

    let term_width = get_term_width();
    // 12+12+12+12+10+8 = 66 chars + 6 spaces + 2 indent
    let fixed_width = 74;
    let variant_col_width = term_width.saturating_sub(fixed_width).max(15);
    let table_width = variant_col_width + 66 + 6;

    let baseline = stats.first().map(|s| s.mean_ticks).unwrap_or(1.0);

    println!();
    println!("  Summary ({})", unit_name());
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<v_width$} {:>12} {:>12} {:>12} {:>12} {:>10} {:>8}",
        "Variant",
        "Min",
        "Median",
        "Mean",
        "Std dev",
        "flops/tick",
        "Speedup",
        v_width = variant_col_width
    );
    println!("  {}", "─".repeat(table_width));

    for s in stats {
        let speedup = if s.mean_ticks > 0.0 {
            baseline / s.mean_ticks
        } else {
            0.0
        };
        let name = if s.failures > 0 {
            format!("{} ({} failed)", s.name, s.failures)
        } else {
            s.name.to_string()
        };

        println!(
            "  {:<v_width$} {:>12} {:>12} {:>12.0} {:>12.1} {:>10.2} {:>7.2}x",
            truncate(&name, variant_col_width),
            s.min_ticks,
            s.median_ticks,
            s.mean_ticks,
            s.std_dev_ticks,
            s.mean_throughput,
            speedup,
            v_width = variant_col_width
        );
    }
    println!();
}

/// Print a box listing a kernel family and its variants
pub fn print_variant_box(name: &str, description: &str, variants: &[(&'static str, &'static str)]) {
    let term_width = get_term_width();
    let max_content_width = term_width.saturating_sub(4).max(40);

    let name_width = variants.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
    let title = format!("Kernel: {}", name);
    let lines: Vec<String> = variants
        .iter()
        .map(|(n, d)| format!("{:<width$}  {}", n, d, width = name_width))
        .collect();

    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .chain([title.len(), description.len()])
        .max()
        .unwrap_or(60)
        .min(max_content_width);

    let border = "─".repeat(content_width + 2);

    println!("┌{}┐", border);
    println!("│ {:<width$} │", truncate(&title, content_width), width = content_width);
    println!("│ {:<width$} │", truncate(description, content_width), width = content_width);
    println!("├{}┤", border);
    for line in &lines {
        println!("│ {:<width$} │", truncate(line, content_width), width = content_width);
    }
    println!("└{}┘", border);
}

/// Print the verdict of one verification pass
pub fn print_verify_result(name: &str, result: &Result<(), String>) {
    match result {
        Ok(()) => println!("  ✅ {} passed verification", name),
        Err(e) => println!("  ❌ {} failed verification: {}", name, e),
    }
}
