//! Display utilities for operation results.

use bytesize::ByteSize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use console::style;

use crate::types::{ComparisonRecord, VerificationOutcome, VerificationRecord};

/// Formats bytes into human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    format!("{} ({bytes} bytes)", ByteSize::b(bytes))
}

fn table(rows: &[(&str, String)]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_content_arrangement(ContentArrangement::Dynamic).set_header(vec!["Field", "Value"]);

    for (field, value) in rows {
        table.add_row(vec![Cell::new(field), Cell::new(value)]);
    }

    table
}

/// Builds the sender-side result table.
pub fn generation_table(record: &VerificationRecord) -> Table {
    table(&[
        ("File Name", record.file_name.clone()),
        ("File Size", format_bytes(record.file_size)),
        ("SHA-256", record.sha256.clone()),
        ("HMAC-SHA-256", record.hmac.clone()),
        ("Salt", record.salt.clone()),
        ("Verification Code", record.verification_code.clone()),
    ])
}

/// Builds the receiver-side result table.
pub fn verification_table(outcome: &VerificationOutcome) -> Table {
    table(&[
        ("File Name", outcome.file_name.clone()),
        ("File Size", format_bytes(outcome.file_size)),
        ("SHA-256", outcome.sha256.clone()),
        ("HMAC-SHA-256", outcome.hmac.clone()),
        ("Computed Code", outcome.computed_code.clone()),
    ])
}

/// Builds the side-by-side comparison table.
pub fn comparison_table(record: &ComparisonRecord) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_content_arrangement(ContentArrangement::Dynamic).set_header(vec!["", "File 1", "File 2"]);

    table.add_row(vec![Cell::new("Name"), Cell::new(&record.file1.name), Cell::new(&record.file2.name)]);
    table.add_row(vec![Cell::new("SHA-256"), Cell::new(&record.file1.sha256), Cell::new(&record.file2.sha256)]);
    table.add_row(vec![Cell::new("HMAC-SHA-256"), Cell::new(&record.file1.hmac), Cell::new(&record.file2.hmac)]);

    table
}

/// Displays the generated code and the values to share with the receiver.
pub fn show_generation(record: &VerificationRecord) {
    println!();
    println!("{}", generation_table(record));
    println!();
    println!("{} {}", style("✓").green(), style(format!("Share code {} and salt {} with the receiver", record.verification_code, record.salt)).bold());
}

/// Displays the verification verdict.
pub fn show_verification(outcome: &VerificationOutcome) {
    println!();
    println!("{}", verification_table(outcome));
    println!();
    show_verdict(outcome.matched, "File is intact: verification code matches", "File is corrupted or altered: verification code does not match");
}

/// Displays the comparison verdict.
pub fn show_comparison(record: &ComparisonRecord) {
    println!();
    println!("{}", comparison_table(record));
    println!();
    show_verdict(record.matched, "Files are identical", "Files differ");
}

/// Displays where a report was written.
pub fn show_report_saved(path: &std::path::Path) {
    println!("{} {}", style("✓").green(), style(format!("Report saved: {}", path.display())).bold());
}

fn show_verdict(matched: bool, intact: &str, altered: &str) {
    if matched {
        println!("{} {}", style("✓").green(), style(intact).green().bold());
    } else {
        println!("{} {}", style("✗").red(), style(altered).red().bold());
    }
}
