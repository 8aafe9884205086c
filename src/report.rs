//! Integrity report generation.
//!
//! Turns the result of any operation into a plain-text document a user can
//! keep or forward. The input shape is the one posted by the browser client,
//! so reports can be rendered both for HTTP callers and from the command line.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::config::{APP_NAME, CODE_LENGTH, SALT_SIZE};
use crate::types::{ComparisonRecord, Operation, VerificationOutcome, VerificationRecord};

const RULE: &str = "================================================================";
const THIN_RULE: &str = "----------------------------------------------------------------";

/// Result data of one operation, tagged by the side that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReportData {
    Sender(SenderReport),
    Receiver(ReceiverReport),
    Comparison(ComparisonReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderReport {
    pub file_name: String,
    pub file_size: u64,
    pub sha256: String,
    pub hmac: String,
    pub salt: String,
    pub verification_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiverReport {
    pub provided_code: String,
    pub salt: String,
    pub file_name: String,
    pub file_size: u64,
    #[serde(rename = "match")]
    pub matched: bool,
    pub computed_code: String,
    pub sha256: String,
    pub hmac: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    #[serde(rename = "match")]
    pub matched: bool,
    pub file1_name: String,
    pub file1_sha256: String,
    pub file1_hmac: String,
    pub file2_name: String,
    pub file2_sha256: String,
    pub file2_hmac: String,
}

impl From<&VerificationRecord> for ReportData {
    fn from(record: &VerificationRecord) -> Self {
        Self::Sender(SenderReport {
            file_name: record.file_name.clone(),
            file_size: record.file_size,
            sha256: record.sha256.clone(),
            hmac: record.hmac.clone(),
            salt: record.salt.clone(),
            verification_code: record.verification_code.clone(),
        })
    }
}

impl From<&ComparisonRecord> for ReportData {
    fn from(record: &ComparisonRecord) -> Self {
        Self::Comparison(ComparisonReport {
            matched: record.matched,
            file1_name: record.file1.name.clone(),
            file1_sha256: record.file1.sha256.clone(),
            file1_hmac: record.file1.hmac.clone(),
            file2_name: record.file2.name.clone(),
            file2_sha256: record.file2.sha256.clone(),
            file2_hmac: record.file2.hmac.clone(),
        })
    }
}

impl ReportData {
    /// Builds a receiver report; the code and salt the receiver typed are not part
    /// of the outcome itself.
    #[must_use]
    pub fn receiver(outcome: &VerificationOutcome, provided_code: &str, salt: &str) -> Self {
        Self::Receiver(ReceiverReport {
            provided_code: provided_code.trim().to_owned(),
            salt: salt.trim().to_owned(),
            file_name: outcome.file_name.clone(),
            file_size: outcome.file_size,
            matched: outcome.matched,
            computed_code: outcome.computed_code.clone(),
            sha256: outcome.sha256.clone(),
            hmac: outcome.hmac.clone(),
        })
    }

    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Sender(_) => Operation::GenerateCode,
            Self::Receiver(_) => Operation::VerifyCode,
            Self::Comparison(_) => Operation::CompareFiles,
        }
    }

    /// Renders the report as plain text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();

        line(&mut out, RULE);
        line(&mut out, &format!("{APP_NAME} File Integrity Report"));
        line(&mut out, RULE);
        line(&mut out, &format!("Operation: {}", self.operation().label()));
        line(&mut out, "");

        match self {
            Self::Sender(report) => render_sender(&mut out, report),
            Self::Receiver(report) => render_receiver(&mut out, report),
            Self::Comparison(report) => render_comparison(&mut out, report),
        }

        section(&mut out, "TECHNICAL DETAILS");
        line(&mut out, "Hash algorithm:      SHA-256 (FIPS 180-4), 256-bit digest");
        line(&mut out, "Authentication:      HMAC-SHA-256 (RFC 2104) keyed with a server-side secret");
        line(&mut out, &format!("Salt:                {SALT_SIZE} random bytes from the operating system CSPRNG"));
        line(&mut out, &format!("Verification code:   first {CODE_LENGTH} hex characters of the HMAC"));
        line(&mut out, "Code comparison:     constant-time");
        line(&mut out, "");
        line(&mut out, RULE);

        out
    }
}

fn line(out: &mut String, text: &str) {
    let _ = writeln!(out, "{text}");
}

fn section(out: &mut String, title: &str) {
    line(out, title);
    line(out, THIN_RULE);
}

fn field(out: &mut String, name: &str, value: &str) {
    let _ = writeln!(out, "{:<20} {value}", format!("{name}:"));
}

fn verdict(matched: bool, intact: &str, altered: &str) -> String {
    if matched { format!("MATCH - {intact}") } else { format!("MISMATCH - {altered}") }
}

fn render_sender(out: &mut String, report: &SenderReport) {
    section(out, "FILE INFORMATION");
    field(out, "File name", &report.file_name);
    field(out, "File size", &format!("{} bytes", report.file_size));
    line(out, "");

    section(out, "CRYPTOGRAPHIC VALUES");
    field(out, "SHA-256", &report.sha256);
    field(out, "HMAC-SHA-256", &report.hmac);
    field(out, "Salt", &report.salt);
    field(out, "Verification code", &report.verification_code);
    line(out, "");

    section(out, "PROCESS");
    line(out, "1. The SHA-256 hash of the file content was computed.");
    line(out, "2. A random 16-byte salt was generated for this file.");
    line(out, "3. HMAC-SHA-256 was computed over the hash and the salt.");
    line(out, "4. The first 16 characters of the HMAC form the verification code.");
    line(out, "5. Share the verification code and the salt with the receiver.");
    line(out, "");
}

fn render_receiver(out: &mut String, report: &ReceiverReport) {
    section(out, "FILE INFORMATION");
    field(out, "File name", &report.file_name);
    field(out, "File size", &format!("{} bytes", report.file_size));
    line(out, "");

    section(out, "CRYPTOGRAPHIC VALUES");
    field(out, "SHA-256", &report.sha256);
    field(out, "HMAC-SHA-256", &report.hmac);
    field(out, "Salt", &report.salt);
    field(out, "Provided code", &report.provided_code);
    field(out, "Computed code", &report.computed_code);
    line(out, "");

    section(out, "RESULT");
    line(out, &verdict(report.matched, "the file is intact", "the file was corrupted or altered in transit"));
    line(out, "");

    section(out, "PROCESS");
    line(out, "1. The SHA-256 hash of the received file was computed.");
    line(out, "2. HMAC-SHA-256 was recomputed with the salt provided by the sender.");
    line(out, "3. The computed code was compared with the provided code in constant time.");
    line(out, "");
}

fn render_comparison(out: &mut String, report: &ComparisonReport) {
    section(out, "FILE 1");
    field(out, "File name", &report.file1_name);
    field(out, "SHA-256", &report.file1_sha256);
    field(out, "HMAC-SHA-256", &report.file1_hmac);
    line(out, "");

    section(out, "FILE 2");
    field(out, "File name", &report.file2_name);
    field(out, "SHA-256", &report.file2_sha256);
    field(out, "HMAC-SHA-256", &report.file2_hmac);
    line(out, "");

    section(out, "RESULT");
    line(out, &verdict(report.matched, "the files are identical", "the files differ"));
    line(out, "");

    section(out, "PROCESS");
    line(out, "1. The SHA-256 hash of each file was computed.");
    line(out, "2. The two hashes were compared byte for byte.");
    line(out, "3. Each file's HMAC uses its own random salt and is shown for reference only.");
    line(out, "");
}
