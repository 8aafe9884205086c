use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cipher::Hasher;
use crate::config::{DEFAULT_BIND, MAX_FILE_SIZE, Policy};
use crate::file::File;
use crate::http::start_http_server;
use crate::report::ReportData;
use crate::secret::SecretKey;
use crate::types::Salt;
use crate::ui::display;
use crate::ui::progress::Bar;
use crate::verifier::{HashedFile, Verifier};

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service used by the browser client.
    Serve {
        #[arg(short, long, env = "VERICODE_BIND", default_value = DEFAULT_BIND)]
        bind: SocketAddr,

        #[arg(long, env = "VERICODE_ALLOWED_ORIGIN")]
        allowed_origin: Option<String>,
    },

    /// Derive a verification code and salt for a file before sending it.
    Generate {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Check a received file against the sender's code and salt.
    Verify {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        code: String,

        #[arg(short, long)]
        salt: String,

        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Compare two local files directly.
    Compare {
        #[arg(long)]
        first: PathBuf,

        #[arg(long)]
        second: PathBuf,

        #[arg(short, long)]
        report: Option<PathBuf>,
    },
}

#[derive(Parser)]
#[command(name = "vericode", version, about = "Confirm a transferred file arrived intact using SHA-256 and HMAC-SHA-256 verification codes.")]
pub struct App {
    #[command(subcommand)]
    command: Commands,

    /// Shared HMAC key; sender and receiver must use the same one.
    #[arg(long, global = true, env = "VERICODE_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Largest accepted file in bytes.
    #[arg(long, global = true, env = "VERICODE_MAX_FILE_SIZE", default_value_t = MAX_FILE_SIZE)]
    max_file_size: u64,

    /// Reject zero-length files instead of hashing them.
    #[arg(long, global = true, env = "VERICODE_REJECT_EMPTY")]
    reject_empty: bool,
}

impl App {
    pub fn init() -> Result<Self> {
        // a missing .env file is not an error
        let _ = dotenvy::dotenv();

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_file(true).with_line_number(true).finish();
        tracing::subscriber::set_global_default(subscriber)?;

        Ok(Self::parse())
    }

    /// Runs the selected command. A mismatch exits with a failure status.
    pub async fn execute(self) -> Result<ExitCode> {
        let Self { command, secret_key, max_file_size, reject_empty } = self;
        let policy = Policy::new(max_file_size, reject_empty);

        match command {
            Commands::Serve { bind, allowed_origin } => {
                let verifier = Arc::new(Verifier::new(Self::key_or_generated(secret_key, true)?, policy));
                start_http_server(bind, verifier, allowed_origin.as_deref()).await?;
                Ok(ExitCode::SUCCESS)
            }
            Commands::Generate { input, report } => {
                let verifier = Verifier::new(Self::required_key(secret_key)?, policy);
                let file = Self::hash(&File::new(input), policy).await?;
                let record = verifier.issue(file)?;

                display::show_generation(&record);
                Self::write_report(report, &ReportData::from(&record)).await?;

                Ok(ExitCode::SUCCESS)
            }
            Commands::Verify { input, code, salt, report } => {
                let verifier = Verifier::new(Self::required_key(secret_key)?, policy);
                let parsed = Salt::parse(&salt).context("the salt must be the 32-character hex value shared by the sender")?;
                let file = Self::hash(&File::new(input), policy).await?;
                let outcome = verifier.check(file, &code, &parsed)?;

                display::show_verification(&outcome);
                Self::write_report(report, &ReportData::receiver(&outcome, &code, &salt)).await?;

                Ok(Self::exit_code(outcome.matched))
            }
            Commands::Compare { first, second, report } => {
                let verifier = Verifier::new(Self::key_or_generated(secret_key, false)?, policy);
                let first = Self::hash(&File::new(first), policy).await?;
                let second = Self::hash(&File::new(second), policy).await?;
                let record = verifier.compare(first, second)?;

                display::show_comparison(&record);
                Self::write_report(report, &ReportData::from(&record)).await?;

                Ok(Self::exit_code(record.matched))
            }
        }
    }

    async fn hash(file: &File, policy: Policy) -> Result<HashedFile> {
        let (handle, size) = file.open(policy).await.with_context(|| format!("cannot use {}", file.path().display()))?;

        let bar = Bar::new(size, &file.name());
        let (digest, size) = Hasher::digest_reader(handle, policy, Some(&bar)).await.with_context(|| format!("hashing failed: {}", file.path().display()))?;

        Ok(HashedFile { name: file.name(), size, digest })
    }

    fn required_key(secret_key: Option<String>) -> Result<SecretKey> {
        let key = secret_key.context("a secret key is required: pass --secret-key or set VERICODE_SECRET_KEY")?;
        Ok(SecretKey::from_string(key)?)
    }

    fn key_or_generated(secret_key: Option<String>, warn: bool) -> Result<SecretKey> {
        if let Some(key) = secret_key {
            return Ok(SecretKey::from_string(key)?);
        }

        if warn {
            tracing::warn!("no secret key configured, using a random key: codes stay valid only until this process exits");
        }

        Ok(SecretKey::generate()?)
    }

    async fn write_report(path: Option<PathBuf>, data: &ReportData) -> Result<()> {
        let Some(path) = path else {
            return Ok(());
        };

        tokio::fs::write(&path, data.render()).await.with_context(|| format!("failed to write report: {}", path.display()))?;
        display::show_report_saved(&path);

        Ok(())
    }

    const fn exit_code(matched: bool) -> ExitCode {
        if matched { ExitCode::SUCCESS } else { ExitCode::FAILURE }
    }
}
