use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use stmtimport_import::migrosbank::import_transactions;
use stmtimport_import::{write_tsv_to, ImportConfig, InputEncoding, MalformedRowPolicy, MatchPolicy};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stmtimport", version, about = "Convert Migros Bank statement exports into an import table")]
struct Cli {
    /// Statement export to read (defaults to stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the table (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file with import settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How many rows must fit a layout before it is accepted
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// What to do with detected rows that cannot be converted
    #[arg(long, value_enum)]
    malformed: Option<MalformedArg>,

    /// Character encoding of the input
    #[arg(long, value_enum)]
    encoding: Option<EncodingArg>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Tsv)]
    format: OutputFormat,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PolicyArg {
    Any,
    Majority,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum MalformedArg {
    Skip,
    Fail,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum EncodingArg {
    Latin1,
    Utf8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Tsv,
    Json,
}

impl Cli {
    /// Settings from the config file, overridden by command-line flags.
    fn import_config(&self) -> Result<ImportConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                ImportConfig::from_toml(&content)
                    .with_context(|| format!("Failed to parse config {}", path.display()))?
            }
            None => ImportConfig::default(),
        };

        if let Some(policy) = self.policy {
            config.match_policy = match policy {
                PolicyArg::Any => MatchPolicy::Any,
                PolicyArg::Majority => MatchPolicy::Majority,
            };
        }
        if let Some(malformed) = self.malformed {
            config.malformed_rows = match malformed {
                MalformedArg::Skip => MalformedRowPolicy::Skip,
                MalformedArg::Fail => MalformedRowPolicy::Fail,
            };
        }
        if let Some(encoding) = self.encoding {
            config.encoding = match encoding {
                EncodingArg::Latin1 => InputEncoding::Latin1,
                EncodingArg::Utf8 => InputEncoding::Utf8,
            };
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.import_config()?;

    let mut data = Vec::new();
    match &cli.input {
        Some(path) => {
            File::open(path)
                .and_then(|mut f| f.read_to_end(&mut data))
                .with_context(|| format!("Failed to read {}", path.display()))?;
        }
        None => {
            io::stdin().read_to_end(&mut data).context("Failed to read stdin")?;
        }
    }

    let text = config.encoding.decode(&data)?;
    let table = import_transactions(&text, &config)?;
    tracing::info!(transactions = table.len(), "statement imported");

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    match cli.format {
        OutputFormat::Tsv => write_tsv_to(&mut writer, &table)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &table)?;
            writeln!(writer)?;
        }
    }

    writer.flush().context("Failed to write output")
}
