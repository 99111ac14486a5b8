//! sheetdown CLI - Google Sheets to Markdown conversion tool

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use sheetdown::prelude::*;
use sheetdown::{RemoteError, SheetCatalog, SheetInfo, DEFAULT_METADATA_PATH};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetdown")]
#[command(
    author,
    version,
    about = "Convert a Google Sheets worksheet into a Markdown document"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the selected worksheet to Markdown
    Convert(ConvertArgs),

    /// Pick a worksheet and save it as the conversion target
    Select(SelectArgs),

    /// Select a worksheet, then convert it
    Run {
        #[command(flatten)]
        select: SelectArgs,

        #[command(flatten)]
        convert: ConvertOnlyArgs,
    },
}

#[derive(Args, Clone)]
struct CredentialArgs {
    /// OAuth2 bearer token for the Sheets API
    #[arg(long, env = "GOOGLE_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// JSON file holding `access_token`, used when no token is given
    #[arg(long, default_value = "json/token.json")]
    token_file: PathBuf,
}

#[derive(Args, Clone)]
struct MetadataArgs {
    /// Sheet reference written by `select` and read by `convert`
    #[arg(long, default_value = DEFAULT_METADATA_PATH)]
    metadata: PathBuf,
}

#[derive(Args)]
struct SelectArgs {
    /// Spreadsheet to list worksheets from
    #[arg(long, env = "SPREADSHEET_ID")]
    spreadsheet_id: String,

    #[command(flatten)]
    credentials: CredentialArgs,

    #[command(flatten)]
    metadata: MetadataArgs,
}

#[derive(Args)]
struct ConvertArgs {
    #[command(flatten)]
    credentials: CredentialArgs,

    #[command(flatten)]
    metadata: MetadataArgs,

    #[command(flatten)]
    options: ConvertOnlyArgs,
}

#[derive(Args, Clone)]
struct ConvertOnlyArgs {
    /// Directory the Markdown file is written to
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Read the grid from a local CSV export instead of Google Sheets
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Skip the model; use the Markdown renderer and the fallback name
    #[arg(long)]
    no_ai: bool,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "SHEETDOWN_MODEL", default_value = "gemini-1.5-pro")]
    model: String,
}

fn main() -> ExitCode {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Convert(args) => convert(&args.credentials, &args.metadata, &args.options),
        Commands::Select(args) => select(&args).map(|_| ()),
        Commands::Run { select: args, convert: options } => select(&args)
            .and_then(|_| convert(&args.credentials, &args.metadata, &options)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// 2 for pre-flight failures, 1 for anything unexpected
fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<PipelineError>() {
        return e.exit_code() as u8;
    }
    match err.downcast_ref::<RemoteError>() {
        Some(RemoteError::MissingCredentials(_)) => 2,
        _ => 1,
    }
}

fn token_provider(args: &CredentialArgs) -> TokenChain {
    TokenChain::new()
        .with(StaticToken::new(args.access_token.clone()))
        .with(TokenFile::new(args.token_file.clone()))
}

fn convert(
    credentials: &CredentialArgs,
    metadata: &MetadataArgs,
    options: &ConvertOnlyArgs,
) -> Result<()> {
    let config = PipelineConfig::default()
        .with_metadata_path(&metadata.metadata)
        .with_output_dir(&options.output_dir);

    let mut collaborators = match &options.csv {
        Some(path) => Collaborators::new(Anonymous, CsvGridSource::new(path)),
        None => {
            let sheets = SheetsClient::new(GoogleConfig::default())
                .context("Failed to create Google Sheets client")?;
            Collaborators::new(token_provider(credentials), sheets)
        }
    };

    if !options.no_ai {
        match options.gemini_api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {
                let mut gemini = GeminiConfig::new(key);
                gemini.model = options.model.clone();
                let client = GeminiClient::new(gemini).context("Failed to create Gemini client")?;
                collaborators = collaborators.with_generator(client);
            }
            _ => tracing::warn!(
                "GEMINI_API_KEY is not set; using the Markdown renderer and fallback file name"
            ),
        }
    }

    let progress = ProgressReporter::new();
    let outcome = Pipeline::new(config, collaborators, &progress).run();
    progress.finish();

    match outcome? {
        Outcome::Written {
            path,
            used_fallback_renderer,
            used_fallback_name,
        } => {
            println!("\nFormatted data saved to {}", path.display());
            if used_fallback_renderer {
                println!("(plain Markdown table; model formatting was not used)");
            }
            if used_fallback_name {
                println!("(default file name; no name was generated)");
            }
        }
        Outcome::NoData => println!("\nNo data was retrieved from the spreadsheet."),
    }
    Ok(())
}

fn select(args: &SelectArgs) -> Result<SheetReference> {
    let token = token_provider(&args.credentials).access_token()?;
    let client = SheetsClient::new(GoogleConfig::default())
        .context("Failed to create Google Sheets client")?;
    let sheets = client
        .list_sheets(&args.spreadsheet_id, &token)
        .with_context(|| format!("Failed to list worksheets of '{}'", args.spreadsheet_id))?;

    if sheets.is_empty() {
        bail!("Spreadsheet '{}' has no worksheets", args.spreadsheet_id);
    }

    let stdin = io::stdin();
    let index = choose_sheet(&sheets, &mut stdin.lock(), &mut io::stdout())?;
    let chosen = &sheets[index];

    let reference =
        SheetReference::new(&args.spreadsheet_id, &chosen.title).with_sheet_id(chosen.sheet_id);
    reference
        .save(&args.metadata.metadata)
        .with_context(|| format!("Failed to save '{}'", args.metadata.metadata.display()))?;

    println!(
        "Selected '{}'; saved to {}",
        chosen.title,
        args.metadata.metadata.display()
    );
    Ok(reference)
}

/// Print a numbered list and read a 1-based choice, re-prompting on bad input
fn choose_sheet<R: BufRead, W: Write>(
    sheets: &[SheetInfo],
    input: &mut R,
    output: &mut W,
) -> Result<usize> {
    writeln!(output, "Available sheets:")?;
    for (i, sheet) in sheets.iter().enumerate() {
        writeln!(output, "{}. {}", i + 1, sheet.title)?;
    }

    loop {
        write!(output, "Enter the number of the sheet: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("No sheet was selected");
        }
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=sheets.len()).contains(&n) => return Ok(n - 1),
            _ => writeln!(
                output,
                "Invalid choice; enter a number between 1 and {}.",
                sheets.len()
            )?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sheets() -> Vec<SheetInfo> {
        vec![
            SheetInfo {
                sheet_id: 0,
                title: "Sheet1".to_string(),
            },
            SheetInfo {
                sheet_id: 918,
                title: "Vehicles".to_string(),
            },
        ]
    }

    #[test]
    fn test_choose_sheet_reprompts() {
        let mut input = "abc\n7\n2\n".as_bytes();
        let mut output = Vec::new();
        let index = choose_sheet(&sheets(), &mut input, &mut output).unwrap();
        assert_eq!(index, 1);

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Available sheets:\n1. Sheet1\n2. Vehicles\n"));
        assert_eq!(text.matches("Invalid choice").count(), 2);
    }

    #[test]
    fn test_choose_sheet_eof() {
        let mut input = "".as_bytes();
        assert!(choose_sheet(&sheets(), &mut input, &mut Vec::new()).is_err());
    }

    #[test]
    fn test_exit_codes() {
        let fatal = anyhow::Error::new(PipelineError::Metadata(sheetdown::CoreError::metadata(
            "json/sheet_info.json",
            "missing",
        )));
        assert_eq!(exit_code(&fatal), 2);

        let creds = anyhow::Error::new(RemoteError::MissingCredentials("none".into()))
            .context("listing sheets");
        assert_eq!(exit_code(&creds), 2);

        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from([
            "sheetdown",
            "convert",
            "--csv",
            "export.csv",
            "--no-ai",
            "--output-dir",
            "out",
        ])
        .unwrap();
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.options.csv, Some(PathBuf::from("export.csv")));
                assert!(args.options.no_ai);
                assert_eq!(args.options.output_dir, PathBuf::from("out"));
                assert_eq!(args.metadata.metadata, PathBuf::from(DEFAULT_METADATA_PATH));
            }
            _ => panic!("expected convert"),
        }
    }
}
