//! pdftools - Merge, compress, encrypt and decrypt PDF files.

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::process;

use pdftools::cli::Cli;
use pdftools::config::{Config, OpenMode, OverwriteMode};
use pdftools::error::PdfToolsError;
use pdftools::launcher::open_path_async;
use pdftools::ops;
use pdftools::output::{
    LoadingAnimation, OutputFormatter, display_outcome, display_plan, display_validation_summary,
};
use pdftools::settings::Settings;
use pdftools::task::run_with_animation;
use pdftools::validation::Validator;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.quiet, cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Route `log` output to stderr; `RUST_LOG` overrides the flags.
fn init_logging(quiet: bool, verbose: u8) {
    let log_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfToolsError> {
    let settings = Settings::load(cli.config.as_deref())?;
    let config = cli.to_config(&settings).await?;

    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdftools::NAME, pdftools::VERSION));
        formatter.blank_line();
    }

    formatter.info("Validating input files...");
    let validator = Validator::new();
    let validation_summary = validator.validate_config(&config).await?;
    display_validation_summary(&formatter, &validation_summary);

    if config.dry_run {
        display_plan(&formatter, &config, &validation_summary);
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info("  Run without --dry-run to write the output");
        return Ok(());
    }

    handle_output_overwrite(&config, &formatter)?;

    let label = config.operation.progress_label();
    let past_tense = config.operation.past_tense();
    let open_mode = config.open_mode;
    let json = config.json;

    let mut animation = if formatter.should_print() {
        LoadingAnimation::new(label)
    } else {
        LoadingAnimation::disabled(label)
    };

    let handle = tokio::spawn(ops::execute(config));
    let outcome = run_with_animation(handle, &mut animation).await?;

    if json {
        let rendered = serde_json::to_string_pretty(&outcome)
            .map_err(|e| PdfToolsError::other(format!("Failed to render JSON: {e}")))?;
        println!("{rendered}");
    } else {
        formatter.blank_line();
        display_outcome(&formatter, &outcome);
    }

    if should_open(open_mode, &formatter, past_tense)?
        && let Err(err) = open_path_async(outcome.output_path().to_path_buf()).await
    {
        formatter.warning(&err.to_string());
    }

    Ok(())
}

/// Handle output file overwrite scenarios.
fn handle_output_overwrite(config: &Config, formatter: &OutputFormatter) -> Result<(), PdfToolsError> {
    if !config.output.exists() {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfToolsError::output_exists(config.output.clone())),
        OverwriteMode::Prompt => {
            // Without someone to ask, treat as no-clobber
            if formatter.is_quiet() || !io::stdin().is_terminal() {
                return Err(PdfToolsError::output_exists(config.output.clone()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                config.output.display()
            ));

            if confirm("Overwrite?")? {
                Ok(())
            } else {
                Err(PdfToolsError::Cancelled)
            }
        }
    }
}

/// Decide whether to open the written file.
fn should_open(
    open_mode: OpenMode,
    formatter: &OutputFormatter,
    past_tense: &str,
) -> Result<bool, PdfToolsError> {
    match open_mode {
        OpenMode::Always => Ok(true),
        OpenMode::Never => Ok(false),
        OpenMode::Prompt => {
            if formatter.is_quiet() || !io::stdin().is_terminal() {
                return Ok(false);
            }
            confirm(&format!("Do you want to open the {past_tense} PDF file?"))
        }
    }
}

/// Ask a yes/no question on stdout; anything but "y"/"yes" means no.
fn confirm(question: &str) -> Result<bool, PdfToolsError> {
    print!("{question} [y/N]: ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin()
        .read_line(&mut response)
        .map_err(|err| PdfToolsError::other(format!("Failed to read input: {err}")))?;

    let response = response.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
