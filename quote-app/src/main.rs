use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quote_core::calculations::common::format_amount;
use quote_core::{QuoteDocument, QuotePatch, TemplateVariant, Totals};
use tracing::debug;

use quote_app::config::{AppConfig, DEFAULT_CONFIG_FILE};
use quote_app::mail::sender_from_config;
use quote_app::messaging::PrintLinkOpener;
use quote_app::quote_file;
use quote_app::typst::TypstExporter;
use quote_app::utils::parse_decimal;
use quote_app::{Notification, QuoteSession, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Quote builder for Belotti Macchine Agricole.
///
/// Loads a quote, applies the given overrides, and previews, exports or
/// sends it.
#[derive(Debug, Parser)]
#[command(name = "quote-builder", version, about)]
struct Cli {
    /// Configuration file (defaults to ./quote-builder.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Quote document in TOML. A blank quote is used when omitted.
    #[arg(short, long)]
    quote: Option<PathBuf>,

    /// CSV price list replacing the quote line items.
    #[arg(short, long)]
    items: Option<PathBuf>,

    /// Company logo image.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Template: template1 (dealer) or template2 (bilingual distributor).
    #[arg(short, long)]
    template: Option<TemplateVariant>,

    /// Standard discount in percent, e.g. "10" or "12,5".
    #[arg(long)]
    standard_discount: Option<String>,

    /// Extra (campaign) discount in percent.
    #[arg(long)]
    extra_discount: Option<String>,

    /// Flat objective discount in euro.
    #[arg(long)]
    objective_discount: Option<String>,

    /// Log level or filter directive, overriding the config file.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the rendered quote.
    Preview,
    /// Print subtotal, discounts, VAT and grand total.
    Totals,
    /// Export the quote as Preventivo_<number>.pdf.
    Export,
    /// Email the quote PDF to the client.
    Email,
    /// Print a WhatsApp share link for the client.
    Whatsapp,
}

// ─── helpers ─────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load(path, true)?,
        None => AppConfig::load(Path::new(DEFAULT_CONFIG_FILE), false)?,
    };
    Ok(config)
}

fn load_quote(path: Option<&Path>) -> Result<QuoteDocument> {
    match path {
        Some(path) => quote_file::load_from_file(path)
            .with_context(|| format!("Failed to load quote: {}", path.display())),
        None => Ok(QuoteDocument::default()),
    }
}

fn overrides(cli: &Cli) -> Result<QuotePatch> {
    let parse = |value: &Option<String>, what: &str| {
        value
            .as_deref()
            .map(parse_decimal)
            .transpose()
            .with_context(|| format!("Invalid {what}"))
    };

    Ok(QuotePatch {
        standard_discount_percent: parse(&cli.standard_discount, "standard discount")?,
        extra_discount_percent: parse(&cli.extra_discount, "extra discount")?,
        objective_discount_amount: parse(&cli.objective_discount, "objective discount")?,
        selected_template: cli.template,
        ..Default::default()
    })
}

fn print_totals(totals: &Totals) {
    let rows = [
        ("Prezzo totale di listino", totals.subtotal),
        ("Sconto Standard", -totals.standard_discount_amount),
        ("Sconto extra", -totals.extra_discount_amount),
        ("Sconto Obiettivo", -totals.objective_discount_amount),
        ("Prezzo Netto", totals.net_total),
        ("IVA 22%", totals.vat),
        ("Totale ivato", totals.total_with_vat),
    ];
    for (label, amount) in rows {
        println!("{label:<26}{:>14} €", format_amount(amount));
    }
}

fn report(note: &Notification) -> ExitCode {
    if note.is_error() {
        eprintln!("{note}");
        ExitCode::FAILURE
    } else {
        println!("{note}");
        ExitCode::SUCCESS
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    logging::init_logging(&config.logging)?;
    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    debug!(?config.export, mail_enabled = config.mail.enabled, "configuration loaded");

    let document = load_quote(cli.quote.as_deref())?;
    let mut session = QuoteSession::new(
        document,
        Box::new(TypstExporter::new(config.export.typst_bin.clone())),
        sender_from_config(&config.mail).context("Failed to set up mail delivery")?,
        Box::new(PrintLinkOpener),
        config.export.output_dir.clone(),
    );

    let patch = overrides(&cli)?;
    if !patch.is_empty() {
        session.store_mut().apply_partial(patch);
    }

    if let Some(items) = &cli.items {
        let note = session.import_items(items).await;
        if note.is_error() {
            return Ok(report(&note));
        }
    }
    if let Some(logo) = &cli.logo {
        let note = session.load_logo(logo).await;
        if note.is_error() {
            return Ok(report(&note));
        }
    }

    let code = match cli.command {
        Command::Preview => {
            print!("{}", session.preview());
            ExitCode::SUCCESS
        }
        Command::Totals => {
            print_totals(&session.totals());
            ExitCode::SUCCESS
        }
        Command::Export => {
            let note = session.export_pdf().await;
            if !note.is_error() {
                println!("{}", session.export_path().display());
            }
            report(&note)
        }
        Command::Email => report(&session.send_email().await),
        Command::Whatsapp => report(&session.send_whatsapp()),
    };
    Ok(code)
}
