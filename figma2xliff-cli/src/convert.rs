use std::path::{Path, PathBuf};

use clap::Parser;
use figma2xliff::{
    ConvertOptions, ConvertOutcome, DEFAULT_SOURCE_LOCALE, Error, PluralPairing, convert_file,
};
use tracing::warn;

/// Convert a Figma variable export into one XLIFF 2.0 file per target locale.
#[derive(Parser, Debug, Clone)]
#[command(name = "figma2xliff", author, version, about, long_about = None)]
pub struct ConvertArgs {
    /// Input export, without the `.json` extension
    #[arg(short, long, default_value = "Localization")]
    pub input: String,

    /// Directory the `translations_<locale>.xlf` files are written to
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Locale whose values become the `<source>` text
    #[arg(short, long, default_value = DEFAULT_SOURCE_LOCALE)]
    pub source_locale: String,

    /// Attach `(plural)` variables to their base even when they come first
    #[arg(long)]
    pub any_order_plurals: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConvertArgs {
    pub fn options(&self) -> ConvertOptions {
        let pairing = if self.any_order_plurals {
            PluralPairing::AnyOrder
        } else {
            PluralPairing::InputOrder
        };
        ConvertOptions::new()
            .with_source_locale(self.source_locale.as_str())
            .with_plural_pairing(pairing)
    }
}

/// Appends `.json` unless the input already ends in it, so both
/// `Localization` and `Localization.json` name the same file and
/// `Localization.v2` reads `Localization.v2.json`.
pub fn resolve_input_path(input: &str) -> PathBuf {
    let path = Path::new(input);
    if path.extension().is_some_and(|ext| ext == "json") {
        path.to_path_buf()
    } else {
        PathBuf::from(format!("{input}.json"))
    }
}

pub fn run_convert_command(args: &ConvertArgs) -> Result<ConvertOutcome, Error> {
    let input = resolve_input_path(&args.input);
    let outcome = convert_file(&input, &args.output, &args.options())?;

    let report = &outcome.report;
    if report.has_anomalies() {
        warn!(
            malformed = report.malformed_records,
            orphan_plurals = report.orphan_plurals,
            overwritten = report.overwritten_ids,
            unknown_modes = report.unknown_mode_values,
            "some variables were skipped or replaced"
        );
    }

    println!(
        "✅ Converted {} variables into {} XLIFF file(s)",
        report.records,
        outcome.written.len()
    );
    Ok(outcome)
}
