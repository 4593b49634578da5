#![forbid(unsafe_code)]
//! Convert Figma variable exports into XLIFF 2.0 translation files.
//!
//! The input is the JSON produced by the "Export/Import Variables" Figma
//! plugin: a `modes` table (locale code → mode ID) and a flat list of
//! variables with one value per mode. The output is one XLIFF 2.0 document per
//! non-source locale.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use figma2xliff::{ConvertOptions, convert_file};
//!
//! // Writes translations_<locale>.xlf for every non-source locale
//! convert_file("Localization.json", "l10n", &ConvertOptions::default())?;
//! # Ok::<(), figma2xliff::Error>(())
//! ```
//!
//! # Pipeline
//!
//! - [`locale::LocaleIndex`] maps mode IDs to locale codes and finds the source mode.
//! - [`builder::TranslationModel`] folds the variables into entries keyed by
//!   [`name_id::format_name_id`], pairing `(plural)` records with their base.
//! - [`xliff::XliffDocument`] renders the model for one target locale.

pub mod builder;
pub mod converter;
pub mod error;
pub mod locale;
pub mod name_id;
pub mod options;
pub mod traits;
pub mod types;
pub mod xliff;

// Re-export most used types for easy consumption
pub use crate::{
    builder::{BuildReport, LocalizedValues, PluralPairing, TranslationEntry, TranslationModel},
    converter::{ConvertOutcome, Conversion, convert_file, output_file_name},
    error::Error,
    locale::{DEFAULT_SOURCE_LOCALE, LocaleIndex, ModeRole},
    name_id::format_name_id,
    options::ConvertOptions,
    traits::{Parser, Render},
    types::{Document, LocaleCode, ModeId, RecordSlot, VariableRecord},
    xliff::{XliffDocument, icu_plural},
};
