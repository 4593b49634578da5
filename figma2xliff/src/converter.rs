//! End-to-end conversion: document → locale index → translation model → one
//! XLIFF file per target locale.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{
    builder::{BuildReport, TranslationModel},
    error::Error,
    locale::LocaleIndex,
    options::ConvertOptions,
    traits::{Parser, Render},
    types::{Document, LocaleCode},
    xliff::XliffDocument,
};

/// File name of the XLIFF output for `locale`, e.g. `translations_pt_br.xlf`.
pub fn output_file_name(locale: &LocaleCode) -> String {
    format!("translations_{}.xlf", locale)
}

/// A resolved document: locale index, translation model and the anomalies
/// absorbed while building it.
#[derive(Debug, Clone)]
pub struct Conversion {
    index: LocaleIndex,
    model: TranslationModel,
    report: BuildReport,
}

impl Conversion {
    pub fn new(document: &Document, options: &ConvertOptions) -> Self {
        let index = LocaleIndex::new(&document.modes, options.source_locale.clone());
        if index.source_mode().is_none() {
            warn!(
                source_locale = %options.source_locale,
                "source locale not declared in modes; every locale is treated as a target"
            );
        }

        let (model, report) =
            TranslationModel::build(&document.variables, &index, options.plural_pairing);
        debug!(entries = model.len(), ?report, "built translation model");

        Self {
            index,
            model,
            report,
        }
    }

    pub fn index(&self) -> &LocaleIndex {
        &self.index
    }

    pub fn model(&self) -> &TranslationModel {
        &self.model
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn target_locales(&self) -> impl Iterator<Item = &LocaleCode> {
        self.index.target_locales()
    }

    /// The XLIFF view for one locale. The locale does not have to be declared;
    /// an undeclared one renders every target empty.
    pub fn xliff<'a>(&'a self, locale: &'a LocaleCode) -> XliffDocument<'a> {
        XliffDocument::new(&self.model, locale)
    }

    /// Renders every target locale in `modes` order.
    pub fn render_all(&self) -> Result<Vec<(LocaleCode, String)>, Error> {
        self.target_locales()
            .map(|locale| -> Result<_, Error> {
                Ok((locale.clone(), self.xliff(locale).render()?))
            })
            .collect()
    }

    /// Writes `translations_<locale>.xlf` for every target locale into
    /// `output_dir`, creating the directory if needed. Existing files are
    /// replaced.
    pub fn write_all<P: AsRef<Path>>(&self, output_dir: P) -> Result<Vec<PathBuf>, Error> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir).map_err(Error::Io)?;

        let mut written = Vec::new();
        for locale in self.target_locales() {
            let path = output_dir.join(output_file_name(locale));
            self.xliff(locale).write_to(&path)?;
            info!("Translation file created at: {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

/// What [`convert_file`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOutcome {
    pub report: BuildReport,
    pub written: Vec<PathBuf>,
}

/// Reads the export at `input` and writes one XLIFF file per target locale into
/// `output_dir`.
///
/// Reading or parsing failures return before anything is written.
///
/// # Example
///
/// ```rust,no_run
/// use figma2xliff::{ConvertOptions, convert_file};
///
/// let outcome = convert_file("Localization.json", ".", &ConvertOptions::default())?;
/// println!("wrote {} files", outcome.written.len());
/// # Ok::<(), figma2xliff::Error>(())
/// ```
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output_dir: Q,
    options: &ConvertOptions,
) -> Result<ConvertOutcome, Error> {
    let document = Document::read_from(input.as_ref())?;
    info!("Figma file opened: {}", input.as_ref().display());

    let conversion = Conversion::new(&document, options);
    let written = conversion.write_all(output_dir)?;

    Ok(ConvertOutcome {
        report: *conversion.report(),
        written,
    })
}
