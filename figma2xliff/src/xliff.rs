//! XLIFF 2.0 rendering of a [`TranslationModel`] for one target locale.
//!
//! Every entry becomes one `<unit>` with a single `<segment>`, even when the
//! target locale has no translation for it, so all locale files carry the same
//! units in the same order.

use std::io::Write;

use quick_xml::{
    Writer,
    escape::escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    builder::{TranslationEntry, TranslationModel},
    error::Error,
    traits::Render,
    types::{LocaleCode, value_is_truthy, value_text},
};

pub const XLIFF_VERSION: &str = "2.0";
pub const XLIFF_NAMESPACE: &str = "urn:oasis:names:tc:xliff:document:2.0";

/// Wraps a singular/plural pair in the ICU message shape translation tools
/// expect. Spacing and brace placement are fixed.
pub fn icu_plural(singular: &str, plural: &str) -> String {
    format!("{{VAR_PLURAL, plural, =1 {{{singular}}} other {{{plural}}} }}")
}

/// Unescaped source and target text of one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitText {
    pub source: String,
    pub target: String,
}

impl UnitText {
    pub fn for_entry(entry: &TranslationEntry, target: &LocaleCode) -> Self {
        let plural = entry
            .plural
            .as_ref()
            .filter(|plural| value_is_truthy(plural.target(target)));

        match plural {
            Some(plural) => UnitText {
                source: icu_plural(
                    &value_text(entry.source()),
                    &value_text(plural.source.as_ref()),
                ),
                target: icu_plural(
                    &value_text(entry.target(target)),
                    &value_text(plural.target(target)),
                ),
            },
            None => UnitText {
                source: value_text(entry.source()).into_owned(),
                target: value_text(entry.target(target)).into_owned(),
            },
        }
    }
}

/// One locale's view of the model, ready to be written out.
#[derive(Debug, Clone, Copy)]
pub struct XliffDocument<'a> {
    model: &'a TranslationModel,
    target: &'a LocaleCode,
}

impl<'a> XliffDocument<'a> {
    pub fn new(model: &'a TranslationModel, target: &'a LocaleCode) -> Self {
        Self { model, target }
    }

    pub fn target_locale(&self) -> &LocaleCode {
        self.target
    }

    pub fn units(&self) -> impl Iterator<Item = (&'a str, UnitText)> + use<'a> {
        let target = self.target;
        self.model
            .iter()
            .map(move |(id, entry)| (id, UnitText::for_entry(entry, target)))
    }
}

impl Render for XliffDocument<'_> {
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new_with_indent(writer, b' ', 2);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("xliff");
        root.push_attribute(("version", XLIFF_VERSION));
        root.push_attribute(("xmlns", XLIFF_NAMESPACE));
        xml_writer.write_event(Event::Start(root))?;

        let mut file = BytesStart::new("file");
        file.push_attribute(("id", "translations"));
        file.push_attribute(("original", "generated"));
        file.push_attribute(("datatype", "html"));
        xml_writer.write_event(Event::Start(file))?;

        for (id, text) in self.units() {
            let mut unit = BytesStart::new("unit");
            unit.push_attribute(("id", id));
            unit.push_attribute(("datatype", "html"));
            xml_writer.write_event(Event::Start(unit))?;
            xml_writer.write_event(Event::Start(BytesStart::new("segment")))?;
            write_text_element(&mut xml_writer, "source", &text.source)?;
            write_text_element(&mut xml_writer, "target", &text.target)?;
            xml_writer.write_event(Event::End(BytesEnd::new("segment")))?;
            xml_writer.write_event(Event::End(BytesEnd::new("unit")))?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("file")))?;
        xml_writer.write_event(Event::End(BytesEnd::new("xliff")))?;
        Ok(())
    }
}

/// Writes `<name>text</name>` with all five XML special characters escaped.
fn write_text_element<W: Write>(
    xml_writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), Error> {
    xml_writer.write_event(Event::Start(BytesStart::new(name)))?;
    xml_writer.write_event(Event::Text(BytesText::from_escaped(escape(text))))?;
    xml_writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builder::PluralPairing,
        locale::LocaleIndex,
        types::{ModeId, RecordSlot, VariableRecord},
    };
    use indoc::indoc;
    use quick_xml::Reader;
    use serde_json::json;

    fn build(slots: &[RecordSlot]) -> TranslationModel {
        let modes = [("en", "m_en"), ("pt_br", "m_pt"), ("fr", "m_fr")]
            .into_iter()
            .map(|(l, m)| (LocaleCode::from(l), ModeId::from(m)))
            .collect();
        let index = LocaleIndex::new(&modes, LocaleCode::from("en"));
        TranslationModel::build(slots, &index, PluralPairing::InputOrder).0
    }

    fn apple_model() -> TranslationModel {
        build(&[
            VariableRecord::new("Cat/Apple", [("m_en", "Apple"), ("m_pt", "Maçã")]).into(),
            VariableRecord::new("Cat/Apple (plural)", [("m_en", "Apples"), ("m_pt", "Maçãs")])
                .into(),
        ])
    }

    /// Reads back `(id, source, target)` for every unit.
    fn read_units(xml: &str) -> Vec<(String, String, String)> {
        let mut reader = Reader::from_str(xml);
        let mut units = Vec::new();
        let mut current = (String::new(), String::new(), String::new());
        let mut field: Option<&'static str> = None;
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) => match e.name().as_ref() {
                    b"unit" => {
                        let id = e.try_get_attribute("id").unwrap().unwrap();
                        current = (id.unescape_value().unwrap().into_owned(), String::new(), String::new());
                    }
                    b"source" => field = Some("source"),
                    b"target" => field = Some("target"),
                    _ => {}
                },
                Event::Text(t) => {
                    let text = t.unescape().unwrap().into_owned();
                    match field {
                        Some("source") => current.1.push_str(&text),
                        Some("target") => current.2.push_str(&text),
                        _ => {}
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"source" | b"target" => field = None,
                    b"unit" => units.push(std::mem::take(&mut current)),
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }
        units
    }

    #[test]
    fn test_icu_plural_format() {
        assert_eq!(
            icu_plural("Maçã", "Maçãs"),
            "{VAR_PLURAL, plural, =1 {Maçã} other {Maçãs} }"
        );
    }

    #[test]
    fn test_full_document_layout() {
        let model = build(&[VariableRecord::new(
            "Cat/Greeting",
            [("m_en", "Hello"), ("m_pt", "Olá")],
        )
        .into()]);
        let pt = LocaleCode::from("pt_br");
        let xml = XliffDocument::new(&model, &pt).render().unwrap();
        let expected = indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <xliff version="2.0" xmlns="urn:oasis:names:tc:xliff:document:2.0">
              <file id="translations" original="generated" datatype="html">
                <unit id="greeting" datatype="html">
                  <segment>
                    <source>Hello</source>
                    <target>Olá</target>
                  </segment>
                </unit>
              </file>
            </xliff>"#};
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_plural_unit_uses_icu_message() {
        let model = apple_model();
        let pt = LocaleCode::from("pt_br");
        let xml = XliffDocument::new(&model, &pt).render().unwrap();
        assert!(xml.contains("<source>{VAR_PLURAL, plural, =1 {Apple} other {Apples} }</source>"));
        assert!(xml.contains("<target>{VAR_PLURAL, plural, =1 {Maçã} other {Maçãs} }</target>"));
    }

    #[test]
    fn test_plural_without_target_form_falls_back_to_singular() {
        let model = apple_model();
        let fr = LocaleCode::from("fr");
        let units = read_units(&XliffDocument::new(&model, &fr).render().unwrap());
        assert_eq!(
            units,
            vec![("apple".to_string(), "Apple".to_string(), String::new())]
        );
    }

    #[test]
    fn test_empty_plural_target_is_not_a_plural() {
        let model = build(&[
            VariableRecord::new("Cat/Item", [("m_en", "Item"), ("m_pt", "Item")]).into(),
            VariableRecord::new("Cat/Item (plural)", [("m_en", "Items"), ("m_pt", "")]).into(),
        ]);
        let entry = model.get("item").unwrap();
        let text = UnitText::for_entry(entry, &LocaleCode::from("pt_br"));
        assert_eq!(text.source, "Item");
        assert_eq!(text.target, "Item");
    }

    #[test]
    fn test_escaping_round_trips() {
        let raw = r#"Tom & Jerry say "<hi>" isn't it"#;
        let model = build(&[VariableRecord::new(
            "Cat/Quote",
            [("m_en", raw), ("m_pt", raw)],
        )
        .into()]);
        let pt = LocaleCode::from("pt_br");
        let xml = XliffDocument::new(&model, &pt).render().unwrap();
        assert!(xml.contains(
            "Tom &amp; Jerry say &quot;&lt;hi&gt;&quot; isn&apos;t it"
        ));
        let units = read_units(&xml);
        assert_eq!(units[0].1, raw);
        assert_eq!(units[0].2, raw);
    }

    #[test]
    fn test_missing_and_non_string_values() {
        let model = build(&[
            VariableRecord::new("Cat/Count", [("m_en", json!(3)), ("m_pt", json!(null))]).into(),
            VariableRecord::new("Cat/Flag", [("m_en", json!(true))]).into(),
        ]);
        let pt = LocaleCode::from("pt_br");
        let units = read_units(&XliffDocument::new(&model, &pt).render().unwrap());
        assert_eq!(
            units,
            vec![
                ("count".to_string(), "3".to_string(), String::new()),
                ("flag".to_string(), "true".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_integral_float_renders_without_fraction() {
        let model = build(&[VariableRecord::new(
            "Cat/Max Items",
            [("m_en", json!(10.0)), ("m_pt", json!(2.5))],
        )
        .into()]);
        let pt = LocaleCode::from("pt_br");
        let xml = XliffDocument::new(&model, &pt).render().unwrap();
        assert!(xml.contains("<source>10</source>"));
        assert!(xml.contains("<target>2.5</target>"));
    }

    #[test]
    fn test_unit_count_is_locale_independent() {
        let model = build(&[
            VariableRecord::new("Cat/A", [("m_en", "a"), ("m_pt", "á")]).into(),
            VariableRecord::new("Cat/B", [("m_en", "b")]).into(),
            VariableRecord::new("Cat/B (plural)", [("m_en", "bs"), ("m_fr", "bés")]).into(),
            VariableRecord::new("Cat/C", [("m_fr", "c")]).into(),
        ]);
        for locale in ["pt_br", "fr"] {
            let locale = LocaleCode::from(locale);
            let xml = XliffDocument::new(&model, &locale).render().unwrap();
            assert_eq!(xml.matches("<unit ").count(), model.len());
            assert_eq!(read_units(&xml).len(), 3);
        }
    }
}
