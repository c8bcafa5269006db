use std::fmt;

/// One `label: value` line of the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub label: &'static str,
    pub value: String,
}

/// A titled group of entries; entries with empty values are never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySection {
    pub title: &'static str,
    entries: Vec<SummaryEntry>,
}

impl SummarySection {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            entries: Vec::new(),
        }
    }

    /// Appends an entry unless `value` is empty.
    pub fn entry(
        mut self,
        label: &'static str,
        value: impl Into<String>,
    ) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.entries.push(SummaryEntry { label, value });
        }
        self
    }

    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    pub fn value(
        &self,
        label: &str,
    ) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.value.as_str())
    }
}

/// The rendered summary. Rebuilt from scratch on every render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryView {
    sections: Vec<SummarySection>,
}

impl SummaryView {
    pub fn new(sections: Vec<SummarySection>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[SummarySection] {
        &self.sections
    }

    pub fn section(
        &self,
        title: &str,
    ) -> Option<&SummarySection> {
        self.sections.iter().find(|s| s.title == title)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Markup for the summary container: one `<section>` per group with its
    /// heading and entry list. Values are HTML-escaped.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for section in &self.sections {
            html.push_str("<section class=\"summary__section\">");
            html.push_str(&format!("<h3>{}</h3>", escape_html(section.title)));
            html.push_str("<ul class=\"summary__list\">");
            for entry in section.entries() {
                html.push_str(&format!(
                    "<li><strong>{}:</strong> {}</li>",
                    escape_html(entry.label),
                    escape_html(&entry.value)
                ));
            }
            html.push_str("</ul></section>");
        }
        html
    }

    /// A standalone HTML page holding the summary, ready to be printed.
    pub fn print_document(
        &self,
        title: &str,
    ) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
             <style>{PRINT_STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n<div id=\"summary\">{body}</div>\n</body>\n</html>\n",
            title = escape_html(title),
            body = self.to_html(),
        )
    }
}

const PRINT_STYLE: &str = "body{font-family:sans-serif;margin:2rem;}\
.summary__section{margin-bottom:1.5rem;}\
.summary__list{list-style:none;padding:0;}\
.summary__list li{margin:0.25rem 0;}";

/// Plain-text rendering, one section title followed by its indented entries.
impl fmt::Display for SummaryView {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", section.title)?;
            for entry in section.entries() {
                writeln!(f, "  {}: {}", entry.label, entry.value)?;
            }
        }
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> SummaryView {
        SummaryView::new(vec![
            SummarySection::new("Vendedor")
                .entry("Nombre", "Ana <Ruiz> & Hijos")
                .entry("Email", ""),
        ])
    }

    #[test]
    fn empty_values_are_not_stored() {
        let view = sample();
        let section = view.section("Vendedor").unwrap();

        assert_eq!(section.entries().len(), 1);
        assert_eq!(section.value("Email"), None);
    }

    #[test]
    fn html_escapes_user_values() {
        assert_eq!(
            sample().to_html(),
            "<section class=\"summary__section\"><h3>Vendedor</h3>\
             <ul class=\"summary__list\"><li><strong>Nombre:</strong> \
             Ana &lt;Ruiz&gt; &amp; Hijos</li></ul></section>"
        );
    }

    #[test]
    fn plain_text_lists_entries_under_titles() {
        let view = SummaryView::new(vec![
            SummarySection::new("Vehículo").entry("Matrícula", "1234ABC"),
            SummarySection::new("Comprador"),
        ]);

        assert_eq!(
            view.to_string(),
            "Vehículo\n  Matrícula: 1234ABC\n\nComprador\n"
        );
    }

    #[test]
    fn print_document_wraps_summary_markup() {
        let document = sample().print_document("Contrato de compraventa");

        assert!(document.starts_with("<!DOCTYPE html>"));
        assert!(document.contains("<title>Contrato de compraventa</title>"));
        assert!(document.contains(&sample().to_html()));
    }
}
