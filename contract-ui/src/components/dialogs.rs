use rfd::AsyncFileDialog;
use std::path::PathBuf;

/// File name offered when saving the printable contract.
pub const PRINT_FILE_NAME: &str = "contrato-compraventa.html";

/// Opens an async save dialog with the given filters and suggested file name.
///
/// Each filter is a `(name, extensions)` pair, e.g. `("HTML", &["html", "htm"])`.
/// Returns `None` when the user cancels.
pub async fn pick_save_path(
    file_name: String,
    filters: Vec<(String, Vec<String>)>,
) -> Option<PathBuf> {
    let mut dialog = AsyncFileDialog::new()
        .set_title("Guardar contrato para imprimir")
        .set_file_name(&file_name);

    for (name, extensions) in &filters {
        let ext_refs: Vec<&str> = extensions.iter().map(|s| s.as_str()).collect();
        dialog = dialog.add_filter(name, &ext_refs);
    }

    let file = dialog.save_file().await?;
    Some(file.path().to_path_buf())
}

/// Filters offered by the print dialog.
pub fn print_filters() -> Vec<(String, Vec<String>)> {
    owned_filters(&[("Documento HTML", &["html", "htm"])])
}

/// Converts borrowed filter definitions into owned `String` values.
///
/// This is useful when filter data needs to be moved into an `async move`
/// closure or other `'static` context where references cannot be used.
///
/// # Examples
///
/// ```
/// use contract_ui::components::dialogs::owned_filters;
///
/// let filters = owned_filters(&[("HTML", &["html", "htm"]), ("Texto", &["txt"])]);
///
/// assert_eq!(filters.len(), 2);
/// assert_eq!(filters[0].1, vec!["html", "htm"]);
/// assert_eq!(filters[1].0, "Texto");
/// ```
pub fn owned_filters(filters: &[(&str, &[&str])]) -> Vec<(String, Vec<String>)> {
    filters
        .iter()
        .map(|(name, exts)| {
            (
                name.to_string(),
                exts.iter().map(|e| e.to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn print_filters_offer_html() {
        let expected = vec![(
            "Documento HTML".to_string(),
            vec!["html".to_string(), "htm".to_string()],
        )];

        assert_eq!(print_filters(), expected);
    }

    #[test]
    fn owned_filters_keep_order_across_types() {
        let input_filter = &[("HTML", &["html"] as &[_]), ("Texto", &["txt", "text"] as &[_])];
        let expected = vec![
            ("HTML".to_string(), vec!["html".to_string()]),
            (
                "Texto".to_string(),
                vec!["txt".to_string(), "text".to_string()],
            ),
        ];

        assert_eq!(owned_filters(input_filter), expected);
    }

    #[test]
    fn suggested_file_name_is_html() {
        assert!(PRINT_FILE_NAME.ends_with(".html"));
    }
}
