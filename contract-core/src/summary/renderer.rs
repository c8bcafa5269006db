use tracing::debug;

use super::{
    format::{format_currency, join_non_empty},
    view::{SummarySection, SummaryView},
};
use crate::models::{DOCUMENTS_FIELD, FormState};

pub const NO_DOCUMENTS_FALLBACK: &str = "Sin documentación marcada.";
pub const NO_CLAUSES_FALLBACK: &str = "Sin cláusulas marcadas.";

pub const CLAUSE_WARRANTY_SENTENCE: &str =
    "El vendedor declara estar al corriente de impuestos, multas y cargas administrativas.";
pub const CLAUSE_INSPECTION_SENTENCE: &str =
    "El comprador reconoce haber probado el vehículo y acepta su estado actual.";
pub const CLAUSE_DATA_SENTENCE: &str = "Autorización para el tratamiento de datos personales.";

const CLAUSES: [(&str, &str); 3] = [
    ("clausula_garantia", CLAUSE_WARRANTY_SENTENCE),
    ("clausula_revision", CLAUSE_INSPECTION_SENTENCE),
    ("clausula_datos", CLAUSE_DATA_SENTENCE),
];

/// Builds the contract summary from the current form state.
///
/// Always yields the same five sections in the same order; rendering the
/// same state twice yields equal views.
pub fn render_summary(state: &FormState) -> SummaryView {
    let v = |name: &str| state.value(name);

    let contract = SummarySection::new("Datos del contrato")
        .entry("Ciudad de formalización", v("ciudad_formalizacion"))
        .entry("Fecha del contrato", v("fecha_contrato"))
        .entry(
            "Lugar y hora de entrega",
            join_non_empty(&[v("lugar_entrega"), v("hora_entrega")], " - "),
        );

    let seller = party_section("Vendedor", "vendedor", state);
    let buyer = party_section("Comprador", "comprador", state);

    let km = v("vehiculo_km");
    let vehicle = SummarySection::new("Vehículo")
        .entry("Matrícula", v("vehiculo_matricula"))
        .entry(
            "Marca y modelo",
            join_non_empty(&[v("vehiculo_marca"), v("vehiculo_modelo")], " - "),
        )
        .entry("Año", v("vehiculo_anio"))
        .entry("Nº bastidor", v("vehiculo_bastidor"))
        .entry(
            "Kilometraje",
            if km.is_empty() {
                String::new()
            } else {
                format!("{km} km")
            },
        )
        .entry("Combustible", v("vehiculo_combustible"))
        .entry("ITV vigente hasta", v("vehiculo_itv"))
        .entry("Documentación entregada", documents_text(state));

    let conditions = SummarySection::new("Condiciones económicas")
        .entry("Precio de venta", format_currency(v("precio")))
        .entry("Señal o depósito", format_currency(v("deposito")))
        .entry("Forma de pago", v("forma_pago"))
        .entry("Fecha prevista de pago", v("fecha_pago"))
        .entry("Observaciones", v("observaciones"))
        .entry("Cláusulas aceptadas", clauses_text(state))
        .entry(
            "Lugar y fecha de firma",
            join_non_empty(&[v("lugar_firma"), v("fecha_firma")], ", "),
        );

    let view = SummaryView::new(vec![contract, seller, buyer, vehicle, conditions]);
    debug!(
        entries = view.sections().iter().map(|s| s.entries().len()).sum::<usize>(),
        "summary rendered"
    );
    view
}

fn party_section(
    title: &'static str,
    prefix: &str,
    state: &FormState,
) -> SummarySection {
    let v = |suffix: &str| state.value(&format!("{prefix}_{suffix}")).to_string();

    SummarySection::new(title)
        .entry("Nombre", v("nombre"))
        .entry("DNI/NIE", v("dni"))
        .entry("Email", v("email"))
        .entry("Teléfono", v("telefono"))
        .entry("Domicilio", v("direccion"))
}

fn documents_text(state: &FormState) -> String {
    let documents = state.values(DOCUMENTS_FIELD);
    if documents.is_empty() {
        NO_DOCUMENTS_FALLBACK.to_string()
    } else {
        documents.join(", ")
    }
}

fn clauses_text(state: &FormState) -> String {
    let accepted: Vec<&str> = CLAUSES
        .iter()
        .filter(|(field, _)| state.is_checked(field))
        .map(|(_, sentence)| *sentence)
        .collect();

    if accepted.is_empty() {
        NO_CLAUSES_FALLBACK.to_string()
    } else {
        accepted.join(" · ")
    }
}
