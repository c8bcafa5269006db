//! Field catalogue of the vehicle sale contract form.
//!
//! The catalogue is ordered: fields appear in the order they are laid out on
//! their step panel, which is also the order validation walks them.

use super::field::{FieldKind, FieldSpec};

/// Name of the checkbox group collecting the handed-over documents.
pub const DOCUMENTS_FIELD: &str = "documentos";

pub const DOCUMENT_OPTIONS: &[&str] = &[
    "Permiso de circulación",
    "Ficha técnica",
    "Informe ITV",
    "Manual y libro de mantenimiento",
    "Segunda llave",
];

pub const FUEL_OPTIONS: &[&str] = &["Gasolina", "Diésel", "Híbrido", "Eléctrico", "GLP", "Otro"];

pub const PAYMENT_OPTIONS: &[&str] = &[
    "Transferencia bancaria",
    "Efectivo",
    "Cheque bancario",
    "Financiación",
];

const DNI_NIE_PATTERN: &str = "[0-9XYZxyz][0-9]{7}[A-Za-z]";
const PHONE_PATTERN: &str = "[+0-9 ]{9,15}";
const VIN_PATTERN: &str = "[A-HJ-NPR-Za-hj-npr-z0-9]{17}";

/// Title of one step panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSpec {
    pub title: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    steps: Vec<StepSpec>,
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(
        steps: Vec<StepSpec>,
        fields: Vec<FieldSpec>,
    ) -> Self {
        Self { steps, fields }
    }

    /// The five-step contract form: contract data, seller, buyer, vehicle,
    /// and economic conditions with the summary.
    pub fn vehicle_sale() -> Self {
        let steps = vec![
            StepSpec {
                title: "Datos del contrato",
            },
            StepSpec { title: "Vendedor" },
            StepSpec { title: "Comprador" },
            StepSpec { title: "Vehículo" },
            StepSpec {
                title: "Condiciones y resumen",
            },
        ];

        let mut fields = vec![
            FieldSpec::text("ciudad_formalizacion", "Ciudad de formalización", 0).required(),
            FieldSpec::new("fecha_contrato", "Fecha del contrato", 0, FieldKind::Date).required(),
            FieldSpec::text("lugar_entrega", "Lugar de entrega", 0),
            FieldSpec::new("hora_entrega", "Hora de entrega", 0, FieldKind::Time),
        ];
        fields.extend(party_fields(SELLER_FIELDS, 1));
        fields.extend(party_fields(BUYER_FIELDS, 2));
        fields.extend([
            FieldSpec::text("vehiculo_matricula", "Matrícula", 3)
                .required()
                .max_length(10),
            FieldSpec::text("vehiculo_marca", "Marca", 3).required(),
            FieldSpec::text("vehiculo_modelo", "Modelo", 3).required(),
            FieldSpec::new(
                "vehiculo_anio",
                "Año",
                3,
                FieldKind::Number {
                    min: Some(1900),
                    max: Some(2100),
                },
            ),
            FieldSpec::text("vehiculo_bastidor", "Nº bastidor", 3).pattern(VIN_PATTERN),
            FieldSpec::new(
                "vehiculo_km",
                "Kilometraje",
                3,
                FieldKind::Number {
                    min: Some(0),
                    max: None,
                },
            ),
            FieldSpec::new(
                "vehiculo_combustible",
                "Combustible",
                3,
                FieldKind::Select(FUEL_OPTIONS),
            ),
            FieldSpec::new("vehiculo_itv", "ITV vigente hasta", 3, FieldKind::Date),
            FieldSpec::new(
                DOCUMENTS_FIELD,
                "Documentación entregada",
                3,
                FieldKind::CheckboxGroup(DOCUMENT_OPTIONS),
            ),
            FieldSpec::new(
                "precio",
                "Precio de venta (€)",
                4,
                FieldKind::Number {
                    min: Some(0),
                    max: None,
                },
            )
            .required(),
            FieldSpec::new(
                "deposito",
                "Señal o depósito (€)",
                4,
                FieldKind::Number {
                    min: Some(0),
                    max: None,
                },
            ),
            FieldSpec::new(
                "forma_pago",
                "Forma de pago",
                4,
                FieldKind::Select(PAYMENT_OPTIONS),
            )
            .required(),
            FieldSpec::new("fecha_pago", "Fecha prevista de pago", 4, FieldKind::Date),
            FieldSpec::new("observaciones", "Observaciones", 4, FieldKind::TextArea)
                .max_length(1000),
            FieldSpec::new(
                "clausula_garantia",
                "El vendedor está al corriente de impuestos y cargas",
                4,
                FieldKind::Checkbox,
            ),
            FieldSpec::new(
                "clausula_revision",
                "El comprador ha probado el vehículo y acepta su estado",
                4,
                FieldKind::Checkbox,
            ),
            FieldSpec::new(
                "clausula_datos",
                "Acepto el tratamiento de datos personales",
                4,
                FieldKind::Checkbox,
            )
            .required(),
            FieldSpec::text("lugar_firma", "Lugar de firma", 4),
            FieldSpec::new("fecha_firma", "Fecha de firma", 4, FieldKind::Date),
        ]);

        Self::new(steps, fields)
    }

    pub fn steps(&self) -> &[StepSpec] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(
        &self,
        name: &str,
    ) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fields_in_step(
        &self,
        step: usize,
    ) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(move |f| f.step == step)
    }
}

/// Names of the five fields describing one contracting party, in layout order:
/// full name, id document, email, phone, address.
type PartyFieldNames = [&'static str; 5];

const SELLER_FIELDS: PartyFieldNames = [
    "vendedor_nombre",
    "vendedor_dni",
    "vendedor_email",
    "vendedor_telefono",
    "vendedor_direccion",
];

const BUYER_FIELDS: PartyFieldNames = [
    "comprador_nombre",
    "comprador_dni",
    "comprador_email",
    "comprador_telefono",
    "comprador_direccion",
];

fn party_fields(
    names: PartyFieldNames,
    step: usize,
) -> [FieldSpec; 5] {
    let [name, dni, email, phone, address] = names;
    [
        FieldSpec::text(name, "Nombre completo", step).required(),
        FieldSpec::text(dni, "DNI/NIE", step)
            .required()
            .pattern(DNI_NIE_PATTERN),
        FieldSpec::new(email, "Email", step, FieldKind::Email),
        FieldSpec::new(phone, "Teléfono", step, FieldKind::Tel).pattern(PHONE_PATTERN),
        FieldSpec::text(address, "Domicilio", step).required(),
    ]
}
