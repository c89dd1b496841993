//! Common test utilities for building form catalogs and answers.
use plan_simulator::prelude::*;

/// Builds a `FormData` from `(field, value)` pairs.
#[allow(dead_code)]
pub fn answers<const N: usize>(pairs: [(&str, AnswerValue); N]) -> FormData {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Creates the three-step family flow.
///
/// Logic: step 1 `planType == Familiar` -> step 3 (priority 1); steps 2 and 3 have no rules.
#[allow(dead_code)]
pub fn create_family_flow() -> Vec<FormStep> {
    vec![
        FormStep::new(1, "Tipo de plano")
            .with_field(
                FormField::new("planType", FieldType::Radio, "Tipo de plano")
                    .required()
                    .with_options(["Individual", "Familiar"]),
            )
            .with_rule(NavigationRule::new(
                "r1",
                Condition::new("planType", Operator::Equals, "Familiar"),
                Target::step(3),
                1,
            )),
        FormStep::new(2, "Preferências").with_field(
            FormField::new("priceRange", FieldType::Select, "Faixa de preço")
                .with_options(["economico", "medio", "premium"]),
        ),
        FormStep::new(3, "Dependentes")
            .with_field(FormField::new("dependents", FieldType::Text, "Dependentes")),
    ]
}

/// Creates a plan with the fields the selector looks at.
#[allow(dead_code)]
pub fn plan(id: &str, price: u32, range: &str, recommended: bool, features: &[&str]) -> HealthPlan {
    HealthPlan {
        id: id.to_string(),
        name: format!("Plano {}", id),
        description: String::new(),
        monthly_price: price,
        features: features.iter().map(|f| f.to_string()).collect(),
        coverage: "estadual".to_string(),
        is_recommended: recommended,
        target_price_range: range.to_string(),
    }
}

/// Creates a catalog of plans with ids 1, 3, 5 and 7.
///
/// Only plan 5 is flagged as recommended; plan 7 is the cheapest.
#[allow(dead_code)]
pub fn create_plans() -> Vec<HealthPlan> {
    vec![
        plan("1", 300, "medio", false, &["Consultas", "Exames"]),
        plan("3", 500, "premium", false, &["Internação", "Reembolso"]),
        plan("5", 450, "economico", true, &["Consultas"]),
        plan("7", 150, "medio", false, &["Cobertura odontológica"]),
    ]
}

/// A controller over the family flow and the sample plans.
#[allow(dead_code)]
pub fn create_family_controller() -> FlowController {
    let catalog = Catalog::new(create_family_flow(), create_plans()).unwrap();
    FlowController::new(catalog)
}

/// Path to a file in the repository's `data/` directory.
#[allow(dead_code)]
pub fn data_path(name: &str) -> String {
    format!("{}/data/{}", env!("CARGO_MANIFEST_DIR"), name)
}
