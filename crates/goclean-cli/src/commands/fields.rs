//! `goclean fields`: parse and classify a descriptor without generating.

use serde::Serialize;

use goclean_core::domain::{FieldPlan, SearchMethod, classify_all, parse_fields};

use crate::{
    cli::{FieldsArgs, FieldsFormat, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct FieldsSummary {
    /// Descriptor re-serialized in canonical form.
    descriptor: String,
    fields: Vec<FieldPlan>,
    search_methods: Vec<SearchMethod>,
    /// Struct field count including system-managed fields.
    total_fields: usize,
}

pub fn execute(args: FieldsArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let summary = summarize(&args.descriptor, &config)?;

    if args.format == FieldsFormat::Json || output.format() == OutputFormat::Json {
        output.json(&summary)?;
        return Ok(());
    }

    output.header(&format!(
        "{:<16} {:<10} {:<12} {:<8} {:<8} COLUMN",
        "FIELD", "TYPE", "GO TYPE", "SEARCH", "UNIQUE"
    ))?;
    for plan in &summary.fields {
        output.print(&format!(
            "{:<16} {:<10} {:<12} {:<8} {:<8} {}",
            plan.name,
            plan.field_type,
            plan.go_type,
            yes_no(plan.searchable),
            yes_no(plan.unique),
            plan.column
        ))?;
    }

    if !summary.search_methods.is_empty() {
        output.print("")?;
        output.header("Search methods")?;
        for method in &summary.search_methods {
            output.print(&format!(
                "  {}({} {}) -> {}",
                method.method_name, method.param_name, method.go_type, method.cardinality
            ))?;
        }
    }

    output.print("")?;
    output.info(&format!(
        "{} declared field(s), {} struct field(s) with system fields",
        summary.fields.len(),
        summary.total_fields
    ))?;
    Ok(())
}

fn summarize(descriptor: &str, config: &AppConfig) -> CliResult<FieldsSummary> {
    let list = parse_fields(descriptor).map_err(goclean_core::error::GocleanError::from)?;
    let flags = config.resolve_flags(&Default::default());
    let plans = classify_all(&list);
    let search_methods = plans.iter().filter_map(FieldPlan::search_method).collect();

    Ok(FieldsSummary {
        descriptor: list.to_dsl(),
        total_fields: list.total_len(&flags),
        fields: plans,
        search_methods,
    })
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goclean_core::domain::Cardinality;

    #[test]
    fn scenario_descriptor_summary() {
        let summary =
            summarize("name:string,price:float64,email:string", &AppConfig::default()).unwrap();
        assert_eq!(summary.fields.len(), 3);
        assert_eq!(summary.total_fields, 4);

        let email = summary.search_methods.iter().find(|m| m.field_name == "Email").unwrap();
        assert_eq!(email.method_name, "FindByEmail");
        assert_eq!(email.cardinality, Cardinality::One);
        assert!(!summary.search_methods.iter().any(|m| m.field_name == "Price"));
    }

    #[test]
    fn configured_timestamps_count_towards_total() {
        let mut config = AppConfig::default();
        config.generation.timestamps = true;
        let summary = summarize("name:string", &config).unwrap();
        assert_eq!(summary.total_fields, 4);
    }

    #[test]
    fn bad_descriptor_is_user_error() {
        let err = summarize("name:money", &AppConfig::default()).err().unwrap();
        assert_eq!(err.exit_code(), 2);
    }
}
