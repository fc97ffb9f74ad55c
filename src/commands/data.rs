use anyhow::{Context as _, Result};
use declarative::RawFilter;

use super::{connect, print_json, read_document};
use crate::Context;
use crate::cli::DataArgs;
use crate::registry::Registry;
use crate::ui;

/// Parse `FIELD=VALUES`; exact clauses split their values on commas
fn parse_clause(spec: &str, regex: bool) -> Result<RawFilter> {
    let (name, values) = spec
        .split_once('=')
        .with_context(|| format!("Filter must look like FIELD=VALUE: {spec}"))?;

    Ok(if regex {
        RawFilter::pattern(name, [values])
    } else {
        RawFilter::exact(name, values.split(','))
    })
}

fn collect_filters(args: &DataArgs) -> Result<Vec<RawFilter>> {
    let mut filters: Vec<RawFilter> = match &args.filters {
        Some(path) => serde_json::from_value(read_document(path)?)
            .context("Filters must be a JSON array of { name, values, regex }")?,
        None => Vec::new(),
    };

    for spec in &args.exact {
        filters.push(parse_clause(spec, false)?);
    }
    for spec in &args.regex {
        filters.push(parse_clause(spec, true)?);
    }
    Ok(filters)
}

pub fn run(ctx: &Context, args: &DataArgs) -> Result<()> {
    let registry = Registry::builtin();
    let source = registry
        .data_source(&args.data_source)
        .with_context(|| format!("Unknown data source: {}", args.data_source))?;
    let filters = collect_filters(args)?;

    let client = connect(ctx)?;
    let output = source.read(&client, &filters)?;

    if !ctx.quiet {
        let count = output["list"].as_array().map_or(0, Vec::len);
        ui::info(&format!("{count} {} records matched", source.name()));
    }
    print_json(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args() -> DataArgs {
        DataArgs {
            data_source: "aws_iam_policy".to_string(),
            filters: None,
            exact: Vec::new(),
            regex: Vec::new(),
        }
    }

    #[test]
    fn test_parse_exact_clause() {
        let clause = parse_clause("owner_users.id=100,300", false).unwrap();
        assert_eq!(clause, RawFilter::exact("owner_users.id", ["100", "300"]));
    }

    #[test]
    fn test_regex_keeps_commas() {
        let clause = parse_clause("name=^a{1,2}$", true).unwrap();
        assert_eq!(clause, RawFilter::pattern("name", ["^a{1,2}$"]));
    }

    #[test]
    fn test_clause_without_equals() {
        assert!(parse_clause("name", false).is_err());
    }

    #[test]
    fn test_collect_from_file_and_flags() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("filters.json");
        fs::write(&path, r#"[{"name": "id", "values": ["200"]}]"#).unwrap();

        let mut args = args();
        args.filters = Some(path);
        args.regex = vec!["name=Access$".to_string()];

        let filters = collect_filters(&args).unwrap();
        assert_eq!(
            filters,
            vec![
                RawFilter::exact("id", ["200"]),
                RawFilter::pattern("name", ["Access$"]),
            ]
        );
    }

    #[test]
    fn test_collect_rejects_bad_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("filters.json");
        fs::write(&path, r#"{"name": "id"}"#).unwrap();

        let mut args = args();
        args.filters = Some(path);
        assert!(collect_filters(&args).is_err());
    }
}
