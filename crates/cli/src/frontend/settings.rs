//! Classifier settings resolved from the `--config` file and flag overrides.

use std::fs;

use displacement::{Classifier, ClassifierConfig};

use super::arguments::ParsedArgs;
use crate::error::CliError;

/// Builds the configuration: defaults, then the JSON file, then flags.
pub(crate) fn resolve_config(args: &ParsedArgs) -> Result<ClassifierConfig, CliError> {
    let mut config = match &args.config_file {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|source| CliError::ConfigParse {
                path: path.clone(),
                source,
            })?
        }
        None => ClassifierConfig::default(),
    };

    if let Some(page_size) = args.page_size {
        config = config.with_page_size(page_size);
    }
    if let Some(budget) = args.budget {
        config = config.with_diff_budget(budget);
    }
    if let Some(threshold) = args.bulk_threshold {
        config = config.with_bulk_threshold(threshold);
    }
    if let Some(ratio) = args.low_confidence_ratio {
        config = config.with_low_confidence_ratio(ratio);
    }
    Ok(config)
}

/// Resolves and validates the classifier for this invocation.
pub(crate) fn build_classifier(args: &ParsedArgs) -> Result<Classifier, CliError> {
    let config = resolve_config(args)?;
    tracing::debug!(target: "pageshift::policy", ?config, "classifier configured");
    Ok(Classifier::new(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::arguments::parse_args;
    use test_support::PageDir;

    fn args_with(extra: &[&str]) -> ParsedArgs {
        let mut argv = vec!["pageshift", "compare", "1", "2"];
        argv.extend_from_slice(extra);
        parse_args(argv).unwrap()
    }

    #[test]
    fn defaults_without_file_or_flags() {
        assert_eq!(
            resolve_config(&args_with(&[])).unwrap(),
            ClassifierConfig::default()
        );
    }

    #[test]
    fn flags_override_file() {
        let dir = PageDir::new().unwrap();
        let path = dir
            .write_file("cfg.json", br#"{ "diff_budget": 7, "bulk_threshold": 0.5 }"#)
            .unwrap();
        let path = path.to_str().unwrap();
        let config = resolve_config(&args_with(&["--config", path, "--budget", "3"])).unwrap();
        assert_eq!(config.diff_budget, 3);
        assert_eq!(config.bulk_threshold, 0.5);
        assert_eq!(config.page_size, displacement::PAGE_SIZE);
    }

    #[test]
    fn missing_file_is_config_read_error() {
        let err = resolve_config(&args_with(&["--config", "/nonexistent/cfg.json"])).unwrap_err();
        assert!(matches!(err, CliError::ConfigRead { .. }));
    }

    #[test]
    fn malformed_file_is_config_parse_error() {
        let dir = PageDir::new().unwrap();
        let path = dir.write_file("cfg.json", b"{ not json").unwrap();
        let err = resolve_config(&args_with(&["--config", path.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, CliError::ConfigParse { .. }));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let err = build_classifier(&args_with(&["--page-size", "0"])).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        let err = build_classifier(&args_with(&["--bulk-threshold", "1.5"])).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
