//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use std::cell::RefCell;

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${` is present.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let unset = RefCell::new(Vec::new());
    let expanded = shellexpand::env_with_context_no_errors(value, |var: &str| {
        let found = std::env::var(var).ok();
        if found.is_none() {
            unset.borrow_mut().push(var.to_owned());
        }
        found
    })
    .into_owned();

    // Unset variables without a default are left in place by the expander
    if let Some(var) = unset
        .borrow()
        .iter()
        .find(|var| expanded.contains(&format!("${{{var}}}")))
    {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var}}} not set"),
        });
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("FOLIO_TEST_SIMPLE", "hello");
        }
        let result = expand_env("${FOLIO_TEST_SIMPLE}", "test.field").unwrap();
        assert_eq!(result, "hello");
        unsafe {
            std::env::remove_var("FOLIO_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_value() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("FOLIO_TEST_DEFAULT", "hello");
        }
        let result = expand_env("${FOLIO_TEST_DEFAULT:-world}", "test.field").unwrap();
        assert_eq!(result, "hello");
        unsafe {
            std::env::remove_var("FOLIO_TEST_DEFAULT");
        }
    }

    #[test]
    fn test_expand_missing_var_error() {
        let result = expand_env("${FOLIO_TEST_MISSING}", "content.content_dir");

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in content.content_dir: ${FOLIO_TEST_MISSING} not set"
        );
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("getting-started/intro", "test.field").unwrap();
        assert_eq!(result, "getting-started/intro");
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("FOLIO_TEST_WORKSHOP", "k8s");
        }
        let result = expand_env("/srv/${FOLIO_TEST_WORKSHOP}/content", "test.path").unwrap();
        assert_eq!(result, "/srv/k8s/content");
        unsafe {
            std::env::remove_var("FOLIO_TEST_WORKSHOP");
        }
    }
}
