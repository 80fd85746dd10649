//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Only braced references are expanded. A bare `$name`, as in a query
/// string, and an unterminated `${` are copied through unchanged. `field`
/// names the setting in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let end = start + len + 1;
        expanded.push_str(&rest[..start]);
        expanded.push_str(&expand_reference(&rest[start..end], field)?);
        rest = &rest[end..];
    }
    expanded.push_str(rest);
    Ok(expanded)
}

fn expand_reference(reference: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(reference, |name| -> Result<Option<String>, UnsetVar> {
        std::env::var(name).map(Some).map_err(|_| UnsetVar {
            name: name.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.name),
    })
}

/// Lookup failure for a referenced variable.
struct UnsetVar {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("QUILL_TEST_PREFIX", "/news");
        }
        let result = expand_env("${QUILL_TEST_PREFIX}", "links.posts_prefix").unwrap();
        assert_eq!(result, "/news");
        unsafe {
            std::env::remove_var("QUILL_TEST_PREFIX");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::remove_var("QUILL_TEST_UNSET");
        }
        let result = expand_env("${QUILL_TEST_UNSET:-/blog}", "links.posts_prefix").unwrap();
        assert_eq!(result, "/blog");
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("QUILL_TEST_HOST", "cms.example.com");
        }
        let result = expand_env("https://${QUILL_TEST_HOST}/api", "api.base_url").unwrap();
        assert_eq!(result, "https://cms.example.com/api");
        unsafe {
            std::env::remove_var("QUILL_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::remove_var("QUILL_TEST_MISSING");
        }
        let err = expand_env("${QUILL_TEST_MISSING}", "api.base_url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("QUILL_TEST_MISSING"));
        assert!(msg.contains("api.base_url"));
    }

    #[test]
    fn test_bare_dollar_unchanged() {
        assert_eq!(expand_env("/$prefix", "links.pages_prefix").unwrap(), "/$prefix");
        assert_eq!(expand_env("", "links.pages_prefix").unwrap(), "");
    }

    #[test]
    fn test_bare_dollar_kept_next_to_var() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("QUILL_TEST_API_HOST", "cms.example.com");
        }
        let result =
            expand_env("https://${QUILL_TEST_API_HOST}/api?x=$ref", "api.base_url").unwrap();
        assert_eq!(result, "https://cms.example.com/api?x=$ref");
        unsafe {
            std::env::remove_var("QUILL_TEST_API_HOST");
        }
    }

    #[test]
    fn test_unterminated_reference_unchanged() {
        assert_eq!(expand_env("/${oops", "links.posts_prefix").unwrap(), "/${oops");
    }
}
