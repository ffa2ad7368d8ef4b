use tracing::debug;

/// Resolve a credential value. If the value starts with '$', treat it as an
/// environment variable reference and resolve from the environment.
pub fn resolve_credential(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved credential from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set, using literal");
                value.to_string()
            }
        }
    } else {
        value.to_string()
    }
}

/// Replace every occurrence of the given secrets with [REDACTED]. Secrets
/// shorter than four characters are left alone.
pub fn redact_credentials(text: &str, secrets: &[&str]) -> String {
    let mut result = text.to_string();
    for secret in secrets {
        if secret.len() >= 4 {
            result = result.replace(secret, "[REDACTED]");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_credential_literal() {
        assert_eq!(resolve_credential("sk-literal"), "sk-literal");
    }

    #[test]
    fn test_resolve_credential_env_var() {
        std::env::set_var("TEST_PDFQUIZ_KEY", "sk-from-env");
        assert_eq!(resolve_credential("$TEST_PDFQUIZ_KEY"), "sk-from-env");
        std::env::remove_var("TEST_PDFQUIZ_KEY");
    }

    #[test]
    fn test_resolve_credential_missing_env_var() {
        assert_eq!(resolve_credential("$NONEXISTENT_PDFQUIZ_VAR"), "$NONEXISTENT_PDFQUIZ_VAR");
    }

    #[test]
    fn test_redact_credentials() {
        let text = "request failed for key sk-abcdef with id ab";
        let redacted = redact_credentials(text, &["sk-abcdef", "ab"]);
        assert_eq!(redacted, "request failed for key [REDACTED] with id ab");
    }
}
