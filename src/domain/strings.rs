//! String helpers for option names

/// Converts a camelCase or snake_case name to its flag form
///
/// `myOption` becomes `my-option`, `dry_run` becomes `dry-run`.
pub fn dasherize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for c in name.chars() {
        if c.is_uppercase() {
            if prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else if c == '_' || c == ' ' {
            out.push('-');
        } else {
            out.push(c);
        }
        prev = Some(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn camel_case() {
        assert_eq!(dasherize("myOption"), "my-option");
        assert_eq!(dasherize("dryRun"), "dry-run");
        assert_eq!(dasherize("skipInstallStep"), "skip-install-step");
    }

    #[test]
    fn leading_capital() {
        assert_eq!(dasherize("Zebra"), "zebra");
    }

    #[test]
    fn acronyms_stay_together() {
        assert_eq!(dasherize("baseURL"), "base-url");
    }

    #[test]
    fn digits_before_capitals() {
        assert_eq!(dasherize("es5Browser"), "es5-browser");
    }

    #[test]
    fn underscores_and_spaces() {
        assert_eq!(dasherize("dry_run"), "dry-run");
        assert_eq!(dasherize("two words"), "two-words");
    }

    #[test]
    fn already_dashed() {
        assert_eq!(dasherize("help-json"), "help-json");
    }

    proptest! {
        #[test]
        fn output_has_no_uppercase(name in "[a-zA-Z0-9_]{0,24}") {
            let dashed = dasherize(&name);
            prop_assert!(!dashed.chars().any(|c| c.is_uppercase()));
        }

        #[test]
        fn idempotent(name in "[a-zA-Z0-9_]{0,24}") {
            let once = dasherize(&name);
            prop_assert_eq!(dasherize(&once), once.clone());
        }

        #[test]
        fn lowercase_names_unchanged(name in "[a-z0-9-]{0,24}") {
            prop_assert_eq!(dasherize(&name), name);
        }
    }
}
