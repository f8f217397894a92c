//! `<VAR=name>` placeholder resolution

use crate::error::VariableError;
use crate::rules::Variables;

const TOKEN_OPEN: &str = "<VAR=";

/// Replaces every `<VAR=name>` token whose name is declared in `variables`
///
/// Tokens naming an undeclared variable are left verbatim. Substitution is a
/// single pass, so a value that itself contains a token is not expanded again.
/// Names may contain `>`; when several names fit at the same position the
/// longest one wins.
///
/// # Errors
///
/// Returns `VariableError::Invalid` when no variables map is supplied, even if
/// the template holds no token at all.
pub fn substitute_variables(
    template: &str,
    variables: Option<&Variables>,
) -> Result<String, VariableError> {
    let variables = variables.ok_or(VariableError::Invalid)?;

    if variables.is_empty() {
        return Ok(template.to_string());
    }

    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(TOKEN_OPEN) {
        output.push_str(&rest[..start]);
        let candidate = &rest[start + TOKEN_OPEN.len()..];

        let declared = variables
            .iter()
            .filter(|(name, _)| {
                candidate
                    .strip_prefix(name.as_str())
                    .is_some_and(|after| after.starts_with('>'))
            })
            .max_by_key(|(name, _)| name.len());

        match declared {
            Some((name, value)) => {
                output.push_str(value);
                rest = &candidate[name.len() + 1..];
            }
            None => {
                output.push_str(TOKEN_OPEN);
                rest = candidate;
            }
        }
    }

    output.push_str(rest);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Variables {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_replaces_single_variable() {
        let variables = vars(&[("name", "world")]);
        assert_eq!(
            substitute_variables("Hello, <VAR=name>!", Some(&variables)).unwrap(),
            "Hello, world!"
        );
    }

    #[test]
    fn test_replaces_multiple_variables() {
        let variables = vars(&[("greeting", "Hi"), ("name", "Alice")]);
        assert_eq!(
            substitute_variables("Hello, <VAR=greeting> <VAR=name>!", Some(&variables)).unwrap(),
            "Hello, Hi Alice!"
        );
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let variables = vars(&[("x", "1")]);
        assert_eq!(
            substitute_variables("<VAR=x>+<VAR=x>=2", Some(&variables)).unwrap(),
            "1+1=2"
        );
    }

    #[test]
    fn test_empty_map_returns_template() {
        assert_eq!(
            substitute_variables("Hello, world!", Some(&Variables::new())).unwrap(),
            "Hello, world!"
        );
    }

    #[test]
    fn test_unknown_tokens_stay_verbatim() {
        let variables = vars(&[("greeting", "Hi")]);
        assert_eq!(
            substitute_variables("Hello, <VAR=name>!", Some(&variables)).unwrap(),
            "Hello, <VAR=name>!"
        );
    }

    #[test]
    fn test_values_are_not_expanded_twice() {
        let variables = vars(&[("a", "<VAR=b>"), ("b", "x")]);
        assert_eq!(
            substitute_variables("<VAR=a>", Some(&variables)).unwrap(),
            "<VAR=b>"
        );
    }

    #[test]
    fn test_missing_map_is_an_error() {
        assert_eq!(
            substitute_variables("Hello, <VAR=name>!", None).unwrap_err(),
            VariableError::Invalid
        );
        assert_eq!(
            substitute_variables("no tokens", None)
                .unwrap_err()
                .to_string(),
            "The variables object is invalid."
        );
    }

    #[test]
    fn test_names_may_contain_angle_brackets() {
        let variables = vars(&[("a>b", "X")]);
        assert_eq!(
            substitute_variables("<VAR=a>b>", Some(&variables)).unwrap(),
            "X"
        );

        // The longer name wins over its prefix
        let variables = vars(&[("a", "1"), ("a>b", "2")]);
        assert_eq!(
            substitute_variables("<VAR=a>b> <VAR=a>", Some(&variables)).unwrap(),
            "2 1"
        );
    }

    #[test]
    fn test_unterminated_token_stays_verbatim() {
        let variables = vars(&[("name", "world")]);
        assert_eq!(
            substitute_variables("<VAR=name <VAR=<VAR=name>", Some(&variables)).unwrap(),
            "<VAR=name <VAR=world"
        );
    }
}
