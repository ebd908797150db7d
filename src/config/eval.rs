use std::env::VarError;
use crate::config::error::EvaluationError;

/// Expands `${KEY}` and `${KEY:-default}` from the process environment.
pub fn expand(input: &str) -> Result<String, EvaluationError> {
    expand_with(input, |key| std::env::var(key))
}

pub fn expand_with(
    input: &str,
    lookup: impl Fn(&str) -> Result<String, VarError>,
) -> Result<String, EvaluationError> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find('}')
            .ok_or_else(|| EvaluationError::Unterminated { input: input.to_owned() })?;

        let body = &after[..end];
        let (key, default) = match body.split_once(":-") {
            Some((key, default)) => (key, Some(default)),
            None => (body, None),
        };
        if key.is_empty() {
            return Err(EvaluationError::EmptyName { input: input.to_owned() });
        }

        match (lookup(key), default) {
            (Ok(value), _) => out.push_str(&value),
            (Err(VarError::NotPresent), Some(default)) => out.push_str(default),
            (Err(VarError::NotPresent), None) => {
                return Err(EvaluationError::MissingVariable { key: key.to_owned() });
            }
            (Err(VarError::NotUnicode(_)), _) => {
                return Err(EvaluationError::InvalidVariable { key: key.to_owned() });
            }
        }

        rest = &after[end + 1..];
    }
    out.push_str(rest);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(key: &str) -> Result<String, VarError> {
        match key {
            "DATABASE_URL" => Ok("postgres://localhost/app".to_owned()),
            _ => Err(VarError::NotPresent),
        }
    }

    #[test]
    fn plain_strings_pass_through() {
        assert_eq!(expand_with("app.db", env).unwrap(), "app.db");
        assert_eq!(expand_with("cost: $5", env).unwrap(), "cost: $5");
    }

    #[test]
    fn variables_are_substituted() {
        assert_eq!(expand_with("${DATABASE_URL}", env).unwrap(), "postgres://localhost/app");
        assert_eq!(
            expand_with("${DATABASE_URL}?sslmode=disable", env).unwrap(),
            "postgres://localhost/app?sslmode=disable",
        );
    }

    #[test]
    fn defaults_apply_only_when_unset() {
        assert_eq!(expand_with("${MISSING:-sqlite}", env).unwrap(), "sqlite");
        assert_eq!(expand_with("${DATABASE_URL:-x}", env).unwrap(), "postgres://localhost/app");
    }

    #[test]
    fn missing_and_malformed_variables_fail() {
        assert_eq!(
            expand_with("${MISSING}", env),
            Err(EvaluationError::MissingVariable { key: "MISSING".to_owned() }),
        );
        assert!(matches!(expand_with("${OPEN", env), Err(EvaluationError::Unterminated { .. })));
        assert!(matches!(expand_with("${}", env), Err(EvaluationError::EmptyName { .. })));
    }
}
