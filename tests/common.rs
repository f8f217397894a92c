//! Test utilities for regex-rules integration tests
#![allow(dead_code)]

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

/// Builds a JSON rule set with one group from `(description, action, regex, value, active)` tuples
///
/// Regex values are written raw, the way authors write them.
pub fn json_rules(title: &str, actions: &[(&str, &str, &str, &str, bool)]) -> String {
    let actions: Vec<String> = actions
        .iter()
        .map(|(description, action, regex, value, active)| {
            format!(
                r#"{{"description": "{}", "action": "{}", "regex": "{}", "value": "{}", "active": {}}}"#,
                description, action, regex, value, active
            )
        })
        .collect();

    format!(
        r#"{{"groups": [{{"title": "{}", "actions": [{}]}}]}}"#,
        title,
        actions.join(", ")
    )
}

/// The rule set of the "Hello, world!" scenarios
pub fn hello_rules() -> String {
    json_rules("G", &[("d", "replace", "world", "universe", true)])
}
