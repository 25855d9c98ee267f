use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Environment variables that override the fixture, named after the
/// engine test-suite options they mirror
pub const URL_VAR: &str = "HGE_URL";
pub const ADMIN_SECRET_VAR: &str = "HGE_KEY";
pub const WEBHOOK_VAR: &str = "HGE_WEBHOOK";
pub const JWT_CONF_VAR: &str = "HGE_JWT_CONF";

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `{{ env.NAME }}` or `{{ env.NAME | default("value") }}`
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

/// Expand `{{ env.VAR }}` placeholders in raw TOML text
///
/// Comment lines are copied verbatim so commented-out secrets never need
/// to be set.
pub fn expand_env(input: &str) -> Result<String, String> {
    let lines = input
        .lines()
        .map(expand_line)
        .collect::<Result<Vec<_>, _>>()?;

    let mut output = lines.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn expand_line(line: &str) -> Result<String, String> {
    if line.trim_start().starts_with('#') {
        return Ok(line.to_owned());
    }

    let mut error = None;
    let expanded = placeholder().replace_all(line, |caps: &Captures<'_>| {
        resolve(caps).unwrap_or_else(|e| {
            error.get_or_insert(e);
            String::new()
        })
    });

    match error {
        Some(e) => Err(e),
        None => Ok(expanded.into_owned()),
    }
}

fn resolve(caps: &Captures<'_>) -> Result<String, String> {
    let key = &caps[1];
    let Some(name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    match (std::env::var(name), caps.get(2)) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.as_str().to_owned()),
        (Err(_), None) => Err(format!("environment variable not found: `{name}`")),
    }
}

/// Read a non-empty override variable
pub fn override_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
