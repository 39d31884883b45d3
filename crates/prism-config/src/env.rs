use std::sync::OnceLock;

use regex::Regex;

/// Placeholder pattern: `{{ env.VAR }}` or `{{ env.VAR | default("x") }}`
fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("must be valid regex")
    })
}

/// Expand `{{ env.VAR }}` placeholders in raw config text
///
/// This runs before TOML parsing so config structs stay plain
/// String/SecretString. A `default("...")` filter supplies a fallback
/// when the variable is unset; without one, an unset variable is an
/// error. TOML comment lines are left untouched so commented-out
/// secrets do not have to resolve.
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut lines = Vec::with_capacity(input.lines().count());

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        lines.push(expand_line(line)?);
    }

    let mut output = lines.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn expand_line(line: &str) -> Result<String, String> {
    let mut result = String::with_capacity(line.len());
    let mut cursor = 0;

    for captures in placeholder_re().captures_iter(line) {
        let span = captures.get(0).expect("capture 0 always present");
        let var_name = &captures[1];
        let fallback = captures.get(2).map(|m| m.as_str());

        result.push_str(&line[cursor..span.start()]);

        match std::env::var(var_name) {
            Ok(value) => result.push_str(&value),
            Err(_) => match fallback {
                Some(value) => result.push_str(value),
                None => return Err(format!("environment variable not found: `{var_name}`")),
            },
        }

        cursor = span.end();
    }

    result.push_str(&line[cursor..]);
    Ok(result)
}
