//! Helper functions available to every theme template.
//!
//! - `safe(html)` marks HTML the engine produced (the converted free
//!   markdown) as already escaped, so it is embedded as markup.
//! - `url(link)` prepares a link for an `href` or `src` attribute. Unlike
//!   plain interpolation it leaves `/` alone, and it replaces script-capable
//!   schemes with `#`.

use minijinja::value::ValueKind;
use minijinja::{Environment, Error, ErrorKind, Value};

/// Schemes that can execute code when followed.
const UNSAFE_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// Registers the helper functions with a MiniJinja environment.
///
/// This is called automatically by [`MiniJinjaEngine::new`](super::MiniJinjaEngine::new).
pub fn register_functions(env: &mut Environment<'static>) {
    env.add_function("safe", safe);
    env.add_function("url", url);
}

fn safe(value: Value) -> Result<Value, Error> {
    match value.kind() {
        ValueKind::None | ValueKind::Undefined => Ok(Value::from_safe_string(String::new())),
        ValueKind::String => Ok(Value::from_safe_string(value.to_string())),
        kind => Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("safe() expects a string, got {kind}"),
        )),
    }
}

fn url(link: &str) -> Value {
    Value::from_safe_string(sanitize_url(link))
}

/// Escapes the characters that could end an attribute value and neutralizes
/// script-capable schemes.
pub(crate) fn sanitize_url(link: &str) -> String {
    let scheme: String = link
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    if UNSAFE_SCHEMES.iter().any(|s| scheme.starts_with(s)) {
        return "#".to_string();
    }

    let mut out = String::with_capacity(link.len());
    for c in link.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}
