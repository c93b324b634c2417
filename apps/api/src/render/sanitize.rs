//! LaTeX escaping for model output.
//!
//! Every string leaf of the generated content passes through [`escape_latex`] before it
//! reaches a template. Backslash is not in the escape set. A special character behind an
//! odd run of backslashes is already escaped and is copied as-is, so escaping twice equals
//! escaping once. Behind an even run (`\\%`) it is bare and gets escaped.

use serde_json::Value;

const TILDE: &str = r"\textasciitilde{}";
const CARET: &str = r"\textasciicircum{}";

fn replacement(c: char) -> Option<&'static str> {
    match c {
        '%' => Some(r"\%"),
        '$' => Some(r"\$"),
        '#' => Some(r"\#"),
        '_' => Some(r"\_"),
        '&' => Some(r"\&"),
        '{' => Some(r"\{"),
        '}' => Some(r"\}"),
        '~' => Some(TILDE),
        '^' => Some(CARET),
        _ => None,
    }
}

/// Escapes the nine LaTeX-significant characters `% $ # _ & { } ~ ^`.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut rest = text;
    // Length of the backslash run just copied. Odd means the next character is escaped;
    // even means the backslashes pair up as `\\` line breaks.
    let mut backslashes = 0usize;

    while let Some(c) = rest.chars().next() {
        if c == '\\' && backslashes % 2 == 0 {
            if let Some(word) = [TILDE, CARET].into_iter().find(|w| rest.starts_with(w)) {
                out.push_str(word);
                rest = &rest[word.len()..];
                backslashes = 0;
                continue;
            }
        }

        let escaped = backslashes % 2 == 1;
        backslashes = if c == '\\' { backslashes + 1 } else { 0 };

        match replacement(c) {
            Some(replaced) if !escaped => out.push_str(replaced),
            _ => out.push(c),
        }
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Escapes every string leaf of a JSON tree. Keys, numbers, booleans and null pass through.
pub fn sanitize_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(escape_latex(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize_value).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, sanitize_value(value)))
                .collect(),
        ),
        other => other,
    }
}
