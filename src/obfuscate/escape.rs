//! Escaping for values embedded in generated markup and inline scripts.

/// Encodes `value` as a double-quoted JavaScript string literal that is also
/// inert inside an HTML `<script>` element.
///
/// The literal is JSON, with `<`, `>`, `&`, U+2028 and U+2029 written as
/// `\uXXXX` so that neither `</script>`, `<!--`, `]]>` nor a raw line
/// separator can appear in the output.
pub fn script_string(value: &str) -> String {
    let json = serde_json::Value::String(value.to_owned()).to_string();
    let mut out = String::with_capacity(json.len() + 8);
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            other => out.push(other),
        }
    }
    out
}

/// Escapes text for use in HTML element content and quoted attributes.
pub fn html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}
