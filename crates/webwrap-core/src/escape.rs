//! Escaping of user text before it is spliced into a target file.

/// Escape text for use inside a double-quoted XML attribute.
pub fn xml_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for use inside a Java string literal.
pub fn java_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for a double-quoted Gradle string. Both Groovy and Kotlin DSL
/// interpolate `$`, so it is escaped on top of the Java rules.
pub fn gradle_string(value: &str) -> String {
    java_string(value).replace('$', "\\$")
}
