/// Derives a display name from the local part of an email address.
///
/// Non-alphanumeric characters become word breaks, and every word is
/// capitalized: `jane.doe123@x.com` becomes `Jane Doe123`. Returns an empty
/// string when the local part has no ASCII letters or digits.
pub fn derive_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or("");

    let cleaned: String = local
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();

    cleaned
        .trim()
        .split(|c: char| c.is_whitespace() || c == '.' || c == '_')
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
