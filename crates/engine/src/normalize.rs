/// Canonicalize a raw field value into a comparable key.
///
/// Trims surrounding whitespace, lowercases, then drops every character
/// outside `[a-z0-9@]`. Absent input yields the empty string, which callers
/// treat as "no value".
pub fn normalize(value: Option<&str>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '@'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_is_empty() {
        assert_eq!(normalize(None), "");
    }

    #[test]
    fn email_casing_and_spaces() {
        assert_eq!(normalize(Some("  John.Doe@Example.COM ")), "johndoe@examplecom");
    }

    #[test]
    fn phone_punctuation() {
        assert_eq!(normalize(Some("(555) 123-4567")), "5551234567");
        assert_eq!(normalize(Some("555-1234")), normalize(Some("5551234")));
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(normalize(Some(" \t ")), "");
        assert_eq!(normalize(Some("---")), "");
    }

    #[test]
    fn non_ascii_letters_dropped() {
        // 'É' lowercases to 'é', which is outside [a-z]
        assert_eq!(normalize(Some("Éva@x.com")), "va@xcom");
    }

    #[test]
    fn idempotent_on_samples() {
        for raw in ["A@x.com", " +1 (555) 000 ", "", "ÇA_va", "@@"] {
            let once = normalize(Some(raw));
            assert_eq!(normalize(Some(once.as_str())), once);
        }
    }
}
