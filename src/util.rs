pub(crate) fn urljoin(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Keeps only the last four characters of a secret.
pub(crate) fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

pub(crate) fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    if (s.starts_with('"') && s.ends_with('"') && s.len() >= 2)
        || (s.starts_with('\'') && s.ends_with('\'') && s.len() >= 2)
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths() {
        let base = "https://developer.nps.gov/api/v1";
        assert_eq!(urljoin(base, "/parks"), "https://developer.nps.gov/api/v1/parks");
        assert_eq!(
            urljoin("https://developer.nps.gov/api/v1/", "topics/parks"),
            "https://developer.nps.gov/api/v1/topics/parks"
        );
        assert_eq!(urljoin(base, "http://mirror/parks"), "http://mirror/parks");
    }

    #[test]
    fn redacts_keys() {
        assert_eq!(redact("abcdefgh1234"), "****1234");
        assert_eq!(redact("abc"), "****");
    }

    #[test]
    fn strips_quotes() {
        assert_eq!(strip_quotes("\"value\""), "value");
        assert_eq!(strip_quotes(" 'value' "), "value");
        assert_eq!(strip_quotes("\""), "\"");
    }
}
