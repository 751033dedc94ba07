/// Extracts the text of the first `<title>` element, with whitespace
/// collapsed and the common HTML entities decoded. Returns `None` when the
/// document has no non-empty title.
pub fn extract_title(html: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let lower = html.to_ascii_lowercase();

    let mut search_from = 0;
    let open = loop {
        let idx = search_from + lower[search_from..].find("<title")?;
        // Skip look-alikes such as `<titlebar>`.
        match lower.as_bytes().get(idx + "<title".len()) {
            Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b'/') => {
                break idx
            }
            _ => search_from = idx + 1,
        }
    };
    let content_start = open + lower[open..].find('>')? + 1;
    let content_end = content_start + lower[content_start..].find("</title")?;

    let collapsed = html[content_start..content_end]
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let title = decode_entities(&collapsed);
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_title() {
        let html = "<html><head><title>Example Domain</title></head></html>";
        assert_eq!(extract_title(html), Some("Example Domain".to_string()));
    }

    #[test]
    fn test_attributes_case_and_whitespace() {
        let html = "<HEAD><TITLE lang=\"en\">\n   Rust   &amp; Cargo\n</TITLE></HEAD>";
        assert_eq!(extract_title(html), Some("Rust & Cargo".to_string()));
    }

    #[test]
    fn test_skips_lookalike_tags() {
        let html = "<titlebar>nope</titlebar><title>Real</title>";
        assert_eq!(extract_title(html), Some("Real".to_string()));
    }

    #[test]
    fn test_missing_or_empty_title() {
        assert_eq!(extract_title("<html><body>hi</body></html>"), None);
        assert_eq!(extract_title("<title>   </title>"), None);
        assert_eq!(extract_title("<title>unterminated"), None);
    }

    #[test]
    fn test_non_ascii_title() {
        let html = "<title>Überblick - Café</title>";
        assert_eq!(extract_title(html), Some("Überblick - Café".to_string()));
    }
}
