//! Plain-text transforms shared by the `combine`, `decode`, and
//! `encode` commands. These operate on raw document text and never
//! need a parse.

use anyhow::Context;

/// Collapses a multi-line query document into a single line:
/// `//` comment lines are dropped, the remaining lines are trimmed
/// and joined with single spaces, and whitespace left in front of the
/// query marker is removed.
pub(crate) fn combine_text(text: &str) -> String {
    let joined = text
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    collapse_space_before_query_marker(&joined)
}

/// Removes the first run of whitespace that directly precedes a `?`.
fn collapse_space_before_query_marker(text: &str) -> String {
    let mut search_from = 0;
    while let Some(found) = text[search_from..].find('?') {
        let marker = search_from + found;
        let before = text[..marker].trim_end();
        if before.len() < marker {
            let mut collapsed = String::with_capacity(text.len());
            collapsed.push_str(before);
            collapsed.push_str(&text[marker..]);
            return collapsed;
        }
        search_from = marker + 1;
    }
    text.to_string()
}

/// Percent-decodes `text`, treating `+` as an encoded space the way
/// address bars serialize form data.
pub(crate) fn decode_text(text: &str) -> anyhow::Result<String> {
    let normalized = text.replace('+', "%20");
    let decoded = urlencoding::decode(&normalized)
        .context("Decoded text is not valid UTF-8.")?;
    Ok(decoded.into_owned())
}

/// Percent-encodes `text` as a single URI component.
pub(crate) fn encode_text(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_joins_trimmed_lines() {
        let combined = combine_text("http://host/svc/Items\n    ?$select=id");
        assert_eq!(combined, "http://host/svc/Items?$select=id");
    }

    #[test]
    fn test_combine_drops_comment_lines() {
        let combined = combine_text(
            "// projection for the report\nhttp://host/svc/Items\n  // wip\n  ?$select=id,name",
        );
        assert_eq!(combined, "http://host/svc/Items?$select=id,name");
    }

    #[test]
    fn test_combine_keeps_inner_spacing() {
        let combined = combine_text("http://h/s?$filter=name eq 'x'");
        assert_eq!(combined, "http://h/s?$filter=name eq 'x'");
    }

    #[test]
    fn test_combine_without_marker_is_a_plain_join() {
        assert_eq!(combine_text("a\n  b\nc"), "a b c");
    }

    #[test]
    fn test_decode_handles_percent_escapes_and_plus() {
        let decoded = decode_text("http://h/s?$filter=name+eq+%27x%27").unwrap();
        assert_eq!(decoded, "http://h/s?$filter=name eq 'x'");
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert!(decode_text("%FF%FE").is_err());
    }

    #[test]
    fn test_encode_escapes_reserved_characters() {
        assert_eq!(encode_text("name eq 'x' & more"), "name%20eq%20%27x%27%20%26%20more");
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let original = "http://h/s?$select=id,name&$filter=a eq 'b'";
        let decoded = decode_text(&encode_text(original)).unwrap();
        assert_eq!(decoded, original);
    }
}
