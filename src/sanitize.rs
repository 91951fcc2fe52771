/// Escapes the HTML-significant characters `& < > " ' /` as entities.
///
/// Single pass only: already-escaped text gets escaped again (`&amp;` becomes
/// `&amp;amp;`). Empty and absent input both give an empty string.
pub fn sanitize<'a>(input: impl Into<Option<&'a str>>) -> String {
    let Some(input) = input.into() else {
        return String::new();
    };

    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_ampersand() {
        assert_eq!(sanitize("A & B"), "A &amp; B");
    }

    #[test]
    fn empty_and_absent_are_empty() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize(None::<&str>), "");
    }

    #[test]
    fn script_tag_is_neutralised() {
        let out = sanitize("<script>alert('x\"1\"')</script>");
        for c in ['<', '>', '"', '\'', '/'] {
            assert!(!out.contains(c), "{c} survived in {out}");
        }
        // every ampersand left is the start of an entity we wrote
        for (i, _) in out.match_indices('&') {
            let rest = &out[i..];
            assert!(
                ["&amp;", "&lt;", "&gt;", "&quot;", "&#x27;", "&#x2F;"]
                    .iter()
                    .any(|e| rest.starts_with(e)),
                "bare ampersand at {i} in {out}"
            );
        }
    }

    #[test]
    fn all_six_entities() {
        assert_eq!(
            sanitize(r#"&<>"'/"#),
            "&amp;&lt;&gt;&quot;&#x27;&#x2F;"
        );
    }

    #[test]
    fn not_idempotent() {
        let once = sanitize("&");
        assert_eq!(sanitize(once.as_str()), "&amp;amp;");
    }

    #[test]
    fn leaves_unicode_alone() {
        assert_eq!(sanitize("héllo wörld ✓"), "héllo wörld ✓");
    }
}
