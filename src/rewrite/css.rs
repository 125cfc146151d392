//! Inline `background-image: url(...)` rewriting.

use url::Url;

use super::proxy_url;

const DECLARATION: &str = "background-image:";

/// The `url(...)` argument following a declaration.
struct UrlArgument<'a> {
    value: &'a str,
    /// Bytes consumed after the declaration, through the closing `)`.
    consumed: usize,
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Parse `\s*url(["']?value["']?)` at the start of `s`.
fn parse_url_argument(s: &str) -> Option<UrlArgument<'_>> {
    let trimmed = s.trim_start();
    let mut consumed = s.len() - trimmed.len();

    let mut tail = trimmed.strip_prefix("url(")?;
    consumed += "url(".len();
    if let Some(t) = tail.strip_prefix(is_quote) {
        tail = t;
        consumed += 1;
    }

    let value_len = tail
        .find(|c: char| is_quote(c) || c == ')' || c.is_whitespace())
        .unwrap_or(tail.len());
    if value_len == 0 {
        return None;
    }
    let value = &tail[..value_len];
    consumed += value_len;
    tail = &tail[value_len..];

    if let Some(t) = tail.strip_prefix(is_quote) {
        tail = t;
        consumed += 1;
    }
    tail.strip_prefix(')')?;
    consumed += 1;

    Some(UrlArgument { value, consumed })
}

fn keeps(value: &str) -> bool {
    ["http:", "https:", "data:"].iter().any(|p| value.starts_with(p))
}

/// Point relative `background-image` URLs at the proxy endpoint.
///
/// The rewritten declaration is normalised to `background-image: url(...)`
/// with the argument unquoted.
pub fn rewrite_background_images(html: &str, base: &Url) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find(DECLARATION) {
        let after = &rest[pos + DECLARATION.len()..];
        let argument = match parse_url_argument(after) {
            Some(arg) if !keeps(arg.value) => arg,
            _ => {
                out.push_str(&rest[..pos + DECLARATION.len()]);
                rest = after;
                continue;
            }
        };

        out.push_str(&rest[..pos]);
        let cleaned: String = argument.value.chars().filter(|c| !is_quote(*c)).collect();
        match base.join(&cleaned) {
            Ok(resolved) => {
                out.push_str("background-image: url(");
                out.push_str(&proxy_url(&resolved));
                out.push(')');
            }
            Err(_) => out.push_str(&rest[pos..pos + DECLARATION.len() + argument.consumed]),
        }
        rest = &after[argument.consumed..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://site.com/css/").unwrap()
    }

    #[test]
    fn quoted_and_unquoted_arguments() {
        let expected = "background-image: url(/api/proxy?url=https%3A%2F%2Fsite.com%2Fimg%2Fbg.png)";
        for html in [
            "background-image: url(/img/bg.png)",
            "background-image:url('/img/bg.png')",
            "background-image:   url(\"/img/bg.png\")",
        ] {
            assert_eq!(rewrite_background_images(html, &base()), expected, "input: {html}");
        }
    }

    #[test]
    fn relative_path_uses_document_directory() {
        let out = rewrite_background_images(r#"<div style="background-image: url(hero.jpg);">"#, &base());
        assert_eq!(
            out,
            r#"<div style="background-image: url(/api/proxy?url=https%3A%2F%2Fsite.com%2Fcss%2Fhero.jpg);">"#
        );
    }

    #[test]
    fn absolute_and_inline_payloads_untouched() {
        for html in [
            "background-image: url(https://cdn.com/a.png)",
            "background-image: url('http://cdn.com/a.png')",
            "background-image: url(data:image/gif;base64,R0lGOD)",
        ] {
            assert_eq!(rewrite_background_images(html, &base()), html);
        }
    }

    #[test]
    fn malformed_declarations_untouched() {
        for html in [
            "background-image: none",
            "background-image: url()",
            "background-image: url(/a.png",
            "background-image: url(/a b.png)",
            "background: url(/a.png)",
        ] {
            assert_eq!(rewrite_background_images(html, &base()), html);
        }
    }

    #[test]
    fn multiple_declarations() {
        let html = "a{background-image: url(/1.png)} b{background-image: url(/2.png)}";
        let out = rewrite_background_images(html, &base());
        assert!(out.contains("url(/api/proxy?url=https%3A%2F%2Fsite.com%2F1.png)"));
        assert!(out.contains("url(/api/proxy?url=https%3A%2F%2Fsite.com%2F2.png)"));
    }
}
