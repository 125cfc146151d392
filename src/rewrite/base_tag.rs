//! `<base>` injection: the backstop for references the targeted passes miss.

/// Byte offset just past the first opening `<head ...>` tag.
fn head_tag_end(html: &str) -> Option<usize> {
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let lower = html.to_ascii_lowercase();
    let mut from = 0;
    while let Some(rel) = lower[from..].find("<head") {
        let name_end = from + rel + "<head".len();
        match lower[name_end..].chars().next() {
            Some('>') => return Some(name_end + 1),
            Some(c) if c.is_ascii_whitespace() || c == '/' => {
                return lower[name_end..].find('>').map(|i| name_end + i + 1);
            }
            // `<header>` and friends.
            _ => from = name_end,
        }
    }
    None
}

/// Insert `<base href=".." target="_top">` right after `<head>`.
///
/// No-op when the document already has a `<base ` tag or has no head to
/// anchor to.
pub fn inject_base_tag(html: &str, base_url: &str) -> String {
    if html.contains("<base ") {
        return html.to_string();
    }
    let Some(end) = head_tag_end(html) else {
        return html.to_string();
    };

    let tag = format!(r#"<base href="{base_url}" target="_top">"#);
    let mut out = String::with_capacity(html.len() + tag.len());
    out.push_str(&html[..end]);
    out.push_str(&tag);
    out.push_str(&html[end..]);
    out
}
