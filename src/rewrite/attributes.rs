//! Quoted-attribute rewriting for `href`, `src` and `action`.
//!
//! Only the literal double-quoted form `name="value"` is recognised. The
//! scan is a plain substring search, so `data-src="..."` is caught by the
//! `src` rule as well.

use url::Url;

use super::proxy_url;

/// Which attribute to rewrite and which values to leave alone.
#[derive(Debug, Clone, Copy)]
pub struct AttributeRule {
    pub name: &'static str,
    /// Values starting with any of these are not rewritten.
    pub keep_prefixes: &'static [&'static str],
}

pub const HREF: AttributeRule = AttributeRule {
    name: "href",
    keep_prefixes: &["http:", "https:", "mailto:", "#", "javascript:", "data:"],
};

pub const SRC: AttributeRule = AttributeRule {
    name: "src",
    keep_prefixes: &["http:", "https:", "data:"],
};

pub const ACTION: AttributeRule = AttributeRule {
    name: "action",
    keep_prefixes: &["http:", "https:"],
};

impl AttributeRule {
    fn keeps(&self, value: &str) -> bool {
        self.keep_prefixes.iter().any(|p| value.starts_with(p))
    }
}

/// Turn `href="//host/..."` and `src="//host/..."` into explicit `https://`.
pub fn upgrade_protocol_relative(html: &str) -> String {
    html.replace("href=\"//", "href=\"https://")
        .replace("src=\"//", "src=\"https://")
}

/// Rewrite every matching attribute value to go through the proxy endpoint.
///
/// Values that fail to resolve against `base` are left exactly as written.
pub fn rewrite_attribute(html: &str, rule: &AttributeRule, base: &Url) -> String {
    let needle = format!("{}=\"", rule.name);
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find(&needle) {
        let value_start = pos + needle.len();
        let after = &rest[value_start..];
        let Some(value_len) = after.find('"') else {
            break;
        };
        let value = &after[..value_len];

        if value.is_empty() || rule.keeps(value) {
            out.push_str(&rest[..value_start]);
            rest = after;
            continue;
        }

        out.push_str(&rest[..pos]);
        match base.join(value) {
            Ok(resolved) => {
                out.push_str(&needle);
                out.push_str(&proxy_url(&resolved));
                out.push('"');
            }
            Err(e) => {
                tracing::trace!(attribute = rule.name, value, error = %e, "Leaving unresolvable reference");
                out.push_str(&rest[pos..value_start + value_len + 1]);
            }
        }
        rest = &after[value_len + 1..];
    }

    out.push_str(rest);
    out
}
