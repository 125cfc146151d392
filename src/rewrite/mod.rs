//! HTML rewriting subsystem.
//!
//! # Data Flow
//! ```text
//! upstream HTML + base URL
//!     → attributes.rs   href="//" / src="//" → https://
//!     → attributes.rs   href="..."   → /api/proxy?url=...
//!     → attributes.rs   src="..."    → /api/proxy?url=...
//!     → attributes.rs   action="..." → /api/proxy?url=...
//!     → css.rs          background-image: url(...) → /api/proxy?url=...
//!     → base_tag.rs     <base href=base target=_top> after <head>
//!     → rewritten HTML
//! ```
//!
//! # Design Decisions
//! - Attribute-level text substitution, not a DOM rewrite
//! - Passes run in a fixed order; none re-rewrites another's output
//! - The injected `<base>` covers references the passes did not match
//! - Script-constructed URLs are not touched

pub mod attributes;
pub mod base_tag;
pub mod css;

use url::Url;

use crate::upstream::target::NormalizedUrl;

/// Path of the rewriting proxy route.
pub const PROXY_ENDPOINT: &str = "/api/proxy";

/// Per-document rewrite state.
#[derive(Debug, Clone)]
pub struct RewriteContext {
    base_url: NormalizedUrl,
}

impl RewriteContext {
    pub fn new(base_url: NormalizedUrl) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> &NormalizedUrl {
        &self.base_url
    }
}

/// Build the proxy reference for an absolute target.
pub fn proxy_url(target: &Url) -> String {
    format!("{}?url={}", PROXY_ENDPOINT, urlencoding::encode(target.as_str()))
}

/// Rewrite a document so its references route back through the proxy.
pub fn rewrite_html(html: &str, ctx: &RewriteContext) -> String {
    let base = ctx.base_url.as_url();

    let html = attributes::upgrade_protocol_relative(html);
    let html = attributes::rewrite_attribute(&html, &attributes::HREF, base);
    let html = attributes::rewrite_attribute(&html, &attributes::SRC, base);
    let html = attributes::rewrite_attribute(&html, &attributes::ACTION, base);
    let html = css::rewrite_background_images(&html, base);
    base_tag::inject_base_tag(&html, ctx.base_url.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(base: &str) -> RewriteContext {
        RewriteContext::new(NormalizedUrl::parse(base).unwrap())
    }

    #[test]
    fn about_link_round_trips() {
        let out = rewrite_html(r#"<a href="/about">About</a>"#, &ctx("https://site.com/"));
        assert_eq!(out, r#"<a href="/api/proxy?url=https%3A%2F%2Fsite.com%2Fabout">About</a>"#);

        let encoded = "https%3A%2F%2Fsite.com%2Fabout";
        assert_eq!(urlencoding::decode(encoded).unwrap(), "https://site.com/about");
    }

    #[test]
    fn absolute_and_non_fetchable_hrefs_are_byte_identical() {
        let html = concat!(
            r#"<a href="https://other.com/x">"#,
            r#"<a href="mailto:a@b.com">"#,
            r##"<a href="#top">"##,
            r#"<a href="javascript:void(0)">"#,
        );
        assert_eq!(rewrite_html(html, &ctx("https://site.com/")), html);
    }

    #[test]
    fn full_document() {
        let html = concat!(
            "<html><head><title>t</title></head><body>",
            r#"<a href="/x">y</a>"#,
            r#"<img src="img/logo.png">"#,
            r#"<script src="//cdn.com/lib.js"></script>"#,
            r#"<form method="post" action="search">"#,
            r#"<div style="background-image: url('bg.jpg')"></div>"#,
            "</body></html>",
        );
        let out = rewrite_html(html, &ctx("example.com/docs/"));

        assert!(out.starts_with(
            r#"<html><head><base href="https://example.com/docs/" target="_top"><title>"#
        ));
        assert!(out.contains(r#"href="/api/proxy?url=https%3A%2F%2Fexample.com%2Fx""#));
        assert!(out.contains(r#"src="/api/proxy?url=https%3A%2F%2Fexample.com%2Fdocs%2Fimg%2Flogo.png""#));
        assert!(out.contains(r#"<script src="https://cdn.com/lib.js">"#));
        assert!(out.contains(
            r#"<form method="post" action="/api/proxy?url=https%3A%2F%2Fexample.com%2Fdocs%2Fsearch">"#
        ));
        assert!(out.contains(
            "background-image: url(/api/proxy?url=https%3A%2F%2Fexample.com%2Fdocs%2Fbg.jpg)"
        ));
    }

    #[test]
    fn protocol_relative_links_are_not_proxied() {
        let out = rewrite_html(r#"<a href="//cdn.com/page">"#, &ctx("https://site.com/"));
        assert_eq!(out, r#"<a href="https://cdn.com/page">"#);
    }

    #[test]
    fn headless_document_gets_no_base() {
        let out = rewrite_html(r#"<p><a href="/x">x</a></p>"#, &ctx("https://site.com/"));
        assert!(!out.contains("<base"));
    }

    #[test]
    fn query_characters_are_encoded() {
        let out = rewrite_html(r#"<a href="/s?q=a b&amp;p=2">"#, &ctx("https://site.com/"));
        assert_eq!(
            out,
            r#"<a href="/api/proxy?url=https%3A%2F%2Fsite.com%2Fs%3Fq%3Da%2520b%26amp%3Bp%3D2">"#
        );
    }
}
