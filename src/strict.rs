use std::collections::HashSet;

use anyhow::Context as _;
use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink as _;
use regex::Regex;

/// Elements whose attributes the browser fetches on load.
const AUTOLOAD: [(&str, &str); 9] = [
    ("img", "src"),
    ("img", "srcset"),
    ("source", "src"),
    ("source", "srcset"),
    ("script", "src"),
    ("link", "href"),
    ("iframe", "src"),
    ("audio", "src"),
    ("video", "src"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reference {
    /// Relative to the page, or embedded (`data:`, fragment).
    Local,
    /// Absolute to a web root the exported files may not sit under.
    RootAbsolute,
    Remote,
}

fn classify(target: &str) -> Reference {
    let s = target.trim().trim_matches(|c| c == '"' || c == '\'');
    let lowered = s.to_ascii_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") || s.starts_with("//") {
        Reference::Remote
    } else if s.starts_with('/') {
        Reference::RootAbsolute
    } else {
        Reference::Local
    }
}

/// Fails unless the page and its CSS only load exported files and every
/// in-page anchor resolves.
pub fn assert_static_export(html: &str, css: &str) -> anyhow::Result<()> {
    check_css(css).context("static export check failed")?;
    check_html(html).context("static export check failed")?;
    Ok(())
}

fn check_css(css: &str) -> anyhow::Result<()> {
    if css.to_ascii_lowercase().contains("@import") {
        anyhow::bail!("css still contains an @import");
    }
    let url_re = Regex::new(r"(?i)url\(\s*([^)]*)\)").context("compile url() regex")?;
    for caps in url_re.captures_iter(css) {
        let target = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        match classify(target) {
            Reference::Local => {}
            Reference::RootAbsolute => anyhow::bail!("css url({target}) is root-absolute"),
            Reference::Remote => anyhow::bail!("css url({target}) is remote"),
        }
    }
    Ok(())
}

fn check_html(html: &str) -> anyhow::Result<()> {
    let doc = kuchiki::parse_html().one(html);

    for (tag, attr) in AUTOLOAD {
        for node in select(&doc, &format!("{tag}[{attr}]")) {
            let Some(element) = node.as_element() else { continue };
            let attrs = element.attributes.borrow();
            if tag == "link" && !is_fetched_link(attrs.get("rel")) {
                continue;
            }
            let Some(value) = attrs.get(attr) else { continue };
            // srcset lists candidates separated by commas.
            let candidates: Vec<&str> = if attr == "srcset" {
                value
                    .split(',')
                    .filter_map(|c| c.split_whitespace().next())
                    .collect()
            } else {
                vec![value]
            };
            for candidate in candidates {
                if classify(candidate) != Reference::Local {
                    anyhow::bail!("<{tag} {attr}=\"{value}\"> does not point at an exported file");
                }
            }
        }
    }

    for node in select(&doc, "[style]") {
        if let Some(element) = node.as_element() {
            if let Some(style) = element.attributes.borrow().get("style") {
                check_css(style).context("inline style attribute")?;
            }
        }
    }
    for node in select(&doc, "style") {
        check_css(&node.text_contents()).context("<style> element")?;
    }

    let ids: HashSet<String> = select(&doc, "[id]")
        .into_iter()
        .filter_map(|node| {
            let element = node.as_element()?;
            let id = element.attributes.borrow().get("id")?.to_string();
            Some(id)
        })
        .collect();
    for node in select(&doc, "a[href]") {
        let Some(element) = node.as_element() else { continue };
        let attrs = element.attributes.borrow();
        let Some(fragment) = attrs.get("href").and_then(|h| h.strip_prefix('#')) else {
            continue;
        };
        if !fragment.is_empty() && !ids.contains(fragment) {
            anyhow::bail!("link to missing anchor #{fragment}");
        }
    }

    Ok(())
}

fn select(doc: &NodeRef, selector: &str) -> Vec<NodeRef> {
    match doc.select(selector) {
        Ok(matches) => matches.map(|m| m.as_node().clone()).collect(),
        Err(()) => {
            tracing::warn!(selector, "invalid selector");
            Vec::new()
        }
    }
}

// Canonical and alternate links are metadata the page never fetches.
fn is_fetched_link(rel: Option<&str>) -> bool {
    let Some(rel) = rel else { return true };
    !rel.split_ascii_whitespace()
        .all(|t| t.eq_ignore_ascii_case("canonical") || t.eq_ignore_ascii_case("alternate"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_local_page() {
        let html = r##"<html><head><link rel="stylesheet" href="assets/css/site.css"><link rel="canonical" href="https://example.org/"></head>
<body><a href="#about">Sobre</a><section id="about"></section><img src="assets/img/a.png"><a href="https://wa.me/55">x</a></body></html>"##;
        assert_static_export(html, "body { background: url(\"../img/a.png\"); }").unwrap();
        assert_static_export("", ".x { background: url(data:image/png;base64,AA==); }").unwrap();
    }

    #[test]
    fn rejects_remote_and_root_absolute_loads() {
        assert!(assert_static_export(r#"<img src="https://cdn.example.org/a.png">"#, "").is_err());
        assert!(assert_static_export(r#"<img src="/1.png">"#, "").is_err());
        assert!(assert_static_export(r#"<img srcset="a.png 1x, https://x/b.png 2x">"#, "").is_err());
        assert!(assert_static_export(r#"<script src="//cdn.example.org/x.js"></script>"#, "").is_err());
        assert!(assert_static_export("", "@import url(\"https://fonts.googleapis.com/css\");").is_err());
        assert!(assert_static_export("", ".a { background: url('/bg.png'); }").is_err());
        assert!(assert_static_export("<style>.a{background:url(https://x/y.png)}</style>", "").is_err());
        assert!(assert_static_export(r#"<div style="background: url(//x/y.png)"></div>"#, "").is_err());
    }

    #[test]
    fn rejects_dangling_anchor() {
        let err = assert_static_export(r##"<a href="#impact">x</a>"##, "").unwrap_err();
        assert!(format!("{err:#}").contains("#impact"));
    }
}
