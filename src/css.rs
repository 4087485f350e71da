use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use regex::Regex;

use crate::assets::{AssetRequest, AssetStore, OutputMode, guess_kind};

/// Appends each local stylesheet (with its local `@import`s inlined) to `base`.
pub async fn bundle_css(base: &str, css_files: &[PathBuf], store: &AssetStore) -> anyhow::Result<String> {
    let mut visited = HashSet::<PathBuf>::new();
    let mut bundled = String::with_capacity(base.len());
    bundled.push_str(base);

    for path in css_files {
        let css = load_css_recursive(path.clone(), store, &mut visited)
            .await
            .with_context(|| format!("process css {}", path.display()))?;
        bundled.push('\n');
        bundled.push_str(&css);
        bundled.push('\n');
    }

    Ok(bundled)
}

#[async_recursion::async_recursion]
async fn load_css_recursive(
    path: PathBuf,
    store: &AssetStore,
    visited: &mut HashSet<PathBuf>,
) -> anyhow::Result<String> {
    let key = std::fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
    if !visited.insert(key) {
        return Ok(String::new());
    }

    let css = std::fs::read_to_string(&path).with_context(|| format!("read css {}", path.display()))?;
    inline_imports_and_rewrite_urls(&path, store, visited, &css).await
}

async fn inline_imports_and_rewrite_urls(
    origin: &Path,
    store: &AssetStore,
    visited: &mut HashSet<PathBuf>,
    css: &str,
) -> anyhow::Result<String> {
    let import_re = Regex::new(
        r#"@import\s+(?:url\(\s*)?(?:(?:"(?P<u_d>[^"]+)"|'(?P<u_s>[^']+)'|(?P<u2>[^);]+)))\s*\)?\s*(?P<media>[^;]*)\s*;"#,
    )
    .context("compile @import regex")?;

    let mut out = String::with_capacity(css.len());
    let mut last = 0usize;
    for caps in import_re.captures_iter(css) {
        let Some(m) = caps.get(0) else { continue };
        out.push_str(&rewrite_css_urls(origin, store, &css[last..m.start()]).await?);

        let url_raw = caps
            .name("u_d")
            .or_else(|| caps.name("u_s"))
            .or_else(|| caps.name("u2"))
            .map(|m| m.as_str().trim())
            .unwrap_or_default();
        let media = caps.name("media").map(|m| m.as_str().trim()).unwrap_or("");

        if is_remote(url_raw) {
            // Left in place; the export check rejects it with a clear message.
            tracing::warn!(import = url_raw, "remote @import kept as-is");
            out.push_str(m.as_str());
            last = m.end();
            continue;
        }

        let imported = resolve_local(origin, url_raw);
        let imported_css = load_css_recursive(imported, store, visited)
            .await
            .with_context(|| format!("resolve @import {}", url_raw))?;

        if media.is_empty() {
            out.push_str(&imported_css);
        } else {
            out.push_str("@media ");
            out.push_str(media);
            out.push_str(" {");
            out.push_str(&imported_css);
            out.push_str("}\n");
        }

        last = m.end();
    }

    out.push_str(&rewrite_css_urls(origin, store, &css[last..]).await?);
    Ok(out)
}

async fn rewrite_css_urls(origin: &Path, store: &AssetStore, css: &str) -> anyhow::Result<String> {
    let url_re = Regex::new(r#"url\(\s*(?:(?:"(?P<u_d>[^"]+)"|'(?P<u_s>[^']+)'|(?P<u2>[^)]+)))\s*\)"#)
        .context("compile url() regex")?;

    let mut out = String::with_capacity(css.len());
    let mut last = 0usize;
    for caps in url_re.captures_iter(css) {
        let Some(m) = caps.get(0) else { continue };
        out.push_str(&css[last..m.start()]);

        let url_raw = caps
            .name("u_d")
            .or_else(|| caps.name("u_s"))
            .or_else(|| caps.name("u2"))
            .map(|m| m.as_str().trim().trim_matches('"').trim_matches('\''))
            .unwrap_or_default();

        if is_non_fetchable_url(url_raw) || is_remote(url_raw) {
            out.push_str(m.as_str());
            last = m.end();
            continue;
        }

        let path = resolve_local(origin, url_raw);
        let kind = guess_kind(&path);
        let replacement = store
            .get(AssetRequest { kind, path })
            .await
            .with_context(|| format!("bundle css asset {}", url_raw))?;

        let replacement = if store.output_mode() == OutputMode::Dir {
            relativize_for_bundled_css(&replacement, store.assets_dir_name())
        } else {
            replacement
        };

        out.push_str("url(\"");
        out.push_str(&replacement.replace('"', "\\\""));
        out.push_str("\")");

        last = m.end();
    }

    out.push_str(&css[last..]);
    Ok(out)
}

fn resolve_local(origin: &Path, raw: &str) -> PathBuf {
    let raw = raw.split(['?', '#']).next().unwrap_or(raw);
    let base = origin.parent().unwrap_or(Path::new("."));
    base.join(raw)
}

fn is_remote(url: &str) -> bool {
    let u = url.trim().to_ascii_lowercase();
    u.starts_with("http://") || u.starts_with("https://") || u.starts_with("//")
}

fn is_non_fetchable_url(url: &str) -> bool {
    let u = url.trim();
    u.is_empty()
        || u.starts_with("data:")
        || u.starts_with("about:")
        || u.starts_with('#')
        || u.starts_with("blob:")
}

// The bundle lives at `<assets>/css/site.css`, so asset paths step up one level.
fn relativize_for_bundled_css(replacement: &str, assets_dir_name: &str) -> String {
    if replacement.starts_with("data:") {
        return replacement.to_string();
    }

    let prefix = format!("{}/", assets_dir_name);
    if let Some(stripped) = replacement.strip_prefix(&prefix) {
        return format!("../{}", stripped);
    }

    replacement.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn inlines_local_imports_and_rewrites_urls() {
        let tmp = tempfile::tempdir().unwrap();
        let styles = tmp.path().join("styles");
        std::fs::create_dir_all(&styles).unwrap();
        std::fs::write(styles.join("bg.png"), b"\x89PNG\r\n\x1a\nrest").unwrap();
        std::fs::write(
            styles.join("fonts.css"),
            "@import \"extra.css\";\n.f { color: red; }\n",
        )
        .unwrap();
        // extra.css imports fonts.css again; the cycle must not loop.
        std::fs::write(styles.join("extra.css"), "@import \"fonts.css\";\n.e { margin: 0; }\n").unwrap();
        std::fs::write(
            styles.join("site.css"),
            "@import 'fonts.css' print;\n.hero { background: url(./bg.png); }\n.x { background: url(data:image/png;base64,AA==); }\n",
        )
        .unwrap();

        let out = tmp.path().join("out");
        let store = AssetStore::new_dir(tmp.path().to_path_buf(), out.clone(), "assets".to_string(), None);
        let css = bundle_css(":root{}", &[styles.join("site.css")], &store).await.unwrap();

        assert!(css.starts_with(":root{}"));
        assert!(css.contains("@media print {"));
        assert!(css.contains(".e { margin: 0; }"));
        assert!(css.contains(".f { color: red; }"));
        assert!(css.contains("url(\"../img/"));
        assert!(css.contains("url(data:image/png;base64,AA==)"));
        assert!(!css.contains("@import"));
    }

    #[tokio::test]
    async fn remote_imports_are_left_for_the_export_check() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("remote.css");
        std::fs::write(&path, "@import url(\"https://fonts.googleapis.com/css2?family=Inter\");\n").unwrap();

        let store = AssetStore::new_single(tmp.path().to_path_buf(), None);
        let css = bundle_css("", &[path], &store).await.unwrap();
        assert!(css.contains("@import url(\"https://fonts.googleapis.com"));
    }

    #[test]
    fn relativize() {
        assert_eq!(relativize_for_bundled_css("assets/img/a.png", "assets"), "../img/a.png");
        assert_eq!(relativize_for_bundled_css("data:x", "assets"), "data:x");
    }
}
