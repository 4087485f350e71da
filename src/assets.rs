use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use base64::Engine as _;

use crate::progress::Progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Font,
    Other,
}

#[derive(Debug, Clone)]
pub struct AssetRequest {
    pub kind: AssetKind,
    pub path: PathBuf,
}

impl AssetRequest {
    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: AssetKind::Image,
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Dir,
    Single,
}

/// Resolves local files into output references, once per file.
pub struct AssetStore {
    mode: OutputMode,
    public_dir: PathBuf,
    out_dir: PathBuf,
    assets_dir_name: String,
    progress: Option<Arc<Progress>>,
    entries: tokio::sync::Mutex<HashMap<PathBuf, Arc<tokio::sync::OnceCell<Result<String, String>>>>>,
}

impl AssetStore {
    pub fn new_dir(
        public_dir: PathBuf,
        out_dir: PathBuf,
        assets_dir_name: String,
        progress: Option<Arc<Progress>>,
    ) -> Self {
        Self {
            mode: OutputMode::Dir,
            public_dir,
            out_dir,
            assets_dir_name,
            progress,
            entries: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    pub fn new_single(public_dir: PathBuf, progress: Option<Arc<Progress>>) -> Self {
        Self {
            mode: OutputMode::Single,
            out_dir: PathBuf::new(),
            public_dir,
            assets_dir_name: "assets".to_string(),
            progress,
            entries: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Site-relative image reference such as `/1.png` or `partners/a.png`.
    pub async fn image(&self, site_path: &str) -> anyhow::Result<String> {
        let path = self.public_path(site_path)?;
        self.get(AssetRequest::image(path)).await
    }

    pub async fn get(&self, request: AssetRequest) -> anyhow::Result<String> {
        let key = request.path.clone();
        let (cell, is_new) = {
            let mut entries = self.entries.lock().await;
            let is_new = !entries.contains_key(&key);
            let cell = entries
                .entry(key)
                .or_insert_with(|| Arc::new(tokio::sync::OnceCell::new()))
                .clone();
            (cell, is_new)
        };
        if let Some(progress) = &self.progress {
            progress.asset_request(request.kind, is_new);
        }

        let stored = cell
            .get_or_init(|| async {
                match self.load_and_store(&request) {
                    Ok(v) => Ok(v),
                    Err(e) => Err(format!("{:#}", e)),
                }
            })
            .await;

        match stored {
            Ok(v) => Ok(v.clone()),
            Err(e) => Err(anyhow::anyhow!("{e}")),
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        self.mode
    }

    pub fn assets_dir_name(&self) -> &str {
        &self.assets_dir_name
    }

    fn public_path(&self, site_path: &str) -> anyhow::Result<PathBuf> {
        let rel = Path::new(site_path.trim().trim_start_matches('/'));
        if rel.as_os_str().is_empty()
            || rel
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            anyhow::bail!("asset path {site_path:?} must stay inside the public directory");
        }
        Ok(self.public_dir.join(rel))
    }

    fn load_and_store(&self, request: &AssetRequest) -> anyhow::Result<String> {
        let bytes = std::fs::read(&request.path)
            .with_context(|| format!("read asset {}", request.path.display()))?;
        let (mime, ext) = sniff_mime_and_ext(&bytes, &request.path, request.kind);
        tracing::debug!(path = %request.path.display(), mime, bytes = bytes.len(), "resolved asset");

        match self.mode {
            OutputMode::Single => {
                let b64 = base64::engine::general_purpose::STANDARD.encode(&bytes);
                Ok(format!("data:{};base64,{}", mime, b64))
            }
            OutputMode::Dir => write_asset_file(
                &self.out_dir,
                &self.assets_dir_name,
                request.kind,
                &bytes,
                ext,
            ),
        }
    }
}

fn kind_subdir(kind: AssetKind) -> &'static str {
    match kind {
        AssetKind::Image => "img",
        AssetKind::Font => "font",
        AssetKind::Other => "other",
    }
}

fn write_asset_file(
    out_dir: &Path,
    assets_dir_name: &str,
    kind: AssetKind,
    bytes: &[u8],
    ext: &str,
) -> anyhow::Result<String> {
    let hash = blake3::hash(bytes).to_hex().to_string();
    let rel = format!("{}/{}/{}.{}", assets_dir_name, kind_subdir(kind), hash, ext);
    let abs = out_dir.join(&rel);
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    if !abs.exists() {
        std::fs::write(&abs, bytes).with_context(|| format!("write {}", abs.display()))?;
    }
    Ok(rel)
}

pub fn guess_kind(path: &Path) -> AssetKind {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "woff2" | "woff" | "ttf" | "otf" | "eot" => AssetKind::Font,
        "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" | "avif" | "ico" => AssetKind::Image,
        _ => AssetKind::Other,
    }
}

fn sniff_mime_and_ext(bytes: &[u8], path: &Path, kind: AssetKind) -> (&'static str, &'static str) {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        return ("image/png", "png");
    }
    if bytes.starts_with(b"\xff\xd8\xff") {
        return ("image/jpeg", "jpg");
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return ("image/gif", "gif");
    }
    if bytes.starts_with(b"RIFF") && bytes.get(8..12) == Some(b"WEBP") {
        return ("image/webp", "webp");
    }
    if bytes.starts_with(b"wOFF") {
        return ("font/woff", "woff");
    }
    if bytes.starts_with(b"wOF2") {
        return ("font/woff2", "woff2");
    }

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "png" => ("image/png", "png"),
        "jpg" | "jpeg" => ("image/jpeg", "jpg"),
        "gif" => ("image/gif", "gif"),
        "webp" => ("image/webp", "webp"),
        "svg" => ("image/svg+xml", "svg"),
        "avif" => ("image/avif", "avif"),
        "ico" => ("image/x-icon", "ico"),
        "woff2" => ("font/woff2", "woff2"),
        "woff" => ("font/woff", "woff"),
        "ttf" => ("font/ttf", "ttf"),
        "otf" => ("font/otf", "otf"),
        _ => match kind {
            AssetKind::Font => ("font/woff2", "woff2"),
            _ => ("application/octet-stream", "bin"),
        },
    }
}
