mod assets;
mod builtin;
mod cli;
mod css;
mod html;
mod progress;
mod strict;

pub mod carousel;
pub mod clipboard;
pub mod contact;
pub mod scroll;
pub mod site;
pub mod theme;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use assets::AssetStore;
use cli::Args;
use html::{Images, Page, PageContext, Stylesheet};
use site::SiteConfig;

pub use cli::ProgressMode;
pub use cli::{Args as CliArgs, Mode};

pub async fn run(args: Args) -> anyhow::Result<()> {
    use std::io::IsTerminal as _;

    let progress_enabled = match args.progress {
        ProgressMode::Always => true,
        ProgressMode::Never => false,
        ProgressMode::Auto => std::io::stderr().is_terminal(),
    };
    let progress = progress::Progress::new(progress_enabled);
    progress.set_stage("loading site config");

    let config = match &args.config {
        Some(path) => SiteConfig::load(path)?,
        None => {
            let config = SiteConfig::default();
            config.validate()?;
            config
        }
    };
    progress.set_pages_total(Page::ALL.len());

    std::fs::create_dir_all(&args.out).with_context(|| format!("create {}", args.out.display()))?;

    let res = match args.mode {
        Mode::Dir => render_dir(&config, &args, progress.clone()).await,
        Mode::Single => render_single(&config, &args, progress.clone()).await,
    };
    progress.finish();
    res
}

async fn render_dir(
    config: &SiteConfig,
    args: &Args,
    progress: Arc<progress::Progress>,
) -> anyhow::Result<()> {
    let store = AssetStore::new_dir(
        args.public.clone(),
        args.out.clone(),
        args.assets_dir_name.clone(),
        Some(progress.clone()),
    );

    progress.set_stage("bundling css");
    let css_text = css::bundle_css(builtin::BUILTIN_CSS, &args.css, &store).await?;
    let css_rel = write_css_file(&args.out, &args.assets_dir_name, &css_text)?;

    for page in Page::ALL {
        progress.set_stage(format!("rendering {}", page.file_name()));
        let images = resolve_images(page, config, &store).await?;
        let ctx = PageContext {
            config,
            images: &images,
            stylesheet: Stylesheet::Linked(&css_rel),
            site_url: site_url(config, args),
        };
        let html = html::build_page(page, &ctx)?;
        strict::assert_static_export(&html, &css_text)
            .with_context(|| format!("check {}", page.file_name()))?;
        write_page(&args.out, page, &html)?;
        progress.page_done(page.file_name());
    }

    Ok(())
}

async fn render_single(
    config: &SiteConfig,
    args: &Args,
    progress: Arc<progress::Progress>,
) -> anyhow::Result<()> {
    let store = AssetStore::new_single(args.public.clone(), Some(progress.clone()));

    progress.set_stage("bundling css");
    let css_text = css::bundle_css(builtin::BUILTIN_CSS, &args.css, &store).await?;

    for page in Page::ALL {
        progress.set_stage(format!("rendering {}", page.file_name()));
        let images = resolve_images(page, config, &store).await?;
        let ctx = PageContext {
            config,
            images: &images,
            stylesheet: Stylesheet::Inline(&css_text),
            site_url: site_url(config, args),
        };
        let html = html::build_page(page, &ctx)?;
        strict::assert_static_export(&html, &css_text)
            .with_context(|| format!("check {}", page.file_name()))?;
        write_page(&args.out, page, &html)?;
        progress.page_done(page.file_name());
    }

    Ok(())
}

fn site_url<'a>(config: &'a SiteConfig, args: &'a Args) -> Option<&'a url::Url> {
    args.site_url.as_ref().or(config.site.url.as_ref())
}

async fn resolve_images(page: Page, config: &SiteConfig, store: &AssetStore) -> anyhow::Result<Images> {
    let mut images = Images::new();
    for path in page.image_paths(config) {
        if images.contains(&path) {
            continue;
        }
        let src = store
            .image(&path)
            .await
            .with_context(|| format!("resolve image {} for {}", path, page.file_name()))?;
        images.insert(&path, src);
    }
    Ok(images)
}

fn write_css_file(out_dir: &Path, assets_dir_name: &str, css: &str) -> anyhow::Result<String> {
    let rel = format!("{}/css/site.css", assets_dir_name);
    let abs = out_dir.join(&rel);
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    std::fs::write(&abs, css).with_context(|| format!("write {}", abs.display()))?;
    Ok(rel)
}

fn write_page(out_dir: &Path, page: Page, html: &str) -> anyhow::Result<()> {
    let path = out_dir.join(page.file_name());
    std::fs::write(&path, html).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(page = page.file_name(), bytes = html.len(), "wrote page");
    Ok(())
}
