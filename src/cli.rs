use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use url::Url;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    Dir,
    Single,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProgressMode {
    /// Enable progress UI when stderr is a TTY.
    Auto,
    /// Always enable progress UI (even when piped).
    Always,
    /// Never show progress UI.
    Never,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Site configuration JSON. Built-in campaign data is used when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the site images (logo, slides, partner logos).
    #[arg(long, default_value = "public")]
    pub public: PathBuf,

    /// Output directory for the generated pages.
    #[arg(long, default_value = "out")]
    pub out: PathBuf,

    /// Output mode: `dir` (pages + assets/) or `single` (self-contained pages with inlined images).
    #[arg(long, value_enum, default_value = "dir")]
    pub mode: Mode,

    /// Extra local stylesheets appended after the built-in one.
    #[arg(long)]
    pub css: Vec<PathBuf>,

    /// Assets directory name for `dir` mode.
    #[arg(long, default_value = "assets")]
    pub assets_dir_name: String,

    /// Public base URL, used for canonical and Open Graph links (e.g. `https://lacremaisvisao.org.br/`).
    #[arg(long)]
    pub site_url: Option<Url>,

    /// Progress display: `auto`, `always`, or `never`.
    #[arg(long, value_enum, default_value = "auto")]
    pub progress: ProgressMode,
}
