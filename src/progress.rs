use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use indicatif::{HumanDuration, MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::assets::AssetKind;

pub struct Progress {
    enabled: bool,
    start: Instant,

    mp: Option<MultiProgress>,
    stage: ProgressBar,
    pages: ProgressBar,

    asset_requests_total: AtomicU64,
    asset_requests_unique: AtomicU64,
    fonts: AtomicU64,
}

impl Progress {
    pub fn new(enabled: bool) -> Arc<Self> {
        let start = Instant::now();

        if !enabled {
            return Arc::new(Self {
                enabled: false,
                start,
                mp: None,
                stage: ProgressBar::hidden(),
                pages: ProgressBar::hidden(),
                asset_requests_total: AtomicU64::new(0),
                asset_requests_unique: AtomicU64::new(0),
                fonts: AtomicU64::new(0),
            });
        }

        let mp = MultiProgress::with_draw_target(ProgressDrawTarget::stderr());

        let stage = mp.add(ProgressBar::new_spinner());
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}  [{elapsed_precise}]") {
            stage.set_style(style);
        }
        stage.enable_steady_tick(Duration::from_millis(80));
        stage.set_message("starting");

        let pages = mp.add(ProgressBar::new(0));
        if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}") {
            pages.set_style(style.progress_chars("##-"));
        }
        pages.set_message("pages");

        Arc::new(Self {
            enabled: true,
            start,
            mp: Some(mp),
            stage,
            pages,
            asset_requests_total: AtomicU64::new(0),
            asset_requests_unique: AtomicU64::new(0),
            fonts: AtomicU64::new(0),
        })
    }

    pub fn set_stage(&self, msg: impl Into<String>) {
        if !self.enabled {
            return;
        }
        self.stage.set_message(msg.into());
    }

    pub fn set_pages_total(&self, total: usize) {
        if self.enabled {
            self.pages.set_length(total as u64);
        }
    }

    pub fn page_done(&self, file_name: &str) {
        if self.enabled {
            self.pages.inc(1);
            self.pages.set_message(file_name.to_string());
        }
    }

    pub fn asset_request(&self, kind: AssetKind, is_unique: bool) {
        self.asset_requests_total.fetch_add(1, Ordering::Relaxed);
        if is_unique {
            self.asset_requests_unique.fetch_add(1, Ordering::Relaxed);
            if kind == AssetKind::Font {
                self.fonts.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// `(requests, unique files)` seen by the asset store.
    pub fn asset_counts(&self) -> (u64, u64) {
        (
            self.asset_requests_total.load(Ordering::Relaxed),
            self.asset_requests_unique.load(Ordering::Relaxed),
        )
    }

    pub fn finish(&self) {
        let (total, unique) = self.asset_counts();
        tracing::info!(
            asset_requests = total,
            unique_assets = unique,
            fonts = self.fonts.load(Ordering::Relaxed),
            elapsed_ms = self.start.elapsed().as_millis() as u64,
            "site build finished"
        );
        if !self.enabled {
            return;
        }
        self.stage.finish_with_message("done");
        self.pages.finish_and_clear();
        if let Some(mp) = &self.mp {
            let _ = mp.println(format!("Done in {}", HumanDuration(self.start.elapsed())));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_even_when_hidden() {
        let p = Progress::new(false);
        p.asset_request(AssetKind::Image, true);
        p.asset_request(AssetKind::Image, false);
        p.asset_request(AssetKind::Font, true);
        assert_eq!(p.asset_counts(), (3, 2));
        p.finish();
    }
}
