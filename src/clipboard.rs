use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

/// How long the "copied" acknowledgment stays up.
pub const DEFAULT_ACK: Duration = Duration::from_millis(1500);

pub const LABEL_IDLE: &str = "Copiar";
pub const LABEL_COPIED: &str = "Copiado";

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    writes: usize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Clipboard that rejects writes (permission denied, insecure context).
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedClipboard;

impl Clipboard for DeniedClipboard {
    fn write_text(&mut self, _text: &str) -> anyhow::Result<()> {
        anyhow::bail!("clipboard write permission denied")
    }
}

/// Copy button state: one clipboard, one flag, at most one pending revert.
pub struct CopyButton<C> {
    clipboard: C,
    ack: Duration,
    copied: Arc<AtomicBool>,
    reverts: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl<C: Clipboard> CopyButton<C> {
    pub fn new(clipboard: C) -> Self {
        Self::with_ack(clipboard, DEFAULT_ACK)
    }

    pub fn with_ack(clipboard: C, ack: Duration) -> Self {
        Self {
            clipboard,
            ack,
            copied: Arc::new(AtomicBool::new(false)),
            reverts: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    /// Fire-and-forget copy. Failures are logged and leave the flag untouched.
    pub fn copy(&mut self, text: &str) -> bool {
        if let Err(e) = self.clipboard.write_text(text) {
            tracing::error!(error = %e, "clipboard copy failed");
            return false;
        }

        if let Some(prev) = self.pending.take() {
            prev.abort();
        }
        self.copied.store(true, Ordering::SeqCst);

        let copied = Arc::clone(&self.copied);
        let reverts = Arc::clone(&self.reverts);
        let ack = self.ack;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(ack).await;
            copied.store(false, Ordering::SeqCst);
            reverts.fetch_add(1, Ordering::SeqCst);
        }));
        true
    }

    pub fn is_copied(&self) -> bool {
        self.copied.load(Ordering::SeqCst)
    }

    /// Number of reverts that have actually fired.
    pub fn reverts(&self) -> u64 {
        self.reverts.load(Ordering::SeqCst)
    }

    pub fn label(&self) -> &'static str {
        if self.is_copied() { LABEL_COPIED } else { LABEL_IDLE }
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }
}

impl<C> Drop for CopyButton<C> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
