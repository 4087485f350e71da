use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Fixed, non-empty ring of slides with a cursor.
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    slides: Vec<T>,
    index: usize,
}

impl<T> Carousel<T> {
    pub fn new(slides: Vec<T>) -> anyhow::Result<Self> {
        if slides.is_empty() {
            anyhow::bail!("carousel needs at least one slide");
        }
        Ok(Self { slides, index: 0 })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn slides(&self) -> &[T] {
        &self.slides
    }

    pub fn current(&self) -> &T {
        &self.slides[self.index]
    }

    pub fn advance(&mut self) -> usize {
        self.index = (self.index + 1) % self.slides.len();
        self.index
    }

    /// Any integer is folded into range, so `go_to(index - 1)` is "previous".
    pub fn go_to(&mut self, target: i64) -> usize {
        let len = self.slides.len() as i64;
        self.index = target.rem_euclid(len) as usize;
        self.index
    }

    pub fn next(&mut self) -> usize {
        self.go_to(self.index as i64 + 1)
    }

    pub fn previous(&mut self) -> usize {
        self.go_to(self.index as i64 - 1)
    }

    /// Horizontal translation of `slide` in percent of the viewport.
    pub fn offset_percent(&self, slide: usize) -> i64 {
        100 * (slide as i64 - self.index as i64)
    }
}

/// Live auto-advance timer. Dropping it cancels the timer.
#[derive(Debug)]
pub struct AutoplayHandle {
    task: JoinHandle<()>,
}

impl AutoplayHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for AutoplayHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Carousel plus its repeating timer. At most one handle is live at a time.
pub struct Autoplay<T> {
    carousel: Arc<Mutex<Carousel<T>>>,
    interval: Duration,
    handle: Option<AutoplayHandle>,
}

impl<T> Autoplay<T>
where
    T: Send + 'static,
{
    pub fn new(carousel: Carousel<T>, interval: Duration) -> Self {
        Self {
            carousel: Arc::new(Mutex::new(carousel)),
            interval: interval.max(Duration::from_millis(1)),
            handle: None,
        }
    }

    /// Creates the driver and starts the timer, like a page mount.
    pub fn mount(carousel: Carousel<T>, interval: Duration) -> Self {
        let mut autoplay = Self::new(carousel, interval);
        autoplay.start();
        autoplay
    }

    /// (Re)starts the timer; the next tick is a full interval from now.
    pub fn start(&mut self) {
        // Release the previous handle before spawning its replacement.
        self.handle = None;

        let carousel = Arc::clone(&self.carousel);
        let period = self.interval;
        let first = Instant::now() + period;
        let task = tokio::spawn(async move {
            let mut ticks = tokio::time::interval_at(first, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                let index = lock(&carousel).advance();
                tracing::trace!(index, "carousel auto-advanced");
            }
        });
        self.handle = Some(AutoplayHandle { task });
    }

    pub fn stop(&mut self) {
        self.handle = None;
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn go_to(&mut self, target: i64) -> usize {
        let index = lock(&self.carousel).go_to(target);
        self.start();
        index
    }

    pub fn next(&mut self) -> usize {
        let index = lock(&self.carousel).next();
        self.start();
        index
    }

    pub fn previous(&mut self) -> usize {
        let index = lock(&self.carousel).previous();
        self.start();
        index
    }

    pub fn index(&self) -> usize {
        lock(&self.carousel).index()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

fn lock<T>(carousel: &Mutex<Carousel<T>>) -> MutexGuard<'_, Carousel<T>> {
    carousel.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
