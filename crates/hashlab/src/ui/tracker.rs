use hashlab_digest::{Flow, ProgressEvent, ProgressObserver};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use once_cell::sync::Lazy;

const PB_STYLE: &str =
    "{spinner:.blue} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

const SPINNER_STYLE: &str = "{spinner:.blue} [{elapsed_precise}] {bytes} hashed ({bytes_per_sec})";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

static PB_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(PB_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK).progress_chars(PB_CHARS))
});

static SPINNER_TEMPLATE: Lazy<Option<ProgressStyle>> =
    Lazy::new(|| ProgressStyle::with_template(SPINNER_STYLE).ok().map(|style| style.tick_chars(TICK)));

#[derive(Debug, Clone, Default)]
pub struct ProgressTrackerConfig {
    pub len: Option<u64>,
    /// Cancel hashing once more than this many bytes were read.
    pub limit: Option<u64>,
    pub hidden: bool,
}

/// Progress bar on stderr that doubles as the hashing observer.
pub struct ProgressTracker {
    pb: ProgressBar,
    limit: Option<u64>,
    exceeded: bool,
}

impl ProgressTracker {
    pub fn new(ctx: ProgressTrackerConfig) -> Self {
        let pb = ProgressBar::with_draw_target(ctx.len, draw_target(ctx.hidden));

        let style = if ctx.len.is_some() { &*PB_TEMPLATE } else { &*SPINNER_TEMPLATE };
        if let Some(style) = style.clone() {
            pb.set_style(style);
        }

        ProgressTracker {
            pb,
            limit: ctx.limit,
            exceeded: false,
        }
    }

    /// Whether hashing was stopped because the input grew past the limit.
    pub fn exceeded(&self) -> bool { self.exceeded }

    /// Remove the bar once hashing is over.
    pub fn finish(&self) { self.pb.finish_and_clear(); }
}

fn draw_target(hidden: bool) -> ProgressDrawTarget {
    if hidden { ProgressDrawTarget::hidden() } else { ProgressDrawTarget::stderr() }
}

impl ProgressObserver for ProgressTracker {
    fn on_progress(&mut self, event: &ProgressEvent) -> Flow {
        if let Some(total) = event.total_bytes {
            self.pb.set_length(total);
        }
        self.pb.set_position(event.bytes_processed);

        match self.limit {
            Some(limit) if event.bytes_processed > limit => {
                self.exceeded = true;
                self.pb.abandon();
                Flow::Cancel
            }
            _ => Flow::Continue,
        }
    }
}
