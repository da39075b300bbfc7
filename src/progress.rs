//! Console progress reporting

use crossterm::{
    QueueableCommand,
    cursor::MoveToColumn,
    style::{Print, Stylize},
};
use std::io::{Write, stdout};

/// Width of the bar in characters; one fill character per 2%
const BAR_WIDTH: usize = 50;

/// Files handled so far out of a fixed total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    /// One more file handled
    #[must_use]
    pub fn advance(self) -> Self {
        Self {
            current: (self.current + 1).min(self.total),
            ..self
        }
    }

    /// Completion percentage, 100 for an empty run
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            100
        } else {
            self.current * 100 / self.total
        }
    }

    pub fn is_done(&self) -> bool {
        self.current >= self.total
    }
}

/// Receives progress updates from the pipeline
pub trait ProgressSink {
    fn report(&mut self, progress: &Progress);
    fn finish(&mut self) {}
}

/// Discards all updates
#[derive(Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _progress: &Progress) {}
}

/// `[=====     ]  10%       5/50` redrawn in place on stdout
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    started: bool,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The bar text for a given progress, without colours
pub fn render_bar(progress: &Progress) -> String {
    let filled = (progress.percent() / 2).min(BAR_WIDTH);
    format!(
        "[{:<width$}]{:>3}% {:>8}/{}",
        "=".repeat(filled),
        progress.percent(),
        progress.current,
        progress.total,
        width = BAR_WIDTH
    )
}

impl ProgressSink for ConsoleProgress {
    fn report(&mut self, progress: &Progress) {
        self.started = true;
        let line = render_bar(progress);
        let styled = if progress.is_done() {
            line.green()
        } else {
            line.cyan()
        };

        let mut out = stdout();
        let _ = out.queue(MoveToColumn(0));
        let _ = out.queue(Print(styled));
        let _ = out.flush();
    }

    fn finish(&mut self) {
        if self.started {
            println!();
        }
    }
}
