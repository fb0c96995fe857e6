//! Terminal progress display for a collapse run

use crate::algorithm::scheduler::{ChangeKind, GridChange, GridObserver};
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar tracking collapsed cells
///
/// The bar moves backwards when repairs clear cells, which is the visible
/// sign of a run fighting contradictions.
pub struct CollapseProgress {
    bar: ProgressBar,
    contradictions: usize,
}

impl CollapseProgress {
    /// Create a bar drawn to stderr
    pub fn new(cell_count: usize) -> Self {
        let bar = ProgressBar::new(cell_count as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        Self {
            bar,
            contradictions: 0,
        }
    }

    /// Create a bar that tracks state without drawing
    pub fn hidden(cell_count: usize) -> Self {
        let bar =
            ProgressBar::with_draw_target(Some(cell_count as u64), ProgressDrawTarget::hidden());
        bar.set_style(PROGRESS_STYLE.clone());
        Self {
            bar,
            contradictions: 0,
        }
    }

    /// Collapsed cells as last reported
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Contradictions seen so far
    pub const fn contradictions(&self) -> usize {
        self.contradictions
    }

    /// Whether the bar has been finished
    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

impl GridObserver for CollapseProgress {
    fn on_grid_changed(&mut self, change: &GridChange<'_>) {
        self.bar.set_position(change.grid.collapsed_count() as u64);

        match change.kind {
            ChangeKind::Evaluated { contradictions } => {
                self.contradictions += contradictions.len();
                self.bar.set_message(format!(
                    "iter {} | {} contradictions",
                    change.iteration, self.contradictions
                ));
            }
            ChangeKind::Collapsed { .. } => {}
            ChangeKind::Converged { .. } => self.bar.finish_and_clear(),
        }
    }
}
