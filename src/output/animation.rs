//! Animated status line shown while a background operation runs.
//!
//! The line reads `Merging.`, `Merging..`, `Merging...` and then starts
//! over, advancing one frame per tick.
//!
//! # Examples
//!
//! ```
//! use pdftools::output::animation::LoadingAnimation;
//!
//! let mut animation = LoadingAnimation::disabled("Compressing");
//! assert_eq!(animation.frame(), "Compressing.");
//! animation.tick();
//! assert_eq!(animation.frame(), "Compressing..");
//! ```

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

const MAX_DOTS: usize = 3;

/// Default delay between two frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(500);

/// Dot animation for a status label.
#[derive(Debug, Clone)]
pub struct LoadingAnimation {
    /// Text before the dots, e.g. "Encrypting".
    label: String,
    /// Number of dots in the current frame (1..=3).
    dots: usize,
    /// Whether frames are drawn to the terminal.
    enabled: bool,
    interval: Duration,
}

impl LoadingAnimation {
    /// Create an animation that draws only when stdout is a terminal.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            dots: 1,
            enabled: io::stdout().is_terminal(),
            interval: FRAME_INTERVAL,
        }
    }

    /// Create an animation that keeps its state but never draws.
    pub fn disabled(label: impl Into<String>) -> Self {
        let mut animation = Self::new(label);
        animation.enabled = false;
        animation
    }

    /// Override the frame interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The text of the current frame.
    pub fn frame(&self) -> String {
        format!("{}{}", self.label, ".".repeat(self.dots))
    }

    /// Reset to the first frame and draw it.
    pub fn start(&mut self) {
        self.dots = 1;
        self.render();
    }

    /// Advance one frame and draw it.
    pub fn tick(&mut self) {
        self.dots = self.dots % MAX_DOTS + 1;
        self.render();
    }

    /// Erase the status line.
    pub fn finish(&mut self) {
        if self.enabled {
            print!("\r\x1b[K");
            io::stdout().flush().ok();
        }
    }

    fn render(&self) {
        if self.enabled {
            print!("\r\x1b[K{}", self.frame());
            io::stdout().flush().ok();
        }
    }
}
