use std::io::{IsTerminal, Write};

const BAR_WIDTH: usize = 40;

/// Single-line progress bar on stderr. Silent when stderr is not a terminal.
pub struct Progress {
    total: u64,
    done: u64,
    enabled: bool,
}

impl Progress {
    pub fn start(total: u64) -> Self {
        let progress = Self {
            total,
            done: 0,
            enabled: std::io::stderr().is_terminal(),
        };
        progress.draw();
        progress
    }

    pub fn increment(&mut self) {
        self.done += 1;
        self.draw();
    }

    pub fn finish(self) {
        if self.enabled {
            eprintln!();
        }
    }

    fn draw(&self) {
        if !self.enabled {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\r{}", render_bar(self.done, self.total, BAR_WIDTH));
        let _ = stderr.flush();
    }
}

pub(crate) fn render_bar(done: u64, total: u64, width: usize) -> String {
    let done = done.min(total);
    let filled = if total == 0 {
        0
    } else {
        (done as usize * width) / total as usize
    };
    let percent = if total == 0 { 0 } else { done * 100 / total };
    format!(
        "{done} / {total} [{}{}] {percent}%",
        "=".repeat(filled),
        " ".repeat(width - filled)
    )
}
