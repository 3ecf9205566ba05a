// src/progress.rs
/// Lightweight progress reporting used by long-running operations (refresh/scrape).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One event finished; `index` is its position in the listing.
    fn item_done(&mut self, _index: usize, _name: &str) {}

    /// One event was skipped.
    fn item_failed(&mut self, _name: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Forwards everything to `tracing`.
#[derive(Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        self.failed = 0;
        tracing::info!(total, "starting");
    }

    fn log(&mut self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn item_done(&mut self, _index: usize, name: &str) {
        self.done += 1;
        tracing::debug!(done = self.done, total = self.total, "{name}");
    }

    fn item_failed(&mut self, name: &str, reason: &str) {
        self.failed += 1;
        tracing::warn!(reason, "skipped {name}");
    }

    fn finish(&mut self) {
        tracing::info!(done = self.done, failed = self.failed, "finished");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Progress;

    /// Records every call, for assertions.
    #[derive(Default)]
    pub struct Recorder {
        pub total: Option<usize>,
        pub logs: Vec<String>,
        pub done: Vec<(usize, String)>,
        pub failed: Vec<String>,
        pub finished: bool,
    }

    impl Progress for Recorder {
        fn begin(&mut self, total: usize) { self.total = Some(total); }
        fn log(&mut self, msg: &str) { self.logs.push(msg.to_string()); }
        fn item_done(&mut self, index: usize, name: &str) { self.done.push((index, name.to_string())); }
        fn item_failed(&mut self, name: &str, _reason: &str) { self.failed.push(name.to_string()); }
        fn finish(&mut self) { self.finished = true; }
    }
}
