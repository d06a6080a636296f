/// Progress events emitted by the scan workflow.
///
/// A scan is one phase with one step per trajectory frame, so the usual
/// sequence is `PhaseStart`, `TaskStart { total_steps: frames }`, one
/// `TaskIncrement` per frame, `TaskFinish`, `PhaseFinish`. `Message` carries
/// user-facing warnings (for example an element pair that cannot match) and
/// may arrive at any point.
#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events from long-running workflows to an optional
/// frontend callback. With no callback attached, reporting is a no-op.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Reports a user-facing warning or note.
    pub fn message(&self, text: impl Into<String>) {
        self.report(Progress::Message(text.into()));
    }
}
