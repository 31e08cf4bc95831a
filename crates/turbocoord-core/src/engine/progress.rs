/// Progress events emitted by the generation workflow.
///
/// Phases cover the setup work (loading, sampling, filtering); the conformer
/// batch events track the per-point generation loop, which is the only part
/// long enough to warrant a progress bar.
#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    ConformerBatchStart { total_conformers: u64 },
    ConformerDone,
    ConformerBatchFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional caller-supplied callback.
///
/// The reporter is shared across worker threads during parallel generation, so
/// the callback must be `Send + Sync`.
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
}
