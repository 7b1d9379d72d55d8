use crate::document::EntryView;
use crate::domain::ResolutionOptions;

/// Result of one resolution stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// An image was found; resolution ends with it
    Found(String),
    /// This stage had candidates but none usable; resolution ends empty
    Stop,
    /// No signal here; try the next stage
    Continue,
}

impl StageOutcome {
    pub fn from_option(url: Option<String>) -> Self {
        match url {
            Some(url) => StageOutcome::Found(url),
            None => StageOutcome::Continue,
        }
    }
}

pub trait ImageStage: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Inspect the entry and report what this stage found
    fn resolve(&self, entry: &dyn EntryView, options: &ResolutionOptions) -> StageOutcome;
}
