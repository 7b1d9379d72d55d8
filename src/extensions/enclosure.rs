use crate::document::EntryView;
use crate::domain::ResolutionOptions;
use crate::extensions::traits::{ImageStage, StageOutcome};

/// Enclosure URL when the enclosure declares an image MIME type
pub fn fetch_enclosure_image<V: EntryView + ?Sized>(entry: &V) -> Option<String> {
    entry
        .enclosure()
        .filter(|enclosure| enclosure.is_image())
        .map(|enclosure| enclosure.url)
        .filter(|url| !url.is_empty())
}

pub struct EnclosureStage;

impl ImageStage for EnclosureStage {
    fn name(&self) -> &'static str {
        "enclosure"
    }

    fn resolve(&self, entry: &dyn EntryView, _options: &ResolutionOptions) -> StageOutcome {
        StageOutcome::from_option(fetch_enclosure_image(entry))
    }
}
