use crate::document::EntryView;
use crate::domain::ResolutionOptions;
use crate::extensions::enclosure::EnclosureStage;
use crate::extensions::html_image::HtmlImageStage;
use crate::extensions::media_content::MediaContentStage;
use crate::extensions::single_image::{Priority, SingleImageStage};
use crate::extensions::thumbnails::ThumbnailStage;
use crate::extensions::traits::{ImageStage, StageOutcome};
use crate::extensions::youtube::YouTubeStage;

/// Picks one representative image for a feed entry by walking the image
/// conventions feeds use, strongest signal first.
pub struct FeaturedImageResolver {
    stages: Vec<Box<dyn ImageStage>>,
}

impl FeaturedImageResolver {
    pub fn new() -> Self {
        let mut resolver = Self { stages: Vec::new() };

        // Order matters: the first stage with a result ends resolution
        resolver.register(Box::new(YouTubeStage));
        resolver.register(Box::new(SingleImageStage::new(Priority::High)));
        resolver.register(Box::new(MediaContentStage));
        resolver.register(Box::new(EnclosureStage));
        resolver.register(Box::new(SingleImageStage::new(Priority::Low)));
        resolver.register(Box::new(ThumbnailStage));
        resolver.register(Box::new(HtmlImageStage)); // Last resort

        resolver
    }

    fn register(&mut self, stage: Box<dyn ImageStage>) {
        self.stages.push(stage);
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// URL of the featured image, or `None` when no stage finds one.
    /// Never fails: missing or malformed tags only mean "nothing here".
    pub fn resolve(&self, entry: &dyn EntryView, options: &ResolutionOptions) -> Option<String> {
        for stage in &self.stages {
            match stage.resolve(entry, options) {
                StageOutcome::Found(url) => {
                    tracing::trace!(stage = stage.name(), url = %url, "Featured image found");
                    return Some(url);
                }
                StageOutcome::Stop => {
                    tracing::trace!(stage = stage.name(), "Stage ended resolution without an image");
                    return None;
                }
                StageOutcome::Continue => {
                    tracing::trace!(stage = stage.name(), "No candidate");
                }
            }
        }

        None
    }
}

impl Default for FeaturedImageResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve with the standard stage order
pub fn resolve_featured_image(entry: &dyn EntryView, options: &ResolutionOptions) -> Option<String> {
    FeaturedImageResolver::new().resolve(entry, options)
}
