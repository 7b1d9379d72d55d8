use serde::{Deserialize, Serialize};

/// An image reference found while scanning one stage, with whatever
/// dimensions the feed declared for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCandidate {
    pub url: String,
    pub width: Option<u64>,
    pub height: Option<u64>,
    pub time: Option<String>,
}

impl ImageCandidate {
    pub fn new(url: String) -> Self {
        Self {
            url,
            width: None,
            height: None,
            time: None,
        }
    }

    pub fn with_width(mut self, width: Option<u64>) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: Option<u64>) -> Self {
        self.height = height;
        self
    }

    pub fn with_time(mut self, time: Option<String>) -> Self {
        self.time = time;
        self
    }

    /// Width used for ranking; missing widths rank as zero
    pub fn rank_width(&self) -> u64 {
        self.width.unwrap_or(0)
    }
}

/// Pick the widest candidate. Only a strictly larger width replaces the
/// current pick, so the first candidate wins ties (including all-zero).
pub fn select_widest(candidates: &[ImageCandidate]) -> Option<&ImageCandidate> {
    let mut best = candidates.first()?;
    let mut best_width = 0;

    for candidate in candidates {
        let width = candidate.rank_width();
        if width > best_width {
            best_width = width;
            best = candidate;
        }
    }

    Some(best)
}

/// Integer-cast parsing for dimension attributes: leading whitespace is
/// skipped and the leading run of ASCII digits is taken (`"300px"` -> 300).
/// Returns `None` when there are no leading digits.
pub fn parse_dimension(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let digits_len = trimmed
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();

    if digits_len == 0 {
        return None;
    }

    Some(trimmed[..digits_len].parse().unwrap_or(u64::MAX))
}
