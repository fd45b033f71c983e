//! Practice-studio feedback: canned critiques picked from the image source.
//!
//! No image is ever fetched or analysed. The source string (usually a URL) is
//! searched for keywords as given; matching is case-sensitive.

use serde::Serialize;

use crate::error::{Result, require};

const LANDSCAPE_FEEDBACK: &str = "Thanks for sharing your landscape! Your use of leading lines with the river is effective. However, the horizon line is centered, which can sometimes make the image feel static. Consider applying the Rule of Thirds. Also, the foreground appears a bit flat; perhaps adding some textural elements could enhance depth. Would you like me to suggest specific crops or ideas for foreground enhancement?";
const PORTRAIT_FEEDBACK: &str = "Beautiful portrait work! The lighting on the subject's face creates nice dimension. I notice the background might be competing for attention - consider using a wider aperture or post-processing to blur it slightly. The composition follows the rule of thirds well, but the subject's eyes could use a bit more sharpening to draw the viewer in. Would you like suggestions for enhancing the focal point?";
const DEFAULT_FEEDBACK: &str = "Great work on this piece! I can see attention to detail in your composition. The color balance works well, though there's room to enhance the focal point. The lighting creates good mood, but consider how contrast could guide the viewer's eye more effectively. The overall technique shows solid fundamentals - shall we explore some iteration ideas?";

const ITERATIONS: [&str; 3] = [
    "**Crop Suggestion:** Imagine cropping from the bottom and slightly left to place the river's entry point near a lower-left intersection and the horizon on the upper third. This emphasizes depth and dynamism.",
    "**Foreground Enhancement (Conceptual):** Consider adding a rock or a cluster of wildflowers in the lower-right foreground, slightly out of focus, to create visual interest and depth.",
    "**Color Mood Shift (Co-creation):** We could explore a version with a warmer, golden hour light to evoke a sense of calm, or a cooler, more dramatic blue hour to create mystery.",
];

/// Feedback for one submitted piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Critique {
    pub feedback: String,
    /// Whether iteration suggestions can be requested afterwards.
    pub variations_offered: bool,
}

impl Critique {
    fn offering_variations(feedback: &str) -> Self {
        Self {
            feedback: feedback.to_string(),
            variations_offered: true,
        }
    }
}

/// Picks a critique for an image source.
#[derive(Debug, Clone)]
pub struct Critic {
    rules: Vec<(&'static [&'static str], Critique)>,
    fallback: Critique,
    iterations: Vec<String>,
}

impl Critic {
    pub fn new() -> Self {
        Self {
            rules: vec![
                (
                    &["landscape", "nature"][..],
                    Critique::offering_variations(LANDSCAPE_FEEDBACK),
                ),
                (
                    &["portrait", "face"][..],
                    Critique::offering_variations(PORTRAIT_FEEDBACK),
                ),
            ],
            fallback: Critique::offering_variations(DEFAULT_FEEDBACK),
            iterations: ITERATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Critique the image at `source`.
    ///
    /// Fails with `MissingInput` when the source is absent or blank.
    pub fn critique(&self, source: Option<&str>) -> Result<&Critique> {
        let source = require(source, "Image URL")?;

        let critique = self
            .rules
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| source.contains(*k)))
            .map(|(_, critique)| critique)
            .unwrap_or(&self.fallback);

        tracing::debug!(source_len = source.len(), "Critique selected");
        Ok(critique)
    }

    /// The fixed follow-up suggestions offered after a critique.
    pub fn iterations(&self) -> &[String] {
        &self.iterations
    }
}

impl Default for Critic {
    fn default() -> Self {
        Self::new()
    }
}
