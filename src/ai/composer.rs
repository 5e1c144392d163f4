use std::io::Cursor;

use image::ImageFormat;
use tracing::{debug, instrument};

use crate::ai::prompts::DIRECTOR_PROMPT;
use crate::error::StoryboardError;

/// A reference image that has been decoded and is ready to be sent.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceImage {
    bytes: Vec<u8>,
    mime_type: &'static str,
    width: u32,
    height: u32,
}

impl ReferenceImage {
    /// Decode raw upload bytes.
    ///
    /// JPEG, PNG and WebP are forwarded untouched; any other format the
    /// decoder understands is re-encoded as PNG.
    #[instrument(level = "trace", skip(bytes), fields(size = bytes.len()))]
    pub fn decode(bytes: &[u8]) -> Result<Self, StoryboardError> {
        let format = image::guess_format(bytes)
            .map_err(|err| StoryboardError::InvalidImage(err.to_string()))?;
        let decoded = image::load_from_memory_with_format(bytes, format)
            .map_err(|err| StoryboardError::InvalidImage(err.to_string()))?;
        let (width, height) = (decoded.width(), decoded.height());

        let (bytes, mime_type) = match format {
            ImageFormat::Jpeg => (bytes.to_vec(), "image/jpeg"),
            ImageFormat::Png => (bytes.to_vec(), "image/png"),
            ImageFormat::WebP => (bytes.to_vec(), "image/webp"),
            other => {
                debug!(format = ?other, "re-encoding reference image as png");
                let mut out = Cursor::new(Vec::new());
                decoded
                    .write_to(&mut out, ImageFormat::Png)
                    .map_err(|err| StoryboardError::InvalidImage(err.to_string()))?;
                (out.into_inner(), "image/png")
            }
        };

        debug!(width, height, mime_type, "reference image decoded");
        Ok(Self {
            bytes,
            mime_type,
            width,
            height,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// One request to the generation service: the instructions plus the image.
#[derive(Clone, Debug)]
pub struct StoryboardRequest {
    instruction: String,
    image: ReferenceImage,
}

impl StoryboardRequest {
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn image(&self) -> &ReferenceImage {
        &self.image
    }
}

/// Pairs the instruction template with a reference image.
#[derive(Clone, Debug)]
pub struct PromptComposer {
    template: String,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new(DIRECTOR_PROMPT)
    }
}

impl PromptComposer {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn compose(&self, image: ReferenceImage) -> StoryboardRequest {
        StoryboardRequest {
            instruction: self.template.clone(),
            image,
        }
    }
}
