use tracing::{debug, info, instrument};

use crate::ai::{AiConfig, GeminiClient, PromptComposer, ReferenceImage};
use crate::error::StoryboardError;
use crate::storyboard::{validate, StoryboardResult};

/// Runs one analysis: credential check, image decoding, prompt composition,
/// a single service call and validation of the reply.
#[derive(Clone, Debug)]
pub struct Director {
    composer: PromptComposer,
    client: GeminiClient,
}

impl Director {
    pub fn new(composer: PromptComposer, client: GeminiClient) -> Self {
        Self { composer, client }
    }

    pub fn from_config(config: &AiConfig) -> Result<Self, StoryboardError> {
        Ok(Self::new(PromptComposer::default(), GeminiClient::new(config)?))
    }

    /// Turn one reference image into a validated storyboard.
    ///
    /// Without a non-blank API key no request is made. Nothing is retried.
    #[instrument(level = "debug", skip(self, api_key, image_bytes), fields(size = image_bytes.len()))]
    pub async fn analyze(
        &self,
        api_key: Option<&str>,
        image_bytes: &[u8],
    ) -> Result<StoryboardResult, StoryboardError> {
        let api_key = match api_key.map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => {
                debug!("analysis requested without an API key");
                return Err(StoryboardError::MissingCredential);
            }
        };

        let image = ReferenceImage::decode(image_bytes)?;
        let request = self.composer.compose(image);
        let raw = self.client.generate(api_key, &request).await?;
        let result = validate(&raw)?;

        info!(
            title = %result.project_title,
            keyframes = result.keyframes.len(),
            "storyboard generated"
        );
        Ok(result)
    }
}
