use crate::gateway::error::GatewayResult;
use crate::gateway::fetch::ResourceFetcher;
use crate::gateway::provider::ProviderClient;
use crate::types::{Action, ImageEditParams, ImageVariationParams};
use reqwest::multipart::Form;
use serde_json::Value;
use tracing::debug;

/// Maps a parsed action onto exactly one provider call. Text actions pass
/// their params through untouched; the image upload actions first pull the
/// caller-supplied URLs into named byte buffers.
#[derive(Debug, Clone)]
pub struct ActionDispatcher {
    provider: ProviderClient,
    fetcher: ResourceFetcher,
}

impl ActionDispatcher {
    pub fn new(provider: ProviderClient, fetcher: ResourceFetcher) -> Self {
        Self { provider, fetcher }
    }

    pub async fn dispatch(&self, action: Action) -> GatewayResult<Value> {
        match action {
            Action::Completion(params) => {
                debug!("Dispatching completion");
                self.provider.create_completion(params).await
            }
            Action::Chat(params) => {
                debug!("Dispatching chat completion");
                self.provider.create_chat_completion(params).await
            }
            Action::Edit(params) => {
                debug!("Dispatching edit");
                self.provider.create_edit(params).await
            }
            Action::Image(params) => {
                debug!("Dispatching image generation");
                self.provider.create_image(params).await
            }
            Action::ImageEdit(params) => {
                debug!("Dispatching image edit");
                let form = self.build_image_edit_form(params).await?;
                self.provider.create_image_edit(form).await
            }
            Action::ImageVariation(params) => {
                debug!("Dispatching image variation");
                let form = self.build_image_variation_form(params).await?;
                self.provider.create_image_variation(form).await
            }
        }
    }

    /// Both URLs are fetched before the provider call; either fetch failing
    /// fails the whole action.
    async fn build_image_edit_form(&self, params: ImageEditParams) -> GatewayResult<Form> {
        let image = self.fetcher.fetch(&params.image).await?;
        let mask = match &params.mask {
            Some(url) => Some(self.fetcher.fetch(url).await?),
            None => None,
        };

        let mut form = Form::new()
            .part("image", image.into_part()?)
            .text("prompt", params.prompt);

        if let Some(mask) = mask {
            form = form.part("mask", mask.into_part()?);
        }

        Ok(apply_common_image_fields(
            form,
            params.n,
            params.size,
            params.response_format,
            params.user,
        ))
    }

    async fn build_image_variation_form(
        &self,
        params: ImageVariationParams,
    ) -> GatewayResult<Form> {
        let image = self.fetcher.fetch(&params.image).await?;

        let form = Form::new().part("image", image.into_part()?);

        Ok(apply_common_image_fields(
            form,
            params.n,
            params.size,
            params.response_format,
            params.user,
        ))
    }
}

fn apply_common_image_fields(
    mut form: Form,
    n: Option<u32>,
    size: Option<String>,
    response_format: Option<String>,
    user: Option<String>,
) -> Form {
    if let Some(n) = n {
        form = form.text("n", n.to_string());
    }
    if let Some(size) = size {
        form = form.text("size", size);
    }
    if let Some(response_format) = response_format {
        form = form.text("response_format", response_format);
    }
    if let Some(user) = user {
        form = form.text("user", user);
    }
    form
}
