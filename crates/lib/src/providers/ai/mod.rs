pub mod anthropic;
pub mod openrouter;

use crate::{errors::ProviderCallError, types::ProviderReply};
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a text-only AI provider.
///
/// Each implementation owns one transport (endpoint, auth header, response
/// envelope) and normalizes the envelope into a [`ProviderReply`].
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// A short, stable identifier reported to clients (e.g. `anthropic`).
    fn name(&self) -> &str;

    /// Generates a response from a given system and user prompt.
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<ProviderReply, ProviderCallError>;
}

dyn_clone::clone_trait_object!(AiProvider);

/// A trait for providers that can read an image.
#[async_trait]
pub trait VisionProvider: Send + Sync + Debug + DynClone {
    fn name(&self) -> &str;

    /// Sends one base64-encoded image together with an instruction prompt.
    async fn describe_image(
        &self,
        prompt: &str,
        image_base64: &str,
        media_type: &str,
    ) -> Result<ProviderReply, ProviderCallError>;
}

dyn_clone::clone_trait_object!(VisionProvider);
