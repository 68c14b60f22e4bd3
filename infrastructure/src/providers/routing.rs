use super::{ProviderAdapter, ProviderKind};
use async_trait::async_trait;
use math_quorum_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use math_quorum_domain::{Model, ProviderConfig};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// `LlmGateway` that dispatches each model to one of several providers.
///
/// Resolution order:
///  1. an explicit `[providers.routing]` entry for the model name
///  2. the provider of the model's family (chatgpt, claude, deepseek)
///  3. the configured default provider, for custom models only
///  4. ModelNotAvailable
///
/// A built-in model whose provider has no API key is never sent to another
/// backend: the other API would not understand the request.
pub struct RoutingGateway {
    providers: Vec<Arc<dyn ProviderAdapter>>,
    /// Model name to index into `providers`
    explicit_model_routing: HashMap<String, usize>,
    default_kind: Option<ProviderKind>,
}

impl RoutingGateway {
    pub fn new(providers: Vec<Arc<dyn ProviderAdapter>>, config: &ProviderConfig) -> Self {
        let mut explicit_model_routing = HashMap::new();

        for (model_name, provider_name) in &config.routing {
            let Some(target_kind) = ProviderKind::from_name(provider_name) else {
                warn!(
                    "Ignoring routing for '{}': unknown provider '{}'",
                    model_name, provider_name
                );
                continue;
            };

            match providers.iter().position(|p| p.kind() == target_kind) {
                Some(idx) => {
                    explicit_model_routing.insert(Model::from(model_name.as_str()).to_string(), idx);
                }
                None => warn!(
                    "Ignoring routing for '{}': provider '{}' is not available",
                    model_name, target_kind
                ),
            }
        }

        Self {
            providers,
            explicit_model_routing,
            default_kind: config.default.as_deref().and_then(ProviderKind::from_name),
        }
    }

    fn find(&self, kind: ProviderKind) -> Option<&dyn ProviderAdapter> {
        self.providers
            .iter()
            .find(|p| p.kind() == kind)
            .map(|p| p.as_ref())
    }

    fn resolve_provider(&self, model: &Model) -> Result<&dyn ProviderAdapter, GatewayError> {
        if let Some(&idx) = self.explicit_model_routing.get(model.as_str()) {
            return Ok(self.providers[idx].as_ref());
        }

        if let Some(kind) = ProviderKind::for_model(model) {
            return self.find(kind).ok_or_else(|| {
                GatewayError::ModelNotAvailable(format!(
                    "{} (no {} API key configured)",
                    model, kind
                ))
            });
        }

        self.default_kind
            .and_then(|kind| self.find(kind))
            .ok_or_else(|| {
                GatewayError::ModelNotAvailable(format!("{} (no provider routes this model)", model))
            })
    }
}

#[async_trait]
impl LlmGateway for RoutingGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        self.resolve_provider(model)?
            .create_session_with_system_prompt(model, system_prompt)
            .await
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        let mut all_models = Vec::new();
        for provider in &self.providers {
            if let Ok(models) = provider.available_models().await {
                all_models.extend(models);
            }
        }
        Ok(all_models)
    }
}
