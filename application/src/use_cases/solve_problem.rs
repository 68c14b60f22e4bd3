//! Solve Problem use case
//!
//! Asks every configured model to solve a problem in parallel, then
//! reconciles the answers into a consensus.

use crate::config::SolveParams;
use crate::ports::history_repository::HistoryRepository;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use math_quorum_domain::{
    ConsensusEngine, ConsensusTally, HistoryRecord, MathProblem, Model, ModelResponse, Phase,
    PromptTemplate, Reconciliation,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::{self, JoinSet};
use tracing::{debug, info, warn};

/// Errors that can occur while solving a problem
///
/// Model failures are not errors: they are recorded as error markers
/// and reconciled like any other response.
#[derive(Error, Debug)]
pub enum SolveProblemError {
    #[error("No models configured")]
    NoModels,
}

/// Input for the SolveProblem use case
#[derive(Debug, Clone)]
pub struct SolveProblemInput {
    pub problem: MathProblem,
    /// Models to ask, in the order results are reported
    pub models: Vec<Model>,
    pub params: SolveParams,
}

impl SolveProblemInput {
    pub fn new(problem: MathProblem, models: Vec<Model>) -> Self {
        Self {
            problem,
            models,
            params: SolveParams::default(),
        }
    }

    pub fn with_params(mut self, params: SolveParams) -> Self {
        self.params = params;
        self
    }
}

/// Result of a solve run
#[derive(Debug, Clone)]
pub struct SolveProblemOutput {
    pub reconciliation: Reconciliation,
    /// One response per queried model, in configured order
    pub responses: Vec<ModelResponse>,
    pub tally: ConsensusTally,
    /// Id assigned by the history store, when the record was saved
    pub history_id: Option<String>,
}

/// Use case for solving a math problem with several models
pub struct SolveProblemUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    history: Option<Arc<dyn HistoryRepository>>,
}

impl<G: LlmGateway + 'static> SolveProblemUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            history: None,
        }
    }

    pub fn with_history(mut self, history: Arc<dyn HistoryRepository>) -> Self {
        self.history = Some(history);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: SolveProblemInput,
    ) -> Result<SolveProblemOutput, SolveProblemError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: SolveProblemInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<SolveProblemOutput, SolveProblemError> {
        let models = dedupe_models(&input.models);
        if models.is_empty() {
            return Err(SolveProblemError::NoModels);
        }

        let problem_text = input.problem.prepared();
        info!("Solving with {} models", models.len());

        // Phase 1: Query
        let responses = self
            .phase_query(&models, &problem_text, &input.params, progress)
            .await;

        // Phase 2: Reconcile
        info!("Phase 2: Reconciliation");
        progress.on_phase_start(&Phase::Reconcile, 1);

        let engine = ConsensusEngine::new(input.params.rule);
        let outcome = engine.evaluate(&responses);
        for answer in &outcome.answers {
            debug!(
                "Extracted answer for {}: {}",
                answer.model,
                answer.value.as_deref().unwrap_or("<none>")
            );
        }
        info!(
            "Consensus: {} ({} confidence), {}/{} answered, largest group {}",
            outcome.result.status,
            outcome.result.confidence,
            outcome.tally.answered,
            outcome.tally.queried,
            outcome.tally.largest_group
        );

        let reconciliation = Reconciliation::from_outcome(&problem_text, &outcome, &responses);
        progress.on_phase_complete(&Phase::Reconcile);

        let history_id = if input.params.save_history {
            self.save_history(&reconciliation, &models).await
        } else {
            None
        };

        Ok(SolveProblemOutput {
            reconciliation,
            responses,
            tally: outcome.tally,
            history_id,
        })
    }

    /// Phase 1: Query all models in parallel
    ///
    /// Always returns exactly one response per model, in `models` order.
    async fn phase_query(
        &self,
        models: &[Model],
        problem_text: &str,
        params: &SolveParams,
        progress: &dyn ProgressNotifier,
    ) -> Vec<ModelResponse> {
        info!("Phase 1: Model Query");
        progress.on_phase_start(&Phase::Query, models.len());

        let mut join_set = JoinSet::new();
        // Task id to slot, so a panicked task can still be attributed
        let mut task_slots: HashMap<task::Id, usize> = HashMap::with_capacity(models.len());

        for (index, model) in models.iter().enumerate() {
            let gateway = Arc::clone(&self.gateway);
            let model = model.clone();
            let problem = problem_text.to_string();
            let timeout = params.request_timeout;

            let handle = join_set.spawn(async move {
                let result = Self::query_with_timeout(&gateway, &model, &problem, timeout).await;
                (index, model, result)
            });
            task_slots.insert(handle.id(), index);
        }

        let mut slots: Vec<Option<ModelResponse>> = vec![None; models.len()];

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((index, model, Ok(content))) => {
                    info!("Model {} responded successfully", model);
                    progress.on_task_complete(&Phase::Query, &model, true);
                    slots[index] = Some(ModelResponse::success(model.as_str(), content));
                }
                Ok((index, model, Err(e))) => {
                    warn!("Model {} failed: {}", model, e);
                    progress.on_task_complete(&Phase::Query, &model, false);
                    slots[index] = Some(ModelResponse::failure(model.as_str(), e));
                }
                Err(e) => {
                    let Some(&index) = task_slots.get(&e.id()) else {
                        warn!("Task join error: {}", e);
                        continue;
                    };
                    let model = &models[index];
                    warn!("Model {} task failed: {}", model, e);
                    progress.on_task_complete(&Phase::Query, model, false);
                    slots[index] = Some(ModelResponse::failure(model.as_str(), "task failed"));
                }
            }
        }

        progress.on_phase_complete(&Phase::Query);

        models
            .iter()
            .zip(slots)
            .map(|(model, slot)| {
                slot.unwrap_or_else(|| ModelResponse::failure(model.as_str(), "task failed"))
            })
            .collect()
    }

    async fn query_with_timeout(
        gateway: &G,
        model: &Model,
        problem: &str,
        timeout: Option<Duration>,
    ) -> Result<String, GatewayError> {
        match timeout {
            Some(limit) => tokio::time::timeout(limit, Self::query_model(gateway, model, problem))
                .await
                .unwrap_or(Err(GatewayError::Timeout)),
            None => Self::query_model(gateway, model, problem).await,
        }
    }

    /// Query a single model
    async fn query_model(gateway: &G, model: &Model, problem: &str) -> Result<String, GatewayError> {
        let session = gateway
            .create_session_with_system_prompt(model, PromptTemplate::math_system())
            .await?;

        let prompt = PromptTemplate::solve_prompt_for(model, problem);
        session.send(&prompt).await
    }

    async fn save_history(&self, reconciliation: &Reconciliation, models: &[Model]) -> Option<String> {
        let repository = self.history.as_ref()?;
        let record = HistoryRecord::from_reconciliation(
            reconciliation.clone(),
            models.iter().map(|m| m.to_string()).collect(),
            chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
        );

        match repository.save(&record).await {
            Ok(id) => {
                debug!("Saved history record {}", id);
                Some(id)
            }
            Err(e) => {
                warn!("Failed to save history: {}", e);
                None
            }
        }
    }
}

/// Keep the first occurrence of each model
fn dedupe_models(models: &[Model]) -> Vec<Model> {
    let mut unique: Vec<Model> = Vec::with_capacity(models.len());
    for model in models {
        if !unique.contains(model) {
            unique.push(model.clone());
        }
    }
    unique
}
