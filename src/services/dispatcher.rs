//! Batch dispatcher
//!
//! Fans out one task per (endpoint, message batch) pair and waits for all of them

use crate::config::{BatchConfig, DispatchUnit};
use crate::services::builder::{build_payload, build_request};
use crate::services::client::ChatClient;
use crate::services::credentials::{credential_variable, CredentialSource};
use crate::services::decoder::decode_response;
use crate::utils::error::{ConfigError, DispatchError, DispatchResult};
use crate::utils::logging::create_request_log_summary;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Lifecycle of one dispatch unit
///
/// `Pending → CredentialResolved → RequestBuilt → Sent → Succeeded`, with a
/// transition to `Failed` possible from any non-terminal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitStage {
    Pending,
    CredentialResolved,
    RequestBuilt,
    Sent,
    Succeeded,
    Failed,
}

impl UnitStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, UnitStage::Succeeded | UnitStage::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitStage::Pending => "pending",
            UnitStage::CredentialResolved => "credential_resolved",
            UnitStage::RequestBuilt => "request_built",
            UnitStage::Sent => "sent",
            UnitStage::Succeeded => "succeeded",
            UnitStage::Failed => "failed",
        }
    }
}

/// Why a unit failed, and how far it got
#[derive(Debug)]
pub struct UnitFailure {
    /// Last stage reached before failing
    pub stage: UnitStage,
    pub error: DispatchError,
}

/// Terminal result of one unit
#[derive(Debug)]
pub struct UnitOutcome {
    pub unit: DispatchUnit,
    /// Time from unit start until reply decoded or failure
    pub elapsed: Duration,
    pub result: Result<String, UnitFailure>,
}

impl UnitOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Extracted reply, when the unit succeeded
    pub fn reply(&self) -> Option<&str> {
        self.result.as_ref().ok().map(String::as_str)
    }

    pub fn failure(&self) -> Option<&UnitFailure> {
        self.result.as_ref().err()
    }

    pub fn stage(&self) -> UnitStage {
        if self.is_success() {
            UnitStage::Succeeded
        } else {
            UnitStage::Failed
        }
    }
}

/// Aggregate result of one batch
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Identifier attached to every log line of this batch
    pub batch_id: String,
    /// One outcome per launched unit, in completion order
    pub outcomes: Vec<UnitOutcome>,
    /// Wall-clock time from first launch to last completion
    pub total_elapsed: Duration,
}

impl BatchReport {
    pub fn launched(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.launched() - self.succeeded()
    }

    /// Replies of successful units, in completion order
    pub fn replies(&self) -> Vec<&str> {
        self.outcomes.iter().filter_map(UnitOutcome::reply).collect()
    }

    /// Outcomes sorted by unit index (endpoint-major)
    pub fn sorted_outcomes(&self) -> Vec<&UnitOutcome> {
        let mut sorted: Vec<&UnitOutcome> = self.outcomes.iter().collect();
        sorted.sort_by_key(|o| o.unit.index);
        sorted
    }
}

/// Concurrent fan-out/fan-in over every unit of a batch
///
/// Units never cancel each other: a batch always waits for every unit to
/// reach a terminal stage, whatever happens to its siblings.
#[derive(Clone)]
pub struct BatchDispatcher {
    client: Arc<ChatClient>,
    credentials: Arc<dyn CredentialSource>,
}

impl BatchDispatcher {
    pub fn new(client: ChatClient, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            client: Arc::new(client),
            credentials,
        }
    }

    /// Dispatch every unit of `config` and wait for all of them
    pub async fn run(&self, config: &BatchConfig) -> Result<BatchReport, ConfigError> {
        self.run_with(config, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `on_complete` as each unit finishes
    ///
    /// Only an invalid config fails the batch; unit errors end up in the report.
    pub async fn run_with<F>(
        &self,
        config: &BatchConfig,
        mut on_complete: F,
    ) -> Result<BatchReport, ConfigError>
    where
        F: FnMut(&UnitOutcome),
    {
        let units = config.plan_units()?;
        let batch_id = Uuid::new_v4().to_string();
        let span = info_span!("batch", batch_id = %batch_id);

        async move {
            info!(
                "Dispatching {} units ({} endpoints x {} message batches)",
                units.len(),
                config.endpoints.len(),
                config.messages_list.len()
            );

            let started = Instant::now();

            // All units are spawned before the first one is awaited
            let mut pending: FuturesUnordered<_> = units
                .into_iter()
                .map(|unit| self.launch(unit))
                .collect();

            let mut outcomes = Vec::with_capacity(pending.len());
            while let Some(outcome) = pending.next().await {
                on_complete(&outcome);
                outcomes.push(outcome);
            }

            let report = BatchReport {
                batch_id,
                outcomes,
                total_elapsed: started.elapsed(),
            };

            info!(
                "Batch completed in {:.2}s: {} succeeded, {} failed",
                report.total_elapsed.as_secs_f64(),
                report.succeeded(),
                report.failed()
            );

            Ok(report)
        }
        .instrument(span)
        .await
    }

    /// Spawn one unit; the returned future resolves to its outcome
    fn launch(&self, unit: DispatchUnit) -> impl std::future::Future<Output = UnitOutcome> {
        let client = Arc::clone(&self.client);
        let credentials = Arc::clone(&self.credentials);
        let unit_span = info_span!(
            "unit",
            index = unit.index,
            model = %unit.endpoint.model_name,
            batch = unit.batch_index
        );

        let fallback = unit.clone();
        let launched = Instant::now();
        let handle = tokio::spawn(Self::execute_unit(client, credentials, unit).instrument(unit_span));

        async move {
            match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Unit {} task did not complete: {}", fallback.index, e);
                    UnitOutcome {
                        unit: fallback,
                        elapsed: launched.elapsed(),
                        result: Err(UnitFailure {
                            stage: UnitStage::Pending,
                            error: DispatchError::Join(e.to_string()),
                        }),
                    }
                }
            }
        }
    }

    async fn execute_unit(
        client: Arc<ChatClient>,
        credentials: Arc<dyn CredentialSource>,
        unit: DispatchUnit,
    ) -> UnitOutcome {
        let started = Instant::now();
        let mut stage = UnitStage::Pending;

        let result = Self::drive(&client, credentials.as_ref(), &unit, &mut stage).await;
        let elapsed = started.elapsed();

        let result = match result {
            Ok(reply) => {
                advance(&mut stage, UnitStage::Succeeded);
                info!("API call took {:.2}ms", elapsed.as_secs_f64() * 1000.0);
                Ok(reply)
            }
            Err(error) => {
                warn!(
                    url = %unit.endpoint.url,
                    stage = stage.as_str(),
                    kind = error.kind(),
                    "Unit failed after {:.2}ms: {}",
                    elapsed.as_secs_f64() * 1000.0,
                    error
                );
                Err(UnitFailure { stage, error })
            }
        };

        UnitOutcome {
            unit,
            elapsed,
            result,
        }
    }

    async fn drive(
        client: &ChatClient,
        credentials: &dyn CredentialSource,
        unit: &DispatchUnit,
        stage: &mut UnitStage,
    ) -> DispatchResult<String> {
        let model = &unit.endpoint.model_name;

        let credential = credentials.resolve(model).ok_or_else(|| {
            DispatchError::CredentialMissing {
                model: model.clone(),
                variable: credential_variable(model),
            }
        })?;
        advance(stage, UnitStage::CredentialResolved);

        let request = build_request(&unit.endpoint, &unit.messages, unit.temperature, &credential)?;
        if tracing::enabled!(tracing::Level::DEBUG) {
            let payload = build_payload(&unit.endpoint, &unit.messages, unit.temperature);
            debug!("Request: {}", create_request_log_summary(&payload));
        }
        advance(stage, UnitStage::RequestBuilt);

        let response = client.send(request).await?;
        advance(stage, UnitStage::Sent);
        debug!("Response status: {} {}", response.status, response.status_text);

        decode_response(&response)
    }
}

fn advance(stage: &mut UnitStage, next: UnitStage) {
    debug_assert!(!stage.is_terminal(), "no transition out of a terminal stage");
    debug!("{} -> {}", stage.as_str(), next.as_str());
    *stage = next;
}
