//! Sequential fail-fast step runner
//!
//! Each step is a named one-shot future producing a structural result that
//! is dumped in full on success. The first error short-circuits every
//! remaining step; the report records how far the run got.

use futures::future::BoxFuture;
use serde_json::Value;
use tracing::{error, info};

use crate::error::{Result, StorsmokeError};

/// One named pipeline step
pub struct Step<'a> {
    pub name: &'static str,
    pub run: BoxFuture<'a, Result<Value>>,
}

impl<'a> Step<'a> {
    pub fn new(name: &'static str, run: BoxFuture<'a, Result<Value>>) -> Self {
        Self { name, run }
    }
}

/// Outcome of a pipeline run
pub struct PipelineReport {
    pub total: usize,
    pub completed: usize,
    pub failure: Option<StorsmokeError>,
}

impl PipelineReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Run the steps in order, stopping at the first failure
pub async fn execute(steps: Vec<Step<'_>>) -> PipelineReport {
    let total = steps.len();
    let mut completed = 0;

    for step in steps {
        info!("--> {}", step.name);

        match step.run.await {
            Ok(result) => {
                match serde_json::to_string_pretty(&result) {
                    Ok(dump) => println!("\n{}", dump),
                    Err(_) => println!("\n{}", result),
                }
                completed += 1;
            }
            Err(e) => {
                error!("Error occurred in one of the operations: {}", e);
                return PipelineReport {
                    total,
                    completed,
                    failure: Some(StorsmokeError::step_failed(step.name, e)),
                };
            }
        }
    }

    PipelineReport {
        total,
        completed,
        failure: None,
    }
}

/// Follow-up command the user must run to tear the resources down
pub fn cleanup_hint(resource_group: &str, storage_account: &str) -> String {
    format!(
        "Please execute the following script for cleanup:\nnode cleanup.js {} {}",
        resource_group, storage_account
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_step(
        name: &'static str,
        counter: Arc<AtomicUsize>,
        fail: bool,
    ) -> Step<'static> {
        Step::new(
            name,
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
                if fail {
                    Err(StorsmokeError::arm_api("induced failure"))
                } else {
                    Ok(serde_json::json!({ "step": name }))
                }
            }),
        )
    }

    #[tokio::test]
    async fn test_all_steps_run_on_success() {
        let counter = Arc::new(AtomicUsize::new(0));
        let steps = vec![
            counting_step("one", counter.clone(), false),
            counting_step("two", counter.clone(), false),
            counting_step("three", counter.clone(), false),
        ];

        let report = execute(steps).await;
        assert!(report.is_success());
        assert_eq!(report.completed, 3);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_failure_short_circuits_remaining_steps() {
        let counter = Arc::new(AtomicUsize::new(0));
        let steps = vec![
            counting_step("one", counter.clone(), false),
            counting_step("two", counter.clone(), true),
            counting_step("three", counter.clone(), false),
        ];

        let report = execute(steps).await;
        assert!(!report.is_success());
        assert_eq!(report.completed, 1);
        // step three never ran
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        let failure = report.failure.unwrap();
        assert!(failure.to_string().contains("two"));
        assert!(failure.to_string().contains("induced failure"));
    }

    #[test]
    fn test_cleanup_hint_names_both_resources() {
        let hint = cleanup_hint("testrg42", "testacc7");
        assert!(hint.contains("node cleanup.js testrg42 testacc7"));
    }
}
