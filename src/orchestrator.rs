/*!
 * Parallel per-file substitution.
 *
 * Jobs are independent: each owns its buffers, and the only shared state is
 * the read-only `SubstitutionEngine`. A failing job is recorded in its result
 * and never cancels its siblings.
 */

use futures::stream::{self, StreamExt};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::file_utils::FileKind;
use crate::substitution::SubstitutionEngine;

/// One file to substitute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub kind: FileKind,
}

impl SubstitutionJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, kind: FileKind) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            kind,
        }
    }
}

/// Outcome of one job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobResult {
    pub success: bool,
    /// Input path on success, error description on failure
    pub message: String,
    pub replaced: usize,
    pub misses: usize,
}

/// Aggregate outcome of a run, results in job order
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<JobResult>,
}

impl RunSummary {
    fn from_results(results: Vec<JobResult>) -> Self {
        let successful = results.iter().filter(|r| r.success).count();
        Self {
            successful,
            failed: results.len() - successful,
            results,
        }
    }

    /// Failed job messages
    pub fn failures(&self) -> impl Iterator<Item = &str> {
        self.results.iter().filter(|r| !r.success).map(|r| r.message.as_str())
    }
}

/// Fans substitution jobs out over a bounded worker pool
pub struct Orchestrator {
    engine: Arc<SubstitutionEngine>,
    max_workers: usize,
}

impl Orchestrator {
    /// Create an orchestrator sized to the available hardware parallelism
    pub fn new(engine: Arc<SubstitutionEngine>) -> Self {
        let max_workers = std::thread::available_parallelism().map_or(1, |n| n.get());
        Self { engine, max_workers }
    }

    /// Override the worker count (at least one)
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Run every job to completion and collect per-job results
    pub async fn run(
        &self,
        jobs: Vec<SubstitutionJob>,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> RunSummary {
        let total = jobs.len();
        let processed = Arc::new(AtomicUsize::new(0));

        let mut results = stream::iter(jobs.into_iter().enumerate())
            .map(|(index, job)| {
                let engine = Arc::clone(&self.engine);
                let processed = Arc::clone(&processed);
                let progress_callback = progress_callback.clone();

                async move {
                    let input = job.input.clone();
                    let result = match tokio::task::spawn_blocking(move || run_job(&engine, &job)).await {
                        Ok(result) => result,
                        Err(e) => JobResult {
                            success: false,
                            message: format!("Error processing {:?}: worker failed: {}", input, e),
                            replaced: 0,
                            misses: 0,
                        },
                    };

                    let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(current, total);
                    (index, result)
                }
            })
            .buffer_unordered(self.max_workers)
            .collect::<Vec<_>>()
            .await;

        // Restore job order
        results.sort_by_key(|(index, _)| *index);
        let summary = RunSummary::from_results(results.into_iter().map(|(_, r)| r).collect());

        for message in summary.failures() {
            error!("{}", message);
        }
        info!(
            "Processed {} files successfully, {} files failed.",
            summary.successful, summary.failed
        );
        summary
    }
}

fn run_job(engine: &SubstitutionEngine, job: &SubstitutionJob) -> JobResult {
    match engine.process_file(job.kind, &job.input, &job.output) {
        Ok(outcome) => {
            if !outcome.misses.is_empty() {
                warn!("{} translations not found in {:?}", outcome.misses.len(), job.input);
            }
            debug!("{:?} -> {:?}", job.input, job.output);
            JobResult {
                success: true,
                message: job.input.to_string_lossy().into_owned(),
                replaced: outcome.replaced,
                misses: outcome.misses.len(),
            }
        }
        Err(e) => JobResult {
            success: false,
            message: format!("Error processing {:?}: {}", job.input, e),
            replaced: 0,
            misses: 0,
        },
    }
}
