use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::feedback::{self, FeedbackReport};
use crate::media::MediaFile;
use crate::sampler::{LandmarkSampler, SamplerError};

pub(crate) struct AnalysisJob {
    pub request_id: u64,
    pub media_generation: u64,
    pub athlete: String,
    pub media: MediaFile,
}

pub(crate) struct AnalysisJobResult {
    pub request_id: u64,
    pub media_generation: u64,
    pub media: MediaFile,
    pub result: Result<FeedbackReport, SamplerError>,
}

/// Run analyses one at a time on a dedicated thread.
///
/// A panicking detector or decoder fails only its own job.
pub(crate) fn spawn_analysis_worker(
    sampler: Arc<LandmarkSampler>,
) -> (Sender<AnalysisJob>, Receiver<AnalysisJobResult>) {
    let (tx, rx) = std::sync::mpsc::channel::<AnalysisJob>();
    let (result_tx, result_rx) = std::sync::mpsc::channel::<AnalysisJobResult>();
    thread::spawn(move || {
        while let Ok(job) = rx.recv() {
            let result = catch_unwind(AssertUnwindSafe(|| analyze(&sampler, &job)))
                .unwrap_or_else(|payload| {
                    let reason = panic_reason(payload.as_ref());
                    tracing::error!(
                        "Analysis of {} panicked: {reason}",
                        job.media.path.display()
                    );
                    Err(SamplerError::Crashed(reason))
                });
            let _ = result_tx.send(AnalysisJobResult {
                request_id: job.request_id,
                media_generation: job.media_generation,
                media: job.media,
                result,
            });
        }
    });
    (tx, result_rx)
}

fn analyze(sampler: &LandmarkSampler, job: &AnalysisJob) -> Result<FeedbackReport, SamplerError> {
    let landmarks = sampler.sample(&job.media)?;
    if landmarks.is_none() {
        tracing::info!("No person detected in {}", job.media.path.display());
    }
    Ok(feedback::synthesize(
        &job.athlete,
        landmarks.as_ref(),
        job.media.kind,
    ))
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    }
}
