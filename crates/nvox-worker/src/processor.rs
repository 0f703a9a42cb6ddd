//! Per-job processing pipeline.

use std::time::Instant;

use tracing::info;

use nvox_models::{Job, JobId};
use nvox_queue::GenerateVideoJob;
use nvox_storage::ArtifactStore;
use nvox_store::JobStore;
use nvox_tts::{EndpointList, SpeechClient, SpeechEngine};

use crate::config::WorkerConfig;
use crate::error::WorkerResult;
use crate::render::Renderer;

/// Everything a job needs: engine, renderer, and the collaborators.
pub struct ProcessingContext {
    pub engine: SpeechEngine,
    pub renderer: Renderer,
    pub store: JobStore,
    pub artifacts: ArtifactStore,
    pub config: WorkerConfig,
}

impl ProcessingContext {
    /// Wire up all collaborators from configuration.
    pub async fn new(config: WorkerConfig) -> WorkerResult<Self> {
        let engine = SpeechEngine::new(
            SpeechClient::new(config.tts_timeout)?,
            EndpointList::from_env()?,
            config.chunk_limit,
        );
        let renderer = Renderer::from_config(&config)?;
        let store = JobStore::from_env().await?;
        let artifacts = ArtifactStore::from_env()?;

        tokio::fs::create_dir_all(&config.output_dir).await?;

        Ok(Self {
            engine,
            renderer,
            store,
            artifacts,
            config,
        })
    }
}

/// Run one job to its successful terminal outcome.
///
/// Any error returned here becomes a FAILED mark at the runner
/// boundary; this function only persists the happy path.
pub async fn process_job(ctx: &ProcessingContext, payload: &GenerateVideoJob) -> WorkerResult<Job> {
    let started = Instant::now();
    let job = Job::new(
        JobId::from_string(payload.id.clone()),
        payload.prompt.clone(),
    )
    .start()?;

    ctx.store.mark_processing(&job.id).await?;
    info!(
        job_id = %job.id,
        prompt_len = payload.prompt.len(),
        "processing started"
    );

    let audio = ctx.engine.synthesize(&job.prompt, ctx.config.voice).await?;
    info!(job_id = %job.id, audio_bytes = audio.len(), "synthesis complete");

    let file_name = format!("{}.{}", job.id, ctx.renderer.extension());
    let output_path = ctx.config.output_dir.join(&file_name);
    ctx.renderer.render(&job.id, audio, &output_path).await?;

    let key = format!("{}/{}", ctx.renderer.key_prefix(), file_name);
    let location = ctx
        .artifacts
        .store_artifact(&output_path, &key, ctx.renderer.content_type())
        .await?;

    ctx.store.mark_complete(&job.id, &location).await?;

    // The uploaded copy is canonical; drop the local one.
    tokio::fs::remove_file(&output_path).await.ok();

    info!(
        job_id = %job.id,
        location = %location,
        elapsed_secs = started.elapsed().as_secs_f64(),
        "generation complete"
    );

    Ok(job.complete(location)?)
}
