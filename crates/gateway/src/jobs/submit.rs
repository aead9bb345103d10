use chrono::SecondsFormat;
use k8s_openapi::api::batch::v1::Job;
use serde::Serialize;
use tracing::debug;

use super::template::{self, TARGET_NAMESPACE};
use crate::{kubernetes::ClusterOps, Error, Result};

/// Client-facing view of a submitted job.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub name: String,
    pub id: String,
    pub volume: String,
    /// Empty until the control plane has scheduled the job's pod.
    #[serde(rename = "startTS")]
    pub start_ts: String,
    #[serde(rename = "createdTS")]
    pub created_ts: String,
}

/// Build the fixed job template, submit it, and project the control plane's
/// response into a [`JobSummary`].
///
/// Exactly one cluster-side creation per call; failures are never retried.
/// No idempotency key is used, so a client retry after a partially failed
/// submission can create a duplicate job.
pub async fn submit_job(cluster: &dyn ClusterOps) -> Result<JobSummary> {
    let job = template::build_job();
    debug!(
        name = template::JOB_NAME,
        namespace = TARGET_NAMESPACE,
        "submitting batch job"
    );

    let result = cluster.create_job(TARGET_NAMESPACE, &job).await?;
    summarize(&result)
}

/// Project the server-side job into a [`JobSummary`].
///
/// The creation timestamp and the claim name are always set on a job the
/// control plane accepted; their absence is a contract violation reported
/// as [`Error::MappingFault`]. The start time is legitimately unset until
/// the pod is scheduled and projects to an empty string.
fn summarize(job: &Job) -> Result<JobSummary> {
    let name = job
        .metadata
        .name
        .clone()
        .ok_or(Error::MappingFault("metadata.name"))?;
    let id = job
        .metadata
        .uid
        .clone()
        .ok_or(Error::MappingFault("metadata.uid"))?;

    let created_ts = job
        .metadata
        .creation_timestamp
        .as_ref()
        .map(|t| t.0.to_rfc3339_opts(SecondsFormat::Secs, true))
        .ok_or(Error::MappingFault("metadata.creationTimestamp"))?;

    let start_ts = job
        .status
        .as_ref()
        .and_then(|status| status.start_time.as_ref())
        .map(|t| t.0.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default();

    // TODO this is the claim name from the pod spec, not the name of the
    // bound volume; resolving the volume itself needs a PVC lookup.
    let volume = job
        .spec
        .as_ref()
        .and_then(|spec| spec.template.spec.as_ref())
        .and_then(|pod| pod.volumes.as_ref())
        .and_then(|volumes| volumes.first())
        .and_then(|volume| volume.persistent_volume_claim.as_ref())
        .map(|claim| claim.claim_name.clone())
        .ok_or(Error::MappingFault(
            "spec.template.spec.volumes[0].persistentVolumeClaim",
        ))?;

    Ok(JobSummary {
        name,
        id,
        volume,
        start_ts,
        created_ts,
    })
}
