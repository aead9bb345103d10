use async_trait::async_trait;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::PersistentVolume;
use kube::{
    api::{Api, ListParams, PostParams},
    Client,
};
use tracing::{error, warn};

use crate::{Error, Result};

/// Typed create/list operations against the cluster control plane.
///
/// The production implementation is [`KubeCluster`]; tests substitute their
/// own implementation instead of reaching a real cluster.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClusterOps: Send + Sync {
    /// Submit a batch job to `namespace` and return the server's view of it.
    async fn create_job(&self, namespace: &str, job: &Job) -> Result<Job>;

    /// List persistent volumes matching `label_selector`, at most `limit`
    /// entries. Cluster-scoped; no continuation token is requested.
    async fn list_persistent_volumes(
        &self,
        label_selector: &str,
        limit: u32,
    ) -> Result<Vec<PersistentVolume>>;
}

/// Adapter over a process-wide [`kube::Client`].
///
/// Credentials are discovered once at startup: the pod's service account
/// when running inside a cluster, otherwise the local kubeconfig.
pub struct KubeCluster {
    client: Option<Client>,
}

impl KubeCluster {
    /// Discover credentials and connect. A discovery failure is logged but
    /// does not prevent construction; calls made through a disconnected
    /// adapter fail with [`Error::ClusterUnavailable`].
    pub async fn connect() -> Self {
        match Client::try_default().await {
            Ok(client) => Self {
                client: Some(client),
            },
            Err(err) => {
                warn!(error = %err, "Kubernetes credential discovery failed, cluster calls will be rejected");
                Self { client: None }
            }
        }
    }

    fn client(&self) -> Result<Client> {
        self.client.clone().ok_or_else(|| {
            Error::ClusterUnavailable("no credentials discovered at startup".to_string())
        })
    }
}

#[async_trait]
impl ClusterOps for KubeCluster {
    async fn create_job(&self, namespace: &str, job: &Job) -> Result<Job> {
        let jobs: Api<Job> = Api::namespaced(self.client()?, namespace);
        jobs.create(&PostParams::default(), job)
            .await
            .map_err(log_api_error)
    }

    async fn list_persistent_volumes(
        &self,
        label_selector: &str,
        limit: u32,
    ) -> Result<Vec<PersistentVolume>> {
        let volumes: Api<PersistentVolume> = Api::all(self.client()?);
        let params = ListParams::default().labels(label_selector).limit(limit);
        let list = volumes.list(&params).await.map_err(log_api_error)?;
        Ok(list.items)
    }
}

fn log_api_error(err: kube::Error) -> Error {
    match &err {
        kube::Error::Api(response) => {
            error!(code = response.code, message = %response.message, "control plane rejected the request");
        }
        other => {
            error!(error = %other, "control plane call failed");
        }
    }
    Error::Kube(err)
}
