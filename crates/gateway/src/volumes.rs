use k8s_openapi::api::core::v1::PersistentVolume;
use serde::Serialize;
use tracing::{debug, info};

use crate::{kubernetes::ClusterOps, Result};

/// Selector applied when the caller does not supply one.
pub const DEFAULT_LABEL_SELECTOR: &str = "vol-type=eo-end-user-data";

/// Upper bound on returned entries. The query is not paginated; callers
/// needing more than this are out of scope for this version.
pub const LIST_LIMIT: u32 = 10;

/// Client-facing view of a persistent volume.
#[derive(Debug, Clone, Serialize)]
pub struct VolumeSummary {
    pub name: String,
    pub capacity: String,
    pub status: String,
}

/// List persistent volumes matching `label_selector` (or the default
/// selector) and project them in the order the control plane returned
/// them. An empty result is a normal outcome; the caller decides how to
/// report it.
pub async fn list_volumes(
    cluster: &dyn ClusterOps,
    label_selector: Option<&str>,
) -> Result<Vec<VolumeSummary>> {
    let selector = label_selector.unwrap_or(DEFAULT_LABEL_SELECTOR);
    info!(selector, "listing persistent volumes");

    let volumes = cluster.list_persistent_volumes(selector, LIST_LIMIT).await?;
    debug!(count = volumes.len(), "control plane returned volumes");

    Ok(volumes
        .iter()
        .take(LIST_LIMIT as usize)
        .map(summarize)
        .collect())
}

fn summarize(volume: &PersistentVolume) -> VolumeSummary {
    VolumeSummary {
        name: volume.metadata.name.clone().unwrap_or_default(),
        capacity: volume
            .spec
            .as_ref()
            .and_then(|spec| spec.volume_mode.clone())
            .unwrap_or_default(),
        status: volume
            .status
            .as_ref()
            .and_then(|status| status.phase.clone())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::api::core::v1::{PersistentVolumeSpec, PersistentVolumeStatus};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    use super::*;
    use crate::kubernetes::MockClusterOps;

    fn volume(name: &str, mode: &str, phase: &str) -> PersistentVolume {
        PersistentVolume {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            spec: Some(PersistentVolumeSpec {
                volume_mode: Some(mode.to_string()),
                ..Default::default()
            }),
            status: Some(PersistentVolumeStatus {
                phase: Some(phase.to_string()),
                ..Default::default()
            }),
        }
    }

    #[tokio::test]
    async fn default_selector_is_used_when_none_is_given() {
        let mut cluster = MockClusterOps::new();
        cluster
            .expect_list_persistent_volumes()
            .withf(|selector, limit| selector == DEFAULT_LABEL_SELECTOR && *limit == LIST_LIMIT)
            .returning(|_, _| Ok(vec![]));

        let summaries = list_volumes(&cluster, None).await.unwrap();
        assert!(summaries.is_empty());
    }

    #[tokio::test]
    async fn entries_project_in_order() {
        let mut cluster = MockClusterOps::new();
        cluster
            .expect_list_persistent_volumes()
            .withf(|selector, _| selector == "vol-type=scratch")
            .returning(|_, _| {
                Ok(vec![
                    volume("pv-a", "Filesystem", "Bound"),
                    volume("pv-b", "Block", "Available"),
                ])
            });

        let summaries = list_volumes(&cluster, Some("vol-type=scratch"))
            .await
            .unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "pv-a");
        assert_eq!(summaries[0].capacity, "Filesystem");
        assert_eq!(summaries[0].status, "Bound");
        assert_eq!(summaries[1].name, "pv-b");
        assert_eq!(summaries[1].capacity, "Block");
        assert_eq!(summaries[1].status, "Available");
    }

    #[tokio::test]
    async fn absent_fields_project_to_empty_strings() {
        let mut cluster = MockClusterOps::new();
        cluster
            .expect_list_persistent_volumes()
            .returning(|_, _| {
                Ok(vec![PersistentVolume {
                    metadata: ObjectMeta::default(),
                    spec: None,
                    status: None,
                }])
            });

        let summaries = list_volumes(&cluster, None).await.unwrap();
        assert_eq!(summaries[0].name, "");
        assert_eq!(summaries[0].capacity, "");
        assert_eq!(summaries[0].status, "");
    }

    #[tokio::test]
    async fn cap_holds_even_if_the_control_plane_returns_more() {
        let mut cluster = MockClusterOps::new();
        cluster.expect_list_persistent_volumes().returning(|_, _| {
            Ok((0..15)
                .map(|i| volume(&format!("pv-{i}"), "Filesystem", "Bound"))
                .collect())
        });

        let summaries = list_volumes(&cluster, None).await.unwrap();
        assert_eq!(summaries.len(), LIST_LIMIT as usize);
        assert_eq!(summaries[0].name, "pv-0");
        assert_eq!(summaries[9].name, "pv-9");
    }
}
