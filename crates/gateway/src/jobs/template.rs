use k8s_openapi::api::batch::v1::{Job, JobSpec};
use k8s_openapi::api::core::v1::{
    Container, PersistentVolumeClaimVolumeSource, PodSpec, PodTemplateSpec, Volume, VolumeMount,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// The namespace where batch jobs are executed.
pub const TARGET_NAMESPACE: &str = "eo-user-compute";

/// Name of the job and of its single container.
pub const JOB_NAME: &str = "pi";

/// Claim name of the end-user data volume mounted into the job pod. Must
/// match the claim provisioned for the namespace.
pub const CLAIM_NAME: &str = "pvc-sample-eo-data";

const IMAGE: &str = "perl";
const VOLUME_NAME: &str = "eo-data-volume";
const MOUNT_PATH: &str = "/var/eo-data";
const BACKOFF_LIMIT: i32 = 4;

/// Build the fixed compute job:
///
/// ```yaml
/// apiVersion: batch/v1
/// kind: Job
/// metadata:
///   name: pi
/// spec:
///   template:
///     spec:
///       containers:
///       - name: pi
///         image: perl
///         command: ["perl", "-Mbignum=bpi", "-wle", "print bpi(2000)"]
///       restartPolicy: Never
///   backoffLimit: 4
/// ```
///
/// The job shape is fixed at deployment time; there is deliberately no
/// per-request input. The pod mounts the end-user data claim and has its
/// service-account token automount disabled, so the spawned workload
/// cannot call back into the cluster API.
pub fn build_job() -> Job {
    Job {
        metadata: ObjectMeta {
            name: Some(JOB_NAME.to_string()),
            namespace: Some(TARGET_NAMESPACE.to_string()),
            ..Default::default()
        },
        spec: Some(JobSpec {
            backoff_limit: Some(BACKOFF_LIMIT),
            template: PodTemplateSpec {
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: JOB_NAME.to_string(),
                        image: Some(IMAGE.to_string()),
                        command: Some(vec![
                            "perl".to_string(),
                            "-Mbignum=bpi".to_string(),
                            "-wle".to_string(),
                            "print bpi(2000)".to_string(),
                        ]),
                        volume_mounts: Some(vec![VolumeMount {
                            // must match the pod volume name below
                            name: VOLUME_NAME.to_string(),
                            mount_path: MOUNT_PATH.to_string(),
                            ..Default::default()
                        }]),
                        ..Default::default()
                    }],
                    volumes: Some(vec![Volume {
                        name: VOLUME_NAME.to_string(),
                        persistent_volume_claim: Some(PersistentVolumeClaimVolumeSource {
                            claim_name: CLAIM_NAME.to_string(),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }]),
                    restart_policy: Some("Never".to_string()),
                    automount_service_account_token: Some(false),
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}
