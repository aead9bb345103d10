pub mod client;

pub use client::{ClusterOps, KubeCluster};

#[cfg(test)]
pub use client::MockClusterOps;
