pub mod config;
pub mod jobs;
pub mod kubernetes;
pub mod server;
pub mod volumes;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),
    #[error("cluster connection unavailable: {0}")]
    ClusterUnavailable(String),
    #[error("mapping fault: {0} missing from cluster response")]
    MappingFault(&'static str),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Variant name, used as the diagnostics token in error response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Kube(_) => "Kube",
            Error::ClusterUnavailable(_) => "ClusterUnavailable",
            Error::MappingFault(_) => "MappingFault",
            Error::Config(_) => "Config",
            Error::Io(_) => "Io",
        }
    }

    /// True for failures reaching the control plane, as opposed to faults
    /// found in an otherwise successful response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Kube(_) | Error::ClusterUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
