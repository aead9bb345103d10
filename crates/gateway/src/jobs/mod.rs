pub mod submit;
pub mod template;

pub use submit::{submit_job, JobSummary};
pub use template::build_job;
