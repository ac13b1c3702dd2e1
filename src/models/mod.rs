mod chat;
mod job;
mod system;

pub use chat::{ChatFeed, ChatMessage};
pub use job::{
    CombinedJobsPage, Job, JobSource, JobType, LocalJobsPage, RemoteJobsPage,
    LOCAL_SOURCE_LABEL, REMOTE_SOURCE_LABEL,
};
pub use system::{ApiIndex, HealthStatus};
