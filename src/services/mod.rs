pub mod chat_service;
pub mod html;
pub mod job_aggregator;
pub mod local_jobs_service;
pub mod remote_jobs_service;
pub mod response_cache;
pub mod user_directory;

#[cfg(test)]
pub mod test_support;
