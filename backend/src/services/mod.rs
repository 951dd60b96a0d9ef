pub mod backend_client;
pub mod classification_run;
pub mod classification_stats;
pub mod document_filter;
pub mod storage;
pub mod storage_stats;
pub mod taxonomy;
pub mod upload_policy;
