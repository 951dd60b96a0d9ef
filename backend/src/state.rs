use crate::config::AppConfig;
use crate::db::models::document::DocumentRepository;
use crate::services::backend_client::BackendClient;
use crate::services::classification_run::ClassificationSession;
use crate::services::storage::StorageService;
use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub document_repo: DocumentRepository,
    pub backend: BackendClient,
    pub storage: StorageService,
    pub classification: Arc<ClassificationSession>,
}

impl AppState {
    pub fn new(config: AppConfig, db: PgPool) -> Result<Self> {
        let backend = BackendClient::new(&config.backend)?;
        let storage = StorageService::new(&config.storage)?;
        let classification = Arc::new(ClassificationSession::new(&config.classify));

        Ok(Self {
            config: Arc::new(config),
            document_repo: DocumentRepository::new(db),
            backend,
            storage,
            classification,
        })
    }
}
