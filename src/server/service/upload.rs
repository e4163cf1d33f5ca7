use sea_orm::DatabaseConnection;

use crate::server::{
    error::AppError,
    model::{
        log::{AdminAction, AdminActivityLogParams, ClientInfo},
        user::User,
    },
    service::{
        log::LogService,
        storage::{StorageClient, StoredObject, UploadKind},
    },
};

pub struct UploadService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a StorageClient,
}

impl<'a> UploadService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a StorageClient) -> Self {
        Self { db, storage }
    }

    /// Stores a file and records the upload against the admin.
    ///
    /// # Arguments
    /// - `admin` - Uploading admin
    /// - `kind` - Cover, PDF or EPUB
    /// - `file_name` - Client-side name, kept in the log only
    /// - `content_type` - MIME type of the multipart field
    /// - `bytes` - File contents
    pub async fn upload(
        &self,
        admin: &User,
        kind: UploadKind,
        file_name: Option<String>,
        content_type: &str,
        bytes: Vec<u8>,
        client: &ClientInfo,
    ) -> Result<StoredObject, AppError> {
        let stored = self.storage.upload(kind, content_type, bytes).await?;

        LogService::new(self.db)
            .record_admin_activity(
                AdminActivityLogParams::new(admin.id, AdminAction::Upload, kind.folder(), client)
                    .resource_id(&stored.key)
                    .details(serde_json::json!({
                        "file_name": file_name,
                        "content_type": stored.content_type,
                        "size": stored.size,
                        "url": stored.url,
                    })),
            )
            .await;

        Ok(stored)
    }

    /// Deletes a stored file by its public URL.
    pub async fn delete(&self, admin: &User, url: &str, client: &ClientInfo) -> Result<(), AppError> {
        let key = self.storage.delete(url).await?;

        LogService::new(self.db)
            .record_admin_activity(
                AdminActivityLogParams::new(admin.id, AdminAction::Delete, "upload", client)
                    .resource_id(key)
                    .details(serde_json::json!({ "url": url })),
            )
            .await;

        Ok(())
    }
}
