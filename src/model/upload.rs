use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadDto {
    /// Publicly readable URL of the stored object
    pub url: String,
    /// Object key inside the bucket
    pub key: String,
    pub size: usize,
    pub content_type: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteUploadQuery {
    /// Public URL previously returned by an upload endpoint
    pub url: String,
}
