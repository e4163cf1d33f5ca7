use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        upload::{DeleteUploadQuery, UploadDto},
    },
    server::{
        error::AppError,
        middleware::auth::AdminUser,
        model::{log::ClientInfo, user::User},
        service::{
            storage::{StoredObject, UploadKind},
            upload::UploadService,
        },
        state::AppState,
    },
};

/// Tag for grouping upload endpoints in OpenAPI documentation
pub static UPLOAD_TAG: &str = "upload";

/// Multipart field holding the file.
const FILE_FIELD: &str = "file";

/// A file read out of a multipart body.
struct FilePart {
    file_name: Option<String>,
    content_type: String,
    bytes: Vec<u8>,
}

/// Reads the `file` field of a multipart body, ignoring any other fields.
async fn read_file(mut multipart: Multipart) -> Result<FilePart, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e.body_text())))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e.body_text())))?;

        return Ok(FilePart {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(AppError::invalid_field(FILE_FIELD, "is required"))
}

async fn store(
    state: &AppState,
    admin: &User,
    client: &ClientInfo,
    kind: UploadKind,
    multipart: Multipart,
) -> Result<StoredObject, AppError> {
    let file = read_file(multipart).await?;

    UploadService::new(&state.db, &state.storage)
        .upload(
            admin,
            kind,
            file.file_name,
            &file.content_type,
            file.bytes,
            client,
        )
        .await
}

fn into_dto(stored: StoredObject) -> UploadDto {
    UploadDto {
        url: stored.url,
        key: stored.key,
        size: stored.size,
        content_type: stored.content_type,
    }
}

/// Upload a book cover image.
///
/// Accepts JPEG, PNG, WebP or GIF up to 5 MB in multipart field `file`.
///
/// # Access Control
/// - `Admin` - Only admins can upload files
///
/// # Returns
/// - `201 Created` - Public URL, key, size and content type of the stored object
/// - `400 Bad Request` - Unsupported content type or file too large
/// - `422 Unprocessable Entity` - No `file` field
#[utoipa::path(
    post,
    path = "/api/v1/upload/cover",
    tag = UPLOAD_TAG,
    request_body(content_type = "multipart/form-data", description = "Field `file` holding the image"),
    responses(
        (status = 201, description = "Cover stored", body = UploadDto),
        (status = 400, description = "Unsupported or oversized file", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 422, description = "Missing file field", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn upload_cover(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let stored = store(&state, &admin, &client, UploadKind::Cover, multipart).await?;

    Ok((StatusCode::CREATED, Json(into_dto(stored))))
}

/// Upload a book PDF (up to 50 MB).
#[utoipa::path(
    post,
    path = "/api/v1/upload/pdf",
    tag = UPLOAD_TAG,
    request_body(content_type = "multipart/form-data", description = "Field `file` holding the PDF"),
    responses(
        (status = 201, description = "PDF stored", body = UploadDto),
        (status = 400, description = "Unsupported or oversized file", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn upload_pdf(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let stored = store(&state, &admin, &client, UploadKind::Pdf, multipart).await?;

    Ok((StatusCode::CREATED, Json(into_dto(stored))))
}

/// Upload a book EPUB (up to 50 MB).
#[utoipa::path(
    post,
    path = "/api/v1/upload/epub",
    tag = UPLOAD_TAG,
    request_body(content_type = "multipart/form-data", description = "Field `file` holding the EPUB"),
    responses(
        (status = 201, description = "EPUB stored", body = UploadDto),
        (status = 400, description = "Unsupported or oversized file", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn upload_epub(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let stored = store(&state, &admin, &client, UploadKind::Epub, multipart).await?;

    Ok((StatusCode::CREATED, Json(into_dto(stored))))
}

/// Delete a stored file by its public URL.
///
/// # Access Control
/// - `Admin` - Only admins can delete files
///
/// # Returns
/// - `204 No Content` - Object deleted
/// - `400 Bad Request` - URL does not point into the configured bucket
#[utoipa::path(
    delete,
    path = "/api/v1/upload",
    tag = UPLOAD_TAG,
    params(DeleteUploadQuery),
    responses(
        (status = 204, description = "File deleted"),
        (status = 400, description = "URL outside the bucket", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_upload(
    State(state): State<AppState>,
    client: ClientInfo,
    AdminUser(admin): AdminUser,
    Query(query): Query<DeleteUploadQuery>,
) -> Result<impl IntoResponse, AppError> {
    UploadService::new(&state.db, &state.storage)
        .delete(&admin, &query.url, &client)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
