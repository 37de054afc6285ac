use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    Path, State,
};
use axum::Json;
use serde::Deserialize;

use crate::database::Study;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;

/// Body of `POST /studies`. Fields are optional here so a missing `name`
/// becomes a field-level validation error instead of a generic parse failure.
#[derive(Debug, Deserialize)]
pub struct CreateStudyRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CreateStudyRequest {
    pub fn into_study(self) -> Result<Study, ApiError> {
        if self.id.is_some() {
            return Err(ApiError::bad_request("Field 'id' is assigned by the server and cannot be set"));
        }
        let name = self.name.ok_or_else(|| ApiError::missing_field("name"))?;
        Ok(Study::new(name, self.description))
    }
}

/// POST /studies - Persist a new study and return it with its id
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateStudyRequest>, JsonRejection>,
) -> ApiResult<Study> {
    let Json(request) = payload?;
    let study = request.into_study()?;

    let saved = state.studies.save(study).await?;
    tracing::info!(id = ?saved.id, "Created study");

    Ok(ApiResponse::created(saved))
}

/// GET /studies - List every study
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Study>> {
    let studies = state.studies.find_all().await?;
    Ok(ApiResponse::success(studies))
}

/// DELETE /studies/:id - Remove a study; unknown ids still answer 204
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    state.studies.delete_by_id(id).await?;
    tracing::info!(id, "Deleted study");

    Ok(ApiResponse::no_content())
}
