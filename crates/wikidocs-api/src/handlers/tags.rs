//! Tag CRUD handlers.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;

use wikidocs_core::types::pagination::PageResponse;
use wikidocs_service::tag::{CreateTagRequest, TagQuery, TagResponse, UpdateTagRequest};

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

use super::{parse_part_name, parse_sort_order, parse_u64, request_context};

fn query_from_params(params: &HashMap<String, String>) -> Result<TagQuery, ApiError> {
    Ok(TagQuery {
        page: parse_u64(params, "page")?,
        page_size: parse_u64(params, "page_size")?,
        sorting: parse_sort_order(params)?,
        part_name: parse_part_name(params),
    })
}

/// GET /api/tags
pub async fn list_tags(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ApiResponse<PageResponse<TagResponse>>>, ApiError> {
    let query = query_from_params(&params)?;
    let page = state.tag_service.get_paged(&query).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/tags/all
pub async fn list_all_tags(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ApiResponse<Vec<TagResponse>>>, ApiError> {
    let query = query_from_params(&params)?;
    let tags = state.tag_service.get_many(&query).await?;
    Ok(Json(ApiResponse::ok(tags)))
}

/// GET /api/tags/{id}
pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<TagResponse>>, ApiError> {
    let tag = state.tag_service.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok(tag)))
}

/// POST /api/tags
pub async fn create_tag(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateTagRequest>,
) -> Result<Json<ApiResponse<TagResponse>>, ApiError> {
    let ctx = request_context(&headers);
    let tag = state.tag_service.create(&ctx, req).await?;
    Ok(Json(ApiResponse::created(tag)))
}

/// PUT /api/tags/{id}
pub async fn update_tag(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(req): Json<UpdateTagRequest>,
) -> Result<Json<ApiResponse<TagResponse>>, ApiError> {
    let ctx = request_context(&headers);
    let tag = state.tag_service.update(&ctx, id, req).await?;
    Ok(Json(ApiResponse::ok(tag)))
}

/// DELETE /api/tags/{id}
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.tag_service.delete_by_id(id).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// GET /api/tags/{id}/exists
pub async fn tag_exists(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let exists = state.tag_service.exists(id).await?;
    Ok(Json(ApiResponse::ok(exists)))
}
