//! JSON REST handlers for substations.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::Value;

use substations_app::ports::SubstationRepository;
use substations_domain::derivation::SubstationReport;
use substations_domain::listing::{Page, PageRequest};
use substations_domain::substation::{RawNumber, SubstationDraft};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a substation.
///
/// Any JSON object is accepted; each field keeps whatever JSON value was sent
/// so that a wrongly typed field is reported by the validator, in field order,
/// instead of failing the whole body. Unknown fields (including any
/// client-supplied `estimated_load`) are ignored.
#[derive(Deserialize)]
pub struct CreateSubstationRequest {
    pub address: Option<Value>,
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    pub apartments_count: Option<Value>,
    pub power: Option<Value>,
    pub last_repair_date: Option<Value>,
}

/// Strings pass through; any other JSON value counts as missing.
fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text),
        _ => None,
    }
}

/// Numbers and numeric-looking strings are handed to the validator; any
/// other JSON value counts as missing.
fn number(value: Option<Value>) -> Option<RawNumber> {
    match value? {
        Value::Number(n) => n.as_f64().map(RawNumber::Number),
        Value::String(text) => Some(RawNumber::Text(text)),
        _ => None,
    }
}

impl From<CreateSubstationRequest> for SubstationDraft {
    fn from(req: CreateSubstationRequest) -> Self {
        Self {
            address: text(req.address),
            kind: text(req.kind),
            apartments_count: number(req.apartments_count),
            power: number(req.power),
            last_repair_date: text(req.last_repair_date),
        }
    }
}

/// Query parameters for the list endpoint.
#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl From<ListQuery> for PageRequest {
    fn from(query: ListQuery) -> Self {
        Self {
            search: query.search,
            kind: query.kind,
            page: query.page,
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Page<SubstationReport>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<SubstationReport>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/substations?page=&search=&type=`
pub async fn list<R>(
    State(state): State<AppState<R>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<ListResponse, ApiError>
where
    R: SubstationRepository + Send + Sync + 'static,
{
    let Query(query) = query?;
    let request = PageRequest::from(query);
    let page = state
        .substation_service
        .list_substations(&request)
        .await
        .map_err(ApiError::loading)?;
    Ok(ListResponse::Ok(Json(page)))
}

/// `POST /api/substations`
pub async fn create<R>(
    State(state): State<AppState<R>>,
    payload: Result<Json<CreateSubstationRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    R: SubstationRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let created = state
        .substation_service
        .create_substation(req.into())
        .await
        .map_err(ApiError::saving)?;
    Ok(CreateResponse::Created(Json(created)))
}
