use axum::{
    Json, Router,
    extract::State,
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::applications::get_application::GetApplication;
use crate::application::use_cases::applications::get_by_user::GetUserApplication;
use crate::application::use_cases::applications::list_applications::ListApplications;
use crate::application::use_cases::applications::submit::SubmitApplication;
use crate::application::use_cases::applications::update_status::UpdateApplicationStatus;
use crate::bootstrap::app_context::AppContext;
use crate::domain::applications::application as domain;
use crate::presentation::http::auth::{Authenticated, RequireAdmin};
use crate::presentation::http::error::{ApiError, ApiResult, ErrorBody};
use crate::presentation::http::extract::{ApiJson, ApiPath, ApiQuery};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EducationRecord {
    pub institution: String,
    pub degree: String,
    pub grad_year: String,
    pub percentage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentRef {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: String,
    pub program: String,
    pub previous_education: Vec<EducationRecord>,
    pub document_urls: Vec<DocumentRef>,
    pub statement: String,
    /// `UNDER_REVIEW`, `ACCEPTED` or `REJECTED`
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApplicationListResponse {
    pub items: Vec<ApplicationResponse>,
}

/// Owner and status are never read from the body.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitApplicationRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: String,
    pub program: String,
    pub previous_education: Vec<EducationRecord>,
    pub document_urls: Vec<DocumentRef>,
    pub statement: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: String,
}

impl From<domain::EducationRecord> for EducationRecord {
    fn from(e: domain::EducationRecord) -> Self {
        Self {
            institution: e.institution,
            degree: e.degree,
            grad_year: e.grad_year,
            percentage: e.percentage,
        }
    }
}

impl From<EducationRecord> for domain::EducationRecord {
    fn from(e: EducationRecord) -> Self {
        Self {
            institution: e.institution,
            degree: e.degree,
            grad_year: e.grad_year,
            percentage: e.percentage,
        }
    }
}

impl From<domain::Application> for ApplicationResponse {
    fn from(a: domain::Application) -> Self {
        let p = a.profile;
        Self {
            id: a.id,
            user_id: a.user_id,
            full_name: p.full_name,
            email: p.email,
            phone: p.phone,
            address: p.address,
            date_of_birth: p.date_of_birth,
            program: p.program,
            previous_education: p.previous_education.into_iter().map(Into::into).collect(),
            document_urls: p
                .document_urls
                .into_iter()
                .map(|d| DocumentRef {
                    name: d.name,
                    url: d.url,
                })
                .collect(),
            statement: p.statement,
            status: a.status.as_str().to_string(),
            created_at: a.created_at,
        }
    }
}

impl From<SubmitApplicationRequest> for domain::ApplicantProfile {
    fn from(req: SubmitApplicationRequest) -> Self {
        Self {
            full_name: req.full_name.trim().to_string(),
            email: req.email.trim().to_string(),
            phone: req.phone.trim().to_string(),
            address: req.address.trim().to_string(),
            date_of_birth: req.date_of_birth.trim().to_string(),
            program: req.program.trim().to_string(),
            previous_education: req
                .previous_education
                .into_iter()
                .map(Into::into)
                .collect(),
            document_urls: req
                .document_urls
                .into_iter()
                .map(|d| domain::DocumentRef {
                    name: d.name,
                    url: d.url,
                })
                .collect(),
            statement: req.statement,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/applications",
            get(list_applications).post(submit_application),
        )
        .route("/applications/user/:user_id", get(get_user_application))
        .route("/applications/:id", get(get_application))
        .route("/applications/:id/status", patch(update_status))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/applications", tag = "Applications", request_body = SubmitApplicationRequest,
    responses(
        (status = 200, body = ApplicationResponse),
        (status = 400, body = ErrorBody),
        (status = 401, body = ErrorBody),
        (status = 409, body = ErrorBody)
    ))]
pub async fn submit_application(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    ApiJson(req): ApiJson<SubmitApplicationRequest>,
) -> ApiResult<Json<ApplicationResponse>> {
    let applications = ctx.application_repo();
    let users = ctx.user_repo();
    let uc = SubmitApplication {
        applications: applications.as_ref(),
        users: users.as_ref(),
    };
    let application = uc.execute(&actor, req.into()).await?;
    Ok(Json(application.into()))
}

#[utoipa::path(get, path = "/api/applications/user/{user_id}", tag = "Applications",
    params(("user_id" = Uuid, Path, description = "Owning user ID")),
    responses(
        (status = 200, body = ApplicationResponse),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn get_user_application(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    ApiPath(user_id): ApiPath<Uuid>,
) -> ApiResult<Json<ApplicationResponse>> {
    let applications = ctx.application_repo();
    let uc = GetUserApplication {
        applications: applications.as_ref(),
    };
    let application = uc.execute(&actor, user_id).await?;
    Ok(Json(application.into()))
}

#[utoipa::path(get, path = "/api/applications/{id}", tag = "Applications",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, body = ApplicationResponse),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn get_application(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<ApplicationResponse>> {
    let applications = ctx.application_repo();
    let uc = GetApplication {
        applications: applications.as_ref(),
    };
    let application = uc.execute(&actor, id).await?;
    Ok(Json(application.into()))
}

#[utoipa::path(get, path = "/api/applications", tag = "Applications",
    responses(
        (status = 200, body = ApplicationListResponse),
        (status = 401, body = ErrorBody),
        (status = 403, body = ErrorBody)
    ))]
pub async fn list_applications(
    State(ctx): State<AppContext>,
    RequireAdmin(actor): RequireAdmin,
) -> ApiResult<Json<ApplicationListResponse>> {
    let applications = ctx.application_repo();
    let uc = ListApplications {
        applications: applications.as_ref(),
    };
    let items = uc
        .execute(&actor)
        .await?
        .into_iter()
        .map(ApplicationResponse::from)
        .collect();
    Ok(Json(ApplicationListResponse { items }))
}

#[utoipa::path(patch, path = "/api/applications/{id}/status", tag = "Applications",
    params(
        ("id" = Uuid, Path, description = "Application ID"),
        ("status" = String, Query, description = "UNDER_REVIEW, ACCEPTED or REJECTED")
    ),
    responses(
        (status = 200, body = ApplicationResponse),
        (status = 400, body = ErrorBody),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn update_status(
    State(ctx): State<AppContext>,
    RequireAdmin(actor): RequireAdmin,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(q): ApiQuery<StatusQuery>,
) -> ApiResult<Json<ApplicationResponse>> {
    let status: domain::ApplicationStatus = q
        .status
        .parse()
        .map_err(|e: domain::UnknownStatus| ApiError::BadRequest(e.to_string()))?;
    let applications = ctx.application_repo();
    let uc = UpdateApplicationStatus {
        applications: applications.as_ref(),
    };
    let application = uc.execute(&actor, id, status).await?;
    Ok(Json(application.into()))
}
