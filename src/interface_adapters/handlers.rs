use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::domain::entities::{
    Decision, ManagerId, ManagerIdentity, RequestId, TimeOffRequest, TimeOffRequestForm,
};
use crate::domain::errors::{AuthError, DecisionError, SubmissionError};
use crate::interface_adapters::protocol::{
    ApiResponse, HealthResponse, LoginRequest, LogoutView, ManagerPublicView,
    ManagerSessionView, RootResponse,
};
use crate::interface_adapters::state::{AppState, StorageBackend};
use crate::use_cases::authenticate::AuthenticateUseCase;
use crate::use_cases::decide_request::DecideRequestUseCase;
use crate::use_cases::list_requests::ListRequestsUseCase;
use crate::use_cases::login::LoginUseCase;
use crate::use_cases::logout::LogoutUseCase;
use crate::use_cases::lookup_manager::LookupManagerUseCase;
use crate::use_cases::submit_request::SubmitRequestUseCase;

type ApiError = (StatusCode, Json<ApiResponse<()>>);

const AUTH_REQUIRED: &str = "Authentication required";
const INTERNAL_ERROR: &str = "Internal server error";
const INVALID_BODY: &str = "Invalid request body";

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Time Off System API",
    })
}

// Liveness plus a storage round-trip.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, database) = match state.requests.ping().await {
        Ok(()) => match state.storage {
            StorageBackend::Postgres => ("healthy", "connected"),
            StorageBackend::InMemory => ("healthy", "in-memory"),
        },
        Err(error) => {
            tracing::warn!(%error, "health check storage ping failed");
            ("unhealthy", "disconnected")
        }
    };

    Json(HealthResponse {
        status,
        service: "time-off-api",
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}

// Handler for manager login; issues the session cookie.
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(reject_body)?;

    let use_case = LoginUseCase {
        directory: state.managers.clone(),
        store: state.sessions.clone(),
    };
    let result = use_case.execute(payload).await.map_err(map_auth_error)?;

    tracing::info!(manager_id = result.session.manager.id, "manager logged in");
    let cookie = state.cookies.session_cookie(&result.token);
    Ok((
        [(SET_COOKIE, cookie)],
        Json(ApiResponse::ok_with_message(
            ManagerSessionView::from(result.session.manager),
            "Login successful",
        )),
    ))
}

// Handler for manager logout; always expires the cookie.
#[tracing::instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let raw = cookie_header(&headers);
    let header = raw
        .as_deref()
        .and_then(|raw| std::str::from_utf8(raw).ok());

    let use_case = LogoutUseCase {
        store: state.sessions.clone(),
    };
    let result = use_case.execute(header).await.map_err(map_auth_error)?;

    Ok((
        [(SET_COOKIE, state.cookies.expired_cookie())],
        Json(ApiResponse::ok_with_message(
            LogoutView {
                revoked: result.revoked,
            },
            "Logout successful",
        )),
    ))
}

#[tracing::instrument(skip_all)]
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<ManagerSessionView>>, ApiError> {
    let manager = require_manager(&state, &headers).await?;
    Ok(Json(ApiResponse::ok(ManagerSessionView::from(manager))))
}

#[tracing::instrument(skip_all)]
pub async fn list_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<TimeOffRequest>>>, ApiError> {
    let manager = require_manager(&state, &headers).await?;

    let use_case = ListRequestsUseCase {
        requests: state.requests.clone(),
    };
    let requests = use_case.execute(&manager).await.map_err(|error| {
        tracing::error!(%error, "listing requests failed");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
    })?;

    Ok(Json(ApiResponse::ok(requests)))
}

#[tracing::instrument(skip_all, fields(request_id = %id))]
pub async fn approve_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<TimeOffRequest>>, ApiError> {
    decide(state, headers, &id, Decision::Approve).await
}

#[tracing::instrument(skip_all, fields(request_id = %id))]
pub async fn deny_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<TimeOffRequest>>, ApiError> {
    decide(state, headers, &id, Decision::Deny).await
}

async fn decide(
    state: AppState,
    headers: HeaderMap,
    raw_id: &str,
    decision: Decision,
) -> Result<Json<ApiResponse<TimeOffRequest>>, ApiError> {
    let manager = require_manager(&state, &headers).await?;
    let id: RequestId = raw_id
        .parse()
        .map_err(|_| map_decision_error(DecisionError::NotFound))?;

    let use_case = DecideRequestUseCase {
        clock: state.clock.clone(),
        requests: state.requests.clone(),
    };
    let request = use_case
        .execute(&manager, id, decision)
        .await
        .map_err(map_decision_error)?;

    let message = match decision {
        Decision::Approve => "Request approved",
        Decision::Deny => "Request denied",
    };
    Ok(Json(ApiResponse::ok_with_message(request, message)))
}

// Public QR-code lookup; exposes only the manager's id and name.
#[tracing::instrument(skip_all, fields(manager_id = %id))]
pub async fn lookup_manager(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ManagerPublicView>>, ApiError> {
    let not_found = || error_response(StatusCode::NOT_FOUND, "Manager not found");
    let id: ManagerId = id.parse().map_err(|_| not_found())?;

    let use_case = LookupManagerUseCase {
        directory: state.managers.clone(),
    };
    let manager = use_case
        .execute(id)
        .await
        .map_err(|error| {
            tracing::error!(%error, "manager lookup failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        })?
        .ok_or_else(not_found)?;

    Ok(Json(ApiResponse::ok(ManagerPublicView {
        id: manager.id,
        name: manager.name,
    })))
}

// Public submission endpoint; no session required.
#[tracing::instrument(skip_all)]
pub async fn submit_request(
    State(state): State<AppState>,
    payload: Result<Json<TimeOffRequestForm>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(form) = payload.map_err(reject_body)?;

    let use_case = SubmitRequestUseCase {
        clock: state.clock.clone(),
        directory: state.managers.clone(),
        requests: state.requests.clone(),
    };
    let request = use_case.execute(form).await.map_err(map_submission_error)?;

    tracing::info!(
        request_id = request.id,
        manager_id = request.manager_id,
        "time-off request submitted"
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            request,
            "Time off request submitted successfully",
        )),
    ))
}

// Runs the authentication gate and turns a negative verdict into a 401.
async fn require_manager(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<ManagerIdentity, ApiError> {
    let use_case = AuthenticateUseCase {
        store: state.sessions.clone(),
    };
    let header = cookie_header(headers);
    let verdict = use_case.execute(header.as_deref()).await;

    match verdict.session {
        Some(manager) if verdict.authenticated => Ok(manager),
        _ => {
            tracing::debug!(reason = verdict.reason, "request not authenticated");
            Err(error_response(StatusCode::UNAUTHORIZED, AUTH_REQUIRED))
        }
    }
}

// HTTP/2 clients may split cookies across several headers.
fn cookie_header(headers: &HeaderMap) -> Option<Vec<u8>> {
    let mut values = headers.get_all(COOKIE).iter();
    let first = values.next()?;
    let mut joined = first.as_bytes().to_vec();
    for value in values {
        joined.extend_from_slice(b"; ");
        joined.extend_from_slice(value.as_bytes());
    }
    Some(joined)
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> ApiError {
    (status, Json(ApiResponse::failure(message)))
}

fn reject_body(rejection: JsonRejection) -> ApiError {
    tracing::debug!(error = %rejection.body_text(), "rejected request body");
    error_response(StatusCode::BAD_REQUEST, INVALID_BODY)
}

fn map_auth_error(err: AuthError) -> ApiError {
    match err {
        AuthError::MissingEmail | AuthError::InvalidEmail | AuthError::MissingPassword => {
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
        AuthError::InvalidCredentials => {
            error_response(StatusCode::UNAUTHORIZED, &err.to_string())
        }
        AuthError::StorageFailure => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        }
    }
}

fn map_submission_error(err: SubmissionError) -> ApiError {
    match err {
        SubmissionError::Invalid(_) | SubmissionError::UnknownManager => {
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
        SubmissionError::StorageFailure => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        }
    }
}

fn map_decision_error(err: DecisionError) -> ApiError {
    let status = match err {
        DecisionError::NotFound => StatusCode::NOT_FOUND,
        DecisionError::Forbidden => StatusCode::FORBIDDEN,
        DecisionError::AlreadyDecided(_) => StatusCode::CONFLICT,
        DecisionError::StorageFailure => {
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        }
    };
    error_response(status, &err.to_string())
}
