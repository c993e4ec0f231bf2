use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use codegate_auth_types::identity::AdminIdentity;

use crate::error::ActivationServiceError;
use crate::state::AppState;
use crate::usecase::admin::{
    ChangePasswordInput, ChangePasswordUseCase, LoginInput, LoginUseCase,
};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ActivationServiceError> {
    let usecase = LoginUseCase {
        admins: state.admin_repo(),
        tokens: state.tokens.clone(),
    };
    let issued = usecase
        .execute(LoginInput {
            username: body.username,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_owned(),
        token: issued.token,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

pub async fn change_password(
    State(state): State<AppState>,
    admin: AdminIdentity,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<Value>, ActivationServiceError> {
    let usecase = ChangePasswordUseCase {
        admins: state.admin_repo(),
    };
    usecase
        .execute(ChangePasswordInput {
            username: admin.username,
            old_password: body.old_password,
            new_password: body.new_password,
        })
        .await?;
    Ok(Json(json!({ "message": "Password changed successfully" })))
}
