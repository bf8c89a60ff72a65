use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::{
    error::ApiError,
    response::Envelope,
    state::AppState,
    users::{
        dto::UpdateUserRequest,
        extractors::UserId,
        repo::{NewUser, User},
        services::{
            email_change_needs_uniqueness_check, payload_is_empty, require_field, validate_email,
        },
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/user", get(list_users).post(create_user))
        .route(
            "/user/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Storage failures on the create/update paths surface as a client error
/// with detail; only read/delete paths report them as 500.
fn write_failure(e: sqlx::Error) -> ApiError {
    ApiError::BadRequest(e.to_string())
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<User>>>, ApiError> {
    let users = User::list_all(&state.db).await?;
    Ok(Json(Envelope::success(users, "Users fetched successfully")))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Json<Envelope<User>>, ApiError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    Ok(Json(Envelope::success(user, "User fetched successfully")))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Envelope<User>>), ApiError> {
    let data = match payload {
        Some(Json(data)) => data,
        None => Value::Null,
    };
    if payload_is_empty(&data) {
        warn!("create with empty payload");
        return Err(ApiError::Validation("Empty payload received".into()));
    }

    if let Some(email) = data.get("email") {
        validate_email(email.as_str().unwrap_or_default()).map_err(|e| {
            warn!(email = %email, "invalid email");
            e
        })?;
    }

    // Uniqueness check and insert share one transaction; the schema-level
    // UNIQUE constraint backstops the remaining race window.
    let mut tx = state.db.begin().await.map_err(write_failure)?;

    let email = require_field(&data, "email")?;
    if User::find_by_email(&mut *tx, &email)
        .await
        .map_err(write_failure)?
        .is_some()
    {
        warn!(%email, "email already exists");
        return Err(ApiError::Conflict("Email already exists".into()));
    }

    let new_user = NewUser {
        first_name: require_field(&data, "first_name")?,
        last_name: require_field(&data, "last_name")?,
        email,
        password: require_field(&data, "password")?,
        mobile_number: require_field(&data, "mobile_number")?,
    };
    let user = User::insert(&mut *tx, &new_user)
        .await
        .map_err(write_failure)?;
    tx.commit().await.map_err(write_failure)?;

    info!(user_id = user.id, email = %user.email, "user created");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(user, "User created successfully")),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    payload: Option<Json<UpdateUserRequest>>,
) -> Result<Json<Envelope<User>>, ApiError> {
    let mut tx = state.db.begin().await.map_err(write_failure)?;

    let mut user = User::find_by_id(&mut *tx, id)
        .await
        .map_err(write_failure)?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let Some(Json(payload)) = payload else {
        return Err(ApiError::BadRequest("invalid or missing JSON body".into()));
    };

    if let Some(email) = payload.email.as_deref() {
        validate_email(email).map_err(|e| {
            warn!(user_id = id, %email, "invalid email");
            e
        })?;
        // Updating to the row's own current email is not a conflict.
        if email_change_needs_uniqueness_check(email, &user.email)
            && User::find_by_email(&mut *tx, email)
                .await
                .map_err(write_failure)?
                .is_some()
        {
            warn!(user_id = id, %email, "email already exists");
            return Err(ApiError::Conflict("Email already exists".into()));
        }
    }

    payload.apply_to(&mut user);
    let user = User::update(&mut *tx, &user).await.map_err(write_failure)?;
    tx.commit().await.map_err(write_failure)?;

    info!(user_id = user.id, "user updated");
    Ok(Json(Envelope::success(user, "User updated successfully")))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Json<Envelope<Value>>, ApiError> {
    let deleted = User::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("User not found".into()));
    }

    info!(user_id = id, "user deleted");
    Ok(Json(Envelope::success(
        json!({}),
        "User deleted successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    // The lazy pool never connects; these tests only cover paths that
    // reject before the first query.
    fn test_state() -> AppState {
        AppState::fake()
    }

    #[tokio::test]
    async fn create_rejects_empty_payload() {
        let err = create_user(State(test_state()), Some(Json(json!({}))))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(msg) if msg == "Empty payload received"
        ));
    }

    #[tokio::test]
    async fn create_rejects_absent_body() {
        let err = create_user(State(test_state()), None).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(msg) if msg == "Empty payload received"
        ));
    }

    #[tokio::test]
    async fn create_rejects_email_without_at_sign() {
        let payload = json!({
            "first_name": "NewFirstName",
            "last_name": "NewLastName",
            "email": "madhu",
            "password": "NewPassword123",
            "mobile_number": "912345912345",
        });
        let err = create_user(State(test_state()), Some(Json(payload)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(msg) if msg == "Invalid email address"
        ));
    }

    #[tokio::test]
    async fn create_rejects_falsy_non_object_bodies() {
        for body in [json!([]), json!(""), json!(0), json!(false)] {
            let err = create_user(State(test_state()), Some(Json(body)))
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                ApiError::Validation(msg) if msg == "Empty payload received"
            ));
        }
    }

    #[tokio::test]
    async fn create_rejects_non_string_email() {
        let payload = json!({"email": 42, "first_name": "NewFirstName"});
        let err = create_user(State(test_state()), Some(Json(payload)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
