use crate::core::{AppError, AppState};
use crate::entities::{TokenKind, User};
use crate::repositories::Read;
use axum::extract::State;
use axum::{
    Error,
    body::Body,
    extract::Request,
    http::{self, HeaderMap, Response},
    middleware::Next,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

// struct che codifica il contenuto del token jwt
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub user_id: i64,
    pub kind: TokenKind,
}

#[instrument(skip(secret), fields(user_id = %user_id, kind = ?kind))]
pub fn encode_jwt(
    user_id: i64,
    kind: TokenKind,
    ttl: Duration,
    secret: &str,
) -> Result<String, Error> {
    debug!("Encoding JWT token for user");
    let now = Utc::now();
    let exp: usize = (now + ttl).timestamp() as usize;
    let iat: usize = now.timestamp() as usize;
    let claim = Claims {
        iat,
        exp,
        user_id,
        kind,
    };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map(|token| {
        debug!("JWT token encoded successfully");
        token
    })
    .map_err(|e| {
        error!("Failed to encode JWT token: {:?}", e);
        Error::new("Error in encoding jwt token")
    })
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(jwt_token: &str, secret: &str) -> Result<TokenData<Claims>, Error> {
    debug!("Decoding JWT token");
    decode::<Claims>(
        jwt_token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| {
        debug!("JWT token decoded successfully for user: {}", data.claims.user_id);
        data
    })
    .map_err(|e| {
        warn!("Failed to decode JWT token: {:?}", e);
        Error::new("Error in decoding jwt token")
    })
}

/// Emette la coppia (access, refresh) per l'utente
pub fn issue_tokens(state: &AppState, user_id: i64) -> Result<(String, String), AppError> {
    let access = encode_jwt(user_id, TokenKind::Access, state.access_ttl, &state.jwt_secret)
        .map_err(|_| AppError::internal_server_error("Failed to create token"))?;
    let refresh = encode_jwt(user_id, TokenKind::Refresh, state.refresh_ttl, &state.jwt_secret)
        .map_err(|_| AppError::internal_server_error("Failed to create token"))?;
    Ok((access, refresh))
}

/// Estrae il token da un header nella forma `Bearer <token>`
fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Some(token),
        _ => None,
    }
}

/// Risolve l'utente dall'header `Authorization: Bearer <access token>`
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    let auth_header = match headers.get(http::header::AUTHORIZATION) {
        Some(header) => header.to_str().map_err(|_| {
            warn!("Invalid authorization header format");
            AppError::unauthorized("Unauthorized")
        })?,
        None => {
            warn!("Missing authorization header");
            return Err(AppError::unauthorized("Unauthorized"));
        }
    };

    let token = bearer_token(auth_header).ok_or_else(|| {
        warn!("Authorization header is not a bearer token");
        AppError::unauthorized("Unauthorized")
    })?;

    let token_data = decode_jwt(token, &state.jwt_secret)
        .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

    // il refresh token non apre le rotte protette
    if token_data.claims.kind != TokenKind::Access {
        warn!("Refresh token used as access token");
        return Err(AppError::unauthorized("Invalid or expired token"));
    }

    // Fetch the user details from the database
    match state.user.read(&token_data.claims.user_id).await? {
        Some(user) => {
            debug!("User authenticated: {}", user.username);
            Ok(user)
        }
        None => {
            warn!("User not found in database: {}", token_data.claims.user_id);
            Err(AppError::unauthorized("Unauthorized"))
        }
    }
}

#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let current_user = authenticate(&state, req.headers()).await?;
    req.extensions_mut().insert(current_user);
    // l'handler recupera lo user da Extension
    Ok(next.run(req).await)
}

/// Le rotte di gestione inviti sono riservate agli amministratori
pub fn require_admin(user: &User) -> Result<(), AppError> {
    if !user.is_admin {
        warn!("User {} is not an admin", user.id);
        return Err(AppError::forbidden("Admin access required"));
    }
    info!("Admin check passed for user {}", user.id);
    Ok(())
}
