//! Authenticated user extracted from the identity cookie.
//!
//! Authentication itself lives in the external auth service; this application
//! only verifies the HS256 JWT it issued and exposes the claims to handlers.

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{Error, FromRequest, HttpRequest, web};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// JWT claims issued by the auth service for a dashboard user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    /// Subject: the user id at the auth service.
    pub sub: String,
    pub email: String,
    pub name: String,
    /// Tenant the user belongs to.
    pub company_id: i32,
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Decodes and verifies a JWT against the shared secret.
    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let data = decode::<AuthenticatedUser>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let result = (|| {
            let identity = Identity::from_request(req, payload)
                .into_inner()
                .map_err(|_| ErrorUnauthorized("not signed in"))?;
            let token = identity
                .id()
                .map_err(|_| ErrorUnauthorized("missing identity"))?;
            let config = req
                .app_data::<web::Data<ServerConfig>>()
                .ok_or_else(|| ErrorUnauthorized("server config missing"))?;
            AuthenticatedUser::from_jwt(&token, &config.secret).map_err(|e| {
                log::debug!("Failed to verify JWT: {e}");
                ErrorUnauthorized("invalid token")
            })
        })();

        std::future::ready(result)
    }
}
