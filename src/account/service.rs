//! Signup, login and profile operations over the role collections.

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, to_document, Document};
use strum::IntoEnumIterator;
use tracing::{info, instrument, warn};

use crate::error::{ApiError, Resource};
use crate::metrics;
use crate::store::{id_filter, id_to_string, DocumentStore, Role};
use crate::utils::{parse_object_id, timestamp_now};

use super::types::{LoginRequest, LoginResponse, ProfileUpdate, SignupRequest, SignupResponse};

/// Account operations. Cheap to clone.
#[derive(Clone)]
pub struct Accounts {
    store: Arc<dyn DocumentStore>,
}

impl Accounts {
    /// Create account operations over `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Register an account in the role's collection.
    ///
    /// Email uniqueness is checked within that collection only; a farmer and a
    /// landowner may share an email.
    #[instrument(skip(self, request), fields(role = %request.role))]
    pub async fn signup(&self, request: SignupRequest) -> Result<SignupResponse, ApiError> {
        let collection = request.role.collection();

        let existing = self
            .store
            .find_one(collection, doc! { "email": request.email.as_str() })
            .await?;
        if existing.is_some() {
            warn!("Signup rejected: email already registered");
            metrics::increment(metrics::METRIC_SIGNUP_CONFLICTS);
            return Err(ApiError::EmailExists);
        }

        let now = timestamp_now();
        let mut document = to_document(&request)?;
        document.insert("created_at", now.clone());
        document.insert("updated_at", now);

        let inserted = self.store.insert_one(collection, document).await?;
        let user_id = id_to_string(&inserted);
        info!(%user_id, "Account created");
        metrics::increment(metrics::METRIC_SIGNUPS);

        Ok(SignupResponse {
            message: "Signup successful".to_string(),
            role: request.role,
            user_id,
            email: request.email,
            full_name: request.full_name,
        })
    }

    /// Find the account with an exact email/password match, farmers first.
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        for role in Role::iter() {
            let filter = doc! {
                "email": request.email.as_str(),
                "password": request.password.as_str(),
            };
            if let Some(user) = self.store.find_one(role.collection(), filter).await? {
                let user_id = user
                    .get("_id")
                    .map(id_to_string)
                    .unwrap_or_default();
                info!(%user_id, %role, "Login successful");
                metrics::increment(metrics::METRIC_LOGINS);

                return Ok(LoginResponse {
                    message: "Login successful".to_string(),
                    role,
                    full_name: user.get_str("full_name").ok().map(String::from),
                    email: user.get_str("email").ok().map(String::from),
                    user_id: user_id.clone(),
                    id: user_id,
                });
            }
        }

        warn!("Login failed: invalid credentials");
        metrics::increment(metrics::METRIC_LOGIN_FAILURES);
        Err(ApiError::InvalidCredentials)
    }

    /// Fetch an account document by identifier from whichever role holds it.
    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: &str) -> Result<Document, ApiError> {
        let id = parse_object_id(user_id, Resource::Profile)?;
        match self.locate(id).await? {
            Some((_, user)) => Ok(user),
            None => Err(ApiError::NotFound(Resource::Profile)),
        }
    }

    /// Merge the provided fields into the account and return the result.
    #[instrument(skip(self, update))]
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<Document, ApiError> {
        let id = parse_object_id(user_id, Resource::Profile)?;
        let Some((role, _)) = self.locate(id).await? else {
            return Err(ApiError::NotFound(Resource::Profile));
        };

        let mut set = to_document(&update)?;
        set.insert("updated_at", timestamp_now());
        self.store.update_one(role.collection(), id, set).await?;

        let updated = self
            .store
            .find_one(role.collection(), id_filter(id))
            .await?
            .ok_or(ApiError::NotFound(Resource::Profile))?;
        info!(%role, "Profile updated");
        Ok(updated)
    }

    /// Search each role collection in turn for `id`.
    async fn locate(&self, id: ObjectId) -> Result<Option<(Role, Document)>, ApiError> {
        for role in Role::iter() {
            if let Some(user) = self.store.find_one(role.collection(), id_filter(id)).await? {
                return Ok(Some((role, user)));
            }
        }
        Ok(None)
    }
}
