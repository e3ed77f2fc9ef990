//! OpenAPI document served at `/api-docs/openapi.json`.

use utoipa::OpenApi;

use crate::account::{LoginRequest, LoginResponse, ProfileUpdate, SignupRequest, SignupResponse};
use crate::error::ErrorBody;
use crate::form::FormSubmission;
use crate::land::{LandUpdate, NewLand};
use crate::store::Role;

use super::handlers::{self, MessageResponse};

/// OpenAPI description of the public endpoints.
#[derive(OpenApi)]
#[openapi(
    info(title = "Farmland API", description = "Farmer/landowner accounts and land listings"),
    paths(
        handlers::signup,
        handlers::login,
        handlers::get_profile,
        handlers::update_profile,
        handlers::list_lands,
        handlers::list_user_lands,
        handlers::create_land,
        handlers::update_land,
        handlers::delete_land,
        handlers::store_form,
    ),
    components(schemas(
        SignupRequest,
        SignupResponse,
        LoginRequest,
        LoginResponse,
        ProfileUpdate,
        NewLand,
        LandUpdate,
        FormSubmission,
        MessageResponse,
        ErrorBody,
        Role,
    )),
    tags(
        (name = "accounts", description = "Signup, login and profiles"),
        (name = "lands", description = "Land listings"),
        (name = "forms", description = "Free-form submissions"),
    )
)]
pub struct ApiDoc;
