//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, health, items, loans, users};
use crate::error::ErrorResponse;
use crate::models::{
    item::{CreateItem, UpdateItem},
    loan::{CheckInRequest, CheckOutRequest},
    user::{
        ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateContactRequest, UserProfile,
    },
    Item, Loan, Role,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.3.0",
        description = "Library Circulation System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::change_password,
        auth::update_profile,
        // Items
        items::list_items,
        items::get_item,
        items::create_item,
        items::update_item,
        items::delete_item,
        items::export_items,
        // Loans
        loans::check_out,
        loans::check_in,
        users::get_user_loans,
        // Users
        users::list_users,
        users::get_user,
        users::delete_user,
    ),
    components(schemas(
        health::HealthResponse,
        ErrorResponse,
        Item,
        CreateItem,
        UpdateItem,
        Loan,
        CheckOutRequest,
        CheckInRequest,
        Role,
        UserProfile,
        LoginRequest,
        RegisterRequest,
        ChangePasswordRequest,
        UpdateContactRequest,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Credential verification and accounts"),
        (name = "items", description = "Catalog management"),
        (name = "loans", description = "Circulation"),
        (name = "users", description = "Holder accounts")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router serving the OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
