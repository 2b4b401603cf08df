use actix_web::{web, Either, HttpResponse};

use crate::database::Repository;
use crate::models::{LoginResponse, MessageResponse, UsernameRequest};
use crate::services::user_service;

type UsernameBody = Either<web::Json<UsernameRequest>, web::Form<UsernameRequest>>;

fn username_of(body: UsernameBody) -> Option<String> {
    match body {
        Either::Left(json) => json.into_inner().username,
        Either::Right(form) => form.into_inner().username,
    }
}

fn message(text: &str) -> MessageResponse {
    MessageResponse {
        message: text.to_string(),
    }
}

#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Users",
    request_body = UsernameRequest,
    responses(
        (status = 201, description = "User registered", body = MessageResponse),
        (status = 400, description = "Username already exists or missing", body = MessageResponse),
        (status = 500, description = "Failed to register user", body = MessageResponse)
    )
)]
pub async fn register(db: web::Data<dyn Repository>, body: UsernameBody) -> HttpResponse {
    let username = username_of(body);
    log::info!("📝 POST /api/register - username: {:?}", username);

    match user_service::register(db.get_ref(), username.as_deref()).await {
        Ok(user) => {
            log::info!("✅ User registered: {}", user.username);
            HttpResponse::Created().json(message("User registered successfully"))
        }
        Err(e) => {
            log::error!("❌ Error in register API: {}", e);
            HttpResponse::build(e.status_code())
                .json(message(e.client_message("Failed to register user")))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Users",
    request_body = UsernameRequest,
    responses(
        (status = 200, description = "Whether the username is registered", body = LoginResponse),
        (status = 500, description = "Failed to check username", body = MessageResponse)
    )
)]
pub async fn login(db: web::Data<dyn Repository>, body: UsernameBody) -> HttpResponse {
    let username = username_of(body);
    log::info!("🔐 POST /api/login - username: {:?}", username);

    match user_service::username_exists(db.get_ref(), username.as_deref()).await {
        Ok(exists) => HttpResponse::Ok().json(LoginResponse {
            message: if exists { "Username found" } else { "Username not found" }.to_string(),
            username_exists: exists,
        }),
        Err(e) => {
            log::error!("❌ Error in login API: {}", e);
            HttpResponse::build(e.status_code())
                .json(message(e.client_message("Failed to check username")))
        }
    }
}
