mod server;

use askama::Template;
use axum::{
    Router,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use http::StatusCode;

use otp_signin_axum::{AuthUser, OTP_ROUTE_PREFIX, OTP_SIGNIN_URL, init, otp_signin_router};

use crate::server::{init_tracing, spawn_http_server};

#[derive(Template)]
#[template(path = "index_user.j2")]
struct IndexUserTemplate<'a> {
    identifier: &'a str,
    otp_route_prefix: &'a str,
}

#[derive(Template)]
#[template(path = "index_anon.j2")]
struct IndexAnonTemplate<'a> {
    signin_url: &'a str,
}

async fn index(user: Option<AuthUser>) -> Result<Response, (StatusCode, String)> {
    let rendered = match user {
        Some(user) => IndexUserTemplate {
            identifier: &user.identifier,
            otp_route_prefix: OTP_ROUTE_PREFIX.as_str(),
        }
        .render(),
        None => IndexAnonTemplate {
            signin_url: OTP_SIGNIN_URL.as_str(),
        }
        .render(),
    };
    let html = rendered.map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Html(html).into_response())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing("demo_signin");
    init().await?;

    let app = Router::new()
        .route("/", get(index))
        .nest(OTP_ROUTE_PREFIX.as_str(), otp_signin_router());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    spawn_http_server(port, app).await?;
    Ok(())
}
