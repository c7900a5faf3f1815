use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Home {
    message: &'static str,
}

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
    version: &'static str,
}

pub async fn home() -> Json<Home> {
    Json(Home {
        message: "NurseFlow API is active.",
    })
}

pub async fn health_check() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
