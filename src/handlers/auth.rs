use actix_web::{HttpResponse, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::AuthService;

#[utoipa::path(
    post,
    path = "/auth/signin",
    tag = "auth",
    responses(
        (status = 200, description = "登录成功，返回演示用户", body = SessionUser)
    )
)]
/// Mock 登录：随机返回一个演示用户（开发/演示环境用）
pub async fn sign_in(service: web::Data<AuthService>) -> Result<HttpResponse> {
    let user = service.sign_in();
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": user })))
}

/// 路由配置
pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/auth").route("/signin", web::post().to(sign_in)));
}
