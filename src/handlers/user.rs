use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::UserService;

#[utoipa::path(
    get,
    path = "/user",
    tag = "user",
    params(UserQuery),
    responses(
        (status = 200, description = "获取用户资料成功", body = SessionUser),
        (status = 404, description = "用户不存在"),
        (status = 502, description = "上游 Neynar 接口错误")
    )
)]
/// 按 FID 查询 Farcaster 用户资料
pub async fn get_user(
    service: web::Data<UserService>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse> {
    match service.get_user(query.fid).await {
        Ok(user) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": user }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/user").route("", web::get().to(get_user)));
}
