use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::DrawService;

#[utoipa::path(
    post,
    path = "/draw/winners",
    tag = "draw",
    request_body = DrawWinnersRequest,
    responses(
        (status = 200, description = "抽奖成功（包括无评论的情况）", body = DrawWinnersResponse),
        (status = 400, description = "链接格式或参数错误"),
        (status = 404, description = "Cast 不存在"),
        (status = 502, description = "上游 Neynar 接口错误")
    )
)]
/// 对指定 cast 的评论者随机抽取中奖者:
/// 1. 解析链接得到 cast hash
/// 2. 拉取评论并按 FID 去重（排除原作者）
/// 3. Fisher-Yates 洗牌后取前 winner_count 个
pub async fn draw_winners(
    service: web::Data<DrawService>,
    payload: web::Json<DrawWinnersRequest>,
) -> Result<HttpResponse> {
    match service.draw(&payload.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/draw").route("/winners", web::post().to(draw_winners)));
}
