use crate::config::NeynarConfig;
use crate::error::{AppError, AppResult};
use reqwest::Client;
use serde::Deserialize;

/// cast / 回复的作者信息。
/// 上游字段可能缺失，统一按 Option 建模，缺字段跳过而不是崩溃。
#[derive(Debug, Clone, Deserialize)]
pub struct CastAuthor {
    #[serde(default)]
    pub fid: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub pfp_url: Option<String>,
}

/// 通过 hash 解析出的 cast（规范 hash + 作者）
#[derive(Debug, Clone, Deserialize)]
pub struct Cast {
    pub hash: String,
    pub author: CastAuthor,
}

#[derive(Debug, Deserialize)]
struct CastLookupResponse {
    #[serde(default)]
    cast: Option<Cast>,
}

/// 会话中的一条回复，只关心作者
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyCast {
    #[serde(default)]
    pub author: Option<CastAuthor>,
}

/// conversation.cast 节点可能是单个对象也可能是数组
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReplyNodes {
    Many(Vec<ReplyCast>),
    One(Box<ReplyCast>),
}

impl ReplyNodes {
    pub fn into_vec(self) -> Vec<ReplyCast> {
        match self {
            ReplyNodes::Many(list) => list,
            ReplyNodes::One(single) => vec![*single],
        }
    }
}

#[derive(Debug, Deserialize)]
struct Conversation {
    #[serde(default)]
    cast: Option<ReplyNodes>,
}

#[derive(Debug, Deserialize)]
struct ConversationResponse {
    #[serde(default)]
    conversation: Option<Conversation>,
}

/// Neynar 用户资料（/user/bulk）
#[derive(Debug, Clone, Deserialize)]
pub struct NeynarUser {
    pub fid: i64,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub pfp_url: Option<String>,
    #[serde(default)]
    pub custody_address: Option<String>,
    #[serde(default)]
    pub verifications: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct UserBulkResponse {
    #[serde(default)]
    users: Vec<NeynarUser>,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct NeynarClient {
    http: Client,
    config: NeynarConfig,
}

impl NeynarClient {
    pub fn new(config: NeynarConfig) -> Self {
        let http = Client::builder()
            .user_agent("giveaway-backend/neynar")
            .build()
            .expect("reqwest client");
        Self { http, config }
    }

    /// 通过 hash 解析 cast，返回规范 hash 与作者。
    /// 状态码映射: 404 -> CastNotFound, 400 -> InvalidCastHash, 401 -> UpstreamAuthError
    pub async fn lookup_cast(&self, identifier: &str) -> AppResult<Cast> {
        let url = format!("{}/v2/farcaster/cast", self.config.base_url);

        let resp = self
            .http
            .get(&url)
            .query(&[("type", "hash"), ("identifier", identifier)])
            .header("accept", "application/json")
            .header("api_key", &self.config.api_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = Self::upstream_message(resp).await;
            log::error!(
                "Neynar cast lookup failed: HTTP {}: {}",
                status.as_u16(),
                message
            );
            return Err(match status.as_u16() {
                404 => AppError::CastNotFound(
                    "Cast not found, make sure the post link is correct and public".to_string(),
                ),
                400 => AppError::InvalidCastHash(
                    "Invalid hash format, make sure to use a valid Farcaster post link".to_string(),
                ),
                401 => AppError::UpstreamAuthError(
                    "Neynar rejected the API key, check the api_key configuration".to_string(),
                ),
                _ => AppError::UpstreamError {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let body: CastLookupResponse = resp.json().await?;
        body.cast.ok_or_else(|| {
            AppError::CastNotFound("Cast not found or not accessible".to_string())
        })
    }

    /// 拉取 cast 的直接回复（单页，不分页）
    pub async fn fetch_replies(&self, cast_hash: &str) -> AppResult<Vec<ReplyCast>> {
        let url = format!("{}/v2/farcaster/cast/conversation", self.config.base_url);
        let limit = self.config.reply_limit.to_string();

        let resp = self
            .http
            .get(&url)
            .query(&[
                ("identifier", cast_hash),
                ("reply_depth", "1"),
                ("limit", limit.as_str()),
            ])
            .header("accept", "application/json")
            .header("api_key", &self.config.api_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = Self::upstream_message(resp).await;
            log::error!(
                "Neynar conversation fetch failed: HTTP {}: {}",
                status.as_u16(),
                message
            );
            return Err(AppError::UpstreamError {
                status: status.as_u16(),
                message,
            });
        }

        let body: ConversationResponse = resp.json().await?;
        Ok(body
            .conversation
            .and_then(|c| c.cast)
            .map(ReplyNodes::into_vec)
            .unwrap_or_default())
    }

    /// 按 FID 查询用户资料
    pub async fn lookup_user(&self, fid: i64) -> AppResult<NeynarUser> {
        let url = format!("{}/v2/farcaster/user/bulk", self.config.base_url);

        let resp = self
            .http
            .get(&url)
            .query(&[("fids", fid.to_string().as_str())])
            .header("accept", "application/json")
            .header("api_key", &self.config.api_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = Self::upstream_message(resp).await;
            log::error!(
                "Neynar user lookup failed: HTTP {}: {}",
                status.as_u16(),
                message
            );
            return Err(AppError::UpstreamError {
                status: status.as_u16(),
                message,
            });
        }

        let body: UserBulkResponse = resp.json().await?;
        body.users
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// 尽量从上游错误响应体中取出 message 字段
    async fn upstream_message(resp: reqwest::Response) -> String {
        let status = resp.status();
        resp.json::<UpstreamErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown upstream error")
                    .to_string()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_cast_as_array() {
        let raw = r#"{
            "conversation": {
                "cast": [
                    { "author": { "fid": 7, "username": "alice" } },
                    { "author": { "fid": 8, "username": "bob", "display_name": "Bob" } }
                ]
            }
        }"#;
        let parsed: ConversationResponse = serde_json::from_str(raw).unwrap();
        let replies = parsed
            .conversation
            .and_then(|c| c.cast)
            .map(ReplyNodes::into_vec)
            .unwrap();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[1].author.as_ref().unwrap().fid, Some(8));
    }

    #[test]
    fn test_conversation_cast_as_single_object() {
        let raw = r#"{
            "conversation": {
                "cast": { "author": { "fid": 7, "username": "alice" } }
            }
        }"#;
        let parsed: ConversationResponse = serde_json::from_str(raw).unwrap();
        let replies = parsed
            .conversation
            .and_then(|c| c.cast)
            .map(ReplyNodes::into_vec)
            .unwrap();
        assert_eq!(replies.len(), 1);
    }

    #[test]
    fn test_conversation_missing_nodes() {
        let parsed: ConversationResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.conversation.is_none());

        let parsed: ConversationResponse =
            serde_json::from_str(r#"{ "conversation": {} }"#).unwrap();
        assert!(parsed.conversation.unwrap().cast.is_none());
    }

    #[test]
    fn test_reply_author_missing_fields() {
        // 缺字段不应导致反序列化失败
        let raw = r#"{ "author": { "username": "no_fid" } }"#;
        let reply: ReplyCast = serde_json::from_str(raw).unwrap();
        let author = reply.author.unwrap();
        assert!(author.fid.is_none());
        assert_eq!(author.username.as_deref(), Some("no_fid"));

        let raw = r#"{}"#;
        let reply: ReplyCast = serde_json::from_str(raw).unwrap();
        assert!(reply.author.is_none());
    }

    #[test]
    fn test_user_bulk_payload() {
        let raw = r#"{
            "users": [{
                "fid": 3,
                "username": "dwr",
                "display_name": "Dan",
                "pfp_url": "https://example.com/a.png",
                "custody_address": "0x1234",
                "verifications": ["0xabcd"]
            }]
        }"#;
        let parsed: UserBulkResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.users.len(), 1);
        assert_eq!(parsed.users[0].fid, 3);
        assert_eq!(parsed.users[0].verifications.len(), 1);
    }

    #[test]
    fn test_cast_lookup_payload() {
        let raw = r#"{
            "cast": {
                "hash": "0xabc123def456",
                "author": { "fid": 42, "username": "host" }
            }
        }"#;
        let parsed: CastLookupResponse = serde_json::from_str(raw).unwrap();
        let cast = parsed.cast.unwrap();
        assert_eq!(cast.hash, "0xabc123def456");
        assert_eq!(cast.author.fid, Some(42));
    }
}
