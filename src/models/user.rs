use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::external::NeynarUser;

/// 会话用户（mock 登录与 FID 资料查询共用同一结构）
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub fid: i64,
    pub username: String,
    pub display_name: String,
    pub pfp: String,
    pub custody_address: String,
    pub verified_addresses: Vec<String>,
}

impl From<NeynarUser> for SessionUser {
    fn from(user: NeynarUser) -> Self {
        let display_name = user
            .display_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| user.username.clone());
        SessionUser {
            fid: user.fid,
            username: user.username,
            display_name,
            pfp: user.pfp_url.unwrap_or_default(),
            custody_address: user.custody_address.unwrap_or_default(),
            verified_addresses: user.verifications,
        }
    }
}

/// FID 查询参数
#[derive(Debug, Deserialize, IntoParams)]
pub struct UserQuery {
    pub fid: i64,
}
