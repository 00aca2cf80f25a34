use crate::error::AppResult;
use crate::external::NeynarClient;
use crate::models::SessionUser;

#[derive(Clone)]
pub struct UserService {
    neynar: NeynarClient,
}

impl UserService {
    pub fn new(neynar: NeynarClient) -> Self {
        Self { neynar }
    }

    /// 按 FID 查询 Farcaster 用户资料
    pub async fn get_user(&self, fid: i64) -> AppResult<SessionUser> {
        let user = self.neynar.lookup_user(fid).await?;
        Ok(user.into())
    }
}
