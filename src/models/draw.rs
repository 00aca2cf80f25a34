use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 抽奖请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DrawWinnersRequest {
    /// Warpcast / Farcaster 链接，或 0x 开头的 cast hash
    #[schema(example = "https://warpcast.com/alice/0xabc123def456")]
    pub cast_url: String,
    /// 中奖人数 (>= 1)，超过参与人数时返回全部参与者
    #[schema(example = 3)]
    pub winner_count: u32,
    /// 发起人 FID，仅用于展示/审计回显，不做校验
    pub host_fid: Option<i64>,
}

/// 参与者（去重后的评论者）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Participant {
    /// Farcaster FID（唯一标识）
    pub fid: i64,
    pub username: String,
    /// 缺失时回退为 username
    pub display_name: String,
    /// 头像地址，可能为空字符串
    pub pfp_url: String,
}

/// 抽奖结果
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawWinnersResponse {
    /// 中奖者，按抽取顺序排列
    pub winners: Vec<Participant>,
    /// 参与抽奖的去重评论者总数
    pub total_participants: usize,
    /// 没有任何有效评论时为 true（属于成功响应，不是错误）
    pub no_participants: bool,
    /// 发起人 FID 回显
    pub host_fid: Option<i64>,
}
