use std::collections::HashMap;

use rand::Rng;

use crate::error::{AppError, AppResult};
use crate::external::{NeynarClient, ReplyCast};
use crate::models::{DrawWinnersRequest, DrawWinnersResponse, Participant};
use crate::utils::extract_cast_hash;

#[derive(Clone)]
pub struct DrawService {
    neynar: NeynarClient,
}

impl DrawService {
    pub fn new(neynar: NeynarClient) -> Self {
        Self { neynar }
    }

    /// 执行一次完整抽奖:
    /// 1. 校验中奖人数
    /// 2. 从链接中提取 cast hash（失败则不发起网络请求）
    /// 3. 解析 cast 并拉取评论，按 FID 去重、排除原作者
    /// 4. Fisher-Yates 洗牌后取前 min(K, N) 个
    ///
    /// 没有任何有效评论时返回成功响应并置 no_participants 标记。
    pub async fn draw(&self, request: &DrawWinnersRequest) -> AppResult<DrawWinnersResponse> {
        if request.winner_count < 1 {
            return Err(AppError::ValidationError(
                "Winner count must be at least 1".to_string(),
            ));
        }

        let cast_hash = extract_cast_hash(&request.cast_url)?;
        let participants = self.collect_participants(&cast_hash).await?;
        let total_participants = participants.len();

        if total_participants == 0 {
            log::info!("No eligible commenters found for cast {cast_hash}");
            return Ok(DrawWinnersResponse {
                winners: Vec::new(),
                total_participants: 0,
                no_participants: true,
                host_fid: request.host_fid,
            });
        }

        let winners = draw_winners(participants, request.winner_count as usize);
        log::info!(
            "Drew {} winner(s) out of {} participant(s) for cast {}",
            winners.len(),
            total_participants,
            cast_hash
        );

        Ok(DrawWinnersResponse {
            winners,
            total_participants,
            no_participants: false,
            host_fid: request.host_fid,
        })
    }

    /// 拉取 cast 的评论者集合。
    /// 两次上游调用串行且相互依赖：第二次使用解析返回的规范 hash。
    async fn collect_participants(&self, cast_hash: &str) -> AppResult<Vec<Participant>> {
        let cast = self.neynar.lookup_cast(cast_hash).await?;
        // 作者缺失 fid 时不排除任何人（0 不会是真实回复的 fid）
        let author_fid = cast.author.fid.unwrap_or(0);

        let replies = self.neynar.fetch_replies(&cast.hash).await?;
        log::info!("Processing {} replies for cast {}", replies.len(), cast.hash);

        Ok(collect_unique_commenters(&replies, author_fid))
    }
}

/// 从原始回复中提取去重后的参与者。
/// 跳过缺少 fid 或 username 的回复；同一 FID 多次评论只算一次；排除原帖作者。
pub fn collect_unique_commenters(replies: &[ReplyCast], author_fid: i64) -> Vec<Participant> {
    let mut unique: HashMap<i64, Participant> = HashMap::new();

    for reply in replies {
        let Some(author) = reply.author.as_ref() else {
            continue;
        };
        let (Some(fid), Some(username)) = (author.fid, author.username.as_deref()) else {
            continue;
        };
        if username.is_empty() || fid == author_fid {
            continue;
        }

        unique.insert(
            fid,
            Participant {
                fid,
                username: username.to_string(),
                display_name: author
                    .display_name
                    .clone()
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| username.to_string()),
                pfp_url: author.pfp_url.clone().unwrap_or_default(),
            },
        );
    }

    unique.into_values().collect()
}

/// Fisher-Yates 洗牌后截取前 min(count, N) 个，洗牌后顺序即展示顺序。
/// 任意排列等概率，所以截取前缀就是无偏抽样；永不失败。
pub fn draw_winners(participants: Vec<Participant>, count: usize) -> Vec<Participant> {
    let mut shuffled = participants;
    let mut rng = rand::rng();

    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }

    shuffled.truncate(count);
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn participant(fid: i64) -> Participant {
        Participant {
            fid,
            username: format!("user{fid}"),
            display_name: format!("User {fid}"),
            pfp_url: String::new(),
        }
    }

    fn reply(fid: Option<i64>, username: Option<&str>) -> ReplyCast {
        serde_json::from_value(serde_json::json!({
            "author": {
                "fid": fid,
                "username": username,
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_collect_deduplicates_by_fid() {
        let replies = vec![
            reply(Some(1), Some("alice")),
            reply(Some(2), Some("bob")),
            reply(Some(1), Some("alice")),
            reply(Some(1), Some("alice")),
        ];
        let participants = collect_unique_commenters(&replies, 0);
        assert_eq!(participants.len(), 2);

        let fids: HashSet<i64> = participants.iter().map(|p| p.fid).collect();
        assert_eq!(fids, HashSet::from([1, 2]));
    }

    #[test]
    fn test_collect_excludes_cast_author() {
        let replies = vec![
            reply(Some(1), Some("alice")),
            reply(Some(42), Some("host")),
            reply(Some(2), Some("bob")),
        ];
        let participants = collect_unique_commenters(&replies, 42);
        assert_eq!(participants.len(), 2);
        assert!(participants.iter().all(|p| p.fid != 42));
    }

    #[test]
    fn test_collect_skips_malformed_authors() {
        let replies = vec![
            reply(None, Some("no_fid")),
            reply(Some(3), None),
            reply(Some(4), Some("")),
            serde_json::from_value::<ReplyCast>(serde_json::json!({})).unwrap(),
            reply(Some(5), Some("valid")),
        ];
        let participants = collect_unique_commenters(&replies, 0);
        assert_eq!(participants.len(), 1);
        assert_eq!(participants[0].fid, 5);
    }

    #[test]
    fn test_collect_is_idempotent() {
        let replies = vec![
            reply(Some(1), Some("alice")),
            reply(Some(2), Some("bob")),
            reply(Some(1), Some("alice")),
        ];
        let once: HashSet<i64> = collect_unique_commenters(&replies, 0)
            .iter()
            .map(|p| p.fid)
            .collect();
        let twice: HashSet<i64> = collect_unique_commenters(&replies, 0)
            .iter()
            .map(|p| p.fid)
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_collect_display_name_fallback() {
        let replies = vec![serde_json::from_value::<ReplyCast>(serde_json::json!({
            "author": { "fid": 7, "username": "alice", "display_name": "" }
        }))
        .unwrap()];
        let participants = collect_unique_commenters(&replies, 0);
        assert_eq!(participants[0].display_name, "alice");
    }

    #[test]
    fn test_draw_size_and_membership() {
        let pool: Vec<Participant> = (1..=5).map(participant).collect();
        let pool_fids: HashSet<i64> = pool.iter().map(|p| p.fid).collect();

        let winners = draw_winners(pool, 3);
        assert_eq!(winners.len(), 3);

        let winner_fids: HashSet<i64> = winners.iter().map(|p| p.fid).collect();
        // 无重复，且都来自原集合
        assert_eq!(winner_fids.len(), 3);
        assert!(winner_fids.is_subset(&pool_fids));
    }

    #[test]
    fn test_draw_count_exceeding_pool_returns_all() {
        let pool: Vec<Participant> = (1..=4).map(participant).collect();
        let winners = draw_winners(pool, 10);
        assert_eq!(winners.len(), 4);
    }

    #[test]
    fn test_draw_empty_pool() {
        assert!(draw_winners(Vec::new(), 3).is_empty());
    }

    #[test]
    fn test_draw_single_participant() {
        let winners = draw_winners(vec![participant(9)], 1);
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].fid, 9);
    }

    #[test]
    fn test_draw_distribution_is_roughly_uniform() {
        // 3 人抽 1 个，6000 次后每人应接近 2000 次
        const TRIALS: usize = 6000;
        let mut counts: HashMap<i64, usize> = HashMap::new();

        for _ in 0..TRIALS {
            let pool: Vec<Participant> = (1..=3).map(participant).collect();
            let winners = draw_winners(pool, 1);
            *counts.entry(winners[0].fid).or_insert(0) += 1;
        }

        assert_eq!(counts.len(), 3);
        for (&fid, &count) in &counts {
            assert!(
                (1700..=2300).contains(&count),
                "fid {fid} won {count} times out of {TRIALS}"
            );
        }
    }
}
