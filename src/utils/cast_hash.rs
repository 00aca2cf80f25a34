use crate::error::{AppError, AppResult};

/// 识别的站点域名；链接包含这些域名时取最后一段路径作为 cast hash
const KNOWN_HOSTS: [&str; 2] = ["warpcast.com", "app.farcaster.xyz"];

/// 从用户输入中提取 cast hash。
/// 支持 Warpcast / Farcaster 链接，也支持直接粘贴 0x 开头的 hash。
/// 校验失败返回 `InvalidCastHash`，不发起任何网络请求。
pub fn extract_cast_hash(input: &str) -> AppResult<String> {
    let raw = input.trim();

    let candidate = if KNOWN_HOSTS.iter().any(|host| raw.contains(host)) {
        // 取最后一段路径，并去掉 query 参数
        let last_segment = raw.rsplit('/').next().unwrap_or(raw);
        last_segment.split('?').next().unwrap_or(last_segment)
    } else {
        // 非链接输入按 hash 原样处理
        raw
    };

    if !candidate.starts_with("0x") || candidate.len() < 10 {
        return Err(AppError::InvalidCastHash(
            "Invalid post link format, use a Warpcast link or a 0x-prefixed cast hash".to_string(),
        ));
    }

    Ok(candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_warpcast_url() {
        assert_eq!(
            extract_cast_hash("https://warpcast.com/alice/0xabc123def456").unwrap(),
            "0xabc123def456"
        );
    }

    #[test]
    fn test_extract_strips_query_params() {
        assert_eq!(
            extract_cast_hash("https://warpcast.com/alice/0xabc123def456?embed=1").unwrap(),
            "0xabc123def456"
        );
    }

    #[test]
    fn test_extract_from_farcaster_app_url() {
        assert_eq!(
            extract_cast_hash("https://app.farcaster.xyz/0x1234567890abcdef").unwrap(),
            "0x1234567890abcdef"
        );
    }

    #[test]
    fn test_raw_hash_passes_through() {
        assert_eq!(
            extract_cast_hash("0xabc123def456").unwrap(),
            "0xabc123def456"
        );
    }

    #[test]
    fn test_rejects_missing_prefix() {
        assert!(extract_cast_hash("abc123def456789").is_err());
        assert!(extract_cast_hash("https://warpcast.com/alice/abc123def456").is_err());
    }

    #[test]
    fn test_rejects_short_hash() {
        // 总长度必须 >= 10
        assert!(extract_cast_hash("0xabc123").is_err());
        assert!(extract_cast_hash("https://warpcast.com/alice/0xabc").is_err());
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(extract_cast_hash("").is_err());
        // 以 / 结尾的链接最后一段为空
        assert!(extract_cast_hash("https://warpcast.com/alice/0xabc123def456/").is_err());
    }
}
