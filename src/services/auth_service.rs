use rand::Rng;

use crate::models::SessionUser;

/// Mock 登录服务：随机返回一个演示用户。
/// 真实的钱包签名登录由前端侧协作方完成，后端不校验任何凭据。
#[derive(Clone, Default)]
pub struct AuthService;

impl AuthService {
    pub fn new() -> Self {
        Self
    }

    pub fn sign_in(&self) -> SessionUser {
        let users = demo_users();
        let index = rand::rng().random_range(0..users.len());
        users.into_iter().nth(index).expect("non-empty demo pool")
    }
}

/// 演示用户池
fn demo_users() -> Vec<SessionUser> {
    vec![
        SessionUser {
            fid: 12345,
            username: "demo_user".to_string(),
            display_name: "Demo User".to_string(),
            pfp: "https://api.dicebear.com/7.x/avataaars/svg?seed=demo".to_string(),
            custody_address: "0x1234567890123456789012345678901234567890".to_string(),
            verified_addresses: vec!["0x1234567890123456789012345678901234567890".to_string()],
        },
        SessionUser {
            fid: 67890,
            username: "farcaster_enthusiast".to_string(),
            display_name: "Farcaster Enthusiast".to_string(),
            pfp: "https://api.dicebear.com/7.x/avataaars/svg?seed=farcaster".to_string(),
            custody_address: "0x6789012345678901234567890123456789012345".to_string(),
            verified_addresses: vec!["0x6789012345678901234567890123456789012345".to_string()],
        },
        SessionUser {
            fid: 11111,
            username: "giveaway_host".to_string(),
            display_name: "Giveaway Host".to_string(),
            pfp: "https://api.dicebear.com/7.x/avataaars/svg?seed=host".to_string(),
            custody_address: "0x1111122222333334444455555666667777788888".to_string(),
            verified_addresses: vec!["0x1111122222333334444455555666667777788888".to_string()],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_returns_demo_user() {
        let service = AuthService::new();
        let pool: Vec<i64> = demo_users().iter().map(|u| u.fid).collect();

        for _ in 0..20 {
            let user = service.sign_in();
            assert!(pool.contains(&user.fid));
            assert!(!user.username.is_empty());
        }
    }
}
