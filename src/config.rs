use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub neynar: NeynarConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeynarConfig {
    pub api_key: String,
    #[serde(default = "default_neynar_base_url")]
    pub base_url: String,
    /// 单页拉取的回复条数上限（不做分页）
    #[serde(default = "default_reply_limit")]
    pub reply_limit: u32,
}

fn default_neynar_base_url() -> String {
    "https://api.neynar.com".to_string()
}

fn default_reply_limit() -> u32 {
    150
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                // 有配置文件：先解析再用环境变量覆盖
                toml::from_str(&config_str).map_err(|e| format!("解析配置文件失败: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // 无配置文件：使用环境变量与默认值构建
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // Neynar API key 在无配置文件时必须提供
                let api_key = get_env("NEYNAR_API_KEY")
                    .ok_or("缺少 NEYNAR_API_KEY 环境变量，且未找到配置文件 config.toml")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    neynar: NeynarConfig {
                        api_key,
                        base_url: get_env("NEYNAR_BASE_URL")
                            .unwrap_or_else(default_neynar_base_url),
                        reply_limit: get_env_parse("NEYNAR_REPLY_LIMIT", default_reply_limit()),
                    },
                }
            }
            Err(e) => {
                return Err(format!("无法读取配置文件 {config_path}: {e}").into());
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("NEYNAR_API_KEY") {
            config.neynar.api_key = v;
        }
        if let Ok(v) = env::var("NEYNAR_BASE_URL") {
            config.neynar.base_url = v;
        }
        if let Ok(v) = env::var("NEYNAR_REPLY_LIMIT")
            && let Ok(n) = v.parse()
        {
            config.neynar.reply_limit = n;
        }

        Ok(config)
    }
}
