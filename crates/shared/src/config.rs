//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::observability::ObservabilityConfig;

/// 服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 允许的 CORS 来源，逗号分隔；`*` 表示全部放行
    pub cors_origins: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: "*".to_string(),
        }
    }
}

/// 宿主平台配置
///
/// 会员 / 订单查询 API 的地址、应用凭证以及 webhook 令牌验签公钥
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub base_url: String,
    pub app_id: String,
    pub app_secret: String,
    /// RS256 公钥（PEM）。未配置时令牌不验签
    pub public_key: Option<String>,
    /// 单次外部查询的超时时间（毫秒）
    pub lookup_timeout_ms: u64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            app_id: String::new(),
            app_secret: String::new(),
            public_key: None,
            lookup_timeout_ms: 3000,
        }
    }
}

/// 触发器评估方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    /// 逐个评估
    #[default]
    Sequential,
    /// 同一请求内的触发器并发评估
    Concurrent,
}

/// 资格评估配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EligibilityConfig {
    pub mode: EvaluationMode,
    /// 时间类规则使用的时区偏移（分钟，东正西负）
    pub utc_offset_minutes: i32,
    /// 工作日欢乐时段起始小时（含）
    pub happy_hour_start: u32,
    /// 工作日欢乐时段结束小时（不含）
    pub happy_hour_end: u32,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            mode: EvaluationMode::Sequential,
            utc_offset_minutes: 0,
            happy_hour_start: 16,
            happy_hour_end: 18,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub server: ServerConfig,
    pub observability: ObservabilityConfig,
    pub platform: PlatformConfig,
    pub eligibility: EligibilityConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. config/{service_name}.toml（服务特定配置）
    /// 4. 环境变量（DISCOUNT_ 前缀，`__` 分隔层级，如 DISCOUNT_SERVER__PORT -> server.port）
    /// 5. PORT 环境变量（托管平台约定）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        // .env 文件可选，不存在时忽略
        let _ = dotenvy::dotenv();

        let env = std::env::var("DISCOUNT_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let mut config = Self::build(Path::new(&config_dir), &env, service_name)?;

        if let Some(port) = Self::parse_port(std::env::var("PORT").ok()) {
            config.server.port = port;
        }

        Ok(config)
    }

    /// 按目录、环境名和服务名组装配置源
    fn build(config_dir: &Path, env: &str, service_name: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", env))).required(false))
            .add_source(
                File::from(config_dir.join(format!("{}.toml", service_name))).required(false),
            )
            .add_source(
                Environment::with_prefix("DISCOUNT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    fn parse_port(value: Option<String>) -> Option<u16> {
        value.and_then(|v| v.trim().parse().ok())
    }

    /// 获取服务地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.platform.lookup_timeout_ms, 3000);
        assert_eq!(config.eligibility.mode, EvaluationMode::Sequential);
        assert_eq!(config.eligibility.happy_hour_start, 16);
        assert_eq!(config.eligibility.happy_hour_end, 18);
    }

    #[test]
    fn test_server_addr() {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8081,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.server_addr(), "127.0.0.1:8081");
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(AppConfig::parse_port(Some("4000".to_string())), Some(4000));
        assert_eq!(AppConfig::parse_port(Some(" 4001 ".to_string())), Some(4001));
        assert_eq!(AppConfig::parse_port(Some("not-a-port".to_string())), None);
        assert_eq!(AppConfig::parse_port(None), None);
    }

    #[test]
    fn test_build_layers_files() {
        let dir = std::env::temp_dir().join(format!("discount-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("default.toml"),
            r#"
[server]
port = 5000

[eligibility]
mode = "concurrent"
utc_offset_minutes = 120
"#,
        )
        .unwrap();
        fs::write(
            dir.join("staging.toml"),
            r#"
[server]
port = 5001
"#,
        )
        .unwrap();

        let config = AppConfig::build(&dir, "staging", "discount-triggers").unwrap();

        assert_eq!(config.service_name, "discount-triggers");
        assert_eq!(config.environment, "staging");
        // 环境文件覆盖默认文件
        assert_eq!(config.server.port, 5001);
        // 未出现的字段保留默认值
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.eligibility.mode, EvaluationMode::Concurrent);
        assert_eq!(config.eligibility.utc_offset_minutes, 120);
        assert_eq!(config.eligibility.happy_hour_start, 16);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_build_without_files_uses_defaults() {
        let dir = std::env::temp_dir().join(format!("discount-config-{}", uuid::Uuid::new_v4()));
        let config = AppConfig::build(&dir, "development", "discount-triggers").unwrap();
        assert_eq!(config.platform.base_url, "http://localhost:8090");
        assert!(config.platform.public_key.is_none());
        assert!(!config.is_production());
    }
}
