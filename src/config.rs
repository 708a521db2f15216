use crate::error::{AppError, AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Skysmart API 根地址
    pub api_base_url: String,
    /// 学生作业链接前缀
    pub student_link_prefix: String,
    /// 请求使用的 User-Agent
    pub user_agent: String,
    /// 同时抓取的步骤数量
    pub max_concurrent_fetches: usize,
    /// 单个请求超时（秒）
    pub request_timeout_secs: u64,
    /// 限流或服务端错误时的最大重试次数
    pub max_retries: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://api-edu.skysmart.ru".to_string(),
            student_link_prefix: "https://edu.skysmart.ru/student/".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36".to_string(),
            max_concurrent_fetches: 8,
            request_timeout_secs: 20,
            max_retries: 3,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 按环境加载：设置了 `SKYSMART_CONFIG` 时读取该 TOML 文件，否则读环境变量
    pub fn load() -> AppResult<Self> {
        let config = match std::env::var("SKYSMART_CONFIG") {
            Ok(path) => Self::from_toml_file(path)?,
            Err(_) => Self::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("SKYSMART_API_BASE_URL").unwrap_or(default.api_base_url),
            student_link_prefix: std::env::var("SKYSMART_LINK_PREFIX").unwrap_or(default.student_link_prefix),
            user_agent: std::env::var("SKYSMART_USER_AGENT").unwrap_or(default.user_agent),
            max_concurrent_fetches: std::env::var("MAX_CONCURRENT_FETCHES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_fetches),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            max_retries: std::env::var("MAX_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_retries),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 从 TOML 文件加载，缺省字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| {
            AppError::Config(ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                source,
            })
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 检查配置是否可用，不可用时立即失败
    pub fn validate(&self) -> AppResult<()> {
        if self.max_concurrent_fetches == 0 {
            return Err(AppError::invalid_config("max_concurrent_fetches", "必须大于 0"));
        }
        if !self.api_base_url.starts_with("http") {
            return Err(AppError::invalid_config("api_base_url", "必须是 http(s) 地址"));
        }
        Ok(())
    }
}
