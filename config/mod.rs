use crate::kdtree::ReadPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// mann 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MannConfig {
    /// kd-tree 配置
    pub tree: TreeConfig,

    /// 点输入配置
    pub input: InputConfig,

    /// 日志配置
    pub logging: LoggingConfig,
}

/// kd-tree 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// 叶子桶大小（保留参数，当前不参与任何分割）
    #[serde(default = "default_bucket_size")]
    pub bucket_size: usize,
}

/// 点输入配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// 行解析策略：lenient, strict
    #[serde(default)]
    pub policy: ReadPolicy,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别：trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 日志输出：stdout, stderr, file
    #[serde(default = "default_log_output")]
    pub output: String,

    /// 日志文件路径（当 output = file 时）
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// 默认值函数
// ============================================================================

fn default_bucket_size() -> usize {
    crate::kdtree::kdtree::DEFAULT_BUCKET_SIZE
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_output() -> String {
    "stderr".to_string()
}

// ============================================================================
// 实现
// ============================================================================

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            bucket_size: default_bucket_size(),
        }
    }
}

impl Default for MannConfig {
    fn default() -> Self {
        Self {
            tree: TreeConfig::default(),
            input: InputConfig {
                policy: ReadPolicy::default(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                output: default_log_output(),
                log_file: None,
            },
        }
    }
}

impl MannConfig {
    /// 从文件加载配置
    ///
    /// 配置加载顺序（优先级从低到高）：
    /// 1. 默认配置（内嵌的 default.toml）
    /// 2. 用户配置文件（可选，TOML 格式）
    /// 3. 环境变量（MANN__ 前缀，使用双下划线分隔嵌套）
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use mann::config::MannConfig;
    ///
    /// // 加载配置（如果文件不存在，使用默认配置）
    /// let config = MannConfig::from_file("mann.toml").unwrap();
    /// ```
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("default.toml"),
                config::FileFormat::Toml,
            ))
            .add_source(config::File::new(path, config::FileFormat::Toml).required(false))
            .add_source(
                config::Environment::with_prefix("MANN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| format!("Failed to load config: {}", e))?;

        Ok(settings
            .try_deserialize()
            .map_err(|e| format!("Failed to parse config: {}", e))?)
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, path: &str) -> crate::Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        std::fs::write(path, toml_string)
            .map_err(|e| format!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// 验证配置
    pub fn validate(&self) -> Result<(), String> {
        if self.tree.bucket_size == 0 {
            return Err("Bucket size must be at least 1".to_string());
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(format!(
                    "Invalid log level: '{}'. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ))
            }
        }

        match self.logging.output.as_str() {
            "stdout" | "stderr" => {}
            "file" => {
                if self.logging.log_file.is_none() {
                    return Err(
                        "Log output is 'file' but log_file path is not specified".to_string()
                    );
                }
            }
            _ => {
                return Err(format!(
                    "Invalid log output: '{}'. Must be one of: stdout, stderr, file",
                    self.logging.output
                ))
            }
        }

        Ok(())
    }
}
