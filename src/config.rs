//! 定义样式布局的配置结构体。

use crate::core::style::{check_style_names, Style};
use crate::error::{Result, StyledLayoutError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

// --- 辅助函数，用于提供配置项的默认值 ---
fn default_true() -> bool {
    true
}
fn default_diagnostic_level() -> String {
    "INFO".to_string()
}

/// 样式布局的顶层配置结构体。
///
/// ```toml
/// ansi_enabled = true
/// diagnostic_level = "WARN"
///
/// [styles]
/// warning = "bold,yellow"
/// highlight = "underline bright_cyan"
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StyledLayoutConfig {
    /// 关闭后所有样式都不输出转义序列
    #[serde(default = "default_true")]
    pub ansi_enabled: bool,
    /// 构造期诊断日志的级别，只接受单个级别名：TRACE/DEBUG/INFO/WARN/ERROR/OFF。
    /// 需要按目标过滤时直接调用 `init_diagnostic_logging`
    #[serde(default = "default_diagnostic_level")]
    pub diagnostic_level: String,
    /// 自定义样式名到样式规格的映射
    #[serde(default)]
    pub styles: HashMap<String, String>,
}

impl Default for StyledLayoutConfig {
    fn default() -> Self {
        Self {
            ansi_enabled: default_true(),
            diagnostic_level: default_diagnostic_level(),
            styles: HashMap::new(),
        }
    }
}

/// 用于从 TOML 文件加载 `StyledLayoutConfig` 的辅助函数。
pub fn load_config_from_file(path: &Path) -> Result<StyledLayoutConfig> {
    if !path.exists() {
        return Err(StyledLayoutError::ConfigFileMissing(
            path.to_string_lossy().into_owned(),
        ));
    }

    let config_str = std::fs::read_to_string(path)?;
    load_config_from_str(&config_str)
}

/// 用于从 TOML 字符串加载 `StyledLayoutConfig` 的辅助函数。
pub fn load_config_from_str(config_str: &str) -> Result<StyledLayoutConfig> {
    let config: StyledLayoutConfig = toml::from_str(config_str)?;
    Ok(config)
}

/// 验证配置的有效性。
pub fn validate_config(config: &StyledLayoutConfig) -> Result<()> {
    match config.diagnostic_level.to_uppercase().as_str() {
        "TRACE" | "DEBUG" | "INFO" | "WARN" | "ERROR" | "OFF" => {}
        _ => {
            return Err(StyledLayoutError::InvalidLogLevel(
                config.diagnostic_level.clone(),
            ))
        }
    }

    check_style_names(&config.styles)?;
    for (name, spec) in &config.styles {
        Style::parse(name.as_str(), spec)?;
    }

    Ok(())
}
