//! styled_layout - 日志布局的 ANSI 样式转换器
//!
//! 样式转换器把一组子格式化器的输出拼接起来，并在结果非空时用终端
//! 转义序列包裹。内部输出为空时转换器完全不可见，不会留下空的颜色代码。
//!
//! # 快速开始
//!
//! ```rust
//! use std::sync::Arc;
//! use styled_layout::core::formatters::{LiteralFormatter, MessageFormatter};
//! use styled_layout::{ConverterFactory, Formatter, FormatterChain, LogEvent, Result};
//! use tracing::Level;
//!
//! // 外部模式解析器：这里忽略模式，总是输出 "> 消息"
//! fn parser(_pattern: &str) -> Result<FormatterChain> {
//!     let formatters: Vec<Box<dyn Formatter>> = vec![
//!         Box::new(LiteralFormatter::new("> ")),
//!         Box::new(MessageFormatter),
//!     ];
//!     Ok(FormatterChain::new(formatters))
//! }
//!
//! let factory = ConverterFactory::new().with_parser(Arc::new(parser));
//! let converter = factory.new_instance("red", &["> %m"]).expect("converter");
//!
//! let mut line = String::new();
//! converter.format(&LogEvent::new(Level::INFO, "app", "hello"), &mut line);
//! assert_eq!(line, "\x1b[31m> hello\x1b[0m");
//! ```

pub mod config;
pub mod core;
pub mod diagnostics;
pub mod error;

// 重新导出主要类型
pub use config::{load_config_from_file, load_config_from_str, validate_config, StyledLayoutConfig};
pub use crate::core::{
    default_registry, ConverterFactory, Formatter, FormatterChain, LogEvent, PatternParser,
    Style, StyleRegistry, StyledConverter,
};
pub use diagnostics::{
    get_diagnostics, init_diagnostics, CollectingReporter, DiagnosticReporter, Diagnostics,
    DiagnosticsSnapshot, TracingReporter,
};
pub use error::{Result, StyledLayoutError};

use tracing_subscriber::EnvFilter;

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 安装输出构造期诊断日志的全局 tracing 订阅器
///
/// `level` 是 `EnvFilter` 指令。直接调用时可以传入 `"styled_layout=debug"`
/// 这样的目标指令；经由 [`init_with_config`] 调用时只会是
/// `diagnostic_level` 允许的单个级别名（TRACE/DEBUG/INFO/WARN/ERROR/OFF）。
/// 已经安装过订阅器时返回 `TracingError`。
pub fn init_diagnostic_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level.to_lowercase())
        .map_err(|e| StyledLayoutError::InvalidLogLevel(format!("{}: {}", level, e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| StyledLayoutError::tracing(e.to_string()))
}

/// 按配置初始化：校验配置、安装诊断日志并构建转换器工厂
///
/// 诊断日志已被其他组件安装时只记录一条调试日志，不视为错误。
pub fn init_with_config(config: &StyledLayoutConfig) -> Result<ConverterFactory> {
    validate_config(config)?;

    if let Err(e) = init_diagnostic_logging(&config.diagnostic_level) {
        tracing::debug!("Diagnostic logging not installed: {}", e);
    }

    let factory = ConverterFactory::from_config(config)?;
    tracing::debug!(
        styles = ?factory.registry().names(),
        ansi = factory.registry().ansi_enabled(),
        "Converter factory initialized"
    );
    Ok(factory)
}
