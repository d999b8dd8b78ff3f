//! 核心模块
//!
//! 本模块包含格式化管线的核心组件：事件定义、格式化链、样式解析、
//! 样式转换器及其工厂。

pub mod chain;
pub mod converter;
pub mod event;
pub mod factory;
pub mod formatters;
pub mod style;

// 重新导出核心类型
pub use chain::{Formatter, FormatterChain};
pub use converter::StyledConverter;
pub use event::LogEvent;
pub use factory::{ConverterFactory, PatternParser};
pub use style::{default_registry, Style, StyleRegistry, BUILTIN_STYLE_NAMES, RESET};
