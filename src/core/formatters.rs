//! 内置格式化器
//!
//! 外部模式解析器可以用这些格式化器组装格式化链。
//! 缺少数据的格式化器（位置、字段、线程名）什么也不输出，
//! 这样外层的样式转换器就会整体跳过。

use crate::core::chain::Formatter;
use crate::core::event::LogEvent;
use crate::error::{Result, StyledLayoutError};
use chrono::format::{Item, StrftimeItems};
use std::fmt::Write;

/// 原样输出一段固定文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralFormatter {
    text: String,
}

impl LiteralFormatter {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}

impl Formatter for LiteralFormatter {
    fn format(&self, _event: &LogEvent, buf: &mut String) {
        buf.push_str(&self.text);
    }
}

/// 日志级别
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelFormatter;

impl Formatter for LevelFormatter {
    fn format(&self, event: &LogEvent, buf: &mut String) {
        buf.push_str(&event.level);
    }
}

/// 日志消息
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageFormatter;

impl Formatter for MessageFormatter {
    fn format(&self, event: &LogEvent, buf: &mut String) {
        buf.push_str(&event.message);
    }
}

/// 目标模块
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetFormatter;

impl Formatter for TargetFormatter {
    fn format(&self, event: &LogEvent, buf: &mut String) {
        buf.push_str(&event.target);
    }
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S%.3f".to_string()
}

/// 时间戳，使用 chrono 的 strftime 格式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormatter {
    format: String,
}

impl TimestampFormatter {
    /// 不校验格式；无法识别的说明符在格式化时输出为空
    pub fn new<S: Into<String>>(format: S) -> Self {
        Self {
            format: format.into(),
        }
    }

    /// 构造时校验 strftime 格式，供模式解析器返回 `InvalidPattern`
    pub fn try_new<S: Into<String>>(format: S) -> Result<Self> {
        let format = format.into();
        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(StyledLayoutError::invalid_pattern(
                format,
                "unrecognized strftime specifier",
            ));
        }
        Ok(Self { format })
    }
}

impl Default for TimestampFormatter {
    fn default() -> Self {
        Self::new(default_timestamp_format())
    }
}

impl Formatter for TimestampFormatter {
    fn format(&self, event: &LogEvent, buf: &mut String) {
        let start = buf.len();
        if write!(buf, "{}", event.timestamp.format(&self.format)).is_err() {
            buf.truncate(start);
        }
    }
}

/// 源码位置 `file:line`
///
/// 没有文件名时不输出；有文件名没有行号时只输出文件名。
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationFormatter;

impl Formatter for LocationFormatter {
    fn format(&self, event: &LogEvent, buf: &mut String) {
        match (&event.file, event.line) {
            (Some(file), Some(line)) => buf.push_str(&format!("{}:{}", file, line)),
            (Some(file), None) => buf.push_str(file),
            _ => {}
        }
    }
}

/// 自定义字段的值，字段不存在时不输出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFormatter {
    key: String,
}

impl FieldFormatter {
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self { key: key.into() }
    }
}

impl Formatter for FieldFormatter {
    fn format(&self, event: &LogEvent, buf: &mut String) {
        match event.field(&self.key) {
            // 字符串不带引号输出
            Some(serde_json::Value::String(s)) => buf.push_str(s),
            Some(serde_json::Value::Null) | None => {}
            Some(value) => buf.push_str(&value.to_string()),
        }
    }
}

/// 线程名
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadFormatter;

impl Formatter for ThreadFormatter {
    fn format(&self, event: &LogEvent, buf: &mut String) {
        if let Some(ref name) = event.thread_name {
            buf.push_str(name);
        }
    }
}
