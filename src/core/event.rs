//! 日志事件定义
//!
//! 此模块定义了格式化管线消费的事件结构。事件由调用方创建并持有，
//! 格式化器只读取它。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::Level;

/// 日志事件结构
///
/// 包含一次日志记录的全部信息：时间戳、级别、消息、位置与自定义字段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    /// 事件时间戳
    pub timestamp: DateTime<Utc>,
    /// 日志级别
    pub level: String,
    /// 日志消息
    pub message: String,
    /// 目标模块
    pub target: String,
    /// 文件名
    pub file: Option<String>,
    /// 行号
    pub line: Option<u32>,
    /// 模块路径
    pub module_path: Option<String>,
    /// 线程名
    pub thread_name: Option<String>,
    /// 自定义字段
    pub fields: HashMap<String, serde_json::Value>,
}

impl LogEvent {
    /// 创建新的日志事件，时间戳取当前时间
    pub fn new<T: Into<String>, M: Into<String>>(level: Level, target: T, message: M) -> Self {
        Self {
            timestamp: Utc::now(),
            level: level.to_string(),
            message: message.into(),
            target: target.into(),
            file: None,
            line: None,
            module_path: None,
            thread_name: std::thread::current().name().map(|s| s.to_string()),
            fields: HashMap::new(),
        }
    }

    /// 设置时间戳
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// 设置源码位置
    pub fn with_location<F: Into<String>>(mut self, file: F, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    /// 设置模块路径
    pub fn with_module_path<P: Into<String>>(mut self, module_path: P) -> Self {
        self.module_path = Some(module_path.into());
        self
    }

    /// 设置线程名
    pub fn with_thread_name<N: Into<String>>(mut self, name: N) -> Self {
        self.thread_name = Some(name.into());
        self
    }

    /// 添加自定义字段
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// 获取自定义字段
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }

    /// 获取事件的 JSON 表示
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
