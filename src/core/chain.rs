//! 格式化链
//!
//! 格式化链是一组按顺序执行的格式化器，每个格式化器把事件的一部分渲染为文本，
//! 追加到同一个缓冲区中。

use crate::core::event::LogEvent;
use std::fmt;

/// 格式化器
///
/// 把事件的一部分渲染为文本并追加到 `buf`。实现只能追加，
/// 不能读取或修改缓冲区中已有的内容。
pub trait Formatter: Send + Sync {
    /// 将事件渲染后追加到缓冲区
    fn format(&self, event: &LogEvent, buf: &mut String);
}

impl<F> Formatter for F
where
    F: Fn(&LogEvent, &mut String) + Send + Sync,
{
    fn format(&self, event: &LogEvent, buf: &mut String) {
        self(event, buf)
    }
}

/// 有序、不可变的格式化器列表
#[derive(Default)]
pub struct FormatterChain {
    formatters: Vec<Box<dyn Formatter>>,
}

impl FormatterChain {
    /// 由格式化器列表创建格式化链
    pub fn new(formatters: Vec<Box<dyn Formatter>>) -> Self {
        Self { formatters }
    }

    /// 创建空的格式化链，渲染结果总是空字符串
    pub fn empty() -> Self {
        Self::default()
    }

    /// 格式化器数量
    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    /// 是否不包含任何格式化器
    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    /// 按顺序执行每个格式化器，全部追加到 `buf`
    pub fn format(&self, event: &LogEvent, buf: &mut String) {
        for formatter in &self.formatters {
            formatter.format(event, buf);
        }
    }

    /// 渲染到新的字符串
    pub fn render(&self, event: &LogEvent) -> String {
        let mut buf = String::new();
        self.format(event, &mut buf);
        buf
    }
}

impl Formatter for FormatterChain {
    fn format(&self, event: &LogEvent, buf: &mut String) {
        FormatterChain::format(self, event, buf)
    }
}

impl FromIterator<Box<dyn Formatter>> for FormatterChain {
    fn from_iter<I: IntoIterator<Item = Box<dyn Formatter>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for FormatterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterChain")
            .field("len", &self.formatters.len())
            .finish()
    }
}
