//! 样式转换器
//!
//! 把格式化链的输出包裹在样式的转义序列中。内部输出为空时什么也不写，
//! 不会产生一对空的转义序列。

use crate::core::chain::{Formatter, FormatterChain};
use crate::core::event::LogEvent;
use crate::core::style::Style;

/// 绑定一条格式化链与一个样式的转换器
///
/// 构造后不可变，不保存任何调用间状态，可以在多个线程中并发调用。
#[derive(Debug)]
pub struct StyledConverter {
    chain: FormatterChain,
    style: Style,
}

impl StyledConverter {
    pub fn new(chain: FormatterChain, style: Style) -> Self {
        Self { chain, style }
    }

    /// 转换器名称，即样式名
    pub fn name(&self) -> &str {
        self.style.name()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn chain(&self) -> &FormatterChain {
        &self.chain
    }

    /// 格式化事件并追加到 `out`
    ///
    /// 内部先渲染到临时缓冲区；结果非空时依次追加激活序列、内容、复位序列。
    pub fn format(&self, event: &LogEvent, out: &mut String) {
        let mut buf = String::new();
        self.chain.format(event, &mut buf);
        if buf.is_empty() {
            return;
        }
        out.reserve(self.style.prefix().len() + buf.len() + self.style.reset().len());
        out.push_str(self.style.prefix());
        out.push_str(&buf);
        out.push_str(self.style.reset());
    }
}

impl Formatter for StyledConverter {
    fn format(&self, event: &LogEvent, buf: &mut String) {
        StyledConverter::format(self, event, buf)
    }
}
