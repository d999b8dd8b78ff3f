//! 转换器工厂
//!
//! 由样式名和模式选项构造 [`StyledConverter`]。模式字符串交给外部的
//! [`PatternParser`] 解析，样式名通过 [`StyleRegistry`] 解析。
//! 构造失败时报告给注入的 [`DiagnosticReporter`]，并返回 `None`，
//! 而不是中断整个格式化管线。

use crate::config::StyledLayoutConfig;
use crate::core::chain::FormatterChain;
use crate::core::converter::StyledConverter;
use crate::core::style::StyleRegistry;
use crate::diagnostics::{DiagnosticReporter, TracingReporter};
use crate::error::{Result, StyledLayoutError};
use std::fmt;
use std::sync::Arc;

/// 模式解析器
///
/// 把模式字符串解析为格式化链。解析器由外部提供。
pub trait PatternParser: Send + Sync {
    fn parse(&self, pattern: &str) -> Result<FormatterChain>;
}

impl<F> PatternParser for F
where
    F: Fn(&str) -> Result<FormatterChain> + Send + Sync,
{
    fn parse(&self, pattern: &str) -> Result<FormatterChain> {
        self(pattern)
    }
}

/// 样式转换器工厂
///
/// 每次加载配置时调用一次，而不是每个事件调用一次。
#[derive(Clone)]
pub struct ConverterFactory {
    registry: StyleRegistry,
    parser: Option<Arc<dyn PatternParser>>,
    reporter: Arc<dyn DiagnosticReporter>,
}

impl Default for ConverterFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterFactory {
    /// 使用内置样式、没有解析器、通过 tracing 报告错误的工厂
    pub fn new() -> Self {
        Self {
            registry: StyleRegistry::new(),
            parser: None,
            reporter: Arc::new(TracingReporter),
        }
    }

    /// 由配置构建工厂
    pub fn from_config(config: &StyledLayoutConfig) -> Result<Self> {
        Ok(Self::new().with_registry(StyleRegistry::from_config(config)?))
    }

    pub fn with_registry(mut self, registry: StyleRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_parser(mut self, parser: Arc<dyn PatternParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn DiagnosticReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    pub fn has_parser(&self) -> bool {
        self.parser.is_some()
    }

    /// 构造转换器；失败时报告错误并返回 `None`
    ///
    /// `options[0]` 是模式字符串，其余选项被忽略。
    pub fn new_instance<S: AsRef<str>>(
        &self,
        style_name: &str,
        options: &[S],
    ) -> Option<StyledConverter> {
        match self.try_new_instance(style_name, options) {
            Ok(converter) => {
                self.reporter.converter_created(converter.name());
                Some(converter)
            }
            Err(e) => {
                self.reporter.report(&e);
                None
            }
        }
    }

    /// 构造转换器，直接返回错误而不报告
    pub fn try_new_instance<S: AsRef<str>>(
        &self,
        style_name: &str,
        options: &[S],
    ) -> Result<StyledConverter> {
        let chain = self.parse_pattern(style_name, options)?;
        let style = self.registry.resolve(style_name)?;
        Ok(StyledConverter::new(chain, style))
    }

    fn parse_pattern<S: AsRef<str>>(
        &self,
        style_name: &str,
        options: &[S],
    ) -> Result<FormatterChain> {
        let pattern = options
            .first()
            .ok_or_else(|| StyledLayoutError::missing_pattern(style_name))?;
        let parser = self
            .parser
            .as_ref()
            .ok_or_else(|| StyledLayoutError::parser_unavailable(style_name))?;
        parser.parse(pattern.as_ref())
    }
}

impl fmt::Debug for ConverterFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterFactory")
            .field("registry", &self.registry)
            .field("has_parser", &self.parser.is_some())
            .finish()
    }
}
