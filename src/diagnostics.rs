//! 构造期诊断。
//!
//! 转换器工厂在构造失败时不会中断整个格式化管线，而是把错误报告给注入的
//! [`DiagnosticReporter`]，再退化为"转换器不可用"。此模块提供几种报告器，
//! 以及记录构造结果的原子计数器。

use crate::error::StyledLayoutError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// 构造期错误的报告通道。
pub trait DiagnosticReporter: Send + Sync {
    /// 报告一个构造期错误。
    fn report(&self, error: &StyledLayoutError);

    /// 记录一次成功的构造，默认不做任何事。
    fn converter_created(&self, _name: &str) {}
}

impl<R: DiagnosticReporter + ?Sized> DiagnosticReporter for Arc<R> {
    fn report(&self, error: &StyledLayoutError) {
        (**self).report(error)
    }

    fn converter_created(&self, name: &str) {
        (**self).converter_created(name)
    }
}

/// 通过 `tracing` 输出错误日志的报告器。
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl DiagnosticReporter for TracingReporter {
    fn report(&self, error: &StyledLayoutError) {
        tracing::error!(category = error.category(), "{}", error);
    }

    fn converter_created(&self, name: &str) {
        tracing::debug!(style = name, "Styled converter created");
    }
}

/// 在内存中收集错误的报告器，主要用于测试。
#[derive(Debug, Default)]
pub struct CollectingReporter {
    reports: Mutex<Vec<ReportedError>>,
}

/// 已报告的错误。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedError {
    pub category: &'static str,
    pub message: String,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已收集的错误副本。
    pub fn reports(&self) -> Vec<ReportedError> {
        match self.reports.lock() {
            Ok(reports) => reports.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.reports().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticReporter for CollectingReporter {
    fn report(&self, error: &StyledLayoutError) {
        let reported = ReportedError {
            category: error.category(),
            message: error.to_string(),
        };
        match self.reports.lock() {
            Ok(mut reports) => reports.push(reported),
            Err(poisoned) => poisoned.into_inner().push(reported),
        }
    }
}

/// 把报告转发给多个报告器。
#[derive(Default)]
pub struct FanOutReporter {
    reporters: Vec<Arc<dyn DiagnosticReporter>>,
}

impl FanOutReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reporter: Arc<dyn DiagnosticReporter>) -> Self {
        self.reporters.push(reporter);
        self
    }
}

impl DiagnosticReporter for FanOutReporter {
    fn report(&self, error: &StyledLayoutError) {
        for reporter in &self.reporters {
            reporter.report(error);
        }
    }

    fn converter_created(&self, name: &str) {
        for reporter in &self.reporters {
            reporter.converter_created(name);
        }
    }
}

/// 构造结果计数器。
///
/// 使用原子操作确保线程安全；只在构造时更新，不涉及逐事件的格式化路径。
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// 成功构造的转换器数
    converters_created: AtomicU64,

    /// 缺少模式的构造失败数
    missing_pattern: AtomicU64,

    /// 没有可用解析器的构造失败数
    parser_unavailable: AtomicU64,

    /// 模式无效的构造失败数
    invalid_pattern: AtomicU64,

    /// 未知样式名的构造失败数
    unknown_style: AtomicU64,

    /// 其他错误数
    other_errors: AtomicU64,
}

/// 诊断数据的快照，用于外部查询。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiagnosticsSnapshot {
    pub converters_created: u64,
    pub missing_pattern: u64,
    pub parser_unavailable: u64,
    pub invalid_pattern: u64,
    pub unknown_style: u64,
    pub other_errors: u64,
    /// 构造失败总数
    pub total_failures: u64,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取诊断数据的快照。
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        let missing_pattern = self.missing_pattern.load(Ordering::Relaxed);
        let parser_unavailable = self.parser_unavailable.load(Ordering::Relaxed);
        let invalid_pattern = self.invalid_pattern.load(Ordering::Relaxed);
        let unknown_style = self.unknown_style.load(Ordering::Relaxed);
        let other_errors = self.other_errors.load(Ordering::Relaxed);

        DiagnosticsSnapshot {
            converters_created: self.converters_created.load(Ordering::Relaxed),
            missing_pattern,
            parser_unavailable,
            invalid_pattern,
            unknown_style,
            other_errors,
            total_failures: missing_pattern
                + parser_unavailable
                + invalid_pattern
                + unknown_style
                + other_errors,
        }
    }

    /// 重置所有计数器（主要用于测试）。
    pub fn reset(&self) {
        self.converters_created.store(0, Ordering::Relaxed);
        self.missing_pattern.store(0, Ordering::Relaxed);
        self.parser_unavailable.store(0, Ordering::Relaxed);
        self.invalid_pattern.store(0, Ordering::Relaxed);
        self.unknown_style.store(0, Ordering::Relaxed);
        self.other_errors.store(0, Ordering::Relaxed);
    }
}

impl DiagnosticReporter for Diagnostics {
    fn report(&self, error: &StyledLayoutError) {
        let counter = match error {
            StyledLayoutError::MissingPattern { .. } => &self.missing_pattern,
            StyledLayoutError::ParserUnavailable { .. } => &self.parser_unavailable,
            StyledLayoutError::InvalidPattern { .. } => &self.invalid_pattern,
            StyledLayoutError::UnknownStyleName(_) => &self.unknown_style,
            _ => &self.other_errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn converter_created(&self, _name: &str) {
        self.converters_created.fetch_add(1, Ordering::Relaxed);
    }
}

/// 全局诊断实例，使用 Arc 包装以支持多线程访问。
static GLOBAL_DIAGNOSTICS: std::sync::OnceLock<Arc<Diagnostics>> = std::sync::OnceLock::new();

/// 初始化全局诊断实例，重复调用返回同一个实例。
pub fn init_diagnostics() -> Arc<Diagnostics> {
    GLOBAL_DIAGNOSTICS
        .get_or_init(|| Arc::new(Diagnostics::new()))
        .clone()
}

/// 获取全局诊断快照；尚未初始化时返回 None。
pub fn get_diagnostics() -> Option<DiagnosticsSnapshot> {
    GLOBAL_DIAGNOSTICS.get().map(|d| d.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_counts_by_category() {
        let diagnostics = Diagnostics::new();
        diagnostics.converter_created("red");
        diagnostics.converter_created("blue");
        diagnostics.report(&StyledLayoutError::missing_pattern("red"));
        diagnostics.report(&StyledLayoutError::parser_unavailable("red"));
        diagnostics.report(&StyledLayoutError::unknown_style("mauve"));
        diagnostics.report(&StyledLayoutError::unknown_style("teal"));
        diagnostics.report(&StyledLayoutError::invalid_pattern("%", "dangling"));
        diagnostics.report(&StyledLayoutError::config("other"));

        let snapshot = diagnostics.snapshot();
        assert_eq!(snapshot.converters_created, 2);
        assert_eq!(snapshot.missing_pattern, 1);
        assert_eq!(snapshot.parser_unavailable, 1);
        assert_eq!(snapshot.unknown_style, 2);
        assert_eq!(snapshot.invalid_pattern, 1);
        assert_eq!(snapshot.other_errors, 1);
        assert_eq!(snapshot.total_failures, 6);
    }

    #[test]
    fn test_diagnostics_reset() {
        let diagnostics = Diagnostics::new();
        diagnostics.converter_created("red");
        diagnostics.report(&StyledLayoutError::missing_pattern("red"));
        diagnostics.reset();
        assert_eq!(diagnostics.snapshot(), DiagnosticsSnapshot::default());
    }

    #[test]
    fn test_collecting_reporter() {
        let reporter = CollectingReporter::new();
        assert!(reporter.is_empty());
        reporter.report(&StyledLayoutError::missing_pattern("green"));
        assert_eq!(
            reporter.reports(),
            vec![ReportedError {
                category: "missing_pattern",
                message: "No pattern supplied on style 'green'".to_string(),
            }]
        );
    }

    #[test]
    fn test_fan_out_reporter() {
        let collector = Arc::new(CollectingReporter::new());
        let diagnostics = Arc::new(Diagnostics::new());
        let reporter = FanOutReporter::new()
            .with(collector.clone())
            .with(diagnostics.clone())
            .with(Arc::new(TracingReporter));

        reporter.report(&StyledLayoutError::unknown_style("mauve"));
        reporter.converter_created("red");

        assert_eq!(collector.len(), 1);
        assert_eq!(diagnostics.snapshot().unknown_style, 1);
        assert_eq!(diagnostics.snapshot().converters_created, 1);
    }

    #[test]
    fn test_global_diagnostics() {
        let first = init_diagnostics();
        let second = init_diagnostics();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(get_diagnostics().is_some());
    }
}
