//! 样式转换器集成测试
//!
//! 使用一个简易的模式解析器，从配置出发构造转换器并格式化完整的日志行。

use std::sync::Arc;
use styled_layout::core::formatters::{
    FieldFormatter, LevelFormatter, LiteralFormatter, LocationFormatter, MessageFormatter,
    TargetFormatter,
};
use styled_layout::{
    load_config_from_str, CollectingReporter, ConverterFactory, Diagnostics, Formatter,
    FormatterChain, LogEvent, PatternParser, Result, StyleRegistry, StyledConverter,
    StyledLayoutError,
};
use tracing::Level;

/// 简易解析器
///
/// 支持 `%m` `%p` `%c` `%L` `%X{key}` 以及嵌套的 `%<style>{...}`。
struct MiniParser {
    registry: StyleRegistry,
}

impl MiniParser {
    fn parse_until(&self, chars: &[char], pos: &mut usize, nested: bool) -> Result<FormatterChain> {
        let mut formatters: Vec<Box<dyn Formatter>> = Vec::new();
        let mut literal = String::new();

        while *pos < chars.len() {
            let c = chars[*pos];
            *pos += 1;
            if c == '}' && nested {
                flush(&mut literal, &mut formatters);
                return Ok(FormatterChain::new(formatters));
            }
            if c != '%' {
                literal.push(c);
                continue;
            }
            flush(&mut literal, &mut formatters);

            let start = *pos;
            while *pos < chars.len() && chars[*pos].is_ascii_alphabetic() {
                *pos += 1;
            }
            let key: String = chars[start..*pos].iter().collect();
            let has_block = *pos < chars.len() && chars[*pos] == '{';

            match (key.as_str(), has_block) {
                ("m", false) => formatters.push(Box::new(MessageFormatter)),
                ("p", false) => formatters.push(Box::new(LevelFormatter)),
                ("c", false) => formatters.push(Box::new(TargetFormatter)),
                ("L", false) => formatters.push(Box::new(LocationFormatter)),
                ("X", true) => {
                    let end = chars[*pos..]
                        .iter()
                        .position(|&c| c == '}')
                        .ok_or_else(|| StyledLayoutError::invalid_pattern("", "unclosed %X"))?;
                    let name: String = chars[*pos + 1..*pos + end].iter().collect();
                    *pos += end + 1;
                    formatters.push(Box::new(FieldFormatter::new(name)));
                }
                (style, true) => {
                    *pos += 1;
                    let inner = self.parse_until(chars, pos, true)?;
                    let style = self.registry.resolve(style)?;
                    formatters.push(Box::new(StyledConverter::new(inner, style)));
                }
                (other, false) => {
                    return Err(StyledLayoutError::invalid_pattern(
                        other,
                        "unknown conversion",
                    ))
                }
            }
        }

        if nested {
            return Err(StyledLayoutError::invalid_pattern("", "unclosed block"));
        }
        flush(&mut literal, &mut formatters);
        Ok(FormatterChain::new(formatters))
    }
}

fn flush(literal: &mut String, formatters: &mut Vec<Box<dyn Formatter>>) {
    if !literal.is_empty() {
        formatters.push(Box::new(LiteralFormatter::new(std::mem::take(literal))));
    }
}

impl PatternParser for MiniParser {
    fn parse(&self, pattern: &str) -> Result<FormatterChain> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut pos = 0;
        self.parse_until(&chars, &mut pos, false)
    }
}

fn build_factory(config_toml: &str) -> (ConverterFactory, Arc<CollectingReporter>) {
    let config = load_config_from_str(config_toml).unwrap();
    let registry = StyleRegistry::from_config(&config).unwrap();
    let reporter = Arc::new(CollectingReporter::new());
    let factory = ConverterFactory::new()
        .with_registry(registry.clone())
        .with_parser(Arc::new(MiniParser { registry }))
        .with_reporter(reporter.clone());
    (factory, reporter)
}

fn format_line(converters: &[StyledConverter], event: &LogEvent) -> String {
    let mut line = String::new();
    for converter in converters {
        converter.format(event, &mut line);
    }
    line
}

#[test]
fn test_full_line_with_multiple_converters() {
    let (factory, reporter) = build_factory(
        r#"
        [styles]
        warning = "bold,yellow"
        "#,
    );

    let converters: Vec<StyledConverter> = [
        ("warning", "[%p] "),
        ("cyan", "%c "),
        ("white", "%m"),
        ("blue", " (%L)"),
    ]
    .iter()
    .filter_map(|(style, pattern)| factory.new_instance(style, &[*pattern]))
    .collect();
    assert_eq!(converters.len(), 4);
    assert!(reporter.is_empty());

    let event = LogEvent::new(Level::WARN, "app::db", "slow query").with_location("db.rs", 88);
    assert_eq!(
        format_line(&converters, &event),
        "\x1b[1;33m[WARN] \x1b[0m\x1b[36mapp::db \x1b[0m\x1b[37mslow query\x1b[0m\x1b[34m (db.rs:88)\x1b[0m"
    );
}

#[test]
fn test_nested_style_converter_disappears_when_empty() {
    let (factory, _) = build_factory("");
    let converter = factory
        .new_instance("green", &["%m%red{ user=%X{user}}"])
        .unwrap();

    let mut line = String::new();
    converter.format(&LogEvent::new(Level::INFO, "app", "login"), &mut line);
    // 内层 literal 仍然输出，因此内层转换器可见
    assert_eq!(line, "\x1b[32mlogin\x1b[31m user=\x1b[0m\x1b[0m");

    let converter = factory.new_instance("green", &["%m%red{%X{user}}"]).unwrap();
    let mut line = String::new();
    converter.format(&LogEvent::new(Level::INFO, "app", "login"), &mut line);
    assert_eq!(line, "\x1b[32mlogin\x1b[0m");

    let mut line = String::new();
    let event = LogEvent::new(Level::INFO, "app", "login").with_field("user", "ada");
    converter.format(&event, &mut line);
    assert_eq!(line, "\x1b[32mlogin\x1b[31mada\x1b[0m\x1b[0m");
}

#[test]
fn test_whole_converter_invisible_for_empty_render() {
    let (factory, _) = build_factory("");
    let location = factory.new_instance("magenta", &["%L"]).unwrap();
    let message = factory.new_instance("white", &["%m"]).unwrap();

    let event = LogEvent::new(Level::INFO, "app", "no location");
    let line = format_line(&[message, location], &event);
    assert_eq!(line, "\x1b[37mno location\x1b[0m");
    assert_eq!(line.matches("\x1b[").count(), 2);
}

#[test]
fn test_ansi_disabled_config() {
    let (factory, _) = build_factory("ansi_enabled = false");
    let converter = factory.new_instance("red", &["[%p] %m"]).unwrap();
    let line = format_line(&[converter], &LogEvent::new(Level::ERROR, "app", "boom"));
    assert_eq!(line, "[ERROR] boom");
}

#[test]
fn test_construction_failures_degrade_to_none() {
    let (factory, reporter) = build_factory("");
    let no_options: [&str; 0] = [];

    assert!(factory.new_instance("red", &no_options).is_none());
    assert!(factory.new_instance("chartreuse", &["%m"]).is_none());
    assert!(factory.new_instance("red", &["%q"]).is_none());
    assert!(factory.new_instance("red", &["%red{%m"]).is_none());

    let categories: Vec<&str> = reporter.reports().iter().map(|r| r.category).collect();
    assert_eq!(
        categories,
        vec![
            "missing_pattern",
            "unknown_style",
            "invalid_pattern",
            "invalid_pattern"
        ]
    );

    // 失败的构造不影响其他转换器
    assert!(factory.new_instance("red", &["%m"]).is_some());
}

#[test]
fn test_factory_without_parser() {
    let diagnostics = Arc::new(Diagnostics::new());
    let factory = ConverterFactory::new().with_reporter(diagnostics.clone());
    assert!(factory.new_instance("red", &["%m"]).is_none());
    assert_eq!(diagnostics.snapshot().parser_unavailable, 1);
}

#[test]
fn test_identical_converters_behave_identically() {
    let (factory, _) = build_factory("");
    let pattern = "%p %c: %m%yellow{ [%X{id}]}";
    let a = factory.new_instance("cyan", &[pattern]).unwrap();
    let b = factory.new_instance("cyan", &[pattern]).unwrap();

    let events = [
        LogEvent::new(Level::INFO, "a", "one"),
        LogEvent::new(Level::DEBUG, "b", "").with_field("id", 7),
        LogEvent::new(Level::TRACE, "", ""),
    ];
    for event in &events {
        assert_eq!(format_line(&[], event), "");
        let mut left = String::new();
        let mut right = String::new();
        a.format(event, &mut left);
        b.format(event, &mut right);
        assert_eq!(left, right);
    }
}
