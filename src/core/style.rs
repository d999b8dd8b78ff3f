//! 样式解析
//!
//! 把样式名解析为 ANSI SGR 转义序列。所有样式共用同一个复位序列 `ESC[0m`。
//!
//! 样式规格是一组以逗号或空白分隔的记号：
//!
//! - 前景色：`red`、`bright_red` 等
//! - 背景色：`bg_blue`、`bg_bright_white` 等
//! - 文本属性：`bold`、`dim`、`italic`、`underline`、`blink`、`reverse`、`hidden`、`strikethrough`
//!
//! 例如 `bold,red` 解析为 `ESC[1;31m`。

use crate::config::StyledLayoutConfig;
use crate::error::{Result, StyledLayoutError};
use colored::Color;
use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::HashMap;

/// 控制序列引导符
pub const CSI: &str = "\x1b[";

/// 所有样式共用的复位序列
pub const RESET: &str = "\x1b[0m";

/// 内置的样式转换器名称
pub const BUILTIN_STYLE_NAMES: [&str; 8] = [
    "black", "blue", "cyan", "green", "magenta", "red", "white", "yellow",
];

/// 一个已解析的样式：激活序列与复位序列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    name: String,
    prefix: String,
    reset: &'static str,
}

impl Style {
    /// 解析样式规格
    ///
    /// `name` 仅用于标识；`spec` 中的每个记号都必须可识别。
    pub fn parse<N: Into<String>>(name: N, spec: &str) -> Result<Self> {
        let name = name.into();
        let codes = spec
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                sgr_code(token).ok_or_else(|| {
                    StyledLayoutError::unknown_style(format!("{} (token '{}')", name, token))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if codes.is_empty() {
            return Err(StyledLayoutError::unknown_style(name));
        }

        Ok(Self {
            prefix: format!("{}{}m", CSI, codes.join(";")),
            name,
            reset: RESET,
        })
    }

    /// 不带任何转义序列的样式，用于关闭 ANSI 输出
    pub fn plain<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            prefix: String::new(),
            reset: "",
        }
    }

    /// 样式名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 激活序列
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// 复位序列
    pub fn reset(&self) -> &str {
        self.reset
    }

    /// 是否为无转义序列的样式
    pub fn is_plain(&self) -> bool {
        self.prefix.is_empty() && self.reset.is_empty()
    }
}

/// 把单个记号映射为 SGR 参数
fn sgr_code(token: &str) -> Option<Cow<'static, str>> {
    let token = token.to_lowercase();
    let attribute = match token.as_str() {
        "bold" => Some("1"),
        "dim" | "faint" => Some("2"),
        "italic" => Some("3"),
        "underline" => Some("4"),
        "blink" => Some("5"),
        "reverse" => Some("7"),
        "hidden" => Some("8"),
        "strikethrough" => Some("9"),
        _ => None,
    };
    if let Some(code) = attribute {
        return Some(Cow::Borrowed(code));
    }

    match token.strip_prefix("bg_") {
        Some(color) => parse_color(color).map(|c| c.to_bg_str()),
        None => parse_color(&token).map(|c| c.to_fg_str()),
    }
}

/// `bright_red` 形式转换为 colored 认识的 `bright red`
fn parse_color(name: &str) -> Option<Color> {
    name.replace('_', " ").parse::<Color>().ok()
}

/// 样式注册表
///
/// 把转换器名称（大小写不敏感）映射到样式规格，在配置加载时解析一次。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRegistry {
    specs: HashMap<String, String>,
    ansi_enabled: bool,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleRegistry {
    /// 只包含内置颜色的注册表
    pub fn new() -> Self {
        let specs = BUILTIN_STYLE_NAMES
            .iter()
            .map(|name| (name.to_string(), name.to_string()))
            .collect();
        Self {
            specs,
            ansi_enabled: true,
        }
    }

    /// 由配置构建注册表，自定义样式会覆盖同名的内置样式
    pub fn from_config(config: &StyledLayoutConfig) -> Result<Self> {
        check_style_names(&config.styles)?;
        let mut registry = Self::new().with_ansi(config.ansi_enabled);
        for (name, spec) in &config.styles {
            registry.register(name, spec)?;
        }
        Ok(registry)
    }

    /// 开启或关闭 ANSI 输出
    pub fn with_ansi(mut self, enabled: bool) -> Self {
        self.ansi_enabled = enabled;
        self
    }

    /// 注册样式，规格在注册时校验
    pub fn register(&mut self, name: &str, spec: &str) -> Result<()> {
        validate_style_name(name)?;
        Style::parse(name, spec)?;
        self.specs.insert(name.to_lowercase(), spec.to_string());
        Ok(())
    }

    /// 注册样式（构建器形式）
    pub fn with_style(mut self, name: &str, spec: &str) -> Result<Self> {
        self.register(name, spec)?;
        Ok(self)
    }

    /// 是否已注册
    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(&name.to_lowercase())
    }

    /// 已注册的名称，按字母排序
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.specs.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn ansi_enabled(&self) -> bool {
        self.ansi_enabled
    }

    /// 解析样式名
    ///
    /// 未注册的名称返回 `UnknownStyleName`，即使 ANSI 已关闭。
    pub fn resolve(&self, name: &str) -> Result<Style> {
        let key = name.to_lowercase();
        let spec = self
            .specs
            .get(&key)
            .ok_or_else(|| StyledLayoutError::unknown_style(name))?;

        if self.ansi_enabled {
            Style::parse(key, spec)
        } else {
            Ok(Style::plain(key))
        }
    }
}

/// 样式名只能包含字母、数字和下划线
pub fn validate_style_name(name: &str) -> Result<()> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(StyledLayoutError::config(format!(
            "样式名只能包含字母、数字和下划线: '{}'",
            name
        )));
    }
    Ok(())
}

/// 校验一组自定义样式名：名称合法，且忽略大小写后不重复
pub fn check_style_names(styles: &HashMap<String, String>) -> Result<()> {
    let mut names: Vec<&str> = styles.keys().map(|s| s.as_str()).collect();
    names.sort_unstable();

    let mut seen: HashMap<String, &str> = HashMap::with_capacity(names.len());
    for name in names {
        validate_style_name(name)?;
        if let Some(previous) = seen.insert(name.to_lowercase(), name) {
            return Err(StyledLayoutError::config(format!(
                "样式名忽略大小写后重复: '{}' 与 '{}'",
                previous, name
            )));
        }
    }
    Ok(())
}

static DEFAULT_REGISTRY: Lazy<StyleRegistry> = Lazy::new(StyleRegistry::new);

/// 进程级默认注册表，只包含内置颜色
pub fn default_registry() -> &'static StyleRegistry {
    &DEFAULT_REGISTRY
}
