//! 配置管理模块
//!
//! 提供窗口与日志配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [window]
//! width = 400
//! height = 300
//! title = "Circle Fun"
//! flags = "RESIZABLE | DOUBLEBUF"
//! depth = 0
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::path::Path;

use tracing::warn;

use super::error::{ConfigError, GameError, Result};

bitflags! {
    /// 显示模式标志
    ///
    /// 每一位独立控制窗口的一种呈现方式，可以用 `|` 组合。
    /// winit 后端支持 `FULLSCREEN`（无边框全屏）、`RESIZABLE` 和 `NOFRAME`；
    /// 其余标志只作为提示记录在日志中，由使用窗口句柄的渲染器自行解释。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct DisplayFlags: u32 {
        /// 全屏显示
        const FULLSCREEN = 1 << 0;
        /// 窗口可以调整大小
        const RESIZABLE = 1 << 1;
        /// 无边框、无标题栏
        const NOFRAME = 1 << 2;
        /// 双缓冲（提示）
        const DOUBLEBUF = 1 << 3;
        /// 硬件加速表面（提示）
        const HWSURFACE = 1 << 4;
        /// OpenGL 可渲染表面（提示）
        const OPENGL = 1 << 5;
    }
}

/// 库配置
///
/// 可以从配置文件加载，也可以通过代码构建。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 窗口宽度
    #[serde(default = "default_width")]
    pub width: u32,

    /// 窗口高度
    #[serde(default = "default_height")]
    pub height: u32,

    /// 窗口标题
    #[serde(default = "default_title")]
    pub title: String,

    /// 显示模式标志
    #[serde(default)]
    pub flags: DisplayFlags,

    /// 颜色深度（位），0 表示使用系统最佳值
    #[serde(default)]
    pub depth: u32,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_width() -> u32 { 640 }
fn default_height() -> u32 { 480 }
fn default_title() -> String { "gametails".to_string() }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "gametails.log".to_string() }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            flags: DisplayFlags::empty(),
            depth: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl WindowConfig {
    /// 按分辨率和标题创建窗口配置，其余取默认值
    ///
    /// ```
    /// use gametails::core::{DisplayFlags, WindowConfig};
    ///
    /// let config = WindowConfig::new((400, 300), "Hello, world!")
    ///     .with_flags(DisplayFlags::RESIZABLE);
    /// assert_eq!(config.width, 400);
    /// assert!(config.flags.contains(DisplayFlags::RESIZABLE));
    /// ```
    pub fn new(resolution: (u32, u32), title: impl Into<String>) -> Self {
        Self {
            width: resolution.0,
            height: resolution.1,
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_flags(mut self, flags: DisplayFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// 验证窗口配置
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "window.width/height".to_string(),
                reason: "Window dimensions must be greater than 0".to_string(),
            }.into());
        }

        if !matches!(self.depth, 0 | 8 | 16 | 24 | 32) {
            return Err(ConfigError::InvalidValue {
                field: "window.depth".to_string(),
                reason: "Color depth must be 0, 8, 16, 24, or 32".to_string(),
            }.into());
        }

        Ok(())
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    ///
    /// 成功返回 `Config` 实例，失败返回错误
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，文件不存在时使用默认配置
    ///
    /// 文件存在但无法解析时同样回退到默认配置，并输出一条 warn 日志。
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(config) => config,
            Err(GameError::Config(ConfigError::FileNotFound(_))) => Self::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable config, using defaults");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--width <value>`: 设置窗口宽度
    /// - `--height <value>`: 设置窗口高度
    /// - `--title <value>`: 设置窗口标题
    /// - `--fullscreen`: 打开 `FULLSCREEN` 标志
    /// - `--resizable`: 打开 `RESIZABLE` 标志
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if args.iter().any(|a| a == "--fullscreen") {
            self.window.flags |= DisplayFlags::FULLSCREEN;
        }

        if args.iter().any(|a| a == "--resizable") {
            self.window.flags |= DisplayFlags::RESIZABLE;
        }

        if let Some(width) = arg_value(&args, "--width").and_then(|v| v.parse().ok()) {
            self.window.width = width;
        }

        if let Some(height) = arg_value(&args, "--height").and_then(|v| v.parse().ok()) {
            self.window.height = height;
        }

        if let Some(title) = arg_value(&args, "--title") {
            self.window.title = title.to_string();
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        self.window.validate()
    }
}

fn arg_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    let idx = args.iter().position(|a| a == name)?;
    args.get(idx + 1).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 480);
        assert!(config.window.flags.is_empty());
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.window.width = 0;
        assert!(config.validate().is_err());

        config.window.width = 100;
        config.window.depth = 12;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.apply_args([
            "demo", "--width", "1024", "--height", "768", "--title", "Pokey", "--resizable",
        ]);
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 768);
        assert_eq!(config.window.title, "Pokey");
        assert_eq!(config.window.flags, DisplayFlags::RESIZABLE);

        // 非法数值被忽略
        config.apply_args(["demo", "--width", "wide"]);
        assert_eq!(config.window.width, 1024);
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
            [window]
            width = 400
            height = 300
            title = "Circle Fun"
            flags = "RESIZABLE | NOFRAME"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.window.width, 400);
        assert_eq!(config.window.title, "Circle Fun");
        assert_eq!(config.window.flags, DisplayFlags::RESIZABLE | DisplayFlags::NOFRAME);
        assert_eq!(config.window.depth, 0);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(!config.logging.file_output);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.logging.log_file, "gametails.log");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.window = WindowConfig::new((320, 200), "Saved")
            .with_flags(DisplayFlags::FULLSCREEN | DisplayFlags::OPENGL)
            .with_depth(32);
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.window.width, 320);
        assert_eq!(loaded.window.title, "Saved");
        assert_eq!(loaded.window.flags, DisplayFlags::FULLSCREEN | DisplayFlags::OPENGL);
        assert_eq!(loaded.window.depth, 32);
    }

    /// 把 fmt 订阅者的输出收集到内存里
    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn load(&self, path: &Path) -> Config {
            let writer = self.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_writer(move || writer.clone())
                .with_ansi(false)
                .finish();
            tracing::subscriber::with_default(subscriber, || Config::from_file_or_default(path))
        }

        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    fn test_malformed_file_warns_and_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[window]\nwidth = \"wide\"\n").unwrap();

        let logs = Captured::default();
        let config = logs.load(&path);

        assert_eq!(config.window.width, 640);
        let text = logs.text();
        assert!(text.contains("WARN"), "no warning in {:?}", text);
        assert!(text.contains("Ignoring unreadable config"));
    }

    #[test]
    fn test_missing_file_falls_back_quietly() {
        let dir = tempfile::tempdir().unwrap();
        let logs = Captured::default();
        let config = logs.load(&dir.path().join("absent.toml"));

        assert_eq!(config.window.width, 640);
        assert!(logs.text().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
        assert_eq!(Config::from_file_or_default("/definitely/not/here.toml").window.width, 640);
    }
}
