//! 错误处理模块
//!
//! 定义了库中使用的统一错误类型，使用 `thiserror` 提供友好的错误消息。
//!
//! # 错误分类
//!
//! - 窗口系统初始化失败：直接返回给调用者，不做恢复
//! - 配置错误：配置文件缺失、解析失败或取值无效
//! - 对象注册表错误：销毁一个不存在的对象 id
//! - 钩子函数错误：用户回调返回的错误，会立即中断当前帧并从主循环返回

use thiserror::Error;

use crate::component::ObjectId;

/// 库统一的 Result 类型
///
/// 所有可能返回错误的函数（包括用户实现的钩子）都使用这个类型。
pub type Result<T> = std::result::Result<T, GameError>;

/// 游戏循环的错误类型
#[derive(Debug, Error)]
pub enum GameError {
    /// 窗口系统初始化失败（事件循环或窗口创建失败）
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 对象 id 不在注册表中
    #[error("No object registered under id {0}")]
    UnknownObject(ObjectId),

    /// 运行时错误（通常来自用户钩子）
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// 配置相关的错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件未找到
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    /// 配置文件解析失败
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// 配置值无效
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl GameError {
    /// 用任意消息构造运行时错误，方便在钩子里使用 `?`
    pub fn runtime(msg: impl Into<String>) -> Self {
        GameError::Runtime(msg.into())
    }
}
