//! # Error 模块
//!
//! 定义 dialog-runtime 中使用的错误类型。
//!
//! 注意：过期回调**不是**错误——它们静默退化为空操作。
//! 这里只对配置类问题建模。

use thiserror::Error;

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 时长 / 间隔类配置必须为正数
    #[error("配置项 '{field}' 必须为正数，当前值为 {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// 音效触发间隔不能为 0（每 N 个字符触发一次）
    #[error("配置项 'sound_every_chars' 不能为 0")]
    ZeroSoundInterval,

    /// 音高抖动幅度不能为负数
    #[error("配置项 'pitch_variation' 不能为负数，当前值为 {value}")]
    NegativePitchVariation { value: f32 },

    /// 基准音高必须为正数
    #[error("配置项 'base_pitch' 必须为正数，当前值为 {value}")]
    NonPositivePitch { value: f32 },
}

/// dialog-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DialogError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type DialogResult<T> = Result<T, DialogError>;
