//! # Config 模块
//!
//! 对话框动画的全部配置项，统一两个历史变体的特性并集：
//! 展开动画、逐字显示、`[br]` 停顿、开启音效、打字音效
//! （含片段随机与音高抖动）。
//!
//! 所有字段都带 serde 默认值，缺省配置即可直接使用。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// `show` 时的面板收拢方式
///
/// 两个历史变体在这里并不一致（一个只收拢横轴，一个整体归零），
/// 因此作为显式配置项保留，不做猜测。`close_dialog` 则总是整体
/// 归零——这一点两个变体是一致的。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelCollapse {
    /// 只收拢横轴（scale = (0, 1, 1)），展开时纵轴保持不变
    Horizontal,
    /// 整体归零（scale = (0, 0, 0)）
    Full,
}

impl PanelCollapse {
    /// `show` 复位时的面板缩放
    pub fn show_scale(&self) -> (f32, f32, f32) {
        match self {
            Self::Horizontal => (0.0, 1.0, 1.0),
            Self::Full => (0.0, 0.0, 0.0),
        }
    }
}

impl Default for PanelCollapse {
    fn default() -> Self {
        Self::Horizontal
    }
}

/// 对话框动画配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogConfig {
    /// 面板展开动画时长（秒）
    #[serde(default = "default_open_duration")]
    pub open_duration: f32,

    /// 逐字显示间隔（秒）
    #[serde(default = "default_text_speed")]
    pub text_speed: f32,

    /// 展开动画的步进间隔（秒）
    ///
    /// 展开动画是固定步长的补间，实际时长为
    /// `ceil(open_duration / update_interval) * update_interval`，
    /// 一般略长于 `open_duration`——这是近似，不是精确计时。
    #[serde(default = "default_update_interval")]
    pub update_interval: f32,

    /// `[br]` 指令触发的停顿时长（秒）
    #[serde(default = "default_wait_after_br")]
    pub wait_after_br: f32,

    /// 是否启用打字机效果
    ///
    /// 关闭时每个字符仍占一次回调，只是以下一帧的零延迟节奏推进
    /// （快进模式，不是同步一次性刷出）。
    #[serde(default = "default_true")]
    pub enable_typing_effect: bool,

    /// 是否启用打字音效
    #[serde(default = "default_true")]
    pub enable_typing_sound: bool,

    /// 是否在 `show` 时播放展开音效
    #[serde(default = "default_true")]
    pub enable_open_sound: bool,

    /// 每 N 个已显示的普通字符触发一次打字音效（从第一个字符起算）
    #[serde(default = "default_sound_every_chars")]
    pub sound_every_chars: usize,

    /// 打字音效片段数量（0 表示宿主没有片段集，不发声音指令）
    #[serde(default = "default_typing_clip_count")]
    pub typing_clip_count: usize,

    /// 基准音高（`show` 时采样一次，之后在其上叠加抖动）
    #[serde(default = "default_base_pitch")]
    pub base_pitch: f32,

    /// 音高抖动幅度（在 `base_pitch ± pitch_variation` 内均匀取值，
    /// 0 表示不抖动）
    #[serde(default = "default_pitch_variation")]
    pub pitch_variation: f32,

    /// `show` 时的面板收拢方式
    #[serde(default)]
    pub show_collapse: PanelCollapse,
}

// 默认值函数
fn default_open_duration() -> f32 {
    0.3
}

fn default_text_speed() -> f32 {
    0.02
}

fn default_update_interval() -> f32 {
    0.02
}

fn default_wait_after_br() -> f32 {
    0.5
}

fn default_true() -> bool {
    true
}

fn default_sound_every_chars() -> usize {
    2
}

fn default_typing_clip_count() -> usize {
    1
}

fn default_base_pitch() -> f32 {
    1.0
}

fn default_pitch_variation() -> f32 {
    0.05
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            open_duration: default_open_duration(),
            text_speed: default_text_speed(),
            update_interval: default_update_interval(),
            wait_after_br: default_wait_after_br(),
            enable_typing_effect: true,
            enable_typing_sound: true,
            enable_open_sound: true,
            sound_every_chars: default_sound_every_chars(),
            typing_clip_count: default_typing_clip_count(),
            base_pitch: default_base_pitch(),
            pitch_variation: default_pitch_variation(),
            show_collapse: PanelCollapse::default(),
        }
    }
}

impl DialogConfig {
    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 时长 / 间隔必须为正数
        for (field, value) in [
            ("open_duration", self.open_duration),
            ("text_speed", self.text_speed),
            ("update_interval", self.update_interval),
            ("wait_after_br", self.wait_after_br),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.sound_every_chars == 0 {
            return Err(ConfigError::ZeroSoundInterval);
        }

        if self.pitch_variation < 0.0 {
            return Err(ConfigError::NegativePitchVariation {
                value: self.pitch_variation,
            });
        }

        if !(self.base_pitch > 0.0) {
            return Err(ConfigError::NonPositivePitch {
                value: self.base_pitch,
            });
        }

        Ok(())
    }
}
