//! # Command 模块
//!
//! 定义 Animator 向宿主发出的所有指令。
//! Command 是动画逻辑与宿主之间的**唯一通信方式**。
//!
//! ## 设计原则
//!
//! - **声明式**：Command 描述"做什么"，不描述"怎么做"
//! - **无副作用**：Command 本身不执行任何操作
//! - **引擎无关**：不包含任何渲染 / 音频库的类型

use serde::{Deserialize, Serialize};

/// Animator 向宿主发出的指令
///
/// 宿主接收 Command 后，将其转换为实际的面板缩放、文本渲染、
/// 音效播放等操作。宿主缺少某个协作对象（例如没有音源）时，
/// 直接跳过对应指令即可，不视为错误。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// 清空已显示文本
    ClearText,

    /// 追加一段文本
    ///
    /// 普通字符每步追加一个；`<...>` 直通标签整体追加（标签内容
    /// 不参与逐字显示）。
    AppendText {
        /// 追加的内容
        text: String,
    },

    /// 设置面板缩放（非均匀缩放，x 轴用于展开动画）
    SetPanelScale {
        /// 横向缩放
        x: f32,
        /// 纵向缩放
        y: f32,
        /// 深度缩放
        z: f32,
    },

    /// 设置文本透明度（0.0 = 全透明，1.0 = 不透明）
    SetTextAlpha {
        /// 透明度
        alpha: f32,
    },

    /// 播放面板展开音效
    PlayOpenSound,

    /// 播放打字音效
    PlayTypingSound {
        /// 音效片段索引（宿主按自己加载的片段集解释）
        clip_index: usize,
        /// 播放音高（基准音高叠加随机偏移）
        pitch: f32,
    },
}

impl Command {
    /// 创建追加文本指令
    pub fn append(text: impl Into<String>) -> Self {
        Self::AppendText { text: text.into() }
    }

    /// 创建面板缩放指令
    pub fn panel_scale(x: f32, y: f32, z: f32) -> Self {
        Self::SetPanelScale { x, y, z }
    }

    /// 创建文本透明度指令
    pub fn text_alpha(alpha: f32) -> Self {
        Self::SetTextAlpha { alpha }
    }
}
