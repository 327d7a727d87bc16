//! # State 模块
//!
//! 定义动画会话的阶段模型与调度请求。
//!
//! ## 设计原则
//!
//! - 阶段用枚举**显式建模**，不允许两个布尔标志同时为真的灰色状态
//! - 每一个被调度的步骤都携带 [`StepToken`]，执行时与当前会话比对，
//!   过期回调必然被丢弃，而不是仅靠标志位"碰巧"拦住

use serde::{Deserialize, Serialize};

/// 动画阶段
///
/// # 状态转换
///
/// ```text
/// Idle ──show──► Opening ──t>=1──► Typing ──文本耗尽──► Idle
///   ▲                                                    │
///   └────────────────── close_dialog（任意阶段）◄─────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// 空闲（初始状态，也是打字结束 / 关闭后的状态）
    Idle,
    /// 面板展开动画中
    Opening,
    /// 逐字显示中
    Typing,
}

impl Phase {
    /// 是否有动画正在进行
    pub fn is_animating(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

/// 步骤类型
///
/// 对应对外契约中的两个可重入操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    /// 面板展开动画步骤
    AnimateOpen,
    /// 逐字显示步骤
    TypeText,
}

/// 步骤令牌
///
/// `show` / `close_dialog` 都会递增会话号，因此任何在这之前排队的
/// 步骤在执行时都会因会话号不匹配而成为无害的空操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepToken {
    /// 所属会话号（单调递增）
    pub session: u64,
    /// 步骤类型
    pub kind: StepKind,
}

impl StepToken {
    /// 创建步骤令牌
    pub fn new(session: u64, kind: StepKind) -> Self {
        Self { session, kind }
    }
}

/// 调度请求
///
/// Animator 的每个操作返回本请求，由宿主（或 [`crate::DialogDriver`]）
/// 负责在指定时机重新调用对应步骤。"等待"完全由宿主侧的时间流逝建模，
/// Animator 本身立即返回。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Schedule {
    /// 在指定秒数后执行步骤
    AfterSeconds {
        /// 步骤令牌
        token: StepToken,
        /// 延迟（秒）
        delay: f32,
    },

    /// 在下一帧执行步骤（快进模式，零延迟但仍是异步的）
    NextFrame {
        /// 步骤令牌
        token: StepToken,
    },

    /// 无后续步骤（序列结束或回调已过期）
    Idle,
}

impl Schedule {
    /// 创建延迟调度
    pub fn after_seconds(token: StepToken, delay: f32) -> Self {
        Self::AfterSeconds { token, delay }
    }

    /// 创建下一帧调度
    pub fn next_frame(token: StepToken) -> Self {
        Self::NextFrame { token }
    }

    /// 是否没有后续步骤
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// 获取调度中携带的令牌
    pub fn token(&self) -> Option<StepToken> {
        match self {
            Self::AfterSeconds { token, .. } | Self::NextFrame { token } => Some(*token),
            Self::Idle => None,
        }
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_is_animating() {
        assert!(!Phase::Idle.is_animating());
        assert!(Phase::Opening.is_animating());
        assert!(Phase::Typing.is_animating());
    }

    #[test]
    fn test_schedule_helpers() {
        let token = StepToken::new(1, StepKind::TypeText);

        let s = Schedule::after_seconds(token, 0.02);
        assert!(!s.is_idle());
        assert_eq!(s.token(), Some(token));

        let s = Schedule::next_frame(token);
        assert!(!s.is_idle());
        assert_eq!(s.token(), Some(token));

        assert!(Schedule::Idle.is_idle());
        assert_eq!(Schedule::Idle.token(), None);
    }

    #[test]
    fn test_schedule_serialization() {
        let s = Schedule::after_seconds(StepToken::new(3, StepKind::AnimateOpen), 0.5);
        let json = serde_json::to_string(&s).unwrap();
        let deserialized: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(s, deserialized);
    }
}
