//! # Dialog Runtime
//!
//! 对话框"打字机"动画的核心运行时库。
//!
//! ## 架构概述
//!
//! `dialog-runtime` 是纯逻辑核心，不依赖任何 IO、渲染或音频引擎。
//! 它通过 **指令驱动模式** 与宿主层（Host）通信：
//!
//! ```text
//! Host                               Runtime
//!   │                                   │
//!   │──── show / update(dt) ──────────►│
//!   │                                   │ 状态机推进
//!   │◄─── Vec<Command> ────────────────│
//!   │                                   │
//! ```
//!
//! 面板展开（横向缩放 + 文本淡入）与逐字显示都被建模为独立调度的
//! 步骤：每个步骤执行后立即返回，并以 [`Schedule`] 请求宿主在指定
//! 延迟后重新触发下一步。每个步骤携带会话令牌，`show` /
//! `close_dialog` 之前排队的过期步骤在执行时被证明性地丢弃。
//!
//! ## 核心类型
//!
//! - [`DialogAnimator`]：状态机本体（show / animate_open / type_text / close_dialog）
//! - [`DialogDriver`]：面向宿主主循环的调度器外观（show / update(dt)）
//! - [`Command`]：Runtime 向 Host 发出的指令
//! - [`Schedule`]：步骤的重触发请求
//! - [`DialogConfig`]：全部配置项（时长、节奏、音效开关等）
//!
//! ## 标记迷你语法
//!
//! - `<...>`：富文本直通标签，整体追加、占一个步骤
//! - `[br]`：停顿指令（精确匹配），停 `wait_after_br` 秒、无输出
//! - 未闭合 / 未识别的标记按普通字符逐字显示
//!
//! ## 模块结构
//!
//! - [`command`]：Command 定义
//! - [`config`]：配置项定义
//! - [`state`]：阶段、步骤令牌与调度请求
//! - [`markup`]：内联标记扫描
//! - [`animator`]：状态机
//! - [`driver`]：协作式调度器
//! - [`error`]：错误类型定义

pub mod animator;
pub mod command;
pub mod config;
pub mod driver;
pub mod error;
pub mod markup;
pub mod state;

// 重导出核心类型
pub use animator::DialogAnimator;
pub use command::Command;
pub use config::{DialogConfig, PanelCollapse};
pub use driver::DialogDriver;
pub use error::{ConfigError, DialogError, DialogResult};
pub use state::{Phase, Schedule, StepKind, StepToken};
