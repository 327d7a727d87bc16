//! # Animator 模块
//!
//! 对话框动画的核心状态机。
//!
//! ## 执行模型
//!
//! ```text
//! show(text)        -> (Vec<Command>, Schedule)
//! animate_open(tok) -> (Vec<Command>, Schedule)   // 重复调度直至展开完成
//! type_text(tok)    -> (Vec<Command>, Schedule)   // 重复调度直至文本耗尽
//! close_dialog()    -> Vec<Command>
//! ```
//!
//! 每个操作立即返回：副作用以 [`Command`] 形式交给宿主执行，
//! "等待"以 [`Schedule`] 形式交给宿主（或 [`crate::DialogDriver`]）
//! 计时。`show` / `close_dialog` 递增会话号，过期的调度步骤在
//! 执行时因令牌不匹配而静默退化为空操作。

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::command::Command;
use crate::config::DialogConfig;
use crate::error::DialogResult;
use crate::markup::{self, Token};
use crate::state::{Phase, Schedule, StepKind, StepToken};

/// 对话框动画状态机
///
/// 实例跨多次 `show` 复用，从不销毁；每次 `show` 重置全部可变状态
/// 并开启一个新会话。
///
/// # 使用示例
///
/// ```ignore
/// let mut animator = DialogAnimator::new(DialogConfig::default())?;
///
/// let (commands, mut schedule) = animator.show("你好[br]！");
/// host.execute(&commands);
///
/// while let Some(token) = schedule.token() {
///     host.wait_for(&schedule);
///     let (commands, next) = match token.kind {
///         StepKind::AnimateOpen => animator.animate_open(token),
///         StepKind::TypeText => animator.type_text(token),
///     };
///     host.execute(&commands);
///     schedule = next;
/// }
/// ```
pub struct DialogAnimator {
    /// 配置（仅通过两个开关 setter 修改）
    config: DialogConfig,
    /// 本会话要显示的完整文本
    full_text: Vec<char>,
    /// 逐字显示游标（单调递增）
    char_index: usize,
    /// 展开动画已累计的时间（秒）
    open_progress: f32,
    /// 当前阶段
    phase: Phase,
    /// 会话号（show / close_dialog 时递增）
    session: u64,
    /// 本会话已显示的普通字符数（音效节奏以它为准，标签不计入）
    revealed_count: usize,
    /// 本会话的基准音高（show 时采样一次）
    base_pitch: f32,
    /// 音效片段 / 音高抖动用的随机数发生器
    rng: SmallRng,
}

impl DialogAnimator {
    /// 创建状态机
    pub fn new(config: DialogConfig) -> DialogResult<Self> {
        Self::build(config, SmallRng::from_entropy())
    }

    /// 创建带固定随机种子的状态机（测试 / 回放用）
    pub fn with_seed(config: DialogConfig, seed: u64) -> DialogResult<Self> {
        Self::build(config, SmallRng::seed_from_u64(seed))
    }

    fn build(config: DialogConfig, rng: SmallRng) -> DialogResult<Self> {
        config.validate()?;
        let base_pitch = config.base_pitch;
        Ok(Self {
            config,
            full_text: Vec::new(),
            char_index: 0,
            open_progress: 0.0,
            phase: Phase::Idle,
            session: 0,
            revealed_count: 0,
            base_pitch,
            rng,
        })
    }

    /// 当前阶段
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 当前会话号
    pub fn session(&self) -> u64 {
        self.session
    }

    /// 配置
    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// 开始显示一段文本
    ///
    /// 重置全部可变状态，面板收拢、文本清空并全透明，可选地播放
    /// 展开音效，然后调度第一个展开步骤。
    pub fn show(&mut self, text: &str) -> (Vec<Command>, Schedule) {
        self.session += 1;
        self.full_text = text.chars().collect();
        self.char_index = 0;
        self.open_progress = 0.0;
        self.revealed_count = 0;
        self.phase = Phase::Opening;
        // 基准音高在 show 时采样一次，会话期间不再读取配置
        self.base_pitch = self.config.base_pitch;

        let (x, y, z) = self.config.show_collapse.show_scale();
        let mut commands = vec![
            Command::ClearText,
            Command::panel_scale(x, y, z),
            Command::text_alpha(0.0),
        ];
        if self.config.enable_open_sound {
            commands.push(Command::PlayOpenSound);
        }

        let schedule = Schedule::after_seconds(
            self.token(StepKind::AnimateOpen),
            self.config.update_interval,
        );
        (commands, schedule)
    }

    /// 展开动画步骤
    ///
    /// 固定步长推进展开补间：横向缩放与文本透明度都取归一化进度
    /// `t = clamp(open_progress / open_duration, 0, 1)`。
    /// `t < 1` 时重新调度自身，否则转入逐字显示阶段。
    pub fn animate_open(&mut self, token: StepToken) -> (Vec<Command>, Schedule) {
        if !self.accepts(token, StepKind::AnimateOpen, Phase::Opening) {
            return (Vec::new(), Schedule::Idle);
        }

        self.open_progress += self.config.update_interval;
        let t = (self.open_progress / self.config.open_duration).clamp(0.0, 1.0);

        let commands = vec![Command::panel_scale(t, 1.0, 1.0), Command::text_alpha(t)];

        let schedule = if t < 1.0 {
            Schedule::after_seconds(
                self.token(StepKind::AnimateOpen),
                self.config.update_interval,
            )
        } else {
            self.phase = Phase::Typing;
            Schedule::after_seconds(self.token(StepKind::TypeText), self.config.text_speed)
        };
        (commands, schedule)
    }

    /// 逐字显示步骤
    ///
    /// 每次调用处理一个标记：
    ///
    /// 1. `<...>` 标签整体追加，占一个调度步（与长度无关）
    /// 2. `[br]` 不追加任何内容，按 `wait_after_br` 调度下一步
    /// 3. 普通字符追加一个，按节奏触发打字音效；
    ///    打字机效果关闭时以下一帧的零延迟节奏推进（快进模式）
    ///
    /// 游标到达文本末尾时转入 Idle，不再调度。
    pub fn type_text(&mut self, token: StepToken) -> (Vec<Command>, Schedule) {
        if !self.accepts(token, StepKind::TypeText, Phase::Typing) {
            return (Vec::new(), Schedule::Idle);
        }

        let Some((scanned, next_index)) = markup::next_token(&self.full_text, self.char_index)
        else {
            // 文本耗尽，序列自然结束
            self.phase = Phase::Idle;
            return (Vec::new(), Schedule::Idle);
        };
        self.char_index = next_index;

        let next_step = self.token(StepKind::TypeText);
        match scanned {
            Token::Tag(tag) => (
                vec![Command::append(tag)],
                Schedule::after_seconds(next_step, self.config.text_speed),
            ),
            Token::Break => (
                Vec::new(),
                Schedule::after_seconds(next_step, self.config.wait_after_br),
            ),
            Token::Plain(c) => {
                self.revealed_count += 1;

                let mut commands = vec![Command::append(c.to_string())];
                if let Some(sound) = self.typing_sound_command() {
                    commands.push(sound);
                }

                let schedule = if self.config.enable_typing_effect {
                    Schedule::after_seconds(next_step, self.config.text_speed)
                } else {
                    Schedule::next_frame(next_step)
                };
                (commands, schedule)
            }
        }
    }

    /// 关闭对话框
    ///
    /// 任意阶段均可调用：面板整体归零、文本清空、转入 Idle。
    /// 不取消已排队的回调——会话号递增后它们在执行时必然成为空操作。
    pub fn close_dialog(&mut self) -> Vec<Command> {
        self.session += 1;
        self.phase = Phase::Idle;
        self.full_text.clear();
        self.char_index = 0;
        self.revealed_count = 0;
        self.open_progress = 0.0;

        vec![Command::panel_scale(0.0, 0.0, 0.0), Command::ClearText]
    }

    /// 开关打字机效果（下一个逐字步骤起生效）
    pub fn enable_typing_effect(&mut self, enable: bool) {
        self.config.enable_typing_effect = enable;
    }

    /// 开关打字音效（下一个逐字步骤起生效）
    pub fn enable_typing_sound(&mut self, enable: bool) {
        self.config.enable_typing_sound = enable;
    }

    /// 为当前会话签发步骤令牌
    fn token(&self, kind: StepKind) -> StepToken {
        StepToken::new(self.session, kind)
    }

    /// 判断步骤令牌是否仍然有效
    ///
    /// 会话号、步骤类型、当前阶段三者都要匹配；任何一项不匹配都说明
    /// 这是 close_dialog / 二次 show 之前排队的过期回调。
    fn accepts(&self, token: StepToken, kind: StepKind, phase: Phase) -> bool {
        token.session == self.session && token.kind == kind && self.phase == phase
    }

    /// 按节奏生成打字音效指令
    ///
    /// 节奏定义：每 `sound_every_chars` 个已显示的普通字符触发一次，
    /// 从第一个字符起算。标签与 `[br]` 不计入。
    fn typing_sound_command(&mut self) -> Option<Command> {
        if !self.config.enable_typing_sound || self.config.typing_clip_count == 0 {
            return None;
        }
        if (self.revealed_count - 1) % self.config.sound_every_chars != 0 {
            return None;
        }

        let clip_index = self.rng.gen_range(0..self.config.typing_clip_count);
        let pitch = if self.config.pitch_variation > 0.0 {
            let v = self.config.pitch_variation;
            self.base_pitch + self.rng.gen_range(-v..=v)
        } else {
            self.base_pitch
        };
        Some(Command::PlayTypingSound { clip_index, pitch })
    }
}
