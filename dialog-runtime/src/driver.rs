//! # Driver 模块
//!
//! 协作式调度器：把 [`DialogAnimator`] 的调度请求排进待办队列，
//! 由宿主以固定步长调用 [`DialogDriver::update`] 推进。
//!
//! ## 设计说明
//!
//! - `close_dialog` / 二次 `show` **不清空**队列——过期条目照常到期，
//!   在状态机内部因令牌失效而成为空操作；测试依赖这一点验证令牌机制
//! - 同一次 `update` 内先统一推进计时、再触发到期步骤；
//!   新产生的调度从下一次 `update` 才开始计时

use crate::animator::DialogAnimator;
use crate::command::Command;
use crate::config::DialogConfig;
use crate::error::DialogResult;
use crate::state::{Phase, Schedule, StepKind, StepToken};

/// 待执行步骤的到期时间
#[derive(Debug, Clone, Copy, PartialEq)]
enum DueTime {
    /// 剩余秒数
    Seconds(f32),
    /// 剩余帧数（一次 `update` 记一帧）
    Frames(u32),
}

/// 待执行步骤
#[derive(Debug, Clone, Copy)]
struct PendingStep {
    token: StepToken,
    due: DueTime,
}

impl PendingStep {
    fn is_due(&self) -> bool {
        match self.due {
            DueTime::Seconds(s) => s <= 0.0,
            DueTime::Frames(f) => f == 0,
        }
    }
}

/// 对话框动画驱动器
///
/// 面向宿主主循环的外观：宿主每帧调用一次 `update(dt)`，
/// 把返回的指令应用到面板 / 文本 / 音频即可。
///
/// # 使用示例
///
/// ```ignore
/// let mut driver = DialogDriver::new(DialogConfig::default())?;
///
/// host.execute(&driver.show("你好，世界！"));
/// while !driver.is_idle() {
///     host.sleep(tick);
///     host.execute(&driver.update(tick));
/// }
/// ```
pub struct DialogDriver {
    animator: DialogAnimator,
    pending: Vec<PendingStep>,
}

impl DialogDriver {
    /// 创建驱动器
    pub fn new(config: DialogConfig) -> DialogResult<Self> {
        Ok(Self {
            animator: DialogAnimator::new(config)?,
            pending: Vec::new(),
        })
    }

    /// 创建带固定随机种子的驱动器（测试 / 回放用）
    pub fn with_seed(config: DialogConfig, seed: u64) -> DialogResult<Self> {
        Ok(Self {
            animator: DialogAnimator::with_seed(config, seed)?,
            pending: Vec::new(),
        })
    }

    /// 开始显示一段文本
    pub fn show(&mut self, text: &str) -> Vec<Command> {
        let (commands, schedule) = self.animator.show(text);
        self.push(schedule);
        commands
    }

    /// 关闭对话框
    ///
    /// 队列中的过期条目保留，到期后由令牌机制丢弃。
    pub fn close_dialog(&mut self) -> Vec<Command> {
        self.animator.close_dialog()
    }

    /// 推进一个时间步
    ///
    /// 返回本步内所有到期步骤产生的指令（按触发顺序）。
    pub fn update(&mut self, dt: f32) -> Vec<Command> {
        // 1. 统一推进计时
        for step in &mut self.pending {
            match &mut step.due {
                DueTime::Seconds(s) => *s -= dt,
                DueTime::Frames(f) => *f = f.saturating_sub(1),
            }
        }

        // 2. 取出到期步骤（新调度在触发之后入队，不受本次计时影响）
        let mut due = Vec::new();
        self.pending.retain(|step| {
            if step.is_due() {
                due.push(step.token);
                false
            } else {
                true
            }
        });

        // 3. 触发到期步骤，收集指令与后续调度
        let mut commands = Vec::new();
        for token in due {
            let (step_commands, schedule) = match token.kind {
                StepKind::AnimateOpen => self.animator.animate_open(token),
                StepKind::TypeText => self.animator.type_text(token),
            };
            commands.extend(step_commands);
            self.push(schedule);
        }
        commands
    }

    /// 是否已无动画且无待办步骤
    ///
    /// 注意：过期条目也会让它返回 false，直到它们到期被丢弃——
    /// 宿主据此可以安全地把 `update` 跑到队列排空。
    pub fn is_idle(&self) -> bool {
        !self.animator.phase().is_animating() && self.pending.is_empty()
    }

    /// 当前阶段
    pub fn phase(&self) -> Phase {
        self.animator.phase()
    }

    /// 开关打字机效果
    pub fn enable_typing_effect(&mut self, enable: bool) {
        self.animator.enable_typing_effect(enable);
    }

    /// 开关打字音效
    pub fn enable_typing_sound(&mut self, enable: bool) {
        self.animator.enable_typing_sound(enable);
    }

    /// 状态机访问（调试 / 测试用）
    pub fn animator(&self) -> &DialogAnimator {
        &self.animator
    }

    fn push(&mut self, schedule: Schedule) {
        match schedule {
            Schedule::AfterSeconds { token, delay } => self.pending.push(PendingStep {
                token,
                due: DueTime::Seconds(delay),
            }),
            Schedule::NextFrame { token } => self.pending.push(PendingStep {
                token,
                due: DueTime::Frames(1),
            }),
            Schedule::Idle => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试用配置：时长都取二进制可精确表示的值
    fn test_config() -> DialogConfig {
        DialogConfig {
            open_duration: 0.5,
            text_speed: 0.25,
            update_interval: 0.25,
            wait_after_br: 0.5,
            ..DialogConfig::default()
        }
    }

    fn collect_text(commands: &[Command], out: &mut String) {
        for cmd in commands {
            match cmd {
                Command::AppendText { text } => out.push_str(text),
                Command::ClearText => out.clear(),
                _ => {}
            }
        }
    }

    #[test]
    fn test_update_fires_steps_on_schedule() {
        let mut driver = DialogDriver::with_seed(test_config(), 1).unwrap();
        let mut text = String::new();

        collect_text(&driver.show("ab"), &mut text);

        // 两步展开（0.25 * 2 = open_duration），之后每步一个字符
        let mut updates = 0;
        while !driver.is_idle() {
            collect_text(&driver.update(0.25), &mut text);
            updates += 1;
            assert!(updates < 100, "驱动器未收敛");
        }

        assert_eq!(text, "ab");
        assert_eq!(driver.phase(), Phase::Idle);
        // 展开 2 步 + 'a' + 'b' + 末尾检测 1 步
        assert_eq!(updates, 5);
    }

    #[test]
    fn test_br_delays_by_wait_after_br() {
        let mut driver = DialogDriver::with_seed(test_config(), 1).unwrap();
        let mut text = String::new();

        collect_text(&driver.show("Hi[br]!"), &mut text);

        // 记录每次 update 后的文本快照
        let mut snapshots = Vec::new();
        while !driver.is_idle() {
            collect_text(&driver.update(0.25), &mut text);
            snapshots.push(text.clone());
        }

        assert_eq!(text, "Hi!");
        // [br] 之后有一个空拍：0.5s 停顿 = 两次 0.25s update，
        // 第一次什么都不发生
        let hi_index = snapshots.iter().position(|s| s == "Hi").unwrap();
        assert_eq!(snapshots[hi_index + 1], "Hi"); // [br] 步本身无输出
        assert_eq!(snapshots[hi_index + 2], "Hi"); // 停顿中
        assert_eq!(snapshots[hi_index + 3], "Hi!");
    }

    #[test]
    fn test_close_leaves_stale_steps_harmless() {
        let mut driver = DialogDriver::with_seed(test_config(), 1).unwrap();
        driver.show("hello");

        // 打断：关闭后旧步骤仍在队列里
        let commands = driver.close_dialog();
        assert_eq!(commands[0], Command::panel_scale(0.0, 0.0, 0.0));
        assert!(!driver.is_idle()); // 过期条目尚未排空

        // 过期步骤到期后被静默丢弃，不产生任何指令
        let commands = driver.update(0.25);
        assert!(commands.is_empty());
        assert!(driver.is_idle());
    }

    #[test]
    fn test_show_after_close_restarts_cleanly() {
        let mut driver = DialogDriver::with_seed(test_config(), 1).unwrap();
        let mut text = String::new();

        driver.show("aaaa");
        driver.update(0.25);
        driver.close_dialog();

        // 新会话与旧会话的过期条目共存于队列
        collect_text(&driver.show("bb"), &mut text);
        while !driver.is_idle() {
            collect_text(&driver.update(0.25), &mut text);
        }

        // 旧会话没有污染新会话的输出
        assert_eq!(text, "bb");
    }

    #[test]
    fn test_fast_forward_one_char_per_frame() {
        let mut driver = DialogDriver::with_seed(test_config(), 1).unwrap();
        driver.enable_typing_effect(false);
        let mut text = String::new();

        collect_text(&driver.show("abc"), &mut text);

        // 展开两步
        collect_text(&driver.update(0.25), &mut text);
        collect_text(&driver.update(0.25), &mut text);
        // 第一个字符仍按 text_speed 调度
        collect_text(&driver.update(0.25), &mut text);
        assert_eq!(text, "a");

        // 之后每帧一个字符，dt 为 0 也推进（帧计数与时间无关）
        collect_text(&driver.update(0.0), &mut text);
        assert_eq!(text, "ab");
        collect_text(&driver.update(0.0), &mut text);
        assert_eq!(text, "abc");
    }

    #[test]
    fn test_toggle_mid_sequence_no_skips_or_dupes() {
        let mut driver = DialogDriver::with_seed(test_config(), 1).unwrap();
        let mut text = String::new();

        collect_text(&driver.show("abcdef"), &mut text);
        // 展开 + 前两个字符
        for _ in 0..4 {
            collect_text(&driver.update(0.25), &mut text);
        }
        assert_eq!(text, "ab");

        // 中途切换为快进模式
        driver.enable_typing_effect(false);
        while !driver.is_idle() {
            collect_text(&driver.update(0.25), &mut text);
        }

        assert_eq!(text, "abcdef");
    }

    #[test]
    fn test_large_dt_fires_each_step_once() {
        let mut driver = DialogDriver::with_seed(test_config(), 1).unwrap();
        let mut text = String::new();

        collect_text(&driver.show("ab"), &mut text);

        // 一次性给一个很大的 dt：每个待办步骤只触发一次，
        // 后继步骤从下一次 update 才开始计时
        collect_text(&driver.update(10.0), &mut text);
        assert_eq!(text, "");
        assert_eq!(driver.phase(), Phase::Opening);

        collect_text(&driver.update(10.0), &mut text);
        collect_text(&driver.update(10.0), &mut text);
        assert_eq!(text, "a");
    }
}
