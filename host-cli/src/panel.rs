//! # Panel 模块
//!
//! 终端上的对话框面板模型：接收 runtime 指令并维护可渲染状态。
//!
//! 映射规则：
//! - 面板横向缩放 → 边框宽度
//! - 文本透明度 → ANSI 暗淡显示（alpha < 1 时）
//! - 追加 / 清空 → 行内容

use std::io::{self, Write};

use dialog_runtime::Command;

/// 面板内容区的最大宽度（列）
const PANEL_WIDTH: usize = 48;

/// 终端面板
#[derive(Debug, Default)]
pub struct TerminalPanel {
    /// 已显示文本（含直通标签的原始形式）
    text: String,
    /// 横向缩放（0.0 - 1.0）
    scale_x: f32,
    /// 文本透明度（0.0 - 1.0）
    alpha: f32,
}

impl TerminalPanel {
    /// 创建空面板
    pub fn new() -> Self {
        Self::default()
    }

    /// 应用一条指令（音效类指令由音频侧处理，这里忽略）
    pub fn apply(&mut self, command: &Command) {
        match command {
            Command::ClearText => self.text.clear(),
            Command::AppendText { text } => self.text.push_str(text),
            Command::SetPanelScale { x, .. } => self.scale_x = x.clamp(0.0, 1.0),
            Command::SetTextAlpha { alpha } => self.alpha = alpha.clamp(0.0, 1.0),
            Command::PlayOpenSound | Command::PlayTypingSound { .. } => {}
        }
    }

    /// 当前文本（测试用）
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 重绘当前行
    ///
    /// 面板宽度随横向缩放变化，重现展开动画；文本未完全淡入时
    /// 以暗淡样式显示。
    pub fn redraw(&self) -> io::Result<()> {
        let width = (self.scale_x * PANEL_WIDTH as f32).round() as usize;

        let mut stdout = io::stdout().lock();
        if width == 0 {
            // 面板收拢：清空整行
            write!(stdout, "\r{}\r", " ".repeat(PANEL_WIDTH + 4))?;
            return stdout.flush();
        }

        let visible: String = self.text.chars().take(width).collect();
        let dim = self.alpha < 1.0;

        write!(stdout, "\r│ ")?;
        if dim {
            write!(stdout, "\x1b[2m")?;
        }
        write!(stdout, "{:<width$}", visible, width = width)?;
        if dim {
            write!(stdout, "\x1b[0m")?;
        }
        write!(stdout, " │")?;
        // 残留字符清理（面板变窄时）
        write!(stdout, "{}", " ".repeat(PANEL_WIDTH.saturating_sub(width)))?;
        stdout.flush()
    }

    /// 播放结束：换行收尾
    pub fn finish(&self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout)?;
        stdout.flush()
    }
}
