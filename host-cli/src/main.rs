//! 对话框打字机动画的终端宿主
//!
//! 以固定步长驱动 [`DialogDriver`]，把指令映射到终端面板与音频：
//!
//! ```text
//! dialog-runtime            host-cli
//!     │                        │
//!     │◄── show / update(dt) ──│  固定 tick 主循环
//!     │                        │
//!     │─── Vec<Command> ──────►│  面板重绘 + 音效播放
//! ```

mod audio;
mod config;
mod panel;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use dialog_runtime::{Command, DialogDriver};

use crate::audio::AudioPlayer;
use crate::panel::TerminalPanel;

/// 对话框打字机动画演示宿主
#[derive(Parser, Debug)]
#[command(name = "dialog-host", version, about)]
struct Args {
    /// 要显示的文本（支持 <...> 直通标签与 [br] 停顿指令）
    #[arg(default_value = "你好，<b>世界</b>！[br]打字机效果演示。")]
    text: String,

    /// 配置文件路径（JSON，字段同 DialogConfig）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 音效目录（open.* 为展开音效，type*.* 为打字片段）
    #[arg(long)]
    sound_dir: Option<PathBuf>,

    /// 关闭打字机效果（快进模式）
    #[arg(long)]
    no_typing_effect: bool,

    /// 关闭打字音效
    #[arg(long)]
    no_typing_sound: bool,

    /// 固定随机种子（音效片段 / 音高抖动可复现）
    #[arg(long)]
    seed: Option<u64>,

    /// 主循环步长（秒）
    #[arg(long, default_value_t = 0.02)]
    tick: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if !(args.tick > 0.0) {
        anyhow::bail!("tick 必须为正数，当前值为 {}", args.tick);
    }

    let audio = AudioPlayer::new(args.sound_dir.as_deref());

    let mut dialog_config = config::load(args.config.as_deref());
    // 片段数以宿主实际加载到的为准
    dialog_config.typing_clip_count = audio.typing_clip_count();

    let mut driver = match args.seed {
        Some(seed) => DialogDriver::with_seed(dialog_config, seed)?,
        None => DialogDriver::new(dialog_config)?,
    };
    if args.no_typing_effect {
        driver.enable_typing_effect(false);
    }
    if args.no_typing_sound {
        driver.enable_typing_sound(false);
    }

    let mut panel = TerminalPanel::new();

    tracing::info!("开始播放，共 {} 个字符", args.text.chars().count());
    apply(&mut panel, &audio, &driver.show(&args.text))?;

    while !driver.is_idle() {
        std::thread::sleep(Duration::from_secs_f32(args.tick));
        apply(&mut panel, &audio, &driver.update(args.tick))?;
    }

    panel.finish()?;
    tracing::info!("播放完毕");
    Ok(())
}

/// 把一批指令分发给面板与音频，然后重绘
fn apply(panel: &mut TerminalPanel, audio: &AudioPlayer, commands: &[Command]) -> Result<()> {
    for command in commands {
        match command {
            Command::PlayOpenSound => audio.play_open(),
            Command::PlayTypingSound { clip_index, pitch } => {
                audio.play_typing(*clip_index, *pitch)
            }
            other => panel.apply(other),
        }
    }
    panel.redraw()?;
    Ok(())
}
