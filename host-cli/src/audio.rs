//! # Audio 模块
//!
//! 打字机音效播放，使用 rodio 库实现。
//!
//! 所有音频问题都静默降级：没有音频设备、没有音效目录、文件缺失
//! 或解码失败时只记录日志并跳过播放，不影响动画本身。

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

/// 音频播放器
///
/// 从音效目录加载：
/// - `open.*`：面板展开音效（至多一个）
/// - `type*.*`：打字音效片段集（按文件名排序，`clip_index` 按此解释）
pub struct AudioPlayer {
    /// 音频输出流（必须保持存活）
    _stream: Option<OutputStream>,
    /// 音频输出句柄
    stream_handle: Option<OutputStreamHandle>,
    /// 展开音效路径
    open_clip: Option<PathBuf>,
    /// 打字音效片段路径
    typing_clips: Vec<PathBuf>,
}

impl AudioPlayer {
    /// 创建音频播放器
    ///
    /// `sound_dir` 为 None 时创建静音播放器（不初始化音频设备）。
    pub fn new(sound_dir: Option<&Path>) -> Self {
        let Some(dir) = sound_dir else {
            return Self::silent();
        };

        let (open_clip, typing_clips) = scan_sound_dir(dir);
        if open_clip.is_none() && typing_clips.is_empty() {
            tracing::warn!("音效目录没有可用文件: {:?}", dir);
            return Self::silent();
        }

        match OutputStream::try_default() {
            Ok((stream, handle)) => {
                tracing::info!(
                    "音效已加载: 展开音效 {}，打字片段 {} 个",
                    if open_clip.is_some() { "有" } else { "无" },
                    typing_clips.len()
                );
                Self {
                    _stream: Some(stream),
                    stream_handle: Some(handle),
                    open_clip,
                    typing_clips,
                }
            }
            Err(e) => {
                tracing::warn!("无法初始化音频输出: {}，静音运行", e);
                Self::silent()
            }
        }
    }

    fn silent() -> Self {
        Self {
            _stream: None,
            stream_handle: None,
            open_clip: None,
            typing_clips: Vec::new(),
        }
    }

    /// 打字音效片段数量（用于配置 runtime 的 `typing_clip_count`）
    pub fn typing_clip_count(&self) -> usize {
        self.typing_clips.len()
    }

    /// 播放展开音效
    pub fn play_open(&self) {
        let Some(path) = self.open_clip.as_deref() else {
            return;
        };
        self.play_one_shot(path, 1.0);
    }

    /// 播放打字音效
    ///
    /// `clip_index` 超界时取模处理（配置与实际片段数不一致时的
    /// 容错），`pitch` 通过重采样速度实现。
    pub fn play_typing(&self, clip_index: usize, pitch: f32) {
        if self.typing_clips.is_empty() {
            return;
        }
        let path = &self.typing_clips[clip_index % self.typing_clips.len()];
        self.play_one_shot(path, pitch);
    }

    fn play_one_shot(&self, path: &Path, speed: f32) {
        let Some(handle) = self.stream_handle.as_ref() else {
            return;
        };

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::debug!("无法打开音效文件: {:?} - {}", path, e);
                return;
            }
        };

        let source = match Decoder::new(BufReader::new(file)) {
            Ok(s) => s,
            Err(e) => {
                tracing::debug!("无法解码音效文件: {:?} - {}", path, e);
                return;
            }
        };

        if let Ok(sink) = Sink::try_new(handle) {
            sink.append(source.speed(speed));
            sink.detach(); // 分离后自动播放完毕
        }
    }
}

/// 扫描音效目录
fn scan_sound_dir(dir: &Path) -> (Option<PathBuf>, Vec<PathBuf>) {
    let mut open_clip = None;
    let mut typing_clips = Vec::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("无法读取音效目录: {:?} - {}", dir, e);
            return (None, Vec::new());
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if stem == "open" {
            open_clip = Some(path);
        } else if stem.starts_with("type") {
            typing_clips.push(path);
        }
    }

    // clip_index 的解释依赖稳定顺序
    typing_clips.sort();
    (open_clip, typing_clips)
}
