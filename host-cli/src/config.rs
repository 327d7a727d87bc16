//! # Config 模块
//!
//! 对话框配置文件的加载。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (JSON)
//! 3. 默认值（最低）

use std::fs;
use std::path::Path;

use dialog_runtime::DialogConfig;

/// 加载对话框配置
///
/// - 未指定路径时直接返回默认配置
/// - 文件不存在或解析失败时返回默认配置并记录警告
pub fn load(path: Option<&Path>) -> DialogConfig {
    let Some(path) = path else {
        return DialogConfig::default();
    };

    if !path.exists() {
        tracing::warn!("配置文件不存在: {:?}，使用默认配置", path);
        return DialogConfig::default();
    }

    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => {
                tracing::info!("配置文件加载成功: {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("配置文件解析失败: {}，使用默认配置", e);
                DialogConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!("配置文件读取失败: {}，使用默认配置", e);
            DialogConfig::default()
        }
    }
}
