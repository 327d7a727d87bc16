//! # Markup 模块
//!
//! 逐字显示时识别的内联标记迷你语法：
//!
//! - `<...>`：富文本直通标签，整体追加、不逐字显示，内容任意
//! - `[br]`：停顿指令，仅此一个方括号指令有意义
//! - 其他字符：逐字显示
//!
//! ## 容错规则
//!
//! - 未闭合的 `<` 或 `[` 按普通字符处理，不丢弃
//! - 闭合但不是 `[br]` 的方括号内容也按普通字符处理
//!   （即 `[` 作为字面字符被打出，指令语义不生效）

/// 停顿指令的字面形式（精确匹配）
pub const BREAK_DIRECTIVE: &str = "[br]";

/// 扫描结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// 富文本直通标签（含尖括号本身）
    Tag(String),
    /// `[br]` 停顿指令（不产生可见文本）
    Break,
    /// 普通字符
    Plain(char),
}

/// 从 `index` 处扫描下一个标记
///
/// # 返回
///
/// - `Some((token, next_index))`：标记与游标的新位置
/// - `None`：游标已到达文本末尾
pub fn next_token(chars: &[char], index: usize) -> Option<(Token, usize)> {
    let current = *chars.get(index)?;

    // 尖括号标签：找到闭合 > 则整体吃掉；找不到则按普通字符落下去
    if current == '<' {
        if let Some(close) = find_from(chars, index, '>') {
            let tag: String = chars[index..=close].iter().collect();
            return Some((Token::Tag(tag), close + 1));
        }
    }

    // 方括号指令：只有字面的 [br] 有意义
    if current == '[' {
        if let Some(close) = find_from(chars, index, ']') {
            let directive: String = chars[index..=close].iter().collect();
            if directive == BREAK_DIRECTIVE {
                return Some((Token::Break, close + 1));
            }
            // 未识别的方括号内容不做特殊处理，[ 按普通字符打出
        }
    }

    Some((Token::Plain(current), index + 1))
}

/// 从 `start` 起（含）查找字符 `target` 的位置
fn find_from(chars: &[char], start: usize, target: char) -> Option<usize> {
    chars[start..]
        .iter()
        .position(|&c| c == target)
        .map(|offset| start + offset)
}
