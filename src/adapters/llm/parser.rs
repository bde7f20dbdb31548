//! 把模型回覆切成六個段落
//!
//! 逐行分類為標題、內容或空行。標題以子字串比對，第一個標題之前的內容忽略，
//! 未出現的段落保持空字串。

use crate::domain::model::{Interpretation, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Heading(Section),
    Content(&'a str),
    Blank,
}

/// 行內含任一段落標題即視為標題行，整行不計入內容
pub fn classify_line(line: &str) -> Line<'_> {
    if let Some(section) = Section::ALL
        .into_iter()
        .find(|section| line.contains(section.heading()))
    {
        return Line::Heading(section);
    }

    let content = line.trim_start().trim_start_matches('#').trim();
    if content.is_empty() {
        Line::Blank
    } else {
        Line::Content(content)
    }
}

pub fn parse_interpretation(text: &str) -> Interpretation {
    let mut interpretation = Interpretation::default();
    let mut current: Option<(Section, Vec<&str>)> = None;
    let mut seen: Vec<Section> = Vec::with_capacity(Section::ALL.len());

    for line in text.lines() {
        match classify_line(line) {
            Line::Heading(section) => {
                if let Some((previous, buffer)) = current.take() {
                    interpretation.set(previous, buffer.join("\n").trim().to_string());
                }
                // 重複的標題會重新開始該段，先前收集的內容被覆蓋
                if seen.contains(&section) {
                    tracing::warn!(
                        "⚠️ Section '{}' appeared again, restarting its content",
                        section.key()
                    );
                } else {
                    seen.push(section);
                }
                current = Some((section, Vec::new()));
            }
            Line::Content(content) => {
                if let Some((_, buffer)) = current.as_mut() {
                    buffer.push(content);
                }
            }
            Line::Blank => {}
        }
    }

    if let Some((section, buffer)) = current {
        interpretation.set(section, buffer.join("\n").trim().to_string());
    }

    interpretation
}
