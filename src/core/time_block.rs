use crate::domain::model::Branch;
use std::fmt::{Display, Formatter};

/// 十二時辰之一，以兩小時區間標籤表示，例如 "23-01" 為子時
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeBlock(Branch);

impl TimeBlock {
    const LABELS: [&'static str; 12] = [
        "23-01", "01-03", "03-05", "05-07", "07-09", "09-11", "11-13", "13-15", "15-17", "17-19",
        "19-21", "21-23",
    ];

    /// 子時，跨午夜的 23-01
    pub const FIRST: TimeBlock = TimeBlock(Branch::FIRST);

    pub fn all() -> impl Iterator<Item = TimeBlock> {
        Branch::all().map(TimeBlock)
    }

    /// 嚴格解析，標籤不在列表中返回 `None`
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::LABELS
            .iter()
            .position(|&l| l == label)
            .map(|i| TimeBlock(Branch::new(i as u8)))
    }

    /// 寬鬆解析：無法識別的標籤一律當作子時，並記一筆警告。
    ///
    /// 這是既定的產品行為，呼叫端不會因時辰格式錯誤而失敗。
    pub fn resolve_or_first(label: &str) -> Self {
        Self::parse(label).unwrap_or_else(|| {
            tracing::warn!(
                "⚠️ Unrecognized time block '{}', defaulting to {}",
                label,
                Self::FIRST.branch()
            );
            Self::FIRST
        })
    }

    pub fn branch(self) -> Branch {
        self.0
    }

    pub fn label(self) -> &'static str {
        Self::LABELS[self.0.index() as usize]
    }
}

impl Display for TimeBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}时({})", self.0, self.label())
    }
}
