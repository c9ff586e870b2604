//! 容器生命周期状态

use std::fmt;

/// 容器生命周期状态
///
/// 状态只会沿 `Closed → Opening → Open → Closing → Closed` 流转；
/// 打开失败时从 `Opening` 经 `Closing` 回到 `Closed`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContainerState {
    /// 已关闭，没有活动的引用集合
    #[default]
    Closed,
    /// 打开中
    Opening,
    /// 运行中
    Open,
    /// 关闭中
    Closing,
}

impl ContainerState {
    /// 是否可以打开
    pub fn can_open(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// 是否可以关闭
    pub fn can_close(&self) -> bool {
        matches!(self, Self::Opening | Self::Open)
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Closing => "closing",
        };
        f.write_str(text)
    }
}
