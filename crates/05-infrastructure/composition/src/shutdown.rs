//! 进程关闭信号
//!
//! 组件可以持有信号的克隆，在遇到无法恢复的错误时请求进程关闭。

use parking_lot::Mutex;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// 关闭信号
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    token: CancellationToken,
    error: Arc<Mutex<Option<String>>>,
}

impl ShutdownSignal {
    /// 创建关闭信号
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求正常关闭
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// 带错误请求关闭
    ///
    /// 只保留第一个错误。
    pub fn shutdown_with_error(&self, message: impl Into<String>) {
        {
            let mut error = self.error.lock();
            if error.is_none() {
                *error = Some(message.into());
            }
        }
        self.token.cancel();
    }

    /// 是否已请求关闭
    pub fn is_shutdown(&self) -> bool {
        self.token.is_cancelled()
    }

    /// 等待关闭请求
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }

    /// 取出触发关闭的错误
    pub fn take_error(&self) -> Option<String> {
        self.error.lock().take()
    }

    /// 派生子令牌，用于后台任务
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }
}
