//! 示例控制器
//!
//! 打开后按固定间隔输出 `计数 - 消息`，达到 `max_count` 后请求进程关闭。

use component_macros::Component;
use di_abstractions::{Closeable, Logger, Openable, Referenceable, References};
use infrastructure_common::{ConfigParams, Configurable, InfrastructureResult, LifecycleError};
use infrastructure_composition::{CompositeLogger, ShutdownSignal};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

const DEFAULT_MESSAGE: &str = "Hello World!";

/// 示例控制器
#[derive(Debug, Component)]
#[component(configurable, referenceable, openable)]
pub struct DummyController {
    message: RwLock<String>,
    interval: RwLock<Duration>,
    max_count: RwLock<Option<i64>>,
    counter: Arc<AtomicI64>,
    logger: Arc<CompositeLogger>,
    shutdown: ShutdownSignal,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl DummyController {
    /// 创建控制器
    pub fn new(shutdown: ShutdownSignal) -> Self {
        Self {
            message: RwLock::new(DEFAULT_MESSAGE.to_string()),
            interval: RwLock::new(Duration::from_secs(1)),
            max_count: RwLock::new(None),
            counter: Arc::new(AtomicI64::new(0)),
            logger: Arc::new(CompositeLogger::new()),
            shutdown,
            task: Mutex::new(None),
        }
    }

    /// 输出的消息
    pub fn message(&self) -> String {
        self.message.read().clone()
    }

    /// 已输出的次数
    pub fn counter(&self) -> i64 {
        self.counter.load(Ordering::SeqCst)
    }
}

impl Configurable for DummyController {
    fn configure(&self, config: &ConfigParams) {
        let message = config.get_as_string_with_default("message", DEFAULT_MESSAGE);
        *self.message.write() = if message.is_empty() {
            DEFAULT_MESSAGE.to_string()
        } else {
            message
        };

        if let Some(millis) = config
            .get_as_integer("interval_ms")
            .and_then(|millis| u64::try_from(millis).ok())
            .filter(|millis| *millis > 0)
        {
            *self.interval.write() = Duration::from_millis(millis);
        }
        *self.max_count.write() = config.get_as_integer("max_count");
    }
}

impl Referenceable for DummyController {
    fn set_references(&self, references: &dyn References) -> InfrastructureResult<()> {
        self.logger.set_references(references)
    }
}

impl Closeable for DummyController {
    fn close(&self, correlation_id: &str) -> InfrastructureResult<()> {
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
        self.logger.trace(correlation_id, "Dummy controller closed");
        Ok(())
    }
}

impl Openable for DummyController {
    fn is_open(&self) -> bool {
        self.task.lock().is_some()
    }

    fn open(&self, correlation_id: &str) -> InfrastructureResult<()> {
        if self.is_open() {
            return Ok(());
        }

        let runtime = Handle::try_current().map_err(|err| {
            LifecycleError::component_failed("dummy-controller", err.to_string())
        })?;

        let message = self.message();
        let period = *self.interval.read();
        let max_count = *self.max_count.read();
        let counter = self.counter.clone();
        let logger = self.logger.clone();
        let shutdown = self.shutdown.clone();
        let task_correlation_id = correlation_id.to_string();

        let task = runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                let count = counter.fetch_add(1, Ordering::SeqCst);
                logger.info(&task_correlation_id, &format!("{count} - {message}"));

                if max_count.is_some_and(|max| count + 1 >= max) {
                    shutdown.shutdown();
                    break;
                }
            }
        });

        *self.task.lock() = Some(task);
        self.logger.trace(correlation_id, "Dummy controller opened");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_keeps_default_message_when_empty() {
        let controller = DummyController::new(ShutdownSignal::new());

        controller.configure(&ConfigParams::parse("message=;interval_ms=25"));

        assert_eq!(controller.message(), DEFAULT_MESSAGE);
        assert_eq!(*controller.interval.read(), Duration::from_millis(25));
    }

    #[test]
    fn test_open_outside_runtime_fails() {
        let controller = DummyController::new(ShutdownSignal::new());

        assert!(controller.open("test").is_err());
        assert!(!controller.is_open());
    }

    #[tokio::test]
    async fn test_requests_shutdown_after_max_count() {
        let shutdown = ShutdownSignal::new();
        let controller = DummyController::new(shutdown.clone());
        controller.configure(&ConfigParams::parse("message=tick;interval_ms=5;max_count=3"));

        controller.open("test").unwrap();
        shutdown.cancelled().await;
        controller.close("test").unwrap();

        assert_eq!(controller.counter(), 3);
        assert!(!controller.is_open());
    }
}
