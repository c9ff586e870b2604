//! 容器场景测试


use component_macros::Component;
use di_abstractions::{Closeable, Logger, Openable, Referenceable, References, Unreferenceable};
use di_impl::DescriptorFactory;
use infrastructure_common::{
    ConfigParams, Configurable, Descriptor, InfrastructureResult, LifecycleError,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};

use crate::logger::CompositeLogger;

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
pub(crate) fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .try_init()
            .ok();
    });
}

/// 记录生命周期事件顺序的日志
#[derive(Debug, Clone, Default)]
pub(crate) struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub(crate) fn record(&self, entry: impl Into<String>) {
        self.0.lock().push(entry.into());
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

/// 控制器在打开和关闭时的行为
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Behavior {
    #[default]
    Succeed,
    FailOpen,
    PanicOnOpen,
    FailClose,
}

/// 测试控制器
#[derive(Debug, Component)]
#[component(configurable, referenceable, unreferenceable, openable)]
pub(crate) struct Controller {
    journal: Journal,
    behavior: Behavior,
    message: Mutex<String>,
    logger: CompositeLogger,
    opened: AtomicBool,
}

impl Controller {
    pub(crate) fn new(journal: Journal, behavior: Behavior) -> Self {
        Self {
            journal,
            behavior,
            message: Mutex::new(String::new()),
            logger: CompositeLogger::new(),
            opened: AtomicBool::new(false),
        }
    }

    pub(crate) fn message(&self) -> String {
        self.message.lock().clone()
    }
}

impl Configurable for Controller {
    fn configure(&self, config: &ConfigParams) {
        *self.message.lock() = config.get_as_string_with_default("message", "");
        self.journal.record("configure");
    }
}

impl Referenceable for Controller {
    fn set_references(&self, references: &dyn References) -> InfrastructureResult<()> {
        self.logger.set_references(references)?;
        self.journal.record("link");
        Ok(())
    }
}

impl Unreferenceable for Controller {
    fn unset_references(&self) {
        self.logger.unset_references();
        self.journal.record("unlink");
    }
}

impl Closeable for Controller {
    fn close(&self, correlation_id: &str) -> InfrastructureResult<()> {
        if self.behavior == Behavior::FailClose {
            self.journal.record("close-failed");
            return Err(LifecycleError::component_failed("controller", "socket busy").into());
        }
        self.opened.store(false, Ordering::SeqCst);
        self.logger.debug(correlation_id, "controller closed");
        self.journal.record("close");
        Ok(())
    }
}

impl Openable for Controller {
    fn is_open(&self) -> bool {
        self.opened.load(Ordering::SeqCst)
    }

    fn open(&self, correlation_id: &str) -> InfrastructureResult<()> {
        match self.behavior {
            Behavior::Succeed | Behavior::FailClose => {}
            Behavior::FailOpen => {
                return Err(LifecycleError::component_failed("controller", "port in use").into())
            }
            Behavior::PanicOnOpen => panic!("controller exploded"),
        }
        self.opened.store(true, Ordering::SeqCst);
        self.logger.debug(correlation_id, "controller opened");
        self.journal.record("open");
        Ok(())
    }
}

/// 注册 `test:controller:<kind>:*:1.0` 的工厂，kind 为 default、failing、panicking 或 stuck
pub(crate) fn controller_factory(journal: &Journal) -> Arc<DescriptorFactory> {
    let mut factory = DescriptorFactory::new();
    for (kind, behavior) in [
        ("default", Behavior::Succeed),
        ("failing", Behavior::FailOpen),
        ("panicking", Behavior::PanicOnOpen),
        ("stuck", Behavior::FailClose),
    ] {
        let journal = journal.clone();
        factory.register(
            Descriptor::new("test", "controller", kind, "*", "1.0"),
            move |_| Arc::new(Controller::new(journal.clone(), behavior)),
        );
    }
    Arc::new(factory)
}
