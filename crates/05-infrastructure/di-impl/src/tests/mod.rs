//! 测试辅助组件与场景测试


use di_abstractions::{
    downcast_component, Closeable, Component, Configurable, Openable, Referenceable, References,
    Unreferenceable,
};
use infrastructure_common::{ConfigParams, InfrastructureResult, LifecycleError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
pub(crate) fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("trace")
            .try_init()
            .ok();
    });
}

/// 记录生命周期事件顺序的日志
#[derive(Debug, Clone, Default)]
pub(crate) struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    fn record(&self, entry: String) {
        self.0.lock().push(entry);
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Faults {
    link: bool,
    open: bool,
    close: bool,
}

/// 扮演所有生命周期角色的测试组件
#[derive(Debug, Default)]
pub(crate) struct Probe {
    name: String,
    journal: Journal,
    faults: Faults,
    opened: AtomicBool,
    config: Mutex<Option<ConfigParams>>,
}

impl Probe {
    pub(crate) fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    fn with_journal(name: &str, journal: &Journal, faults: Faults) -> Arc<dyn Component> {
        Arc::new(Self {
            name: name.to_string(),
            journal: journal.clone(),
            faults,
            ..Self::default()
        })
    }

    pub(crate) fn arc(name: &str) -> Arc<dyn Component> {
        Arc::new(Self::named(name))
    }

    pub(crate) fn recorded(name: &str, journal: &Journal) -> Arc<dyn Component> {
        Self::with_journal(name, journal, Faults::default())
    }

    pub(crate) fn failing(name: &str, journal: &Journal) -> Arc<dyn Component> {
        Self::with_journal(name, journal, Faults { open: true, ..Faults::default() })
    }

    pub(crate) fn failing_close(name: &str, journal: &Journal) -> Arc<dyn Component> {
        Self::with_journal(name, journal, Faults { close: true, ..Faults::default() })
    }

    pub(crate) fn failing_link(name: &str, journal: &Journal) -> Arc<dyn Component> {
        Self::with_journal(name, journal, Faults { link: true, ..Faults::default() })
    }

    pub(crate) fn name_of(component: &Arc<dyn Component>) -> String {
        downcast_component::<Probe>(component.clone())
            .map(|probe| probe.name.clone())
            .unwrap_or_default()
    }

    pub(crate) fn config(&self) -> Option<ConfigParams> {
        self.config.lock().clone()
    }

    fn record(&self, event: &str) {
        self.journal.record(format!("{}:{}", self.name, event));
    }
}

impl Component for Probe {
    fn as_configurable(&self) -> Option<&dyn Configurable> {
        Some(self)
    }

    fn as_referenceable(&self) -> Option<&dyn Referenceable> {
        Some(self)
    }

    fn as_unreferenceable(&self) -> Option<&dyn Unreferenceable> {
        Some(self)
    }

    fn as_openable(&self) -> Option<&dyn Openable> {
        Some(self)
    }

    fn as_closeable(&self) -> Option<&dyn Closeable> {
        Some(self)
    }
}

impl Configurable for Probe {
    fn configure(&self, config: &ConfigParams) {
        self.record("configure");
        *self.config.lock() = Some(config.clone());
    }
}

impl Referenceable for Probe {
    fn set_references(&self, _references: &dyn References) -> InfrastructureResult<()> {
        if self.faults.link {
            return Err(LifecycleError::component_failed(&self.name, "链接失败").into());
        }
        self.record("link");
        Ok(())
    }
}

impl Unreferenceable for Probe {
    fn unset_references(&self) {
        self.record("unlink");
    }
}

impl Closeable for Probe {
    fn close(&self, _correlation_id: &str) -> InfrastructureResult<()> {
        if self.faults.close {
            return Err(LifecycleError::component_failed(&self.name, "关闭失败").into());
        }
        self.opened.store(false, Ordering::SeqCst);
        self.record("close");
        Ok(())
    }
}

impl Openable for Probe {
    fn is_open(&self) -> bool {
        self.opened.load(Ordering::SeqCst)
    }

    fn open(&self, _correlation_id: &str) -> InfrastructureResult<()> {
        if self.faults.open {
            return Err(LifecycleError::component_failed(&self.name, "打开失败").into());
        }
        self.opened.store(true, Ordering::SeqCst);
        self.record("open");
        Ok(())
    }
}
