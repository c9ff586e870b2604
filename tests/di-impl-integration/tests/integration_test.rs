//! 从配置文件创建组件并驱动生命周期的集成测试

use anyhow::Result;
use config_impl::ContainerConfigReader;
use di_abstractions::{
    Closeable, Component, Openable, Referenceable, References, ReferencesExt,
};
use di_impl::{ContainerReferences, DescriptorFactory, TypeRegistry};
use infrastructure_common::{ConfigParams, Configurable, Descriptor, InfrastructureResult, Locator};
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::Builder;

/// 带配置和依赖的测试组件
#[derive(Debug, Default)]
struct Service {
    endpoint: Mutex<String>,
    peers: AtomicUsize,
    open: AtomicBool,
}

impl Component for Service {
    fn as_configurable(&self) -> Option<&dyn Configurable> {
        Some(self)
    }

    fn as_referenceable(&self) -> Option<&dyn Referenceable> {
        Some(self)
    }

    fn as_openable(&self) -> Option<&dyn Openable> {
        Some(self)
    }

    fn as_closeable(&self) -> Option<&dyn Closeable> {
        Some(self)
    }
}

impl Configurable for Service {
    fn configure(&self, config: &ConfigParams) {
        if let Ok(mut endpoint) = self.endpoint.lock() {
            *endpoint = config.get_as_string_with_default("connection.endpoint", "");
        }
    }
}

impl Referenceable for Service {
    fn set_references(&self, references: &dyn References) -> InfrastructureResult<()> {
        let peers = references.get_required(&Descriptor::new("app", "service", "*", "*", "*").into())?;
        self.peers.store(peers.len(), Ordering::SeqCst);
        Ok(())
    }
}

impl Closeable for Service {
    fn close(&self, _correlation_id: &str) -> InfrastructureResult<()> {
        self.open.store(false, Ordering::SeqCst);
        Ok(())
    }
}

impl Openable for Service {
    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn open(&self, _correlation_id: &str) -> InfrastructureResult<()> {
        self.open.store(true, Ordering::SeqCst);
        Ok(())
    }
}

fn service_factory() -> Arc<DescriptorFactory> {
    let mut factory = DescriptorFactory::new();
    factory.register(Descriptor::new("app", "service", "*", "*", "1.0"), |_| {
        Arc::new(Service::default())
    });
    Arc::new(factory)
}

const CONFIG: &str = r#"
- descriptor: "app:service:rest:primary:1.0"
  connection:
    endpoint: "{{ host }}:8080"
- descriptor: "*:service:grpc:secondary:*"
  connection:
    endpoint: "{{ host }}:9090"
"#;

#[test]
fn test_components_from_file_are_created_linked_and_opened() -> Result<()> {
    let mut file = Builder::new().suffix(".yaml").tempfile()?;
    file.write_all(CONFIG.as_bytes())?;
    let config = ContainerConfigReader::read_from_file(
        file.path(),
        Some(&ConfigParams::parse("host=localhost")),
    )?;

    let references = ContainerReferences::new(Arc::new(TypeRegistry::new()));
    references.put(Locator::Anonymous, service_factory())?;
    references.put_from_config(&config)?;

    let locators: Vec<String> = references
        .get_all_locators()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        locators,
        vec![
            Locator::Anonymous.to_string(),
            "app:service:rest:primary:1.0".to_string(),
            "app:service:grpc:secondary:1.0".to_string(),
        ]
    );

    references.open("integration")?;

    let services =
        references.get_optional_as::<Service>(&Descriptor::new("*", "service", "*", "*", "*").into());
    assert_eq!(services.len(), 2);
    assert!(services.iter().all(|service| service.is_open()));
    assert!(services
        .iter()
        .all(|service| service.peers.load(Ordering::SeqCst) == 2));
    assert_eq!(*services[1].endpoint.lock().unwrap(), "localhost:9090");

    references.close("integration")?;
    assert!(services.iter().all(|service| !service.is_open()));
    Ok(())
}

#[test]
fn test_required_lookup_without_factory_is_not_found() {
    let references = ContainerReferences::new(Arc::new(TypeRegistry::new()));

    let err = references
        .get_one_required(&Descriptor::new("app", "service", "*", "*", "*").into())
        .unwrap_err();

    assert!(err.is_not_found());
}
