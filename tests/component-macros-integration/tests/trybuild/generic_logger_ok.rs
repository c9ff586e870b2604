use component_macros::Component;
use di_abstractions::{Component as _, LogLevel, Logger};
use std::error::Error;
use std::fmt::Debug;

#[derive(Debug, Component)]
#[component(logger)]
struct Sink<T: Debug + Send + Sync + 'static> {
    tag: T,
}

impl<T: Debug + Send + Sync + 'static> Logger for Sink<T> {
    fn level(&self) -> LogLevel {
        LogLevel::Trace
    }

    fn set_level(&self, _level: LogLevel) {}

    fn log(
        &self,
        _level: LogLevel,
        _correlation_id: &str,
        _error: Option<&(dyn Error + 'static)>,
        _message: &str,
    ) {
    }
}

fn main() {
    let sink = Sink { tag: 7u8 };
    assert_eq!(sink.tag, 7);
    assert!(sink.as_logger().is_some());
    assert!(sink.as_factory().is_none());
}
