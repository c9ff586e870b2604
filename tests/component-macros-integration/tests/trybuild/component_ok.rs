use component_macros::Component;
use di_abstractions::{Component as _, Referenceable, References, Unreferenceable};
use infrastructure_common::InfrastructureResult;

#[derive(Debug, Component)]
#[component(referenceable, unreferenceable)]
struct Linked;

impl Referenceable for Linked {
    fn set_references(&self, _references: &dyn References) -> InfrastructureResult<()> {
        Ok(())
    }
}

impl Unreferenceable for Linked {
    fn unset_references(&self) {}
}

fn main() {
    let linked = Linked;
    assert!(linked.as_referenceable().is_some());
    assert!(linked.as_unreferenceable().is_some());
    assert!(linked.as_openable().is_none());
}
