use component_macros::Component;
use di_abstractions::ComponentDefinition;
use infrastructure_common::{Autowired, Component, Value};

#[derive(Default, Component)]
struct Clock;

#[derive(Default, Component)]
#[component(name = "reporter")]
struct Reporter {
    #[autowired]
    clock: Autowired<Clock>,
    #[value("report.title")]
    title: Value,
}

fn main() {
    let reporter = Reporter::default();
    assert_eq!(reporter.name(), "reporter");
    assert!(!reporter.clock.is_wired());
    assert!(!reporter.title.is_resolved());

    let descriptor = Reporter::descriptor();
    assert_eq!(descriptor.injection_points().len(), 2);
}
