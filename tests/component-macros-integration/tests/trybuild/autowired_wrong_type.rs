#![allow(dead_code)]
use component_macros::Component;

struct Clock;

#[derive(Component)]
struct Reporter {
    #[autowired]
    clock: Clock,
}

fn main() {}
