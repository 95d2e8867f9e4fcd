#![allow(dead_code)]
use component_macros::injectable;
struct Holder;
#[injectable]
impl Holder {
    #[inject]
    fn new() -> Self { Holder }
    #[inject]
    fn other() -> Self { Holder }
}

fn main() {}
