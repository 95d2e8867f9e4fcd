#![allow(dead_code)]
use component_macros::injectable;
struct Dep;
struct Holder;

#[injectable]
impl Holder {
    #[inject]
    fn set_dep(&self, _dep: Dep) {}
}

fn main() {}
