//! trybuild compile-time tests for component_macros

#[test]
fn trybuild_component_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/component_ok.rs");
    t.pass("tests/trybuild/injectable_ok.rs");

    // 宏自身的诊断
    t.compile_fail("tests/trybuild/autowired_wrong_type.rs");
    t.compile_fail("tests/trybuild/setter_not_arc.rs");
    t.compile_fail("tests/trybuild/constructor_param_not_option_arc.rs");
    t.compile_fail("tests/trybuild/duplicate_constructor.rs");
}
