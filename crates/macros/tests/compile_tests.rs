#[test]
fn ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/agent_pass.rs");
    t.compile_fail("tests/ui/workflow_self_fail.rs");
    t.compile_fail("tests/ui/tool_not_async_fail.rs");
}
