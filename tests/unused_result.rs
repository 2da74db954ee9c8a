mod common;

use common::compile_to_c;

#[test]
fn ignored_result_call_is_rejected() {
    let source = "f: () -> result[int,int] = ()
    return 1
main: () -> null = ()
    f()
";
    let err = compile_to_c(source).expect_err("the dropped result should be rejected");

    assert!(err.contains("Semantic error"));
    assert!(err.contains("result-returning function must not be ignored"));
}

#[test]
fn result_call_bound_to_a_variable_compiles() {
    let source = "f: () -> result[int,int] = ()
    return 1
consume: () -> result[int,int] = ()
    r: result[int,int] = f()
    return r
";
    let c = compile_to_c(source).expect("binding the result should compile");

    assert!(c.contains("    lz_result r = {0};"));
    assert!(c.contains("    lz_assign_result(&r, lz_fn_f());"));
}
