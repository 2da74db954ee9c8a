mod common;

use common::compile_to_c;

const SRC: &str = "import std.io

first: () -> null = ()
    log(\"one\")

second: () -> null = ()
    log(\"two\")

main: () -> null = ()
    first()
    second()
";

#[test]
fn declarations_keep_source_order() {
    let c = compile_to_c(SRC).expect("the program should compile");

    let first = c.find("static void lz_fn_first(void) {").unwrap();
    let second = c.find("static void lz_fn_second(void) {").unwrap();
    let main = c.find("static void lz_fn_main(void) {").unwrap();
    assert!(first < second);
    assert!(second < main);
}

#[test]
fn statements_keep_source_order() {
    let c = compile_to_c(SRC).expect("the program should compile");

    let first_call = c.find("    lz_fn_first();").unwrap();
    let second_call = c.find("    lz_fn_second();").unwrap();
    assert!(first_call < second_call);
}

#[test]
fn output_is_deterministic() {
    let a = compile_to_c(SRC).expect("the program should compile");
    let b = compile_to_c(SRC).expect("the program should compile");

    assert_eq!(a, b);
}

#[test]
fn late_import_is_a_syntax_error() {
    let source = "main: () -> null = ()
    log(\"x\")
import std
";
    let err = compile_to_c(source).expect_err("the late import should be rejected");

    assert!(err.contains("Syntax error"));
    assert!(err.contains("imports must appear before declarations"));
}
