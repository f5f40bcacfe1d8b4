use crate::vm::{InterpretResult, VM};

fn result_kind(result: InterpretResult) -> &'static str {
    match result {
        InterpretResult::Ok => "ok",
        InterpretResult::CompileError => "compile_error",
        InterpretResult::RuntimeError => "runtime_error",
    }
}

#[test]
fn arithmetic_and_print_runs_clean() {
    let result = VM::interpret("print 1 + 2 * 3;");
    assert_eq!(result_kind(result), "ok");
}

#[test]
fn string_concatenation_runs_clean() {
    let result = VM::interpret(r#"print "foo" + "bar";"#);
    assert_eq!(result_kind(result), "ok");
}

#[test]
fn adding_a_number_to_a_string_is_a_runtime_error() {
    let result = VM::interpret(r#"print 1 + "two";"#);
    assert_eq!(result_kind(result), "runtime_error");
}

#[test]
fn negating_a_string_is_a_runtime_error() {
    let result = VM::interpret(r#"print -"nope";"#);
    assert_eq!(result_kind(result), "runtime_error");
}

#[test]
fn reading_an_undefined_global_is_a_runtime_error() {
    let result = VM::interpret("print undefined_name;");
    assert_eq!(result_kind(result), "runtime_error");
}

#[test]
fn assigning_to_an_undefined_global_is_a_runtime_error() {
    let result = VM::interpret("undefined_name = 1;");
    assert_eq!(result_kind(result), "runtime_error");
}

#[test]
fn redefining_a_global_with_var_is_allowed() {
    let result = VM::interpret("var a = 1; var a = 2; print a;");
    assert_eq!(result_kind(result), "ok");
}

#[test]
fn global_assignment_is_an_expression_whose_value_can_be_printed() {
    let result = VM::interpret("var a = 1; print a = 2;");
    assert_eq!(result_kind(result), "ok");
}

#[test]
fn block_scoped_locals_do_not_leak_into_the_enclosing_scope() {
    let result = VM::interpret("{ var a = 1; } print a;");
    assert_eq!(result_kind(result), "runtime_error");
}

#[test]
fn if_else_runs_the_matching_branch_only() {
    let result = VM::interpret("if (1 < 2) { print \"yes\"; } else { print \"no\"; }");
    assert_eq!(result_kind(result), "ok");
}

#[test]
fn while_loop_terminates_and_runs_clean() {
    let result = VM::interpret("var i = 0; while (i < 5) { i = i + 1; } print i;");
    assert_eq!(result_kind(result), "ok");
}

#[test]
fn and_or_short_circuit_without_evaluating_the_undefined_side() {
    // `false and undefined_name` must never evaluate the right operand, or
    // this would also fail with an undefined-variable runtime error.
    let result = VM::interpret("print false and undefined_name;");
    assert_eq!(result_kind(result), "ok");

    let result = VM::interpret("print true or undefined_name;");
    assert_eq!(result_kind(result), "ok");
}

#[test]
fn a_syntax_error_is_reported_as_a_compile_error_and_never_runs() {
    let result = VM::interpret("print 1 +;");
    assert_eq!(result_kind(result), "compile_error");
}

#[test]
fn equality_compares_by_value_across_types_without_coercion() {
    let result = VM::interpret("print 1 == \"1\";");
    assert_eq!(result_kind(result), "ok");
}

#[test]
fn nested_scopes_pop_all_their_locals_on_exit() {
    let result = VM::interpret("{ var a = 1; { var b = 2; print a + b; } print a; }");
    assert_eq!(result_kind(result), "ok");
}

#[test]
fn a_local_initializer_referencing_its_own_name_resolves_to_an_outer_binding() {
    // `a` on the right-hand side must not resolve to the not-yet-live slot
    // `a` is being declared into; it should fall through to the global `a`.
    let result = VM::interpret("var a = 1; { var a = a + 1; print a; }");
    assert_eq!(result_kind(result), "ok");
}

#[test]
fn a_local_initializer_referencing_its_own_name_with_no_outer_binding_is_a_runtime_error() {
    // With no outer `a` at all, falling through past the uninitialized
    // local reaches the globals table and finds nothing there either.
    let result = VM::interpret("{ var a = a; print a; }");
    assert_eq!(result_kind(result), "runtime_error");
}
