use zlua_test::*;

#[test]
fn declared_function_is_not_run() {
  let mut host = MockHost::default();
  let entry = run_successfully(
    "
function boost(amount)
  x = amount
end

y = 1
",
    &mut host,
  );

  assert_eq!(entry.get_global("x"), None);
  assert_eq!(entry.get_global("y"), Some(zlua::Object::Int32(1)));
}

#[test]
fn calling_declared_function_does_nothing() {
  let mut host = MockHost::default();
  let entry = run_successfully("function set() x = 1 end set()", &mut host);

  assert_eq!(entry.get_global("x"), None);
}

zlua_test!(empty_function_declaration
"
function nothing() end
x = 2
"
  x == 2
);

zlua_test!(unterminated_function_fails_to_load
"
function broken(a, b)
  x = a
"
  LoadError
);

zlua_test!(loop_statements_fail_to_load
"
while true do end
"
  LoadError
);

zlua_test!(return_fails_to_load
"
return 1
"
  LoadError
);

#[test]
fn function_declarations_are_kept() {
  let entry = zlua::Entry::load("test", "function f(a, b) x = a end").unwrap();
  let source = entry.source();
  let program = source.program().unwrap();

  assert_eq!(program.functions.len(), 1);
  assert_eq!(program.functions[0].parameters.len(), 2);
  assert!(program
    .get_function(source.names().get("f").unwrap())
    .is_some());
}
