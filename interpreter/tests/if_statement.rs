use zlua_test::*;

zlua_test!(if_statement_true
"
if true then x = 1 end
"
  x == 1
);

zlua_test!(if_statement_false_skips_body
"
x = 5
if false then x = 1 end
"
  x == 5
);

zlua_test!(if_else_statement
"
if false then x = 1 else x = 2 end
"
  x == 2
);

zlua_test!(if_elseif_chain
"
speed = 3
if speed == 1 then
  x = 10
elseif speed == 2 then
  x = 20
elseif speed == 3 then
  x = 30
else
  x = 40
end
"
  x == 30
);

zlua_test!(if_elseif_falls_through_to_else
"
if false then x = 1 elseif false then x = 2 else x = 3 end
"
  x == 3
);

zlua_test!(empty_if_is_a_no_op
"
x = 4
if true then end
"
  x == 4
);

zlua_test!(none_condition_counts_as_false
"
if unset then x = 1 else x = 2 end
"
  x == 2
);

zlua_test!(nested_if_statements
"
a = true
b = false
if a then
  if b then
    x = 1
  else
    x = 2
  end
  y = 3
end
"
  x == 2
  y == 3
);

zlua_test!(comparison_condition
"
x = 1.5f
if x > 1.0 and x < 2.0 then inside = true else inside = false end
"
  inside == true
);

zlua_test!(integer_condition_is_a_runtime_error
"
if 1 then x = 1 end
"
  RuntimeError
);

zlua_test!(unterminated_if_fails_to_load
"
if true then x = 1
"
  LoadError
);

zlua_test!(missing_then_fails_to_load
"
if true x = 1 end
"
  LoadError
);
