use zlua_test::*;

zlua_test!(addition
"
x = 1
x = x + 2
"
  x == 3
);

zlua_test!(mixed_additive_chain
"
x = 10 + 5 - 3 + 1
"
  x == 13
);

zlua_test!(multiplication_binds_tighter
"
x = 2 + 3 * 4
y = (2 + 3) * 4
"
  x == 14
  y == 20
);

zlua_test!(division_and_remainder
"
a = 17 / 5
b = 17 % 5
c = 7.5 / 2.5
"
  a == 3
  b == 2
  c == 3.0f32
);

zlua_test!(integer_division_by_zero
"
x = 1 / 0
"
  RuntimeError
);

zlua_test!(float_division_by_zero_is_infinite
"
x = 1.0 / 0.0
big = x > 1000000.0
"
  big == true
);

zlua_test!(unsigned_literals
"
a = 0x10
b = 0b101
c = 7U
d = a + b
"
  a == 16u32
  b == 5u32
  c == 7u32
  d == 21u32
);

zlua_test!(unsigned_wraps_below_zero
"
x = 0U - 1
"
  x == 4294967295u32
);

zlua_test!(mixed_integers_take_accumulator_type
"
a = 1 + 2U
b = 2U + 1
"
  a == 3
  b == 3u32
);

zlua_test!(shifts_and_masks
"
a = 1 << 4
b = 256 >> 2
c = 0xF0 & 0x3C
d = 0xF0 | 0x0F
e = 0xFF ^ 0x0F
"
  a == 16
  b == 64
  c == 48u32
  d == 255u32
  e == 240u32
);

zlua_test!(comparisons
"
a = 1 < 2
b = 2 <= 1
c = 3 == 3
d = 3 != 3
e = 2.5 >= 2.5
"
  a == true
  b == false
  c == true
  d == false
  e == true
);

zlua_test!(compound_assignment
"
x = 10
x += 5
x -= 3
x *= 2
x /= 4
x %= 4
"
  x == 2
);

zlua_test!(compound_bitwise_assignment
"
flags = 0U
flags |= 0x5
flags &= 0x4
flags ^= 0x1
flags <<= 2
flags >>= 1
"
  flags == 10u32
);

zlua_test!(compound_assignment_on_unset_is_an_error
"
missing += 1
"
  RuntimeError
);

zlua_test!(float_and_integer_do_not_mix
"
x = 1.5 + 1
"
  RuntimeError
);

zlua_test!(statements_can_end_with_semicolons
"
a = 1; b = 2;
c = a + b;
"
  c == 3
);

zlua_test!(sixty_four_bit_literals_fail_to_load
"
x = 10UL
"
  LoadError
);
