use crate::error::Fault;
use zlua_syntax::{ast::BinaryOperator, LiteralId, LiteralPool, Object};

macro_rules! integer_operation {
  ($operator:expr, $left:expr, $right:expr, $variant:ident) => {{
    let (left, right) = ($left, $right);

    #[allow(clippy::cast_sign_loss, trivial_numeric_casts, clippy::unnecessary_cast)]
    let shift = right as u32;

    match $operator {
      BinaryOperator::Add => Some(Object::$variant(left.wrapping_add(right))),
      BinaryOperator::Subtract => Some(Object::$variant(left.wrapping_sub(right))),
      BinaryOperator::Multiply => Some(Object::$variant(left.wrapping_mul(right))),
      BinaryOperator::Divide | BinaryOperator::Remainder if right == 0 => {
        return Err(Fault::DivisionByZero)
      }
      BinaryOperator::Divide => Some(Object::$variant(left.wrapping_div(right))),
      BinaryOperator::Remainder => Some(Object::$variant(left.wrapping_rem(right))),
      BinaryOperator::LeftShift => Some(Object::$variant(left.wrapping_shl(shift))),
      BinaryOperator::RightShift => Some(Object::$variant(left.wrapping_shr(shift))),
      BinaryOperator::BitAnd => Some(Object::$variant(left & right)),
      BinaryOperator::BitOr => Some(Object::$variant(left | right)),
      BinaryOperator::BitXor => Some(Object::$variant(left ^ right)),
      BinaryOperator::Equal => Some(Object::Bool(left == right)),
      BinaryOperator::NotEqual => Some(Object::Bool(left != right)),
      BinaryOperator::Less => Some(Object::Bool(left < right)),
      BinaryOperator::Greater => Some(Object::Bool(left > right)),
      BinaryOperator::LessEqual => Some(Object::Bool(left <= right)),
      BinaryOperator::GreaterEqual => Some(Object::Bool(left >= right)),
      BinaryOperator::And | BinaryOperator::Or => None,
    }
  }};
}

fn float_operation(operator: BinaryOperator, left: f32, right: f32) -> Option<Object> {
  match operator {
    BinaryOperator::Add => Some(Object::Float(left + right)),
    BinaryOperator::Subtract => Some(Object::Float(left - right)),
    BinaryOperator::Multiply => Some(Object::Float(left * right)),
    BinaryOperator::Divide => Some(Object::Float(left / right)),
    BinaryOperator::Remainder => Some(Object::Float(left % right)),
    BinaryOperator::Equal => Some(Object::Bool(left == right)),
    BinaryOperator::NotEqual => Some(Object::Bool(left != right)),
    BinaryOperator::Less => Some(Object::Bool(left < right)),
    BinaryOperator::Greater => Some(Object::Bool(left > right)),
    BinaryOperator::LessEqual => Some(Object::Bool(left <= right)),
    BinaryOperator::GreaterEqual => Some(Object::Bool(left >= right)),
    _ => None,
  }
}

fn bool_operation(operator: BinaryOperator, left: bool, right: bool) -> Option<Object> {
  match operator {
    BinaryOperator::And | BinaryOperator::BitAnd => Some(Object::Bool(left & right)),
    BinaryOperator::Or | BinaryOperator::BitOr => Some(Object::Bool(left | right)),
    BinaryOperator::BitXor => Some(Object::Bool(left ^ right)),
    BinaryOperator::Equal => Some(Object::Bool(left == right)),
    BinaryOperator::NotEqual => Some(Object::Bool(left != right)),
    _ => None,
  }
}

fn string_operation(
  operator: BinaryOperator,
  left: LiteralId,
  right: LiteralId,
  literals: &LiteralPool,
) -> Option<Object> {
  let equal = left == right || literals.get(left) == literals.get(right);

  match operator {
    BinaryOperator::Equal => Some(Object::Bool(equal)),
    BinaryOperator::NotEqual => Some(Object::Bool(!equal)),
    _ => None,
  }
}

/// Applies `operator` to the accumulator in place, dispatching on the
/// accumulator's type.
///
/// Integer operands are reinterpreted as the accumulator's integer type, so
/// `Int32` and `UInt32` mix freely. Every other pairing needs operands of
/// the same type.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
pub fn apply(
  operator: BinaryOperator,
  accumulator: &mut Object,
  operand: Object,
  literals: &LiteralPool,
) -> Result<(), Fault> {
  let result = match (*accumulator, operand) {
    (Object::Int32(left), Object::Int32(right)) => integer_operation!(operator, left, right, Int32),
    (Object::Int32(left), Object::UInt32(right)) => {
      integer_operation!(operator, left, right as i32, Int32)
    }
    (Object::UInt32(left), Object::UInt32(right)) => {
      integer_operation!(operator, left, right, UInt32)
    }
    (Object::UInt32(left), Object::Int32(right)) => {
      integer_operation!(operator, left, right as u32, UInt32)
    }
    (Object::Float(left), Object::Float(right)) => float_operation(operator, left, right),
    (Object::Bool(left), Object::Bool(right)) => bool_operation(operator, left, right),
    (Object::Str(left), Object::Str(right)) => string_operation(operator, left, right, literals),
    _ => None,
  };

  match result {
    Some(result) => {
      *accumulator = result;
      Ok(())
    }
    None => Err(Fault::UnsupportedOperation {
      operator,
      left: accumulator.type_kind(),
      right: operand.type_kind(),
    }),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use zlua_syntax::{TypeKind, WideString};

  fn evaluate(left: Object, operator: BinaryOperator, right: Object) -> Result<Object, Fault> {
    let literals = LiteralPool::new();
    let mut accumulator = left;
    apply(operator, &mut accumulator, right, &literals).map(|()| accumulator)
  }

  #[test]
  fn should_wrap_integer_arithmetic() {
    assert_eq!(
      evaluate(Object::Int32(i32::MAX), BinaryOperator::Add, Object::Int32(1)),
      Ok(Object::Int32(i32::MIN))
    );
    assert_eq!(
      evaluate(Object::UInt32(0), BinaryOperator::Subtract, Object::UInt32(1)),
      Ok(Object::UInt32(u32::MAX))
    );
    assert_eq!(
      evaluate(Object::Int32(7), BinaryOperator::Remainder, Object::Int32(3)),
      Ok(Object::Int32(1))
    );
  }

  #[test]
  fn should_reinterpret_mixed_integers_as_accumulator_type() {
    assert_eq!(
      evaluate(Object::UInt32(1), BinaryOperator::Add, Object::Int32(-1)),
      Ok(Object::UInt32(0))
    );
    assert_eq!(
      evaluate(Object::Int32(0), BinaryOperator::Add, Object::UInt32(u32::MAX)),
      Ok(Object::Int32(-1))
    );
  }

  #[test]
  fn should_fault_on_integer_division_by_zero() {
    assert_eq!(
      evaluate(Object::Int32(1), BinaryOperator::Divide, Object::Int32(0)),
      Err(Fault::DivisionByZero)
    );
    assert_eq!(
      evaluate(Object::UInt32(1), BinaryOperator::Remainder, Object::UInt32(0)),
      Err(Fault::DivisionByZero)
    );
  }

  #[test]
  fn should_not_overflow_on_min_divided_by_minus_one() {
    assert_eq!(
      evaluate(Object::Int32(i32::MIN), BinaryOperator::Divide, Object::Int32(-1)),
      Ok(Object::Int32(i32::MIN))
    );
  }

  #[test]
  fn should_shift_and_mask_integers() {
    assert_eq!(
      evaluate(Object::UInt32(1), BinaryOperator::LeftShift, Object::UInt32(4)),
      Ok(Object::UInt32(16))
    );
    assert_eq!(
      evaluate(Object::UInt32(0xF0), BinaryOperator::BitAnd, Object::UInt32(0x3C)),
      Ok(Object::UInt32(0x30))
    );
    assert_eq!(
      evaluate(Object::Int32(-8), BinaryOperator::RightShift, Object::Int32(1)),
      Ok(Object::Int32(-4))
    );
  }

  #[test]
  fn should_compare_floats() {
    assert_eq!(
      evaluate(Object::Float(1.5), BinaryOperator::Less, Object::Float(2.0)),
      Ok(Object::Bool(true))
    );
    assert_eq!(
      evaluate(Object::Float(1.0), BinaryOperator::Divide, Object::Float(4.0)),
      Ok(Object::Float(0.25))
    );
  }

  #[test]
  fn should_combine_bools() {
    assert_eq!(
      evaluate(Object::Bool(true), BinaryOperator::And, Object::Bool(false)),
      Ok(Object::Bool(false))
    );
    assert_eq!(
      evaluate(Object::Bool(true), BinaryOperator::BitXor, Object::Bool(true)),
      Ok(Object::Bool(false))
    );
  }

  #[test]
  fn should_compare_strings_by_contents() {
    let mut literals = LiteralPool::new();
    let a = literals.add(WideString::from("abc"));
    let b = literals.add(WideString::from("abc"));
    let c = literals.add(WideString::from("abd"));

    let mut accumulator = Object::Str(a);
    apply(BinaryOperator::Equal, &mut accumulator, Object::Str(b), &literals).unwrap();
    assert_eq!(accumulator, Object::Bool(true));

    let mut accumulator = Object::Str(a);
    apply(BinaryOperator::Equal, &mut accumulator, Object::Str(c), &literals).unwrap();
    assert_eq!(accumulator, Object::Bool(false));
  }

  #[test]
  fn should_reject_mismatched_types() {
    assert_eq!(
      evaluate(Object::Float(1.0), BinaryOperator::Add, Object::Int32(1)),
      Err(Fault::UnsupportedOperation {
        operator: BinaryOperator::Add,
        left: TypeKind::Float,
        right: TypeKind::Int32,
      })
    );
    assert!(evaluate(Object::None, BinaryOperator::Equal, Object::None).is_err());
    assert!(evaluate(Object::Int32(1), BinaryOperator::And, Object::Int32(1)).is_err());
  }
}
