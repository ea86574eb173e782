use crate::interpreter::error::EvalError;
use crate::interpreter::format::format_real;
use log::debug;
use std::fmt;
use std::fmt::Formatter;

/// A numeric value. Integer literals stay integers until an operation requires a real.
/// Integer results are exact: one that does not fit in an `i64` is an [`EvalError::Overflow`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Number {
    Integer(i64),
    Real(f64),
}

/// Two operands brought to a common representation.
enum Operands {
    Integers(i64, i64),
    Reals(f64, f64),
}

fn operands(left: Number, right: Number) -> Operands {
    match (left, right) {
        (Number::Integer(left), Number::Integer(right)) => Operands::Integers(left, right),
        (left, right) => Operands::Reals(left.as_real(), right.as_real()),
    }
}

impl Number {
    pub fn as_real(&self) -> f64 {
        match self {
            Number::Integer(value) => *value as f64,
            Number::Real(value) => *value,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Integer(value) => *value == 0,
            Number::Real(value) => *value == 0.0,
        }
    }

    pub fn plus(self, other: Number) -> Result<Number, EvalError> {
        match operands(self, other) {
            Operands::Integers(a, b) => a
                .checked_add(b)
                .map(Number::Integer)
                .ok_or_else(|| overflowed("+")),
            Operands::Reals(a, b) => Ok(Number::Real(a + b)),
        }
    }

    pub fn minus(self, other: Number) -> Result<Number, EvalError> {
        match operands(self, other) {
            Operands::Integers(a, b) => a
                .checked_sub(b)
                .map(Number::Integer)
                .ok_or_else(|| overflowed("-")),
            Operands::Reals(a, b) => Ok(Number::Real(a - b)),
        }
    }

    pub fn times(self, other: Number) -> Result<Number, EvalError> {
        match operands(self, other) {
            Operands::Integers(a, b) => a
                .checked_mul(b)
                .map(Number::Integer)
                .ok_or_else(|| overflowed("*")),
            Operands::Reals(a, b) => Ok(Number::Real(a * b)),
        }
    }

    /// True division. The quotient is always a real.
    pub fn divided_by(self, other: Number) -> Result<Number, EvalError> {
        if other.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        Ok(Number::Real(self.as_real() / other.as_real()))
    }

    /// Division rounded toward negative infinity.
    pub fn floor_divided_by(self, other: Number) -> Result<Number, EvalError> {
        if other.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        match operands(self, other) {
            Operands::Integers(a, b) => match a.checked_div(b) {
                Some(quotient) if a % b != 0 && ((a % b < 0) != (b < 0)) => {
                    Ok(Number::Integer(quotient - 1))
                }
                Some(quotient) => Ok(Number::Integer(quotient)),
                None => Err(overflowed("//")),
            },
            Operands::Reals(a, b) => Ok(Number::Real(real_divmod(a, b).0)),
        }
    }

    /// Remainder of floor division. The sign of a non-zero result follows the divisor.
    pub fn modulo(self, other: Number) -> Result<Number, EvalError> {
        if other.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        match operands(self, other) {
            Operands::Integers(a, b) => {
                let remainder = a.wrapping_rem(b);
                if remainder != 0 && ((remainder < 0) != (b < 0)) {
                    Ok(Number::Integer(remainder + b))
                } else {
                    Ok(Number::Integer(remainder))
                }
            }
            Operands::Reals(a, b) => Ok(Number::Real(real_divmod(a, b).1)),
        }
    }

    pub fn raised_to(self, exponent: Number) -> Result<Number, EvalError> {
        if let Operands::Integers(base, power) = operands(self, exponent) {
            if power >= 0 {
                return integer_power(base, power)
                    .map(Number::Integer)
                    .ok_or_else(|| overflowed("**"));
            }
        }

        let (base, power) = (self.as_real(), exponent.as_real());
        if base == 0.0 && power < 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        if base < 0.0 && power.is_finite() && power.fract() != 0.0 {
            return Err(EvalError::NonRealResult);
        }
        let value = base.powf(power);
        if value.is_infinite() && base.is_finite() && power.is_finite() {
            return Err(EvalError::Overflow);
        }
        Ok(Number::Real(value))
    }

    pub fn negated(self) -> Result<Number, EvalError> {
        match self {
            Number::Integer(value) => value
                .checked_neg()
                .map(Number::Integer)
                .ok_or_else(|| overflowed("-")),
            Number::Real(value) => Ok(Number::Real(-value)),
        }
    }

    pub fn identity(self) -> Number {
        self
    }
}

fn overflowed(symbol: &str) -> EvalError {
    debug!("integer {} overflowed", symbol);
    EvalError::Overflow
}

/// Exact integer power for a non-negative exponent, if it fits in an `i64`.
fn integer_power(base: i64, power: i64) -> Option<i64> {
    match base {
        0 | 1 if power > 0 => Some(base),
        _ if power == 0 => Some(1),
        -1 => Some(if power % 2 == 0 { 1 } else { -1 }),
        _ => u32::try_from(power)
            .ok()
            .and_then(|power| base.checked_pow(power)),
    }
}

/// Floor quotient and remainder of two reals, with the remainder taking the divisor's sign.
/// The divisor must be non-zero.
fn real_divmod(dividend: f64, divisor: f64) -> (f64, f64) {
    let mut remainder = dividend % divisor;
    let mut quotient = (dividend - remainder) / divisor;
    if remainder != 0.0 {
        if (divisor < 0.0) != (remainder < 0.0) {
            remainder += divisor;
            quotient -= 1.0;
        }
    } else {
        remainder = 0.0_f64.copysign(divisor);
    }

    let floored = if quotient != 0.0 {
        let floored = quotient.floor();
        if quotient - floored > 0.5 {
            floored + 1.0
        } else {
            floored
        }
    } else {
        0.0_f64.copysign(dividend / divisor)
    };
    (floored, remainder)
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(value) => write!(f, "{}", value),
            Number::Real(value) => f.write_str(&format_real(*value)),
        }
    }
}
