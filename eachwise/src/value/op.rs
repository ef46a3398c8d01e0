use strum_macros::{Display, EnumString};

use crate::error;

use super::Value;

/// A binary operator that `inject` and `sum` can combine with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum BinaryOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Subtract,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "/")]
    Divide,
    #[strum(serialize = "%")]
    Modulo,
}

impl BinaryOp {
    /// Look up an operator by its name.
    pub fn parse(name: &str) -> error::Result<Self> {
        name.parse().map_err(|_| error::Error::NoMethod)
    }

    pub fn apply(self, a: &Value, b: &Value) -> error::Result<Value> {
        match (a, b) {
            (Value::Integer(a), Value::Integer(b)) => self.integer(*a, *b).map(Value::Integer),
            (Value::Integer(a), Value::Float(b)) => Ok(self.float(*a as f64, b.0).into()),
            (Value::Float(a), Value::Integer(b)) => Ok(self.float(a.0, *b as f64).into()),
            (Value::Float(a), Value::Float(b)) => Ok(self.float(a.0, b.0).into()),
            (Value::String(a), Value::String(b)) if self == BinaryOp::Add => {
                Ok(format!("{}{}", a, b).into())
            }
            (Value::Array(a), Value::Array(b)) if self == BinaryOp::Add => {
                Ok(a.iter().chain(b.iter()).cloned().collect())
            }
            _ => Err(error::Error::TypeError),
        }
    }

    fn integer(self, a: i64, b: i64) -> error::Result<i64> {
        let result = match self {
            BinaryOp::Add => a.checked_add(b),
            BinaryOp::Subtract => a.checked_sub(b),
            BinaryOp::Multiply => a.checked_mul(b),
            // integer division and remainder round towards negative infinity
            BinaryOp::Divide => {
                if b == 0 {
                    return Err(error::Error::ZeroDivision);
                }
                a.checked_div(b).map(|q| {
                    if a % b != 0 && ((a < 0) != (b < 0)) {
                        q - 1
                    } else {
                        q
                    }
                })
            }
            BinaryOp::Modulo => {
                if b == 0 {
                    return Err(error::Error::ZeroDivision);
                }
                a.checked_rem(b).map(|r| {
                    if r != 0 && ((r < 0) != (b < 0)) {
                        r + b
                    } else {
                        r
                    }
                })
            }
        };
        result.ok_or(error::Error::Overflow)
    }

    fn float(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Subtract => a - b,
            BinaryOp::Multiply => a * b,
            BinaryOp::Divide => a / b,
            BinaryOp::Modulo => {
                let r = a % b;
                if r != 0.0 && ((r < 0.0) != (b < 0.0)) {
                    r + b
                } else {
                    r
                }
            }
        }
    }
}
