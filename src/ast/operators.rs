/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinOp {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Exponentiation (`^`)
    Power,
}

impl BinOp {
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinOp::Add => left + right,
            BinOp::Subtract => left - right,
            BinOp::Multiply => left * right,
            BinOp::Divide => left / right,
            BinOp::Power => left.powf(right),
        }
    }
}
