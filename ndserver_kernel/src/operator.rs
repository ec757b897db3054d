//! Operator taxonomy: classifying the closed set of operator strings into
//! the categories the elementwise kernels dispatch on.

use std::fmt;

/// Category an operator belongs to. The categories partition the operator
/// set except that `/` is the sole member of `TrueDivision`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCategory {
    BitwiseLogic,
    BitwiseShift,
    BitwiseRot,
    Comparison,
    BasicArithmetic,
    FancyArithmetic,
    TrueDivision,
}

/// One of the operator strings accepted by the binary-operation commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    TrueDiv,
    FloorDiv,
    Mod,
    Pow,
    BitOr,
    BitAnd,
    BitXor,
    Shl,
    Shr,
    RotL,
    RotR,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl Operator {
    /// Parse an operator string, e.g. `"+"`, `"//"`, `"<<<"`. Returns
    /// `None` for anything outside the closed operator set.
    pub fn parse(s: &str) -> Option<Operator> {
        Some(match s {
            "+" => Operator::Add,
            "-" => Operator::Sub,
            "*" => Operator::Mul,
            "/" => Operator::TrueDiv,
            "//" => Operator::FloorDiv,
            "%" => Operator::Mod,
            "**" => Operator::Pow,
            "|" => Operator::BitOr,
            "&" => Operator::BitAnd,
            "^" => Operator::BitXor,
            "<<" => Operator::Shl,
            ">>" => Operator::Shr,
            "<<<" => Operator::RotL,
            ">>>" => Operator::RotR,
            "==" => Operator::Eq,
            "!=" => Operator::Ne,
            "<" => Operator::Lt,
            ">" => Operator::Gt,
            "<=" => Operator::Le,
            ">=" => Operator::Ge,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::TrueDiv => "/",
            Operator::FloorDiv => "//",
            Operator::Mod => "%",
            Operator::Pow => "**",
            Operator::BitOr => "|",
            Operator::BitAnd => "&",
            Operator::BitXor => "^",
            Operator::Shl => "<<",
            Operator::Shr => ">>",
            Operator::RotL => "<<<",
            Operator::RotR => ">>>",
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
        }
    }

    pub fn category(self) -> OpCategory {
        match self {
            Operator::BitOr | Operator::BitAnd | Operator::BitXor => OpCategory::BitwiseLogic,
            Operator::Shl | Operator::Shr => OpCategory::BitwiseShift,
            Operator::RotL | Operator::RotR => OpCategory::BitwiseRot,
            Operator::Eq
            | Operator::Ne
            | Operator::Lt
            | Operator::Gt
            | Operator::Le
            | Operator::Ge => OpCategory::Comparison,
            Operator::Add | Operator::Sub | Operator::Mul => OpCategory::BasicArithmetic,
            Operator::FloorDiv | Operator::Mod | Operator::Pow => OpCategory::FancyArithmetic,
            Operator::TrueDiv => OpCategory::TrueDivision,
        }
    }

    pub fn is_compound_eligible(self) -> bool {
        !matches!(self.category(), OpCategory::Comparison)
    }
}

/// `true` iff `op` is one of the recognized operator strings.
pub fn is_valid_operator(op: &str) -> bool {
    Operator::parse(op).is_some()
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operator_round_trips() {
        for s in [
            "+", "-", "*", "/", "//", "%", "**", "|", "&", "^", "<<", ">>", "<<<", ">>>", "==",
            "!=", "<", ">", "<=", ">=",
        ] {
            let op = Operator::parse(s).unwrap_or_else(|| panic!("{s} should parse"));
            assert_eq!(op.as_str(), s);
        }
    }

    #[test]
    fn unknown_operator_is_invalid() {
        assert!(!is_valid_operator("~"));
        assert!(!is_valid_operator(""));
        assert!(Operator::parse("<~>").is_none());
    }

    #[test]
    fn true_division_is_alone_in_its_category() {
        assert_eq!(Operator::TrueDiv.category(), OpCategory::TrueDivision);
        assert_ne!(Operator::FloorDiv.category(), OpCategory::TrueDivision);
    }
}
