//! Interned bitvector term nodes.
//!
//! A term node is an operator applied to already-interned operand
//! handles, so structurally equal terms share one entry and equality of
//! whole term DAGs is an id comparison. Composite nodes hold references
//! to their operands; releasing a node cascades to operands that become
//! unreferenced.

use smallvec::SmallVec;
use std::fmt;

use crate::pool::{EntryId, Pool};

/// A declared bitvector variable with a fixed width.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BvVariable(u32);

impl BvVariable {
    /// Returns the raw index of this variable.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BvVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// A handle to an interned bitvector term node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BvTerm(EntryId);

impl BvTerm {
    /// Returns the underlying pool id.
    #[must_use]
    pub const fn id(self) -> EntryId {
        self.0
    }
}

/// Unary bitvector operators. Extension and rotation carry their amount.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BvUnaryOp {
    /// Bitwise complement.
    Not,
    /// Two's complement negation.
    Neg,
    /// Widen by the given number of zero bits.
    ZeroExtend(u32),
    /// Widen by the given number of sign bits.
    SignExtend(u32),
    /// Rotate left by the given amount.
    RotateLeft(u32),
    /// Rotate right by the given amount.
    RotateRight(u32),
}

impl BvUnaryOp {
    fn name(self) -> &'static str {
        match self {
            Self::Not => "bvnot",
            Self::Neg => "bvneg",
            Self::ZeroExtend(_) => "zero_extend",
            Self::SignExtend(_) => "sign_extend",
            Self::RotateLeft(_) => "rotate_left",
            Self::RotateRight(_) => "rotate_right",
        }
    }
}

/// Binary bitvector operators.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BvBinaryOp {
    /// Bitwise and.
    And,
    /// Bitwise or.
    Or,
    /// Bitwise exclusive or.
    Xor,
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Wrapping multiplication.
    Mul,
    /// Logical shift left.
    Shl,
    /// Logical shift right.
    Lshr,
    /// Concatenation; the only width-changing binary operator.
    Concat,
}

impl BvBinaryOp {
    fn name(self) -> &'static str {
        match self {
            Self::And => "bvand",
            Self::Or => "bvor",
            Self::Xor => "bvxor",
            Self::Add => "bvadd",
            Self::Sub => "bvsub",
            Self::Mul => "bvmul",
            Self::Shl => "bvshl",
            Self::Lshr => "bvlshr",
            Self::Concat => "concat",
        }
    }
}

/// The normalized content of a term node.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
enum BvKind {
    Constant { value: u64, width: u32 },
    Variable(BvVariable),
    Unary { op: BvUnaryOp, operand: BvTerm },
    Binary { op: BvBinaryOp, lhs: BvTerm, rhs: BvTerm },
    Extract { operand: BvTerm, first: u32, last: u32 },
}

/// An interned node: operator kind plus the width it produces.
///
/// The width is derived from the kind and the declared variable widths,
/// stored so width queries stay O(1).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct BvNode {
    kind: BvKind,
    width: u32,
}

impl BvNode {
    fn operands(&self) -> SmallVec<[EntryId; 2]> {
        match self.kind {
            BvKind::Constant { .. } | BvKind::Variable(_) => SmallVec::new(),
            BvKind::Unary { operand, .. } | BvKind::Extract { operand, .. } => {
                SmallVec::from_slice(&[operand.0])
            }
            BvKind::Binary { lhs, rhs, .. } => SmallVec::from_slice(&[lhs.0, rhs.0]),
        }
    }
}

impl fmt::Display for BvNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            BvKind::Constant { value, width } => write!(f, "{value}[{width}]"),
            BvKind::Variable(v) => write!(f, "{v}"),
            BvKind::Unary { op, operand } => write!(f, "({} {})", op.name(), operand.0),
            BvKind::Binary { op, lhs, rhs } => {
                write!(f, "({} {} {})", op.name(), lhs.0, rhs.0)
            }
            BvKind::Extract {
                operand,
                first,
                last,
            } => write!(f, "(extract[{first}:{last}] {})", operand.0),
        }
    }
}

#[derive(Debug, Clone)]
struct BvVarDecl {
    name: String,
    width: u32,
}

/// Declares bitvector variables and interns term nodes built over them.
#[derive(Debug, Default)]
pub struct BvTermPool {
    variables: Vec<BvVarDecl>,
    terms: Pool<BvNode>,
}

impl BvTermPool {
    /// Creates a new empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a bitvector variable with the given name and width.
    ///
    /// # Panics
    ///
    /// Panics if the width is zero.
    pub fn declare(&mut self, name: &str, width: u32) -> BvVariable {
        assert!(width > 0, "bitvector variable {name} must have a width");
        let id = u32::try_from(self.variables.len()).expect("variable table capacity exceeded");
        self.variables.push(BvVarDecl {
            name: name.to_string(),
            width,
        });
        BvVariable(id)
    }

    /// Returns the name of a declared variable.
    ///
    /// # Panics
    ///
    /// Panics if the variable was not declared in this pool.
    #[must_use]
    pub fn variable_name(&self, v: BvVariable) -> &str {
        &self.variables[v.0 as usize].name
    }

    /// Interns a constant term.
    ///
    /// # Panics
    ///
    /// Panics if the width is zero, exceeds 64, or the value does not
    /// fit in it.
    pub fn constant(&mut self, value: u64, width: u32) -> BvTerm {
        assert!(width >= 1 && width <= 64, "constant width {width} out of range");
        assert!(
            width == 64 || value >> width == 0,
            "constant {value} does not fit in {width} bits"
        );
        self.intern(BvNode {
            kind: BvKind::Constant { value, width },
            width,
        })
    }

    /// Interns a variable term.
    ///
    /// # Panics
    ///
    /// Panics if the variable was not declared in this pool.
    pub fn variable(&mut self, v: BvVariable) -> BvTerm {
        let width = self.variables[v.0 as usize].width;
        self.intern(BvNode {
            kind: BvKind::Variable(v),
            width,
        })
    }

    /// Interns a unary term.
    ///
    /// Extension operators widen the operand by their amount; the other
    /// operators keep its width.
    ///
    /// # Panics
    ///
    /// Panics if the operand is not live in this pool.
    pub fn unary(&mut self, op: BvUnaryOp, operand: BvTerm) -> BvTerm {
        let operand_width = self.width(operand);
        let width = match op {
            BvUnaryOp::ZeroExtend(n) | BvUnaryOp::SignExtend(n) => operand_width + n,
            BvUnaryOp::Not
            | BvUnaryOp::Neg
            | BvUnaryOp::RotateLeft(_)
            | BvUnaryOp::RotateRight(_) => operand_width,
        };
        self.intern(BvNode {
            kind: BvKind::Unary { op, operand },
            width,
        })
    }

    /// Interns a binary term.
    ///
    /// `Concat` produces the sum of the operand widths; every other
    /// operator requires equal widths.
    ///
    /// # Panics
    ///
    /// Panics if an operand is not live, or on an operand width mismatch.
    pub fn binary(&mut self, op: BvBinaryOp, lhs: BvTerm, rhs: BvTerm) -> BvTerm {
        let (wl, wr) = (self.width(lhs), self.width(rhs));
        let width = if op == BvBinaryOp::Concat {
            wl + wr
        } else {
            assert!(
                wl == wr,
                "{} operand widths differ: {wl} vs {wr}",
                op.name()
            );
            wl
        };
        self.intern(BvNode {
            kind: BvKind::Binary { op, lhs, rhs },
            width,
        })
    }

    /// Interns an extract term selecting bits `last..=first`.
    ///
    /// # Panics
    ///
    /// Panics if the operand is not live, or unless
    /// `last <= first < width(operand)`.
    pub fn extract(&mut self, operand: BvTerm, first: u32, last: u32) -> BvTerm {
        let operand_width = self.width(operand);
        assert!(
            last <= first && first < operand_width,
            "extract range [{first}:{last}] invalid for width {operand_width}"
        );
        self.intern(BvNode {
            kind: BvKind::Extract {
                operand,
                first,
                last,
            },
            width: first - last + 1,
        })
    }

    /// Find-or-insert. A fresh composite node takes one reference to
    /// each operand; a hit only bumps the existing node's count.
    fn intern(&mut self, node: BvNode) -> BvTerm {
        if let Some(id) = self.terms.lookup(&node) {
            self.terms.acquire(id);
            return BvTerm(id);
        }
        for operand in node.operands() {
            self.terms.acquire(operand);
        }
        BvTerm(self.terms.create(node, ()))
    }

    /// Returns the width of an interned term.
    ///
    /// # Panics
    ///
    /// Panics if the term is not live in this pool.
    #[must_use]
    pub fn width(&self, term: BvTerm) -> u32 {
        self.terms.get(term.0).width
    }

    /// Releases one reference to a term, cascading through operands.
    ///
    /// # Panics
    ///
    /// Panics if the term is not live in this pool.
    pub fn release(&mut self, term: BvTerm) {
        let mut stack = vec![term.0];
        while let Some(id) = stack.pop() {
            if let Some((node, ())) = self.terms.release(id) {
                stack.extend(node.operands());
            }
        }
    }

    /// Returns the number of live term nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if no term nodes are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Formats a term with variable names, recursing through operands.
    #[must_use]
    pub fn display(&self, term: BvTerm) -> String {
        let node = self.terms.get(term.0);
        match &node.kind {
            BvKind::Constant { value, width } => format!("{value}[{width}]"),
            BvKind::Variable(v) => self.variables[v.0 as usize].name.clone(),
            BvKind::Unary { op, operand } => {
                format!("({} {})", op.name(), self.display(*operand))
            }
            BvKind::Binary { op, lhs, rhs } => format!(
                "({} {} {})",
                op.name(),
                self.display(*lhs),
                self.display(*rhs)
            ),
            BvKind::Extract {
                operand,
                first,
                last,
            } => format!("(extract[{first}:{last}] {})", self.display(*operand)),
        }
    }

    /// Prints a diagnostic dump of all live term nodes.
    pub fn print(&self) {
        self.terms.print();
    }
}
