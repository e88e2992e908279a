//! Second-quantized fermionic operators.
//!
//! A [`FermionicOp`] is a sum of products of creation (`+_p`) and
//! annihilation (`-_p`) operators over a register of spin-orbital modes:
//!
//! O = Σₖ cₖ · a^{(†)}_{p₁} a^{(†)}_{p₂} ⋯
//!
//! Products are stored in the order written and are not normal-ordered;
//! the qubit mappers are responsible for the algebra.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{OpError, OpResult};

/// Creation or annihilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LadderKind {
    /// Creation operator a†.
    Create,
    /// Annihilation operator a.
    Annihilate,
}

/// A single ladder operator acting on one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LadderOp {
    pub kind: LadderKind,
    pub mode: usize,
}

impl LadderOp {
    /// Creation operator on `mode`.
    pub fn create(mode: usize) -> Self {
        Self {
            kind: LadderKind::Create,
            mode,
        }
    }

    /// Annihilation operator on `mode`.
    pub fn annihilate(mode: usize) -> Self {
        Self {
            kind: LadderKind::Annihilate,
            mode,
        }
    }

    /// Hermitian adjoint.
    pub fn adjoint(self) -> Self {
        let kind = match self.kind {
            LadderKind::Create => LadderKind::Annihilate,
            LadderKind::Annihilate => LadderKind::Create,
        };
        Self { kind, mode: self.mode }
    }

    fn parse(token: &str) -> Option<Self> {
        let (sign, mode) = token.split_once('_')?;
        let mode = mode.parse().ok()?;
        match sign {
            "+" => Some(Self::create(mode)),
            "-" => Some(Self::annihilate(mode)),
            _ => None,
        }
    }
}

impl std::fmt::Display for LadderOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            LadderKind::Create => write!(f, "+_{}", self.mode),
            LadderKind::Annihilate => write!(f, "-_{}", self.mode),
        }
    }
}

/// One product of ladder operators with its coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FermionicTerm {
    /// Ladder operators, applied right to left as written.
    pub ladders: Vec<LadderOp>,
    pub coeff: f64,
}

impl FermionicTerm {
    /// Create a new term.
    pub fn new(ladders: Vec<LadderOp>, coeff: f64) -> Self {
        Self { ladders, coeff }
    }

    /// Hermitian adjoint of the term.
    pub fn adjoint(&self) -> Self {
        Self {
            ladders: self.ladders.iter().rev().map(|l| l.adjoint()).collect(),
            coeff: self.coeff,
        }
    }

    fn label(&self) -> String {
        if self.ladders.is_empty() {
            return "I".to_string();
        }
        self.ladders
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A fermionic operator over a register of `register_length` modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FermionicOp {
    register_length: usize,
    terms: Vec<FermionicTerm>,
}

impl FermionicOp {
    /// The zero operator.
    pub fn zero(register_length: usize) -> Self {
        Self {
            register_length,
            terms: Vec::new(),
        }
    }

    /// `coeff · I`.
    pub fn identity(register_length: usize, coeff: f64) -> Self {
        Self {
            register_length,
            terms: vec![FermionicTerm::new(Vec::new(), coeff)],
        }
    }

    /// Create an operator from terms, validating every mode index.
    pub fn new(register_length: usize, terms: Vec<FermionicTerm>) -> OpResult<Self> {
        for ladder in terms.iter().flat_map(|t| &t.ladders) {
            if ladder.mode >= register_length {
                return Err(OpError::ModeOutOfRange {
                    mode: ladder.mode,
                    register_length,
                });
            }
        }
        Ok(Self {
            register_length,
            terms,
        })
    }

    /// Create an operator from labels such as `("+_0 -_1", 0.5)`.
    pub fn from_labels<'a>(
        register_length: usize,
        labels: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> OpResult<Self> {
        let mut terms = Vec::new();
        for (label, coeff) in labels {
            let ladders = label
                .split_whitespace()
                .map(|tok| LadderOp::parse(tok).ok_or_else(|| OpError::InvalidLabel(label.to_string())))
                .collect::<OpResult<Vec<LadderOp>>>()?;
            terms.push(FermionicTerm::new(ladders, coeff));
        }
        Self::new(register_length, terms)
    }

    /// `coeff · a†_p a_q`.
    pub fn one_body(register_length: usize, p: usize, q: usize, coeff: f64) -> OpResult<Self> {
        Self::new(
            register_length,
            vec![FermionicTerm::new(
                vec![LadderOp::create(p), LadderOp::annihilate(q)],
                coeff,
            )],
        )
    }

    /// Total number operator Σₚ a†_p a_p.
    pub fn number(register_length: usize) -> Self {
        let terms = (0..register_length)
            .map(|p| FermionicTerm::new(vec![LadderOp::create(p), LadderOp::annihilate(p)], 1.0))
            .collect();
        Self {
            register_length,
            terms,
        }
    }

    /// Number of modes in the register.
    pub fn register_length(&self) -> usize {
        self.register_length
    }

    /// The terms, in order.
    pub fn terms(&self) -> &[FermionicTerm] {
        &self.terms
    }

    /// Get the number of terms.
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Check if the operator has no terms.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// `self + other`.
    pub fn add(&self, other: &FermionicOp) -> OpResult<Self> {
        self.check_register(other)?;
        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().cloned());
        Ok(Self {
            register_length: self.register_length,
            terms,
        })
    }

    /// Multiply every coefficient by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            register_length: self.register_length,
            terms: self
                .terms
                .iter()
                .map(|t| FermionicTerm::new(t.ladders.clone(), t.coeff * factor))
                .collect(),
        }
    }

    /// Operator product `self · other`.
    pub fn compose(&self, other: &FermionicOp) -> OpResult<Self> {
        self.check_register(other)?;
        let mut terms = Vec::with_capacity(self.terms.len() * other.terms.len());
        for a in &self.terms {
            for b in &other.terms {
                let mut ladders = a.ladders.clone();
                ladders.extend_from_slice(&b.ladders);
                terms.push(FermionicTerm::new(ladders, a.coeff * b.coeff));
            }
        }
        Ok(Self {
            register_length: self.register_length,
            terms,
        })
    }

    /// Hermitian adjoint.
    pub fn adjoint(&self) -> Self {
        Self {
            register_length: self.register_length,
            terms: self.terms.iter().map(|t| t.adjoint()).collect(),
        }
    }

    /// Merge terms with identical ladder sequences and drop `|c| < atol`.
    pub fn simplify(&self, atol: f64) -> Self {
        let mut index: FxHashMap<&[LadderOp], usize> = FxHashMap::default();
        let mut merged: Vec<FermionicTerm> = Vec::new();
        for term in &self.terms {
            match index.get(term.ladders.as_slice()) {
                Some(&slot) => merged[slot].coeff += term.coeff,
                None => {
                    index.insert(term.ladders.as_slice(), merged.len());
                    merged.push(term.clone());
                }
            }
        }
        merged.retain(|t| t.coeff.abs() >= atol);
        Self {
            register_length: self.register_length,
            terms: merged,
        }
    }

    fn check_register(&self, other: &FermionicOp) -> OpResult<()> {
        if self.register_length != other.register_length {
            return Err(OpError::EncodingMismatch {
                expected: self.register_length,
                found: other.register_length,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for FermionicOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "FermionicOp ({} terms, {} modes):",
            self.num_terms(),
            self.register_length
        )?;
        for term in &self.terms {
            writeln!(f, "  {:+.8} {}", term.coeff, term.label())?;
        }
        Ok(())
    }
}
