//! One- and two-electron integrals in a spatial-orbital basis.
//!
//! Two-electron integrals use chemists' notation, `(pq|rs)`, and are stored
//! densely. Spin orbitals are laid out in two blocks: alpha orbitals occupy
//! modes `0..n`, beta orbitals modes `n..2n`.
//!
//! The electronic Hamiltonian built from them is
//!
//! ```text
//! H = Σ_{pq,σ} h_pq a†_{pσ} a_{qσ}
//!   + ½ Σ_{pqrs,στ} (pq|rs) a†_{pσ} a†_{rτ} a_{sτ} a_{qσ}
//! ```

use groundstate_ops::{FermionicOp, FermionicTerm, LadderOp};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChemError, ChemResult};

/// Integrals with a magnitude below this are not turned into operator terms.
pub const INTEGRAL_CUTOFF: f64 = 1e-12;

const SYMMETRY_TOL: f64 = 1e-10;

/// One unique two-electron integral `(pq|rs)`.
///
/// On load, the value is expanded over the 8-fold permutational symmetry of
/// real orbitals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwoBodyEntry {
    pub indices: [usize; 4],
    pub value: f64,
}

impl TwoBodyEntry {
    /// Create an entry for `(pq|rs)`.
    pub fn new(p: usize, q: usize, r: usize, s: usize, value: f64) -> Self {
        Self {
            indices: [p, q, r, s],
            value,
        }
    }
}

/// Dense electronic integrals over `num_orbitals` spatial orbitals.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectronicIntegrals {
    num_orbitals: usize,
    one_body: Vec<f64>,
    two_body: Vec<f64>,
}

impl ElectronicIntegrals {
    /// Build integrals from a square one-body matrix and unique two-body entries.
    pub fn new(one_body: &[Vec<f64>], two_body: &[TwoBodyEntry]) -> ChemResult<Self> {
        let n = one_body.len();
        if n == 0 {
            return Err(ChemError::InvalidIntegrals(
                "one-body matrix is empty".to_string(),
            ));
        }
        let flat = flatten_square(one_body, "one-body")?;

        let mut dense = vec![0.0; n.pow(4)];
        for entry in two_body {
            let [p, q, r, s] = entry.indices;
            if let Some(&bad) = entry.indices.iter().find(|&&i| i >= n) {
                return Err(ChemError::InvalidIntegrals(format!(
                    "two-body index {bad} out of range for {n} orbitals"
                )));
            }
            for (a, b, c, d) in [
                (p, q, r, s),
                (q, p, r, s),
                (p, q, s, r),
                (q, p, s, r),
                (r, s, p, q),
                (s, r, p, q),
                (r, s, q, p),
                (s, r, q, p),
            ] {
                dense[index4(n, a, b, c, d)] = entry.value;
            }
        }

        Self::from_dense(n, flat, dense)
    }

    /// Build integrals from row-major dense tensors of shape `n×n` and `n×n×n×n`.
    pub fn from_dense(num_orbitals: usize, one_body: Vec<f64>, two_body: Vec<f64>) -> ChemResult<Self> {
        let n = num_orbitals;
        if one_body.len() != n * n {
            return Err(ChemError::InvalidIntegrals(format!(
                "one-body tensor has {} entries, expected {}",
                one_body.len(),
                n * n
            )));
        }
        if two_body.len() != n.pow(4) {
            return Err(ChemError::InvalidIntegrals(format!(
                "two-body tensor has {} entries, expected {}",
                two_body.len(),
                n.pow(4)
            )));
        }
        for p in 0..n {
            for q in 0..p {
                if (one_body[p * n + q] - one_body[q * n + p]).abs() > SYMMETRY_TOL {
                    return Err(ChemError::InvalidIntegrals(format!(
                        "one-body matrix is not symmetric at ({p}, {q})"
                    )));
                }
            }
        }
        Ok(Self {
            num_orbitals,
            one_body,
            two_body,
        })
    }

    /// Number of spatial orbitals.
    pub fn num_orbitals(&self) -> usize {
        self.num_orbitals
    }

    /// Number of spin orbitals (fermionic modes).
    pub fn num_spin_orbitals(&self) -> usize {
        2 * self.num_orbitals
    }

    /// `h_pq`.
    pub fn one_body(&self, p: usize, q: usize) -> f64 {
        self.one_body[p * self.num_orbitals + q]
    }

    /// `(pq|rs)`.
    pub fn two_body(&self, p: usize, q: usize, r: usize, s: usize) -> f64 {
        self.two_body[index4(self.num_orbitals, p, q, r, s)]
    }

    /// The electronic Hamiltonian as a fermionic operator on `2n` modes.
    pub fn second_q_op(&self) -> ChemResult<FermionicOp> {
        let n = self.num_orbitals;
        let modes = 2 * n;
        let mut terms = spin_summed_terms(n, &self.one_body);

        for sigma in 0..2 {
            for tau in 0..2 {
                for p in 0..n {
                    for q in 0..n {
                        for r in 0..n {
                            for s in 0..n {
                                let value = self.two_body(p, q, r, s);
                                if value.abs() < INTEGRAL_CUTOFF {
                                    continue;
                                }
                                let (pp, qq) = (p + sigma * n, q + sigma * n);
                                let (rr, ss) = (r + tau * n, s + tau * n);
                                if pp == rr || qq == ss {
                                    continue;
                                }
                                terms.push(FermionicTerm::new(
                                    vec![
                                        LadderOp::create(pp),
                                        LadderOp::create(rr),
                                        LadderOp::annihilate(ss),
                                        LadderOp::annihilate(qq),
                                    ],
                                    0.5 * value,
                                ));
                            }
                        }
                    }
                }
            }
        }

        let op = FermionicOp::new(modes, terms)?;
        debug!(
            orbitals = n,
            terms = op.num_terms(),
            "built electronic hamiltonian"
        );
        Ok(op)
    }

    /// Energy of the determinant filling the lowest `num_alpha` alpha and
    /// `num_beta` beta orbitals, without the nuclear repulsion.
    pub fn hartree_fock_energy(&self, num_alpha: usize, num_beta: usize) -> f64 {
        let occupied: Vec<(usize, usize)> = (0..num_alpha)
            .map(|p| (p, 0))
            .chain((0..num_beta).map(|p| (p, 1)))
            .collect();

        let mut energy = 0.0;
        for &(i, _) in &occupied {
            energy += self.one_body(i, i);
        }
        for &(i, si) in &occupied {
            for &(j, sj) in &occupied {
                energy += 0.5 * self.two_body(i, i, j, j);
                if si == sj {
                    energy -= 0.5 * self.two_body(i, j, j, i);
                }
            }
        }
        energy
    }
}

/// Spin-summed one-body operator `Σ_{pq,σ} m_pq a†_{pσ} a_{qσ}` for a square matrix.
pub fn one_body_operator(matrix: &[Vec<f64>]) -> ChemResult<FermionicOp> {
    let n = matrix.len();
    let flat = flatten_square(matrix, "one-body")?;
    Ok(FermionicOp::new(2 * n, spin_summed_terms(n, &flat))?)
}

fn spin_summed_terms(n: usize, matrix: &[f64]) -> Vec<FermionicTerm> {
    let mut terms = Vec::new();
    for sigma in 0..2 {
        for p in 0..n {
            for q in 0..n {
                let value = matrix[p * n + q];
                if value.abs() < INTEGRAL_CUTOFF {
                    continue;
                }
                terms.push(FermionicTerm::new(
                    vec![
                        LadderOp::create(p + sigma * n),
                        LadderOp::annihilate(q + sigma * n),
                    ],
                    value,
                ));
            }
        }
    }
    terms
}

fn flatten_square(matrix: &[Vec<f64>], what: &str) -> ChemResult<Vec<f64>> {
    let n = matrix.len();
    if let Some((row, r)) = matrix.iter().enumerate().find(|(_, r)| r.len() != n) {
        return Err(ChemError::InvalidIntegrals(format!(
            "{what} matrix row {row} has {} entries, expected {n}",
            r.len()
        )));
    }
    Ok(matrix.iter().flatten().copied().collect())
}

fn index4(n: usize, p: usize, q: usize, r: usize, s: usize) -> usize {
    ((p * n + q) * n + r) * n + s
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn h2() -> ElectronicIntegrals {
        let one_body = vec![
            vec![-1.2563390730032498, 0.0],
            vec![0.0, -0.4718960072811421],
        ];
        let two_body = [
            TwoBodyEntry::new(0, 0, 0, 0, 0.6757101548035165),
            TwoBodyEntry::new(0, 0, 1, 1, 0.6645817302552968),
            TwoBodyEntry::new(0, 1, 0, 1, 0.18093119978423136),
            TwoBodyEntry::new(1, 1, 1, 1, 0.6985737227320185),
        ];
        ElectronicIntegrals::new(&one_body, &two_body).unwrap()
    }

    #[test]
    fn test_eightfold_symmetry() {
        let ints = h2();
        assert_eq!(ints.two_body(1, 0, 1, 0), ints.two_body(0, 1, 0, 1));
        assert_eq!(ints.two_body(1, 0, 0, 1), ints.two_body(0, 1, 0, 1));
        assert_eq!(ints.two_body(1, 1, 0, 0), ints.two_body(0, 0, 1, 1));
        assert_eq!(ints.two_body(0, 0, 0, 1), 0.0);
    }

    #[test]
    fn test_hartree_fock_energy() {
        let ints = h2();
        assert_abs_diff_eq!(ints.hartree_fock_energy(1, 1), -1.836967991202983, epsilon = 1e-10);
        // a single electron only sees the core term
        assert_abs_diff_eq!(ints.hartree_fock_energy(1, 0), -1.2563390730032498, epsilon = 1e-12);
    }

    #[test]
    fn test_second_q_op_register() {
        let op = h2().second_q_op().unwrap();
        assert_eq!(op.register_length(), 4);
        // 4 one-body terms (diagonal, both spins) plus two-body terms
        assert!(op.num_terms() > 4);
        assert!(op.terms().iter().all(|t| t.ladders.len() == 2 || t.ladders.len() == 4));
    }

    #[test]
    fn test_rejects_bad_shapes() {
        let ragged = vec![vec![1.0, 0.0], vec![0.0]];
        assert!(matches!(
            ElectronicIntegrals::new(&ragged, &[]),
            Err(ChemError::InvalidIntegrals(_))
        ));

        let one_body = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let bad = [TwoBodyEntry::new(0, 0, 0, 2, 1.0)];
        assert!(matches!(
            ElectronicIntegrals::new(&one_body, &bad),
            Err(ChemError::InvalidIntegrals(_))
        ));
    }

    #[test]
    fn test_rejects_asymmetric_one_body() {
        let one_body = vec![vec![1.0, 0.5], vec![0.4, 1.0]];
        assert!(ElectronicIntegrals::new(&one_body, &[]).is_err());
    }

    #[test]
    fn test_one_body_operator_spin_blocks() {
        let op = one_body_operator(&[vec![0.5, 0.0], vec![0.0, 0.0]]).unwrap();
        assert_eq!(op.register_length(), 4);
        let modes: Vec<usize> = op.terms().iter().map(|t| t.ladders[0].mode).collect();
        assert_eq!(modes, vec![0, 2]);
    }
}
