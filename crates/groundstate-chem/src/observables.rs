//! Auxiliary observables evaluated alongside the ground-state energy.
//!
//! All operators assume the blocked spin-orbital layout of
//! [`crate::integrals`]: alpha modes `0..n`, beta modes `n..2n`.

use groundstate_ops::{FermionicOp, FermionicTerm, LadderOp, OpResult};

use crate::integrals::one_body_operator;
use crate::error::ChemResult;

/// Name of the total particle-number observable.
pub const PARTICLE_NUMBER: &str = "particle_number";
/// Name of the total spin `S²` observable.
pub const ANGULAR_MOMENTUM: &str = "angular_momentum";
/// Name of the `S_z` observable.
pub const MAGNETIZATION: &str = "magnetization";
/// Names of the three dipole components, in x, y, z order.
pub const DIPOLE_COMPONENTS: [&str; 3] = ["dipole_x", "dipole_y", "dipole_z"];

/// `N = Σ_p n_p` over all `2 · num_orbitals` modes.
pub fn particle_number(num_orbitals: usize) -> FermionicOp {
    FermionicOp::number(2 * num_orbitals)
}

/// `S_z = ½ Σ_p (n_{pα} − n_{pβ})`.
pub fn magnetization(num_orbitals: usize) -> OpResult<FermionicOp> {
    let n = num_orbitals;
    let terms = (0..n)
        .flat_map(|p| {
            [
                FermionicTerm::new(vec![LadderOp::create(p), LadderOp::annihilate(p)], 0.5),
                FermionicTerm::new(
                    vec![LadderOp::create(p + n), LadderOp::annihilate(p + n)],
                    -0.5,
                ),
            ]
        })
        .collect();
    FermionicOp::new(2 * n, terms)
}

/// `S² = S₋S₊ + S_z² + S_z`.
pub fn angular_momentum(num_orbitals: usize) -> OpResult<FermionicOp> {
    let n = num_orbitals;
    let raise: Vec<FermionicTerm> = (0..n)
        .map(|p| FermionicTerm::new(vec![LadderOp::create(p), LadderOp::annihilate(p + n)], 1.0))
        .collect();
    let s_plus = FermionicOp::new(2 * n, raise)?;
    let s_minus = s_plus.adjoint();
    let s_z = magnetization(n)?;

    Ok(s_minus
        .compose(&s_plus)?
        .add(&s_z.compose(&s_z)?)?
        .add(&s_z)?
        .simplify(1e-12))
}

/// Electronic dipole operators from per-axis dipole integral matrices.
pub fn dipole_operators(integrals: &[Vec<Vec<f64>>; 3]) -> ChemResult<Vec<(String, FermionicOp)>> {
    DIPOLE_COMPONENTS
        .iter()
        .zip(integrals)
        .map(|(name, matrix)| -> ChemResult<(String, FermionicOp)> {
            Ok((name.to_string(), one_body_operator(matrix)?))
        })
        .collect()
}

/// The observables every electronic-structure problem carries by default.
pub fn default_observables(num_orbitals: usize) -> OpResult<Vec<(String, FermionicOp)>> {
    Ok(vec![
        (PARTICLE_NUMBER.to_string(), particle_number(num_orbitals)),
        (ANGULAR_MOMENTUM.to_string(), angular_momentum(num_orbitals)?),
        (MAGNETIZATION.to_string(), magnetization(num_orbitals)?),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_observable_names() {
        let names: Vec<String> = default_observables(2)
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec![PARTICLE_NUMBER, ANGULAR_MOMENTUM, MAGNETIZATION]);
    }

    #[test]
    fn test_registers() {
        assert_eq!(particle_number(3).register_length(), 6);
        assert_eq!(magnetization(3).unwrap().register_length(), 6);
        assert_eq!(angular_momentum(3).unwrap().register_length(), 6);
    }

    #[test]
    fn test_magnetization_signs() {
        let sz = magnetization(1).unwrap();
        assert_eq!(sz.terms()[0].coeff, 0.5);
        assert_eq!(sz.terms()[1].coeff, -0.5);
        assert_eq!(sz.terms()[1].ladders[0].mode, 1);
    }

    #[test]
    fn test_dipole_operator_names() {
        let zero = vec![vec![0.0; 2]; 2];
        let diag = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let ops = dipole_operators(&[zero.clone(), zero, diag]).unwrap();
        assert_eq!(ops[0].0, "dipole_x");
        assert!(ops[0].1.is_zero());
        assert_eq!(ops[2].1.num_terms(), 4);
    }
}
