//! Ansatz circuit builders.
//!
//! Hardware-efficient ansatzes (`two_local`, `efficient_su2`) alternate
//! rotation layers with a linear entangling layer. The chemistry ansatzes
//! (`hartree_fock`, `uccsd`) are built through a [`QubitMapper`] so the
//! prepared state lives in the same encoding as the Hamiltonian.

use groundstate_ops::{FermionicOp, FermionicTerm, LadderOp, QubitMapper};
use tracing::debug;

use crate::circuit::{Angle, ParameterizedCircuit};
use crate::error::{SimError, SimResult};

/// Mapped generator terms with a larger real part are rejected.
const GENERATOR_TOL: f64 = 1e-10;

/// RY rotation layers with CZ entanglers between neighbours.
///
/// ```text
/// |0⟩ ─[Ry(θ₀)]─●─[Ry(θ₂)]─
///               │
/// |0⟩ ─[Ry(θ₁)]─●─[Ry(θ₃)]─
/// ```
///
/// Uses `num_qubits · (reps + 1)` parameters.
pub fn two_local(num_qubits: usize, reps: usize) -> SimResult<ParameterizedCircuit> {
    check_width(num_qubits)?;
    let mut circuit = ParameterizedCircuit::new("two_local", num_qubits);
    for layer in 0..=reps {
        for q in 0..num_qubits {
            let theta = circuit.new_parameter();
            circuit.ry(theta, q)?;
        }
        if layer < reps {
            for q in 0..num_qubits.saturating_sub(1) {
                circuit.cz(q, q + 1)?;
            }
        }
    }
    Ok(circuit)
}

/// RY and RZ rotation layers with CX entanglers between neighbours.
///
/// Uses `2 · num_qubits · (reps + 1)` parameters.
pub fn efficient_su2(num_qubits: usize, reps: usize) -> SimResult<ParameterizedCircuit> {
    check_width(num_qubits)?;
    let mut circuit = ParameterizedCircuit::new("efficient_su2", num_qubits);
    for layer in 0..=reps {
        for q in 0..num_qubits {
            let theta = circuit.new_parameter();
            circuit.ry(theta, q)?;
        }
        for q in 0..num_qubits {
            let phi = circuit.new_parameter();
            circuit.rz(phi, q)?;
        }
        if layer < reps {
            for q in 0..num_qubits.saturating_sub(1) {
                circuit.cx(q, q + 1)?;
            }
        }
    }
    Ok(circuit)
}

/// Parameter-free circuit preparing a fermionic occupation in the mapper's encoding.
pub fn hartree_fock(mapper: &dyn QubitMapper, occupation: &[bool]) -> SimResult<ParameterizedCircuit> {
    let bits = mapper.encode_occupation(occupation)?;
    let mut circuit = ParameterizedCircuit::new("hartree_fock", bits.len());
    for (q, _) in bits.iter().enumerate().filter(|(_, b)| **b) {
        circuit.x(q)?;
    }
    Ok(circuit)
}

/// An excitation from occupied to virtual spin orbitals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excitation {
    pub occupied: Vec<usize>,
    pub unoccupied: Vec<usize>,
}

/// Spin-conserving single and double excitations out of the Hartree-Fock
/// determinant, alpha block first.
pub fn excitations(num_spatial_orbitals: usize, num_particles: (usize, usize)) -> Vec<Excitation> {
    let n = num_spatial_orbitals;
    let (na, nb) = num_particles;
    let alpha_occ: Vec<usize> = (0..na).collect();
    let alpha_virt: Vec<usize> = (na..n).collect();
    let beta_occ: Vec<usize> = (n..n + nb).collect();
    let beta_virt: Vec<usize> = (n + nb..2 * n).collect();

    let mut out = Vec::new();
    for (occ, virt) in [(&alpha_occ, &alpha_virt), (&beta_occ, &beta_virt)] {
        for &i in occ {
            for &a in virt {
                out.push(Excitation {
                    occupied: vec![i],
                    unoccupied: vec![a],
                });
            }
        }
    }

    let same_spin = |occ: &[usize], virt: &[usize], out: &mut Vec<Excitation>| {
        for (k, &i) in occ.iter().enumerate() {
            for &j in &occ[k + 1..] {
                for (l, &a) in virt.iter().enumerate() {
                    for &b in &virt[l + 1..] {
                        out.push(Excitation {
                            occupied: vec![i, j],
                            unoccupied: vec![a, b],
                        });
                    }
                }
            }
        }
    };
    same_spin(&alpha_occ, &alpha_virt, &mut out);
    for &i in &alpha_occ {
        for &j in &beta_occ {
            for &a in &alpha_virt {
                for &b in &beta_virt {
                    out.push(Excitation {
                        occupied: vec![i, j],
                        unoccupied: vec![a, b],
                    });
                }
            }
        }
    }
    same_spin(&beta_occ, &beta_virt, &mut out);
    out
}

/// Unitary coupled-cluster singles and doubles.
///
/// Each excitation `T` contributes `exp(θ (T − T†))`, with one parameter per
/// excitation per repetition. The mapped generator is a sum of mutually
/// commuting Pauli strings, so it is applied exactly as a product of Pauli
/// rotations. The circuit starts from `|0…0⟩`; compose it after
/// [`hartree_fock`] for the usual reference state.
pub fn uccsd(
    mapper: &dyn QubitMapper,
    num_spatial_orbitals: usize,
    num_particles: (usize, usize),
    reps: usize,
) -> SimResult<ParameterizedCircuit> {
    let (na, nb) = num_particles;
    if na > num_spatial_orbitals || nb > num_spatial_orbitals {
        return Err(SimError::InvalidAnsatz(format!(
            "{na} alpha and {nb} beta electrons do not fit in {num_spatial_orbitals} orbitals"
        )));
    }
    if reps == 0 {
        return Err(SimError::InvalidAnsatz("uccsd needs at least one repetition".to_string()));
    }
    let excitations = excitations(num_spatial_orbitals, num_particles);
    if excitations.is_empty() {
        return Err(SimError::InvalidAnsatz("no excitations available".to_string()));
    }

    let register = 2 * num_spatial_orbitals;
    let mut generators = Vec::with_capacity(excitations.len());
    for excitation in &excitations {
        let ladders: Vec<LadderOp> = excitation
            .unoccupied
            .iter()
            .map(|&a| LadderOp::create(a))
            .chain(excitation.occupied.iter().rev().map(|&i| LadderOp::annihilate(i)))
            .collect();
        let term = FermionicTerm::new(ladders, 1.0);
        let mut adjoint = term.adjoint();
        adjoint.coeff = -1.0;
        let generator = FermionicOp::new(register, vec![term, adjoint])?;
        let mapped = mapper.map(&generator)?;

        let mut rotations = Vec::with_capacity(mapped.num_terms());
        for (pauli, coeff) in mapped.iter() {
            if coeff.re.abs() > GENERATOR_TOL {
                return Err(SimError::InvalidAnsatz(format!(
                    "generator term {pauli} is not anti-Hermitian"
                )));
            }
            rotations.push((pauli.clone(), coeff.im));
        }
        generators.push(rotations);
    }

    let mut circuit = ParameterizedCircuit::new("uccsd", register);
    for _ in 0..reps {
        for rotations in &generators {
            let index = circuit.num_parameters();
            // exp(θ·i·b·P) = exp(-i·(-2bθ)/2·P)
            for (pauli, b) in rotations {
                circuit.pauli_evolution(pauli.clone(), Angle::Param { index, scale: -2.0 * b })?;
            }
        }
    }

    debug!(
        mapper = mapper.name(),
        excitations = excitations.len(),
        parameters = circuit.num_parameters(),
        gates = circuit.gates().len(),
        "built uccsd ansatz"
    );
    Ok(circuit)
}

fn check_width(num_qubits: usize) -> SimResult<()> {
    if num_qubits == 0 {
        return Err(SimError::InvalidAnsatz("ansatz needs at least one qubit".to_string()));
    }
    Ok(())
}
