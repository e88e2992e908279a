//! The electronic-structure problem handed to a ground-state solver.

use groundstate_ops::{FermionicOp, OpError};

use crate::error::{ChemError, ChemResult};
use crate::integrals::ElectronicIntegrals;
use crate::observables::{default_observables, dipole_operators};

/// A second-quantized Hamiltonian plus everything needed to interpret its
/// ground state.
///
/// Values are immutable once built; the `with_*` methods return a new problem.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectronicStructureProblem {
    name: String,
    hamiltonian: FermionicOp,
    aux_operators: Vec<(String, FermionicOp)>,
    num_particles: (usize, usize),
    num_spatial_orbitals: usize,
    nuclear_repulsion_energy: f64,
    nuclear_dipole: Option<[f64; 3]>,
    reference_energy: Option<f64>,
}

impl ElectronicStructureProblem {
    /// Build a problem from integrals.
    ///
    /// Carries the default observables (particle number, `S²`, `S_z`) and the
    /// Hartree-Fock total energy as reference.
    pub fn from_integrals(
        name: impl Into<String>,
        integrals: &ElectronicIntegrals,
        num_particles: (usize, usize),
        nuclear_repulsion_energy: f64,
    ) -> ChemResult<Self> {
        let n = integrals.num_orbitals();
        check_particles(num_particles, n)?;
        let hf = integrals.hartree_fock_energy(num_particles.0, num_particles.1);

        Ok(Self {
            name: name.into(),
            hamiltonian: integrals.second_q_op()?,
            aux_operators: default_observables(n)?,
            num_particles,
            num_spatial_orbitals: n,
            nuclear_repulsion_energy,
            nuclear_dipole: None,
            reference_energy: Some(hf + nuclear_repulsion_energy),
        })
    }

    /// Build a problem directly from a Hamiltonian, with no auxiliary observables.
    ///
    /// The register is interpreted as `register_length / 2` spatial orbitals.
    pub fn from_hamiltonian(
        name: impl Into<String>,
        hamiltonian: FermionicOp,
        num_particles: (usize, usize),
        nuclear_repulsion_energy: f64,
    ) -> ChemResult<Self> {
        let n = hamiltonian.register_length().div_ceil(2);
        check_particles(num_particles, n)?;
        Ok(Self {
            name: name.into(),
            hamiltonian,
            aux_operators: Vec::new(),
            num_particles,
            num_spatial_orbitals: n,
            nuclear_repulsion_energy,
            nuclear_dipole: None,
            reference_energy: None,
        })
    }

    /// Attach the electronic dipole operators and the nuclear dipole moment.
    pub fn with_dipole(self, integrals: &[Vec<Vec<f64>>; 3], nuclear_dipole: [f64; 3]) -> ChemResult<Self> {
        let mut problem = self;
        for (name, op) in dipole_operators(integrals)? {
            problem = problem.with_aux_operator(name, op)?;
        }
        problem.nuclear_dipole = Some(nuclear_dipole);
        Ok(problem)
    }

    /// Add or replace a named auxiliary operator.
    pub fn with_aux_operator(self, name: impl Into<String>, op: FermionicOp) -> ChemResult<Self> {
        if op.register_length() != self.hamiltonian.register_length() {
            return Err(OpError::EncodingMismatch {
                expected: self.hamiltonian.register_length(),
                found: op.register_length(),
            }
            .into());
        }
        let name = name.into();
        let mut problem = self;
        match problem.aux_operators.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = op,
            None => problem.aux_operators.push((name, op)),
        }
        Ok(problem)
    }

    /// Set the reference energy reported alongside results.
    pub fn with_reference_energy(self, energy: f64) -> Self {
        Self {
            reference_energy: Some(energy),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The electronic Hamiltonian.
    pub fn hamiltonian(&self) -> &FermionicOp {
        &self.hamiltonian
    }

    /// Named auxiliary operators, in insertion order.
    pub fn aux_operators(&self) -> &[(String, FermionicOp)] {
        &self.aux_operators
    }

    /// `(alpha, beta)` electron counts.
    pub fn num_particles(&self) -> (usize, usize) {
        self.num_particles
    }

    pub fn num_spatial_orbitals(&self) -> usize {
        self.num_spatial_orbitals
    }

    /// Number of fermionic modes in the Hamiltonian's register.
    pub fn num_spin_orbitals(&self) -> usize {
        self.hamiltonian.register_length()
    }

    /// Classical energy added to the computed electronic energy.
    pub fn nuclear_repulsion_energy(&self) -> f64 {
        self.nuclear_repulsion_energy
    }

    /// Nuclear dipole moment in atomic units, if known.
    pub fn nuclear_dipole(&self) -> Option<[f64; 3]> {
        self.nuclear_dipole
    }

    /// Reference (usually Hartree-Fock) total energy, if known.
    pub fn reference_energy(&self) -> Option<f64> {
        self.reference_energy
    }

    /// Occupation bitstring of the Hartree-Fock determinant in the blocked
    /// spin-orbital layout.
    pub fn hartree_fock_occupation(&self) -> Vec<bool> {
        let n = self.num_spatial_orbitals;
        let (alpha, beta) = self.num_particles;
        let mut occupation = vec![false; self.num_spin_orbitals()];
        occupation.iter_mut().take(alpha).for_each(|o| *o = true);
        occupation.iter_mut().skip(n).take(beta).for_each(|o| *o = true);
        occupation
    }
}

fn check_particles(num_particles: (usize, usize), num_orbitals: usize) -> ChemResult<()> {
    let (num_alpha, num_beta) = num_particles;
    if num_alpha > num_orbitals || num_beta > num_orbitals {
        return Err(ChemError::InvalidParticleNumber {
            num_alpha,
            num_beta,
            num_orbitals,
        });
    }
    Ok(())
}
