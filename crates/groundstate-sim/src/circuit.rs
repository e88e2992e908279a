//! Parameterized circuits.
//!
//! A [`ParameterizedCircuit`] is a gate list whose rotation angles are either
//! fixed or `scale · θ[index]` for a parameter vector bound at simulation
//! time. The ansatz builders in [`crate::ansatz`] produce these circuits.

use groundstate_ops::PauliString;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// A rotation angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Angle {
    Fixed(f64),
    /// `scale · θ[index]`.
    Param { index: usize, scale: f64 },
}

impl Angle {
    /// The parameter `θ[index]` with unit scale.
    pub fn param(index: usize) -> Self {
        Angle::Param { index, scale: 1.0 }
    }

    /// Resolve against bound parameter values.
    pub fn resolve(&self, params: &[f64]) -> f64 {
        match *self {
            Angle::Fixed(value) => value,
            Angle::Param { index, scale } => scale * params[index],
        }
    }
}

impl From<f64> for Angle {
    fn from(value: f64) -> Self {
        Angle::Fixed(value)
    }
}

/// A gate in a parameterized circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    H(usize),
    X(usize),
    Y(usize),
    Z(usize),
    Rx(usize, Angle),
    Ry(usize, Angle),
    Rz(usize, Angle),
    Cx(usize, usize),
    Cz(usize, usize),
    /// `exp(-i θ/2 · P)`.
    PauliEvolution(PauliString, Angle),
}

impl Gate {
    /// Name used in gate counts.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H(_) => "h",
            Gate::X(_) => "x",
            Gate::Y(_) => "y",
            Gate::Z(_) => "z",
            Gate::Rx(..) => "rx",
            Gate::Ry(..) => "ry",
            Gate::Rz(..) => "rz",
            Gate::Cx(..) => "cx",
            Gate::Cz(..) => "cz",
            Gate::PauliEvolution(..) => "pauli_evolution",
        }
    }

    fn qubits(&self) -> Vec<usize> {
        match self {
            Gate::H(q) | Gate::X(q) | Gate::Y(q) | Gate::Z(q) => vec![*q],
            Gate::Rx(q, _) | Gate::Ry(q, _) | Gate::Rz(q, _) => vec![*q],
            Gate::Cx(a, b) | Gate::Cz(a, b) => vec![*a, *b],
            Gate::PauliEvolution(p, _) => p.ops().map(|(q, _)| q).collect(),
        }
    }

    fn max_param(&self) -> Option<usize> {
        match self {
            Gate::Rx(_, Angle::Param { index, .. })
            | Gate::Ry(_, Angle::Param { index, .. })
            | Gate::Rz(_, Angle::Param { index, .. })
            | Gate::PauliEvolution(_, Angle::Param { index, .. }) => Some(*index),
            _ => None,
        }
    }

    fn apply(&self, state: &mut Statevector, params: &[f64]) {
        match self {
            Gate::H(q) => state.h(*q),
            Gate::X(q) => state.x(*q),
            Gate::Y(q) => state.y(*q),
            Gate::Z(q) => state.z(*q),
            Gate::Rx(q, a) => state.rx(*q, a.resolve(params)),
            Gate::Ry(q, a) => state.ry(*q, a.resolve(params)),
            Gate::Rz(q, a) => state.rz(*q, a.resolve(params)),
            Gate::Cx(c, t) => state.cx(*c, *t),
            Gate::Cz(a, b) => state.cz(*a, *b),
            Gate::PauliEvolution(p, a) => state.pauli_rotation(p, a.resolve(params)),
        }
    }
}

/// A circuit over a fixed register with a fixed number of free parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterizedCircuit {
    name: String,
    num_qubits: usize,
    num_parameters: usize,
    gates: Vec<Gate>,
}

impl ParameterizedCircuit {
    /// Create an empty circuit.
    pub fn new(name: impl Into<String>, num_qubits: usize) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_parameters: 0,
            gates: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of free parameters.
    pub fn num_parameters(&self) -> usize {
        self.num_parameters
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Allocate a fresh parameter.
    pub fn new_parameter(&mut self) -> Angle {
        let angle = Angle::param(self.num_parameters);
        self.num_parameters += 1;
        angle
    }

    /// Append a gate, validating its qubits and parameter index.
    pub fn push(&mut self, gate: Gate) -> SimResult<&mut Self> {
        if let Gate::PauliEvolution(p, _) = &gate {
            if p.num_qubits() != self.num_qubits {
                return Err(SimError::QubitCountMismatch {
                    circuit: self.num_qubits,
                    observable: p.num_qubits(),
                });
            }
        }
        if let Some(&qubit) = gate.qubits().iter().find(|&&q| q >= self.num_qubits) {
            return Err(SimError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        if let Some(index) = gate.max_param() {
            self.num_parameters = self.num_parameters.max(index + 1);
        }
        self.gates.push(gate);
        Ok(self)
    }

    pub fn h(&mut self, q: usize) -> SimResult<&mut Self> {
        self.push(Gate::H(q))
    }

    pub fn x(&mut self, q: usize) -> SimResult<&mut Self> {
        self.push(Gate::X(q))
    }

    pub fn rx(&mut self, angle: impl Into<Angle>, q: usize) -> SimResult<&mut Self> {
        self.push(Gate::Rx(q, angle.into()))
    }

    pub fn ry(&mut self, angle: impl Into<Angle>, q: usize) -> SimResult<&mut Self> {
        self.push(Gate::Ry(q, angle.into()))
    }

    pub fn rz(&mut self, angle: impl Into<Angle>, q: usize) -> SimResult<&mut Self> {
        self.push(Gate::Rz(q, angle.into()))
    }

    pub fn cx(&mut self, control: usize, target: usize) -> SimResult<&mut Self> {
        self.push(Gate::Cx(control, target))
    }

    pub fn cz(&mut self, q0: usize, q1: usize) -> SimResult<&mut Self> {
        self.push(Gate::Cz(q0, q1))
    }

    /// `exp(-i θ/2 · P)`.
    pub fn pauli_evolution(&mut self, pauli: PauliString, angle: impl Into<Angle>) -> SimResult<&mut Self> {
        self.push(Gate::PauliEvolution(pauli, angle.into()))
    }

    /// Append `other`, shifting its parameter indices after this circuit's.
    pub fn compose(&self, other: &ParameterizedCircuit) -> SimResult<Self> {
        if other.num_qubits != self.num_qubits {
            return Err(SimError::QubitCountMismatch {
                circuit: self.num_qubits,
                observable: other.num_qubits,
            });
        }
        let offset = self.num_parameters;
        let shift = |a: &Angle| match *a {
            Angle::Param { index, scale } => Angle::Param {
                index: index + offset,
                scale,
            },
            fixed => fixed,
        };
        let mut out = self.clone();
        out.name = format!("{}+{}", self.name, other.name);
        for gate in &other.gates {
            let gate = match gate {
                Gate::Rx(q, a) => Gate::Rx(*q, shift(a)),
                Gate::Ry(q, a) => Gate::Ry(*q, shift(a)),
                Gate::Rz(q, a) => Gate::Rz(*q, shift(a)),
                Gate::PauliEvolution(p, a) => Gate::PauliEvolution(p.clone(), shift(a)),
                g => g.clone(),
            };
            out.gates.push(gate);
        }
        out.num_parameters = offset + other.num_parameters;
        Ok(out)
    }

    /// Simulate the circuit from `|0…0⟩` with bound parameters.
    pub fn simulate(&self, params: &[f64]) -> SimResult<Statevector> {
        if params.len() != self.num_parameters {
            return Err(SimError::ParameterCount {
                expected: self.num_parameters,
                got: params.len(),
            });
        }
        let mut state = Statevector::new(self.num_qubits);
        for gate in &self.gates {
            gate.apply(&mut state, params);
        }
        Ok(state)
    }

    /// Gate counts by name, in first-use order.
    pub fn count_ops(&self) -> Vec<(&'static str, usize)> {
        let mut counts: Vec<(&'static str, usize)> = Vec::new();
        for gate in &self.gates {
            match counts.iter_mut().find(|(name, _)| *name == gate.name()) {
                Some((_, n)) => *n += 1,
                None => counts.push((gate.name(), 1)),
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_builder_counts_parameters() {
        let mut circuit = ParameterizedCircuit::new("test", 2);
        let t0 = circuit.new_parameter();
        let t1 = circuit.new_parameter();
        circuit.ry(t0, 0).unwrap().ry(t1, 1).unwrap().cx(0, 1).unwrap();
        assert_eq!(circuit.num_parameters(), 2);
        assert_eq!(circuit.gates().len(), 3);
        assert_eq!(circuit.count_ops(), vec![("ry", 2), ("cx", 1)]);
    }

    #[test]
    fn test_qubit_out_of_range() {
        let mut circuit = ParameterizedCircuit::new("test", 2);
        let err = circuit.cx(0, 2).unwrap_err();
        assert_eq!(err, SimError::QubitOutOfRange { qubit: 2, num_qubits: 2 });
        assert!(circuit.gates().is_empty());
    }

    #[test]
    fn test_parameter_count_checked() {
        let mut circuit = ParameterizedCircuit::new("test", 1);
        circuit.ry(Angle::param(0), 0).unwrap();
        assert_eq!(
            circuit.simulate(&[]).unwrap_err(),
            SimError::ParameterCount { expected: 1, got: 0 }
        );
    }

    #[test]
    fn test_scaled_parameter() {
        let mut circuit = ParameterizedCircuit::new("test", 1);
        circuit
            .ry(Angle::Param { index: 0, scale: 2.0 }, 0)
            .unwrap();
        let state = circuit.simulate(&[std::f64::consts::FRAC_PI_4]).unwrap();
        // Ry(π/2)|0⟩ has ⟨Z⟩ = 0
        let z = PauliString::from_label("Z").unwrap();
        assert_abs_diff_eq!(state.expectation_pauli(&z), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_compose_shifts_parameters() {
        let mut a = ParameterizedCircuit::new("a", 1);
        let p = a.new_parameter();
        a.ry(p, 0).unwrap();
        let mut b = ParameterizedCircuit::new("b", 1);
        let p = b.new_parameter();
        b.ry(p, 0).unwrap();

        let ab = a.compose(&b).unwrap();
        assert_eq!(ab.num_parameters(), 2);
        assert_eq!(ab.gates()[1], Gate::Ry(0, Angle::param(1)));
        // Ry(θ0) then Ry(θ1) adds angles
        let state = ab.simulate(&[0.3, 0.4]).unwrap();
        let z = PauliString::from_label("Z").unwrap();
        assert_abs_diff_eq!(state.expectation_pauli(&z), 0.7_f64.cos(), epsilon = 1e-12);
    }

    #[test]
    fn test_pauli_evolution_size_checked() {
        let mut circuit = ParameterizedCircuit::new("test", 2);
        let p = PauliString::from_label("XXX").unwrap();
        assert!(matches!(
            circuit.pauli_evolution(p, 0.1),
            Err(SimError::QubitCountMismatch { .. })
        ));
    }
}
