//! Drivers that turn molecular input data into an [`ElectronicStructureProblem`].
//!
//! Molecule files are YAML or JSON, selected by extension:
//!
//! ```yaml
//! name: H2
//! basis: sto-3g
//! num_alpha: 1
//! num_beta: 1
//! nuclear_repulsion_energy: 0.7199689944489797
//! one_body:
//!   - [-1.2563390730032498, 0.0]
//!   - [0.0, -0.4718960072811421]
//! two_body:
//!   - { indices: [0, 0, 0, 0], value: 0.6757101548035165 }
//! ```
//!
//! Only symmetry-unique two-electron integrals need to be listed.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ChemError, ChemResult};
use crate::integrals::{ElectronicIntegrals, TwoBodyEntry};
use crate::molecules;
use crate::problem::ElectronicStructureProblem;

/// Something that can produce an electronic-structure problem.
pub trait ElectronicStructureDriver {
    /// Build the problem.
    fn run(&self) -> ChemResult<ElectronicStructureProblem>;
}

/// A nucleus, position in bohr.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub symbol: String,
    pub charge: f64,
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(symbol: impl Into<String>, charge: f64, position: [f64; 3]) -> Self {
        Self {
            symbol: symbol.into(),
            charge,
            position,
        }
    }
}

/// Dipole integrals per Cartesian axis in the molecular-orbital basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DipoleData {
    pub x: Vec<Vec<f64>>,
    pub y: Vec<Vec<f64>>,
    pub z: Vec<Vec<f64>>,
    /// Nuclear dipole moment; derived from the atoms when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nuclear: Option<[f64; 3]>,
}

/// Serialized molecular input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis: Option<String>,
    pub num_alpha: usize,
    pub num_beta: usize,
    #[serde(default)]
    pub nuclear_repulsion_energy: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_energy: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub atoms: Vec<Atom>,
    pub one_body: Vec<Vec<f64>>,
    #[serde(default)]
    pub two_body: Vec<TwoBodyEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dipole: Option<DipoleData>,
}

impl MoleculeData {
    /// Nuclear dipole moment `Σ_A Z_A R_A`, if dipole data is present.
    pub fn nuclear_dipole(&self) -> Option<[f64; 3]> {
        let dipole = self.dipole.as_ref()?;
        if let Some(nuclear) = dipole.nuclear {
            return Some(nuclear);
        }
        let mut total = [0.0; 3];
        for atom in &self.atoms {
            for (t, x) in total.iter_mut().zip(atom.position) {
                *t += atom.charge * x;
            }
        }
        Some(total)
    }
}

/// Driver backed by precomputed integrals.
#[derive(Debug, Clone)]
pub struct IntegralDriver {
    data: MoleculeData,
}

impl IntegralDriver {
    /// Create a driver from already-loaded data.
    pub fn new(data: MoleculeData) -> Self {
        Self { data }
    }

    /// Built-in H2 in STO-3G at 0.735 Å.
    pub fn h2_sto3g() -> Self {
        Self::new(molecules::h2_sto3g())
    }

    /// Load a `.yaml`, `.yml` or `.json` molecule file.
    pub fn from_path(path: impl AsRef<Path>) -> ChemResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        let driver = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&std::fs::read_to_string(path)?)?,
            "json" => Self::from_json_str(&std::fs::read_to_string(path)?)?,
            _ => return Err(ChemError::UnsupportedFormat(path.display().to_string())),
        };
        info!(path = %path.display(), molecule = %driver.data.name, "loaded molecule file");
        Ok(driver)
    }

    /// Parse YAML molecule data.
    pub fn from_yaml_str(content: &str) -> ChemResult<Self> {
        Ok(Self::new(serde_yaml::from_str(content)?))
    }

    /// Parse JSON molecule data.
    pub fn from_json_str(content: &str) -> ChemResult<Self> {
        Ok(Self::new(serde_json::from_str(content)?))
    }

    /// The underlying data.
    pub fn molecule(&self) -> &MoleculeData {
        &self.data
    }
}

impl ElectronicStructureDriver for IntegralDriver {
    fn run(&self) -> ChemResult<ElectronicStructureProblem> {
        let data = &self.data;
        let integrals = ElectronicIntegrals::new(&data.one_body, &data.two_body)?;
        let mut problem = ElectronicStructureProblem::from_integrals(
            data.name.clone(),
            &integrals,
            (data.num_alpha, data.num_beta),
            data.nuclear_repulsion_energy,
        )?;

        if let (Some(dipole), Some(nuclear)) = (&data.dipole, data.nuclear_dipole()) {
            problem = problem.with_dipole(
                &[dipole.x.clone(), dipole.y.clone(), dipole.z.clone()],
                nuclear,
            )?;
        }
        if let Some(energy) = data.reference_energy {
            problem = problem.with_reference_energy(energy);
        }

        info!(
            molecule = %problem.name(),
            spin_orbitals = problem.num_spin_orbitals(),
            fermionic_terms = problem.hamiltonian().num_terms(),
            aux_operators = problem.aux_operators().len(),
            "built electronic structure problem"
        );
        Ok(problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOY_YAML: &str = r#"
name: toy
num_alpha: 1
num_beta: 0
one_body:
  - [-1.0, 0.1]
  - [0.1, -0.5]
two_body:
  - { indices: [0, 0, 1, 1], value: 0.3 }
"#;

    #[test]
    fn test_from_yaml() {
        let driver = IntegralDriver::from_yaml_str(TOY_YAML).unwrap();
        assert_eq!(driver.molecule().name, "toy");
        assert_eq!(driver.molecule().nuclear_repulsion_energy, 0.0);
        let problem = driver.run().unwrap();
        assert_eq!(problem.num_particles(), (1, 0));
        assert_eq!(problem.nuclear_dipole(), None);
    }

    #[test]
    fn test_json_roundtrip_of_builtin() {
        let json = serde_json::to_string(&molecules::h2_sto3g()).unwrap();
        let driver = IntegralDriver::from_json_str(&json).unwrap();
        assert_eq!(driver.molecule().name, "H2");
        assert_eq!(driver.molecule().two_body.len(), 4);
        assert_eq!(driver.molecule().atoms.len(), 2);
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            IntegralDriver::from_yaml_str("name: [unclosed"),
            Err(ChemError::Yaml(_))
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = IntegralDriver::from_path("h2.xyz").unwrap_err();
        assert!(matches!(err, ChemError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = IntegralDriver::from_path("/nonexistent/h2.yaml").unwrap_err();
        assert!(matches!(err, ChemError::Io(_)));
    }

    #[test]
    fn test_explicit_nuclear_dipole_wins() {
        let mut data = molecules::h2_sto3g();
        if let Some(d) = data.dipole.as_mut() {
            d.nuclear = Some([0.0, 0.0, 0.0]);
        }
        assert_eq!(data.nuclear_dipole(), Some([0.0; 3]));
    }
}
