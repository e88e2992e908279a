//! Plain-text report rendering.

use std::fmt::{self, Write};

use crate::ground_state::{DipoleMoment, GroundStateResult};

/// Atomic units of dipole moment (e·a₀) per debye.
pub const AU_TO_DEBYE: f64 = 2.541746473;

/// Default number of decimals for energies.
pub const DEFAULT_PRECISION: usize = 12;

/// Renders a [`GroundStateResult`] as a report.
///
/// Sections appear in a fixed order: energy, measured observables, dipole
/// moments (only when derived) and warnings (only when present).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultFormatter {
    precision: usize,
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl ResultFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn format(&self, result: &GroundStateResult) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = self.write_report(&mut out, result);
        out
    }

    fn write_report(&self, out: &mut String, result: &GroundStateResult) -> fmt::Result {
        let p = self.precision;

        writeln!(out, "=== GROUND STATE ENERGY ===")?;
        writeln!(out)?;
        writeln!(out, "* Electronic ground state energy (Hartree): {:.p$}", result.computed_energy())?;
        writeln!(out, "  - computed part:      {:.p$}", result.computed_energy())?;
        writeln!(out, "~ Nuclear repulsion energy (Hartree): {:.p$}", result.correction())?;
        writeln!(out, "> Total ground state energy (Hartree): {:.p$}", result.total_energy())?;
        if let Some(reference) = result.reference_energy() {
            writeln!(out, "  (reference energy (Hartree): {reference:.p$})")?;
        }

        writeln!(out)?;
        writeln!(out, "=== MEASURED OBSERVABLES ===")?;
        writeln!(out)?;
        if result.observables().is_empty() {
            writeln!(out, "  (none)")?;
        }
        for (name, observable) in result.observables() {
            match observable.std_error {
                Some(err) => writeln!(out, "  {name}: {:.p$} ± {err:.p$}", observable.value)?,
                None => writeln!(out, "  {name}: {:.p$}", observable.value)?,
            }
        }

        if let Some(dipole) = result.dipole() {
            writeln!(out)?;
            writeln!(out, "=== DIPOLE MOMENTS ===")?;
            writeln!(out)?;
            self.write_dipole(out, dipole)?;
        }

        if !result.warnings().is_empty() {
            writeln!(out)?;
            writeln!(out, "=== WARNINGS ===")?;
            writeln!(out)?;
            for warning in result.warnings() {
                writeln!(out, "! {warning}")?;
            }
        }
        Ok(())
    }

    fn write_dipole(&self, out: &mut String, dipole: &DipoleMoment) -> fmt::Result {
        let vector = |v: &[f64; 3], scale: f64| -> String {
            format!(
                "[{:.p$}  {:.p$}  {:.p$}]",
                v[0] * scale,
                v[1] * scale,
                v[2] * scale,
                p = self.precision
            )
        };
        let p = self.precision;
        writeln!(out, "~ Nuclear dipole moment (a.u.): {}", vector(&dipole.nuclear, 1.0))?;
        writeln!(out, "* Electronic dipole moment (a.u.): {}", vector(&dipole.electronic, 1.0))?;
        writeln!(
            out,
            "> Dipole moment (a.u.): {}  Total: {:.p$}",
            vector(&dipole.total, 1.0),
            dipole.magnitude()
        )?;
        writeln!(
            out,
            "                 (debye): {}  Total: {:.p$}",
            vector(&dipole.total, AU_TO_DEBYE),
            dipole.magnitude() * AU_TO_DEBYE
        )
    }
}

impl fmt::Display for GroundStateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ResultFormatter::default().format(self))
    }
}
