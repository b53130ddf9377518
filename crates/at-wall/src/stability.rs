//! Explicit-step stability check on the exposed element.

use crate::element::WallElement;

/// Fourier and Biot numbers of one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StabilityCheck {
    pub fourier: f64,
    pub biot: f64,
    /// F0·(1 + Bi)
    pub criterion: f64,
    pub stable: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StabilityMonitor {
    pub limit: f64,
}

impl Default for StabilityMonitor {
    fn default() -> Self {
        Self { limit: 0.5 }
    }
}

impl StabilityMonitor {
    /// F0 = k·dt/(ρ·cp·dy²), Bi = h·dy/k; stable while F0·(1 + Bi) <= limit.
    pub fn check(&self, element: &WallElement, h: f64, dt: f64) -> StabilityCheck {
        let k = element.conductivity();
        let dy = element.thickness();
        let fourier = k * dt / (element.density() * element.specific_heat() * dy * dy);
        let biot = h.abs() * dy / k;
        let criterion = fourier * (1.0 + biot);
        StabilityCheck {
            fourier,
            biot,
            criterion,
            stable: criterion.is_finite() && criterion <= self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use at_materials::SolidMaterial;

    fn aluminium(dy: f64) -> WallElement {
        WallElement::solid(SolidMaterial::new("ALU6061", 2700.0, 896.0, 167.0, 0.8), dy).unwrap()
    }

    #[test]
    fn coarse_step_on_thin_element_is_flagged() {
        let check = StabilityMonitor::default().check(&aluminium(1e-4), 500.0, 1.0);
        assert!(check.fourier > 1000.0);
        assert!(!check.stable);
    }

    #[test]
    fn fine_step_on_thick_element_passes() {
        let check = StabilityMonitor::default().check(&aluminium(1e-2), 500.0, 1e-4);
        assert!(check.criterion < 1e-3);
        assert!(check.stable);
    }

    #[test]
    fn biot_number_tightens_the_limit() {
        let el = aluminium(1e-3);
        // F0 = 0.4 without convection
        let dt = 0.4 * 2700.0 * 896.0 * 1e-6 / 167.0;
        let monitor = StabilityMonitor::default();
        assert!(monitor.check(&el, 0.0, dt).stable);
        assert!(!monitor.check(&el, 5e4, dt).stable);
    }
}
