//! Laminar/turbulent boundary-layer classification.

use crate::error::{GasError, GasResult};

/// How the boundary-layer state is decided.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryLayerModel {
    Laminar,
    Turbulent,
    /// Turbulent iff log10(Re) > 5.5 + c_m·M.
    Transition { c_m: f64 },
}

impl BoundaryLayerModel {
    /// Mach coefficient for an unswept surface.
    pub const UNSWEPT_C_M: f64 = 0.2;
    /// Mach coefficient for a swept surface.
    pub const SWEPT_C_M: f64 = 0.1;

    pub fn transition() -> Self {
        Self::Transition {
            c_m: Self::UNSWEPT_C_M,
        }
    }

    pub fn transition_swept() -> Self {
        Self::Transition {
            c_m: Self::SWEPT_C_M,
        }
    }
}

impl Default for BoundaryLayerModel {
    fn default() -> Self {
        Self::transition()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryLayerState {
    Laminar,
    Turbulent,
}

impl BoundaryLayerState {
    pub fn is_turbulent(self) -> bool {
        matches!(self, BoundaryLayerState::Turbulent)
    }

    /// Recovery factor: Pr^(1/3) turbulent, Pr^(1/2) laminar.
    pub fn recovery_factor(self, pr: f64) -> f64 {
        match self {
            BoundaryLayerState::Turbulent => pr.cbrt(),
            BoundaryLayerState::Laminar => pr.sqrt(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BoundaryLayerState::Laminar => "laminar",
            BoundaryLayerState::Turbulent => "turbulent",
        }
    }
}

/// Reynolds number above which the transition model calls the layer turbulent.
pub fn transition_reynolds(mach: f64, c_m: f64) -> f64 {
    10f64.powf(5.5 + c_m * mach)
}

pub fn classify(model: BoundaryLayerModel, re: f64, mach: f64) -> GasResult<BoundaryLayerState> {
    if !re.is_finite() || re <= 0.0 {
        return Err(GasError::NonPhysical {
            what: "Reynolds number must be positive",
        });
    }
    match model {
        BoundaryLayerModel::Laminar => Ok(BoundaryLayerState::Laminar),
        BoundaryLayerModel::Turbulent => Ok(BoundaryLayerState::Turbulent),
        BoundaryLayerModel::Transition { c_m } => {
            if !(c_m.is_finite() && mach.is_finite()) {
                return Err(GasError::InvalidArg {
                    what: "transition criterion needs finite Mach and c_m",
                });
            }
            if re > transition_reynolds(mach, c_m) {
                Ok(BoundaryLayerState::Turbulent)
            } else {
                Ok(BoundaryLayerState::Laminar)
            }
        }
    }
}
