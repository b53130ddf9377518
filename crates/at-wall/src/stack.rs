//! Ordered wall elements, exposed face first.

use crate::element::WallElement;
use crate::error::{WallError, WallResult};
use at_materials::{MaterialDatabase, MaterialRef};
use tracing::warn;

/// A homogeneous layer discretised into equal elements.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub material: String,
    pub thickness_m: f64,
    pub elements: usize,
}

impl Layer {
    pub fn new(material: impl Into<String>, thickness_m: f64, elements: usize) -> Self {
        Self {
            material: material.into(),
            thickness_m,
            elements,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WallStack {
    elements: Vec<WallElement>,
}

impl WallStack {
    pub fn new(elements: Vec<WallElement>) -> WallResult<Self> {
        if elements.is_empty() {
            return Err(WallError::InvalidArg {
                what: "wall needs at least one element",
            });
        }
        Ok(Self { elements })
    }

    /// Build from layers listed outside-in, resolving materials by name.
    pub fn from_layers(db: &MaterialDatabase, layers: &[Layer], t_init_k: f64) -> WallResult<Self> {
        let mut elements = Vec::new();
        for layer in layers {
            if layer.elements == 0 {
                return Err(WallError::InvalidArg {
                    what: "layer needs at least one element",
                });
            }
            if !(layer.thickness_m.is_finite() && layer.thickness_m > 0.0) {
                return Err(WallError::InvalidArg {
                    what: "layer thickness must be positive",
                });
            }
            let dy = layer.thickness_m / layer.elements as f64;
            let material = db.lookup(&layer.material)?;
            for _ in 0..layer.elements {
                let el = match &material {
                    MaterialRef::Solid(m) => WallElement::solid(m.clone(), dy)?,
                    MaterialRef::Ablative(m) => WallElement::ablative(m.clone(), dy, t_init_k)?,
                };
                elements.push(el);
            }
        }
        Self::new(elements)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[WallElement] {
        &self.elements
    }

    pub fn element(&self, index: usize) -> Option<&WallElement> {
        self.elements.get(index)
    }

    pub fn element_mut(&mut self, index: usize) -> Option<&mut WallElement> {
        self.elements.get_mut(index)
    }

    /// The heated face element.
    pub fn exposed(&self) -> &WallElement {
        &self.elements[0]
    }

    /// Node positions measured from the exposed face: first at dy/2, then
    /// previous + dy_prev/2 + dy/2.
    pub fn coordinates(&self) -> Vec<f64> {
        let mut coords = Vec::with_capacity(self.elements.len());
        let mut prev: Option<(f64, f64)> = None;
        for el in &self.elements {
            let dy = el.thickness();
            let y = match prev {
                None => 0.5 * dy,
                Some((y_prev, dy_prev)) => y_prev + 0.5 * dy_prev + 0.5 * dy,
            };
            coords.push(y);
            prev = Some((y, dy));
        }
        coords
    }

    pub fn total_thickness(&self) -> f64 {
        self.elements.iter().map(WallElement::thickness).sum()
    }

    pub fn densities(&self) -> Vec<f64> {
        self.elements.iter().map(WallElement::density).collect()
    }

    pub fn ablative_indices(&self) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_ablative())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn ablative_thickness(&self) -> f64 {
        self.elements
            .iter()
            .filter(|e| e.is_ablative())
            .map(WallElement::thickness)
            .sum()
    }

    /// Re-evaluate temperature dependent properties node by node.
    pub fn update_thermal_props(&mut self, temps: &[f64]) -> WallResult<()> {
        if temps.len() != self.elements.len() {
            return Err(WallError::SizeMismatch {
                what: "temperatures",
                expected: self.elements.len(),
                got: temps.len(),
            });
        }
        for (el, &t) in self.elements.iter_mut().zip(temps) {
            el.update_thermal_props(t)?;
        }
        Ok(())
    }

    /// Remove `delta_m` of material, shared equally by the ablative elements.
    ///
    /// Thicknesses are clamped at zero. A negative request is reported and
    /// ignored. Returns the thickness actually removed.
    pub fn recede(&mut self, delta_m: f64) -> f64 {
        if !delta_m.is_finite() || delta_m < 0.0 {
            warn!(delta_m, "negative recession requested; ignoring");
            return 0.0;
        }
        let ablative = self.ablative_indices();
        if delta_m == 0.0 || ablative.is_empty() {
            return 0.0;
        }
        let share = delta_m / ablative.len() as f64;
        let mut removed = 0.0;
        for i in ablative {
            let el = &mut self.elements[i];
            let dy = el.thickness();
            let next = (dy - share).max(0.0);
            removed += dy - next;
            el.set_thickness(next);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> MaterialDatabase {
        MaterialDatabase::builtin()
    }

    #[test]
    fn coordinates_are_cell_centres() {
        let wall = WallStack::from_layers(
            &db(),
            &[Layer::new("ALU6061", 0.002, 2), Layer::new("G10", 0.004, 1)],
            290.0,
        )
        .unwrap();
        let y = wall.coordinates();
        assert_eq!(wall.len(), 3);
        assert!((y[0] - 0.0005).abs() < 1e-12);
        assert!((y[1] - 0.0015).abs() < 1e-12);
        assert!((y[2] - 0.004).abs() < 1e-12);
        assert!(y.windows(2).all(|w| w[1] > w[0]));
        assert!((wall.total_thickness() - 0.006).abs() < 1e-12);
    }

    #[test]
    fn unknown_material_fails_construction() {
        let err = WallStack::from_layers(&db(), &[Layer::new("NOPE", 0.01, 3)], 290.0).unwrap_err();
        assert!(matches!(err, WallError::Material(_)));
    }

    #[test]
    fn layers_are_validated() {
        assert!(WallStack::from_layers(&db(), &[Layer::new("SS316", 0.01, 0)], 290.0).is_err());
        assert!(WallStack::from_layers(&db(), &[Layer::new("SS316", -0.01, 2)], 290.0).is_err());
        assert!(WallStack::from_layers(&db(), &[], 290.0).is_err());
    }

    #[test]
    fn recession_only_thins_ablative_elements() {
        let mut wall = WallStack::from_layers(
            &db(),
            &[Layer::new("PICA", 0.004, 4), Layer::new("ALU6061", 0.002, 2)],
            290.0,
        )
        .unwrap();
        let removed = wall.recede(4e-4);
        assert!((removed - 4e-4).abs() < 1e-15);
        assert!((wall.ablative_thickness() - 0.0036).abs() < 1e-12);
        assert!((wall.element(5).unwrap().thickness() - 0.001).abs() < 1e-15);
    }

    #[test]
    fn recession_clamps_and_ignores_negative_requests() {
        let mut wall = WallStack::from_layers(&db(), &[Layer::new("PICA", 0.002, 2)], 290.0).unwrap();
        assert_eq!(wall.recede(-1e-3), 0.0);
        assert!((wall.total_thickness() - 0.002).abs() < 1e-15);

        let removed = wall.recede(1.0);
        assert!((removed - 0.002).abs() < 1e-15);
        assert!(wall.elements().iter().all(|e| e.thickness() == 0.0));
    }
}
