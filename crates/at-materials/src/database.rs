//! Material catalog keyed by name.

use crate::ablative::{AblativeMaterial, pica};
use crate::error::{MaterialError, MaterialResult};
use crate::solid::{SolidMaterial, builtin_solids};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Contents of a user material file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialFile {
    #[serde(default)]
    pub solids: Vec<SolidMaterial>,
    #[serde(default)]
    pub ablatives: Vec<AblativeMaterial>,
}

/// A resolved material of either kind.
#[derive(Clone, Debug)]
pub enum MaterialRef {
    Solid(SolidMaterial),
    Ablative(Arc<AblativeMaterial>),
}

#[derive(Clone, Debug, Default)]
pub struct MaterialDatabase {
    solids: BTreeMap<String, SolidMaterial>,
    ablatives: BTreeMap<String, Arc<AblativeMaterial>>,
}

impl MaterialDatabase {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog of the built-in solids and ablators.
    pub fn builtin() -> Self {
        let mut solids = BTreeMap::new();
        for m in builtin_solids() {
            solids.insert(m.name.clone(), m);
        }
        let mut ablatives = BTreeMap::new();
        let p = pica();
        ablatives.insert(p.name.clone(), Arc::new(p));
        Self { solids, ablatives }
    }

    fn ensure_unique(&self, name: &str) -> MaterialResult<()> {
        if self.solids.contains_key(name) || self.ablatives.contains_key(name) {
            return Err(MaterialError::Duplicate {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn insert_solid(&mut self, material: SolidMaterial) -> MaterialResult<()> {
        material.validate()?;
        self.ensure_unique(&material.name)?;
        self.solids.insert(material.name.clone(), material);
        Ok(())
    }

    pub fn insert_ablative(&mut self, material: AblativeMaterial) -> MaterialResult<()> {
        material.validate()?;
        self.ensure_unique(&material.name)?;
        self.ablatives
            .insert(material.name.clone(), Arc::new(material));
        Ok(())
    }

    pub fn merge(&mut self, file: MaterialFile) -> MaterialResult<()> {
        for m in file.solids {
            self.insert_solid(m)?;
        }
        for m in file.ablatives {
            self.insert_ablative(m)?;
        }
        Ok(())
    }

    pub fn merge_yaml_str(&mut self, content: &str) -> MaterialResult<()> {
        let file: MaterialFile = serde_yaml::from_str(content)?;
        self.merge(file)
    }

    pub fn merge_yaml_file(&mut self, path: &Path) -> MaterialResult<()> {
        let content = std::fs::read_to_string(path)?;
        self.merge_yaml_str(&content)
    }

    pub fn solid(&self, name: &str) -> MaterialResult<&SolidMaterial> {
        self.solids
            .get(name)
            .ok_or_else(|| MaterialError::UnknownMaterial {
                name: name.to_string(),
            })
    }

    pub fn ablative(&self, name: &str) -> MaterialResult<Arc<AblativeMaterial>> {
        self.ablatives
            .get(name)
            .cloned()
            .ok_or_else(|| MaterialError::UnknownMaterial {
                name: name.to_string(),
            })
    }

    /// Resolve a name against both catalogs.
    pub fn lookup(&self, name: &str) -> MaterialResult<MaterialRef> {
        if let Some(m) = self.solids.get(name) {
            return Ok(MaterialRef::Solid(m.clone()));
        }
        self.ablative(name).map(MaterialRef::Ablative)
    }

    pub fn solid_names(&self) -> impl Iterator<Item = &str> {
        self.solids.keys().map(String::as_str)
    }

    pub fn ablative_names(&self) -> impl Iterator<Item = &str> {
        self.ablatives.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup_by_kind() {
        let db = MaterialDatabase::builtin();
        assert!(matches!(db.lookup("ALU6061").unwrap(), MaterialRef::Solid(_)));
        assert!(matches!(db.lookup("PICA").unwrap(), MaterialRef::Ablative(_)));
        assert!(db.solid("PICA").is_err());
        assert!(db.solid_names().any(|n| n == "SS316"));
    }

    #[test]
    fn unknown_material_is_an_error() {
        let db = MaterialDatabase::builtin();
        let err = db.lookup("UNOBTAINIUM").unwrap_err();
        assert!(matches!(err, MaterialError::UnknownMaterial { .. }));
    }

    #[test]
    fn yaml_file_extends_catalog() {
        let mut db = MaterialDatabase::builtin();
        db.merge_yaml_str(
            r#"
solids:
  - name: COPPER
    density: 8960
    specific_heat: 385
    conductivity: 401
    emissivity: 0.05
ablatives:
  - name: CORK
    resin_fraction: 0.5
    emissivity: 0.8
    ablation_onset_k: 600
    specific_heat: 1700
    conductivity: { table: [[300, 0.06], [800, 0.1]] }
    heat_of_ablation: 1.2e7
    channels:
      - virgin_density: 480
        char_density: 120
        pre_exponential: 1.0e5
        activation_temperature: 9000
        reaction_order: 2
        group: resin
      - virgin_density: 0
        char_density: 0
        pre_exponential: 0
        activation_temperature: 0
        reaction_order: 0
        group: reinforcement
"#,
        )
        .unwrap();
        assert_eq!(db.solid("COPPER").unwrap().conductivity, 401.0);
        let cork = db.ablative("CORK").unwrap();
        assert!((cork.initial_density() - 240.0).abs() < 1e-9);
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut db = MaterialDatabase::builtin();
        let al = db.solid("ALU6061").unwrap().clone();
        assert!(matches!(
            db.insert_solid(al),
            Err(MaterialError::Duplicate { .. })
        ));
    }
}
