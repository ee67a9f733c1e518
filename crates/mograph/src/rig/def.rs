//! Serializable description of a whole rig.
//!
//! With the `ron` feature a [`RigDef`] can be read from and written to RON text.
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cloner::ClonerConfig;
use crate::effector::EffectorConfig;
use crate::error::{Error, Result};
use crate::field::FieldConfig;
use crate::rig::{Linkage, Rig};

/// Document describing every item of a [`Rig`] and the links between them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigDef {
    pub fields: Vec<FieldDef>,
    pub effectors: Vec<EffectorDef>,
    pub cloners: Vec<ClonerDef>,
}

/// Cloner definition with its ordered effector chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClonerDef {
    pub name: String,
    pub config: ClonerConfig,
    #[serde(default)]
    pub effectors: Linkage,
}

/// Effector definition. The field link lives in `config.field`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectorDef {
    pub name: String,
    pub config: EffectorConfig,
}

/// Field definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub config: FieldConfig,
}

impl RigDef {
    /// Parses a rig document from RON text.
    #[cfg(feature = "ron")]
    pub fn from_ron(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Writes the document as pretty-printed RON.
    #[cfg(feature = "ron")]
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::Parse(e.to_string()))
    }

    /// Builds a [`Rig`], validating every item.
    ///
    /// Names must be unique per item type since links refer to them. Chain
    /// entries naming unknown effectors are kept and pruned by the next
    /// recompute; an unknown field name stays on its effector, which then
    /// runs at full strength.
    pub fn build(&self) -> Result<Rig> {
        let mut rig = Rig::new();
        for def in &self.fields {
            ensure_unique("field", &def.name, rig.field(&def.name).is_some())?;
            rig.add_field(&def.name, def.config.clone())?;
        }
        for def in &self.effectors {
            ensure_unique("effector", &def.name, rig.effector(&def.name).is_some())?;
            if let Some(field) = def.config.field.as_deref() {
                if rig.field(field).is_none() {
                    debug!("Effector '{}' references unknown field '{}'.", def.name, field);
                }
            }
            rig.add_effector(&def.name, def.config.clone())?;
        }
        for def in &self.cloners {
            ensure_unique("cloner", &def.name, rig.cloner(&def.name).is_some())?;
            rig.add_cloner(&def.name, def.config.clone())?;
            let dangling = def
                .effectors
                .names()
                .iter()
                .filter(|name| rig.effector(name).is_none())
                .count();
            if dangling > 0 {
                debug!(
                    "Cloner '{}' links {} unknown effector(s); pruned on recompute.",
                    def.name, dangling
                );
            }
            rig.cloner_record_mut(&def.name)?.linkage = def.effectors.clone();
        }
        Ok(rig)
    }
}

impl Rig {
    /// Snapshot of this rig as a serializable document.
    pub fn to_def(&self) -> RigDef {
        RigDef {
            fields: self
                .fields
                .iter()
                .map(|(name, field)| FieldDef {
                    name: name.to_owned(),
                    config: field.config().clone(),
                })
                .collect(),
            effectors: self
                .effectors
                .iter()
                .map(|(name, config)| EffectorDef {
                    name: name.to_owned(),
                    config: config.clone(),
                })
                .collect(),
            cloners: self
                .cloners
                .iter()
                .map(|(name, record)| ClonerDef {
                    name: name.to_owned(),
                    config: record.cloner().config().clone(),
                    effectors: record.linkage().clone(),
                })
                .collect(),
        }
    }
}

fn ensure_unique(kind: &str, name: &str, taken: bool) -> Result<()> {
    if taken {
        return Err(Error::invalid(format!("duplicate {kind} name '{name}'")));
    }
    Ok(())
}
