//! Named cloners, effectors and fields plus the linkage between them.
//!
//! A [`Rig`] is the state a front end edits: it owns every item by name, keeps
//! one ordered [`Linkage`] per cloner and rebuilds a cloner's output from
//! scratch on [`Rig::recompute`]. Linkage entries that point at removed
//! effectors are pruned before each recompute.
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::cloner::{Cloner, ClonerConfig, Element};
use crate::effector::EffectorConfig;
use crate::error::{Error, Result};
use crate::field::{FieldConfig, SphereField, NEUTRAL_WEIGHT};

#[cfg(feature = "serde")]
pub mod def;
pub mod events;
pub mod linkage;
mod registry;

#[cfg(feature = "serde")]
pub use def::{ClonerDef, EffectorDef, FieldDef, RigDef};
pub use events::{CloneEvent, CloneEventKind, EventSink, FnSink, MultiSink, VecSink};
pub use linkage::{Direction, Linkage};

use registry::Registry;

/// A cloner together with the effectors linked to it.
#[derive(Debug)]
pub struct ClonerRecord {
    cloner: Cloner,
    linkage: Linkage,
}

impl ClonerRecord {
    pub fn cloner(&self) -> &Cloner {
        &self.cloner
    }

    pub fn linkage(&self) -> &Linkage {
        &self.linkage
    }
}

/// Registry of named cloners, effectors and fields.
#[derive(Debug, Default)]
pub struct Rig {
    cloners: Registry<ClonerRecord>,
    effectors: Registry<EffectorConfig>,
    fields: Registry<SphereField>,
}

/// How an effector is weighted during one recompute.
struct ResolvedEffector<'a> {
    name: &'a str,
    config: &'a EffectorConfig,
    field: Option<(&'a str, &'a SphereField)>,
}

impl Rig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cloner with an empty linkage. Returns the unique name assigned.
    pub fn add_cloner(&mut self, name: &str, config: ClonerConfig) -> Result<String> {
        let cloner = Cloner::try_new(config)?;
        Ok(self.cloners.insert(
            name,
            ClonerRecord {
                cloner,
                linkage: Linkage::new(),
            },
        ))
    }

    /// Adds an effector. Returns the unique name assigned.
    ///
    /// A new effector starts unlinked: stale links left under the same name by
    /// a removed effector are dropped.
    pub fn add_effector(&mut self, name: &str, config: EffectorConfig) -> Result<String> {
        config.validate()?;
        let name = self.effectors.insert(name, config);
        self.drop_stale_links(&name);
        Ok(name)
    }

    /// Adds a field. Returns the unique name assigned.
    pub fn add_field(&mut self, name: &str, config: FieldConfig) -> Result<String> {
        let field = SphereField::try_new(config)?;
        Ok(self.fields.insert(name, field))
    }

    /// Replaces a cloner's configuration; its linkage is kept.
    pub fn update_cloner(&mut self, name: &str, config: ClonerConfig) -> Result<()> {
        let cloner = Cloner::try_new(config)?;
        self.cloner_record_mut(name)?.cloner = cloner;
        Ok(())
    }

    pub fn update_effector(&mut self, name: &str, config: EffectorConfig) -> Result<()> {
        config.validate()?;
        *self.effector_mut(name)? = config;
        Ok(())
    }

    pub fn update_field(&mut self, name: &str, config: FieldConfig) -> Result<()> {
        let field = SphereField::try_new(config)?;
        let slot = self.fields.get_mut(name).ok_or_else(|| Error::UnknownField {
            name: name.to_owned(),
        })?;
        *slot = field;
        Ok(())
    }

    pub fn cloner(&self, name: &str) -> Option<&ClonerRecord> {
        self.cloners.get(name)
    }

    pub fn effector(&self, name: &str) -> Option<&EffectorConfig> {
        self.effectors.get(name)
    }

    pub fn field(&self, name: &str) -> Option<&SphereField> {
        self.fields.get(name)
    }

    pub fn cloner_names(&self) -> impl Iterator<Item = &str> {
        self.cloners.names()
    }

    pub fn effector_names(&self) -> impl Iterator<Item = &str> {
        self.effectors.names()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.names()
    }

    /// Removes a cloner and its linkage.
    pub fn remove_cloner(&mut self, name: &str) -> Result<()> {
        self.cloners
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::UnknownCloner {
                name: name.to_owned(),
            })
    }

    /// Removes an effector. Linkages that still name it are pruned on the
    /// next recompute of their cloner; adding or renaming another effector to
    /// this name before then does not revive those links.
    pub fn remove_effector(&mut self, name: &str) -> Result<()> {
        self.effectors
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::UnknownEffector {
                name: name.to_owned(),
            })
    }

    /// Removes a field. Effectors that reference it fall back to full strength.
    pub fn remove_field(&mut self, name: &str) -> Result<()> {
        self.fields
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::UnknownField {
                name: name.to_owned(),
            })
    }

    /// Renames an effector and rewrites every linkage that names it. Stale
    /// links already holding the new name are dropped first.
    pub fn rename_effector(&mut self, from: &str, to: &str) -> Result<String> {
        let new_name = self
            .effectors
            .rename(from, to)
            .ok_or_else(|| Error::UnknownEffector {
                name: from.to_owned(),
            })?;
        if new_name != from {
            self.drop_stale_links(&new_name);
            for (_, record) in self.cloners.iter_mut() {
                record.linkage.rename(from, &new_name);
            }
        }
        Ok(new_name)
    }

    /// Appends `effector` to the chain of `cloner`. Returns `false` if it was
    /// already linked.
    pub fn link_effector(&mut self, cloner: &str, effector: &str) -> Result<bool> {
        if !self.effectors.contains(effector) {
            return Err(Error::UnknownEffector {
                name: effector.to_owned(),
            });
        }
        let linked = self.cloner_record_mut(cloner)?.linkage.link(effector);
        if linked {
            debug!("Linked effector '{}' to cloner '{}'.", effector, cloner);
        }
        Ok(linked)
    }

    /// Removes `effector` from the chain of `cloner`. Returns `false` if it was
    /// not linked. The effector itself does not need to exist.
    pub fn unlink_effector(&mut self, cloner: &str, effector: &str) -> Result<bool> {
        let unlinked = self.cloner_record_mut(cloner)?.linkage.unlink(effector);
        if unlinked {
            debug!("Unlinked effector '{}' from cloner '{}'.", effector, cloner);
        }
        Ok(unlinked)
    }

    /// Moves `effector` one step up or down the chain of `cloner`.
    pub fn move_effector(
        &mut self,
        cloner: &str,
        effector: &str,
        direction: Direction,
    ) -> Result<bool> {
        Ok(self
            .cloner_record_mut(cloner)?
            .linkage
            .move_effector(effector, direction))
    }

    /// Ordered effector names linked to `cloner`, dangling ones included.
    pub fn linked_effectors(&self, cloner: &str) -> Result<&[String]> {
        Ok(self.cloner_record(cloner)?.linkage.names())
    }

    /// Weights `effector` by `field`.
    pub fn link_field(&mut self, effector: &str, field: &str) -> Result<()> {
        if !self.fields.contains(field) {
            return Err(Error::UnknownField {
                name: field.to_owned(),
            });
        }
        self.effector_mut(effector)?.field = Some(field.to_owned());
        Ok(())
    }

    /// Clears the field of `effector`, returning the previous field name.
    pub fn unlink_field(&mut self, effector: &str) -> Result<Option<String>> {
        Ok(self.effector_mut(effector)?.field.take())
    }

    /// Drops linkage entries of `cloner` that name removed effectors and
    /// returns the dropped names.
    pub fn prune_linkage(&mut self, cloner: &str) -> Result<Vec<String>> {
        let effectors = &self.effectors;
        let record = self
            .cloners
            .get_mut(cloner)
            .ok_or_else(|| Error::UnknownCloner {
                name: cloner.to_owned(),
            })?;
        Ok(record.linkage.prune(|name| effectors.contains(name)))
    }

    /// Rebuilds the elements of `cloner` with its linked effectors applied.
    pub fn recompute(&mut self, cloner: &str) -> Result<Vec<Element>> {
        self.recompute_with_events(cloner, &mut ())
    }

    /// Like [`Rig::recompute`], reporting progress to `sink`.
    pub fn recompute_with_events(
        &mut self,
        cloner: &str,
        sink: &mut dyn EventSink,
    ) -> Result<Vec<Element>> {
        let removed = self.prune_linkage(cloner)?;
        if !removed.is_empty() {
            debug!(
                "Pruned {} dangling effector(s) from cloner '{}': {:?}.",
                removed.len(),
                cloner,
                removed
            );
            if sink.wants(CloneEventKind::LinkagePruned) {
                sink.send(CloneEvent::LinkagePruned {
                    cloner: cloner.to_owned(),
                    removed,
                });
            }
        }

        let record = self.cloner_record(cloner)?;
        let chain = self.resolve_chain(cloner, &record.linkage, sink);
        let count = record.cloner.element_count();

        if sink.wants(CloneEventKind::RecomputeStarted) {
            sink.send(CloneEvent::RecomputeStarted {
                cloner: cloner.to_owned(),
                element_count: count,
                effector_count: chain.len(),
            });
        }

        let mut elements = record.cloner.elements();
        let mut applied = 0;
        for effector in &chain {
            if !effector.config.enabled {
                if sink.wants(CloneEventKind::EffectorSkipped) {
                    sink.send(CloneEvent::EffectorSkipped {
                        cloner: cloner.to_owned(),
                        effector: effector.name.to_owned(),
                    });
                }
                continue;
            }
            apply_effector(effector, &mut elements);
            applied += 1;
            if sink.wants(CloneEventKind::EffectorApplied) {
                sink.send(CloneEvent::EffectorApplied {
                    cloner: cloner.to_owned(),
                    effector: effector.name.to_owned(),
                    field: effector.field.map(|(name, _)| name.to_owned()),
                });
            }
        }

        info!(
            "Cloner '{}' ({}) | elements: {} | effectors applied: {}/{}.",
            cloner,
            record.cloner.config().kind.label(),
            count,
            applied,
            chain.len(),
        );

        if sink.wants(CloneEventKind::RecomputeFinished) {
            sink.send(CloneEvent::RecomputeFinished {
                cloner: cloner.to_owned(),
                element_count: elements.len(),
            });
        }

        Ok(elements)
    }

    /// Recomputes every cloner in insertion order.
    pub fn recompute_all(&mut self) -> Vec<(String, Vec<Element>)> {
        self.recompute_all_with_events(&mut ())
    }

    pub fn recompute_all_with_events(
        &mut self,
        sink: &mut dyn EventSink,
    ) -> Vec<(String, Vec<Element>)> {
        let names: Vec<String> = self.cloners.names().map(str::to_owned).collect();
        if names.is_empty() {
            warn!("Rig has no cloners.");
            if sink.wants(CloneEventKind::Warning) {
                sink.send(CloneEvent::Warning {
                    context: "rig".into(),
                    message: "Rig has no cloners".into(),
                });
            }
        }
        let mut out = Vec::with_capacity(names.len());
        for name in names {
            match self.recompute_with_events(&name, sink) {
                Ok(elements) => out.push((name, elements)),
                Err(err) => {
                    warn!("Recompute of cloner '{}' failed: {}.", name, err);
                    if sink.wants(CloneEventKind::Warning) {
                        sink.send(CloneEvent::Warning {
                            context: format!("cloner:{name}"),
                            message: err.to_string(),
                        });
                    }
                }
            }
        }
        out
    }

    fn resolve_chain<'a>(
        &'a self,
        cloner: &str,
        linkage: &'a Linkage,
        sink: &mut dyn EventSink,
    ) -> Vec<ResolvedEffector<'a>> {
        let mut chain = Vec::with_capacity(linkage.len());
        for name in linkage.names() {
            let Some(config) = self.effectors.get(name) else {
                continue;
            };
            let field = match config.field.as_deref() {
                None => None,
                Some(field_name) => match self.fields.get(field_name) {
                    Some(field) if field.has_source() => Some((field_name, field)),
                    found => {
                        let why = if found.is_some() {
                            "has no source"
                        } else {
                            "does not exist"
                        };
                        warn!(
                            "Field '{}' of effector '{}' {}; using full strength.",
                            field_name, name, why
                        );
                        if sink.wants(CloneEventKind::FieldMissing) {
                            sink.send(CloneEvent::FieldMissing {
                                cloner: cloner.to_owned(),
                                effector: name.clone(),
                                field: field_name.to_owned(),
                            });
                        }
                        None
                    }
                },
            };
            chain.push(ResolvedEffector {
                name: name.as_str(),
                config,
                field,
            });
        }
        chain
    }

    fn cloner_record(&self, name: &str) -> Result<&ClonerRecord> {
        self.cloners.get(name).ok_or_else(|| Error::UnknownCloner {
            name: name.to_owned(),
        })
    }

    fn drop_stale_links(&mut self, effector: &str) {
        for (cloner, record) in self.cloners.iter_mut() {
            if record.linkage.unlink(effector) {
                debug!(
                    "Dropped stale link '{}' from cloner '{}'.",
                    effector, cloner
                );
            }
        }
    }

    fn cloner_record_mut(&mut self, name: &str) -> Result<&mut ClonerRecord> {
        self.cloners
            .get_mut(name)
            .ok_or_else(|| Error::UnknownCloner {
                name: name.to_owned(),
            })
    }

    fn effector_mut(&mut self, name: &str) -> Result<&mut EffectorConfig> {
        self.effectors
            .get_mut(name)
            .ok_or_else(|| Error::UnknownEffector {
                name: name.to_owned(),
            })
    }
}

fn apply_effector(effector: &ResolvedEffector<'_>, elements: &mut [Element]) {
    let apply = |element: &mut Element| {
        let weight = effector
            .field
            .map_or(NEUTRAL_WEIGHT, |(_, field)| {
                field.weight(element.transform.translation)
            });
        effector.config.apply_to(element, weight);
    };
    #[cfg(feature = "parallel")]
    elements.par_iter_mut().for_each(apply);
    #[cfg(not(feature = "parallel"))]
    elements.iter_mut().for_each(apply);
}
