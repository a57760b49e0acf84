//! Transitive closure of the models a resource's operations reference.

use std::collections::{BTreeMap, VecDeque};

use log::debug;

use crate::domain::{ModelDescriptor, is_primitive};
use crate::registry::ModelLookup;

/// Collect `root` plus every model reachable through the `accepts`/`returns`
/// types of its operations, and of the operations of those models in turn.
///
/// Names that resolve to no model are skipped; cycles terminate because each
/// name is visited once.
pub fn collect_models<L>(root: &ModelDescriptor, lookup: &L) -> BTreeMap<String, ModelDescriptor>
where
    L: ModelLookup + ?Sized,
{
    let mut models = BTreeMap::new();
    let mut pending = VecDeque::new();
    models.insert(root.name.clone(), root.clone());
    pending.push_back(root.clone());

    while let Some(model) = pending.pop_front() {
        for operation in &model.operations {
            for param in operation.params() {
                for name in param.type_ref.names() {
                    if is_primitive(name) || models.contains_key(name) {
                        continue;
                    }
                    match lookup.resolve(name) {
                        Some(referenced) => {
                            models.insert(name.to_string(), referenced.clone());
                            pending.push_back(referenced);
                        }
                        None => debug!(
                            "{}.{} references unknown type {name}",
                            model.name, operation.name
                        ),
                    }
                }
            }
        }
    }

    models
}
