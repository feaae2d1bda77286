use std::collections::{BTreeSet, HashMap};

use crate::injector::{DiscoveredModule, InjectorError};

/// Order `modules` so every module comes after the modules it requires.
///
/// Returns indices into `modules`. Kahn's algorithm; among modules that are
/// ready at the same time, discovery order wins.
pub fn wiring_order(modules: &[DiscoveredModule]) -> Result<Vec<usize>, InjectorError> {
    let by_name: HashMap<&str, usize> = modules
        .iter()
        .enumerate()
        .map(|(index, module)| (module.name(), index))
        .collect();

    let mut in_degree = vec![0usize; modules.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); modules.len()];

    for (index, module) in modules.iter().enumerate() {
        let mut seen = Vec::new();
        for dependency in &module.manifest.requires {
            let Some(&dep_index) = by_name.get(dependency.as_str()) else {
                return Err(InjectorError::MissingDependency {
                    module: module.name().to_string(),
                    dependency: dependency.clone(),
                });
            };
            if seen.contains(&dep_index) {
                continue;
            }
            seen.push(dep_index);
            in_degree[index] += 1;
            dependents[dep_index].push(index);
        }
    }

    let mut ready: BTreeSet<usize> = (0..modules.len())
        .filter(|&index| in_degree[index] == 0)
        .collect();
    let mut order = Vec::with_capacity(modules.len());

    while let Some(index) = ready.pop_first() {
        order.push(index);
        for &dependent in &dependents[index] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.insert(dependent);
            }
        }
    }

    if order.len() == modules.len() {
        Ok(order)
    } else {
        // Everything left unordered: the cycle plus whatever depends on it.
        let cycle = modules
            .iter()
            .enumerate()
            .filter(|(index, _)| in_degree[*index] > 0)
            .map(|(_, module)| module.name().to_string())
            .collect();
        Err(InjectorError::CyclicDependency(cycle))
    }
}
