//! 实例化顺序
//!
//! `DependencyFirst` 模式下按构造器依赖做拓扑排序（深度优先），
//! 依赖通过具体类型或接口映射到提供它的组件。

use di_abstractions::ComponentDescriptor;
use infrastructure_common::{ComponentError, TypeInfo};
use std::any::TypeId;
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// 每个接口在发现顺序下的最终实现者（最后一个实现者）
///
/// 无论实例化顺序如何，注册表中的接口键都必须指向这里给出的组件，
/// 这样 `DependencyFirst` 与 `Discovery` 两种模式选出的实现一致。
pub fn interface_winners(descriptors: &[ComponentDescriptor]) -> HashMap<TypeId, TypeInfo> {
    let mut winners = HashMap::new();
    for descriptor in descriptors {
        for binding in descriptor.interfaces() {
            winners.insert(binding.interface().id, descriptor.type_info());
        }
    }
    winners
}

/// 按构造器依赖排序，依赖总是排在使用者之前
///
/// 接口依赖映射到发现顺序下的最后一个实现者；解析组件自身的依赖时排除
/// 组件本身，因此依赖自己所实现接口的装饰器会指向前一个实现者。
/// 没有任何组件提供的依赖会被忽略；无依赖关系的组件保持原有的发现顺序。
pub fn dependency_first(
    descriptors: Vec<ComponentDescriptor>,
) -> Result<Vec<ComponentDescriptor>, ComponentError> {
    // 类型键 -> 按发现顺序排列的提供者下标
    let mut providers: HashMap<TypeId, Vec<usize>> = HashMap::new();
    for (index, descriptor) in descriptors.iter().enumerate() {
        providers.entry(descriptor.type_info().id).or_default().push(index);
        for binding in descriptor.interfaces() {
            providers.entry(binding.interface().id).or_default().push(index);
        }
    }

    let mut edges: Vec<Vec<usize>> = Vec::with_capacity(descriptors.len());
    for (index, descriptor) in descriptors.iter().enumerate() {
        let own_type = descriptor.type_info();
        let mut targets = Vec::new();
        for dependency in descriptor.constructor_dependencies() {
            // 依赖自身的具体类型永远无法满足
            if dependency.id == own_type.id {
                return Err(ComponentError::CircularDependency {
                    cycle: format!("{0} -> {0}", own_type),
                });
            }
            let provider = providers
                .get(&dependency.id)
                .and_then(|candidates| candidates.iter().rev().find(|p| **p != index));
            if let Some(provider) = provider {
                targets.push(*provider);
            }
        }
        edges.push(targets);
    }

    let mut marks: Vec<Option<Mark>> = vec![None; descriptors.len()];
    let mut path = Vec::new();
    let mut order = Vec::with_capacity(descriptors.len());

    for index in 0..descriptors.len() {
        visit(index, &edges, &descriptors, &mut marks, &mut path, &mut order)?;
    }

    let mut slots: Vec<Option<ComponentDescriptor>> = descriptors.into_iter().map(Some).collect();
    Ok(order.into_iter().filter_map(|index| slots[index].take()).collect())
}

fn visit(
    current: usize,
    edges: &[Vec<usize>],
    descriptors: &[ComponentDescriptor],
    marks: &mut [Option<Mark>],
    path: &mut Vec<usize>,
    order: &mut Vec<usize>,
) -> Result<(), ComponentError> {
    match marks[current] {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Visiting) => {
            let start = path.iter().position(|index| *index == current).unwrap_or(0);
            let chain = path[start..]
                .iter()
                .chain(std::iter::once(&current))
                .map(|index| descriptors[*index].type_info().name)
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(ComponentError::CircularDependency { cycle: chain });
        }
        None => {}
    }

    marks[current] = Some(Mark::Visiting);
    path.push(current);

    for dependency in &edges[current] {
        visit(*dependency, edges, descriptors, marks, path, order)?;
    }

    path.pop();
    marks[current] = Some(Mark::Done);
    order.push(current);
    Ok(())
}
