//! The resolver driver: runs fixed-point rounds over the derivation graph,
//! then a bottom-up finalisation pass, producing a processed [`model::processed::Device`].

use crate::derive_path::{self, PathResolution};
use crate::diagnostics::ResolveLog;
use crate::dim;
use crate::enumvalues;
use crate::error::{ElementPath, ResolveError, Warning};
use crate::graph::{EdgeKind, ElementLevel, Graph, NodeId, NodeStatus, ParsedElement, ProcessedElement, ResolverNode};
use crate::graph_builder;
use crate::model::parsed::{self, DimElementGroup};
use crate::model::processed;
use crate::processors::{self, properties::Resolved};

/// Resolves a parsed device into its fully materialised processed form.
///
/// Warnings accumulate into `warnings` and never abort resolution; a
/// `ResolveError` aborts it and discards all partial state.
pub fn resolve(device: parsed::Device, warnings: &mut Vec<Warning>) -> Result<(processed::Device, ResolveLog), ResolveError> {
    let device_width = device.width;
    let mut graph = graph_builder::build(device);
    let mut log = ResolveLog::new();
    let mut round = 0u32;

    loop {
        round += 1;
        log.start_round(round);
        let mut progress = false;

        for placeholder_id in graph.placeholders() {
            if try_resolve_placeholder(&mut graph, placeholder_id, &mut log)? {
                progress = true;
            }
        }

        let processable: Vec<NodeId> = graph
            .get_unprocessed_nodes()
            .into_iter()
            .filter(|&id| graph.parent_is_resolved(id) && !graph.has_incoming_edge_of_kinds(id, &[EdgeKind::Placeholder]))
            .collect();

        if processable.is_empty() {
            if progress {
                // Placeholders resolved this round but nothing became
                // processable yet; give the next round a chance.
                if graph.get_unprocessed_nodes().is_empty() {
                    break;
                }
                continue;
            }

            if let Some(stuck) = first_remaining_placeholder(&graph) {
                return Err(ResolveError::UnresolvedDerivation {
                    path: path_of(&graph, stuck.0),
                    derive_path: stuck.1,
                });
            }
            if !graph.get_unprocessed_nodes().is_empty() {
                return Err(ResolveError::ResolveCycle { path: ElementPath::new() });
            }
            break;
        }

        let ordered = graph.topological_sort_derived_last(processable);
        for id in ordered {
            if !is_unprocessed(&graph, id) {
                continue;
            }
            process_node(&mut graph, id, device_width, warnings, &mut log)?;
            progress = true;
        }

        if graph.get_unprocessed_nodes().is_empty() {
            break;
        }
        let _ = progress;
    }

    finalize(&mut graph, device_width, warnings)?;
    let processed_device = extract_device(&graph, device_width, warnings)?;
    Ok((processed_device, log))
}

fn is_unprocessed(graph: &Graph, id: NodeId) -> bool {
    matches!(graph.get(id), ResolverNode::Element(e) if matches!(e.status, NodeStatus::Unprocessed))
}

fn first_remaining_placeholder(graph: &Graph) -> Option<(NodeId, String)> {
    graph.placeholders().into_iter().find_map(|id| {
        let node = graph.get(id).as_placeholder()?;
        Some((node.deriver, node.derive_path.clone()))
    })
}

pub fn path_of(graph: &Graph, id: NodeId) -> ElementPath {
    let mut segments = Vec::new();
    let mut current = Some(id);
    while let Some(node_id) = current {
        if node_id == graph.root {
            break;
        }
        segments.push(graph.element(node_id).name.clone());
        current = graph.get_element_parent(node_id);
    }
    segments.reverse();
    ElementPath(segments)
}

fn try_resolve_placeholder(graph: &mut Graph, placeholder: NodeId, log: &mut ResolveLog) -> Result<bool, ResolveError> {
    let (deriver, derive_path_str) = {
        let Some(node) = graph.get(placeholder).as_placeholder() else {
            return Ok(false);
        };
        (node.deriver, node.derive_path.clone())
    };

    let parent_ready = graph
        .incoming(placeholder, EdgeKind::Placeholder)
        .into_iter()
        .all(|p| matches!(graph.get(p), ResolverNode::Element(e) if matches!(e.status, NodeStatus::Processed)));
    if !parent_ready {
        return Ok(false);
    }

    match derive_path::resolve(graph, deriver, &derive_path_str, |id| path_of(graph, id))? {
        PathResolution::NotYetFound => Ok(false),
        PathResolution::Found(base) => {
            if base == deriver {
                return Err(ResolveError::SelfDerivation { path: path_of(graph, deriver) });
            }
            graph.add_derive_edge(base, deriver, |id| path_of(graph, id))?;
            graph.remove_placeholder(placeholder);
            log.record_placeholder_resolution(path_of(graph, deriver), path_of(graph, base));
            Ok(true)
        }
    }
}

fn process_node(graph: &mut Graph, id: NodeId, device_width: u32, warnings: &mut Vec<Warning>, log: &mut ResolveLog) -> Result<(), ResolveError> {
    let level = graph.element(id).level;
    match level {
        ElementLevel::EnumContainer => process_enum_container_node(graph, id),
        ElementLevel::Field => process_field_node(graph, id),
        ElementLevel::Register => process_register_node(graph, id, device_width),
        ElementLevel::Cluster => process_cluster_node(graph, id),
        ElementLevel::Peripheral => process_peripheral_node(graph, id),
        ElementLevel::Device => unreachable!("the device root is pre-marked processed"),
    }?;
    log.record_processed(path_of(graph, id));
    let _ = warnings;
    Ok(())
}

fn ancestor_properties_chain(graph: &Graph, id: NodeId) -> Vec<Resolved> {
    let mut out = Vec::new();
    let mut current = graph.get_element_parent(id);
    while let Some(ancestor) = current {
        if ancestor == graph.root {
            break;
        }
        let node = graph.element(ancestor);
        let resolved = match &node.processed {
            Some(ProcessedElement::Peripheral(p)) => Some(Resolved {
                size: p.size,
                access: p.access,
                protection: p.protection,
                reset_value: p.reset_value,
                reset_mask: p.reset_mask,
            }),
            Some(ProcessedElement::Cluster(c)) => Some(Resolved {
                size: c.size,
                access: c.access,
                protection: c.protection,
                reset_value: c.reset_value,
                reset_mask: c.reset_mask,
            }),
            _ => None,
        };
        if let Some(resolved) = resolved {
            out.push(resolved);
        }
        current = graph.get_element_parent(ancestor);
    }
    out
}

fn base_processed<'a>(graph: &'a Graph, id: NodeId) -> Option<&'a ProcessedElement> {
    graph.get_base_element_node(id).and_then(|base| graph.element(base).processed.as_ref())
}

// --- EnumeratedValueContainer ------------------------------------------------

fn process_enum_container_node(graph: &mut Graph, id: NodeId) -> Result<(), ResolveError> {
    // A derived container replicates its base's parsed form wholesale before
    // normal processing runs; the Derive edge is then redundant and dropped.
    if let Some(base_id) = graph.get_base_element_node(id) {
        let base_parsed = match &graph.element(base_id).parsed {
            ParsedElement::EnumContainer(c) => (**c).clone(),
            _ => unreachable!("enum container base must itself be an enum container"),
        };
        graph.element_mut(id).parsed = ParsedElement::EnumContainer(Box::new(base_parsed));
        graph.remove_derive_edge(base_id, id);
    }

    let path = path_of(graph, id);
    let parsed = match &graph.element(id).parsed {
        ParsedElement::EnumContainer(c) => (**c).clone(),
        _ => unreachable!(),
    };
    let processed = processors::enum_container::process(&parsed, &path)?;
    let node = graph.element_mut(id);
    node.processed = Some(ProcessedElement::EnumContainer(Box::new(processed)));
    graph.mark_processed(id);
    Ok(())
}

// --- Field -------------------------------------------------------------------

fn process_field_node(graph: &mut Graph, id: NodeId) -> Result<(), ResolveError> {
    let path = path_of(graph, id);
    let parsed = match &graph.element(id).parsed {
        ParsedElement::Field(f) => (**f).clone(),
        _ => unreachable!(),
    };
    dim::reject(&parsed.dim_element, &path)?;

    let parent_access = graph
        .get_element_parent(id)
        .and_then(|p| match &graph.element(p).processed {
            Some(ProcessedElement::Register(r)) => Some(r.access),
            _ => None,
        })
        .unwrap_or(crate::model::tokens::Access::ReadWrite);

    let base = match base_processed(graph, id) {
        Some(ProcessedElement::Field(f)) => Some((**f).clone()),
        _ => None,
    };

    // EnumContainer children of this field are processed independently as
    // graph nodes; collect their already-processed forms.
    let containers: Vec<processed::EnumeratedValueContainer> = graph
        .get_element_children(id)
        .into_iter()
        .filter_map(|c| match &graph.element(c).processed {
            Some(ProcessedElement::EnumContainer(e)) => Some((**e).clone()),
            _ => None,
        })
        .collect();
    enumvalues::check_usage_coexistence(&containers, &path)?;

    let processed = processors::field::process(&parsed, base.as_ref(), parent_access, containers, &path)?;
    graph.element_mut(id).processed = Some(ProcessedElement::Field(Box::new(processed)));
    graph.mark_processed(id);
    Ok(())
}

// --- Register ----------------------------------------------------------------

fn process_register_node(graph: &mut Graph, id: NodeId, device_width: u32) -> Result<(), ResolveError> {
    let path = path_of(graph, id);
    let name = graph.element(id).name.clone();
    let parsed = match &graph.element(id).parsed {
        ParsedElement::Register(r) => (**r).clone(),
        _ => unreachable!(),
    };

    if dim::has_dim(&parsed.dim_element) {
        let instances = dim::expand(&name, &parsed.dim_element, parsed.address_offset, true, &path)?;
        let parent = graph.get_element_parent(id).expect("dim node must have a parent");
        graph.element_mut(id).is_dim_template = true;
        for inst in &instances {
            let new_id = graph.replicate_descendants(id, parent);
            let mut clone = parsed.clone();
            clone.address_offset = inst.offset;
            clone.name = inst.name.clone();
            clone.dim_element = DimElementGroup::default();
            let node = graph.element_mut(new_id);
            node.name = inst.name.clone();
            node.parsed = ParsedElement::Register(Box::new(clone));
            node.is_dim_template = false;
        }
        // The template itself is also merged (design note (ii)): a sibling
        // that derives from this register before expansion sees it as the
        // base. It's excluded from finalisation and final output via
        // `is_dim_template`.
        return merge_register(graph, id, &parsed, device_width, &path);
    }

    merge_register(graph, id, &parsed, device_width, &path)
}

fn merge_register(graph: &mut Graph, id: NodeId, parsed: &parsed::Register, device_width: u32, path: &ElementPath) -> Result<(), ResolveError> {
    let base = match base_processed(graph, id) {
        Some(ProcessedElement::Register(r)) => Some((**r).clone()),
        _ => None,
    };
    let ancestors = ancestor_properties_chain(graph, id);
    let (size, access, protection, reset_value, reset_mask) = processors::register::resolve_properties(&parsed.properties, base.as_ref(), &ancestors);
    let metadata = processors::register::merge_metadata(parsed, base.as_ref());
    let _ = device_width;

    let processed = processed::Register {
        size,
        access,
        protection,
        reset_value,
        reset_mask,
        name: parsed.name.clone(),
        display_name: metadata.display_name,
        description: metadata.description,
        alternate_group: metadata.alternate_group,
        alternate_register: metadata.alternate_register,
        address_offset: parsed.address_offset,
        data_type: metadata.data_type,
        modified_write_values: metadata.modified_write_values,
        write_constraint: metadata.write_constraint,
        read_action: metadata.read_action,
        fields: Vec::new(),
    };

    graph.element_mut(id).processed = Some(ProcessedElement::Register(Box::new(processed)));
    graph.mark_processed(id);
    let _ = path;
    Ok(())
}

// --- Cluster -------------------------------------------------------------------

fn process_cluster_node(graph: &mut Graph, id: NodeId) -> Result<(), ResolveError> {
    let path = path_of(graph, id);
    let name = graph.element(id).name.clone();
    let parsed = match &graph.element(id).parsed {
        ParsedElement::Cluster(c) => (**c).clone(),
        _ => unreachable!(),
    };

    if dim::has_dim(&parsed.dim_element) {
        let instances = dim::expand(&name, &parsed.dim_element, parsed.address_offset, true, &path)?;
        let parent = graph.get_element_parent(id).expect("dim node must have a parent");
        graph.element_mut(id).is_dim_template = true;
        for inst in &instances {
            let new_id = graph.replicate_descendants(id, parent);
            let mut clone = parsed.clone();
            clone.address_offset = inst.offset;
            clone.name = inst.name.clone();
            clone.dim_element = DimElementGroup::default();
            let node = graph.element_mut(new_id);
            node.name = inst.name.clone();
            node.parsed = ParsedElement::Cluster(Box::new(clone));
            node.is_dim_template = false;
        }
        return merge_cluster(graph, id, &parsed);
    }

    merge_cluster(graph, id, &parsed)
}

fn merge_cluster(graph: &mut Graph, id: NodeId, parsed: &parsed::Cluster) -> Result<(), ResolveError> {
    let base = match base_processed(graph, id) {
        Some(ProcessedElement::Cluster(c)) => Some((**c).clone()),
        _ => None,
    };
    let ancestors = ancestor_properties_chain(graph, id);
    let resolved = processors::cluster::resolve_properties(&parsed.properties, base.as_ref(), &ancestors);
    let metadata = processors::cluster::merge_metadata(parsed, base.as_ref());

    let processed = processed::Cluster {
        size: resolved.size,
        access: resolved.access,
        protection: resolved.protection,
        reset_value: resolved.reset_value,
        reset_mask: resolved.reset_mask,
        name: parsed.name.clone(),
        description: metadata.description,
        alternate_cluster: metadata.alternate_cluster,
        header_struct_name: metadata.header_struct_name,
        address_offset: parsed.address_offset,
        registers_clusters: Vec::new(),
    };

    graph.element_mut(id).processed = Some(ProcessedElement::Cluster(Box::new(processed)));
    graph.mark_processed(id);
    Ok(())
}

// --- Peripheral ------------------------------------------------------------

fn process_peripheral_node(graph: &mut Graph, id: NodeId) -> Result<(), ResolveError> {
    let path = path_of(graph, id);
    let name = graph.element(id).name.clone();
    let parsed = match &graph.element(id).parsed {
        ParsedElement::Peripheral(p) => (**p).clone(),
        _ => unreachable!(),
    };

    if dim::has_dim(&parsed.dim_element) {
        // Peripherals only ever dim-expand as arrays; list form (bare `%s`)
        // is reserved for Cluster/Register, so list-form gating stays off.
        let instances = dim::expand(&name, &parsed.dim_element, parsed.base_address, false, &path)?;
        let parent = graph.get_element_parent(id).expect("dim node must have a parent");
        graph.element_mut(id).is_dim_template = true;
        for inst in &instances {
            let new_id = graph.replicate_descendants(id, parent);
            let mut clone = parsed.clone();
            clone.base_address = inst.offset;
            clone.name = inst.name.clone();
            clone.dim_element = DimElementGroup::default();
            let node = graph.element_mut(new_id);
            node.name = inst.name.clone();
            node.parsed = ParsedElement::Peripheral(Box::new(clone));
            node.is_dim_template = false;
        }
        return merge_peripheral(graph, id, &parsed);
    }

    merge_peripheral(graph, id, &parsed)
}

fn merge_peripheral(graph: &mut Graph, id: NodeId, parsed: &parsed::Peripheral) -> Result<(), ResolveError> {
    let base = match base_processed(graph, id) {
        Some(ProcessedElement::Peripheral(p)) => Some((**p).clone()),
        _ => None,
    };
    let resolved = processors::peripheral::resolve_properties(&parsed.properties, base.as_ref(), &[]);
    let metadata = processors::peripheral::merge_metadata(parsed, base.as_ref());

    let processed = processed::Peripheral {
        size: resolved.size,
        access: resolved.access,
        protection: resolved.protection,
        reset_value: resolved.reset_value,
        reset_mask: resolved.reset_mask,
        name: parsed.name.clone(),
        version: metadata.version,
        description: metadata.description,
        alternate_peripheral: metadata.alternate_peripheral,
        group_name: metadata.group_name,
        prepend_to_name: metadata.prepend_to_name,
        append_to_name: metadata.append_to_name,
        header_struct_name: parsed.header_struct_name.clone(),
        disable_condition: metadata.disable_condition,
        base_address: metadata.base_address,
        address_blocks: metadata.address_blocks,
        interrupts: metadata.interrupts,
        registers_clusters: Vec::new(),
    };

    graph.element_mut(id).processed = Some(ProcessedElement::Peripheral(Box::new(processed)));
    graph.mark_processed(id);
    Ok(())
}

// --- Bottom-up finalisation --------------------------------------------------

/// Walks the tree post-order (children before parents) so a cluster's size
/// is already folded in by the time its own parent aggregates over it.
/// `bottom_up_node_traversal` hands out only a shared `&Graph`, which isn't
/// enough here since finalisation mutates each node's `processed` value in
/// place, hence the direct recursion instead.
fn finalize(graph: &mut Graph, device_width: u32, warnings: &mut Vec<Warning>) -> Result<(), ResolveError> {
    for id in graph.get_element_children(graph.root) {
        if graph.element(id).is_dim_template {
            continue;
        }
        finalize_subtree(graph, id, device_width, warnings)?;
    }
    Ok(())
}

fn finalize_subtree(graph: &mut Graph, id: NodeId, device_width: u32, warnings: &mut Vec<Warning>) -> Result<(), ResolveError> {
    for child in graph.get_element_children(id) {
        if graph.element(child).is_dim_template {
            continue;
        }
        finalize_subtree(graph, child, device_width, warnings)?;
    }
    finalize_node(graph, id, device_width, warnings)
}

fn finalize_node(graph: &mut Graph, id: NodeId, device_width: u32, warnings: &mut Vec<Warning>) -> Result<(), ResolveError> {
    let level = graph.element(id).level;
    let path = path_of(graph, id);

    match level {
        ElementLevel::Register => {
            let mut fields: Vec<processed::Field> = graph
                .get_element_children(id)
                .into_iter()
                .filter(|&c| !graph.element(c).is_dim_template)
                .filter_map(|c| match &graph.element(c).processed {
                    Some(ProcessedElement::Field(f)) => Some((**f).clone()),
                    _ => None,
                })
                .collect();
            fields.sort_by(|a, b| a.lsb.cmp(&b.lsb).then_with(|| a.name.cmp(&b.name)));

            let base_fields = match base_processed(graph, id) {
                Some(ProcessedElement::Register(r)) => r.fields.clone(),
                _ => Vec::new(),
            };
            processors::register::check_no_self_overlap(&fields, &path)?;
            let merged = processors::register::merge_fields(fields, &base_fields);

            if let Some(ProcessedElement::Register(r)) = &mut graph.element_mut(id).processed {
                let register_size = r.size;
                for field in &merged {
                    if field.msb >= register_size {
                        warnings.push(Warning::FieldOutOfRegisterRange {
                            path: path.clone(),
                            field: field.name.clone(),
                        });
                    }
                }
                r.fields = merged;
                r.size = r.size.max(max_field_extent(&r.fields).unwrap_or(0));
            }
        }
        ElementLevel::Cluster | ElementLevel::Peripheral => {
            let mut items: Vec<processed::RegisterOrCluster> = graph
                .get_element_children(id)
                .into_iter()
                .filter(|&c| !graph.element(c).is_dim_template)
                .filter_map(|c| match &graph.element(c).processed {
                    Some(ProcessedElement::Register(r)) => Some(processed::RegisterOrCluster::Register((**r).clone())),
                    Some(ProcessedElement::Cluster(cl)) => Some(processed::RegisterOrCluster::Cluster((**cl).clone())),
                    _ => None,
                })
                .collect();
            items.sort_by(|a, b| rc_offset(a).cmp(&rc_offset(b)).then_with(|| rc_name(a).cmp(rc_name(b))));

            let base_items = match level {
                ElementLevel::Cluster => match base_processed(graph, id) {
                    Some(ProcessedElement::Cluster(c)) => c.registers_clusters.clone(),
                    _ => Vec::new(),
                },
                _ => match base_processed(graph, id) {
                    Some(ProcessedElement::Peripheral(p)) => p.registers_clusters.clone(),
                    _ => Vec::new(),
                },
            };
            let merged = processors::overlay::merge(items, &base_items);
            processors::overlay::check_overlaps(&merged, &path, warnings)?;

            let own_size = match level {
                ElementLevel::Cluster => match &graph.element(id).processed {
                    Some(ProcessedElement::Cluster(c)) => c.size,
                    _ => None,
                },
                _ => match &graph.element(id).processed {
                    Some(ProcessedElement::Peripheral(p)) => p.size,
                    _ => None,
                },
            };
            let max_child = merged.iter().filter_map(rc_size).max();
            let effective_size = [own_size, max_child].into_iter().flatten().max().or(Some(device_width));

            match &mut graph.element_mut(id).processed {
                Some(ProcessedElement::Cluster(c)) => {
                    c.registers_clusters = merged;
                    c.size = effective_size;
                }
                Some(ProcessedElement::Peripheral(p)) => {
                    p.registers_clusters = merged;
                    p.size = effective_size;
                }
                _ => {}
            }
        }
        ElementLevel::Field | ElementLevel::EnumContainer | ElementLevel::Device => {}
    }

    Ok(())
}

fn max_field_extent(fields: &[processed::Field]) -> Option<u32> {
    fields.iter().map(|f| f.msb + 1).max()
}

fn rc_offset(item: &processed::RegisterOrCluster) -> u64 {
    match item {
        processed::RegisterOrCluster::Register(r) => r.address_offset,
        processed::RegisterOrCluster::Cluster(c) => c.address_offset,
    }
}

fn rc_name(item: &processed::RegisterOrCluster) -> &str {
    match item {
        processed::RegisterOrCluster::Register(r) => &r.name,
        processed::RegisterOrCluster::Cluster(c) => &c.name,
    }
}

fn rc_size(item: &processed::RegisterOrCluster) -> Option<u32> {
    match item {
        processed::RegisterOrCluster::Register(r) => Some(r.size),
        processed::RegisterOrCluster::Cluster(c) => c.size,
    }
}

// --- Final extraction ---------------------------------------------------------

fn extract_device(graph: &Graph, device_width: u32, warnings: &mut Vec<Warning>) -> Result<processed::Device, ResolveError> {
    let root = graph.element(graph.root);
    let ParsedElement::Device(parsed_device) = &root.parsed else {
        unreachable!()
    };

    let mut peripherals: Vec<processed::Peripheral> = graph
        .get_element_children(graph.root)
        .into_iter()
        .filter(|&c| !graph.element(c).is_dim_template)
        .filter_map(|c| match &graph.element(c).processed {
            Some(ProcessedElement::Peripheral(p)) => Some((**p).clone()),
            _ => None,
        })
        .collect();
    peripherals.sort_by(|a, b| a.base_address.cmp(&b.base_address).then_with(|| a.name.cmp(&b.name)));
    processors::peripheral::check_base_address_overlaps(&peripherals, &ElementPath::new(), warnings);

    Ok(processed::Device {
        size: parsed_device.properties.size.or(Some(device_width)),
        access: parsed_device.properties.access,
        protection: parsed_device.properties.protection,
        reset_value: parsed_device.properties.reset_value,
        reset_mask: parsed_device.properties.reset_mask,
        vendor: parsed_device.vendor.clone(),
        vendor_id: parsed_device.vendor_id.clone(),
        name: parsed_device.name.clone(),
        series: parsed_device.series.clone(),
        version: parsed_device.version.clone(),
        description: parsed_device.description.clone(),
        license_text: parsed_device.license_text.clone(),
        cpu: parsed_device.cpu.as_ref().map(convert_cpu),
        header_system_filename: parsed_device.header_system_filename.clone(),
        header_definitions_prefix: parsed_device.header_definitions_prefix.clone(),
        address_unit_bits: parsed_device.address_unit_bits,
        width: parsed_device.width,
        peripherals,
    })
}

fn convert_cpu(cpu: &parsed::Cpu) -> processed::Cpu {
    processed::Cpu {
        name: cpu.name,
        revision: cpu.revision.clone(),
        endian: cpu.endian,
        mpu_present: cpu.mpu_present.unwrap_or(false),
        fpu_present: cpu.fpu_present.unwrap_or(false),
        fpu_dp: cpu.fpu_dp.unwrap_or(false),
        dsp_present: cpu.dsp_present.unwrap_or(false),
        icache_present: cpu.icache_present.unwrap_or(false),
        dcache_present: cpu.dcache_present.unwrap_or(false),
        itcm_present: cpu.itcm_present.unwrap_or(false),
        dtcm_present: cpu.dtcm_present.unwrap_or(false),
        vtor_present: cpu.vtor_present.unwrap_or(true),
        nvic_prio_bits: cpu.nvic_prio_bits,
        vendor_systick_config: cpu.vendor_systick_config,
        device_num_interrupts: cpu.device_num_interrupts,
        sau_num_regions: cpu.sau_num_regions,
        sau_regions_config: cpu.sau_regions_config.as_ref().map(convert_sau_config),
    }
}

fn convert_sau_config(config: &parsed::SauRegionsConfig) -> processed::SauRegionsConfig {
    processed::SauRegionsConfig {
        enabled: config.enabled.unwrap_or(true),
        protection_when_disabled: config.protection_when_disabled.unwrap_or(crate::model::tokens::Protection::Secure),
        regions: config
            .regions
            .iter()
            .map(|r| processed::SauRegion {
                enabled: r.enabled.unwrap_or(true),
                name: r.name.clone(),
                base: r.base,
                limit: r.limit,
                access: r.access,
            })
            .collect(),
    }
}
