//! Constructs a fresh [`Graph`] from a parsed [`model::parsed::Device`].
//!
//! Mirrors the containment structure of the parsed tree one-for-one: every
//! Peripheral, Cluster, Register, Field and EnumeratedValueContainer becomes
//! an Element node, wired under its structural parent.

use crate::graph::{Graph, NodeId, ParsedElement};
use crate::model::parsed;

pub fn build(device: parsed::Device) -> Graph {
    let peripherals = device.peripherals.clone();
    let mut graph = Graph::new(ParsedElement::Device(Box::new(device)));

    for peripheral in peripherals {
        add_peripheral(&mut graph, graph.root, peripheral);
    }

    graph
}

fn add_peripheral(graph: &mut Graph, device: NodeId, peripheral: parsed::Peripheral) {
    let registers_clusters = peripheral.registers_clusters.clone();
    let node = graph.add_element_child(device, ParsedElement::Peripheral(Box::new(peripheral)));
    for rc in registers_clusters {
        add_register_or_cluster(graph, node, rc);
    }
}

fn add_register_or_cluster(graph: &mut Graph, parent: NodeId, rc: parsed::RegisterOrCluster) {
    match rc {
        parsed::RegisterOrCluster::Register(register) => add_register(graph, parent, register),
        parsed::RegisterOrCluster::Cluster(cluster) => add_cluster(graph, parent, cluster),
    }
}

fn add_cluster(graph: &mut Graph, parent: NodeId, cluster: parsed::Cluster) {
    let children = cluster.registers_clusters.clone();
    let node = graph.add_element_child(parent, ParsedElement::Cluster(Box::new(cluster)));
    for rc in children {
        add_register_or_cluster(graph, node, rc);
    }
}

fn add_register(graph: &mut Graph, parent: NodeId, register: parsed::Register) {
    let fields = register.fields.clone();
    let node = graph.add_element_child(parent, ParsedElement::Register(Box::new(register)));
    for field in fields {
        add_field(graph, node, field);
    }
}

fn add_field(graph: &mut Graph, parent: NodeId, field: parsed::Field) {
    let containers = field.enumerated_value_containers.clone();
    let node = graph.add_element_child(parent, ParsedElement::Field(Box::new(field)));
    for container in containers {
        graph.add_element_child(node, ParsedElement::EnumContainer(Box::new(container)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parsed::{DimElementGroup, RegisterPropertiesGroup};

    fn minimal_device(peripherals: Vec<parsed::Peripheral>) -> parsed::Device {
        parsed::Device {
            properties: RegisterPropertiesGroup::default(),
            xs_no_namespace_schema_location: None,
            schema_version: "1.3".to_string(),
            vendor: None,
            vendor_id: None,
            name: "TestDevice".to_string(),
            series: None,
            version: "1.0".to_string(),
            description: "test".to_string(),
            license_text: None,
            cpu: None,
            header_system_filename: None,
            header_definitions_prefix: None,
            address_unit_bits: 8,
            width: 32,
            peripherals,
        }
    }

    fn minimal_peripheral(name: &str, base_address: u64) -> parsed::Peripheral {
        parsed::Peripheral {
            dim_element: DimElementGroup::default(),
            properties: RegisterPropertiesGroup::default(),
            name: name.to_string(),
            version: None,
            description: None,
            alternate_peripheral: None,
            group_name: None,
            prepend_to_name: None,
            append_to_name: None,
            header_struct_name: None,
            disable_condition: None,
            base_address,
            address_blocks: Vec::new(),
            interrupts: Vec::new(),
            registers_clusters: Vec::new(),
            derived_from: None,
        }
    }

    #[test]
    fn builds_one_node_per_peripheral() {
        let device = minimal_device(vec![minimal_peripheral("ADC1", 0x4000_1000), minimal_peripheral("ADC2", 0x4000_2000)]);
        let graph = build(device);
        assert_eq!(graph.get_element_children(graph.root).len(), 2);
    }
}
