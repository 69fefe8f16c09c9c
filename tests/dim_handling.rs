mod common;

use svd_resolve::model::parsed::{DimArrayIndex, DimElementGroup, RegisterOrCluster as ParsedRegisterOrCluster};
use svd_resolve::model::processed::RegisterOrCluster;
use svd_resolve::resolver;

#[test]
fn dim_array_register_expands_into_named_offset_instances() {
    let mut peripheral = common::peripheral("GPIOA", 0x4800_0000);
    let mut pins = common::register("PIN[%s]", 0x0);
    pins.dim_element = DimElementGroup {
        dim: Some(4),
        dim_increment: Some(4),
        dim_index: None,
        dim_name: None,
        dim_array_index: None,
    };
    pins.fields.push(common::field("VALUE", 0, 1));
    peripheral.registers_clusters.push(ParsedRegisterOrCluster::Register(pins));

    let device = common::device(vec![peripheral]);
    let mut warnings = Vec::new();
    let (processed, _log) = resolver::resolve(device, &mut warnings).expect("resolves");

    let registers: Vec<_> = processed.peripherals[0]
        .registers_clusters
        .iter()
        .map(|rc| match rc {
            RegisterOrCluster::Register(r) => (r.name.clone(), r.address_offset),
            RegisterOrCluster::Cluster(_) => panic!("expected only registers"),
        })
        .collect();

    assert_eq!(
        registers,
        vec![
            ("PIN0".to_string(), 0),
            ("PIN1".to_string(), 4),
            ("PIN2".to_string(), 8),
            ("PIN3".to_string(), 12),
        ]
    );
}

#[test]
fn dim_list_form_is_accepted_on_registers_but_not_peripherals() {
    let mut peripheral = common::peripheral("ADC", 0x4000_0000);
    let mut channel = common::register("Ch%sResult", 0x0);
    channel.dim_element = DimElementGroup {
        dim: Some(2),
        dim_increment: Some(4),
        dim_index: Some("A-B".to_string()),
        dim_name: None,
        dim_array_index: None,
    };
    peripheral.registers_clusters.push(ParsedRegisterOrCluster::Register(channel));

    let device = common::device(vec![peripheral]);
    let mut warnings = Vec::new();
    let (processed, _log) = resolver::resolve(device, &mut warnings).expect("resolves");

    let names: Vec<_> = processed.peripherals[0]
        .registers_clusters
        .iter()
        .map(|rc| match rc {
            RegisterOrCluster::Register(r) => r.name.clone(),
            RegisterOrCluster::Cluster(c) => c.name.clone(),
        })
        .collect();
    assert_eq!(names, vec!["ChAResult", "ChBResult"]);
}

#[test]
fn dim_list_form_is_rejected_on_peripherals() {
    let mut peripheral = common::peripheral("UART%s", 0x4000_0000);
    peripheral.dim_element = DimElementGroup {
        dim: Some(2),
        dim_increment: Some(0x400),
        dim_index: None,
        dim_name: None,
        dim_array_index: None,
    };

    let device = common::device(vec![peripheral]);
    let mut warnings = Vec::new();
    let result = resolver::resolve(device, &mut warnings);
    assert!(result.is_err());
}

#[test]
fn dim_on_a_field_is_rejected() {
    let mut peripheral = common::peripheral("GPIOA", 0x4800_0000);
    let mut register = common::register("MODER", 0x0);
    let mut mode = common::field("MODE[%s]", 0, 2);
    mode.dim_element = DimElementGroup {
        dim: Some(2),
        dim_increment: Some(2),
        dim_index: None,
        dim_name: None,
        dim_array_index: None,
    };
    register.fields.push(mode);
    peripheral.registers_clusters.push(ParsedRegisterOrCluster::Register(register));

    let device = common::device(vec![peripheral]);
    let mut warnings = Vec::new();
    let result = resolver::resolve(device, &mut warnings);
    assert!(result.is_err());
}

#[test]
fn dim_array_index_supplies_per_instance_enum_header_names() {
    let mut peripheral = common::peripheral("DMA", 0x4001_0000);
    let mut stream = common::register("STREAM[%s]", 0x0);
    stream.dim_element = DimElementGroup {
        dim: Some(2),
        dim_increment: Some(0x10),
        dim_index: None,
        dim_name: None,
        dim_array_index: Some(DimArrayIndex {
            header_enum_name: Some("DmaStream".to_string()),
            enumerated_values: Vec::new(),
        }),
    };
    peripheral.registers_clusters.push(ParsedRegisterOrCluster::Register(stream));

    let device = common::device(vec![peripheral]);
    let mut warnings = Vec::new();
    let (processed, _log) = resolver::resolve(device, &mut warnings).expect("resolves");

    assert_eq!(processed.peripherals[0].registers_clusters.len(), 2);
}
