mod common;

use svd_resolve::error::ResolveError;
use svd_resolve::model::parsed::RegisterOrCluster as ParsedRegisterOrCluster;
use svd_resolve::model::tokens::EnumUsage;
use svd_resolve::resolver;

#[test]
fn wildcard_enumerated_value_expands_into_named_concretizations() {
    let mut peripheral = common::peripheral("ADC", 0x4000_0000);
    let mut register = common::register("SR", 0x0);
    let mut field = common::field("FLAGS", 0, 2);
    let mut container = common::enum_container(None, vec![common::enum_value("Any", "0bx1")]);
    container.name = Some("AnyFlags".to_string());
    field.enumerated_value_containers.push(container);
    register.fields.push(field);
    peripheral.registers_clusters.push(ParsedRegisterOrCluster::Register(register));

    let device = common::device(vec![peripheral]);
    let mut warnings = Vec::new();
    let (processed, _log) = resolver::resolve(device, &mut warnings).expect("resolves");

    let svd_resolve::model::processed::RegisterOrCluster::Register(sr) = &processed.peripherals[0].registers_clusters[0] else {
        panic!("expected a register");
    };
    let container = &sr.fields[0].enumerated_value_containers[0];
    assert_eq!(container.usage, EnumUsage::ReadWrite);

    let names: Vec<_> = container.enumerated_values.iter().map(|v| v.name.clone()).collect();
    assert_eq!(names, vec!["Any_1", "Any_3"]);
    let values: Vec<_> = container.enumerated_values.iter().map(|v| v.value).collect();
    assert_eq!(values, vec![Some(1), Some(3)]);
}

#[test]
fn read_and_write_usage_pair_coexist_on_one_field() {
    let mut peripheral = common::peripheral("ADC", 0x4000_0000);
    let mut register = common::register("CR", 0x0);
    let mut field = common::field("MODE", 0, 1);
    field.enumerated_value_containers.push(common::enum_container(
        Some(EnumUsage::Read),
        vec![common::enum_value("Idle", "0"), common::enum_value("Busy", "1")],
    ));
    field.enumerated_value_containers.push(common::enum_container(
        Some(EnumUsage::Write),
        vec![common::enum_value("Start", "1")],
    ));
    register.fields.push(field);
    peripheral.registers_clusters.push(ParsedRegisterOrCluster::Register(register));

    let device = common::device(vec![peripheral]);
    let mut warnings = Vec::new();
    let (processed, _log) = resolver::resolve(device, &mut warnings).expect("resolves");

    let svd_resolve::model::processed::RegisterOrCluster::Register(cr) = &processed.peripherals[0].registers_clusters[0] else {
        panic!("expected a register");
    };
    assert_eq!(cr.fields[0].enumerated_value_containers.len(), 2);
}

#[test]
fn two_read_write_containers_on_one_field_is_a_usage_conflict() {
    let mut peripheral = common::peripheral("ADC", 0x4000_0000);
    let mut register = common::register("CR", 0x0);
    let mut field = common::field("MODE", 0, 1);
    field.enumerated_value_containers.push(common::enum_container(
        Some(EnumUsage::ReadWrite),
        vec![common::enum_value("Idle", "0")],
    ));
    field.enumerated_value_containers.push(common::enum_container(
        Some(EnumUsage::ReadWrite),
        vec![common::enum_value("Busy", "1")],
    ));
    register.fields.push(field);
    peripheral.registers_clusters.push(ParsedRegisterOrCluster::Register(register));

    let device = common::device(vec![peripheral]);
    let mut warnings = Vec::new();
    let err = resolver::resolve(device, &mut warnings).expect_err("must fail");
    assert!(matches!(err, ResolveError::EnumUsageConflict { .. }));
}

#[test]
fn duplicate_enumerated_value_literal_is_rejected() {
    let mut peripheral = common::peripheral("ADC", 0x4000_0000);
    let mut register = common::register("CR", 0x0);
    let mut field = common::field("MODE", 0, 1);
    field.enumerated_value_containers.push(common::enum_container(
        None,
        vec![common::enum_value("A", "1"), common::enum_value("B", "1")],
    ));
    register.fields.push(field);
    peripheral.registers_clusters.push(ParsedRegisterOrCluster::Register(register));

    let device = common::device(vec![peripheral]);
    let mut warnings = Vec::new();
    let err = resolver::resolve(device, &mut warnings).expect_err("must fail");
    assert!(matches!(err, ResolveError::DuplicateEnumValue { .. }));
}
