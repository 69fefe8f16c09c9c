mod common;

use svd_resolve::error::ResolveError;
use svd_resolve::model::parsed::RegisterOrCluster as ParsedRegisterOrCluster;
use svd_resolve::resolver;

#[test]
fn register_overlay_via_derive_keeps_unspecified_fields_and_overrides_given_ones() {
    let mut timer1 = common::peripheral("TIMER1", 0x4000_0000);
    let mut cr1 = common::register("CR1", 0x0);
    cr1.fields.push(common::field("EN", 0, 1));
    cr1.fields.push(common::field("DIR", 1, 1));
    timer1.registers_clusters.push(ParsedRegisterOrCluster::Register(cr1));

    let mut timer2 = common::derived_peripheral("TIMER2", 0x4000_1000, "TIMER1");
    let mut cr1_override = common::register("CR1", 0x0);
    cr1_override.description = Some("overridden description".to_string());
    timer2.registers_clusters.push(ParsedRegisterOrCluster::Register(cr1_override));

    let device = common::device(vec![timer1, timer2]);
    let mut warnings = Vec::new();
    let (processed, _log) = resolver::resolve(device, &mut warnings).expect("resolves");

    let timer2 = processed.peripherals.iter().find(|p| p.name == "TIMER2").unwrap();
    assert_eq!(timer2.registers_clusters.len(), 1);
    let svd_resolve::model::processed::RegisterOrCluster::Register(cr1) = &timer2.registers_clusters[0] else {
        panic!("expected a register");
    };
    assert_eq!(cr1.description.as_deref(), Some("overridden description"));
}

#[test]
fn self_derivation_is_a_fatal_error() {
    let adc = common::derived_peripheral("ADC1", 0x4000_0000, "ADC1");
    let device = common::device(vec![adc]);
    let mut warnings = Vec::new();

    let err = resolver::resolve(device, &mut warnings).expect_err("must fail");
    assert!(matches!(err, ResolveError::SelfDerivation { .. }));
}

#[test]
fn derivation_cycle_is_a_fatal_error() {
    let a = common::derived_peripheral("A", 0x1000, "B");
    let b = common::derived_peripheral("B", 0x2000, "A");
    let device = common::device(vec![a, b]);
    let mut warnings = Vec::new();

    let err = resolver::resolve(device, &mut warnings).expect_err("must fail");
    assert!(matches!(err, ResolveError::ResolveCycle { .. }));
}

#[test]
fn unresolved_derivation_target_is_a_fatal_error() {
    let adc = common::derived_peripheral("ADC1", 0x4000_0000, "DOES_NOT_EXIST");
    let device = common::device(vec![adc]);
    let mut warnings = Vec::new();

    let err = resolver::resolve(device, &mut warnings).expect_err("must fail");
    assert!(matches!(err, ResolveError::UnresolvedDerivation { .. }));
}

#[test]
fn register_properties_inherit_down_the_chain_when_register_leaves_them_unset() {
    let mut peripheral = common::peripheral("FLASH", 0x4002_0000);
    peripheral.properties.size = Some(32);
    peripheral.properties.reset_value = Some(0);

    let mut register = common::register("ACR", 0x0);
    register.fields.push(common::field("LATENCY", 0, 3));
    peripheral.registers_clusters.push(ParsedRegisterOrCluster::Register(register));

    let device = common::device(vec![peripheral]);
    let mut warnings = Vec::new();
    let (processed, _log) = resolver::resolve(device, &mut warnings).expect("resolves");

    let svd_resolve::model::processed::RegisterOrCluster::Register(acr) = &processed.peripherals[0].registers_clusters[0] else {
        panic!("expected a register");
    };
    assert_eq!(acr.size, 32);
    assert_eq!(acr.reset_value, 0);
}

#[test]
fn cluster_derivation_carries_its_register_tree() {
    let mut peripheral = common::peripheral("TIMER", 0x4000_0000);
    let mut channel1 = common::cluster("CHANNEL1", 0x0);
    channel1.registers_clusters.push(ParsedRegisterOrCluster::Register(common::register("CCR", 0x0)));
    peripheral.registers_clusters.push(ParsedRegisterOrCluster::Cluster(channel1));

    let mut channel2 = common::cluster("CHANNEL2", 0x10);
    channel2.derived_from = Some("CHANNEL1".to_string());
    peripheral.registers_clusters.push(ParsedRegisterOrCluster::Cluster(channel2));

    let device = common::device(vec![peripheral]);
    let mut warnings = Vec::new();
    let (processed, _log) = resolver::resolve(device, &mut warnings).expect("resolves");

    let peripheral = &processed.peripherals[0];
    let channel2 = peripheral
        .registers_clusters
        .iter()
        .find_map(|rc| match rc {
            svd_resolve::model::processed::RegisterOrCluster::Cluster(c) if c.name == "CHANNEL2" => Some(c),
            _ => None,
        })
        .expect("CHANNEL2 present");
    assert_eq!(channel2.registers_clusters.len(), 1);
}
