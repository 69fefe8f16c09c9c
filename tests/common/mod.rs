use svd_resolve::model::parsed::{self, DimElementGroup, RegisterPropertiesGroup};

pub fn device(peripherals: Vec<parsed::Peripheral>) -> parsed::Device {
    parsed::Device {
        properties: RegisterPropertiesGroup::default(),
        xs_no_namespace_schema_location: None,
        schema_version: "1.3".to_string(),
        vendor: None,
        vendor_id: None,
        name: "TestDevice".to_string(),
        series: None,
        version: "1.0".to_string(),
        description: "test device".to_string(),
        license_text: None,
        cpu: None,
        header_system_filename: None,
        header_definitions_prefix: None,
        address_unit_bits: 8,
        width: 32,
        peripherals,
    }
}

pub fn peripheral(name: &str, base_address: u64) -> parsed::Peripheral {
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

pub fn derived_peripheral(name: &str, base_address: u64, derived_from: &str) -> parsed::Peripheral {
    let mut p = peripheral(name, base_address);
    p.derived_from = Some(derived_from.to_string());
    p
}

pub fn register(name: &str, address_offset: u64) -> parsed::Register {
    parsed::Register {
        dim_element: DimElementGroup::default(),
        properties: RegisterPropertiesGroup::default(),
        name: name.to_string(),
        display_name: None,
        description: None,
        alternate_group: None,
        alternate_register: None,
        address_offset,
        data_type: None,
        modified_write_values: None,
        write_constraint: None,
        read_action: None,
        fields: Vec::new(),
        derived_from: None,
    }
}

pub fn cluster(name: &str, address_offset: u64) -> parsed::Cluster {
    parsed::Cluster {
        dim_element: DimElementGroup::default(),
        properties: RegisterPropertiesGroup::default(),
        name: name.to_string(),
        description: None,
        alternate_cluster: None,
        header_struct_name: None,
        address_offset,
        registers_clusters: Vec::new(),
        derived_from: None,
    }
}

pub fn field(name: &str, bit_offset: u32, bit_width: u32) -> parsed::Field {
    parsed::Field {
        dim_element: DimElementGroup::default(),
        name: name.to_string(),
        description: None,
        bit_offset: Some(bit_offset),
        bit_width: Some(bit_width),
        lsb: None,
        msb: None,
        bit_range: None,
        access: None,
        modified_write_values: None,
        write_constraint: None,
        read_action: None,
        enumerated_value_containers: Vec::new(),
        derived_from: None,
    }
}

pub fn enum_container(usage: Option<svd_resolve::model::tokens::EnumUsage>, values: Vec<parsed::EnumeratedValue>) -> parsed::EnumeratedValueContainer {
    parsed::EnumeratedValueContainer {
        name: None,
        header_enum_name: None,
        usage,
        enumerated_values: values,
        derived_from: None,
    }
}

pub fn enum_value(name: &str, value: &str) -> parsed::EnumeratedValue {
    parsed::EnumeratedValue {
        name: name.to_string(),
        description: None,
        value: Some(value.to_string()),
        is_default: None,
    }
}
