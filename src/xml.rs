//! XML ingestion: deserializes a CMSIS-SVD document into raw, string-typed
//! shadow structs via `quick-xml`/`serde`, then converts those into the
//! parsed tree ([`crate::model::parsed`]), turning closed-vocabulary tokens
//! and numeric literals into their typed forms as it goes.
//!
//! Schema validation proper (attribute cardinality, `xs:` types) is left to
//! the CMSIS-SVD schema itself; this layer only needs to get a well-formed
//! document into [`parsed::Device`] or fail with a [`ParseError`].
//!
//! `dim`/`dimIncrement`/... and the register-properties group are shared
//! across several elements in the schema, but always appear as direct child
//! elements rather than a nested wrapper, so the raw structs below repeat
//! those fields inline rather than leaning on `#[serde(flatten)]`.

use std::io::Read;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::{numbers, str_utils};
use crate::error::{ElementPath, ParseError, Warning};
use crate::model::parsed;
use crate::model::tokens::{Access, AddressBlockUsage, CpuName, DataType, Endian, EnumUsage, ModifiedWriteValues, Protection, ReadAction, SauAccess};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct DimArrayIndexXml {
    header_enum_name: Option<String>,
    #[serde(default, rename = "enumeratedValue")]
    enumerated_value: Vec<EnumeratedValueXml>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct EnumeratedValueXml {
    name: String,
    description: Option<String>,
    value: Option<String>,
    is_default: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct EnumeratedValuesXml {
    name: Option<String>,
    header_enum_name: Option<String>,
    usage: Option<String>,
    #[serde(default, rename = "enumeratedValue")]
    enumerated_value: Vec<EnumeratedValueXml>,
    derived_from: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct WriteConstraintRangeXml {
    minimum: String,
    maximum: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct WriteConstraintXml {
    write_as_read: Option<String>,
    use_enumerated_values: Option<String>,
    range: Option<WriteConstraintRangeXml>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct FieldXml {
    name: String,
    description: Option<String>,
    // dim group
    dim: Option<u32>,
    dim_increment: Option<String>,
    dim_index: Option<String>,
    dim_name: Option<String>,
    dim_array_index: Option<DimArrayIndexXml>,
    // bit range (one of three forms)
    bit_offset: Option<String>,
    bit_width: Option<String>,
    lsb: Option<String>,
    msb: Option<String>,
    bit_range: Option<String>,
    access: Option<String>,
    modified_write_values: Option<String>,
    write_constraint: Option<WriteConstraintXml>,
    read_action: Option<String>,
    #[serde(default, rename = "enumeratedValues")]
    enumerated_values: Vec<EnumeratedValuesXml>,
    derived_from: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct FieldsXml {
    #[serde(default, rename = "field")]
    field: Vec<FieldXml>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RegisterXml {
    name: String,
    dim: Option<u32>,
    dim_increment: Option<String>,
    dim_index: Option<String>,
    dim_name: Option<String>,
    dim_array_index: Option<DimArrayIndexXml>,
    size: Option<String>,
    access: Option<String>,
    protection: Option<String>,
    reset_value: Option<String>,
    reset_mask: Option<String>,
    display_name: Option<String>,
    description: Option<String>,
    alternate_group: Option<String>,
    alternate_register: Option<String>,
    address_offset: String,
    data_type: Option<String>,
    modified_write_values: Option<String>,
    write_constraint: Option<WriteConstraintXml>,
    read_action: Option<String>,
    fields: Option<FieldsXml>,
    derived_from: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ClusterXml {
    name: String,
    dim: Option<u32>,
    dim_increment: Option<String>,
    dim_index: Option<String>,
    dim_name: Option<String>,
    dim_array_index: Option<DimArrayIndexXml>,
    size: Option<String>,
    access: Option<String>,
    protection: Option<String>,
    reset_value: Option<String>,
    reset_mask: Option<String>,
    description: Option<String>,
    alternate_cluster: Option<String>,
    header_struct_name: Option<String>,
    address_offset: String,
    #[serde(default, rename = "register")]
    register: Vec<RegisterXml>,
    #[serde(default, rename = "cluster")]
    cluster: Vec<ClusterXml>,
    derived_from: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct RegistersXml {
    #[serde(default, rename = "register")]
    register: Vec<RegisterXml>,
    #[serde(default, rename = "cluster")]
    cluster: Vec<ClusterXml>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AddressBlockXml {
    offset: String,
    size: String,
    usage: String,
    protection: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct InterruptXml {
    name: String,
    description: Option<String>,
    value: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PeripheralXml {
    name: String,
    dim: Option<u32>,
    dim_increment: Option<String>,
    dim_index: Option<String>,
    dim_name: Option<String>,
    dim_array_index: Option<DimArrayIndexXml>,
    size: Option<String>,
    access: Option<String>,
    protection: Option<String>,
    reset_value: Option<String>,
    reset_mask: Option<String>,
    version: Option<String>,
    description: Option<String>,
    alternate_peripheral: Option<String>,
    group_name: Option<String>,
    prepend_to_name: Option<String>,
    append_to_name: Option<String>,
    header_struct_name: Option<String>,
    disable_condition: Option<String>,
    base_address: String,
    #[serde(default, rename = "addressBlock")]
    address_block: Vec<AddressBlockXml>,
    #[serde(default, rename = "interrupt")]
    interrupt: Vec<InterruptXml>,
    registers: Option<RegistersXml>,
    derived_from: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PeripheralsXml {
    #[serde(rename = "peripheral")]
    peripheral: Vec<PeripheralXml>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SauRegionXml {
    enabled: Option<String>,
    name: Option<String>,
    base: String,
    limit: String,
    access: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SauRegionsConfigXml {
    enabled: Option<String>,
    protection_when_disabled: Option<String>,
    #[serde(default, rename = "region")]
    region: Vec<SauRegionXml>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CpuXml {
    name: String,
    revision: String,
    endian: String,
    mpu_present: Option<String>,
    fpu_present: Option<String>,
    fpu_dp: Option<String>,
    dsp_present: Option<String>,
    icache_present: Option<String>,
    dcache_present: Option<String>,
    itcm_present: Option<String>,
    dtcm_present: Option<String>,
    vtor_present: Option<String>,
    nvic_prio_bits: String,
    vendor_systick_config: String,
    device_num_interrupts: Option<String>,
    sau_num_regions: Option<String>,
    sau_regions_config: Option<SauRegionsConfigXml>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct DeviceXml {
    #[serde(rename = "@xs:noNamespaceSchemaLocation")]
    xs_no_namespace_schema_location: Option<String>,
    #[serde(rename = "@schemaVersion")]
    schema_version: String,
    size: Option<String>,
    access: Option<String>,
    protection: Option<String>,
    reset_value: Option<String>,
    reset_mask: Option<String>,
    vendor: Option<String>,
    vendor_id: Option<String>,
    name: String,
    series: Option<String>,
    version: String,
    description: String,
    license_text: Option<String>,
    cpu: Option<CpuXml>,
    header_system_filename: Option<String>,
    header_definitions_prefix: Option<String>,
    address_unit_bits: String,
    width: String,
    peripherals: PeripheralsXml,
}

/// Parses a CMSIS-SVD document into the resolver's parsed tree.
///
/// Legacy `access` spellings (`read`/`write`) are accepted and mapped to
/// `read-only`/`write-only`, each reported via a pushed
/// [`Warning::LegacyAccessToken`].
///
/// Use [`crate::resolver::resolve`] on the result to get a processed device.
pub fn parse_device<R: Read>(source: R, warnings: &mut Vec<Warning>) -> Result<parsed::Device, ParseError> {
    let raw: DeviceXml = quick_xml::de::from_reader(std::io::BufReader::new(source))?;
    convert_device(raw, warnings)
}

pub fn parse_device_str(source: &str, warnings: &mut Vec<Warning>) -> Result<parsed::Device, ParseError> {
    let raw: DeviceXml = quick_xml::de::from_str(source)?;
    convert_device(raw, warnings)
}

fn required_int(src: &str) -> Result<u64, ParseError> {
    numbers::parse_int(src)
}

fn opt_int(src: &Option<String>) -> Result<Option<u64>, ParseError> {
    src.as_deref().map(numbers::parse_int).transpose()
}

fn opt_bool(src: &Option<String>) -> Result<Option<bool>, ParseError> {
    src.as_deref().map(numbers::parse_bool).transpose()
}

fn opt_token<T: FromStr<Err = ParseError>>(src: &Option<String>) -> Result<Option<T>, ParseError> {
    src.as_deref().map(T::from_str).transpose()
}

/// Like [`opt_token`] for [`Access`], but also reports legacy `read`/`write`
/// spellings via a pushed [`Warning::LegacyAccessToken`].
fn opt_access(src: &Option<String>, path: &ElementPath, warnings: &mut Vec<Warning>) -> Result<Option<Access>, ParseError> {
    let Some(token) = src else { return Ok(None) };
    let (access, is_legacy) = Access::parse_legacy(token)?;
    if is_legacy {
        warnings.push(Warning::LegacyAccessToken {
            path: path.clone(),
            token: token.clone(),
        });
    }
    Ok(Some(access))
}

fn opt_desc(src: Option<String>) -> Option<String> {
    src.map(|d| str_utils::get_description(&Some(d))).filter(|d| !d.is_empty())
}

fn convert_dim_array_index(raw: DimArrayIndexXml) -> Result<parsed::DimArrayIndex, ParseError> {
    Ok(parsed::DimArrayIndex {
        header_enum_name: raw.header_enum_name,
        enumerated_values: raw.enumerated_value.into_iter().map(convert_enumerated_value).collect::<Result<_, _>>()?,
    })
}

fn convert_properties(
    size: &Option<String>,
    access: &Option<String>,
    protection: &Option<String>,
    reset_value: &Option<String>,
    reset_mask: &Option<String>,
    path: &ElementPath,
    warnings: &mut Vec<Warning>,
) -> Result<parsed::RegisterPropertiesGroup, ParseError> {
    Ok(parsed::RegisterPropertiesGroup {
        size: opt_int(size)?.map(|v| v as u32),
        access: opt_access(access, path, warnings)?,
        protection: opt_token::<Protection>(protection)?,
        reset_value: opt_int(reset_value)?,
        reset_mask: opt_int(reset_mask)?,
    })
}

fn convert_enumerated_value(raw: EnumeratedValueXml) -> Result<parsed::EnumeratedValue, ParseError> {
    Ok(parsed::EnumeratedValue {
        name: raw.name,
        description: opt_desc(raw.description),
        value: raw.value,
        is_default: opt_bool(&raw.is_default)?,
    })
}

fn convert_enumerated_values(raw: EnumeratedValuesXml) -> Result<parsed::EnumeratedValueContainer, ParseError> {
    Ok(parsed::EnumeratedValueContainer {
        name: raw.name,
        header_enum_name: raw.header_enum_name,
        usage: opt_token::<EnumUsage>(&raw.usage)?,
        enumerated_values: raw.enumerated_value.into_iter().map(convert_enumerated_value).collect::<Result<_, _>>()?,
        derived_from: raw.derived_from,
    })
}

fn convert_write_constraint(raw: WriteConstraintXml) -> Result<parsed::WriteConstraint, ParseError> {
    let range = raw
        .range
        .map(|r| -> Result<(u64, u64), ParseError> { Ok((numbers::parse_int(&r.minimum)?, numbers::parse_int(&r.maximum)?)) })
        .transpose()?;
    Ok(parsed::WriteConstraint {
        write_as_read: opt_bool(&raw.write_as_read)?,
        use_enumerated_values: opt_bool(&raw.use_enumerated_values)?,
        range,
    })
}

fn convert_field(raw: FieldXml, path: &ElementPath, warnings: &mut Vec<Warning>) -> Result<parsed::Field, ParseError> {
    let field_path = path.child(raw.name.clone());
    Ok(parsed::Field {
        dim_element: parsed::DimElementGroup {
            dim: raw.dim,
            dim_increment: opt_int(&raw.dim_increment)?,
            dim_index: raw.dim_index,
            dim_name: raw.dim_name,
            dim_array_index: raw.dim_array_index.map(convert_dim_array_index).transpose()?,
        },
        name: raw.name,
        description: opt_desc(raw.description),
        bit_offset: opt_int(&raw.bit_offset)?.map(|v| v as u32),
        bit_width: opt_int(&raw.bit_width)?.map(|v| v as u32),
        lsb: opt_int(&raw.lsb)?.map(|v| v as u32),
        msb: opt_int(&raw.msb)?.map(|v| v as u32),
        bit_range: raw.bit_range,
        access: opt_access(&raw.access, &field_path, warnings)?,
        modified_write_values: opt_token::<ModifiedWriteValues>(&raw.modified_write_values)?,
        write_constraint: raw.write_constraint.map(convert_write_constraint).transpose()?,
        read_action: opt_token::<ReadAction>(&raw.read_action)?,
        enumerated_value_containers: raw.enumerated_values.into_iter().map(convert_enumerated_values).collect::<Result<_, _>>()?,
        derived_from: raw.derived_from,
    })
}

fn convert_register(raw: RegisterXml, path: &ElementPath, warnings: &mut Vec<Warning>) -> Result<parsed::Register, ParseError> {
    let reg_path = path.child(raw.name.clone());
    let properties = convert_properties(&raw.size, &raw.access, &raw.protection, &raw.reset_value, &raw.reset_mask, &reg_path, warnings)?;
    let fields = raw.fields.map(|f| f.field).unwrap_or_default();
    let mut converted_fields = Vec::with_capacity(fields.len());
    for f in fields {
        converted_fields.push(convert_field(f, &reg_path, warnings)?);
    }
    Ok(parsed::Register {
        dim_element: parsed::DimElementGroup {
            dim: raw.dim,
            dim_increment: opt_int(&raw.dim_increment)?,
            dim_index: raw.dim_index,
            dim_name: raw.dim_name,
            dim_array_index: raw.dim_array_index.map(convert_dim_array_index).transpose()?,
        },
        properties,
        name: raw.name,
        display_name: raw.display_name,
        description: opt_desc(raw.description),
        alternate_group: raw.alternate_group,
        alternate_register: raw.alternate_register,
        address_offset: required_int(&raw.address_offset)?,
        data_type: opt_token::<DataType>(&raw.data_type)?,
        modified_write_values: opt_token::<ModifiedWriteValues>(&raw.modified_write_values)?,
        write_constraint: raw.write_constraint.map(convert_write_constraint).transpose()?,
        read_action: opt_token::<ReadAction>(&raw.read_action)?,
        fields: converted_fields,
        derived_from: raw.derived_from,
    })
}

fn convert_cluster(raw: ClusterXml, path: &ElementPath, warnings: &mut Vec<Warning>) -> Result<parsed::Cluster, ParseError> {
    let cluster_path = path.child(raw.name.clone());
    let properties = convert_properties(&raw.size, &raw.access, &raw.protection, &raw.reset_value, &raw.reset_mask, &cluster_path, warnings)?;
    let mut registers_clusters = Vec::with_capacity(raw.register.len() + raw.cluster.len());
    for r in raw.register {
        registers_clusters.push(parsed::RegisterOrCluster::Register(convert_register(r, &cluster_path, warnings)?));
    }
    for c in raw.cluster {
        registers_clusters.push(parsed::RegisterOrCluster::Cluster(convert_cluster(c, &cluster_path, warnings)?));
    }
    Ok(parsed::Cluster {
        dim_element: parsed::DimElementGroup {
            dim: raw.dim,
            dim_increment: opt_int(&raw.dim_increment)?,
            dim_index: raw.dim_index,
            dim_name: raw.dim_name,
            dim_array_index: raw.dim_array_index.map(convert_dim_array_index).transpose()?,
        },
        properties,
        name: raw.name,
        description: opt_desc(raw.description),
        alternate_cluster: raw.alternate_cluster,
        header_struct_name: raw.header_struct_name,
        address_offset: required_int(&raw.address_offset)?,
        registers_clusters,
        derived_from: raw.derived_from,
    })
}

fn convert_address_block(raw: AddressBlockXml) -> Result<parsed::AddressBlock, ParseError> {
    Ok(parsed::AddressBlock {
        offset: required_int(&raw.offset)?,
        size: required_int(&raw.size)?,
        usage: AddressBlockUsage::from_str(&raw.usage)?,
        protection: opt_token::<Protection>(&raw.protection)?,
    })
}

fn convert_interrupt(raw: InterruptXml) -> Result<parsed::Interrupt, ParseError> {
    Ok(parsed::Interrupt {
        name: raw.name,
        description: opt_desc(raw.description),
        value: required_int(&raw.value)? as u32,
    })
}

fn convert_peripheral(raw: PeripheralXml, path: &ElementPath, warnings: &mut Vec<Warning>) -> Result<parsed::Peripheral, ParseError> {
    let periph_path = path.child(raw.name.clone());
    let properties = convert_properties(&raw.size, &raw.access, &raw.protection, &raw.reset_value, &raw.reset_mask, &periph_path, warnings)?;
    let (registers, clusters) = raw.registers.map(|r| (r.register, r.cluster)).unwrap_or_default();
    let mut registers_clusters = Vec::with_capacity(registers.len() + clusters.len());
    for r in registers {
        registers_clusters.push(parsed::RegisterOrCluster::Register(convert_register(r, &periph_path, warnings)?));
    }
    for c in clusters {
        registers_clusters.push(parsed::RegisterOrCluster::Cluster(convert_cluster(c, &periph_path, warnings)?));
    }
    Ok(parsed::Peripheral {
        dim_element: parsed::DimElementGroup {
            dim: raw.dim,
            dim_increment: opt_int(&raw.dim_increment)?,
            dim_index: raw.dim_index,
            dim_name: raw.dim_name,
            dim_array_index: raw.dim_array_index.map(convert_dim_array_index).transpose()?,
        },
        properties,
        name: raw.name,
        version: raw.version,
        description: opt_desc(raw.description),
        alternate_peripheral: raw.alternate_peripheral,
        group_name: raw.group_name,
        prepend_to_name: raw.prepend_to_name,
        append_to_name: raw.append_to_name,
        header_struct_name: raw.header_struct_name,
        disable_condition: raw.disable_condition,
        base_address: required_int(&raw.base_address)?,
        address_blocks: raw.address_block.into_iter().map(convert_address_block).collect::<Result<_, _>>()?,
        interrupts: raw.interrupt.into_iter().map(convert_interrupt).collect::<Result<_, _>>()?,
        registers_clusters,
        derived_from: raw.derived_from,
    })
}

fn convert_sau_region(raw: SauRegionXml) -> Result<parsed::SauRegion, ParseError> {
    Ok(parsed::SauRegion {
        enabled: opt_bool(&raw.enabled)?,
        name: raw.name,
        base: required_int(&raw.base)?,
        limit: required_int(&raw.limit)?,
        access: SauAccess::from_str(&raw.access)?,
    })
}

fn convert_sau_regions_config(raw: SauRegionsConfigXml) -> Result<parsed::SauRegionsConfig, ParseError> {
    Ok(parsed::SauRegionsConfig {
        enabled: opt_bool(&raw.enabled)?,
        protection_when_disabled: opt_token::<Protection>(&raw.protection_when_disabled)?,
        regions: raw.region.into_iter().map(convert_sau_region).collect::<Result<_, _>>()?,
    })
}

fn convert_cpu(raw: CpuXml) -> Result<parsed::Cpu, ParseError> {
    Ok(parsed::Cpu {
        name: CpuName::from_str(&raw.name)?,
        revision: raw.revision,
        endian: Endian::from_str(&raw.endian)?,
        mpu_present: opt_bool(&raw.mpu_present)?,
        fpu_present: opt_bool(&raw.fpu_present)?,
        fpu_dp: opt_bool(&raw.fpu_dp)?,
        dsp_present: opt_bool(&raw.dsp_present)?,
        icache_present: opt_bool(&raw.icache_present)?,
        dcache_present: opt_bool(&raw.dcache_present)?,
        itcm_present: opt_bool(&raw.itcm_present)?,
        dtcm_present: opt_bool(&raw.dtcm_present)?,
        vtor_present: opt_bool(&raw.vtor_present)?,
        nvic_prio_bits: required_int(&raw.nvic_prio_bits)? as u32,
        vendor_systick_config: numbers::parse_bool(&raw.vendor_systick_config)?,
        device_num_interrupts: opt_int(&raw.device_num_interrupts)?.map(|v| v as u32),
        sau_num_regions: opt_int(&raw.sau_num_regions)?.map(|v| v as u32),
        sau_regions_config: raw.sau_regions_config.map(convert_sau_regions_config).transpose()?,
    })
}

fn convert_device(raw: DeviceXml, warnings: &mut Vec<Warning>) -> Result<parsed::Device, ParseError> {
    let root = ElementPath::new();
    let properties = convert_properties(&raw.size, &raw.access, &raw.protection, &raw.reset_value, &raw.reset_mask, &root, warnings)?;
    let mut peripherals = Vec::with_capacity(raw.peripherals.peripheral.len());
    for p in raw.peripherals.peripheral {
        peripherals.push(convert_peripheral(p, &root, warnings)?);
    }
    Ok(parsed::Device {
        properties,
        xs_no_namespace_schema_location: raw.xs_no_namespace_schema_location,
        schema_version: raw.schema_version,
        vendor: raw.vendor,
        vendor_id: raw.vendor_id,
        name: raw.name,
        series: raw.series,
        version: raw.version,
        description: str_utils::get_description(&Some(raw.description)),
        license_text: raw.license_text,
        cpu: raw.cpu.map(convert_cpu).transpose()?,
        header_system_filename: raw.header_system_filename,
        header_definitions_prefix: raw.header_definitions_prefix,
        address_unit_bits: required_int(&raw.address_unit_bits)? as u32,
        width: required_int(&raw.width)? as u32,
        peripherals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        <device schemaVersion="1.3">
            <name>TestDevice</name>
            <version>1.0</version>
            <description>A test device</description>
            <addressUnitBits>8</addressUnitBits>
            <width>32</width>
            <size>32</size>
            <access>read-write</access>
            <resetValue>0x00000000</resetValue>
            <resetMask>0xFFFFFFFF</resetMask>
            <peripherals>
                <peripheral>
                    <name>TIM1</name>
                    <baseAddress>0x40000000</baseAddress>
                    <registers>
                        <register>
                            <name>CR1</name>
                            <addressOffset>0x0</addressOffset>
                            <fields>
                                <field>
                                    <name>EN</name>
                                    <bitOffset>0</bitOffset>
                                    <bitWidth>1</bitWidth>
                                </field>
                            </fields>
                        </register>
                    </registers>
                </peripheral>
            </peripherals>
        </device>
    "#;

    #[test]
    fn parses_minimal_device() {
        let device = parse_device_str(MINIMAL, &mut Vec::new()).unwrap();
        assert_eq!(device.name, "TestDevice");
        assert_eq!(device.peripherals.len(), 1);
        let tim1 = &device.peripherals[0];
        assert_eq!(tim1.base_address, 0x4000_0000);
        assert_eq!(tim1.registers_clusters.len(), 1);
        let parsed::RegisterOrCluster::Register(cr1) = &tim1.registers_clusters[0] else {
            panic!("expected a register");
        };
        assert_eq!(cr1.fields.len(), 1);
        assert_eq!(cr1.fields[0].bit_offset, Some(0));
    }

    #[test]
    fn parses_hex_and_enumerated_values() {
        let xml = r#"
            <device schemaVersion="1.3">
                <name>D</name>
                <version>1.0</version>
                <description>d</description>
                <addressUnitBits>8</addressUnitBits>
                <width>32</width>
                <peripherals>
                    <peripheral>
                        <name>P</name>
                        <baseAddress>0x40000000</baseAddress>
                        <registers>
                            <register>
                                <name>R</name>
                                <addressOffset>0x4</addressOffset>
                                <size>32</size>
                                <access>read-write</access>
                                <fields>
                                    <field>
                                        <name>MODE</name>
                                        <bitOffset>0</bitOffset>
                                        <bitWidth>2</bitWidth>
                                        <enumeratedValues>
                                            <enumeratedValue>
                                                <name>Off</name>
                                                <value>0</value>
                                            </enumeratedValue>
                                            <enumeratedValue>
                                                <name>On</name>
                                                <value>1</value>
                                            </enumeratedValue>
                                        </enumeratedValues>
                                    </field>
                                </fields>
                            </register>
                        </registers>
                    </peripheral>
                </peripherals>
            </device>
        "#;
        let device = parse_device_str(xml, &mut Vec::new()).unwrap();
        let parsed::RegisterOrCluster::Register(r) = &device.peripherals[0].registers_clusters[0] else {
            panic!("expected a register");
        };
        assert_eq!(r.address_offset, 4);
        let field = &r.fields[0];
        assert_eq!(field.enumerated_value_containers.len(), 1);
        assert_eq!(field.enumerated_value_containers[0].enumerated_values.len(), 2);
    }

    #[test]
    fn rejects_unknown_access_token() {
        let xml = r#"
            <device schemaVersion="1.3">
                <name>D</name>
                <version>1.0</version>
                <description>d</description>
                <addressUnitBits>8</addressUnitBits>
                <width>32</width>
                <access>bogus</access>
                <peripherals>
                    <peripheral>
                        <name>P</name>
                        <baseAddress>0x0</baseAddress>
                    </peripheral>
                </peripherals>
            </device>
        "#;
        assert!(parse_device_str(xml, &mut Vec::new()).is_err());
    }

    #[test]
    fn reports_legacy_access_token() {
        let xml = r#"
            <device schemaVersion="1.3">
                <name>D</name>
                <version>1.0</version>
                <description>d</description>
                <addressUnitBits>8</addressUnitBits>
                <width>32</width>
                <peripherals>
                    <peripheral>
                        <name>P</name>
                        <baseAddress>0x0</baseAddress>
                        <registers>
                            <register>
                                <name>R</name>
                                <addressOffset>0x0</addressOffset>
                                <size>32</size>
                                <access>read</access>
                            </register>
                        </registers>
                    </peripheral>
                </peripherals>
            </device>
        "#;
        let mut warnings = Vec::new();
        parse_device_str(xml, &mut warnings).unwrap();
        assert!(matches!(warnings.as_slice(), [Warning::LegacyAccessToken { token, .. }] if token == "read"));
    }
}
