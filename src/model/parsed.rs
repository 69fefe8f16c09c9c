//! The parsed tree: a direct, still-unresolved materialisation of a
//! CMSIS-SVD document.
//!
//! Every field that the schema allows to be inherited, derived, or expanded
//! later is `Option`-wrapped here; nothing is merged or expanded yet. The
//! resolver in [`crate::resolver`] consumes this tree and produces the fully
//! materialised [`crate::model::processed`] tree.

use crate::model::tokens::{
    AddressBlockUsage, CpuName, DataType, Endian, ModifiedWriteValues, Protection, ReadAction,
    SauAccess,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SauRegion {
    pub enabled: Option<bool>,
    pub name: Option<String>,
    pub base: u64,
    pub limit: u64,
    pub access: SauAccess,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SauRegionsConfig {
    pub enabled: Option<bool>,
    pub protection_when_disabled: Option<Protection>,
    pub regions: Vec<SauRegion>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cpu {
    pub name: CpuName,
    pub revision: String,
    pub endian: Endian,
    pub mpu_present: Option<bool>,
    pub fpu_present: Option<bool>,
    pub fpu_dp: Option<bool>,
    pub dsp_present: Option<bool>,
    pub icache_present: Option<bool>,
    pub dcache_present: Option<bool>,
    pub itcm_present: Option<bool>,
    pub dtcm_present: Option<bool>,
    pub vtor_present: Option<bool>,
    pub nvic_prio_bits: u32,
    pub vendor_systick_config: bool,
    pub device_num_interrupts: Option<u32>,
    pub sau_num_regions: Option<u32>,
    pub sau_regions_config: Option<SauRegionsConfig>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumeratedValue {
    pub name: String,
    pub description: Option<String>,
    /// Raw literal as written (decimal/hex/binary, possibly with `x`
    /// wildcard digits); unparsed until [`crate::enumvalues`] expands it.
    pub value: Option<String>,
    pub is_default: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DimArrayIndex {
    pub header_enum_name: Option<String>,
    pub enumerated_values: Vec<EnumeratedValue>,
}

/// Shared by every element that may be expanded via `dim`/`dimIncrement`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DimElementGroup {
    pub dim: Option<u32>,
    pub dim_increment: Option<u64>,
    pub dim_index: Option<String>,
    pub dim_name: Option<String>,
    pub dim_array_index: Option<DimArrayIndex>,
}

/// Shared register-properties that inherit down Peripheral -> Cluster ->
/// Register -> Field.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RegisterPropertiesGroup {
    pub size: Option<u32>,
    pub access: Option<crate::model::tokens::Access>,
    pub protection: Option<Protection>,
    pub reset_value: Option<u64>,
    pub reset_mask: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressBlock {
    pub offset: u64,
    pub size: u64,
    pub usage: AddressBlockUsage,
    pub protection: Option<Protection>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interrupt {
    pub name: String,
    pub description: Option<String>,
    pub value: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteConstraint {
    pub write_as_read: Option<bool>,
    pub use_enumerated_values: Option<bool>,
    pub range: Option<(u64, u64)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumeratedValueContainer {
    pub name: Option<String>,
    pub header_enum_name: Option<String>,
    pub usage: Option<crate::model::tokens::EnumUsage>,
    pub enumerated_values: Vec<EnumeratedValue>,
    pub derived_from: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub dim_element: DimElementGroup,
    pub name: String,
    pub description: Option<String>,
    pub bit_offset: Option<u32>,
    pub bit_width: Option<u32>,
    pub lsb: Option<u32>,
    pub msb: Option<u32>,
    pub bit_range: Option<String>,
    pub access: Option<crate::model::tokens::Access>,
    pub modified_write_values: Option<ModifiedWriteValues>,
    pub write_constraint: Option<WriteConstraint>,
    pub read_action: Option<ReadAction>,
    pub enumerated_value_containers: Vec<EnumeratedValueContainer>,
    pub derived_from: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterOrCluster {
    Register(Register),
    Cluster(Cluster),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Register {
    pub dim_element: DimElementGroup,
    pub properties: RegisterPropertiesGroup,
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub alternate_group: Option<String>,
    pub alternate_register: Option<String>,
    pub address_offset: u64,
    pub data_type: Option<DataType>,
    pub modified_write_values: Option<ModifiedWriteValues>,
    pub write_constraint: Option<WriteConstraint>,
    pub read_action: Option<ReadAction>,
    pub fields: Vec<Field>,
    pub derived_from: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cluster {
    pub dim_element: DimElementGroup,
    pub properties: RegisterPropertiesGroup,
    pub name: String,
    pub description: Option<String>,
    pub alternate_cluster: Option<String>,
    pub header_struct_name: Option<String>,
    pub address_offset: u64,
    pub registers_clusters: Vec<RegisterOrCluster>,
    pub derived_from: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Peripheral {
    pub dim_element: DimElementGroup,
    pub properties: RegisterPropertiesGroup,
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub alternate_peripheral: Option<String>,
    pub group_name: Option<String>,
    pub prepend_to_name: Option<String>,
    pub append_to_name: Option<String>,
    pub header_struct_name: Option<String>,
    pub disable_condition: Option<String>,
    pub base_address: u64,
    pub address_blocks: Vec<AddressBlock>,
    pub interrupts: Vec<Interrupt>,
    pub registers_clusters: Vec<RegisterOrCluster>,
    pub derived_from: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Device {
    pub properties: RegisterPropertiesGroup,
    pub xs_no_namespace_schema_location: Option<String>,
    pub schema_version: String,
    pub vendor: Option<String>,
    pub vendor_id: Option<String>,
    pub name: String,
    pub series: Option<String>,
    pub version: String,
    pub description: String,
    pub license_text: Option<String>,
    pub cpu: Option<Cpu>,
    pub header_system_filename: Option<String>,
    pub header_definitions_prefix: Option<String>,
    pub address_unit_bits: u32,
    pub width: u32,
    pub peripherals: Vec<Peripheral>,
}
