//! The processed tree: the fully materialised output of [`crate::resolver`].
//!
//! Every `derivedFrom` has been merged, every `dim` has been expanded into
//! concrete siblings, and every inheritable register property (`size`,
//! `access`, `protection`, `resetValue`, `resetMask`) has been pushed down as
//! far as the schema requires. [`Register`] and [`Field`] therefore carry
//! those properties as plain values; [`Cluster`], [`Peripheral`] and
//! [`Device`] keep them optional since nothing below may have needed them
//! concretely.

use crate::model::tokens::{
    Access, AddressBlockUsage, CpuName, DataType, Endian, EnumUsage, ModifiedWriteValues,
    Protection, ReadAction, SauAccess,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SauRegion {
    pub enabled: bool,
    pub name: Option<String>,
    pub base: u64,
    pub limit: u64,
    pub access: SauAccess,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SauRegionsConfig {
    pub enabled: bool,
    pub protection_when_disabled: Protection,
    pub regions: Vec<SauRegion>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cpu {
    pub name: CpuName,
    pub revision: String,
    pub endian: Endian,
    pub mpu_present: bool,
    pub fpu_present: bool,
    pub fpu_dp: bool,
    pub dsp_present: bool,
    pub icache_present: bool,
    pub dcache_present: bool,
    pub itcm_present: bool,
    pub dtcm_present: bool,
    pub vtor_present: bool,
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
    /// Always concrete after [`crate::enumvalues`] expansion: `None` only for
    /// the (invalid-but-tolerated) case of a value-less placeholder entry.
    pub value: Option<u64>,
    pub is_default: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DimArrayIndex {
    pub header_enum_name: Option<String>,
    pub enumerated_values: Vec<EnumeratedValue>,
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

/// One fully expanded `enumeratedValues` container: every wildcard value has
/// been split into its concrete entries (see [`crate::enumvalues`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumeratedValueContainer {
    pub name: Option<String>,
    pub header_enum_name: Option<String>,
    pub usage: EnumUsage,
    pub enumerated_values: Vec<EnumeratedValue>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub lsb: u32,
    pub msb: u32,
    pub access: Access,
    pub modified_write_values: ModifiedWriteValues,
    pub write_constraint: Option<WriteConstraint>,
    pub read_action: Option<ReadAction>,
    pub enumerated_value_containers: Vec<EnumeratedValueContainer>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Register {
    pub size: u32,
    pub access: Access,
    pub protection: Protection,
    pub reset_value: u64,
    pub reset_mask: u64,
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub alternate_group: Option<String>,
    pub alternate_register: Option<String>,
    pub address_offset: u64,
    pub data_type: Option<DataType>,
    pub modified_write_values: ModifiedWriteValues,
    pub write_constraint: Option<WriteConstraint>,
    pub read_action: Option<ReadAction>,
    pub fields: Vec<Field>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterOrCluster {
    Register(Register),
    Cluster(Cluster),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cluster {
    pub size: Option<u32>,
    pub access: Option<Access>,
    pub protection: Option<Protection>,
    pub reset_value: Option<u64>,
    pub reset_mask: Option<u64>,
    pub name: String,
    pub description: Option<String>,
    pub alternate_cluster: Option<String>,
    pub header_struct_name: Option<String>,
    pub address_offset: u64,
    pub registers_clusters: Vec<RegisterOrCluster>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Peripheral {
    pub size: Option<u32>,
    pub access: Option<Access>,
    pub protection: Option<Protection>,
    pub reset_value: Option<u64>,
    pub reset_mask: Option<u64>,
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
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Device {
    pub size: Option<u32>,
    pub access: Option<Access>,
    pub protection: Option<Protection>,
    pub reset_value: Option<u64>,
    pub reset_mask: Option<u64>,
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
