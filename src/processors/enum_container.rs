//! Thin wrapper around [`crate::enumvalues`] used by the resolver's generic
//! node-processing step.
//!
//! A *derived* EnumeratedValueContainer is not merged through here at all:
//! per the resolver driver (`§4.4`), deriving one container from another
//! replicates the base's parsed form wholesale before processing runs, so
//! there is nothing level-specific left to merge once we get here.

use crate::error::ElementPath;
use crate::error::ResolveError;
use crate::model::parsed;
use crate::model::processed;

pub fn process(container: &parsed::EnumeratedValueContainer, path: &ElementPath) -> Result<processed::EnumeratedValueContainer, ResolveError> {
    crate::enumvalues::process_container(container, path)
}
