//! ISCC-SUM processor combining Data-Code and Instance-Code in one pass.

use isum_core::{CodecError, IsccCode, IsccSumResult, MainType};

use crate::data::DataHasher;
use crate::instance::InstanceHasher;

/// Single-entry processor fanning one stream out to both sub-hashers.
#[derive(Debug, Default)]
pub struct IsccSumProcessor {
    data_hasher: DataHasher,
    instance_hasher: InstanceHasher,
}

impl IsccSumProcessor {
    /// Creates a new ISCC-SUM processor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the processor with stream data.
    pub fn update(&mut self, data: &[u8]) {
        self.data_hasher.push(data);
        self.instance_hasher.push(data);
    }

    /// Packs the final result.
    ///
    /// `wide` selects the 2x128-bit body over the 2x64-bit default;
    /// `add_units` additionally emits the standalone 256-bit Data-Code and
    /// Instance-Code unit strings.
    pub fn result(&self, wide: bool, add_units: bool) -> Result<IsccSumResult, CodecError> {
        let data_digest = self.data_hasher.digest();
        let instance_digest = self.instance_hasher.digest();

        let code = IsccCode::new_sum(&data_digest, &instance_digest, wide)?;

        let units = if add_units {
            let data_unit = IsccCode::new_unit(MainType::Data, &data_digest)?;
            let instance_unit = IsccCode::new_unit(MainType::Instance, &instance_digest)?;
            Some(vec![data_unit.to_string(), instance_unit.to_string()])
        } else {
            None
        };

        Ok(IsccSumResult {
            iscc: code.to_string(),
            datahash: self.instance_hasher.multihash(),
            filesize: self.instance_hasher.filesize(),
            units,
        })
    }
}
