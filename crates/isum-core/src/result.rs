//! Result record returned by the ISCC-SUM processor.

use serde::Serialize;

/// Final output of processing one byte stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IsccSumResult {
    /// The composite ISCC-SUM code, e.g. `ISCC:K4A...`
    pub iscc: String,
    /// BLAKE3 multihash of the stream: `1e20` prefix plus 64 hex digits
    pub datahash: String,
    /// Total number of bytes consumed
    pub filesize: u64,
    /// Standalone 256-bit Data-Code and Instance-Code units, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_omitted_from_serialization() {
        let result = IsccSumResult {
            iscc: "ISCC:TEST".to_string(),
            datahash: "1e20".to_string(),
            filesize: 0,
            units: None,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("units"));
    }
}
