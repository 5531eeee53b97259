use crate::formats::{litematic, schematic};
use log::debug;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Everything that can go wrong between litematic bytes in and schem
/// bytes out. The variant identifies the failing stage; region-scoped
/// failures carry the region's name.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to read or write NBT: {0}")]
    NbtIo(#[from] quartz_nbt::io::NbtIoError),
    #[error("missing or mistyped field: {0}")]
    Field(#[from] quartz_nbt::NbtReprError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed block state palette: {0}")]
    MalformedPalette(String),
    #[error("region `{region}`: {detail}")]
    MalformedRegion { region: String, detail: String },
    #[error(
        "region `{region}`: palette of {entries} entries needs {bits} bits per index, \
         which exceeds the schem block-data limit of {max} bits"
    )]
    PaletteTooLarge {
        region: String,
        entries: usize,
        bits: u32,
        max: u32,
    },
    #[error("region `{region}`: block state array ran out after {actual} of {expected} indices")]
    TruncatedBlockStates {
        region: String,
        expected: usize,
        actual: usize,
    },
}

/// Convert a `.litematic` file into one `.schem` file per region.
///
/// `base_name` is the source file name; the returned map goes from the
/// derived output name (extension stripped, `-<region>` appended for
/// multi-region files, spaces replaced by underscores) to gzip'd schem
/// bytes. Regions are independent and are converted in parallel.
pub fn convert_litematic(
    base_name: &str,
    data: &[u8],
) -> Result<FxHashMap<String, Vec<u8>>, ConvertError> {
    convert_litematic_with_compression(base_name, data, schematic::DEFAULT_COMPRESSION)
}

pub fn convert_litematic_with_compression(
    base_name: &str,
    data: &[u8],
    compression: flate2::Compression,
) -> Result<FxHashMap<String, Vec<u8>>, ConvertError> {
    let parsed = litematic::from_litematic(data)?;
    let multi_region = parsed.regions.len() > 1;
    debug!(
        "converting `{}`: {} region(s), data version {}",
        base_name,
        parsed.regions.len(),
        parsed.data_version
    );

    let converted = parsed
        .regions
        .par_iter()
        .map(|region| {
            let bytes =
                schematic::to_schematic_with_compression(region, parsed.data_version, compression)?;
            Ok((output_key(base_name, &region.name, multi_region), bytes))
        })
        .collect::<Result<Vec<(String, Vec<u8>)>, ConvertError>>()?;

    Ok(converted.into_iter().collect())
}

/// Derive the output name for one region of `base_name`.
fn output_key(base_name: &str, region_name: &str, multi_region: bool) -> String {
    let stem = match base_name.rfind('.') {
        Some(dot) => &base_name[..dot],
        None => base_name,
    };
    let mut key = stem.to_string();
    if multi_region {
        key.push('-');
        key.push_str(region_name);
    }
    key.replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_key_single_region() {
        assert_eq!(output_key("house.litematic", "main", false), "house");
    }

    #[test]
    fn test_output_key_multi_region() {
        assert_eq!(
            output_key("house.litematic", "cellar", true),
            "house-cellar"
        );
    }

    #[test]
    fn test_output_key_replaces_spaces_everywhere() {
        assert_eq!(
            output_key("my house.litematic", "main region", true),
            "my_house-main_region"
        );
    }

    #[test]
    fn test_output_key_without_extension() {
        assert_eq!(output_key("house", "main", false), "house");
    }

    #[test]
    fn test_output_key_strips_only_last_extension() {
        assert_eq!(output_key("house.v2.litematic", "main", false), "house.v2");
    }

    #[test]
    fn test_convert_rejects_garbage() {
        assert!(convert_litematic("broken.litematic", b"not gzip at all").is_err());
    }
}
