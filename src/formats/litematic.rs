//! Reading of Litematica `.litematic` containers.

use crate::convert::ConvertError;
use crate::region::Region;
use flate2::read::GzDecoder;
use quartz_nbt::io::Flavor;
use quartz_nbt::{NbtCompound, NbtTag};

/// A parsed litematic file: the game data version plus every region in
/// the order the file stores them.
#[derive(Debug, Clone)]
pub struct Litematic {
    pub data_version: i32,
    pub regions: Vec<Region>,
}

/// Cheap sniff: does `data` decompress into something shaped like a
/// litematic root?
pub fn is_litematic(data: &[u8]) -> bool {
    // Stream-decompress directly into the NBT parser (no intermediate buffer)
    let reader = std::io::BufReader::with_capacity(1 << 20, data);
    let mut gz = GzDecoder::new(reader);
    let (root, _) = match quartz_nbt::io::read_nbt(&mut gz, Flavor::Uncompressed) {
        Ok(result) => result,
        Err(_) => return false,
    };

    root.get::<_, i32>("MinecraftDataVersion").is_ok()
        && root.get::<_, &NbtCompound>("Regions").is_ok()
}

/// Decompress and parse a litematic file.
pub fn from_litematic(data: &[u8]) -> Result<Litematic, ConvertError> {
    let reader = std::io::BufReader::with_capacity(1 << 20, data);
    let mut gz = GzDecoder::new(reader);
    let (root, _) = quartz_nbt::io::read_nbt(&mut gz, Flavor::Uncompressed)?;

    let data_version = root.get::<_, i32>("MinecraftDataVersion")?;

    let regions_nbt = root.get::<_, &NbtCompound>("Regions")?;
    let mut regions = Vec::with_capacity(regions_nbt.inner().len());
    for (name, region_tag) in regions_nbt.inner() {
        match region_tag {
            NbtTag::Compound(region_nbt) => regions.push(Region::from_nbt(name, region_nbt)?),
            other => {
                return Err(ConvertError::MalformedRegion {
                    region: name.clone(),
                    detail: format!("region entry is not a compound: {:?}", other),
                })
            }
        }
    }

    Ok(Litematic {
        data_version,
        regions,
    })
}
