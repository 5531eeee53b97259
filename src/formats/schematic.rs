//! Writing of WorldEdit/Sponge `.schem` (version 2) containers.

use crate::convert::ConvertError;
use crate::packed;
use crate::region::Region;
use flate2::write::GzEncoder;
use log::debug;
use quartz_nbt::io::Flavor;
use quartz_nbt::{NbtCompound, NbtList, NbtTag};

/// Schem container version written by this crate.
pub const FORMAT_VERSION: i32 = 2;

/// Widest palette index `BlockData` can carry: two var-length groups of
/// seven bits each. There is no third group in the schem format.
pub const MAX_INDEX_BITS: u32 = 14;

/// Default compression level for schem serialization.
/// Level 3 balances speed (~2x faster than L6) with size (~15% larger than L6).
pub const DEFAULT_COMPRESSION: flate2::Compression = flate2::Compression::new(3);

/// Append one palette index in the schem var-length encoding: a single
/// byte below 128, otherwise the low seven bits with the continuation
/// bit set, followed by the remaining high bits.
fn write_block_index(out: &mut Vec<u8>, index: u16) {
    let high = index >> 7;
    if high == 0 {
        out.push(index as u8);
    } else {
        out.push((index & 0x7F) as u8 | 0x80);
        out.push(high as u8);
    }
}

/// Transcode a region's packed block states into schem `BlockData`.
pub fn encode_block_data(region: &Region) -> Result<Vec<u8>, ConvertError> {
    let bits = packed::bits_per_block(region.palette.len());
    if bits > MAX_INDEX_BITS {
        return Err(ConvertError::PaletteTooLarge {
            region: region.name.clone(),
            entries: region.palette.len(),
            bits,
            max: MAX_INDEX_BITS,
        });
    }

    let volume = region.volume();
    let indices = packed::unpack_block_indices(&region.block_states, bits, volume);
    if indices.len() != volume {
        return Err(ConvertError::TruncatedBlockStates {
            region: region.name.clone(),
            expected: volume,
            actual: indices.len(),
        });
    }

    let mut data = Vec::with_capacity(volume);
    for &index in &indices {
        write_block_index(&mut data, index);
    }
    Ok(data)
}

/// Assemble and compress one schem file from a converted region.
pub fn to_schematic(region: &Region, data_version: i32) -> Result<Vec<u8>, ConvertError> {
    to_schematic_with_compression(region, data_version, DEFAULT_COMPRESSION)
}

pub fn to_schematic_with_compression(
    region: &Region,
    data_version: i32,
    compression: flate2::Compression,
) -> Result<Vec<u8>, ConvertError> {
    let block_data = encode_block_data(region)?;
    debug!(
        "region `{}`: {} palette entries, {} blocks, {} byte(s) of block data",
        region.name,
        region.palette.len(),
        region.volume(),
        block_data.len()
    );

    let (offset_x, offset_y, offset_z) = region.we_offset();
    let mut metadata = NbtCompound::new();
    metadata.insert("WEOffsetX", NbtTag::Int(offset_x));
    metadata.insert("WEOffsetY", NbtTag::Int(offset_y));
    metadata.insert("WEOffsetZ", NbtTag::Int(offset_z));

    let mut palette = NbtCompound::new();
    for (index, block) in region.palette.iter().enumerate() {
        palette.insert(block.to_string(), NbtTag::Int(index as i32));
    }

    let block_entities = NbtList::from(
        region
            .block_entities
            .iter()
            .map(|block_entity| NbtTag::Compound(block_entity.to_schem_nbt()))
            .collect::<Vec<NbtTag>>(),
    );

    let (width, height, length) = region.dimensions();

    let mut schematic = NbtCompound::new();
    schematic.insert("Metadata", NbtTag::Compound(metadata));
    schematic.insert("Palette", NbtTag::Compound(palette));
    schematic.insert("BlockEntities", NbtTag::List(block_entities));
    schematic.insert("DataVersion", NbtTag::Int(data_version));
    schematic.insert("Height", NbtTag::Short(height));
    schematic.insert("Length", NbtTag::Short(length));
    schematic.insert("PaletteMax", NbtTag::Int(region.palette.len() as i32));
    schematic.insert("Version", NbtTag::Int(FORMAT_VERSION));
    schematic.insert("Width", NbtTag::Short(width));
    schematic.insert(
        "BlockData",
        NbtTag::ByteArray(block_data.into_iter().map(|b| b as i8).collect()),
    );
    schematic.insert("Offset", NbtTag::IntArray(vec![0, 0, 0]));

    let mut root = NbtCompound::new();
    root.insert("Schematic", NbtTag::Compound(schematic));

    let mut encoder = GzEncoder::new(Vec::new(), compression);
    quartz_nbt::io::write_nbt(&mut encoder, None, &root, Flavor::Uncompressed)?;
    Ok(encoder.finish()?)
}
