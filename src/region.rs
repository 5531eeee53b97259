use crate::block_entity::BlockEntity;
use crate::block_state::BlockState;
use crate::convert::ConvertError;
use quartz_nbt::{NbtCompound, NbtList, NbtTag};

/// One named sub-volume of a litematic file.
///
/// A region's size may be negative on any axis, meaning it extends in
/// the negative direction from its position. The packed `block_states`
/// words always describe `|x*y*z|` blocks regardless of sign.
#[derive(Debug, Clone)]
pub struct Region {
    pub name: String,
    pub position: (i32, i32, i32),
    pub size: (i32, i32, i32),
    pub palette: Vec<BlockState>,
    pub block_states: Vec<i64>,
    pub block_entities: Vec<BlockEntity>,
}

impl Region {
    /// Parse one entry of the litematic `Regions` compound.
    pub fn from_nbt(name: &str, region_nbt: &NbtCompound) -> Result<Self, ConvertError> {
        let size = region_nbt.get::<_, &NbtCompound>("Size")?;
        let size = (
            size.get::<_, i32>("x")?,
            size.get::<_, i32>("y")?,
            size.get::<_, i32>("z")?,
        );

        let position = region_nbt.get::<_, &NbtCompound>("Position")?;
        let position = (
            position.get::<_, i32>("x")?,
            position.get::<_, i32>("y")?,
            position.get::<_, i32>("z")?,
        );

        let palette_nbt = region_nbt.get::<_, &NbtList>("BlockStatePalette")?;
        let mut palette = Vec::with_capacity(palette_nbt.len());
        for tag in palette_nbt.iter() {
            match tag {
                NbtTag::Compound(compound) => palette.push(BlockState::from_nbt(compound)?),
                other => {
                    return Err(ConvertError::MalformedPalette(format!(
                        "region `{}`: palette entry is not a compound: {:?}",
                        name, other
                    )))
                }
            }
        }

        let block_states = region_nbt.get::<_, &[i64]>("BlockStates")?.to_vec();

        // TileEntities may be absent entirely; treat that as empty.
        let mut block_entities = Vec::new();
        if let Ok(tile_entities) = region_nbt.get::<_, &NbtList>("TileEntities") {
            for tag in tile_entities.iter() {
                match tag {
                    NbtTag::Compound(compound) => {
                        block_entities.push(BlockEntity::from_nbt(compound)?)
                    }
                    other => {
                        return Err(ConvertError::MalformedRegion {
                            region: name.to_string(),
                            detail: format!("tile entity is not a compound: {:?}", other),
                        })
                    }
                }
            }
        }

        Ok(Region {
            name: name.to_string(),
            position,
            size,
            palette,
            block_states,
            block_entities,
        })
    }

    /// Number of blocks the region describes, independent of sign.
    pub fn volume(&self) -> usize {
        let (x, y, z) = self.size;
        (x as i64 * y as i64 * z as i64).unsigned_abs() as usize
    }

    /// WorldEdit paste offset. Negative-sized axes anchor at the far
    /// corner, so the offset shifts by `size + 1` on those axes.
    pub fn we_offset(&self) -> (i32, i32, i32) {
        fn axis(position: i32, size: i32) -> i32 {
            position + if size < 0 { size + 1 } else { 0 }
        }
        (
            axis(self.position.0, self.size.0),
            axis(self.position.1, self.size.1),
            axis(self.position.2, self.size.2),
        )
    }

    /// Destination (width, height, length): the unsigned magnitude of
    /// each size axis, truncated to 16 bits as the schem format stores
    /// them.
    pub fn dimensions(&self) -> (i16, i16, i16) {
        (
            self.size.0.unsigned_abs() as i16,
            self.size.1.unsigned_abs() as i16,
            self.size.2.unsigned_abs() as i16,
        )
    }
}
