use crate::convert::ConvertError;
use quartz_nbt::{NbtCompound, NbtTag};

/// A block entity (chest, sign, furnace, ...) attached to one voxel.
///
/// Litematica keeps the coordinates as integer `x`, `y`, `z` tags and a
/// lowercase `id`; WorldEdit wants a single `Pos` integer array and a
/// capitalized `Id`. Every other field is payload we pass through
/// untouched, in the order the source file stored it.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockEntity {
    pub position: (i32, i32, i32),
    pub id: String,
    pub extra: Vec<(String, NbtTag)>,
}

impl BlockEntity {
    pub fn new(id: impl Into<String>, position: (i32, i32, i32)) -> Self {
        BlockEntity {
            position,
            id: id.into(),
            extra: Vec::new(),
        }
    }

    /// Parse a litematic `TileEntities` entry.
    pub fn from_nbt(compound: &NbtCompound) -> Result<Self, ConvertError> {
        let position = (
            compound.get::<_, i32>("x")?,
            compound.get::<_, i32>("y")?,
            compound.get::<_, i32>("z")?,
        );
        let id = compound.get::<_, &str>("id")?.to_string();

        let mut extra = Vec::new();
        for (key, value) in compound.inner() {
            match key.as_str() {
                "x" | "y" | "z" | "id" => continue,
                _ => extra.push((key.clone(), value.clone())),
            }
        }

        Ok(BlockEntity {
            position,
            id,
            extra,
        })
    }

    /// Build the WorldEdit `BlockEntities` entry: `Pos`, `Id`, then the
    /// remaining fields in their source order.
    pub fn to_schem_nbt(&self) -> NbtCompound {
        let (x, y, z) = self.position;
        let mut compound = NbtCompound::new();
        compound.insert("Pos", NbtTag::IntArray(vec![x, y, z]));
        compound.insert("Id", NbtTag::String(self.id.clone()));
        for (key, value) in &self.extra {
            compound.insert(key.clone(), value.clone());
        }
        compound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quartz_nbt::NbtList;

    fn chest_nbt() -> NbtCompound {
        let mut compound = NbtCompound::new();
        compound.insert("x", NbtTag::Int(1));
        compound.insert("y", NbtTag::Int(2));
        compound.insert("z", NbtTag::Int(3));
        compound.insert("id", NbtTag::String("minecraft:chest".to_string()));
        compound.insert("CustomName", NbtTag::String("Loot".to_string()));
        compound.insert("Items", NbtTag::List(NbtList::new()));
        compound.insert("Lock", NbtTag::String("".to_string()));
        compound
    }

    #[test]
    fn test_from_nbt() {
        let block_entity = BlockEntity::from_nbt(&chest_nbt()).unwrap();
        assert_eq!(block_entity.position, (1, 2, 3));
        assert_eq!(block_entity.id, "minecraft:chest");
        let keys: Vec<&str> = block_entity.extra.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["CustomName", "Items", "Lock"]);
    }

    #[test]
    fn test_from_nbt_missing_id() {
        let mut compound = NbtCompound::new();
        compound.insert("x", NbtTag::Int(1));
        compound.insert("y", NbtTag::Int(2));
        compound.insert("z", NbtTag::Int(3));
        assert!(BlockEntity::from_nbt(&compound).is_err());
    }

    #[test]
    fn test_to_schem_nbt() {
        let block_entity = BlockEntity::from_nbt(&chest_nbt()).unwrap();
        let compound = block_entity.to_schem_nbt();

        assert_eq!(compound.get::<_, &[i32]>("Pos").unwrap(), &[1, 2, 3]);
        assert_eq!(compound.get::<_, &str>("Id").unwrap(), "minecraft:chest");
        assert_eq!(compound.get::<_, &str>("CustomName").unwrap(), "Loot");
        assert!(!compound.contains_key("x"));
        assert!(!compound.contains_key("y"));
        assert!(!compound.contains_key("z"));
        assert!(!compound.contains_key("id"));

        // Pos and Id lead, payload fields follow in source order.
        let keys: Vec<&str> = compound.inner().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Pos", "Id", "CustomName", "Items", "Lock"]);
    }
}
