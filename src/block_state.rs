use crate::convert::ConvertError;
use quartz_nbt::{NbtCompound, NbtTag};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// One entry of a region's block-state palette.
///
/// Properties keep the order in which they appear in the source file;
/// they are never sorted, and the property list may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockState {
    pub name: SmolStr,
    pub properties: Vec<(SmolStr, SmolStr)>,
}

impl fmt::Display for BlockState {
    /// Renders the canonical WorldEdit palette key: the block name,
    /// followed by `[k1=v1,k2=v2]` when any properties exist.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.properties.is_empty() {
            write!(f, "[")?;
            for (i, (key, value)) in self.properties.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}={}", key, value)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl BlockState {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        BlockState {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Parse a `BlockStatePalette` entry: a `Name` string and an
    /// optional `Properties` compound of string values.
    pub fn from_nbt(compound: &NbtCompound) -> Result<Self, ConvertError> {
        let name: SmolStr = compound.get::<_, &str>("Name")?.into();

        let mut properties = Vec::new();
        if let Ok(props) = compound.get::<_, &NbtCompound>("Properties") {
            for (key, value) in props.inner() {
                match value {
                    NbtTag::String(value) => properties.push((key.into(), value.into())),
                    other => {
                        return Err(ConvertError::MalformedPalette(format!(
                            "property `{}` of `{}` is not a string: {:?}",
                            key, name, other
                        )))
                    }
                }
            }
        }

        Ok(BlockState { name, properties })
    }
}
