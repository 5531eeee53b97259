//! Convert Litematica `.litematic` files into WorldEdit/Sponge `.schem`
//! (version 2) files.
//!
//! A litematic file holds one or more named regions, each with its own
//! palette and a densely bit-packed block-state array. The schem format
//! cannot represent multiple regions, so conversion produces one output
//! per region: [`convert_litematic`] returns a map from derived output
//! name to gzip-compressed schem bytes.
//!
//! The interesting work is per region: unpacking fixed-width palette
//! indices from the 64-bit word stream ([`packed`]), re-encoding them as
//! var-length bytes and assembling the destination record
//! ([`formats::schematic`]), and remapping palette entries, tile
//! entities, and the paste offset along the way.

pub mod block_entity;
pub mod block_state;
pub mod convert;
pub mod formats;
pub mod packed;
pub mod region;

pub use block_entity::BlockEntity;
pub use block_state::BlockState;
pub use convert::{convert_litematic, convert_litematic_with_compression, ConvertError};
pub use formats::litematic::{from_litematic, is_litematic, Litematic};
pub use formats::schematic::{to_schematic, to_schematic_with_compression};
pub use region::Region;
