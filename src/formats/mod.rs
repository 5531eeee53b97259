pub mod litematic;
pub mod schematic;
