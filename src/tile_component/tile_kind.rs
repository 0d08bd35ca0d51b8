use serde::{Deserialize, Serialize};

/// The kind of terrain or structure occupying one cell of one layer.
#[derive(PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize, Debug, Default)]
pub enum TileKind {
    #[default]
    Grass,
    Path,
    Water,
    Bridge,
    Mountain,
}

impl TileKind {
    #[inline]
    pub const fn is_water(&self) -> bool {
        matches!(self, TileKind::Water)
    }

    /// Water and mountains block the player unless a bridge covers them.
    #[inline]
    pub const fn is_impassable(&self) -> bool {
        matches!(self, TileKind::Water | TileKind::Mountain)
    }

    /// One-character symbol used by the text dump of a map.
    pub const fn symbol(&self) -> char {
        match self {
            TileKind::Grass => '.',
            TileKind::Path => '=',
            TileKind::Water => '~',
            TileKind::Bridge => '#',
            TileKind::Mountain => '^',
        }
    }
}
