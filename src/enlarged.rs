use crate::tile::TileId;

/// The enlarged-view overlay bound to the selected tile.
///
/// At most one tile is expanded at a time. Expanding another tile while one
/// is showing replaces it.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum EnlargedView {
    #[default]
    Collapsed,
    Expanded {
        tile: TileId,
        source: String,
    },
}

impl EnlargedView {
    /// Show `tile` full size. Returns the tile it replaced, if any.
    pub fn expand(&mut self, tile: TileId, source: impl Into<String>) -> Option<TileId> {
        let previous = self.selected();
        *self = EnlargedView::Expanded {
            tile,
            source: source.into(),
        };
        previous
    }

    /// Dismiss the overlay. Returns whether anything was showing.
    pub fn collapse(&mut self) -> bool {
        let was_expanded = self.is_expanded();
        *self = EnlargedView::Collapsed;
        was_expanded
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self, EnlargedView::Expanded { .. })
    }

    /// The selected tile, if the overlay is showing.
    pub fn selected(&self) -> Option<TileId> {
        match self {
            EnlargedView::Expanded { tile, .. } => Some(*tile),
            EnlargedView::Collapsed => None,
        }
    }

    pub fn source(&self) -> Option<&str> {
        match self {
            EnlargedView::Expanded { source, .. } => Some(source),
            EnlargedView::Collapsed => None,
        }
    }

    /// Overlay scale: full size when expanded, zero when collapsed.
    pub fn scale(&self) -> f32 {
        if self.is_expanded() { 1.0 } else { 0.0 }
    }
}
