/// Visible tile size. Every profile's cell is larger; the difference is split as padding.
pub const TILE_WIDTH: f64 = 82.0;
pub const TILE_HEIGHT: f64 = 82.0;

/// Grid constants for one supported viewport width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutProfile {
    pub columns_per_page: usize,
    pub rows_per_page: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    pub margin_x: f64,
    pub margin_y: f64,
}

impl LayoutProfile {
    pub const DEFAULT: LayoutProfile = LayoutProfile {
        columns_per_page: 5,
        rows_per_page: 3,
        cell_width: 96.0,
        cell_height: 88.0,
        margin_x: 0.0,
        margin_y: 20.0,
    };

    pub fn for_width(viewport_width: f64) -> Self {
        // Widths are compared exactly; they come from a fixed set of screen sizes.
        if viewport_width == 568.0 {
            LayoutProfile {
                columns_per_page: 6,
                cell_width: 94.0,
                margin_x: 2.0,
                ..Self::DEFAULT
            }
        } else if viewport_width == 667.0 {
            LayoutProfile {
                columns_per_page: 7,
                cell_width: 95.0,
                cell_height: 98.0,
                margin_x: 1.0,
                margin_y: 29.0,
                ..Self::DEFAULT
            }
        } else if viewport_width == 736.0 {
            LayoutProfile {
                columns_per_page: 8,
                rows_per_page: 4,
                cell_width: 92.0,
                ..Self::DEFAULT
            }
        } else {
            Self::DEFAULT
        }
    }

    pub fn tiles_per_page(&self) -> usize {
        self.columns_per_page * self.rows_per_page
    }

    pub fn padding_horizontal(&self) -> f64 {
        (self.cell_width - TILE_WIDTH) / 2.0
    }

    pub fn padding_vertical(&self) -> f64 {
        (self.cell_height - TILE_HEIGHT) / 2.0
    }
}

impl Default for LayoutProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Where one result lands in the paged grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    pub index: usize,
    pub page: usize,
    pub row: usize,
    pub column: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl TilePlacement {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub profile: LayoutProfile,
    pub viewport_width: f64,
    pub page_count: usize,
    pub tiles: Vec<TilePlacement>,
}

impl LayoutPlan {
    /// Width of the horizontal scroll content holding every page.
    pub fn content_width(&self) -> f64 {
        self.page_count as f64 * self.viewport_width
    }

    pub fn page_offset(&self, page: usize) -> f64 {
        page.min(self.page_count.saturating_sub(1)) as f64 * self.viewport_width
    }

    /// Page indicator value for a horizontal scroll offset; switches halfway across a page.
    pub fn current_page(&self, scroll_x: f64) -> usize {
        if self.viewport_width <= 0.0 {
            return 0;
        }
        let page = ((scroll_x + self.viewport_width / 2.0) / self.viewport_width).floor();
        if page <= 0.0 {
            0
        } else {
            (page as usize).min(self.page_count.saturating_sub(1))
        }
    }

    pub fn tile(&self, index: usize) -> Option<&TilePlacement> {
        self.tiles.get(index)
    }

    /// Index of the result whose tile contains the point, in scroll-content coordinates.
    pub fn tile_at(&self, x: f64, y: f64) -> Option<usize> {
        self.tiles
            .iter()
            .find(|tile| tile.contains(x, y))
            .map(|tile| tile.index)
    }

    pub fn tiles_on_page(&self, page: usize) -> impl Iterator<Item = &TilePlacement> {
        self.tiles.iter().filter(move |tile| tile.page == page)
    }
}
