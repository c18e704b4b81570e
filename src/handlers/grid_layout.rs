use log::debug;

use crate::models::{LayoutPlan, LayoutProfile, TilePlacement, TILE_HEIGHT, TILE_WIDTH};

/// Pages needed for `count` tiles. An empty set still gets one page.
pub fn page_count(count: usize, profile: &LayoutProfile) -> usize {
    let per_page = profile.tiles_per_page().max(1);
    if count == 0 {
        1
    } else {
        1 + (count - 1) / per_page
    }
}

/// Places `count` tiles column-major, page after page, on one horizontal strip.
///
/// Tiles fill a column top to bottom, then move one cell right. After the last
/// column of a page the cursor also skips both side margins, which lines the
/// next page up with the next viewport width.
pub fn compute_layout(count: usize, viewport_width: f64) -> LayoutPlan {
    let profile = LayoutProfile::for_width(viewport_width);
    let padding_h = profile.padding_horizontal();
    let padding_v = profile.padding_vertical();

    let mut tiles = Vec::with_capacity(count);
    let mut row = 0;
    let mut column = 0;
    let mut page = 0;
    let mut x = profile.margin_x;

    for index in 0..count {
        tiles.push(TilePlacement {
            index,
            page,
            row,
            column,
            x: x + padding_h,
            y: profile.margin_y + row as f64 * profile.cell_height + padding_v,
            width: TILE_WIDTH,
            height: TILE_HEIGHT,
        });

        row += 1;
        if row == profile.rows_per_page {
            row = 0;
            x += profile.cell_width;
            column += 1;
            if column == profile.columns_per_page {
                column = 0;
                page += 1;
                x += profile.margin_x * 2.0;
            }
        }
    }

    let pages = page_count(count, &profile);
    debug!("Number of pages: {}", pages);

    LayoutPlan {
        profile,
        viewport_width,
        page_count: pages,
        tiles,
    }
}
