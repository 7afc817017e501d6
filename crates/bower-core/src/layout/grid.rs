//! Fixed-cell grid that wraps to a new row when a row fills up.

use geom::{Gravity, Margins, Orientation, apply_gravity};
use tracing::warn;

use crate::{
    draw::DrawContext,
    group::{ViewGroup, container_children, container_delegates},
    view::{LayoutParams, MeasureMode, MeasureSpec, View, measure_by_spec},
};

/// Cell geometry for a [`GridLayout`].
#[derive(Debug, Clone, Copy)]
pub struct GridSettings {
    /// Width of every cell.
    pub column_width: f32,
    /// Height of every cell.
    pub row_height: f32,
    /// Gap between cells, and the leading gap accounted for when deriving
    /// the column count.
    pub spacing: f32,
    /// Force children to exactly fill their cell rather than at most.
    pub fill_cells: bool,
    /// Fill order. Only [`Orientation::Horizontal`] is implemented; vertical
    /// grids degrade to horizontal with a warning.
    pub orientation: Orientation,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            column_width: 100.0,
            row_height: 64.0,
            spacing: 5.0,
            fill_cells: false,
            orientation: Orientation::Horizontal,
        }
    }
}

/// Lays children into uniform cells, left to right then top to bottom. The
/// column count is derived from the measured width, never below one, so the
/// grid reflows when the available width changes.
pub struct GridLayout {
    group: ViewGroup,
    settings: GridSettings,
    num_columns: usize,
}

impl GridLayout {
    /// An empty grid with the given cell geometry.
    pub fn new(mut settings: GridSettings, params: LayoutParams) -> Self {
        if settings.orientation == Orientation::Vertical {
            warn!("vertical grid fill order is not implemented, using horizontal");
            settings.orientation = Orientation::Horizontal;
        }
        Self {
            group: ViewGroup::new(params),
            settings,
            num_columns: 1,
        }
    }

    /// The column count derived by the last measure pass.
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    container_children!();
}

impl View for GridLayout {
    fn measure(&mut self, dc: &dyn DrawContext, horiz: MeasureSpec, vert: MeasureSpec) {
        let settings = self.settings;
        let cell_w = MeasureSpec {
            mode: if settings.fill_cells {
                MeasureMode::Exactly
            } else {
                MeasureMode::AtMost
            },
            size: settings.column_width,
        };
        let cell_h = MeasureSpec {
            mode: cell_w.mode,
            size: settings.row_height,
        };
        for view in self.group.views_mut() {
            view.measure(dc, cell_w, cell_h);
        }

        let size = self.group.state().params.size();
        let measured_w = measure_by_spec(size.w, 0.0, horiz);

        self.num_columns = (((measured_w - settings.spacing)
            / (settings.column_width + settings.spacing)) as usize)
            .max(1);
        let num_rows = self.group.len().div_ceil(self.num_columns);
        let estimated_height = (settings.row_height + settings.spacing) * num_rows as f32;

        let state = self.group.state_mut();
        state.measured_w = measured_w;
        state.measured_h = measure_by_spec(size.h, estimated_height, vert);
    }

    fn layout(&mut self) {
        let bounds = self.group.state().bounds;
        let settings = self.settings;
        let num_columns = self.num_columns;

        let mut x = 0.0;
        let mut y = 0.0;
        let mut count = 0;
        for view in self.group.views_mut() {
            let cell = geom::Bounds::new(
                bounds.x + x,
                bounds.y + y,
                settings.column_width,
                settings.row_height,
            );
            let (mw, mh) = (view.state().measured_w, view.state().measured_h);
            view.state_mut().bounds =
                apply_gravity(cell, Margins::default(), mw, mh, Gravity::CENTER);
            view.layout();

            count += 1;
            if count == num_columns {
                count = 0;
                x = 0.0;
                y += settings.row_height + settings.spacing;
            } else {
                x += settings.column_width + settings.spacing;
            }
        }
    }

    container_delegates!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        testing::{Block, TestDraw},
        view::SizeReq,
    };

    fn grid_with(n: usize, settings: GridSettings) -> GridLayout {
        let mut grid = GridLayout::new(
            settings,
            LayoutParams::plain(SizeReq::FillParent, SizeReq::WrapContent),
        );
        for _ in 0..n {
            grid.add_view(Block::sized(80.0, 40.0));
        }
        grid
    }

    /// 330 wide with 100-wide cells and spacing 5: (330-5)/105 = 3 columns.
    #[test]
    fn column_count_derives_from_width() {
        let dc = TestDraw::new();
        let mut grid = grid_with(7, GridSettings::default());
        grid.measure(&dc, MeasureSpec::exactly(330.0), MeasureSpec::unspecified());
        assert_eq!(grid.num_columns(), 3);
        // 7 items in 3 columns: 3 rows.
        assert_eq!(grid.state().measured_h, (64.0 + 5.0) * 3.0);
    }

    /// Even a sliver of width yields one column, never zero.
    #[test]
    fn column_count_floors_at_one() {
        let dc = TestDraw::new();
        let mut grid = grid_with(3, GridSettings::default());
        grid.measure(&dc, MeasureSpec::exactly(10.0), MeasureSpec::unspecified());
        assert_eq!(grid.num_columns(), 1);
    }

    #[test]
    fn vertical_fill_order_degrades_to_horizontal() {
        let settings = GridSettings {
            orientation: Orientation::Vertical,
            ..GridSettings::default()
        };
        let grid = grid_with(3, settings);
        assert_eq!(grid.settings.orientation, Orientation::Horizontal);
    }

    #[test]
    fn items_wrap_to_the_next_row() {
        let dc = TestDraw::new();
        let mut grid = grid_with(4, GridSettings::default());
        grid.measure(&dc, MeasureSpec::exactly(330.0), MeasureSpec::unspecified());
        grid.state_mut().bounds = geom::Bounds::new(0.0, 0.0, 330.0, 200.0);
        grid.layout();

        let centers: Vec<(f32, f32)> = grid
            .group()
            .views()
            .iter()
            .map(|v| {
                let b = v.state().bounds;
                (b.center_x(), b.center_y())
            })
            .collect();
        // Three cells across the first row, then the fourth wraps.
        assert_eq!(centers[0], (50.0, 32.0));
        assert_eq!(centers[1], (155.0, 32.0));
        assert_eq!(centers[2], (260.0, 32.0));
        assert_eq!(centers[3], (50.0, 32.0 + 69.0));
    }
}
