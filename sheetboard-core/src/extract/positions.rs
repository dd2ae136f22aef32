//! Open positions table — per-row unrealized gain and its running total.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grid::Grid;
use crate::locate::find_header_row;
use crate::number::parse_cell;

/// Column headers of the open positions table.
pub const POSITION_HEADERS: [&str; 4] = ["quantity", "open price", "current price", "unrealized gain"];

/// Rows after the header that may be blank before the table has started.
const LEADING_BLANK_ALLOWANCE: usize = 2;

/// One open-position row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub row_index: usize,
    pub quantity: f64,
    pub open_price: Option<f64>,
    pub current_price: Option<f64>,
    pub unrealized_gain: f64,
}

impl Position {
    /// Explicit gain wins; otherwise mark-to-market when both prices exist.
    fn from_cells(
        row_index: usize,
        quantity: Option<f64>,
        open_price: Option<f64>,
        current_price: Option<f64>,
        gain: Option<f64>,
    ) -> Self {
        let quantity = quantity.unwrap_or(0.0);
        let unrealized_gain = match (gain, open_price, current_price) {
            (Some(g), _, _) => g,
            (None, Some(open), Some(current)) => quantity * (current - open),
            _ => 0.0,
        };
        Self {
            row_index,
            quantity,
            open_price,
            current_price,
            unrealized_gain,
        }
    }
}

/// All positions read from the table plus the summed unrealized gain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenPositions {
    /// Header row of the table, `None` if no table was found.
    pub header_row: Option<usize>,
    pub positions: Vec<Position>,
    pub unrealized_total: f64,
}

/// Extract the open positions table.
///
/// A row whose four target cells are all absent is blank. Blank rows within
/// the first few rows after the header are skipped; after that the first
/// blank row ends the table, so a sparse table is cut at its first gap.
pub fn extract_open_positions(grid: &Grid) -> OpenPositions {
    let Some(header) = find_header_row(grid, &POSITION_HEADERS) else {
        debug!("open positions header not found");
        return OpenPositions::default();
    };
    let (c_qty, c_open, c_current, c_gain) = (
        header.columns[0],
        header.columns[1],
        header.columns[2],
        header.columns[3],
    );

    let start = header.data_start();
    let mut positions = Vec::new();
    let mut unrealized_total = 0.0;

    for r in start..grid.len() {
        let quantity = parse_cell(grid.cell(r, c_qty));
        let open_price = parse_cell(grid.cell(r, c_open));
        let current_price = parse_cell(grid.cell(r, c_current));
        let gain = parse_cell(grid.cell(r, c_gain));

        if quantity.is_none() && open_price.is_none() && current_price.is_none() && gain.is_none() {
            if r > start + LEADING_BLANK_ALLOWANCE {
                break;
            }
            continue;
        }

        let position = Position::from_cells(r, quantity, open_price, current_price, gain);
        unrealized_total += position.unrealized_gain;
        positions.push(position);
    }

    debug!(
        header_row = header.row_index,
        positions = positions.len(),
        unrealized_total,
        "open positions extracted"
    );

    OpenPositions {
        header_row: Some(header.row_index),
        positions,
        unrealized_total,
    }
}
