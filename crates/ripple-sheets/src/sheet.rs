//! The sheet: cell arena, dependency graph, and recalculation
//!
//! A [`Sheet`] owns every materialized cell in an arena of stable slots and
//! keeps a sparse two-level column → row index over them. Setting a cell's
//! content reclassifies it, rewires its dependency edges, and triggers a
//! depth-first recalculation cascade through its transitive dependents.
//! Reference cycles are contained per cell: every member of a cycle is
//! marked with a cyclical-dependency error exactly once per pass, and the
//! cascade always terminates.

use crate::cell::{Cell, CellId, CellState, FormulaState};
use crate::error::SheetResult;
use ahash::AHashMap;
use ripple_sheets_core::Address;
use ripple_sheets_formula::{
    evaluate, parse_formula, FormulaError, FormulaResult, ReferenceResolver,
};

/// Callback invoked with (address, cell) for every cell whose state changes
/// during a recalculation cascade
pub type UpdateCallback = Box<dyn FnMut(&str, &Cell)>;

/// A sparse, reactive grid of cells
///
/// Single-threaded by design: mutation and recalculation are synchronous and
/// re-entrant only through the per-cell recursion guards. Callers needing
/// concurrent access must serialize externally.
///
/// ## Example
///
/// ```rust
/// use ripple_sheets::Sheet;
///
/// let mut sheet = Sheet::new();
/// sheet.set_content("A2", "5").unwrap();
/// sheet.set_content("A3", "6").unwrap();
/// sheet.set_content("A1", "=A2+A3").unwrap();
/// assert_eq!(sheet.value_at("A1").unwrap(), 11.0);
///
/// sheet.set_content("A3", "7").unwrap();
/// assert_eq!(sheet.value_at("A1").unwrap(), 12.0);
/// ```
#[derive(Default)]
pub struct Sheet {
    /// Cell arena; freed slots are `None` and reusable
    slots: Vec<Option<Cell>>,
    free_slots: Vec<CellId>,
    /// Sparse index: column → row → arena handle
    columns: AHashMap<u16, AHashMap<u32, CellId>>,
    on_cell_updated: Option<UpdateCallback>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the callback invoked for every cell visited by a recalculation
    /// cascade, the directly edited cell's own recalculation step included.
    pub fn set_update_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&str, &Cell) + 'static,
    {
        self.on_cell_updated = Some(Box::new(callback));
    }

    /// Remove the update callback.
    pub fn clear_update_callback(&mut self) {
        self.on_cell_updated = None;
    }

    /// Set a cell's content and recalculate everything that depends on it.
    ///
    /// Content is classified as empty, formula (leading `=`), numeric, or
    /// text. Setting empty content where no cell exists is a no-op; clearing
    /// an existing cell prunes it unless other formulas still reference its
    /// address.
    pub fn set_content(&mut self, address: &str, content: &str) -> SheetResult<()> {
        let addr = Address::parse(address)?;
        if content.is_empty() && self.cell_id_at(&addr).is_none() {
            return Ok(());
        }

        let id = self.cell_or_create(&addr);
        self.apply_content(id, content);
        self.recalculate(id);
        self.prune_if_unreferenced(id);
        Ok(())
    }

    /// The numeric value at an address.
    ///
    /// Missing and transient cells are worth 0; text cells and formula cells
    /// in an error state fail.
    pub fn value_at(&self, address: &str) -> SheetResult<f64> {
        let addr = Address::parse(address)?;
        match self.cell_at(&addr) {
            None => Ok(0.0),
            Some(cell) => Ok(cell.value()?),
        }
    }

    /// The display rendering at an address (empty for missing cells).
    pub fn content_at(&self, address: &str) -> SheetResult<String> {
        let addr = Address::parse(address)?;
        Ok(self
            .cell_at(&addr)
            .map(Cell::display_content)
            .unwrap_or_default())
    }

    /// The re-editable rendering at an address (empty for missing cells).
    pub fn edit_at(&self, address: &str) -> SheetResult<String> {
        let addr = Address::parse(address)?;
        Ok(self
            .cell_at(&addr)
            .map(Cell::edit_content)
            .unwrap_or_default())
    }

    /// The corner of the sheet's bounding box: the maximal materialized
    /// column combined with the maximal populated row.
    ///
    /// The two maxima are computed independently, so the returned address may
    /// itself never have been written. An empty sheet is bounded by A1.
    pub fn bounds(&self) -> Address {
        let mut max_col: u16 = 0;
        let mut max_row: u32 = 1;
        for (&col, rows) in &self.columns {
            if rows.is_empty() {
                continue;
            }
            if col > max_col {
                max_col = col;
            }
            for &row in rows.keys() {
                if row > max_row {
                    max_row = row;
                }
            }
        }
        Address::new(max_col, max_row)
    }

    /// Every materialized cell whose address falls in the closed rectangle,
    /// rows outer and columns inner.
    pub fn cells_in_range(&self, start: &Address, end: &Address) -> Vec<(Address, &Cell)> {
        let mut cells = Vec::new();
        for row in start.row..=end.row {
            for col in start.col..=end.col {
                let addr = Address::new(col, row);
                if let Some(cell) = self.cell_at(&addr) {
                    cells.push((addr, cell));
                }
            }
        }
        cells
    }

    /// The materialized cell at an address, if any.
    pub fn cell_at(&self, addr: &Address) -> Option<&Cell> {
        let id = self.cell_id_at(addr)?;
        self.slots[id.0].as_ref()
    }

    // === Arena management ===

    fn cell_id_at(&self, addr: &Address) -> Option<CellId> {
        self.columns
            .get(&addr.col)
            .and_then(|rows| rows.get(&addr.row))
            .copied()
    }

    fn cell_or_create(&mut self, addr: &Address) -> CellId {
        if let Some(id) = self.cell_id_at(addr) {
            return id;
        }

        let cell = Cell::new(*addr);
        let id = match self.free_slots.pop() {
            Some(id) => {
                self.slots[id.0] = Some(cell);
                id
            }
            None => {
                self.slots.push(Some(cell));
                CellId(self.slots.len() - 1)
            }
        };
        self.columns.entry(addr.col).or_default().insert(addr.row, id);
        id
    }

    fn cell_ref(&self, id: CellId) -> &Cell {
        self.slots[id.0].as_ref().expect("cell id points to a freed slot")
    }

    fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        self.slots[id.0].as_mut().expect("cell id points to a freed slot")
    }

    /// Drop a transient cell nothing depends on: unindex it and free its
    /// slot. Cells with dependents are retained so their address keeps
    /// resolving (to zero).
    fn prune_if_unreferenced(&mut self, id: CellId) {
        let addr = match self.slots[id.0].as_ref() {
            Some(cell) if cell.is_transient() && cell.downstream.is_empty() => cell.address,
            _ => return,
        };

        if let Some(rows) = self.columns.get_mut(&addr.col) {
            rows.remove(&addr.row);
            if rows.is_empty() {
                self.columns.remove(&addr.col);
            }
        }
        self.slots[id.0] = None;
        self.free_slots.push(id);
    }

    // === Content classification and dependency maintenance ===

    /// Classify new content and rewire dependency edges.
    ///
    /// The upstream/downstream relation stays symmetric: detaching removes
    /// one downstream occurrence per upstream occurrence (duplicates are
    /// meaningful), attaching registers this cell with every referenced
    /// cell, creating those cells on demand.
    fn apply_content(&mut self, id: CellId, content: &str) {
        self.detach_upstream(id);

        if content.is_empty() {
            // Reset to the transient variant, preserving address and
            // downstream set.
            self.cell_mut(id).state = CellState::Transient;
            return;
        }

        if content.starts_with('=') {
            let mut formula = FormulaState {
                source: content.to_string(),
                expr: None,
                value: 0.0,
                error: None,
            };

            match parse_formula(content).and_then(|expr| {
                let addrs = expr.referenced_cells()?;
                Ok((expr, addrs))
            }) {
                // Parse and reference failures are cached on the cell;
                // attachment completes with zero references.
                Err(error) => formula.error = Some(error),
                Ok((expr, addrs)) => {
                    let mut upstream = Vec::with_capacity(addrs.len());
                    for addr in &addrs {
                        let up = self.cell_or_create(addr);
                        self.cell_mut(up).downstream.push(id);
                        upstream.push(up);
                    }
                    self.cell_mut(id).upstream = upstream;
                    formula.expr = Some(expr);
                }
            }

            self.cell_mut(id).state = CellState::Formula(formula);
        } else if let Ok(value) = content.parse::<f64>() {
            self.cell_mut(id).state = CellState::Number(value);
        } else {
            self.cell_mut(id).state = CellState::Text(content.to_string());
        }
    }

    /// Remove this cell from the downstream set of every current upstream
    /// cell and clear its upstream set, pruning upstream transients that
    /// lose their last dependent.
    fn detach_upstream(&mut self, id: CellId) {
        let upstream = std::mem::take(&mut self.cell_mut(id).upstream);
        for up in upstream {
            if let Some(cell) = self.slots[up.0].as_mut() {
                if let Some(pos) = cell.downstream.iter().position(|&d| d == id) {
                    cell.downstream.swap_remove(pos);
                }
            }
            self.prune_if_unreferenced(up);
        }
    }

    // === Recalculation ===

    /// Depth-first recalculation starting from an edited cell.
    ///
    /// The in-progress flag stays set across the downstream cascade; that is
    /// what makes cycle re-entry detectable. On re-entry the cell caches a
    /// cyclical-dependency error and, the first time only, walks its
    /// upstream edges under the secondary guard so every member of the cycle
    /// is marked during the same pass.
    pub(crate) fn recalculate(&mut self, id: CellId) {
        if self.cell_ref(id).recalculating {
            let cell = self.cell_mut(id);
            if let CellState::Formula(formula) = &mut cell.state {
                formula.error = Some(FormulaError::CyclicalDependency);
            }
            if !cell.cycle_visited {
                cell.cycle_visited = true;
                let upstream = cell.upstream.clone();
                for up in upstream {
                    self.recalculate(up);
                }
                self.cell_mut(id).cycle_visited = false;
            }
            return;
        }

        self.cell_mut(id).recalculating = true;

        let expr = match &self.cell_ref(id).state {
            CellState::Formula(formula) => formula.expr.clone(),
            _ => None,
        };
        if let Some(expr) = expr {
            let result = evaluate(&expr, &*self);
            if let CellState::Formula(formula) = &mut self.cell_mut(id).state {
                match result {
                    Ok(value) => {
                        formula.value = value;
                        formula.error = None;
                    }
                    Err(error) => formula.error = Some(error),
                }
            }
        }

        // Dependents do not interact with each other's recalculation, only
        // with this cell's already-finalized state.
        let downstream = self.cell_ref(id).downstream.clone();
        for down in downstream {
            self.recalculate(down);
        }

        self.fire_update(id);
        self.cell_mut(id).recalculating = false;
    }

    fn fire_update(&mut self, id: CellId) {
        if self.on_cell_updated.is_none() {
            return;
        }
        let addr = match self.slots[id.0].as_ref() {
            Some(cell) => cell.address.to_string(),
            None => return,
        };
        if let (Some(callback), Some(cell)) =
            (self.on_cell_updated.as_mut(), self.slots[id.0].as_ref())
        {
            callback(&addr, cell);
        }
    }
}

impl ReferenceResolver for Sheet {
    fn resolve_reference(&self, reference: &str) -> FormulaResult<f64> {
        let addr = Address::parse(reference)
            .map_err(|_| FormulaError::UnresolvedReference(reference.to_string()))?;
        match self.cell_at(&addr) {
            None => Ok(0.0),
            Some(cell) => cell.value(),
        }
    }
}
