use crate::map_representation::grid_graph::GridGraph;
use crate::Cell;

/// Progress of a single cell through one search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    /// Not yet discovered
    Unvisited,
    /// Discovered and waiting in the frontier
    Frontier,
    /// Taken off the frontier and expanded
    Expanded,
}

/// Per-query bookkeeping for a graph search.
///
/// A state belongs to exactly one running search. The map it describes is
/// only borrowed while searching, so several states can search the same
/// shared [`GridGraph`] at once.
#[derive(Clone, Debug)]
pub struct SearchState {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
    parent: Vec<Option<Cell>>,
    /// Cost from the start. Reset to infinity for every search; breadth-first
    /// search leaves it untouched, cost-ordered frontiers read and write it.
    g_cost: Vec<f64>,
    /// Cells in the order they were discovered
    visited_cells: Vec<Cell>,
}

impl SearchState {
    /// Allocate a state sized for the given map.
    pub fn new(graph: &GridGraph) -> Self {
        let mut state = Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            parent: Vec::new(),
            g_cost: Vec::new(),
            visited_cells: Vec::new(),
        };
        state.init_graph(graph);
        state
    }

    /// Reset every cell to unvisited with no parent and infinite cost, and
    /// clear the exploration record. Resizes the state if the map differs in
    /// shape from the previous one.
    pub fn init_graph(&mut self, graph: &GridGraph) {
        let size = graph.width() * graph.height();
        self.width = graph.width();
        self.height = graph.height();

        self.cells.clear();
        self.cells.resize(size, CellState::Unvisited);
        self.parent.clear();
        self.parent.resize(size, None);
        self.g_cost.clear();
        self.g_cost.resize(size, f64::INFINITY);
        self.visited_cells.clear();
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// State of a cell. Cells outside the grid are reported as unvisited.
    pub fn cell_state(&self, cell: Cell) -> CellState {
        self.index(cell)
            .map_or(CellState::Unvisited, |idx| self.cells[idx])
    }

    pub fn is_visited(&self, cell: Cell) -> bool {
        self.cell_state(cell) != CellState::Unvisited
    }

    /// Put an unvisited cell in the frontier, remembering where it was reached from.
    /// Returns `false` and changes nothing if the cell was already visited or
    /// lies outside the grid.
    pub fn discover(&mut self, cell: Cell, parent: Option<Cell>) -> bool {
        let idx = match self.index(cell) {
            Some(idx) => idx,
            None => return false,
        };
        if self.cells[idx] != CellState::Unvisited {
            return false;
        }
        self.cells[idx] = CellState::Frontier;
        self.parent[idx] = parent;
        self.visited_cells.push(cell);
        true
    }

    /// Mark a cell as taken off the frontier.
    pub fn expand(&mut self, cell: Cell) {
        if let Some(idx) = self.index(cell) {
            self.cells[idx] = CellState::Expanded;
        }
    }

    /// The cell this one was discovered from; `None` for the start cell and
    /// for cells that were never reached.
    pub fn parent(&self, cell: Cell) -> Option<Cell> {
        self.index(cell).and_then(|idx| self.parent[idx])
    }

    pub fn g_cost(&self, cell: Cell) -> f64 {
        self.index(cell).map_or(f64::INFINITY, |idx| self.g_cost[idx])
    }

    pub fn set_g_cost(&mut self, cell: Cell, cost: f64) {
        if let Some(idx) = self.index(cell) {
            self.g_cost[idx] = cost;
        }
    }

    /// Cells in discovery order, starting with the start cell.
    pub fn visited_cells(&self) -> &[Cell] {
        &self.visited_cells
    }

    /// Number of cells the state covers.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if cell.i < 0 || cell.j < 0 || cell.i >= self.width as i64 || cell.j >= self.height as i64
        {
            return None;
        }
        Some(cell.j as usize * self.width + cell.i as usize)
    }
}
