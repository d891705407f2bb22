use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

use crate::error::{PlannerError, Result};
use crate::graph_search::search_state::SearchState;
use crate::map_representation::grid_graph::GridGraph;
use crate::Cell;

const VISITED_TINT: Rgb<u8> = Rgb([120, 170, 230]);
const PATH_COLOUR: Rgb<u8> = Rgb([230, 140, 20]);
const START_COLOUR: Rgb<u8> = Rgb([40, 180, 60]);
const GOAL_COLOUR: Rgb<u8> = Rgb([210, 40, 40]);

/// Draw a search result on top of its map.
///
/// Each cell becomes a `scale` x `scale` block, row `j` of the grid at pixel
/// row `j * scale`. Free space is light and likely obstacles dark; discovered
/// cells are tinted, the route is overdrawn, and start and goal are marked with
/// discs. Fails if the image would be too large to address.
pub fn render_plan(
    graph: &GridGraph,
    state: &SearchState,
    path: &[Cell],
    start: Cell,
    goal: Cell,
    scale: u32,
) -> Result<RgbImage> {
    let scale = scale.max(1);
    let (image_width, image_height) =
        match (pixel_extent(graph.width(), scale), pixel_extent(graph.height(), scale)) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                return Err(PlannerError::ImageTooLarge {
                    width: graph.width(),
                    height: graph.height(),
                    scale,
                })
            }
        };
    let mut image = RgbImage::new(image_width, image_height);

    for j in 0..graph.height() as i64 {
        for i in 0..graph.width() as i64 {
            let shade = odds_to_shade(graph.odds(i, j).unwrap_or(0));
            let mut colour = Rgb([shade, shade, shade]);
            if state.is_visited(Cell::new(i, j)) {
                colour = blend(colour, VISITED_TINT);
            }
            fill_cell(&mut image, graph, Cell::new(i, j), scale, colour);
        }
    }

    for cell in path {
        fill_cell(&mut image, graph, *cell, scale, PATH_COLOUR);
    }

    let radius = (scale as i32 / 2).max(1);
    for (cell, colour) in [(start, START_COLOUR), (goal, GOAL_COLOUR)] {
        if graph.is_cell_in_bounds(cell.i, cell.j) {
            let center = (
                (cell.i as i32) * scale as i32 + scale as i32 / 2,
                (cell.j as i32) * scale as i32 + scale as i32 / 2,
            );
            draw_filled_circle_mut(&mut image, center, radius, colour);
        }
    }

    Ok(image)
}

/// Pixels spanned by `cells` blocks of `scale`, kept within `i32` for drawing.
fn pixel_extent(cells: usize, scale: u32) -> Option<u32> {
    let pixels = u32::try_from(cells).ok()?.checked_mul(scale)?;
    i32::try_from(pixels).ok()?;
    Some(pixels)
}

/// -128 (certainly free) maps to white, 127 (certainly occupied) to black.
fn odds_to_shade(odds: i8) -> u8 {
    (127 - odds as i16) as u8
}

fn blend(a: Rgb<u8>, b: Rgb<u8>) -> Rgb<u8> {
    let mix = |x: u8, y: u8| ((x as u16 + y as u16) / 2) as u8;
    Rgb([mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])])
}

fn fill_cell(image: &mut RgbImage, graph: &GridGraph, cell: Cell, scale: u32, colour: Rgb<u8>) {
    if !graph.is_cell_in_bounds(cell.i, cell.j) {
        return;
    }
    let rect = Rect::at(cell.i as i32 * scale as i32, cell.j as i32 * scale as i32)
        .of_size(scale, scale);
    draw_filled_rect_mut(image, rect, colour);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_search::breadth_first_search::breadth_first_search;
    use crate::Point;

    #[test]
    fn test_shade_range() {
        assert_eq!(odds_to_shade(-128), 255);
        assert_eq!(odds_to_shade(127), 0);
        assert_eq!(odds_to_shade(0), 127);
    }

    #[test]
    fn test_render_dimensions_and_colours() {
        let mut odds = vec![-128; 12];
        odds[2 * 4 + 3] = 127; // (3, 2) obstacle
        let mut graph = GridGraph::new(4, 3, Point::new(0.0, 0.0), 0.1, odds).unwrap();
        graph.set_collision_radius(0.05).unwrap();
        let mut state = SearchState::new(&graph);
        let start = Cell::new(0, 0);
        let goal = Cell::new(3, 0);
        let path = breadth_first_search(&graph, &mut state, start, goal);

        let image = render_plan(&graph, &state, &path, start, goal, 10).unwrap();
        assert_eq!(image.dimensions(), (40, 30));
        // Corner pixels avoid the start/goal discs
        assert_eq!(*image.get_pixel(10, 0), PATH_COLOUR);
        assert_eq!(*image.get_pixel(30, 20), Rgb([0, 0, 0]));
        assert_eq!(*image.get_pixel(0, 29), blend(Rgb([255, 255, 255]), VISITED_TINT));
        assert_eq!(*image.get_pixel(5, 5), START_COLOUR);
        assert_eq!(*image.get_pixel(35, 5), GOAL_COLOUR);
    }

    #[test]
    fn test_rejects_oversized_image() {
        let graph = GridGraph::filled(40, 3, Point::new(0.0, 0.0), 0.1, -128).unwrap();
        let state = SearchState::new(&graph);
        let start = Cell::new(0, 0);
        assert!(matches!(
            render_plan(&graph, &state, &[], start, start, u32::MAX),
            Err(PlannerError::ImageTooLarge { scale: u32::MAX, .. })
        ));
        // 40 * 2^26 pixels no longer fits the drawing coordinates
        assert!(render_plan(&graph, &state, &[], start, start, 1 << 26).is_err());
    }
}
