/// Screen layout: maps the virtual 1024×768 scene onto terminal cells.
///
///   row 0                 HUD (title + room number)
///   rows 1 .. h-3         scene
///   row h-3               text entry box
///   rows h-2, h-1         notification bar
///
/// A terminal cell covers a small virtual rectangle. The object shown in a
/// cell is the highest-priority object overlapping it, and a click on that
/// cell is snapped to a point inside that same object, so anything drawn is
/// clickable even when it is smaller than a cell.

use crate::domain::geometry::{ObjectId, Point, Rect, RoomLayout, VIRTUAL_H, VIRTUAL_W};

pub const HUD_ROWS: usize = 1;
pub const BOTTOM_ROWS: usize = 3;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Layout {
    pub cols: usize,
    pub rows: usize,
}

impl Layout {
    pub fn new(cols: usize, rows: usize) -> Self {
        Layout { cols: cols.max(1), rows }
    }

    pub fn scene_top(&self) -> usize {
        HUD_ROWS
    }

    pub fn scene_rows(&self) -> usize {
        self.rows.saturating_sub(HUD_ROWS + BOTTOM_ROWS).max(1)
    }

    pub fn input_row(&self) -> usize {
        self.scene_top() + self.scene_rows()
    }

    pub fn notification_row(&self) -> usize {
        self.input_row() + 1
    }

    /// Virtual area covered by a terminal cell; `None` outside the scene.
    pub fn cell_rect(&self, col: usize, row: usize) -> Option<Rect> {
        let top = self.scene_top();
        let rows = self.scene_rows();
        if col >= self.cols || row < top || row >= top + rows {
            return None;
        }
        let r = row - top;
        let x0 = (col * VIRTUAL_W as usize / self.cols) as i32;
        let x1 = ((col + 1) * VIRTUAL_W as usize / self.cols) as i32;
        let y0 = (r * VIRTUAL_H as usize / rows) as i32;
        let y1 = ((r + 1) * VIRTUAL_H as usize / rows) as i32;
        Some(Rect::new(x0, y0, (x1 - x0).max(1), (y1 - y0).max(1)))
    }

    /// Terminal cell containing a virtual point (clamped to the scene).
    pub fn cell_of(&self, p: Point) -> (usize, usize) {
        let x = p.x.clamp(0, VIRTUAL_W - 1) as usize;
        let y = p.y.clamp(0, VIRTUAL_H - 1) as usize;
        let col = x * self.cols / VIRTUAL_W as usize;
        let row = y * self.scene_rows() / VIRTUAL_H as usize;
        (col, self.scene_top() + row)
    }

    /// The object drawn in this cell.
    pub fn object_at(&self, room: &RoomLayout, col: usize, row: usize) -> Option<(ObjectId, Rect)> {
        let cell = self.cell_rect(col, row)?;
        room.objects().iter().copied().find(|(_, r)| r.intersects(&cell))
    }

    /// Virtual point for a pointer at this cell.
    ///
    /// Snapped inside the object drawn there; the cell centre otherwise.
    pub fn pointer(&self, room: &RoomLayout, col: usize, row: usize) -> Option<Point> {
        let cell = self.cell_rect(col, row)?;
        let cx = cell.x + cell.w / 2;
        let cy = cell.y + cell.h / 2;
        match self.object_at(room, col, row) {
            Some((_, r)) => Some(Point::new(
                cx.clamp(r.x.max(cell.x), r.right().min(cell.right()) - 1),
                cy.clamp(r.y.max(cell.y), r.bottom().min(cell.bottom()) - 1),
            )),
            None => Some(Point::new(cx, cy)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::{GeometryCatalog, Room};

    #[test]
    fn rows_are_partitioned() {
        let l = Layout::new(80, 24);
        assert_eq!(l.scene_top(), 1);
        assert_eq!(l.scene_rows(), 20);
        assert_eq!(l.input_row(), 21);
        assert_eq!(l.notification_row(), 22);
        assert!(l.cell_rect(0, 0).is_none());
        assert!(l.cell_rect(0, 21).is_none());
        assert!(l.cell_rect(80, 5).is_none());
    }

    #[test]
    fn cells_tile_the_scene() {
        let l = Layout::new(80, 24);
        let first = l.cell_rect(0, 1).unwrap();
        let last = l.cell_rect(79, 20).unwrap();
        assert_eq!((first.x, first.y), (0, 0));
        assert_eq!((last.right(), last.bottom()), (VIRTUAL_W, VIRTUAL_H));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let l = Layout::new(0, 2);
        assert_eq!(l.scene_rows(), 1);
        assert!(l.cell_rect(0, 1).is_some());
    }

    #[test]
    fn cell_of_stays_in_scene() {
        let l = Layout::new(80, 24);
        assert_eq!(l.cell_of(Point::new(-50, -50)), (0, 1));
        assert_eq!(l.cell_of(Point::new(5000, 5000)), (79, 20));
    }

    /// Every object visible at a cell is what a click there resolves to,
    /// at a cramped and a roomy terminal size.
    #[test]
    fn drawn_objects_are_clickable() {
        let catalog = GeometryCatalog::default();
        for (cols, rows) in [(80, 24), (200, 60)] {
            let l = Layout::new(cols, rows);
            for room in [Room::Room1, Room::Room2, Room::Room3] {
                let rl = catalog.layout(room);
                let mut seen = vec![];
                for row in l.scene_top()..l.input_row() {
                    for col in 0..cols {
                        let p = l.pointer(rl, col, row).unwrap();
                        let drawn = l.object_at(rl, col, row).map(|(id, _)| id);
                        assert_eq!(catalog.hit_test(room, p), drawn, "{room:?} cell ({col},{row})");
                        if let Some(id) = drawn {
                            if !seen.contains(&id) { seen.push(id); }
                        }
                    }
                }
                assert_eq!(seen.len(), rl.objects().len(), "{room:?} at {cols}x{rows}");
            }
        }
    }
}
