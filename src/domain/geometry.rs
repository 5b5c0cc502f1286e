/// Geometry catalog: every interactive region of every room.
///
/// All coordinates live in a fixed 1024×768 virtual space. The presentation
/// layer scales that space onto whatever surface it has; hit-testing never
/// sees terminal cells.
///
/// Each room owns its own object list, ordered by hit priority:
///   door > box > color blocks > painting > puzzle device > key item
///
/// The color blocks sit inside the painting's frame, so they rank above it:
/// a click that lands on a block resolves to the block.

pub const VIRTUAL_W: i32 = 1024;
pub const VIRTUAL_H: i32 = 768;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned rectangle: `(x, y)` is the top-left corner.
/// Containment is half-open: left/top edges inside, right/bottom outside.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> i32 { self.x + self.w }
    pub fn bottom(&self) -> i32 { self.y + self.h }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right()
            && self.y < other.bottom() && other.y < self.bottom()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum Room {
    Room1,
    Room2,
    Room3,
}

impl Room {
    /// The room a door leads to. Room 3 has no successor: its door is the exit.
    pub fn next(self) -> Option<Room> {
        match self {
            Room::Room1 => Some(Room::Room2),
            Room::Room2 => Some(Room::Room3),
            Room::Room3 => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Room::Room1 => 1,
            Room::Room2 => 2,
            Room::Room3 => 3,
        }
    }
}

/// Symbolic name of a clickable object.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ObjectId {
    Door,
    Box,
    Painting,
    /// Index into the color block row (0 = red, 1 = green, 2 = blue).
    ColorBlock(usize),
    PuzzleDevice,
    KeyItem,
    /// Room 3's exit.
    FinalDoor,
}

impl ObjectId {
    /// On-screen caption, if the object carries one.
    pub fn label(self, room: Room) -> Option<&'static str> {
        match (self, room) {
            (ObjectId::Door, Room::Room1) => Some("Door"),
            (ObjectId::Door, _) => Some("Exit Door"),
            (ObjectId::Box, _) => Some("Box"),
            (ObjectId::Painting, _) => Some("Painting"),
            (ObjectId::PuzzleDevice, _) => Some("Puzzle Device"),
            (ObjectId::KeyItem, _) => Some("Key"),
            (ObjectId::FinalDoor, _) => Some("Exit Door"),
            (ObjectId::ColorBlock(_), _) => None,
        }
    }

    fn priority(self) -> u8 {
        match self {
            ObjectId::Door | ObjectId::FinalDoor => 0,
            ObjectId::Box => 1,
            ObjectId::ColorBlock(_) => 2,
            ObjectId::Painting => 3,
            ObjectId::PuzzleDevice => 4,
            ObjectId::KeyItem => 5,
        }
    }
}

// ── Fixed room furniture ──

const DOOR: Rect = Rect::new(700, 250, 150, 300);
const BOX: Rect = Rect::new(150, 450, 150, 100);
const PAINTING: Rect = Rect::new(350, 100, 200, 150);
const COLOR_BLOCKS: [Rect; 3] = [
    Rect::new(360, 120, 30, 30),
    Rect::new(400, 140, 30, 30),
    Rect::new(440, 160, 30, 30),
];
const PUZZLE_DEVICE: Rect = Rect::new(200, 200, 200, 150);
const KEY_ITEM: Rect = Rect::new(300, 400, 100, 100);
const FINAL_DOOR: Rect = Rect::new(400, 300, 200, 400);

/// Display-only: where the lion head appears once the device is touched.
pub const LION_HEAD: Rect = Rect::new(300, 250, 200, 200);

/// One room's hit-regions, stored in priority order.
#[derive(Clone, Debug)]
pub struct RoomLayout {
    objects: Vec<(ObjectId, Rect)>,
}

impl RoomLayout {
    fn new(mut objects: Vec<(ObjectId, Rect)>) -> Self {
        // stable: color blocks keep their index order
        objects.sort_by_key(|(id, _)| id.priority());
        RoomLayout { objects }
    }

    pub fn objects(&self) -> &[(ObjectId, Rect)] {
        &self.objects
    }

    #[cfg(test)]
    pub fn rect_of(&self, id: ObjectId) -> Option<Rect> {
        self.objects.iter().find(|(o, _)| *o == id).map(|(_, r)| *r)
    }
}

#[derive(Clone, Debug)]
pub struct GeometryCatalog {
    room1: RoomLayout,
    room2: RoomLayout,
    room3: RoomLayout,
}

impl GeometryCatalog {
    /// Build the three rooms.
    ///
    /// With `shared_door` the Room 3 exit occupies the same rectangle as the
    /// doors of Rooms 1 and 2; otherwise it gets its own, larger frame in
    /// the middle of the room.
    pub fn new(shared_door: bool) -> Self {
        let mut room1 = vec![
            (ObjectId::Door, DOOR),
            (ObjectId::Box, BOX),
            (ObjectId::Painting, PAINTING),
        ];
        room1.extend(
            COLOR_BLOCKS.iter().enumerate().map(|(i, r)| (ObjectId::ColorBlock(i), *r)),
        );

        let room2 = vec![
            (ObjectId::Door, DOOR),
            (ObjectId::PuzzleDevice, PUZZLE_DEVICE),
        ];

        let exit = if shared_door { DOOR } else { FINAL_DOOR };
        let room3 = vec![
            (ObjectId::FinalDoor, exit),
            (ObjectId::KeyItem, KEY_ITEM),
        ];

        GeometryCatalog {
            room1: RoomLayout::new(room1),
            room2: RoomLayout::new(room2),
            room3: RoomLayout::new(room3),
        }
    }

    pub fn layout(&self, room: Room) -> &RoomLayout {
        match room {
            Room::Room1 => &self.room1,
            Room::Room2 => &self.room2,
            Room::Room3 => &self.room3,
        }
    }

    /// First object (by priority) whose rectangle contains `point`.
    pub fn hit_test(&self, room: Room, point: Point) -> Option<ObjectId> {
        self.layout(room)
            .objects
            .iter()
            .find(|(_, r)| r.contains(point))
            .map(|(id, _)| *id)
    }
}

impl Default for GeometryCatalog {
    fn default() -> Self {
        GeometryCatalog::new(true)
    }
}
