use partial_tab_graphics::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    Down,
    Move,
    Up,
    Cancel,
}

impl PointerAction {
    /// Up and Cancel both end a touch sequence.
    pub fn ends_sequence(&self) -> bool {
        matches!(self, PointerAction::Up | PointerAction::Cancel)
    }
}

/// A single touch sample in window coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub position: Point,
    /// Event time in milliseconds, on the host's monotonic clock.
    pub time_ms: i64,
}

impl PointerEvent {
    pub fn new(action: PointerAction, position: Point, time_ms: i64) -> Self {
        Self {
            action,
            position,
            time_ms,
        }
    }

    pub fn down(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerAction::Down, Point::new(x, y), time_ms)
    }

    pub fn moved(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerAction::Move, Point::new(x, y), time_ms)
    }

    pub fn up(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerAction::Up, Point::new(x, y), time_ms)
    }

    pub fn cancel(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerAction::Cancel, Point::new(x, y), time_ms)
    }

    /// Same position and time with a different action.
    pub fn with_action(mut self, action: PointerAction) -> Self {
        self.action = action;
        self
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }
}
