/// Pointer, wheel and host events, in viewport pixels where positional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Press at (x, y). `button` uses DOM numbering, 0 is primary.
    PointerDown { x: f32, y: f32, button: u32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    /// Positive `delta_y` scrolls down (zooms out).
    Wheel { delta_y: f32 },
    /// Overlay action. The game assigns meaning to `kind` and the payload.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Events pushed by the host between two frames.
///
/// Browsers fire `pointermove` and `wheel` far more often than we render, so
/// consecutive hover moves collapse into the latest position and consecutive
/// wheel deltas are summed. Moves made while a button is held are all kept:
/// drag handling measures the path travelled, not just where it ended.
/// Anything else keeps its place in the order it arrived.
pub struct InputQueue {
    pending: Vec<InputEvent>,
    /// A pointer button is down (survives `drain`).
    held: bool,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            pending: Vec::with_capacity(32),
            held: false,
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { .. } => self.held = true,
            InputEvent::PointerUp { .. } => self.held = false,
            _ => {}
        }
        let held = self.held;
        match (self.pending.last_mut(), event) {
            (Some(InputEvent::PointerMove { x, y }), InputEvent::PointerMove { x: nx, y: ny })
                if !held =>
            {
                *x = nx;
                *y = ny;
            }
            (Some(InputEvent::Wheel { delta_y }), InputEvent::Wheel { delta_y: more }) => {
                *delta_y += more;
            }
            _ => self.pending.push(event),
        }
    }

    /// Take everything queued so far, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.pending.iter()
    }

    /// Custom events with the given kind, payload only.
    pub fn custom(&self, kind: u32) -> impl Iterator<Item = (f32, f32, f32)> + '_ {
        self.pending.iter().filter_map(move |event| match *event {
            InputEvent::Custom { kind: k, a, b, c } if k == kind => Some((a, b, c)),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
