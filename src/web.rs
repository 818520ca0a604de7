//! Browser bindings
//!
//! The page owns the canvas and the `requestAnimationFrame` loop; it feeds
//! pointer input in level coordinates, calls `tick` once per frame and
//! renders from `snapshot_json`.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::consts::SIM_DT;
use crate::level::Course;
use crate::sim::{GameState, GamePhase, PointerEvent, TickInput, tick};

#[wasm_bindgen]
pub struct WebGolf {
    course: Course,
    level_index: usize,
    state: GameState,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGolf {
    /// Start the classic course. `seed` drives particle scatter only.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Result<WebGolf, JsValue> {
        console_error_panic_hook::set_once();
        // Already initialised when a second instance is created
        let _ = console_log::init_with_level(log::Level::Info);

        let course = Course::classic();
        let first = course
            .get(0)
            .cloned()
            .ok_or_else(|| JsValue::from_str("course is empty"))?;
        log::info!("Mini Golf (web) starting, {} holes", course.len());
        Ok(WebGolf {
            state: GameState::new(first, Default::default(), u64::from(seed)),
            course,
            level_index: 0,
            input: TickInput::default(),
        })
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.input.push(PointerEvent::Press(Vec2::new(x, y)));
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.input.push(PointerEvent::Move(Vec2::new(x, y)));
    }

    pub fn release(&mut self) {
        self.input.push(PointerEvent::Release);
    }

    pub fn cancel(&mut self) {
        self.input.push(PointerEvent::Cancel);
    }

    /// Advance one simulation step. `dt` is the frame time in seconds and
    /// only drives timers; zero or negative means the nominal step.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt > 0.0 { dt } else { SIM_DT };
        tick(&mut self.state, &self.input, dt);
        self.input.clear();
    }

    /// Move on after a completed hole. Returns false if the course is over,
    /// the current hole has not been holed yet, or its completion has not
    /// been delivered.
    pub fn next_level(&mut self) -> bool {
        if self.state.phase != GamePhase::HoleOut || self.state.completion_pending() {
            return false;
        }
        match self.course.get(self.level_index + 1).cloned() {
            Some(level) => {
                self.state.begin_transition();
                if self.state.next_level(level) {
                    self.level_index += 1;
                    true
                } else {
                    false
                }
            }
            None => {
                self.state.finish_course();
                false
            }
        }
    }

    /// Replay the current hole
    pub fn restart(&mut self) {
        self.input.clear();
        match self.course.get(self.level_index).cloned() {
            Some(level) => self.state.restart(level),
            None => log::error!("No level at index {}", self.level_index),
        }
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_else(|e| {
            log::error!("Failed to serialize snapshot: {}", e);
            "null".to_string()
        })
    }

    pub fn drain_events_json(&mut self) -> String {
        let events = self.state.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::error!("Failed to serialize events: {}", e);
            "[]".to_string()
        })
    }
}
