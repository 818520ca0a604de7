//! Mini Golf headless demo
//!
//! Plays a course with a simple auto-putter that aims straight at the cup,
//! logging every event. Usage: `mini-golf [course.json] [tuning.json]`.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use anyhow::Context;

    use mini_golf::consts::SIM_DT;
    use mini_golf::sim::{GameEvent, GamePhase, GameState, PointerEvent, TickInput, tick};
    use mini_golf::{Course, HoleResult, ScoreCard, Tuning};

    /// Strokes before the auto-putter picks up and moves on
    const STROKE_LIMIT: u32 = 12;
    /// Frames allowed per hole (a minute at 60 Hz)
    const FRAME_LIMIT: u32 = 60 * 60;

    /// Host-side session: owns the state and feeds it input once per frame
    struct Session {
        course: Course,
        level_index: usize,
        state: GameState,
        input: TickInput,
        card: ScoreCard,
    }

    impl Session {
        fn new(course: Course, tuning: Tuning, seed: u64) -> anyhow::Result<Self> {
            let first = course.get(0).cloned().context("course is empty")?;
            Ok(Self {
                course,
                level_index: 0,
                state: GameState::new(first, tuning, seed),
                input: TickInput::default(),
                card: ScoreCard::new(),
            })
        }

        /// Queue a drag that rolls the ball roughly to the cup
        fn aim_at_hole(&mut self) {
            let tuning = &self.state.tuning;
            let ball = self.state.ball.pos;
            let to_hole = self.state.level.hole.pos() - ball;
            // Rolling distance on grass is about v * f / (1 - f)
            let f = tuning.friction_grass;
            let speed = (to_hole.length() * (1.0 - f) / f * 1.15).min(tuning.max_power);
            let pull = speed / tuning.power_multiplier;
            let target = ball - to_hole.normalize_or_zero() * pull.max(tuning.min_pull + 1.0);

            self.input.push(PointerEvent::Press(ball));
            self.input.push(PointerEvent::Move(target));
            self.input.push(PointerEvent::Release);
        }

        fn play_hole(&mut self) -> Option<u32> {
            for _ in 0..FRAME_LIMIT {
                if self.state.phase == GamePhase::Aiming {
                    if self.state.strokes >= STROKE_LIMIT {
                        log::warn!("Picking up on level {}", self.state.level.id);
                        return None;
                    }
                    self.aim_at_hole();
                }

                tick(&mut self.state, &self.input, SIM_DT);
                self.input.clear();

                for event in self.state.drain_events() {
                    log::debug!("{:?}", event);
                    if let GameEvent::LevelComplete { strokes, .. } = event {
                        self.card.observe(&event);
                        return Some(strokes);
                    }
                }
            }
            log::warn!("Frame limit reached on level {}", self.state.level.id);
            None
        }

        fn run(&mut self) {
            loop {
                let level = self.state.level.clone();
                match self.play_hole() {
                    Some(strokes) => println!(
                        "Hole {} {:<14} par {}  strokes {:>2}  {}",
                        level.id,
                        level.name,
                        level.par,
                        strokes,
                        HoleResult::classify(strokes, level.par).label()
                    ),
                    None => {
                        self.card.record(level.id, STROKE_LIMIT);
                        println!(
                            "Hole {} {:<14} par {}  picked up at {}",
                            level.id, level.name, level.par, STROKE_LIMIT
                        );
                    }
                }

                self.level_index += 1;
                let holed = self.state.phase == GamePhase::HoleOut;
                match self.course.get(self.level_index).cloned() {
                    Some(next) if holed => {
                        self.state.begin_transition();
                        self.state.next_level(next);
                    }
                    Some(next) => self.state.restart(next),
                    None => {
                        if holed {
                            self.state.finish_course();
                        }
                        break;
                    }
                }
            }
            println!(
                "Total {} (course par {})",
                self.card.total(),
                self.course.par()
            );
        }
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::init();
        log::info!("Mini Golf (native) starting...");

        let mut args = std::env::args().skip(1);
        let course = match args.next() {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading course {path}"))?;
                Course::from_json(&json).with_context(|| format!("loading course {path}"))?
            }
            None => Course::classic(),
        };
        let tuning = match args.next() {
            Some(path) => Tuning::load_or_default(path),
            None => Tuning::default(),
        };

        let seed = 2025;
        let mut session = Session::new(course, tuning, seed)?;
        session.run();
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    demo::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry points live in `mini_golf::web`
}
