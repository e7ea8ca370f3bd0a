use crate::input::ButtonSample;
use crate::model::Point;
use std::time::{Duration, Instant};

/// Everything one polling tick observes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    pub buttons: ButtonSample,
    /// Cursor position in screen coordinates.
    pub cursor: Point,
    /// Top-left corner of the overlay in screen coordinates.
    pub window_pos: Point,
    pub now: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    MoveWindow(Point),
    SetPenetration(bool),
    Repaint,
    Terminate,
}

/// Effects produced by a tick, in the order they were issued.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects(Vec<Effect>);

impl Effects {
    fn push(&mut self, effect: Effect) {
        self.0.push(effect);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.0.iter()
    }

    pub fn contains(&self, effect: &Effect) -> bool {
        self.0.contains(effect)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn wants_repaint(&self) -> bool {
        self.contains(&Effect::Repaint)
    }

    pub fn wants_exit(&self) -> bool {
        self.contains(&Effect::Terminate)
    }
}

impl IntoIterator for Effects {
    type Item = Effect;
    type IntoIter = std::vec::IntoIter<Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    anchor_offset: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Draw {
    started_at: Instant,
    anchor: Point,
}

/// Drag and draw state derived from level-triggered button samples.
///
/// Drag (tertiary) and draw (primary) are tracked independently; holding
/// both at once is allowed and each behaves as if the other were idle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    drag: Option<Drag>,
    draw: Option<Draw>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_drawing(&self) -> bool {
        self.draw.is_some()
    }

    /// Offset of the cursor from the window origin when the drag began.
    pub fn drag_anchor_offset(&self) -> Option<Point> {
        self.drag.map(|drag| drag.anchor_offset)
    }

    /// Window-local point where the current draw began.
    pub fn draw_anchor(&self) -> Option<Point> {
        self.draw.map(|draw| draw.anchor)
    }

    pub fn draw_started_at(&self) -> Option<Instant> {
        self.draw.map(|draw| draw.started_at)
    }

    /// Time spent drawing as of `now`; zero when idle.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.draw
            .map(|draw| now.saturating_duration_since(draw.started_at))
            .unwrap_or_default()
    }

    /// Advance the state machine by one polling tick.
    pub fn tick(&mut self, input: TickInput) -> Effects {
        let mut effects = Effects::default();
        self.update_drag(&input, &mut effects);
        if input.buttons.secondary {
            tracing::info!("dismiss button held; requesting exit");
            effects.0.extend(self.dismiss());
        }
        self.update_draw(&input, &mut effects);
        if self.is_drawing() {
            effects.push(Effect::Repaint);
        }
        effects
    }

    /// Request exit without touching drag or draw state.
    pub fn dismiss(&self) -> Effects {
        Effects(vec![Effect::Terminate])
    }

    /// The escape key dismisses the overlay just like the secondary button.
    pub fn escape(&self) -> Effects {
        tracing::info!("escape pressed; requesting exit");
        self.dismiss()
    }

    fn update_drag(&mut self, input: &TickInput, effects: &mut Effects) {
        match (input.buttons.tertiary, self.drag) {
            (true, None) => {
                let anchor_offset = input.cursor - input.window_pos;
                tracing::debug!(?anchor_offset, "drag started");
                self.drag = Some(Drag { anchor_offset });
                effects.push(Effect::SetPenetration(false));
            }
            (true, Some(drag)) => {
                effects.push(Effect::MoveWindow(input.cursor - drag.anchor_offset));
            }
            (false, Some(_)) => {
                tracing::debug!("drag ended");
                self.drag = None;
                effects.push(Effect::SetPenetration(true));
            }
            (false, None) => {}
        }
    }

    fn update_draw(&mut self, input: &TickInput, effects: &mut Effects) {
        match (input.buttons.primary, self.draw) {
            (true, None) => {
                let anchor = input.cursor - input.window_pos;
                tracing::debug!(?anchor, "draw started");
                self.draw = Some(Draw {
                    started_at: input.now,
                    anchor,
                });
            }
            (false, Some(_)) => {
                tracing::debug!("draw ended");
                self.draw = None;
                effects.push(Effect::Repaint);
            }
            (true, Some(_)) | (false, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buttons(primary: bool, secondary: bool, tertiary: bool) -> ButtonSample {
        ButtonSample {
            primary,
            secondary,
            tertiary,
        }
    }

    fn input(
        buttons: ButtonSample,
        cursor: (f32, f32),
        window: (f32, f32),
        now: Instant,
    ) -> TickInput {
        TickInput {
            buttons,
            cursor: Point::new(cursor.0, cursor.1),
            window_pos: Point::new(window.0, window.1),
            now,
        }
    }

    fn listed(effects: &Effects) -> Vec<Effect> {
        effects.iter().copied().collect()
    }

    #[test]
    fn idle_tick_has_no_effects() {
        let mut state = InteractionState::new();
        let effects = state.tick(input(
            ButtonSample::RELEASED,
            (5.0, 5.0),
            (0.0, 0.0),
            Instant::now(),
        ));
        assert!(effects.is_empty());
        assert!(!state.is_dragging());
        assert!(!state.is_drawing());
    }

    #[test]
    fn drag_captures_moves_and_releases() {
        let mut state = InteractionState::new();
        let now = Instant::now();

        let held = buttons(false, false, true);
        let effects = state.tick(input(held, (350.0, 260.0), (300.0, 200.0), now));
        assert_eq!(listed(&effects), vec![Effect::SetPenetration(false)]);
        assert_eq!(state.drag_anchor_offset(), Some(Point::new(50.0, 60.0)));

        let effects = state.tick(input(held, (400.0, 300.0), (300.0, 200.0), now));
        assert_eq!(listed(&effects), vec![Effect::MoveWindow(Point::new(350.0, 240.0))]);

        let released = ButtonSample::RELEASED;
        let effects = state.tick(input(released, (400.0, 300.0), (350.0, 240.0), now));
        assert_eq!(listed(&effects), vec![Effect::SetPenetration(true)]);
        assert!(!state.is_dragging());
    }

    #[test]
    fn draw_anchor_is_fixed_while_held() {
        let mut state = InteractionState::new();
        let start = Instant::now();

        let held = buttons(true, false, false);
        let effects = state.tick(input(held, (120.0, 80.0), (20.0, 30.0), start));
        assert_eq!(state.draw_anchor(), Some(Point::new(100.0, 50.0)));
        assert_eq!(state.draw_started_at(), Some(start));
        assert_eq!(listed(&effects), vec![Effect::Repaint]);

        let later = start + Duration::from_millis(250);
        state.tick(input(held, (400.0, 400.0), (20.0, 30.0), later));
        assert_eq!(state.draw_anchor(), Some(Point::new(100.0, 50.0)));
        assert_eq!(state.elapsed(later), Duration::from_millis(250));
    }

    #[test]
    fn releasing_primary_requests_one_final_repaint() {
        let mut state = InteractionState::new();
        let now = Instant::now();
        state.tick(input(buttons(true, false, false), (1.0, 1.0), (0.0, 0.0), now));

        let effects = state.tick(input(ButtonSample::RELEASED, (1.0, 1.0), (0.0, 0.0), now));
        assert_eq!(effects.len(), 1);
        assert!(effects.wants_repaint());
        assert!(!state.is_drawing());
        assert_eq!(state.elapsed(now), Duration::ZERO);

        let effects = state.tick(input(ButtonSample::RELEASED, (1.0, 1.0), (0.0, 0.0), now));
        assert!(effects.is_empty());
    }

    #[test]
    fn secondary_terminates_every_tick_regardless_of_state() {
        let mut state = InteractionState::new();
        let now = Instant::now();
        for sample in [
            buttons(false, true, false),
            buttons(true, true, true),
            buttons(false, true, true),
        ] {
            let effects = state.tick(input(sample, (0.0, 0.0), (0.0, 0.0), now));
            assert!(effects.wants_exit());
        }
    }

    #[test]
    fn escape_terminates() {
        let mut state = InteractionState::new();
        state.tick(input(buttons(true, false, true), (0.0, 0.0), (0.0, 0.0), Instant::now()));
        assert!(state.escape().wants_exit());
    }

    #[test]
    fn dismiss_leaves_drag_and_draw_untouched() {
        let mut state = InteractionState::new();
        state.tick(input(buttons(true, false, true), (4.0, 4.0), (0.0, 0.0), Instant::now()));
        assert_eq!(listed(&state.dismiss()), vec![Effect::Terminate]);
        assert!(state.is_dragging());
        assert!(state.is_drawing());
    }

    #[test]
    fn drag_and_draw_can_overlap() {
        let mut state = InteractionState::new();
        let now = Instant::now();
        let effects = state.tick(input(buttons(true, false, true), (10.0, 10.0), (0.0, 0.0), now));
        assert!(state.is_dragging());
        assert!(state.is_drawing());
        assert_eq!(listed(&effects), vec![Effect::SetPenetration(false), Effect::Repaint]);
    }
}
