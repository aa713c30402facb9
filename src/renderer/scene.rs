//! Full-frame scene drawing for each game mode

use super::surface::{DrawSurface, TextAlign};
use crate::consts::WINNING_SCORE;
use crate::settings::Theme;
use crate::sim::{Ball, GameMode, GameState, Paddle};

/// Frame-level extras that are not part of the game state
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay {
    /// Frames per second to show in the HUD, if enabled
    pub fps: Option<u32>,
}

/// Redraw the whole frame for the current mode
pub fn render<S: DrawSurface>(surface: &mut S, state: &GameState, theme: &Theme, overlay: &Overlay) {
    let (w, h) = (state.surface.width, state.surface.height);

    surface.set_fill_color(&theme.background);
    surface.fill_rect(0.0, 0.0, w, h);

    match state.mode {
        GameMode::Menu => draw_menu(surface, state, theme),
        GameMode::Playing => {
            draw_paddle(surface, &state.player, theme);
            draw_paddle(surface, &state.computer, theme);
            draw_ball(surface, &state.ball, theme);
            draw_score(surface, state, theme);
            if let Some(fps) = overlay.fps {
                draw_fps(surface, state, theme, fps);
            }
        }
        GameMode::Instructions => draw_instructions(surface, state, theme),
        GameMode::GameOver => draw_game_over(surface, state, theme),
    }
}

fn font(theme: &Theme, px: u32) -> String {
    format!("{}px {}", px, theme.font_family)
}

pub fn draw_paddle<S: DrawSurface>(surface: &mut S, paddle: &Paddle, theme: &Theme) {
    surface.set_fill_color(&theme.foreground);
    surface.fill_rect(paddle.pos.x, paddle.pos.y, paddle.width, paddle.height);
}

pub fn draw_ball<S: DrawSurface>(surface: &mut S, ball: &Ball, theme: &Theme) {
    surface.set_fill_color(&theme.foreground);
    surface.fill_circle(ball.pos.x, ball.pos.y, ball.radius);
}

fn draw_menu<S: DrawSurface>(surface: &mut S, state: &GameState, theme: &Theme) {
    let cx = state.surface.width / 2.0;
    let cy = state.surface.height / 2.0;

    surface.set_fill_color(&theme.foreground);
    surface.set_font(&font(theme, 48));
    surface.set_text_align(TextAlign::Center);
    surface.fill_text("Pong Game", cx, cy - 100.0);
    surface.set_font(&font(theme, 36));
    surface.fill_text("Press ENTER to Play", cx, cy);
    surface.fill_text("Press I for Instructions", cx, cy + 50.0);
}

fn draw_instructions<S: DrawSurface>(surface: &mut S, state: &GameState, theme: &Theme) {
    let cx = state.surface.width / 2.0;
    let cy = state.surface.height / 2.0;

    surface.set_fill_color(&theme.foreground);
    surface.set_font(&font(theme, 36));
    surface.set_text_align(TextAlign::Center);
    surface.fill_text("Instructions", cx, cy - 100.0);
    surface.set_font(&font(theme, 24));
    surface.fill_text(
        "Use the UP and DOWN arrow keys to move your paddle.",
        cx,
        cy - 50.0,
    );
    surface.fill_text(
        &format!("First to {} points wins the game.", WINNING_SCORE),
        cx,
        cy,
    );
    surface.fill_text("Press ENTER to return to the menu.", cx, cy + 50.0);
}

fn draw_game_over<S: DrawSurface>(surface: &mut S, state: &GameState, theme: &Theme) {
    let cx = state.surface.width / 2.0;
    let cy = state.surface.height / 2.0;
    let winner = state.scores.leader();

    surface.set_fill_color(&theme.foreground);
    surface.set_font(&font(theme, 48));
    surface.set_text_align(TextAlign::Center);
    surface.fill_text(&format!("{} Wins!", winner.as_str()), cx, cy - 50.0);
    surface.set_font(&font(theme, 36));
    surface.fill_text("Press ENTER to return to the menu.", cx, cy + 20.0);
}

fn draw_score<S: DrawSurface>(surface: &mut S, state: &GameState, theme: &Theme) {
    surface.set_fill_color(&theme.foreground);
    surface.set_font(&font(theme, 36));
    surface.set_text_align(TextAlign::Left);
    surface.fill_text(&format!("Player: {}", state.scores.player), 20.0, 40.0);
    surface.set_text_align(TextAlign::Right);
    surface.fill_text(
        &format!("Computer: {}", state.scores.computer),
        state.surface.width - 20.0,
        40.0,
    );
}

fn draw_fps<S: DrawSurface>(surface: &mut S, state: &GameState, theme: &Theme, fps: u32) {
    surface.set_fill_color(&theme.foreground);
    surface.set_font(&font(theme, 16));
    surface.set_text_align(TextAlign::Center);
    surface.fill_text(&format!("{} FPS", fps), state.surface.width / 2.0, 24.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::{DrawCommand, RecordingSurface};
    use crate::sim::Surface;

    fn draw(state: &GameState, overlay: Overlay) -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        render(&mut surface, state, &Theme::default(), &overlay);
        surface
    }

    #[test]
    fn test_frame_starts_with_clear() {
        let state = GameState::new(1, 640.0, 480.0);
        let surface = draw(&state, Overlay::default());
        assert_eq!(surface.commands[0], DrawCommand::FillColor("#000".to_string()));
        assert_eq!(
            surface.commands[1],
            DrawCommand::Rect {
                x: 0.0,
                y: 0.0,
                width: 640.0,
                height: 480.0
            }
        );
    }

    #[test]
    fn test_menu_text() {
        let state = GameState::new(1, 640.0, 480.0);
        let surface = draw(&state, Overlay::default());
        assert_eq!(
            surface.texts(),
            vec!["Pong Game", "Press ENTER to Play", "Press I for Instructions"]
        );
        assert!(surface.commands.contains(&DrawCommand::Text {
            text: "Pong Game".to_string(),
            x: 320.0,
            y: 140.0
        }));
        assert!(surface.commands.contains(&DrawCommand::Font("48px Arial".to_string())));
        assert_eq!(surface.circle_count(), 0);
    }

    #[test]
    fn test_instructions_text() {
        let mut state = GameState::new(1, 640.0, 480.0);
        state.set_mode(GameMode::Instructions);
        let surface = draw(&state, Overlay::default());
        assert_eq!(
            surface.texts(),
            vec![
                "Instructions",
                "Use the UP and DOWN arrow keys to move your paddle.",
                "First to 5 points wins the game.",
                "Press ENTER to return to the menu.",
            ]
        );
    }

    #[test]
    fn test_playing_draws_entities_and_hud() {
        let mut state = GameState::new(1, 640.0, 480.0);
        state.set_mode(GameMode::Playing);
        state.scores.player = 2;
        state.scores.computer = 3;
        let surface = draw(&state, Overlay::default());

        // Background plus two paddles
        assert_eq!(surface.rect_count(), 3);
        assert_eq!(surface.circle_count(), 1);
        assert_eq!(surface.texts(), vec!["Player: 2", "Computer: 3"]);
        assert!(surface.commands.contains(&DrawCommand::Text {
            text: "Computer: 3".to_string(),
            x: 620.0,
            y: 40.0
        }));
        assert!(surface.commands.contains(&DrawCommand::Align(TextAlign::Right)));
    }

    #[test]
    fn test_fps_overlay_only_when_enabled() {
        let mut state = GameState::new(1, 640.0, 480.0);
        state.set_mode(GameMode::Playing);
        let surface = draw(&state, Overlay { fps: Some(60) });
        assert!(surface.texts().contains(&"60 FPS"));

        state.set_mode(GameMode::Menu);
        let surface = draw(&state, Overlay { fps: Some(60) });
        assert!(!surface.texts().contains(&"60 FPS"));
    }

    #[test]
    fn test_game_over_announces_winner() {
        let mut state = GameState::new(1, 640.0, 480.0);
        state.set_mode(GameMode::GameOver);
        state.scores.player = 5;
        state.scores.computer = 1;
        let surface = draw(&state, Overlay::default());
        assert_eq!(
            surface.texts(),
            vec!["Player Wins!", "Press ENTER to return to the menu."]
        );

        state.scores.player = 0;
        state.scores.computer = 5;
        let surface = draw(&state, Overlay::default());
        assert_eq!(surface.texts()[0], "Computer Wins!");
    }

    #[test]
    fn test_render_does_not_mutate() {
        let mut state = GameState::new(9, 640.0, 480.0);
        state.set_mode(GameMode::Playing);
        let before = (state.ball.pos, state.player.pos, state.computer.pos, state.scores);
        draw(&state, Overlay::default());
        assert_eq!(
            before,
            (state.ball.pos, state.player.pos, state.computer.pos, state.scores)
        );
        assert_eq!(state.surface, Surface::new(640.0, 480.0));
    }
}
