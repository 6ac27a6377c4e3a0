//! Drawing-surface abstraction.
//!
//! Game logic never talks to the terminal.  It draws onto a [`Surface`]; the
//! [`Frame`] surface simply records the calls so `tick` can hand them to the
//! host, which replays them in order (later draws cover earlier ones).

use crate::entities::{Enemy, Player, Projectile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Enemy,
    /// Full-arena starfield background.
    Stars,
    Player,
    Projectile,
}

/// Fire-and-forget sound triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    Kill,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font: &'static str,
    pub fill: &'static str,
}

/// Style of every HUD and game-over line.
pub const HUD_TEXT: TextStyle = TextStyle {
    font: "bold 30px Impact",
    fill: "#ffffff",
};

#[derive(Clone, Debug, PartialEq)]
pub enum RenderCommand {
    DrawSprite { sprite: Sprite, x: f64, y: f64 },
    DrawText { text: String, x: f64, y: f64, style: TextStyle },
    PlayAudio(AudioCue),
}

pub trait Surface {
    fn draw_sprite(&mut self, sprite: Sprite, x: f64, y: f64);
    /// `y` is the text baseline.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);
    fn play(&mut self, cue: AudioCue);
}

/// Everything one tick drew, in paint order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<RenderCommand>,
}

impl Frame {
    pub fn sprites(&self) -> impl Iterator<Item = (Sprite, f64, f64)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            RenderCommand::DrawSprite { sprite, x, y } => Some((*sprite, *x, *y)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            RenderCommand::DrawText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn cues(&self) -> impl Iterator<Item = AudioCue> + '_ {
        self.commands.iter().filter_map(|c| match c {
            RenderCommand::PlayAudio(cue) => Some(*cue),
            _ => None,
        })
    }
}

impl Surface for Frame {
    fn draw_sprite(&mut self, sprite: Sprite, x: f64, y: f64) {
        self.commands.push(RenderCommand::DrawSprite { sprite, x, y });
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.commands.push(RenderCommand::DrawText {
            text: text.to_string(),
            x,
            y,
            style: style.clone(),
        });
    }

    fn play(&mut self, cue: AudioCue) {
        self.commands.push(RenderCommand::PlayAudio(cue));
    }
}

// ── Entity rendering ─────────────────────────────────────────────────────────

/// Anything drawn as one sprite at its own position.
pub trait Entity {
    fn sprite(&self) -> Sprite;
    fn position(&self) -> (f64, f64);

    fn render<S: Surface>(&self, surface: &mut S) {
        let (x, y) = self.position();
        surface.draw_sprite(self.sprite(), x, y);
    }
}

impl Entity for Enemy {
    fn sprite(&self) -> Sprite {
        Sprite::Enemy
    }

    fn position(&self) -> (f64, f64) {
        (self.x as f64, self.y)
    }
}

impl Entity for Player {
    fn sprite(&self) -> Sprite {
        Sprite::Player
    }

    fn position(&self) -> (f64, f64) {
        (self.x as f64, self.y)
    }
}

impl Entity for Projectile {
    fn sprite(&self) -> Sprite {
        Sprite::Projectile
    }

    fn position(&self) -> (f64, f64) {
        (self.x as f64, self.y)
    }

    fn render<S: Surface>(&self, surface: &mut S) {
        if self.fired {
            surface.draw_sprite(Sprite::Projectile, self.x as f64, self.y);
        }
    }
}
