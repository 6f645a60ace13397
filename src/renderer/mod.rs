//! Rendering module
//!
//! The simulation is turned into a `Frame` (sprite and text commands) which a
//! `Renderer` paints. In the browser that is a Canvas 2D context.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::build_frame;

/// Sprite images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Player,
    Guard,
    Vault,
    Trap,
    PowerUp,
}

impl SpriteId {
    pub const ALL: [SpriteId; 5] = [
        SpriteId::Player,
        SpriteId::Guard,
        SpriteId::Vault,
        SpriteId::Trap,
        SpriteId::PowerUp,
    ];

    /// Image path, relative to the page
    pub fn asset_path(&self) -> &'static str {
        match self {
            SpriteId::Player => "assets/player.png",
            SpriteId::Guard => "assets/guard.png",
            SpriteId::Vault => "assets/vault.png",
            SpriteId::Trap => "assets/trap.png",
            SpriteId::PowerUp => "assets/powerup.png",
        }
    }

    /// Flat fill used until the image has loaded
    pub fn fallback_color(&self) -> &'static str {
        match self {
            SpriteId::Player => "#4fc3f7",
            SpriteId::Guard => "#e53935",
            SpriteId::Vault => "#fdd835",
            SpriteId::Trap => "#8d6e63",
            SpriteId::PowerUp => "#66bb6a",
        }
    }
}

/// Draw one sprite stretched over a rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub sprite: SpriteId,
    pub pos: Vec2,
    pub size: Vec2,
}

/// Draw a line of HUD text
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    pub pos: Vec2,
}

/// Everything needed to paint one frame, in paint order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub sprites: Vec<DrawCommand>,
    pub labels: Vec<TextCommand>,
}

impl Frame {
    /// Number of sprites of one kind
    pub fn count(&self, sprite: SpriteId) -> usize {
        self.sprites.iter().filter(|c| c.sprite == sprite).count()
    }
}

/// Anything that can paint a frame
pub trait Renderer {
    fn render(&mut self, frame: &Frame);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_assets_are_shipped() {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
        for sprite in SpriteId::ALL {
            let path = root.join(sprite.asset_path());
            assert!(path.is_file(), "missing {}", path.display());
        }
    }
}
