//! Per-frame scene drawing
//!
//! Two layers: clouds go on the background. The foreground gets the ground,
//! pooled entities in registry order, then the player on top.

use glam::Vec2;

use super::surface::{DrawSurface, Rect};
use crate::config::GameConfig;
use crate::platform::assets::{HERO_FRAME_SIZE, HERO_SPRITE};
use crate::sim::{Color, EntityKind, Explosion, Planet, Player, SessionPhase, SimulationState};

const GROUND_COLOR: Color = Color::rgba(46, 42, 64, 1.0);
const PLANET_COLOR: Color = Color::rgba(255, 105, 180, 1.0);
const PLANET_LINE_WIDTH: f32 = 2.0;
const DEBUG_COLOR: Color = Color::rgba(255, 0, 0, 1.0);

/// Draw one frame of `state` onto the two layers
pub fn render(
    state: &SimulationState,
    config: &GameConfig,
    fg: &mut impl DrawSurface,
    bg: &mut impl DrawSurface,
) {
    let full = Rect::new(0.0, 0.0, config.canvas.width, config.canvas.height);
    fg.clear_rect(full);
    bg.clear_rect(full);
    if state.phase != SessionPhase::OnGoing {
        return;
    }

    draw_ground(fg, config);

    for entry in &state.tracked {
        match entry.kind {
            // Drawn last, above everything else
            EntityKind::Player => {}
            EntityKind::Planet(i) => {
                if let Some(planet) = state.planets.get(i).filter(|p| !p.free) {
                    draw_planet(fg, planet);
                }
            }
            EntityKind::Explosion(i) => {
                if let Some(explosion) = state.explosions.get(i).filter(|e| !e.free) {
                    draw_explosion(fg, explosion);
                }
            }
            EntityKind::Cloud(i) => {
                if let Some(cloud) = state.clouds.get(i) {
                    for contained in &cloud.particles {
                        let p = &contained.particle;
                        bg.fill_circle(p.pos, p.size, p.color);
                    }
                }
            }
        }
    }

    if state.is_tracked(state.player.body.id) {
        draw_player(fg, &state.player);
    }

    if config.debug {
        draw_bounding_boxes(fg, state);
    }
}

fn draw_ground(surface: &mut impl DrawSurface, config: &GameConfig) {
    // Feet rest on the ground line; the player is center-anchored
    let top = config.ground + config.hero.height * 0.5;
    surface.fill_rect(
        Rect::new(0.0, top, config.canvas.width, (config.canvas.height - top).max(0.0)),
        GROUND_COLOR,
    );
}

fn draw_planet(surface: &mut impl DrawSurface, planet: &Planet) {
    surface.set_line_width(PLANET_LINE_WIDTH);
    surface.stroke_circle(planet.body.pos, planet.body.width * 0.5, PLANET_COLOR);
}

fn draw_explosion(surface: &mut impl DrawSurface, explosion: &Explosion) {
    for p in explosion.particles.iter().filter(|p| p.active) {
        surface.fill_circle(p.pos, p.size, p.color);
    }
}

fn draw_player(surface: &mut impl DrawSurface, player: &Player) {
    let body = &player.body;

    // Dust trails behind the feet, opposite the facing side
    let offset = Vec2::new(-body.width * 0.15 * player.dx, body.height * 0.1);
    for p in &player.dust {
        surface.fill_circle(p.pos + offset, p.size, p.color);
    }

    let anim = &player.animation;
    let src = Rect::new(
        anim.frame_x as f32 * HERO_FRAME_SIZE,
        anim.frame_y as f32 * HERO_FRAME_SIZE,
        HERO_FRAME_SIZE,
        HERO_FRAME_SIZE,
    );
    surface.save();
    surface.translate(body.pos.x, body.pos.y);
    surface.scale(player.dx, 1.0);
    surface.draw_image(
        HERO_SPRITE,
        src,
        Rect::centered(Vec2::ZERO, body.width, body.height),
    );
    surface.restore();
}

fn draw_bounding_boxes(surface: &mut impl DrawSurface, state: &SimulationState) {
    surface.set_line_width(1.0);
    for (_, body) in state.live_bodies() {
        surface.stroke_rect(body.bounding_box().into(), DEBUG_COLOR);
    }
}
