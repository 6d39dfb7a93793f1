//! Scene composition: world, HUD and upgrade menu

use glam::Vec2;

use super::{Color, Renderer, TextAnchor, colors};
use crate::sim::upgrade::{MENU_TITLE, MENU_TITLE_Y};
use crate::sim::{Camera, GamePhase, GameState, UpgradeMenu};

/// HUD placement (screen pixels, unaffected by the camera)
const HUD_ORIGIN: Vec2 = Vec2::new(10.0, 10.0);
const HUD_LINE_HEIGHT: f32 = 30.0;

/// Draw one complete frame for the current phase
pub fn render_frame(renderer: &mut impl Renderer, state: &GameState) {
    renderer.clear(colors::BACKGROUND);

    match &state.phase {
        GamePhase::Choosing(menu) => draw_upgrade_menu(renderer, menu, state.camera.viewport),
        GamePhase::Running | GamePhase::GameOver => {
            draw_world(renderer, state);
            draw_hud(renderer, state);
        }
    }
}

fn draw_circle_world(
    renderer: &mut impl Renderer,
    camera: &Camera,
    pos: Vec2,
    radius: f32,
    color: Color,
) {
    renderer.draw_circle(camera.world_to_screen(pos), camera.scale(radius), color);
}

fn draw_world(renderer: &mut impl Renderer, state: &GameState) {
    let camera = &state.camera;
    let player = &state.player;

    draw_circle_world(renderer, camera, player.pos, player.radius, colors::PLAYER);
    for enemy in &state.enemies {
        draw_circle_world(renderer, camera, enemy.pos, enemy.radius, colors::ENEMY);
    }
    for projectile in &player.projectiles {
        draw_circle_world(
            renderer,
            camera,
            projectile.pos,
            projectile.radius,
            colors::PROJECTILE,
        );
    }
}

fn draw_hud(renderer: &mut impl Renderer, state: &GameState) {
    renderer.draw_text(
        &format!("Score: {}", state.score),
        HUD_ORIGIN,
        TextAnchor::TopLeft,
        colors::TEXT,
    );

    let upgrades = &state.player.upgrades;
    let levels = format!(
        "Split {}  Chain {}  Explosion {}",
        upgrades.split_shot, upgrades.chain_shot, upgrades.explosion_shot
    );
    renderer.draw_text(
        &levels,
        HUD_ORIGIN + Vec2::new(0.0, HUD_LINE_HEIGHT),
        TextAnchor::TopLeft,
        colors::TEXT,
    );
}

fn draw_upgrade_menu(renderer: &mut impl Renderer, menu: &UpgradeMenu, viewport: Vec2) {
    renderer.draw_text(
        MENU_TITLE,
        Vec2::new(viewport.x / 2.0, MENU_TITLE_Y),
        TextAnchor::Center,
        colors::TEXT,
    );

    for option in &menu.options {
        renderer.draw_rect(option.rect, colors::MENU_BORDER);
        renderer.draw_text(
            &option.label(),
            option.rect.center(),
            TextAnchor::Center,
            colors::TEXT,
        );
    }
}
