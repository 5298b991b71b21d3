use glam::Vec2;
use macroquad::{
    color::Color as MacroquadColor,
    math::Vec2 as MacroquadVec2,
    shapes::{draw_circle, draw_circle_lines, draw_line, draw_rectangle, draw_triangle},
    text::{draw_text, measure_text},
};
use risk_rush_core::{PolicyKind, RiskKind};
use risk_rush_rendering::{
    BoosterPresentation, BuildingPresentation, Color, DropletPresentation, HudPresentation,
    ObstaclePresentation, OverlayPresentation, PlayerPresentation, RoadPresentation, Scene,
    ToastLayout, ToastPresentation,
};

const GROUND_TOP: Color = Color::from_rgb_u8(80, 160, 40);
const GROUND_BOTTOM: Color = Color::from_rgb_u8(60, 120, 30);
const WINDOW: Color = Color::from_rgba_u8(200, 200, 255, 100);
const ROAD: Color = Color::from_rgb_u8(70, 70, 70);
const ROAD_LINE: Color = Color::from_rgb_u8(220, 220, 0);
const CURB: Color = Color::from_rgb_u8(150, 150, 150);
const SNOW: Color = Color::from_rgb_u8(245, 245, 255);
const RAIN: Color = Color::from_rgba_u8(170, 190, 230, 180);
const STAR: Color = Color::from_rgb_u8(255, 255, 255);
const PLAYER: Color = Color::from_rgb_u8(60, 120, 220);
const PLAYER_DETAIL_DARK: Color = Color::from_rgb_u8(40, 60, 100);
const PLAYER_DETAIL_LIGHT: Color = Color::from_rgb_u8(150, 180, 240);
const PLAYER_EYE: Color = Color::from_rgb_u8(220, 255, 255);
const UI_TEXT: Color = Color::from_rgb_u8(230, 230, 230);
const UI_BACKGROUND: Color = Color::from_rgba_u8(30, 30, 30, 180);
const TOAST_BACKGROUND: Color = Color::from_rgba_u8(0, 0, 0, 200);
const OVERLAY: Color = Color::from_rgba_u8(0, 0, 0, 220);
const LEADERBOARD_HEADER: Color = Color::from_rgb_u8(128, 128, 128);
const LEADERBOARD_PLAYER: Color = Color::from_rgb_u8(255, 255, 0);
const LEADERBOARD_OTHER: Color = Color::from_rgb_u8(200, 200, 200);
const BLACK: Color = Color::from_rgb_u8(0, 0, 0);

const GRADIENT_STEP: f32 = 2.0;
const UI_PADDING: f32 = 10.0;
const UI_ROW_HEIGHT: f32 = 40.0;
const TOAST_FONT_SIZE: u16 = 20;

/// Draws every layer of the scene in strict back-to-front order.
pub(crate) fn draw_scene(scene: &Scene) {
    macroquad::window::clear_background(to_macroquad_color(scene.sky.top));

    let offset = scene.shake_offset;
    draw_sky(scene, offset);
    if let Some(sun) = scene.sun {
        draw_circle(
            sun.center.x + offset.x,
            sun.center.y + offset.y,
            sun.radius,
            to_macroquad_color(sun.color),
        );
    }
    if scene.star_alpha > 0.0 {
        let color = to_macroquad_color(STAR.faded(scene.star_alpha));
        for star in &scene.stars {
            draw_circle(
                star.position.x + offset.x,
                star.position.y + offset.y,
                star.size,
                color,
            );
        }
    }
    draw_ground(scene, offset);
    for building in &scene.buildings {
        draw_building(building, &scene.snow_caps, offset);
    }
    draw_road(&scene.road, scene.width, offset);
    for obstacle in &scene.obstacles {
        draw_obstacle(obstacle, offset);
    }
    for booster in &scene.boosters {
        draw_booster(booster, offset);
    }
    if let Some(player) = &scene.player {
        draw_player(player, offset);
    }
    for particle in &scene.particles {
        if particle.size >= 1.0 {
            draw_circle(
                particle.position.x + offset.x,
                particle.position.y + offset.y,
                particle.size,
                to_macroquad_color(particle.color),
            );
        }
    }
    draw_precipitation(&scene.precipitation, offset);
    draw_hud(&scene.hud, scene.width);
    if let Some(toast) = &scene.toast {
        draw_toast(toast, scene.width, scene.height);
    }
    if let Some(overlay) = &scene.overlay {
        draw_overlay(overlay, scene.sky.bottom, scene.width, scene.height);
    }
}

fn draw_sky(scene: &Scene, offset: Vec2) {
    let horizon = scene.sky.horizon.max(0.0);
    let mut y = 0.0;
    while y < horizon {
        let ratio = y / horizon;
        let color = scene.sky.top.lerp(scene.sky.bottom, ratio);
        draw_rectangle(
            offset.x,
            y + offset.y,
            scene.width,
            GRADIENT_STEP,
            to_macroquad_color(color),
        );
        y += GRADIENT_STEP;
    }
}

fn draw_ground(scene: &Scene, offset: Vec2) {
    let top = scene.ground_top;
    let depth = (scene.height - top).max(0.0);
    let mut y = 0.0;
    while y < depth {
        let color = GROUND_TOP.lerp(GROUND_BOTTOM, y / depth);
        draw_rectangle(
            offset.x,
            top + y + offset.y,
            scene.width,
            GRADIENT_STEP,
            to_macroquad_color(color),
        );
        y += GRADIENT_STEP;
    }
    draw_snow_cap(&scene.snow_caps, offset.x, top + offset.y, scene.width);
}

fn draw_building(building: &BuildingPresentation, snow_caps: &[f32], offset: Vec2) {
    let bounds = building.bounds.translated(offset);
    let min = bounds.min();
    let (width, height) = (bounds.width(), bounds.height());
    draw_rectangle(min.x, min.y, width, height, to_macroquad_color(building.color));

    let edge = to_macroquad_color(building.color.darken(20.0 / 255.0));
    draw_line(min.x, min.y, min.x, min.y + height, 3.0, edge);
    draw_line(min.x, min.y, min.x + width, min.y, 3.0, edge);

    let window_color = to_macroquad_color(WINDOW);
    for window in &building.windows {
        let window = window.translated(offset);
        draw_rectangle(
            window.min().x,
            window.min().y,
            window.width(),
            window.height(),
            window_color,
        );
    }
    draw_snow_cap(snow_caps, min.x, min.y, width);
}

/// Drapes the cached drift profile over a horizontal edge.
fn draw_snow_cap(depths: &[f32], left: f32, top: f32, width: f32) {
    if depths.is_empty() || width <= 0.0 {
        return;
    }
    let color = to_macroquad_color(SNOW);
    let step = width / depths.len() as f32;
    for (index, depth) in depths.iter().enumerate() {
        draw_rectangle(left + index as f32 * step, top - 1.0, step + 0.5, *depth, color);
    }
}

fn draw_road(road: &RoadPresentation, screen_width: f32, offset: Vec2) {
    draw_rectangle(
        offset.x,
        road.top + offset.y,
        screen_width,
        (road.bottom_curb - road.top).max(0.0),
        to_macroquad_color(ROAD),
    );

    let line_color = to_macroquad_color(ROAD_LINE);
    for x in dash_starts(road.dash_offset, road.dash_length + road.dash_gap, screen_width) {
        for separator in &road.separators {
            draw_line(
                x + offset.x,
                separator + offset.y,
                x + road.dash_length + offset.x,
                separator + offset.y,
                road.dash_thickness,
                line_color,
            );
        }
    }

    let curb = to_macroquad_color(CURB);
    draw_rectangle(
        offset.x,
        road.top - road.curb_thickness + offset.y,
        screen_width,
        road.curb_thickness,
        curb,
    );
    draw_rectangle(
        offset.x,
        road.bottom_curb + offset.y,
        screen_width,
        road.curb_thickness,
        curb,
    );
}

/// Left edges of every dash that may be visible on a screen `width` wide.
fn dash_starts(offset: f32, pattern: f32, width: f32) -> impl Iterator<Item = f32> {
    let pattern = if pattern.is_finite() && pattern > 0.0 {
        pattern
    } else {
        width.max(1.0)
    };
    let count = ((width - offset) / pattern).ceil().max(0.0) as usize;
    (0..count).map(move |index| offset + index as f32 * pattern)
}

fn draw_obstacle(obstacle: &ObstaclePresentation, offset: Vec2) {
    let bounds = obstacle.bounds.translated(offset);
    let min = bounds.min();
    let (w, h) = (bounds.width(), bounds.height());
    let at = |fx: f32, fy: f32| Vec2::new(min.x + w * fx, min.y + h * fy);
    let color = to_macroquad_color(Color::from(obstacle.risk.color()));

    match obstacle.risk {
        RiskKind::Tree => {
            let trunk = at(0.35, 0.43);
            draw_rectangle(trunk.x, trunk.y, w * 0.3, h * 0.57, color);
            let crowns = [
                (at(0.5, 0.25), 0.35, Color::from_rgb_u8(30, 150, 30)),
                (at(0.25, 0.36), 0.25, Color::from_rgb_u8(40, 160, 40)),
                (at(0.75, 0.39), 0.3, Color::from_rgb_u8(20, 140, 20)),
            ];
            for (center, radius, crown) in crowns {
                draw_circle(center.x, center.y, w * radius, to_macroquad_color(crown));
            }
        }
        RiskKind::Phone => {
            draw_rectangle(min.x, min.y, w, h, color);
            let screen = at(0.08, 0.08);
            draw_rectangle(
                screen.x,
                screen.y,
                w * 0.83,
                h * 0.5,
                to_macroquad_color(Color::from_rgb_u8(30, 30, 30)),
            );
            let button = at(0.5, 0.83);
            draw_circle(
                button.x,
                button.y,
                w * 0.13,
                to_macroquad_color(Color::from_rgb_u8(60, 60, 60)),
            );
        }
        RiskKind::Accident => {
            draw_quad(
                [at(0.0, 0.25), at(0.45, 0.12), at(0.53, 0.75), at(0.08, 0.88)],
                Color::from_rgb_u8(200, 50, 50),
            );
            draw_quad(
                [at(0.37, 0.0), at(0.87, 0.25), at(0.83, 0.75), at(0.33, 0.5)],
                Color::from_rgb_u8(80, 80, 180),
            );
        }
        RiskKind::Bill => {
            for sheet in 0..3_u8 {
                let inset = f32::from(sheet) * 3.0;
                let shade = 220 - sheet * 10;
                draw_rectangle(
                    min.x + inset,
                    min.y + inset,
                    w - inset * 1.5,
                    h - inset * 1.5,
                    to_macroquad_color(Color::from_rgb_u8(shade, shade, shade - 20)),
                );
            }
            let ink = to_macroquad_color(Color::from_rgb_u8(100, 100, 100));
            for row in 0..3_u8 {
                let y = min.y + 10.0 + f32::from(row) * 5.0;
                draw_line(min.x + 5.0, y, min.x + w - 10.0, y, 1.0, ink);
            }
            let stamp = at(0.75, 0.75);
            draw_circle_lines(stamp.x, stamp.y, w * 0.12, 1.5, color);
        }
    }
}

fn draw_booster(booster: &BoosterPresentation, offset: Vec2) {
    let center = booster.bounds.translated(offset).center();
    let radius = booster.bounds.width() * 0.5 * booster.pulse;
    let color = Color::from(booster.policy.color());
    draw_circle(
        center.x,
        center.y,
        radius,
        to_macroquad_color(color.faded(80.0 / 255.0)),
    );
    draw_circle(center.x, center.y, radius * 0.8, to_macroquad_color(color));

    let letter = policy_letter(booster.policy);
    let size = (radius * 0.8).max(1.0);
    draw_centered_text(letter, center.x, center.y, size, BLACK);
}

fn policy_letter(policy: PolicyKind) -> &'static str {
    policy.label().get(..1).unwrap_or("?")
}

fn draw_player(player: &PlayerPresentation, offset: Vec2) {
    let bounds = player.bounds.translated(offset);
    let (w, h) = (bounds.width(), bounds.height());
    let center = bounds.center();
    let rotation = Vec2::from_angle(-player.tilt_degrees.to_radians());
    let local = |fx: f32, fy: f32| {
        let point = Vec2::new(w * (fx - 0.5), h * (fy - 0.5));
        center + rotation.rotate(point)
    };

    let body_top = 0.2;
    let body = [
        local(0.1, body_top),
        local(0.9, body_top),
        local(1.0, 0.95),
        local(0.7, 1.0),
        local(0.3, 1.0),
        local(0.0, 0.95),
    ];
    let hub = local(0.5, 0.6);
    for index in 0..body.len() {
        let next = body[(index + 1) % body.len()];
        draw_triangle(to_vec2(hub), to_vec2(body[index]), to_vec2(next), to_macroquad_color(PLAYER));
    }

    let shadow = to_macroquad_color(PLAYER.darken(30.0 / 255.0));
    for panel_x in [0.12, 0.88] {
        let top = local(panel_x, body_top + 0.1);
        let bottom = local(panel_x, body_top + 0.5);
        draw_line(top.x, top.y, bottom.x, bottom.y, w * 0.15, shadow);
    }

    let head = local(0.5, 0.175);
    draw_circle(head.x, head.y, w * 0.4, to_macroquad_color(PLAYER_DETAIL_LIGHT));
    draw_circle_lines(head.x, head.y, w * 0.4, 2.0, shadow);

    let eye_scale = 0.9 + 0.1 * ((player.anim_phase * 2.5).sin() * 0.5 + 0.5);
    let brightness = 0.8 + 0.2 * ((player.anim_phase * 1.5 + std::f32::consts::FRAC_PI_2).sin() * 0.5 + 0.5);
    let eye = local(0.5, 0.16);
    let eye_color = Color::new(
        PLAYER_EYE.red * brightness,
        PLAYER_EYE.green * brightness,
        PLAYER_EYE.blue * brightness,
        1.0,
    );
    draw_circle(eye.x, eye.y, w * 0.24 * eye_scale, to_macroquad_color(eye_color));

    for nozzle_x in [0.35, 0.65] {
        let nozzle = local(nozzle_x, 0.95);
        draw_circle(nozzle.x, nozzle.y, w * 0.08, to_macroquad_color(PLAYER_DETAIL_DARK));
    }
}

fn draw_precipitation(droplets: &[DropletPresentation], offset: Vec2) {
    let rain = to_macroquad_color(RAIN);
    let snow = to_macroquad_color(SNOW);
    for droplet in droplets {
        match *droplet {
            DropletPresentation::Rain { head, tail } => draw_line(
                tail.x + offset.x,
                tail.y + offset.y,
                head.x + offset.x,
                head.y + offset.y,
                1.5,
                rain,
            ),
            DropletPresentation::Snow { center, radius } => {
                draw_circle(center.x + offset.x, center.y + offset.y, radius, snow);
            }
        }
    }
}

fn draw_hud(hud: &HudPresentation, screen_width: f32) {
    let background = to_macroquad_color(UI_BACKGROUND);

    let clock_width = text_width(&hud.clock, 28);
    let clock_left = screen_width * 0.5 - clock_width * 0.5 - UI_PADDING;
    draw_rectangle(
        clock_left,
        UI_PADDING,
        clock_width + UI_PADDING * 2.0,
        UI_ROW_HEIGHT,
        background,
    );
    draw_centered_text(
        &hud.clock,
        screen_width * 0.5,
        UI_PADDING + UI_ROW_HEIGHT * 0.5,
        28.0,
        UI_TEXT,
    );

    let score_width = text_width(&hud.score, 24);
    let score_left = screen_width - score_width - UI_PADDING * 3.0;
    draw_rectangle(
        score_left,
        UI_PADDING,
        score_width + UI_PADDING * 2.0,
        UI_ROW_HEIGHT,
        background,
    );
    draw_left_text(
        &hud.score,
        score_left + UI_PADDING,
        UI_PADDING + UI_ROW_HEIGHT * 0.5,
        24.0,
        Color::from_rgb_u8(0, 255, 0),
    );

    let label = "Budget:";
    let label_width = text_width(label, 24);
    let heart_radius = 8.0;
    let heart_step = heart_radius * 2.5;
    let hearts_width = hud.hearts.len() as f32 * heart_step;
    draw_rectangle(
        UI_PADDING,
        UI_PADDING,
        label_width + hearts_width + UI_PADDING * 3.0,
        UI_ROW_HEIGHT,
        background,
    );
    let row_center = UI_PADDING + UI_ROW_HEIGHT * 0.5;
    draw_left_text(label, UI_PADDING * 2.0, row_center, 24.0, hud.heart_color);
    let first_heart = UI_PADDING * 3.0 + label_width + heart_radius;
    for (index, filled) in hud.hearts.iter().enumerate() {
        let center = Vec2::new(first_heart + index as f32 * heart_step, row_center);
        draw_heart(center, heart_radius, hud.heart_color, *filled);
    }

    let mut x = screen_width * 0.5;
    let badge_top = UI_PADDING * 2.0 + UI_ROW_HEIGHT;
    let badge_height = UI_ROW_HEIGHT * 0.8;
    let widths: Vec<f32> = hud
        .badges
        .iter()
        .map(|badge| text_width(badge.policy.label(), 20) + UI_PADDING * 2.0)
        .collect();
    let total: f32 = widths.iter().sum::<f32>() + UI_PADDING * widths.len().saturating_sub(1) as f32;
    x -= total * 0.5;
    for (badge, width) in hud.badges.iter().zip(widths) {
        draw_rectangle(
            x,
            badge_top,
            width,
            badge_height,
            to_macroquad_color(badge.color.faded(180.0 / 255.0)),
        );
        draw_centered_text(
            badge.policy.label(),
            x + width * 0.5,
            badge_top + badge_height * 0.5,
            20.0,
            Color::from_rgb_u8(255, 255, 255),
        );
        x += width + UI_PADDING;
    }
}

fn draw_heart(center: Vec2, radius: f32, color: Color, filled: bool) {
    let lobe = radius * 0.5;
    let left = center + Vec2::new(-lobe, -lobe * 0.5);
    let right = center + Vec2::new(lobe, -lobe * 0.5);
    let tip = center + Vec2::new(0.0, radius);
    let color = to_macroquad_color(color);
    if filled {
        draw_circle(left.x, left.y, lobe, color);
        draw_circle(right.x, right.y, lobe, color);
        draw_triangle(
            to_vec2(center + Vec2::new(-radius, -lobe * 0.3)),
            to_vec2(center + Vec2::new(radius, -lobe * 0.3)),
            to_vec2(tip),
            color,
        );
    } else {
        draw_circle_lines(left.x, left.y, lobe, 1.5, color);
        draw_circle_lines(right.x, right.y, lobe, 1.5, color);
        let side_left = center + Vec2::new(-radius, -lobe * 0.3);
        let side_right = center + Vec2::new(radius, -lobe * 0.3);
        draw_line(side_left.x, side_left.y, tip.x, tip.y, 1.5, color);
        draw_line(side_right.x, side_right.y, tip.x, tip.y, 1.5, color);
    }
}

fn draw_toast(toast: &ToastPresentation, screen_width: f32, screen_height: f32) {
    let line_height = f32::from(TOAST_FONT_SIZE);
    let layout = ToastLayout::new(&toast.message, line_height, |line| {
        text_width(line, TOAST_FONT_SIZE)
    });
    let origin = layout.origin(screen_width, screen_height);
    draw_rectangle(
        origin.x,
        origin.y,
        layout.size.x,
        layout.size.y,
        to_macroquad_color(TOAST_BACKGROUND.faded(toast.alpha)),
    );
    let text_color = Color::from_rgb_u8(255, 255, 255).faded(toast.alpha);
    for (index, line) in layout.lines.iter().enumerate() {
        let top = origin.y + layout.line_top(index);
        draw_centered_text(
            line,
            origin.x + layout.size.x * 0.5,
            top + line_height * 0.5,
            line_height,
            text_color,
        );
    }
}

fn draw_overlay(overlay: &OverlayPresentation, blurb_color: Color, width: f32, height: f32) {
    draw_rectangle(0.0, 0.0, width, height, to_macroquad_color(OVERLAY));
    let center_x = width * 0.5;
    draw_centered_text(&overlay.title, center_x, height / 3.0, 70.0, overlay.title_color);
    draw_centered_text(&overlay.score, center_x, height * 0.5, 45.0, Color::from_rgb_u8(255, 255, 255));
    if let Some(blurb) = &overlay.blurb {
        draw_centered_text(blurb, center_x, height * 0.5 + 70.0, 24.0, blurb_color);
    }
    let prompt_y = height * 0.72;
    draw_centered_text(&overlay.prompt, center_x, prompt_y, 28.0, Color::from_rgb_u8(255, 255, 255));
    draw_centered_text(
        "--- Leaderboard (mock) ---",
        center_x,
        prompt_y + 60.0,
        22.0,
        LEADERBOARD_HEADER,
    );
    for (index, row) in overlay.leaderboard.iter().enumerate() {
        let text = format!(
            "{}. {} ..... {} RUB",
            row.rank,
            row.name,
            risk_rush_core::format_amount(row.score)
        );
        let color = if row.is_player {
            LEADERBOARD_PLAYER
        } else {
            LEADERBOARD_OTHER
        };
        draw_centered_text(&text, center_x, prompt_y + 95.0 + index as f32 * 28.0, 20.0, color);
    }
}

fn text_width(text: &str, font_size: u16) -> f32 {
    measure_text(text, None, font_size, 1.0).width
}

fn draw_centered_text(text: &str, center_x: f32, center_y: f32, font_size: f32, color: Color) {
    let size = font_size.round().clamp(1.0, f32::from(u16::MAX)) as u16;
    let dimensions = measure_text(text, None, size, 1.0);
    let _ = draw_text(
        text,
        center_x - dimensions.width * 0.5,
        center_y + dimensions.height * 0.5,
        font_size,
        to_macroquad_color(color),
    );
}

fn draw_left_text(text: &str, left: f32, center_y: f32, font_size: f32, color: Color) {
    let size = font_size.round().clamp(1.0, f32::from(u16::MAX)) as u16;
    let dimensions = measure_text(text, None, size, 1.0);
    let _ = draw_text(
        text,
        left,
        center_y + dimensions.height * 0.5,
        font_size,
        to_macroquad_color(color),
    );
}

fn draw_quad(corners: [Vec2; 4], color: Color) {
    let color = to_macroquad_color(color);
    let [a, b, c, d] = corners.map(to_vec2);
    draw_triangle(a, b, c, color);
    draw_triangle(a, c, d, color);
}

fn to_vec2(point: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(point.x, point.y)
}

fn to_macroquad_color(color: Color) -> MacroquadColor {
    MacroquadColor::new(color.red, color.green, color.blue, color.alpha)
}
