//! Painted species glyphs for the selection cards.

use eframe::egui::{pos2, vec2, Color32, Painter, Rect, Sense, Stroke, Ui, Vec2};

pub fn mushroom_glyph(ui: &mut Ui, size: Vec2, species_id: &str) {
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect.shrink(4.0);
    match species_id {
        "s-commune" => split_gill(&painter, rect),
        "c-cinerea" => inky_cap(&painter, rect),
        _ => button_mushroom(&painter, rect),
    }
}

// Fan-shaped bracket on a piece of wood, gills radiating from the base.
fn split_gill(painter: &Painter, rect: Rect) {
    let wood = Rect::from_min_max(
        pos2(rect.left(), rect.bottom() - rect.height() * 0.18),
        rect.max,
    );
    painter.rect_filled(wood, 2.0, Color32::from_rgb(87, 63, 48));

    let base = pos2(rect.center().x, wood.top());
    let radius = rect.height() * 0.62;
    let fan = Rect::from_min_max(pos2(rect.left(), base.y - radius), pos2(rect.right(), base.y));
    painter
        .with_clip_rect(fan)
        .circle_filled(base, radius, Color32::from_rgb(222, 205, 175));

    let gill = Stroke::new(1.0, Color32::from_rgb(146, 106, 74));
    for n in 0..7 {
        let angle = std::f32::consts::PI * (0.15 + 0.7 * n as f32 / 6.0);
        let tip = pos2(
            base.x - angle.cos() * radius * 0.92,
            base.y - angle.sin() * radius * 0.92,
        );
        painter.line_segment([base, tip], gill);
    }
}

// Tall slender cap with ink drips at the rim.
fn inky_cap(painter: &Painter, rect: Rect) {
    let stem_width = rect.width() * 0.10;
    let cap_bottom = rect.top() + rect.height() * 0.45;
    let stem = Rect::from_min_max(
        pos2(rect.center().x - stem_width / 2.0, cap_bottom),
        pos2(rect.center().x + stem_width / 2.0, rect.bottom()),
    );
    painter.rect_filled(stem, 2.0, Color32::from_rgb(196, 192, 186));

    let cap_radius = rect.height() * 0.42;
    let cap_center = pos2(rect.center().x, cap_bottom);
    let cap = Rect::from_min_max(
        pos2(rect.center().x - rect.width() * 0.22, rect.top()),
        pos2(rect.center().x + rect.width() * 0.22, cap_bottom),
    );
    painter
        .with_clip_rect(cap)
        .circle_filled(cap_center, cap_radius, Color32::from_rgb(214, 211, 205));

    let ink = Stroke::new(1.5, Color32::from_rgb(68, 64, 60));
    for offset in [-0.18_f32, -0.08, 0.10, 0.20] {
        let x = rect.center().x + rect.width() * offset;
        let drip = rect.height() * (0.06 + offset.abs() * 0.2);
        painter.line_segment([pos2(x, cap_bottom), pos2(x, cap_bottom + drip)], ink);
    }
}

// Classic squat button with a wide dome.
fn button_mushroom(painter: &Painter, rect: Rect) {
    let cap_bottom = rect.top() + rect.height() * 0.52;
    let stem_width = rect.width() * 0.26;
    let stem = Rect::from_min_max(
        pos2(rect.center().x - stem_width / 2.0, cap_bottom),
        pos2(rect.center().x + stem_width / 2.0, rect.bottom()),
    );
    painter.rect_filled(stem, 3.0, Color32::from_rgb(222, 215, 203));

    let cap_center = pos2(rect.center().x, cap_bottom);
    let cap_radius = rect.width() * 0.42;
    let cap = Rect::from_min_max(
        pos2(rect.center().x - cap_radius, cap_bottom - cap_radius),
        pos2(rect.center().x + cap_radius, cap_bottom),
    );
    painter
        .with_clip_rect(cap)
        .circle_filled(cap_center, cap_radius, Color32::from_rgb(236, 230, 220));
    painter.line_segment(
        [
            pos2(cap.left() + 2.0, cap_bottom),
            pos2(cap.right() - 2.0, cap_bottom),
        ],
        Stroke::new(1.5, Color32::from_rgb(168, 152, 130)),
    );
}

pub fn glyph_size() -> Vec2 {
    vec2(84.0, 72.0)
}
