//! Full-screen launcher and taskbar.
//!
//! Draws a grid of monogram tiles for the catalog apps. Clicking a tile
//! launches the app, minimizes it if it is already up, or restores it if it
//! was minimized; clicks landing inside any open window are left alone.

use crate::core::color::Color;
use crate::core::geometry::{Rect, Size};
use crate::runtime::app::{App, Panel};
use crate::runtime::catalog::AppSeed;
use crate::runtime::context::{OsCommand, OsContext};

/// Apps surfaced at the head of the grid, in this order.
const PINNED: [&str; 2] = ["power off", "files"];

const TILE: Size = Size::new(8, 3);
const MARGIN: i32 = 1;

pub struct DesktopApp {
    name: String,
    panel: Panel,
    apps: Vec<String>,
}

impl DesktopApp {
    #[must_use]
    pub fn new(seed: &AppSeed) -> Self {
        let mut apps = seed.catalog_names.clone();
        apps.retain(|name| *name != seed.name);
        for pinned in PINNED.iter().rev() {
            if let Some(index) = apps.iter().position(|name| name == pinned) {
                let name = apps.remove(index);
                apps.insert(0, name);
            }
        }
        Self {
            name: seed.name.clone(),
            panel: Panel::new(seed.screen, Color::gray(25)),
            apps,
        }
    }

    fn tile_rect(&self, index: usize) -> Rect {
        let per_row = ((self.panel.size().w - MARGIN) / (TILE.w + MARGIN)).max(1);
        let index = index as i32;
        let col = index % per_row;
        let row = index / per_row;
        Rect::new(
            MARGIN + col * (TILE.w + MARGIN),
            MARGIN + row * (TILE.h + MARGIN),
            TILE.w,
            TILE.h,
        )
    }
}

fn monogram(name: &str) -> String {
    name.chars()
        .filter(|ch| !ch.is_whitespace())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

impl App for DesktopApp {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, ctx: &mut OsContext) {
        if !ctx.input.click_started || ctx.mouse_over_window() {
            return;
        }
        let mouse = ctx.input.mouse;
        for (index, app) in self.apps.iter().enumerate() {
            if !self.tile_rect(index).contains(mouse) {
                continue;
            }
            let command = match ctx.windows.iter().find(|info| info.name == *app) {
                Some(info) if info.minimized => OsCommand::Restore(app.clone()),
                Some(_) => OsCommand::Minimize(app.clone()),
                None => OsCommand::Run(app.clone()),
            };
            ctx.request(command);
            return;
        }
    }

    fn render(&mut self, ctx: &mut OsContext) {
        self.panel.surface.fill(self.panel.bg);
        for (index, app) in self.apps.iter().enumerate() {
            let tile = self.tile_rect(index);
            let minimized = ctx
                .windows
                .iter()
                .any(|info| info.name == *app && info.minimized);
            let tile_bg = if minimized {
                Color::gray(120)
            } else {
                Color::BLACK
            };
            self.panel.surface.fill_rect(tile, tile_bg);
            self.panel.surface.draw_text(
                tile.x + 1,
                tile.y + 1,
                &monogram(app),
                Color::WHITE,
                Some(tile_bg),
            );
        }
        self.panel.render_to(&mut ctx.screen);
    }
}

/// Cataloged stand-in for a shutdown switch: running it asks the runtime to
/// exit, which unwinds every app.
pub struct PowerApp {
    name: String,
}

impl PowerApp {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl App for PowerApp {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_run(&mut self, ctx: &mut OsContext) {
        ctx.request(OsCommand::Exit);
    }
}

#[cfg(test)]
mod tests {
    use super::monogram;

    #[test]
    fn monograms_take_two_non_space_chars() {
        assert_eq!(monogram("files"), "FI");
        assert_eq!(monogram("power off"), "PO");
        assert_eq!(monogram("x"), "X");
    }
}
