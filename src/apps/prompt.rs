//! Single-line text entry dialog.
//!
//! Spawned ad hoc by other apps; Enter posts the entered text back to the
//! requesting app as a message and closes the dialog.

use unicode_segmentation::UnicodeSegmentation;

use crate::core::color::Color;
use crate::core::geometry::Size;
use crate::core::input::Key;
use crate::runtime::app::App;
use crate::runtime::context::{AppMessage, OsCommand, OsContext};
use crate::runtime::window::Window;

const PROMPT_SIZE: Size = Size::new(40, 3);

pub struct PromptApp {
    name: String,
    win: Window,
    prompt: String,
    buffer: String,
    reply_to: String,
    topic: String,
    fg: Color,
    rendered: Option<String>,
}

impl PromptApp {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        prompt: impl Into<String>,
        reply_to: impl Into<String>,
        topic: impl Into<String>,
        screen: Size,
    ) -> Self {
        let name = name.into();
        Self {
            win: Window::centered(&name, PROMPT_SIZE, screen, Color::WHITE),
            name,
            prompt: prompt.into(),
            buffer: String::new(),
            reply_to: reply_to.into(),
            topic: topic.into(),
            fg: Color::BLACK,
            rendered: None,
        }
    }

    #[must_use]
    pub fn entered(&self) -> &str {
        &self.buffer
    }
}

impl App for PromptApp {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_window(&mut self) -> Option<&mut Window> {
        Some(&mut self.win)
    }

    fn update(&mut self, ctx: &mut OsContext) {
        for ch in ctx.input.text.chars() {
            if !ch.is_control() {
                self.buffer.push(ch);
            }
        }
        if ctx.input.pressed(Key::Backspace) {
            if let Some((offset, _)) = self.buffer.grapheme_indices(true).next_back() {
                self.buffer.truncate(offset);
            }
        }
        if ctx.input.pressed(Key::Enter) {
            ctx.request(OsCommand::Post(AppMessage {
                to: self.reply_to.clone(),
                topic: self.topic.clone(),
                body: self.buffer.clone(),
            }));
            ctx.request(OsCommand::Close(self.name.clone()));
            return;
        }

        let shown = format!("{}\n{}", self.prompt, self.buffer);
        if self.rendered.as_deref() != Some(shown.as_str()) {
            let bg = self.win.panel.bg;
            self.win.panel.surface.fill(bg);
            self.win
                .panel
                .surface
                .draw_text(1, 0, &self.prompt, self.fg, Some(bg));
            let entry = format!("{}_", self.buffer);
            self.win.panel.surface.draw_text(1, 1, &entry, self.fg, Some(bg));
            self.rendered = Some(shown);
        }
    }

    fn render(&mut self, ctx: &mut OsContext) {
        let screen_size = ctx.screen_size();
        self.win.render_to(&mut ctx.screen, screen_size);
    }
}

#[cfg(test)]
mod tests {
    use super::PromptApp;
    use crate::core::geometry::Size;
    use crate::core::input::Key;
    use crate::runtime::app::App;
    use crate::runtime::context::{OsCommand, OsContext};

    fn context() -> (tempfile::TempDir, OsContext) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = blob_store::Store::open(dir.path()).expect("store");
        (dir, OsContext::new(Size::new(80, 24), store))
    }

    #[test]
    fn backspace_removes_whole_graphemes() {
        let (_dir, mut ctx) = context();
        let mut prompt = PromptApp::new("prompt", "Name:", "files", "rename", Size::new(80, 24));

        ctx.input.push_text("héllo");
        prompt.update(&mut ctx);
        assert_eq!(prompt.entered(), "héllo");

        ctx.input.begin_frame();
        ctx.input.press_key(Key::Backspace);
        prompt.update(&mut ctx);
        assert_eq!(prompt.entered(), "héll");
    }

    #[test]
    fn enter_posts_the_reply_and_closes() {
        let (_dir, mut ctx) = context();
        let mut prompt = PromptApp::new("prompt", "Name:", "files", "rename", Size::new(80, 24));

        ctx.input.push_text("new-name");
        prompt.update(&mut ctx);

        ctx.input.begin_frame();
        ctx.input.press_key(Key::Enter);
        prompt.update(&mut ctx);

        let commands = ctx.drain_commands();
        assert_eq!(commands.len(), 2);
        match &commands[0] {
            OsCommand::Post(message) => {
                assert_eq!(message.to, "files");
                assert_eq!(message.topic, "rename");
                assert_eq!(message.body, "new-name");
            }
            _ => panic!("expected a posted message"),
        }
        assert!(matches!(&commands[1], OsCommand::Close(name) if name == "prompt"));
    }
}
