//! Menu-tree navigation.
//!
//! A menu is an ordered tree of labeled branches whose leaves are typed
//! commands. Navigation state is a path stack replayed from the root every
//! frame, so out-of-band tree rebuilds (after a delete or rename) take
//! effect without explicit invalidation.

use crate::core::color::Color;
use crate::core::geometry::Size;
use crate::core::input::{InputSnapshot, Key};
use crate::render::Surface;
use crate::runtime::app::App;
use crate::runtime::context::OsContext;
use crate::runtime::window::Window;

/// Synthetic option injected at the top of every non-root branch.
pub const BACK_LABEL: &str = "<- back";

#[derive(Clone, Debug)]
pub enum MenuEntry<C> {
    Branch(MenuBranch<C>),
    Action(C),
    /// Renders and is selectable, but activating it does nothing.
    Inert,
}

#[derive(Clone, Debug)]
pub struct MenuBranch<C> {
    entries: Vec<(String, MenuEntry<C>)>,
    double_back: bool,
}

impl<C> Default for MenuBranch<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            double_back: false,
        }
    }
}

impl<C> MenuBranch<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backing out of this branch pops two levels instead of one; used for
    /// branch pairs that form a single logical screen (a folder listing
    /// reached through its entry's "open").
    #[must_use]
    pub fn double_back(mut self) -> Self {
        self.double_back = true;
        self
    }

    #[must_use]
    pub fn entry(mut self, label: impl Into<String>, entry: MenuEntry<C>) -> Self {
        self.push(label, entry);
        self
    }

    pub fn push(&mut self, label: impl Into<String>, entry: MenuEntry<C>) {
        self.entries.push((label.into(), entry));
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&MenuEntry<C>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, entry)| entry)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    #[must_use]
    pub fn has_double_back(&self) -> bool {
        self.double_back
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cursor over a menu tree: the active path plus the highlighted option.
#[derive(Clone, Debug, Default)]
pub struct MenuNav {
    location: Vec<String>,
    idx: usize,
}

impl MenuNav {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn location(&self) -> &[String] {
        &self.location
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.idx
    }

    pub fn reset(&mut self) {
        self.location.clear();
        self.idx = 0;
    }

    /// Replay the path stack from the root. `None` means the tree changed
    /// underneath the cursor.
    pub fn resolve<'a, C>(&self, root: &'a MenuBranch<C>) -> Option<&'a MenuBranch<C>> {
        let mut branch = root;
        for label in &self.location {
            branch = match branch.get(label) {
                Some(MenuEntry::Branch(next)) => next,
                _ => return None,
            };
        }
        Some(branch)
    }

    /// Visible option labels for a branch, back entry included.
    #[must_use]
    pub fn options<C>(&self, branch: &MenuBranch<C>) -> Vec<String> {
        let mut options: Vec<String> = branch.labels().map(str::to_string).collect();
        if !self.location.is_empty() {
            options.insert(0, BACK_LABEL.to_string());
        }
        options
    }

    /// Pop one level, or two when the branch being left declares
    /// `double_back`. A path broken by a tree rebuild resets to the root.
    pub fn back<C>(&mut self, root: &MenuBranch<C>) {
        let double = self
            .resolve(root)
            .map(MenuBranch::has_double_back)
            .unwrap_or(false);
        if self.location.pop().is_some() && double {
            self.location.pop();
        }
        if self.resolve(root).is_none() {
            self.reset();
        }
    }

    /// Advance the cursor from this frame's input. Returns the command of an
    /// activated leaf, if any. Enter resets the highlight to the top.
    pub fn navigate<C: Clone>(
        &mut self,
        input: &InputSnapshot,
        root: &MenuBranch<C>,
    ) -> Option<C> {
        let Some(branch) = self.resolve(root) else {
            self.reset();
            return None;
        };
        let options = self.options(branch);
        if options.is_empty() {
            return None;
        }

        if input.pressed(Key::Up) {
            self.idx = (self.idx + options.len() - 1) % options.len();
        }
        if input.pressed(Key::Down) {
            self.idx = (self.idx + 1) % options.len();
        }
        self.idx %= options.len();

        if !input.pressed(Key::Enter) {
            return None;
        }
        let choice = options[self.idx].clone();
        self.idx = 0;
        if choice == BACK_LABEL {
            self.back(root);
            return None;
        }
        match branch.get(&choice) {
            Some(MenuEntry::Branch(_)) => {
                self.location.push(choice);
                None
            }
            Some(MenuEntry::Action(command)) => Some(command.clone()),
            Some(MenuEntry::Inert) | None => None,
        }
    }
}

/// Menu tree, cursor, and drawing bundled for embedding in window apps.
pub struct MenuPane<C> {
    pub tree: MenuBranch<C>,
    pub nav: MenuNav,
    /// Text drawn above the options (breadcrumbs).
    pub header: String,
    pub fg: Color,
    pub bg: Color,
}

impl<C: Clone> MenuPane<C> {
    #[must_use]
    pub fn new(tree: MenuBranch<C>) -> Self {
        Self {
            tree,
            nav: MenuNav::new(),
            header: String::new(),
            fg: Color::WHITE,
            bg: Color::BLACK,
        }
    }

    pub fn handle(&mut self, input: &InputSnapshot) -> Option<C> {
        self.nav.navigate(input, &self.tree)
    }

    pub fn draw(&self, surface: &mut Surface) {
        surface.fill(self.bg);
        let mut y = 1;
        if !self.header.is_empty() {
            for line in self.header.split('\n') {
                surface.draw_text(1, y, line, self.fg, Some(self.bg));
                y += 1;
            }
            y += 1;
        }
        let Some(branch) = self.nav.resolve(&self.tree) else {
            return;
        };
        for (i, option) in self.nav.options(branch).iter().enumerate() {
            let prefix = if i == self.nav.selected() { "> " } else { "  " };
            surface.draw_text(1, y, &format!("{prefix}{option}"), self.fg, Some(self.bg));
            y += 1;
        }
    }
}

/// Commands a generic menu app can carry.
pub trait MenuCommand: Clone + 'static {
    fn run(&self, ctx: &mut OsContext);
}

/// Reusable window app around a command-table menu.
pub struct MenuApp<C: MenuCommand> {
    name: String,
    win: Window,
    pane: MenuPane<C>,
}

impl<C: MenuCommand> MenuApp<C> {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        tree: MenuBranch<C>,
        size: Size,
        screen: Size,
    ) -> Self {
        let name = name.into();
        Self {
            win: Window::centered(&name, size, screen, Color::BLACK),
            pane: MenuPane::new(tree),
            name,
        }
    }

    pub fn pane_mut(&mut self) -> &mut MenuPane<C> {
        &mut self.pane
    }
}

impl<C: MenuCommand> App for MenuApp<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_window(&mut self) -> Option<&mut Window> {
        Some(&mut self.win)
    }

    fn update(&mut self, ctx: &mut OsContext) {
        if let Some(command) = self.pane.handle(&ctx.input) {
            command.run(ctx);
        }
        self.pane.draw(&mut self.win.panel.surface);
    }

    fn render(&mut self, ctx: &mut OsContext) {
        let screen_size = ctx.screen_size();
        self.win.render_to(&mut ctx.screen, screen_size);
    }
}
