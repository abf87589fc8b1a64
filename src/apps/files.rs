//! Menu-tree file browser over the store root.

use blob_store::{parent_of, Store};

use crate::apps::menu::{MenuBranch, MenuEntry, MenuPane};
use crate::apps::prompt::PromptApp;
use crate::core::color::Color;
use crate::core::geometry::Size;
use crate::logging::DiagnosticLog;
use crate::runtime::app::App;
use crate::runtime::catalog::AppSeed;
use crate::runtime::context::{AppMessage, OsCommand, OsContext};
use crate::runtime::window::Window;

const WINDOW_SIZE: Size = Size::new(50, 18);
const PROMPT_NAME: &str = "prompt";
const RENAME_TOPIC: &str = "rename";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilesCmd {
    Copy(String),
    Paste(String),
    Delete(String),
    Rename(String),
}

pub struct FilesApp {
    name: String,
    win: Window,
    pane: MenuPane<FilesCmd>,
    copied: Option<String>,
    pending_rename: Option<String>,
}

impl FilesApp {
    #[must_use]
    pub fn new(seed: &AppSeed) -> Self {
        Self {
            win: Window::centered(&seed.name, WINDOW_SIZE, seed.screen, Color::BLACK),
            name: seed.name.clone(),
            pane: MenuPane::new(MenuBranch::new()),
            copied: None,
            pending_rename: None,
        }
    }

    fn rebuild(&mut self, ctx: &mut OsContext) {
        self.pane.tree = listing_branch(&ctx.store, &mut ctx.diag, "");
    }

    fn apply(&mut self, command: FilesCmd, ctx: &mut OsContext) {
        match command {
            FilesCmd::Copy(path) => {
                ctx.diag.note(format!("copying {path}"));
                self.copied = Some(path);
            }
            FilesCmd::Paste(target) => {
                let Some(source) = self.copied.clone() else {
                    return;
                };
                ctx.diag.note(format!("pasting {source} to {target}"));
                let result = if ctx.store.is_folder(&source) {
                    ctx.store.copy_folder(&source, &target)
                } else {
                    ctx.store.copy_file(&source, &target)
                };
                if let Err(err) = result {
                    ctx.diag.warn(format!("paste failed: {err}"));
                }
                self.rebuild(ctx);
            }
            FilesCmd::Delete(path) => {
                if let Err(err) = ctx.store.delete(&path) {
                    ctx.diag.warn(format!("delete failed: {err}"));
                }
                self.rebuild(ctx);
                self.pane.nav.back(&self.pane.tree);
            }
            FilesCmd::Rename(path) => {
                self.pending_rename = Some(path.clone());
                let prompt = PromptApp::new(
                    PROMPT_NAME,
                    format!("Rename {path}:"),
                    self.name.clone(),
                    RENAME_TOPIC,
                    ctx.screen_size(),
                );
                ctx.request(OsCommand::Spawn(Box::new(prompt)));
            }
        }
    }
}

impl App for FilesApp {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_window(&mut self) -> Option<&mut Window> {
        Some(&mut self.win)
    }

    fn on_run(&mut self, ctx: &mut OsContext) {
        self.rebuild(ctx);
    }

    fn update(&mut self, ctx: &mut OsContext) {
        if let Some(command) = self.pane.handle(&ctx.input) {
            self.apply(command, ctx);
        }
        self.pane.header = breadcrumb(self.pane.nav.location());
        self.pane.draw(&mut self.win.panel.surface);
    }

    fn render(&mut self, ctx: &mut OsContext) {
        let screen_size = ctx.screen_size();
        self.win.render_to(&mut ctx.screen, screen_size);
    }

    fn on_message(&mut self, message: &AppMessage, ctx: &mut OsContext) {
        if message.topic != RENAME_TOPIC {
            return;
        }
        let Some(from) = self.pending_rename.take() else {
            return;
        };
        let entered = message.body.trim();
        if entered.is_empty() {
            return;
        }
        let parent = parent_of(&from);
        let to = if parent.is_empty() {
            entered.to_string()
        } else {
            format!("{parent}/{entered}")
        };
        if let Err(err) = ctx.store.rename(&from, &to) {
            ctx.diag.warn(format!("rename failed: {err}"));
        }
        self.rebuild(ctx);
    }
}

/// The path trail, skipping the interleaved verb levels ("open").
fn breadcrumb(location: &[String]) -> String {
    location
        .iter()
        .step_by(2)
        .cloned()
        .collect::<Vec<_>>()
        .join("/")
}

fn join(folder: &str, name: &str) -> String {
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{folder}/{name}")
    }
}

/// Branch listing a folder's entries. Carries `double_back` so leaving the
/// listing also pops the "open" verb that led into it.
fn listing_branch(store: &Store, diag: &mut DiagnosticLog, path: &str) -> MenuBranch<FilesCmd> {
    let mut branch = MenuBranch::new().double_back();
    match store.list(path) {
        Ok(entries) => {
            for entry in entries {
                let child = join(path, &entry);
                branch.push(entry, MenuEntry::Branch(entry_branch(store, diag, &child)));
            }
        }
        Err(err) => diag.warn(format!("could not list {path}: {err}")),
    }
    branch
}

/// Verb branch for one file or folder.
fn entry_branch(store: &Store, diag: &mut DiagnosticLog, path: &str) -> MenuBranch<FilesCmd> {
    let mut branch = MenuBranch::new();
    if store.is_folder(path) {
        branch.push("open", MenuEntry::Branch(listing_branch(store, diag, path)));
        branch.push("copy", MenuEntry::Action(FilesCmd::Copy(path.to_string())));
        branch.push("paste", MenuEntry::Action(FilesCmd::Paste(path.to_string())));
        branch.push("delete", MenuEntry::Action(FilesCmd::Delete(path.to_string())));
        branch.push("rename", MenuEntry::Action(FilesCmd::Rename(path.to_string())));
    } else {
        let unsupported = MenuBranch::new().entry("Feature not supported", MenuEntry::Inert);
        branch.push("open", MenuEntry::Branch(unsupported));
        branch.push("copy", MenuEntry::Action(FilesCmd::Copy(path.to_string())));
        branch.push("delete", MenuEntry::Action(FilesCmd::Delete(path.to_string())));
        branch.push("rename", MenuEntry::Action(FilesCmd::Rename(path.to_string())));
    }
    branch
}

#[cfg(test)]
mod tests {
    use super::{breadcrumb, listing_branch};
    use crate::apps::menu::{MenuEntry, MenuNav};
    use crate::core::input::{InputSnapshot, Key};
    use crate::logging::DiagnosticLog;

    #[test]
    fn listing_mirrors_the_store_and_folders_get_paste() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = blob_store::Store::open(dir.path()).expect("store");
        store.make_folder("docs").expect("make_folder");
        store.save("docs/a.txt", b"a").expect("save");
        store.save("readme.txt", b"r").expect("save");

        let mut diag = DiagnosticLog::new();
        let tree = listing_branch(&store, &mut diag, "");
        assert_eq!(tree.labels().collect::<Vec<_>>(), vec!["docs", "readme.txt"]);

        let docs = match tree.get("docs") {
            Some(MenuEntry::Branch(branch)) => branch,
            _ => panic!("docs should be a branch"),
        };
        assert_eq!(
            docs.labels().collect::<Vec<_>>(),
            vec!["open", "copy", "paste", "delete", "rename"]
        );

        let readme = match tree.get("readme.txt") {
            Some(MenuEntry::Branch(branch)) => branch,
            _ => panic!("readme should be a branch"),
        };
        assert_eq!(
            readme.labels().collect::<Vec<_>>(),
            vec!["open", "copy", "delete", "rename"]
        );
    }

    #[test]
    fn backing_out_of_a_listing_pops_entry_and_verb_together() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = blob_store::Store::open(dir.path()).expect("store");
        store.make_folder("docs").expect("make_folder");

        let mut diag = DiagnosticLog::new();
        let tree = listing_branch(&store, &mut diag, "");
        assert!(tree.has_double_back());

        let press = |key: Key| {
            let mut input = InputSnapshot::new();
            input.press_key(key);
            input
        };

        let mut nav = MenuNav::new();
        nav.navigate(&press(Key::Enter), &tree);
        assert_eq!(nav.location(), ["docs"]);

        nav.navigate(&press(Key::Down), &tree);
        nav.navigate(&press(Key::Enter), &tree);
        assert_eq!(nav.location(), ["docs", "open"]);

        // The empty listing shows only the back entry; one back-activation
        // pops the listing and the "open" verb together.
        nav.navigate(&press(Key::Enter), &tree);
        assert_eq!(nav.location(), &[] as &[String]);
    }

    #[test]
    fn breadcrumb_skips_verb_levels() {
        let location = vec![
            "docs".to_string(),
            "open".to_string(),
            "inner".to_string(),
            "open".to_string(),
        ];
        assert_eq!(breadcrumb(&location), "docs/inner");
    }
}
