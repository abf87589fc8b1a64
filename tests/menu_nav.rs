
use fixture::{press_key, shell_with};
use slate_os::apps::{MenuApp, MenuBranch, MenuCommand, MenuEntry};
use slate_os::{AppCatalog, Key, OsCommand, OsContext, RunOutcome, Size};

#[derive(Clone)]
struct Launch(&'static str);

impl MenuCommand for Launch {
    fn run(&self, ctx: &mut OsContext) {
        ctx.request(OsCommand::Run(self.0.to_string()));
    }
}

fn start_menu() -> MenuBranch<Launch> {
    MenuBranch::new()
        .entry(
            "programs",
            MenuEntry::Branch(
                MenuBranch::new()
                    .entry("files", MenuEntry::Action(Launch("files")))
                    .entry("- empty slot -", MenuEntry::Inert),
            ),
        )
        .entry("files", MenuEntry::Action(Launch("files")))
}

#[test]
fn menu_commands_route_through_the_runtime() {
    let mut catalog = slate_os::apps::builtin_catalog();
    catalog.register("start", |seed| {
        Box::new(MenuApp::new(
            &seed.name,
            start_menu(),
            Size::new(30, 10),
            seed.screen,
        ))
    });
    let (_dir, mut shell) = shell_with(catalog);

    assert_eq!(shell.run("start"), RunOutcome::Started);

    // Descend into "programs", activate "files".
    press_key(&mut shell, Key::Enter);
    press_key(&mut shell, Key::Down);
    press_key(&mut shell, Key::Enter);

    assert!(shell.is_running("files"), "menu action launched the app");
    assert_eq!(
        shell.focused_app().as_deref(),
        Some("files"),
        "launched window takes focus"
    );
}

#[test]
fn inert_entries_are_selectable_but_do_nothing() {
    let mut catalog = AppCatalog::new();
    catalog.register("start", |seed| {
        Box::new(MenuApp::new(
            &seed.name,
            start_menu(),
            Size::new(30, 10),
            seed.screen,
        ))
    });
    let (_dir, mut shell) = shell_with(catalog);
    shell.run("start");

    press_key(&mut shell, Key::Enter); // into "programs"
    press_key(&mut shell, Key::Down);
    press_key(&mut shell, Key::Down); // "- empty slot -"
    press_key(&mut shell, Key::Enter);

    assert_eq!(shell.app_names(), vec!["start"], "nothing launched");
}

#[test]
fn menus_only_react_while_focused() {
    let mut catalog = slate_os::apps::builtin_catalog();
    catalog.register("start", |seed| {
        Box::new(MenuApp::new(
            &seed.name,
            start_menu(),
            Size::new(30, 10),
            seed.screen,
        ))
    });
    let (_dir, mut shell) = shell_with(catalog);

    shell.run("start");
    shell.run("notes"); // takes focus away from the menu

    // Down+Enter on the unfocused menu must not activate anything; the menu
    // never saw the keys.
    press_key(&mut shell, Key::Down);
    press_key(&mut shell, Key::Enter);
    assert!(!shell.is_running("files"));
}
