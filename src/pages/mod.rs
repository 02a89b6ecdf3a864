//! Business pages - the collaborators that drive the shell
//!
//! Pages only reach navigation, paging and the status bar through
//! [`ViewShell`], and background work through [`TaskRunner`].

pub mod home;
pub mod login;

use crate::constants::{HOME_PAGE, LOGIN_PAGE, QUIT_BUTTON};
use crate::messages::UiEvent;
use crate::models::{ButtonAction, NavigationButton};
use crate::shell::ViewShell;
use crate::tasks::TaskRunner;

pub use home::{HomeMenu, Module, ModulePage, MODULES};
pub use login::{LoginField, LoginForm};

/// Page handle stored in the registry
#[derive(Debug)]
pub enum Page {
    Login(LoginForm),
    Home(HomeMenu),
    Module(ModulePage),
}

/// Request from a page that needs the shell or the runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    Login { login: String, password: String },
    OpenModule(usize),
}

/// Snapshot of a page for rendering
#[derive(Debug, Clone)]
pub enum PageView {
    Login {
        login: String,
        password_len: usize,
        focus: LoginField,
        error: Option<String>,
        busy: bool,
    },
    Home {
        modules: Vec<(String, String)>,
        selected: usize,
    },
    Module {
        title: String,
        description: String,
    },
}

impl Page {
    pub fn view(&self) -> PageView {
        match self {
            Page::Login(form) => PageView::Login {
                login: form.login.clone(),
                password_len: form.password.chars().count(),
                focus: form.focus,
                error: form.error.clone(),
                busy: form.busy,
            },
            Page::Home(menu) => PageView::Home {
                modules: MODULES
                    .iter()
                    .map(|m| (format!("{} {}", m.icon, m.title), m.description.to_string()))
                    .collect(),
                selected: menu.selected,
            },
            Page::Module(page) => PageView::Module {
                title: format!("Module {}", page.module.title),
                description: page.module.description.to_string(),
            },
        }
    }
}

/// Register the permanent buttons and show the login page
pub fn install(shell: &mut ViewShell<Page>) {
    shell.register_button(
        NavigationButton::new(QUIT_BUTTON, "Quitter", ButtonAction::Quit).with_icon("⏻"),
    );
    shell.register_button(
        NavigationButton::new(HOME_PAGE, "Accueil", ButtonAction::ShowPage(HOME_PAGE.to_string()))
            .with_icon("⌂"),
    );
    shell.show_button(QUIT_BUTTON, None);
    shell.add_and_show_page(Page::Login(LoginForm::default()), LOGIN_PAGE);
}

/// Route an input event to the visible page and carry out what it asks for
pub fn handle_event(
    event: &UiEvent,
    shell: &mut ViewShell<Page>,
    runner: &mut TaskRunner<Page>,
    database: &str,
) {
    let command = match shell.pages.visible_mut() {
        Some(Page::Login(form)) => form.handle(event),
        Some(Page::Home(menu)) => menu.handle(event),
        Some(Page::Module(_)) | None => None,
    };

    match command {
        Some(PageCommand::Login { login, password }) => {
            login::connect(shell, runner, login, password, database.to_string())
        }
        Some(PageCommand::OpenModule(index)) => home::open_module(shell, runner, index),
        None => {}
    }
}
