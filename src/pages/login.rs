//! Login page - credentials form and the "Connexion" task

use std::thread::sleep;
use std::time::Duration;

use crate::constants::{HOME_PAGE, LOGIN_PAGE};
use crate::messages::UiEvent;
use crate::pages::home::HomeMenu;
use crate::pages::{Page, PageCommand};
use crate::shell::ViewShell;
use crate::tasks::TaskRunner;

/// Delay of each simulated authentication step
const STEP_DELAY: Duration = Duration::from_millis(250);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Login,
    Password,
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub login: String,
    pub password: String,
    pub focus: LoginField,
    pub error: Option<String>,
    pub busy: bool,
}

/// Profile returned by a successful authentication
#[derive(Debug, Clone)]
pub struct Profile {
    pub login: String,
}

impl LoginForm {
    pub fn handle(&mut self, event: &UiEvent) -> Option<PageCommand> {
        // Controls are disabled while the connection task runs
        if self.busy {
            return None;
        }

        match event {
            UiEvent::Char(c) => self.focused_mut().push(*c),
            UiEvent::Backspace => {
                self.focused_mut().pop();
            }
            UiEvent::NextField | UiEvent::PrevField | UiEvent::Up | UiEvent::Down => {
                self.focus = match self.focus {
                    LoginField::Login => LoginField::Password,
                    LoginField::Password => LoginField::Login,
                };
            }
            UiEvent::Submit => {
                let login = self.login.trim().to_string();
                if login.is_empty() || self.password.is_empty() {
                    self.error = Some(String::from("Veuillez remplir tous les champs"));
                    return None;
                }
                self.error = None;
                self.busy = true;
                return Some(PageCommand::Login {
                    login,
                    password: self.password.clone(),
                });
            }
            _ => {}
        }
        None
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Login => &mut self.login,
            LoginField::Password => &mut self.password,
        }
    }
}

/// Run the authentication in the background
pub fn connect(
    shell: &mut ViewShell<Page>,
    runner: &mut TaskRunner<Page>,
    login: String,
    password: String,
    database: String,
) {
    runner.submit(
        shell,
        "Connexion",
        move |reporter| {
            reporter.update_progress_message(20, "Vérification des identifiants...");
            sleep(STEP_DELAY);

            reporter.update_progress_message(50, "Authentification...");
            sleep(STEP_DELAY);

            if login != "admin" || password != "admin" {
                anyhow::bail!("Identifiants incorrects");
            }

            reporter.update_progress_message(70, "Chargement du profil...");
            sleep(STEP_DELAY);

            reporter.update_progress_message(90, "Initialisation...");
            sleep(STEP_DELAY);

            Ok(Profile { login })
        },
        move |shell, profile| on_login_success(shell, profile, &database),
        |shell, err| {
            if let Some(Page::Login(form)) = shell.pages.get_mut(LOGIN_PAGE) {
                form.busy = false;
                form.password.clear();
                form.error = Some(err.to_string());
            }
        },
    );
}

fn on_login_success(shell: &mut ViewShell<Page>, profile: Profile, database: &str) {
    shell.show_button(HOME_PAGE, None);
    shell.status.set_message("Connecté");

    let first_name = capitalize(&profile.login);
    shell.status.set_user(&first_name, "Utilisateur");
    shell.status.set_connection(database);

    if let Some(Page::Login(form)) = shell.pages.get_mut(LOGIN_PAGE) {
        *form = LoginForm::default();
    }

    if !shell.show_page(HOME_PAGE) {
        shell.add_and_show_page(Page::Home(HomeMenu::default()), HOME_PAGE);
    }
    tracing::info!(login = %profile.login, "User connected");
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
