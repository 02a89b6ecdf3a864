//! Home page - module launcher

use std::thread::sleep;
use std::time::Duration;

use crate::constants::HOME_PAGE;
use crate::messages::UiEvent;
use crate::models::{ButtonAction, NavigationButton};
use crate::pages::{Page, PageCommand};
use crate::shell::ViewShell;
use crate::tasks::TaskRunner;

const STEP_DELAY: Duration = Duration::from_millis(100);

/// A business module reachable from the home page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Module {
    pub title: &'static str,
    pub description: &'static str,
    /// Page name, also used as the navigation button name
    pub page: &'static str,
    pub button_label: &'static str,
    pub icon: &'static str,
}

pub const MODULES: [Module; 6] = [
    Module {
        title: "Enfants",
        description: "Gestion des enfants",
        page: "accueilEnfant",
        button_label: "Enfants",
        icon: "☺",
    },
    Module {
        title: "Parents",
        description: "Gestion des parents",
        page: "accueilParent",
        button_label: "Parents",
        icon: "⚇",
    },
    Module {
        title: "Salariés",
        description: "Gestion des salariés",
        page: "accueilSalarie",
        button_label: "Salariés",
        icon: "⚒",
    },
    Module {
        title: "Administration",
        description: "Configuration système",
        page: "accueilAdministration",
        button_label: "Admin",
        icon: "⚙",
    },
    Module {
        title: "Extranet",
        description: "Accès externe",
        page: "accueilExtranet",
        button_label: "Extranet",
        icon: "◍",
    },
    Module {
        title: "Mes Identifiants",
        description: "Gérer mon compte",
        page: "mesIdentifiants",
        button_label: "Identifiants",
        icon: "⚿",
    },
];

#[derive(Debug, Default)]
pub struct HomeMenu {
    pub selected: usize,
}

impl HomeMenu {
    pub fn handle(&mut self, event: &UiEvent) -> Option<PageCommand> {
        match event {
            UiEvent::Down | UiEvent::NextField => {
                self.selected = (self.selected + 1) % MODULES.len();
            }
            UiEvent::Up | UiEvent::PrevField => {
                self.selected = (self.selected + MODULES.len() - 1) % MODULES.len();
            }
            UiEvent::Submit => return Some(PageCommand::OpenModule(self.selected)),
            _ => {}
        }
        None
    }
}

/// Placeholder page of a module
#[derive(Debug, Clone)]
pub struct ModulePage {
    pub module: Module,
}

/// Show the module page, loading it in the background on first use
pub fn open_module(shell: &mut ViewShell<Page>, runner: &mut TaskRunner<Page>, index: usize) {
    let Some(module) = MODULES.get(index).copied() else {
        tracing::warn!(index, "Unknown module");
        return;
    };

    if shell.has_page(module.page) {
        shell.show_page(module.page);
        return;
    }

    runner.submit(
        shell,
        format!("Chargement Module {}", module.title),
        move |reporter| {
            reporter.update_progress_message(20, "Initialisation...");
            sleep(STEP_DELAY);

            reporter.update_progress_message(50, "Chargement des ressources...");
            sleep(STEP_DELAY);

            reporter.update_progress_message(80, "Création de l'interface...");
            let page = Page::Module(ModulePage { module });
            sleep(STEP_DELAY);

            Ok(page)
        },
        move |shell, page| {
            shell.add_and_show_page(page, module.page);
            if !shell.has_button(module.page) {
                shell.register_button(
                    NavigationButton::new(
                        module.page,
                        module.button_label,
                        ButtonAction::ShowPage(HOME_PAGE.to_string()),
                    )
                    .with_icon(module.icon),
                );
            }
            shell.show_button(module.page, Some(module.page));
        },
        move |_, err| {
            tracing::error!(module = module.title, error = %err, "Module failed to load");
        },
    );
}
