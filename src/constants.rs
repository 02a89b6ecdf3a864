//! Application constants
//!
//! Centralized location for status texts, page names and timing defaults.

/// Status message shown when the shell is idle
pub const READY_MESSAGE: &str = "Prêt";

/// Status message shown when a task completes successfully
pub const SUCCESS_MESSAGE: &str = "Terminé";

/// Prefix of the status message shown when a task fails
pub const ERROR_PREFIX: &str = "Erreur: ";

/// How long the status message keeps its error tone (milliseconds)
pub const ERROR_FLASH_MS: u64 = 3000;

/// Default number of tasks allowed to run at once
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// Spinner animation frames, advanced on every spinner tick
pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Interval between two spinner frames (milliseconds)
pub const SPINNER_TICK_MS: u64 = 80;

/// Registered name of the login page
pub const LOGIN_PAGE: &str = "accueilConnexion";

/// Registered name of the home page (also the name of its navigation button)
pub const HOME_PAGE: &str = "accueil";

/// Registered name of the quit navigation button
pub const QUIT_BUTTON: &str = "quitter";

/// Default database label shown once connected
pub const DEFAULT_DATABASE: &str = "MAMI_PROD";

/// Application name
pub const APP_NAME: &str = "Mami Application";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
