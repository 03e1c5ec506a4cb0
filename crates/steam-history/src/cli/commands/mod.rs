pub mod achievements;
pub mod api;
pub mod covers;
pub mod games;
pub mod profile;
pub mod recent;

pub use achievements::{sync as sync_achievements, update as update_achievements};
pub use api::generate as generate_api;
pub use covers::download as download_covers;
pub use games::{check_new, fetch as fetch_games};
pub use profile::fetch as fetch_profile;
pub use recent::fetch as fetch_recent;
