pub mod api;
pub mod catalog;
pub mod responses;

pub use api::SteamClient;
pub use catalog::Catalog;
pub use responses::OwnedGames;
