mod block_site;
mod get_blocked_sites;
mod unblock_site;
mod update_site;

pub use block_site::BlockSiteUseCase;
pub use get_blocked_sites::GetBlockedSitesUseCase;
pub use unblock_site::UnblockSiteUseCase;
pub use update_site::UpdateSiteUseCase;
