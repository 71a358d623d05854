pub mod expiry;
pub mod sites;
pub mod sync;

// Re-export use cases
pub use expiry::HandleExpiryUseCase;
pub use sites::{
    BlockSiteUseCase, GetBlockedSitesUseCase, UnblockSiteUseCase, UpdateSiteUseCase,
};
pub use sync::{ReconcileRulesUseCase, RescheduleAlarmsUseCase};
