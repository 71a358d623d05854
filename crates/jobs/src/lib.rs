//! sitefence background host: runner and gateways
mod gateway;
mod runner;

pub use gateway::{ApplyRequest, ChannelBackgroundGateway, DirectGateway};
pub use runner::BackgroundRunner;
