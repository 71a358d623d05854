use std::sync::Arc;

use sitefence_application::ports::{AlarmFired, BackgroundGateway};
use sitefence_application::use_cases::{
    BlockSiteUseCase, GetBlockedSitesUseCase, HandleExpiryUseCase, ReconcileRulesUseCase,
    RescheduleAlarmsUseCase, UnblockSiteUseCase, UpdateSiteUseCase,
};
use sitefence_domain::Config;
use sitefence_infrastructure::{
    FileRuleTable, JsonBlockListStore, TokioAlarmRegistry, TracingNotifier,
};
use sitefence_jobs::{ApplyRequest, BackgroundRunner, ChannelBackgroundGateway, DirectGateway};
use tokio::sync::mpsc;

pub struct Adapters {
    pub store: Arc<JsonBlockListStore>,
    pub rule_table: Arc<FileRuleTable>,
    pub alarms: Arc<TokioAlarmRegistry>,
    pub notifier: Arc<TracingNotifier>,
    pub alarm_rx: mpsc::Receiver<AlarmFired>,
}

impl Adapters {
    pub fn new(config: &Config) -> Self {
        let (alarm_tx, alarm_rx) = mpsc::channel(64);
        Self {
            store: Arc::new(JsonBlockListStore::new(&config.storage.path)),
            rule_table: Arc::new(FileRuleTable::new(&config.rules.path)),
            alarms: Arc::new(TokioAlarmRegistry::new(alarm_tx)),
            notifier: Arc::new(TracingNotifier::new(config.notifications.enabled)),
            alarm_rx,
        }
    }
}

pub struct SyncUseCases {
    pub reconcile: Arc<ReconcileRulesUseCase>,
    pub reschedule: Arc<RescheduleAlarmsUseCase>,
    pub handle_expiry: Arc<HandleExpiryUseCase>,
}

impl SyncUseCases {
    pub fn new(config: &Config, adapters: &Adapters) -> Self {
        let reconcile = Arc::new(ReconcileRulesUseCase::new(
            adapters.rule_table.clone(),
            config.rules.block_page_url.clone(),
        ));
        let reschedule = Arc::new(RescheduleAlarmsUseCase::new(adapters.alarms.clone()));
        let handle_expiry = Arc::new(HandleExpiryUseCase::new(
            adapters.store.clone(),
            reconcile.clone(),
            reschedule.clone(),
            adapters.notifier.clone(),
        ));
        Self {
            reconcile,
            reschedule,
            handle_expiry,
        }
    }
}

pub struct SiteUseCases {
    pub block: BlockSiteUseCase,
    pub update: UpdateSiteUseCase,
    pub unblock: UnblockSiteUseCase,
    pub list: GetBlockedSitesUseCase,
}

impl SiteUseCases {
    pub fn new(adapters: &Adapters, gateway: Arc<dyn BackgroundGateway>) -> Self {
        Self {
            block: BlockSiteUseCase::new(adapters.store.clone(), gateway.clone()),
            update: UpdateSiteUseCase::new(adapters.store.clone(), gateway.clone()),
            unblock: UnblockSiteUseCase::new(adapters.store.clone(), gateway.clone()),
            list: GetBlockedSitesUseCase::new(adapters.store.clone()),
        }
    }
}

/// One-shot wiring: rules and alarms are applied inline before the
/// process exits.
pub fn direct_gateway(sync: &SyncUseCases) -> Arc<dyn BackgroundGateway> {
    Arc::new(DirectGateway::new(
        sync.reconcile.clone(),
        sync.reschedule.clone(),
    ))
}

/// Daemon wiring: the runner owns the event loop; the returned gateway
/// feeds it apply requests.
pub fn background_runner(
    adapters: Adapters,
    sync: &SyncUseCases,
) -> (BackgroundRunner, ChannelBackgroundGateway) {
    let (apply_tx, apply_rx) = mpsc::channel::<ApplyRequest>(16);
    let runner = BackgroundRunner::new(
        adapters.store.clone(),
        sync.reconcile.clone(),
        sync.reschedule.clone(),
        sync.handle_expiry.clone(),
        apply_rx,
        adapters.alarm_rx,
    );
    (runner, ChannelBackgroundGateway::new(apply_tx))
}
