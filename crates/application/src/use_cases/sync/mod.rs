mod reconcile_rules;
mod reschedule_alarms;

pub use reconcile_rules::ReconcileRulesUseCase;
pub use reschedule_alarms::RescheduleAlarmsUseCase;
