use anyhow::Result;
use homewatt::catalog::scenario_template;
use homewatt::config::Config;
use homewatt::domain::ReadingSource;
use homewatt::engine::AnalysisEngine;
use homewatt::simulation::MeterSimulator;
use homewatt::store::MemoryStore;
use homewatt::telemetry::init_tracing;
use tracing::{info, warn};
use uuid::Uuid;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cfg = Config::load()?;
    let scenario = cfg.demo.scenario;
    info!(%scenario, "setting up demo scenario");

    let store = MemoryStore::new();
    let user_id = Uuid::new_v4();
    let (property, devices) = store.bootstrap_scenario(user_id, scenario)?;
    info!(
        property = %property.name,
        devices = devices.len(),
        tariff = ?property.tariff.kind,
        "scenario ready"
    );

    let meter_id = property
        .meter_id
        .clone()
        .unwrap_or_else(|| format!("MOCK_{}", &property.id.to_string()[..8]));

    let mut simulator = MeterSimulator::new(
        cfg.engine.clone(),
        cfg.patterns.clone(),
        cfg.simulation.clone(),
    );
    let readings = simulator.generate_readings(
        &property,
        user_id,
        &meter_id,
        &devices,
        cfg.simulation.days,
        ReadingSource::Simulated,
    );
    info!(count = readings.len(), days = cfg.simulation.days, "generated meter history");
    store.append_readings(readings);

    let since = chrono::Utc::now() - chrono::Duration::days(cfg.demo.analysis_days);
    let readings = store.readings_since(user_id, property.id, since)?;

    let engine = AnalysisEngine::new(cfg.engine.clone());
    let report = engine.analysis_report(&property, &devices, &readings, cfg.demo.analysis_days);

    for estimate in &report.estimates {
        info!(
            device = %estimate.device_name,
            daily_kwh = estimate.estimated_daily_kwh,
            monthly_cost = estimate.estimated_monthly_cost,
            confidence = estimate.confidence_score,
            "device estimate"
        );
    }

    for discrepancy in &report.discrepancies {
        info!(
            date = %discrepancy.date,
            severity = %discrepancy.severity,
            discrepancy_kwh = discrepancy.discrepancy_kwh,
            unaccounted = discrepancy.unaccounted_consumption,
            "daily discrepancy"
        );
    }

    for alert in &report.alerts {
        warn!(
            kind = %alert.kind,
            severity = %alert.severity,
            title = %alert.title,
            "alert raised"
        );
    }
    store.insert_alerts(report.alerts.clone());

    let template = scenario_template(scenario);
    info!(
        estimated_kwh = report.summary.total_estimated_kwh,
        actual_kwh = report.summary.total_actual_kwh,
        estimated_cost = report.summary.total_estimated_cost,
        actual_cost = report.summary.total_actual_cost,
        accuracy_pct = report.summary.accuracy_percentage,
        typical_monthly_kwh = template.typical_monthly_kwh,
        alerts = report.alerts.len(),
        "analysis complete"
    );

    Ok(())
}
