//! Demo de reconciliación de punta a punta contra el servicio en memoria:
//! siembra un par de flows instrumentados, pagina el timeline del flow
//! activo y muestra los pairings clasificados más el reporte agregado.
use std::sync::Arc;

use serde_json::json;

use flow_client::{ClientConfig, DashboardBrowser, InMemoryFlowService};
use flow_core::{format_diffs, PairingStatus};
use flow_domain::FlowStatus;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _ = dotenvy::dotenv();

    let service = Arc::new(InMemoryFlowService::new());
    seed_checkout_flow(&service);
    seed_background_flow(&service);

    let config = ClientConfig::from_env();
    let mut browser = DashboardBrowser::new(Arc::clone(&service), config);

    browser.refresh_flows().await;
    println!("flows ({} páginas conocidas):", browser.flow_pages_known());
    for flow in browser.flows() {
        println!("  #{} {} [{:?}] points={} assertions={}",
                 flow.id, flow.name, flow.status, flow.point_count, flow.assertion_count);
    }

    let Some(target) = browser.flows().iter().find(|f| f.name == "checkout").map(|f| f.id) else {
        eprintln!("seed no encontrado");
        std::process::exit(1);
    };

    browser.select_flow(target).await;
    while browser.timeline().has_more() {
        browser.fetch_more_timeline().await;
    }

    println!("\ntimeline de checkout:");
    for pairing in browser.pairings() {
        match pairing.status {
            PairingStatus::Match => println!("  [{}] match: {}",
                                             pairing.index,
                                             pairing.point.as_ref().map(|p| p.data.description.as_str()).unwrap_or("-")),
            PairingStatus::Mismatch => println!("  [{}] MISMATCH: {} -> {}",
                                                pairing.index,
                                                pairing.point.as_ref().map(|p| p.data.description.as_str()).unwrap_or("-"),
                                                format_diffs(&pairing.diffs)),
            PairingStatus::MissingAssertion => println!("  [{}] waiting for assertion...", pairing.index),
            PairingStatus::Orphan => println!("  [{}] orphan assertion", pairing.index),
        }
    }

    match browser.compare(target).await {
        Ok(report) => println!("\ncompare: {}/{} matches, success={}",
                               report.matches, report.total, report.success),
        Err(e) => eprintln!("compare falló: {e}"),
    }

    if let Ok(stats) = browser.stats().await {
        println!("stats: {} flows ({} active, {} finished)",
                 stats.total_flows, stats.active_flows, stats.finished_flows);
    }
}

fn seed_checkout_flow(service: &InMemoryFlowService) {
    let id = service.insert_flow("checkout", Some("order-1042"), Some("service-a"));
    let seed = [("reserve stock", json!({"sku": "A-7", "reserved": 2}), Some(json!({"sku": "A-7", "reserved": 2}))),
                ("charge card", json!({"amount": 1999, "currency": "EUR"}), Some(json!({"amount": 2049, "currency": "EUR"}))),
                ("emit receipt", json!({"sent": true}), None)];
    for (description, expected, actual) in seed {
        service.push_point(id, description, expected).expect("seed point");
        if let Some(actual) = actual {
            service.push_assertion(id, actual).expect("seed assertion");
        }
    }
}

fn seed_background_flow(service: &InMemoryFlowService) {
    let id = service.insert_flow("nightly-sync", None, Some("service-b"));
    service.push_point(id, "rows copied", json!({"rows": 120})).expect("seed point");
    service.push_assertion(id, json!({"rows": 120})).expect("seed assertion");
    service.set_status(id, FlowStatus::Finished).expect("seed status");
}
