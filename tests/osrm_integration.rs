//! Live OSRM route test.
//!
//! Needs a prepared MLD dataset (osrm-extract + partition + customize) in
//! `$OSRM_DATA_DIR`, named by `$OSRM_DATASET` (default `poland-latest.osrm`).
//! Skips when the dataset is not present.

mod fixtures;

use std::env;
use std::path::PathBuf;

use testcontainers::core::{IntoContainerPort, Mount};
use testcontainers::runners::SyncRunner;
use testcontainers::{Container, GenericImage, ImageExt, ReuseDirective, TestcontainersError};

use truck_hours::osrm::{OsrmClient, OsrmConfig};
use truck_hours::planner::{plan_delivery, PlannerOptions, TripRequest};
use truck_hours::traits::{RouteDetails, RouteProvider};

use fixtures::{KRAKOW, WARSAW};

fn prepared_dataset() -> Option<(PathBuf, String)> {
    let data_dir = PathBuf::from(env::var("OSRM_DATA_DIR").unwrap_or_else(|_| "osrm-data".to_string()));
    let dataset = env::var("OSRM_DATASET").unwrap_or_else(|_| "poland-latest.osrm".to_string());
    let partition = data_dir.join(format!("{}.partition", dataset));
    if partition.exists() {
        Some((data_dir, dataset))
    } else {
        eprintln!("skipping: no prepared OSRM dataset at {}", partition.display());
        None
    }
}

fn osrm_container(data_dir: PathBuf, dataset: &str) -> Result<(Container<GenericImage>, String), TestcontainersError> {
    let image = GenericImage::new("osrm/osrm-backend", "latest")
        .with_exposed_port(5000.tcp())
        .with_mount(Mount::bind_mount(
            data_dir.canonicalize().unwrap_or(data_dir).to_string_lossy().to_string(),
            "/data",
        ))
        .with_cmd(vec![
            "osrm-routed".to_string(),
            "--algorithm".to_string(),
            "mld".to_string(),
            format!("/data/{}", dataset),
        ])
        .with_container_name(format!("osrm-{}", dataset.replace('.', "-")))
        .with_startup_timeout(std::time::Duration::from_secs(30))
        .with_reuse(ReuseDirective::Always);

    let container = image.start()?;
    let port = container.get_host_port_ipv4(5000.tcp())?;
    let base_url = format!("http://127.0.0.1:{}", port);

    Ok((container, base_url))
}

#[test]
fn osrm_route_is_classified_and_scheduled() {
    let Some((data_dir, dataset)) = prepared_dataset() else {
        return;
    };
    let (container, base_url) = osrm_container(data_dir, &dataset).expect("start OSRM container");

    let client = OsrmClient::new(OsrmConfig {
        base_url,
        profile: "driving".to_string(),
        timeout_secs: 10,
    })
    .expect("build OSRM client");

    // The server may still be loading the dataset.
    let route: Option<RouteDetails> = {
        let start = std::time::Instant::now();
        let mut last = None;
        while start.elapsed() < std::time::Duration::from_secs(15) {
            match client.route_between(WARSAW.coords(), KRAKOW.coords()) {
                Ok(details) => {
                    last = Some(details);
                    break;
                }
                Err(err) => eprintln!("OSRM not ready: {}", err),
            }
            std::thread::sleep(std::time::Duration::from_millis(500));
        }
        last
    };
    let route = route.expect("OSRM returned a route");
    assert!(!route.steps.is_empty());
    assert!(!route.shape.is_empty());
    assert!(route.total_distance_km > 250.0 && route.total_distance_km < 400.0);

    let estimate = plan_delivery(
        &client,
        TripRequest {
            from: WARSAW.coords(),
            to: KRAKOW.coords(),
        },
        &PlannerOptions::default(),
    )
    .expect("plan delivery");
    assert!(estimate.driving_hours > 3.0);
    assert!(estimate.schedule.total_duration_hours >= estimate.driving_hours);

    drop(container);
}
