/*!
 * Automation Scenario Tests
 * End-to-end runs of the illumination/motor control script against the
 * bootstrapped capability surface
 */

mod common;

use common::MockHost;
use edge_script_host::bootstrap::{self, keys, BootstrapHandles, RuntimeOptions};
use edge_script_host::{HostError, HostResult};
use serial_test::serial;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

const FILTER_URL: &str = "http://filter.local/value";

static RUNTIME: OnceLock<(Arc<MockHost>, BootstrapHandles)> = OnceLock::new();

fn runtime() -> &'static (Arc<MockHost>, BootstrapHandles) {
    RUNTIME.get_or_init(|| {
        let host = MockHost::new();
        host.add_readable_device("illumination", &[("illumination", "500")]);
        host.add_writable_device("motor");
        let options = RuntimeOptions {
            env: HashMap::from([
                ("filter_service_url".to_string(), FILTER_URL.to_string()),
                ("threshold".to_string(), "450".to_string()),
            ]),
            no_color: false,
        };
        let handles = bootstrap::bootstrap(options, host.clone()).expect("bootstrap");
        (host, handles)
    })
}

/// The automation script: read the sensor, filter the value through the
/// external service, then drive the motor through one staged commit.
async fn run_illumination_script(handles: &BootstrapHandles) -> HostResult<()> {
    let scope = &handles.scope;
    let console = scope.get(keys::CONSOLE).unwrap();
    let console = console.as_console().unwrap();
    let runtime = scope.get(keys::RUNTIME).unwrap();
    let runtime = runtime.as_scope().unwrap().clone();
    let devices = scope.get(keys::DEVICES).unwrap();
    let devices = devices.as_devices().unwrap().clone();
    let network = runtime.get(keys::NETWORK).unwrap();
    let network = network.as_network().unwrap().clone();
    let env = runtime.get(keys::ENV).unwrap();
    let env = env.as_environment().unwrap().clone();

    let illumination: f64 = devices
        .get_device_status("illumination", "illumination")?
        .unwrap()
        .parse()
        .unwrap();
    console.log(&format!("Value of illumination from sensor is {illumination}"));

    let url = &env["filter_service_url"];
    let filtered = network.http_get(&format!("{url}?value={illumination}"), "").await?;
    console.log(&format!("Value of illumination after filter is {filtered}"));

    let threshold: f64 = env["threshold"].parse().unwrap();
    let value = if filtered.parse::<f64>().unwrap() < threshold {
        "768"
    } else {
        "1024"
    };
    devices.set_device_status("motor", "control-state", value)?;
    devices.commit_device("motor", None).await?;
    console.info("Script Exit!");
    Ok(())
}

#[tokio::test]
#[serial]
async fn below_threshold_drives_the_motor_low() {
    let (host, handles) = runtime();
    host.reset_interactions();
    host.stage_http_response(&format!("{FILTER_URL}?value=500"), Ok("400"));

    run_illumination_script(handles).await.unwrap();

    let commits = host.commits();
    assert_eq!(commits.len(), 1, "exactly one flush");
    assert_eq!(commits[0].device, "motor");
    assert_eq!(
        commits[0].desired,
        HashMap::from([("control-state".to_string(), "768".to_string())])
    );
}

#[tokio::test]
#[serial]
async fn at_or_above_threshold_drives_the_motor_high() {
    let (host, handles) = runtime();
    host.reset_interactions();
    host.stage_http_response(&format!("{FILTER_URL}?value=500"), Ok("480"));

    run_illumination_script(handles).await.unwrap();

    let commits = host.commits();
    assert_eq!(commits.len(), 1);
    assert_eq!(
        commits[0].desired,
        HashMap::from([("control-state".to_string(), "1024".to_string())])
    );
}

#[tokio::test]
#[serial]
async fn filter_failure_leaves_device_state_untouched() {
    let (host, handles) = runtime();
    host.reset_interactions();
    host.stage_http_response(&format!("{FILTER_URL}?value=500"), Err("connection refused"));

    let err = run_illumination_script(handles).await.unwrap_err();
    assert_eq!(
        err,
        HostError::OperationFailed("connection refused".to_string())
    );
    assert!(host.staged("motor").is_empty(), "nothing staged");
    assert!(host.commits().is_empty(), "nothing committed");
}
