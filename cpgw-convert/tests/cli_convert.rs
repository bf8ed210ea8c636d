use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use assert_cmd::Command;
use cpgw_convert::mgmt::{
    GatewayOrServer, GatewayPolicy, GatewayVariant, ManagementConfig, ManagementDomain,
    ManagementServer, Uid,
};
use cpgw_convert::vs;
use predicates::prelude::*;

fn sample_gateway() -> vs::GatewayConfig {
    let mut gateway = vs::GatewayConfig::new("gw1", "check_point_gateway");
    let mut eth0 = vs::Interface::new("eth0");
    eth0.address = Some("10.0.0.1/24".parse().expect("net"));
    gateway.interfaces.insert("eth0".to_string(), eth0);
    gateway
}

fn management_with_dangling_package() -> ManagementConfig {
    let record = GatewayOrServer {
        uid: Uid::of("gw-uid"),
        name: "gw1".to_string(),
        ipv4_address: Some("10.0.0.1".parse().expect("ip")),
        interfaces: Vec::new(),
        policy: GatewayPolicy {
            access_policy_name: Some("missing".to_string()),
        },
        variant: GatewayVariant::SimpleGateway,
    };
    let domain = ManagementDomain {
        name: "d1".to_string(),
        gateways_and_servers: BTreeMap::from([(record.uid.clone(), record)]),
        packages: BTreeMap::new(),
        objects: Vec::new(),
    };
    ManagementConfig {
        servers: BTreeMap::from([(
            "s1".to_string(),
            ManagementServer {
                name: "s1".to_string(),
                domains: BTreeMap::from([("d1".to_string(), domain)]),
            },
        )]),
    }
}

fn write_json<T: serde::Serialize>(dir: &Path, name: &str, value: &T) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).expect("serialize")).expect("write");
    path
}

#[test]
fn convert_prints_configuration_to_stdout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_json(dir.path(), "gateway.json", &sample_gateway());

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cpgw-convert"));
    cmd.arg("convert")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hostname\": \"gw1\""))
        .stdout(predicate::str::contains("\"vendor\": \"check_point_gateway\""))
        .stdout(predicate::str::contains("\"eth0\""));
}

#[test]
fn convert_writes_output_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_json(dir.path(), "gateway.json", &sample_gateway());
    let output = dir.path().join("out.json");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cpgw-convert"));
    cmd.arg("convert")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = fs::read_to_string(&output).expect("output file");
    assert!(written.contains("\"hostname\": \"gw1\""));
}

#[test]
fn convert_reports_diagnostics_on_stderr_unless_quiet() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_json(dir.path(), "gateway.json", &sample_gateway());
    let mgmt = write_json(dir.path(), "mgmt.json", &management_with_dangling_package());

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cpgw-convert"));
    cmd.arg("convert")
        .arg(&input)
        .arg("--management")
        .arg(&mgmt)
        .assert()
        .success()
        .stderr(predicate::str::contains("missing_package"))
        .stderr(predicate::str::contains("non-existent package 'missing'"));

    let mut quiet = Command::new(assert_cmd::cargo::cargo_bin!("cpgw-convert"));
    quiet
        .arg("convert")
        .arg(&input)
        .arg("--management")
        .arg(&mgmt)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicate::str::contains("missing_package").not());
}

#[test]
fn convert_fails_on_unreadable_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cpgw-convert"));
    cmd.arg("convert")
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn inspect_summarizes_gateway() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_json(dir.path(), "gateway.json", &sample_gateway());

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cpgw-convert"));
    cmd.arg("inspect")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("hostname: gw1"))
        .stdout(predicate::str::contains("eth0 up 10.0.0.1/24"));
}
