//! End-to-end client-side pipeline: policy decision, key loading,
//! signing, and payload construction.  The privileged call itself is
//! not issued here; there is no kernel module in the test
//! environment.

use nix::unistd::Uid;
use prsu::{
    escalate::{plan, Plan, ROOT},
    key,
    payload::{AuthPayload, PAYLOAD_SIZE},
    sign, totp,
};
use std::path::Path;
use zerocopy::AsBytes;

const KEY_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/rsa2048_pkcs1.pem");

#[test]
fn already_root_bypasses_escalation() {
    // Scenario: effective uid 0, target root.  The policy proceeds
    // straight to the identity switch.
    assert_eq!(
        plan(Uid::from_raw(0), ROOT, Some(Path::new(KEY_FILE)), Some(1)),
        Plan::NotRequired
    );
}

#[test]
fn missing_credentials_terminate_before_the_privileged_call() {
    // Scenario: unprivileged, target root, no credentials.  The plan
    // never names an attempt, so no payload is ever built.
    assert_eq!(
        plan(Uid::from_raw(1000), ROOT, None, None),
        Plan::MissingCredentials
    );
}

#[test]
fn full_attempt_pipeline() {
    // Scenario: unprivileged, target root, credentials supplied.
    // Everything up to the prctl boundary.
    let key_file = Path::new(KEY_FILE);
    let decision = plan(Uid::from_raw(1000), ROOT, Some(key_file), Some(123_456));
    assert_eq!(decision, Plan::Attempt { key_file });

    let key = key::load(key_file).unwrap();
    let step = totp::step_at(1_756_000_000);
    let signature = sign::sign(&key, step).unwrap();
    let payload = AuthPayload::new(totp::wire_code(step), &signature).unwrap();

    let bytes = payload.as_bytes();
    assert_eq!(bytes.len(), PAYLOAD_SIZE);
    assert_eq!(payload.code, totp::wire_code(step));
    assert_eq!(payload.sig_len as usize, signature.len());
    assert_eq!(&payload.sig[..signature.len()], signature.as_slice());
}

#[test]
fn same_window_builds_identical_payloads() {
    // PKCS#1 v1.5 is deterministic, so two attempts within one time
    // step produce byte-identical payloads.
    let key = key::load(KEY_FILE).unwrap();
    let step = totp::step_at(1_756_000_011);
    assert_eq!(step, totp::step_at(1_756_000_019));

    let first = AuthPayload::new(totp::wire_code(step), &sign::sign(&key, step).unwrap()).unwrap();
    let second = AuthPayload::new(totp::wire_code(step), &sign::sign(&key, step).unwrap()).unwrap();
    assert_eq!(first.as_bytes(), second.as_bytes());
}
