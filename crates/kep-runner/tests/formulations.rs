//! Reference objectives of the published benchmark instances.
//!
//! Instances use seed 42, real weights and the conditional weight draw of
//! the benchmark generator.

use kep_formulation::FormulationKind;
use kep_graph::{InstanceConfig, WeightDraw};
use kep_runner::{RunConfig, run_once};

const TOLERANCE: f64 = 1e-4;

fn fixture(formulation: FormulationKind, n: usize, k: usize, density: f64) -> RunConfig {
    let instance = InstanceConfig::new(n, density, true, 42).with_draw(WeightDraw::OnArc);
    RunConfig::new(formulation, instance, k).with_time_limit(600.0)
}

fn assert_objective(formulation: FormulationKind, n: usize, k: usize, density: f64, expected: f64) {
    let result = run_once(&fixture(formulation, n, k, density)).unwrap();
    assert!(
        result.is_optimal(),
        "{formulation} n={n} k={k} d={density}: status {}",
        result.status
    );
    assert!(
        (result.objective - expected).abs() < TOLERANCE,
        "{formulation} n={n} k={k} d={density}: {} != {expected}",
        result.objective
    );
}

fn assert_all_formulations(n: usize, k: usize, density: f64, expected: f64) {
    for formulation in FormulationKind::ALL {
        assert_objective(formulation, n, k, density, expected);
    }
}

#[test]
fn n10_k3_d20() {
    assert_all_formulations(10, 3, 0.2, 2.8962);
}

#[test]
fn n10_k3_d50() {
    assert_all_formulations(10, 3, 0.5, 5.7710);
}

#[test]
fn n10_k4_d20() {
    assert_all_formulations(10, 4, 0.2, 3.6748);
}

#[test]
fn n10_k4_d50() {
    assert_all_formulations(10, 4, 0.5, 5.8556);
}

#[test]
fn n15_k3_d20() {
    assert_all_formulations(15, 3, 0.2, 4.5519);
}

#[test]
fn n20_k3_d20() {
    assert_all_formulations(20, 3, 0.2, 9.8199);
}

#[test]
fn n20_k3_d50_cycle() {
    assert_objective(FormulationKind::Cycle, 20, 3, 0.5, 15.3730);
}

#[test]
fn n20_k4_d20_cycle() {
    assert_objective(FormulationKind::Cycle, 20, 4, 0.2, 11.5086);
}

#[test]
#[ignore = "solves every formulation on 20-node instances"]
fn n20_all_formulations() {
    assert_all_formulations(20, 3, 0.5, 15.3730);
    assert_all_formulations(20, 4, 0.2, 11.5086);
    assert_all_formulations(20, 4, 0.5, 16.5220);
}

#[test]
#[ignore = "solves every formulation on 25 and 30-node instances"]
fn n25_n30_k3() {
    assert_all_formulations(25, 3, 0.2, 13.3576);
    assert_all_formulations(30, 3, 0.2, 19.0218);
    assert_all_formulations(30, 3, 0.5, 24.3331);
}

#[test]
#[ignore = "solves every formulation on 30-node instances with k = 4"]
fn n30_k4() {
    assert_all_formulations(30, 4, 0.2, 21.0538);
    assert_all_formulations(30, 4, 0.5, 25.4677);
}

#[test]
#[ignore = "long cycles on 30-node instances"]
fn n30_k5() {
    assert_all_formulations(30, 5, 0.2, 21.3232);
    assert_all_formulations(30, 5, 0.5, 26.1235);
}

#[test]
#[ignore = "40-node instances take minutes with the compact formulations"]
fn n40() {
    assert_all_formulations(40, 3, 0.5, 34.5825);
    assert_all_formulations(40, 5, 0.5, 36.2833);
}
