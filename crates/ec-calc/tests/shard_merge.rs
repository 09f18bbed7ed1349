//! Property test: sharded accumulation with bin-wise merge reproduces
//! single-shard results regardless of shard size.

use ec_calc::{process_sharded, Binning, BinRegistry, EecCalculator, EecConfig, Spacing};
use ec_core::types::{Constituent, Jet, Observation, SpinPattern};
use ec_hist::{HistogramSet, SetConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

fn sink_config() -> SetConfig {
    let registry = BinRegistry::with_defaults();
    SetConfig {
        dist_edges: registry.get("side").unwrap().edges().to_vec(),
        log_dist_edges: registry.get("logside").unwrap().edges().to_vec(),
        angle_edges: Binning::uniform(32, 0.0, TAU, Spacing::Linear)
            .unwrap()
            .edges()
            .to_vec(),
        do_spin_hists: true,
    }
}

fn engine() -> EecCalculator {
    EecCalculator::new(EecConfig {
        pt_ranges: vec![(0.0, 10.0), (10.0, 20.0), (20.0, 50.0)],
        cf_ranges: vec![(0.0, 0.5), (0.5, 1.0)],
        charge_ranges: vec![(-2.0, 0.0), (0.0, 2.0)],
        do_spin_bins: true,
        ..EecConfig::default()
    })
}

fn random_observations(n: usize, seed: u64) -> Vec<Observation> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let jet = Jet {
                pt: rng.gen_range(1.0..45.0),
                eta: rng.gen_range(-1.0..1.0),
                phi: rng.gen_range(0.0..TAU),
                cf: rng.gen_range(0.0..1.0),
                charge: rng.gen_range(-1.5..1.5),
                pattern: SpinPattern::from_code(rng.gen_range(0..8)),
            };
            let cst = |rng: &mut StdRng| Constituent {
                z: rng.gen_range(0.05..0.5),
                jt: rng.gen_range(0.01..0.4),
                eta: jet.eta + rng.gen_range(-0.3..0.3),
                phi: jet.phi + rng.gen_range(-0.3..0.3),
            };
            Observation {
                jet,
                csts: (cst(&mut rng), cst(&mut rng)),
                weight: rng.gen_range(0.1..2.0),
            }
        })
        .collect()
}

#[test]
fn sharding_is_equivalent_to_sequential() {
    let calc = engine();
    let observations = random_observations(200, 42);

    let mut reference = HistogramSet::new(sink_config());
    calc.process_all(&observations, &mut reference).unwrap();
    let reference_names = reference.by_name();
    assert!(!reference_names.is_empty());

    for shard_len in [1, 3, 7, 50, 200, 1000] {
        let sharded =
            process_sharded(&calc, &observations, shard_len, || {
                HistogramSet::new(sink_config())
            })
            .unwrap();

        assert_eq!(sharded.len(), reference.len(), "shard_len = {shard_len}");
        let sharded_names = sharded.by_name();
        assert_eq!(sharded_names.len(), reference_names.len());

        for (name, expected) in &reference_names {
            let actual = sharded_names[name];
            assert_eq!(actual.entries, expected.entries, "{name}");
            for (a, e) in actual.bin_content.iter().zip(&expected.bin_content) {
                assert!(
                    (a - e).abs() <= 1e-12 * (1.0 + e.abs()),
                    "{name} (shard_len {shard_len}): {a} vs {e}"
                );
            }
            for (a, e) in actual.sumw2.iter().zip(&expected.sumw2) {
                assert!(
                    (a - e).abs() <= 1e-12 * (1.0 + e.abs()),
                    "{name} sumw2 (shard_len {shard_len})"
                );
            }
        }
    }
}

#[test]
fn empty_batch_yields_empty_sink() {
    let calc = engine();
    let merged = process_sharded(&calc, &[], 10, || HistogramSet::new(sink_config())).unwrap();
    assert!(merged.is_empty());
}
