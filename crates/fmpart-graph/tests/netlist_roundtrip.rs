use fmpart_core::errors::FmError;
use fmpart_core::{ModuleId, NetId, Netlist, MAX_GAIN_BOUND};
use fmpart_graph::{
    canonical_hash, dragonfly, netlist_from_bytes, netlist_from_json, netlist_to_bytes,
    netlist_to_json, NetlistConfig, NetlistImpl, DRAGONFLY_WEIGHTS, MAX_NET_WEIGHT,
};

#[test]
fn build_query_and_serialize() {
    let mut netlist = NetlistImpl::default();
    let a = netlist.add_module();
    let b = netlist.add_module_weighted(3);
    let c = netlist.add_module();

    let n0 = netlist.add_net(&[b, a, b]).unwrap();
    let n1 = netlist.add_net_weighted(&[a, b, c], 4).unwrap();
    netlist.set_fixed(c, true).unwrap();

    assert_eq!(netlist.incident_modules(n0), &[a, b]);
    assert_eq!(netlist.incident_nets(a), &[n0, n1]);
    assert_eq!(netlist.net_weight(n1), 4);
    assert_eq!(netlist.total_weight(), 5);
    assert_eq!(netlist.fixed_modules(), &[c]);
    assert_eq!(netlist.num_pins(), 5);
    assert_eq!(netlist.gain_bound(), 5);

    let hash_before = canonical_hash(&netlist);
    let json = netlist_to_json(&netlist).unwrap();
    let restored = netlist_from_json(&json).unwrap();
    assert_eq!(hash_before, canonical_hash(&restored));

    let bytes = netlist_to_bytes(&netlist).unwrap();
    let restored = netlist_from_bytes(&bytes).unwrap();
    assert_eq!(hash_before, canonical_hash(&restored));
    assert!(restored.is_fixed(c));
}

#[test]
fn json_weights_default_to_one() {
    let json = r#"{
        "modules": [{}, {"weight": 2}, {"fixed": true}],
        "nets": [{"pins": [0, 1]}, {"weight": 5, "pins": [1, 2]}]
    }"#;
    let netlist = netlist_from_json(json).unwrap();
    assert_eq!(netlist.module_weight(ModuleId::from_index(0)), 1);
    assert_eq!(netlist.module_weight(ModuleId::from_index(1)), 2);
    assert!(netlist.is_fixed(ModuleId::from_index(2)));
    assert_eq!(netlist.net_weight(NetId::from_index(0)), 1);
    assert_eq!(netlist.net_weight(NetId::from_index(1)), 5);
}

#[test]
fn rejects_malformed_nets() {
    let mut netlist = NetlistImpl::new(NetlistConfig {
        max_net_degree: Some(2),
        ..NetlistConfig::default()
    });
    let a = netlist.add_module();
    let b = netlist.add_module();
    let c = netlist.add_module();

    assert!(matches!(
        netlist.add_net(&[]),
        Err(FmError::Graph(info)) if info.code == "empty-net"
    ));
    assert!(matches!(
        netlist.add_net(&[a, ModuleId::from_index(9)]),
        Err(FmError::Graph(info)) if info.code == "unknown-module"
    ));
    assert!(matches!(
        netlist.add_net(&[a, b, c]),
        Err(FmError::Graph(info)) if info.code == "net-degree-cap"
    ));
    assert!(matches!(
        netlist.add_net_weighted(&[a, b], MAX_NET_WEIGHT + 1),
        Err(FmError::Graph(info)) if info.code == "net-weight-overflow"
    ));
    assert_eq!(netlist.num_nets(), 0);
    assert!(netlist.incident_nets(a).is_empty());
}

#[test]
fn weighted_degree_is_capped_at_the_gain_bound() {
    let mut netlist = NetlistImpl::default();
    let hub = netlist.add_module();
    let weight = MAX_NET_WEIGHT / 64;
    for _ in 0..64 {
        let leaf = netlist.add_module();
        netlist.add_net_weighted(&[hub, leaf], weight).unwrap();
    }
    // Single-pin nets never contribute to a gain.
    netlist.add_net_weighted(&[hub], MAX_NET_WEIGHT).unwrap();
    assert_eq!(netlist.gain_bound(), MAX_GAIN_BOUND);

    let leaf = netlist.add_module();
    let err = netlist.add_net_weighted(&[leaf, hub], 1).unwrap_err();
    assert!(matches!(&err, FmError::Graph(info) if info.code == "gain-bound-overflow"));
    assert_eq!(err.info().context.get("module").map(String::as_str), Some("0"));
    assert_eq!(netlist.num_nets(), 65);
    assert!(netlist.incident_nets(leaf).is_empty());
    assert_eq!(netlist.gain_bound(), MAX_GAIN_BOUND);
}

#[test]
fn overweight_json_netlists_are_rejected() {
    let nets: Vec<String> = (1..=3)
        .map(|leaf| format!(r#"{{"pins": [0, {leaf}], "weight": {MAX_NET_WEIGHT}}}"#))
        .collect();
    let json = format!(
        r#"{{"modules": [{{}}, {{}}, {{}}, {{}}], "nets": [{}]}}"#,
        nets.join(", ")
    );
    let err = netlist_from_json(&json).unwrap_err();
    assert_eq!(err.info().code, "gain-bound-overflow");
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        netlist_from_json("{\"modules\": 3}"),
        Err(FmError::Serde(info)) if info.code == "deserialize-json"
    ));
    let dangling = r#"{"modules": [{}], "nets": [{"pins": [0, 4]}]}"#;
    let err = netlist_from_json(dangling).unwrap_err();
    assert_eq!(err.info().code, "unknown-module");
    assert_eq!(err.info().context.get("net").map(String::as_str), Some("0"));
}

#[test]
fn set_fixed_toggles_membership() {
    let mut netlist = NetlistImpl::with_modules(NetlistConfig::default(), 4);
    netlist.set_fixed(ModuleId::from_index(3), true).unwrap();
    netlist.set_fixed(ModuleId::from_index(1), true).unwrap();
    netlist.set_fixed(ModuleId::from_index(1), true).unwrap();
    assert_eq!(
        netlist.fixed_modules(),
        &[ModuleId::from_index(1), ModuleId::from_index(3)]
    );
    netlist.set_fixed(ModuleId::from_index(1), false).unwrap();
    assert_eq!(netlist.fixed_modules(), &[ModuleId::from_index(3)]);
    assert!(netlist.set_fixed(ModuleId::from_index(8), true).is_err());
}

#[test]
fn hash_ignores_net_order_but_not_weights() {
    let build = |order: &[usize], weight: u32| {
        let mut netlist = NetlistImpl::with_modules(NetlistConfig::default(), 3);
        let nets = [[0usize, 1], [1, 2], [0, 2]];
        for idx in order {
            let pins: Vec<ModuleId> = nets[*idx].iter().map(|v| ModuleId::from_index(*v)).collect();
            netlist.add_net_weighted(&pins, weight).unwrap();
        }
        netlist
    };
    let forward = canonical_hash(&build(&[0, 1, 2], 1));
    assert_eq!(forward, canonical_hash(&build(&[2, 0, 1], 1)));
    assert_ne!(forward, canonical_hash(&build(&[0, 1, 2], 2)));
}

#[test]
fn dragonfly_fixture_shape() {
    let netlist = dragonfly().unwrap();
    assert_eq!(netlist.num_modules(), 7);
    assert_eq!(netlist.num_nets(), 6);
    let weights: Vec<u32> = netlist.modules().map(|m| netlist.module_weight(m)).collect();
    assert_eq!(weights, DRAGONFLY_WEIGHTS);
    assert_eq!(netlist.fixed_modules().len(), 3);
    assert_eq!(netlist.max_degree(), 4);
    let degrees: Vec<usize> = netlist.nets().map(|net| netlist.degree(net)).collect();
    assert_eq!(degrees, vec![3, 3, 3, 2, 2, 4]);
}
