use fmpart_core::rng::RngHandle;
use fmpart_core::Netlist;
use fmpart_graph::{
    canonical_hash, contract, gen_random_mixed_netlist, gen_random_weighted_netlist,
    netlist_from_bytes, netlist_to_bytes, NetlistImpl,
};
use proptest::prelude::*;

fn check_invariants(netlist: &NetlistImpl, max_pins: usize) {
    for net in netlist.nets() {
        let pins = netlist.incident_modules(net);
        assert!(pins.len() >= 2 && pins.len() <= max_pins);
        assert!(pins.windows(2).all(|pair| pair[0] < pair[1]));
        for pin in pins {
            assert!(netlist.incident_nets(*pin).contains(&net));
        }
    }
    let incidences: usize = netlist
        .modules()
        .map(|module| netlist.incident_nets(module).len())
        .sum();
    assert_eq!(incidences, netlist.num_pins());
}

proptest! {
    #[test]
    fn random_generators_respect_invariants(
        seed in any::<u64>(),
        modules in 2usize..40,
        nets in 0usize..60,
        max_pins in 2usize..6,
    ) {
        let mut rng = RngHandle::from_seed(seed);
        let netlist = gen_random_weighted_netlist(modules, nets, max_pins, 4, 3, &mut rng).unwrap();
        check_invariants(&netlist, max_pins);
        prop_assert_eq!(netlist.num_modules(), modules);
        prop_assert_eq!(netlist.num_nets(), nets);

        let mut again = RngHandle::from_seed(seed);
        let replay = gen_random_weighted_netlist(modules, nets, max_pins, 4, 3, &mut again).unwrap();
        prop_assert_eq!(canonical_hash(&netlist), canonical_hash(&replay));

        let bytes = netlist_to_bytes(&netlist).unwrap();
        let restored = netlist_from_bytes(&bytes).unwrap();
        prop_assert_eq!(canonical_hash(&netlist), canonical_hash(&restored));
    }

    #[test]
    fn pairwise_contraction_preserves_weight(seed in any::<u64>(), modules in 2usize..30) {
        let mut rng = RngHandle::from_seed(seed);
        let netlist = gen_random_weighted_netlist(modules, modules * 2, 4, 5, 2, &mut rng).unwrap();
        let cluster_of: Vec<u32> = (0..modules as u32).map(|v| v / 2).collect();
        let contraction = contract(&netlist, &cluster_of).unwrap();
        let coarse = contraction.coarse();
        prop_assert_eq!(coarse.num_modules(), (modules + 1) / 2);
        prop_assert_eq!(coarse.total_weight(), netlist.total_weight());
        check_invariants(coarse, 4);
    }

    #[test]
    fn mixed_generator_covers_degenerate_shapes(
        seed in any::<u64>(),
        modules in 2usize..40,
        nets in 0usize..60,
        max_pins in 1usize..6,
    ) {
        let mut rng = RngHandle::from_seed(seed);
        let netlist = gen_random_mixed_netlist(modules, nets, max_pins, &mut rng).unwrap();
        prop_assert_eq!(netlist.num_modules(), modules);
        prop_assert_eq!(netlist.num_nets(), nets);
        for net in netlist.nets() {
            let degree = netlist.degree(net);
            prop_assert!(degree >= 1 && degree <= max_pins);
            prop_assert!((1..=3).contains(&netlist.net_weight(net)));
        }
        for module in netlist.modules() {
            prop_assert!(netlist.module_weight(module) <= 3);
        }
        for module in netlist.fixed_modules() {
            prop_assert!(netlist.is_fixed(*module));
        }

        let mut again = RngHandle::from_seed(seed);
        let replay = gen_random_mixed_netlist(modules, nets, max_pins, &mut again).unwrap();
        prop_assert_eq!(canonical_hash(&netlist), canonical_hash(&replay));
    }
}
