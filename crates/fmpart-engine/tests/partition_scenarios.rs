use fmpart_core::{ModuleId, NetId, Netlist, MAX_GAIN_BOUND};
use fmpart_engine::{
    cut_cost, part_weights, BiConstrMgr, BiGainMgr, BoundarySnapshot, ConstraintManager,
    KWayConstrMgr, KWayGainMgr, LegalCheck, ListSnapshot, PartMgr,
};
use fmpart_graph::{dragonfly, NetlistConfig, NetlistImpl, MAX_NET_WEIGHT};

/// Four unit modules with a single net joining the first two.
fn lone_pair() -> NetlistImpl {
    let mut netlist = NetlistImpl::with_modules(NetlistConfig::default(), 4);
    netlist
        .add_net(&[ModuleId::from_index(0), ModuleId::from_index(1)])
        .unwrap();
    netlist
}

#[test]
fn legalize_fills_the_empty_side_without_cutting() {
    let netlist = lone_pair();
    let mut mgr = PartMgr::new(
        &netlist,
        BiGainMgr::new(&netlist),
        BiConstrMgr::new(&netlist, 0.5),
        ListSnapshot,
    );
    assert_eq!(mgr.validator().lowerbound(), 2);

    let mut part = vec![0u8; 4];
    assert_eq!(mgr.legalize(&mut part), LegalCheck::AllSatisfied);
    assert_eq!(part, vec![0, 0, 1, 1]);
    assert_eq!(mgr.totalcost(), 0);

    mgr.optimize(&mut part);
    assert_eq!(part, vec![0, 0, 1, 1]);
    assert_eq!(mgr.totalcost(), 0);
}

#[test]
fn optimize_rejects_moves_that_starve_a_side() {
    let netlist = lone_pair();
    let mut mgr = PartMgr::new(
        &netlist,
        BiGainMgr::new(&netlist),
        BiConstrMgr::new(&netlist, 0.4),
        ListSnapshot,
    );
    let mut part = vec![0u8, 1, 0, 0];
    mgr.init(&part);
    assert_eq!(mgr.totalcost(), 1);

    // Moving module 1 would empty side 1; moving module 0 joins it instead.
    mgr.optimize(&mut part);
    assert_eq!(part, vec![1, 1, 0, 0]);
    assert_eq!(mgr.totalcost(), 0);
    assert_eq!(mgr.validator().diff(), &[2, 2]);
}

#[test]
fn legalize_reports_when_no_module_can_move() {
    let mut netlist = NetlistImpl::new(NetlistConfig::default());
    let heavy = netlist.add_module_weighted(5);
    let light = netlist.add_module_weighted(1);
    netlist.add_net(&[heavy, light]).unwrap();

    let mut mgr = PartMgr::new(
        &netlist,
        BiGainMgr::new(&netlist),
        BiConstrMgr::new(&netlist, 0.9),
        ListSnapshot,
    );
    let mut part = vec![0u8, 0];
    let status = mgr.legalize(&mut part);
    assert_ne!(status, LegalCheck::AllSatisfied);
    assert_eq!(mgr.totalcost(), cut_cost(&netlist, &part));
}

#[test]
fn dragonfly_bipartition_keeps_pads_and_balance() {
    let netlist = dragonfly().unwrap();
    let mut mgr = PartMgr::new(
        &netlist,
        BiGainMgr::new(&netlist),
        BiConstrMgr::new(&netlist, 0.4),
        ListSnapshot,
    );
    let mut part = vec![0u8; netlist.num_modules()];

    assert_eq!(mgr.legalize(&mut part), LegalCheck::AllSatisfied);
    let legal_cost = mgr.totalcost();
    assert_eq!(legal_cost, cut_cost(&netlist, &part));

    mgr.optimize(&mut part);
    assert!(mgr.totalcost() <= legal_cost);
    assert_eq!(mgr.totalcost(), cut_cost(&netlist, &part));
    for pad in netlist.fixed_modules() {
        assert_eq!(part[pad.index()], 0);
    }
    let lowerbound = mgr.validator().lowerbound();
    for weight in part_weights(&netlist, &part, 2) {
        assert!(weight >= lowerbound);
    }
}

#[test]
fn dragonfly_three_way_with_boundary_snapshots() {
    let netlist = dragonfly().unwrap();
    let mut mgr = PartMgr::new(
        &netlist,
        KWayGainMgr::new(&netlist, 3),
        KWayConstrMgr::new(&netlist, 0.4, 3),
        BoundarySnapshot::new(&netlist),
    );
    let mut part = vec![0u8; netlist.num_modules()];
    assert_eq!(mgr.validator().lowerbound(), 3);
    assert_eq!(mgr.legalize(&mut part), LegalCheck::AllSatisfied);
    let legal_cost = mgr.totalcost();
    assert_eq!(legal_cost, cut_cost(&netlist, &part));

    mgr.optimize(&mut part);
    assert!(mgr.totalcost() <= legal_cost);
    assert_eq!(mgr.totalcost(), cut_cost(&netlist, &part));
    for pad in netlist.fixed_modules() {
        assert_eq!(part[pad.index()], 0);
    }
    for weight in part_weights(&netlist, &part, 3) {
        assert!(weight >= 3);
    }
}

/// One hub wired to 64 leaves whose nets sum to exactly the gain bound.
fn saturated_star() -> NetlistImpl {
    let mut netlist = NetlistImpl::new(NetlistConfig::default());
    let hub = netlist.add_module();
    for _ in 0..64 {
        let leaf = netlist.add_module();
        netlist
            .add_net_weighted(&[hub, leaf], MAX_NET_WEIGHT / 64)
            .unwrap();
    }
    netlist
}

#[test]
fn star_at_the_gain_bound_partitions() {
    let netlist = saturated_star();
    assert_eq!(netlist.gain_bound(), MAX_GAIN_BOUND);

    let mut mgr = PartMgr::new(
        &netlist,
        KWayGainMgr::new(&netlist, 3),
        KWayConstrMgr::new(&netlist, 0.4, 3),
        ListSnapshot,
    );
    let mut part = vec![0u8; netlist.num_modules()];
    assert_eq!(mgr.legalize(&mut part), LegalCheck::AllSatisfied);
    mgr.optimize(&mut part);
    assert_eq!(mgr.totalcost(), cut_cost(&netlist, &part));
    let lowerbound = mgr.validator().lowerbound();
    for weight in part_weights(&netlist, &part, 3) {
        assert!(weight >= lowerbound);
    }
}

/// Two modules joined by a net heavier than any queue can hold.
struct OverweightPair {
    pins: [ModuleId; 2],
    nets: [NetId; 1],
}

impl Netlist for OverweightPair {
    fn num_modules(&self) -> usize {
        2
    }

    fn num_nets(&self) -> usize {
        1
    }

    fn incident_modules(&self, _: NetId) -> &[ModuleId] {
        &self.pins
    }

    fn incident_nets(&self, _: ModuleId) -> &[NetId] {
        &self.nets
    }

    fn module_weight(&self, _: ModuleId) -> u32 {
        1
    }

    fn net_weight(&self, _: NetId) -> u32 {
        MAX_GAIN_BOUND as u32 + 1
    }

    fn fixed_modules(&self) -> &[ModuleId] {
        &[]
    }

    fn is_fixed(&self, _: ModuleId) -> bool {
        false
    }
}

#[test]
#[should_panic(expected = "exceeds the queue limit")]
fn gain_managers_refuse_unbounded_netlists() {
    let netlist = OverweightPair {
        pins: [ModuleId::from_index(0), ModuleId::from_index(1)],
        nets: [NetId::from_index(0)],
    };
    let _ = BiGainMgr::new(&netlist);
}
