use fmpart_core::{ModuleId, Netlist};

use crate::gain_calc::KWayGainCalc;
use crate::gain_mgr::{GainBuckets, GainManager};
use crate::moves::MoveInfoV;
use crate::robin::RoundRobin;

/// Gain manager for K-way partitioning.
///
/// Queue `k` holds the links `(k, v)` of modules outside partition `k`; the
/// link of a module's own partition waits outside every queue.
#[derive(Debug)]
pub struct KWayGainMgr<'a, N> {
    netlist: &'a N,
    calc: KWayGainCalc<'a, N>,
    buckets: GainBuckets,
    robin: RoundRobin,
}

impl<'a, N: Netlist> KWayGainMgr<'a, N> {
    /// Builds the calculator and `num_parts` queues sized by the netlist's
    /// gain bound.
    ///
    /// # Panics
    ///
    /// Panics when the gain bound exceeds [`fmpart_core::MAX_GAIN_BOUND`].
    pub fn new(netlist: &'a N, num_parts: u8) -> Self {
        let mut calc = KWayGainCalc::new(netlist, num_parts);
        let buckets = GainBuckets::new(num_parts, netlist.gain_bound(), calc.links_mut());
        let robin = calc.robin().clone();
        Self {
            netlist,
            calc,
            buckets,
            robin,
        }
    }

    /// Returns the underlying gain calculator.
    pub fn calc(&self) -> &KWayGainCalc<'a, N> {
        &self.calc
    }

    fn modify_key(&mut self, part_w: u8, w: ModuleId, deltas: &[i32]) {
        for k in self.robin.exclude(part_w) {
            let link = self.calc.link(k, w);
            self.buckets
                .queue(k)
                .modify_key(self.calc.links_mut(), link, deltas[usize::from(k)]);
        }
    }

    fn set_key(&mut self, which: u8, v: ModuleId, key: i32) {
        let link = self.calc.link(which, v);
        self.calc.links_mut().set_key(link, key);
    }
}

impl<'a, N: Netlist> GainManager for KWayGainMgr<'a, N> {
    fn init(&mut self, part: &[u8]) -> i64 {
        let netlist = self.netlist;
        let totalcost = self.calc.init(part);
        self.buckets.clear(self.calc.links_mut());
        for v in netlist.modules() {
            let part_v = part[v.index()];
            for k in self.robin.exclude(part_v) {
                let link = self.calc.link(k, v);
                self.buckets
                    .queue(k)
                    .append_direct(self.calc.links_mut(), link);
            }
            let own = self.calc.link(part_v, v);
            self.calc.links_mut().set_key(own, 0);
            self.buckets.park(self.calc.links_mut(), own);
        }
        for v in netlist.fixed_modules() {
            self.lock_all(part[v.index()], *v);
        }
        totalcost
    }

    fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn is_empty_togo(&self, to: u8) -> bool {
        self.buckets.is_empty_togo(to)
    }

    fn select(&mut self, part: &[u8]) -> (MoveInfoV, i32) {
        let (to, link, gain) = self.buckets.select(self.calc.links_mut());
        let v = self.calc.module_of(link);
        let from = part[v.index()];
        (MoveInfoV { v, from, to }, gain)
    }

    fn select_togo(&mut self, to: u8) -> (ModuleId, i32) {
        let (link, gain) = self.buckets.select_togo(self.calc.links_mut(), to);
        (self.calc.module_of(link), gain)
    }

    fn update_move(&mut self, part: &[u8], mv: &MoveInfoV) {
        let netlist = self.netlist;
        self.calc.update_move_init();
        for net in netlist.incident_nets(mv.v) {
            let info = mv.on_net(*net);
            match netlist.degree(*net) {
                0 | 1 => {}
                2 => {
                    let (w, deltas) = self.calc.update_move_2pin_net(part, &info);
                    self.modify_key(part[w.index()], w, &deltas);
                }
                3 => {
                    let (others, deltas) = self.calc.update_move_3pin_net(part, &info);
                    for (w, deltas) in others.into_iter().zip(deltas) {
                        self.modify_key(part[w.index()], w, &deltas);
                    }
                }
                _ => {
                    for (w, deltas) in self.calc.update_move_general_net(part, &info) {
                        self.modify_key(part[w.index()], w, &deltas);
                    }
                }
            }
        }
    }

    fn update_move_v(&mut self, mv: &MoveInfoV, gain: i32) {
        for k in 0..self.calc.num_parts() {
            if k == mv.from || k == mv.to {
                continue;
            }
            let link = self.calc.link(k, mv.v);
            let delta = self.calc.delta_gain_v()[usize::from(k)];
            self.buckets
                .queue(k)
                .modify_key(self.calc.links_mut(), link, delta);
        }
        self.set_key(mv.from, mv.v, -gain);
        self.set_key(mv.to, mv.v, 0);
    }

    fn lock(&mut self, which: u8, v: ModuleId) {
        let link = self.calc.link(which, v);
        self.buckets.queue(which).lock(self.calc.links_mut(), link);
    }

    fn lock_all(&mut self, _from: u8, v: ModuleId) {
        for k in 0..self.calc.num_parts() {
            self.lock(k, v);
        }
    }
}
