use fmpart_core::{ModuleId, Netlist};

use crate::gain_calc::BiGainCalc;
use crate::gain_mgr::{GainBuckets, GainManager};
use crate::moves::MoveInfoV;

/// Gain manager for bipartitioning.
///
/// Queue `k` holds the modules currently in partition `1 - k`.
#[derive(Debug)]
pub struct BiGainMgr<'a, N> {
    netlist: &'a N,
    calc: BiGainCalc<'a, N>,
    buckets: GainBuckets,
}

impl<'a, N: Netlist> BiGainMgr<'a, N> {
    /// Builds the calculator and two queues sized by the netlist's gain bound.
    ///
    /// # Panics
    ///
    /// Panics when the gain bound exceeds [`fmpart_core::MAX_GAIN_BOUND`].
    pub fn new(netlist: &'a N) -> Self {
        let mut calc = BiGainCalc::new(netlist);
        let buckets = GainBuckets::new(2, netlist.gain_bound(), calc.links_mut());
        Self {
            netlist,
            calc,
            buckets,
        }
    }

    /// Returns the underlying gain calculator.
    pub fn calc(&self) -> &BiGainCalc<'a, N> {
        &self.calc
    }

    fn modify_key(&mut self, part_w: u8, w: ModuleId, delta: i32) {
        let link = self.calc.link(w);
        self.buckets
            .queue(1 - part_w)
            .modify_key(self.calc.links_mut(), link, delta);
    }
}

impl<'a, N: Netlist> GainManager for BiGainMgr<'a, N> {
    fn init(&mut self, part: &[u8]) -> i64 {
        let netlist = self.netlist;
        let totalcost = self.calc.init(part);
        self.buckets.clear(self.calc.links_mut());
        for v in netlist.modules() {
            let link = self.calc.link(v);
            self.buckets
                .queue(1 - part[v.index()])
                .append_direct(self.calc.links_mut(), link);
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
        let v = ModuleId::from_index(link);
        let from = part[v.index()];
        (MoveInfoV { v, from, to }, gain)
    }

    fn select_togo(&mut self, to: u8) -> (ModuleId, i32) {
        let (link, gain) = self.buckets.select_togo(self.calc.links_mut(), to);
        (ModuleId::from_index(link), gain)
    }

    fn update_move(&mut self, part: &[u8], mv: &MoveInfoV) {
        let netlist = self.netlist;
        self.calc.update_move_init();
        for net in netlist.incident_nets(mv.v) {
            let info = mv.on_net(*net);
            match netlist.degree(*net) {
                0 | 1 => {}
                2 => {
                    let (w, delta) = self.calc.update_move_2pin_net(part, &info);
                    self.modify_key(part[w.index()], w, delta);
                }
                3 => {
                    let (others, deltas) = self.calc.update_move_3pin_net(part, &info);
                    for (w, delta) in others.into_iter().zip(deltas) {
                        self.modify_key(part[w.index()], w, delta);
                    }
                }
                _ => {
                    for (w, delta) in self.calc.update_move_general_net(part, &info) {
                        self.modify_key(part[w.index()], w, delta);
                    }
                }
            }
        }
    }

    fn update_move_v(&mut self, mv: &MoveInfoV, gain: i32) {
        let link = self.calc.link(mv.v);
        self.calc.links_mut().set_key(link, -gain);
    }

    fn lock(&mut self, which: u8, v: ModuleId) {
        let link = self.calc.link(v);
        self.buckets.queue(which).lock(self.calc.links_mut(), link);
    }

    fn lock_all(&mut self, from: u8, v: ModuleId) {
        self.lock(1 - from, v);
    }
}
