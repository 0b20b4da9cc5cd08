use fmpart_core::{ModuleId, NetId, Netlist};

use crate::dllink::LinkArena;
use crate::gain_calc::bi::other_pins;
use crate::moves::MoveInfo;
use crate::robin::RoundRobin;

/// Gain bookkeeping for K-way partitioning.
///
/// Link `k * n + v` holds the gain of moving module `v` into partition `k`.
/// The link for a module's own partition is kept at zero.
#[derive(Debug)]
pub struct KWayGainCalc<'a, N> {
    netlist: &'a N,
    num_parts: u8,
    robin: RoundRobin,
    links: LinkArena,
    totalcost: i64,
    delta_gain_v: Vec<i32>,
}

impl<'a, N: Netlist> KWayGainCalc<'a, N> {
    /// Allocates `num_parts` links per module.
    pub fn new(netlist: &'a N, num_parts: u8) -> Self {
        Self {
            netlist,
            num_parts,
            robin: RoundRobin::new(num_parts),
            links: LinkArena::new(usize::from(num_parts) * netlist.num_modules()),
            totalcost: 0,
            delta_gain_v: vec![0; usize::from(num_parts)],
        }
    }

    /// Returns the number of partitions.
    pub fn num_parts(&self) -> u8 {
        self.num_parts
    }

    /// Returns the partition cycle used for delta broadcasts.
    pub fn robin(&self) -> &RoundRobin {
        &self.robin
    }

    /// Returns the link arena.
    pub fn links(&self) -> &LinkArena {
        &self.links
    }

    /// Returns the link arena for queue operations.
    pub fn links_mut(&mut self) -> &mut LinkArena {
        &mut self.links
    }

    /// Returns the link index for moving `v` into partition `k`.
    pub fn link(&self, k: u8, v: ModuleId) -> usize {
        usize::from(k) * self.netlist.num_modules() + v.index()
    }

    /// Returns the module a link index belongs to.
    pub fn module_of(&self, link: usize) -> ModuleId {
        ModuleId::from_index(link % self.netlist.num_modules())
    }

    /// Returns the current gain of moving `v` into partition `k`.
    pub fn gain(&self, k: u8, v: ModuleId) -> i32 {
        self.links.key(self.link(k, v))
    }

    /// Returns the accumulated self-delta of the moved module, per partition.
    pub fn delta_gain_v(&self) -> &[i32] {
        &self.delta_gain_v
    }

    /// Recomputes every gain from scratch and returns the connectivity cost.
    pub fn init(&mut self, part: &[u8]) -> i64 {
        self.totalcost = 0;
        for link in 0..self.links.num_items() {
            self.links.set_key(link, 0);
        }
        let netlist = self.netlist;
        for net in netlist.nets() {
            self.init_gain(net, part);
        }
        self.totalcost
    }

    fn init_gain(&mut self, net: NetId, part: &[u8]) {
        match self.netlist.degree(net) {
            0 | 1 => {}
            2 => self.init_gain_2pin_net(net, part),
            3 => self.init_gain_3pin_net(net, part),
            _ => self.init_gain_general_net(net, part),
        }
    }

    fn modify_gain(&mut self, k: u8, v: ModuleId, weight: i32) {
        let link = self.link(k, v);
        self.links.add_key(link, weight);
    }

    fn modify_gain_except(&mut self, part_v: u8, v: ModuleId, weight: i32) {
        for k in 0..self.num_parts {
            if k != part_v {
                self.modify_gain(k, v, weight);
            }
        }
    }

    fn init_gain_2pin_net(&mut self, net: NetId, part: &[u8]) {
        let netlist = self.netlist;
        let pins = netlist.incident_modules(net);
        let (w, v) = (pins[0], pins[1]);
        let (pw, pv) = (part[w.index()], part[v.index()]);
        let weight = netlist.net_weight(net) as i32;
        if pw != pv {
            self.totalcost += i64::from(weight);
            self.modify_gain(pv, w, weight);
            self.modify_gain(pw, v, weight);
        } else {
            self.modify_gain_except(pv, w, -weight);
            self.modify_gain_except(pv, v, -weight);
        }
    }

    fn init_gain_3pin_net(&mut self, net: NetId, part: &[u8]) {
        let netlist = self.netlist;
        let pins = netlist.incident_modules(net);
        let (w, v, u) = (pins[0], pins[1], pins[2]);
        let (pw, pv, pu) = (part[w.index()], part[v.index()], part[u.index()]);
        let weight = netlist.net_weight(net) as i32;

        if pu == pv {
            if pw == pv {
                for x in [w, v, u] {
                    self.modify_gain_except(pv, x, -weight);
                }
            } else {
                self.init_gain_3pin_outlier([u, v], pu, w, pw, weight);
            }
        } else if pw == pv {
            self.init_gain_3pin_outlier([w, v], pv, u, pu, weight);
        } else if pw == pu {
            self.init_gain_3pin_outlier([w, u], pw, v, pv, weight);
        } else {
            self.totalcost += 2 * i64::from(weight);
            self.modify_gain(pv, u, weight);
            self.modify_gain(pw, u, weight);
            self.modify_gain(pu, v, weight);
            self.modify_gain(pw, v, weight);
            self.modify_gain(pu, w, weight);
            self.modify_gain(pv, w, weight);
        }
    }

    fn init_gain_3pin_outlier(
        &mut self,
        pair: [ModuleId; 2],
        part_pair: u8,
        outlier: ModuleId,
        part_outlier: u8,
        weight: i32,
    ) {
        self.totalcost += i64::from(weight);
        self.modify_gain(part_pair, outlier, weight);
        for k in 0..self.num_parts {
            if k == part_pair || k == part_outlier {
                continue;
            }
            for x in pair {
                self.modify_gain(k, x, -weight);
            }
        }
    }

    fn init_gain_general_net(&mut self, net: NetId, part: &[u8]) {
        let netlist = self.netlist;
        let pins = netlist.incident_modules(net);
        let weight = netlist.net_weight(net) as i32;
        let mut num = vec![0usize; usize::from(self.num_parts)];
        for w in pins {
            num[usize::from(part[w.index()])] += 1;
        }
        let spanned = num.iter().filter(|count| **count > 0).count() as i64;
        self.totalcost += i64::from(weight) * (spanned - 1);

        for k in 0..self.num_parts {
            match num[usize::from(k)] {
                0 => {
                    for w in pins {
                        self.modify_gain(k, *w, -weight);
                    }
                }
                1 => {
                    if let Some(w) = pins.iter().find(|w| part[w.index()] == k) {
                        self.modify_gain_except(k, *w, weight);
                    }
                }
                _ => {}
            }
        }
    }

    /// Clears the moved module's per-partition delta accumulator.
    pub fn update_move_init(&mut self) {
        self.delta_gain_v.iter_mut().for_each(|delta| *delta = 0);
    }

    fn add_delta_v(&mut self, weight: i32) {
        self.delta_gain_v.iter_mut().for_each(|delta| *delta += weight);
    }

    /// Gain deltas (per target partition) for the other pin of a two-pin net.
    pub fn update_move_2pin_net(&mut self, part: &[u8], mv: &MoveInfo) -> (ModuleId, Vec<i32>) {
        let pins = self.netlist.incident_modules(mv.net);
        let w = if pins[0] == mv.v { pins[1] } else { pins[0] };
        let part_w = part[w.index()];
        let weight = self.netlist.net_weight(mv.net) as i32;
        let mut delta_gain_w = vec![0; usize::from(self.num_parts)];

        if part_w == mv.from {
            delta_gain_w.iter_mut().for_each(|delta| *delta += weight);
            self.add_delta_v(weight);
        } else if part_w == mv.to {
            delta_gain_w.iter_mut().for_each(|delta| *delta -= weight);
            self.add_delta_v(-weight);
        }
        delta_gain_w[usize::from(mv.from)] -= weight;
        delta_gain_w[usize::from(mv.to)] += weight;
        (w, delta_gain_w)
    }

    /// Gain deltas (per target partition) for the two other pins of a
    /// three-pin net.
    pub fn update_move_3pin_net(
        &mut self,
        part: &[u8],
        mv: &MoveInfo,
    ) -> ([ModuleId; 2], [Vec<i32>; 2]) {
        let others = other_pins(self.netlist.incident_modules(mv.net), mv.v);
        let (w, u) = (others[0], others[1]);
        let (part_w, part_u) = (part[w.index()], part[u.index()]);
        let k = usize::from(self.num_parts);
        let mut delta_gain = [vec![0; k], vec![0; k]];

        let mut weight = self.netlist.net_weight(mv.net) as i32;
        let (mut l, mut u_part) = (mv.from, mv.to);
        for _ in 0..2 {
            let li = usize::from(l);
            if part_w == part_u {
                if part_w != l {
                    delta_gain[0][li] -= weight;
                    delta_gain[1][li] -= weight;
                    if part_w == u_part {
                        self.add_delta_v(-weight);
                    }
                }
            } else if part_w == l {
                delta_gain[0].iter_mut().for_each(|delta| *delta += weight);
            } else if part_u == l {
                delta_gain[1].iter_mut().for_each(|delta| *delta += weight);
            } else {
                delta_gain[0][li] -= weight;
                delta_gain[1][li] -= weight;
                if part_w == u_part || part_u == u_part {
                    self.add_delta_v(-weight);
                }
            }
            weight = -weight;
            std::mem::swap(&mut l, &mut u_part);
        }
        ([w, u], delta_gain)
    }

    /// Gain deltas (per target partition) for the other pins of a net with
    /// more than three pins.
    pub fn update_move_general_net(
        &mut self,
        part: &[u8],
        mv: &MoveInfo,
    ) -> Vec<(ModuleId, Vec<i32>)> {
        let others = other_pins(self.netlist.incident_modules(mv.net), mv.v);
        let k = usize::from(self.num_parts);
        let mut num = vec![0usize; k];
        for w in &others {
            num[usize::from(part[w.index()])] += 1;
        }
        let mut deltas: Vec<(ModuleId, Vec<i32>)> =
            others.into_iter().map(|w| (w, vec![0; k])).collect();

        let mut weight = self.netlist.net_weight(mv.net) as i32;
        let (mut l, mut u) = (mv.from, mv.to);
        for _ in 0..2 {
            match num[usize::from(l)] {
                0 => {
                    for (_, delta) in deltas.iter_mut() {
                        delta[usize::from(l)] -= weight;
                    }
                    if num[usize::from(u)] > 0 {
                        self.add_delta_v(-weight);
                    }
                }
                1 => {
                    if let Some((_, delta)) =
                        deltas.iter_mut().find(|(w, _)| part[w.index()] == l)
                    {
                        delta.iter_mut().for_each(|d| *d += weight);
                    }
                }
                _ => {}
            }
            weight = -weight;
            std::mem::swap(&mut l, &mut u);
        }
        deltas
    }
}
