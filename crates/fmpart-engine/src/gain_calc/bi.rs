use fmpart_core::{ModuleId, NetId, Netlist};

use crate::dllink::LinkArena;
use crate::moves::MoveInfo;

/// Gain bookkeeping for bipartitioning.
///
/// Link `v` holds the gain of moving module `v` to the opposite side.
#[derive(Debug)]
pub struct BiGainCalc<'a, N> {
    netlist: &'a N,
    links: LinkArena,
    totalcost: i64,
}

impl<'a, N: Netlist> BiGainCalc<'a, N> {
    /// Allocates one link per module.
    pub fn new(netlist: &'a N) -> Self {
        Self {
            netlist,
            links: LinkArena::new(netlist.num_modules()),
            totalcost: 0,
        }
    }

    /// Returns the link arena.
    pub fn links(&self) -> &LinkArena {
        &self.links
    }

    /// Returns the link arena for queue operations.
    pub fn links_mut(&mut self) -> &mut LinkArena {
        &mut self.links
    }

    /// Returns the link index of module `v`.
    pub fn link(&self, v: ModuleId) -> usize {
        v.index()
    }

    /// Returns the current gain of moving `v` to the other side.
    pub fn gain(&self, v: ModuleId) -> i32 {
        self.links.key(v.index())
    }

    /// Recomputes every gain from scratch and returns the cut cost.
    pub fn init(&mut self, part: &[u8]) -> i64 {
        self.totalcost = 0;
        for v in 0..self.links.num_items() {
            self.links.set_key(v, 0);
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

    fn modify_gain(&mut self, v: ModuleId, weight: i32) {
        self.links.add_key(v.index(), weight);
    }

    fn init_gain_2pin_net(&mut self, net: NetId, part: &[u8]) {
        let netlist = self.netlist;
        let pins = netlist.incident_modules(net);
        let (w, v) = (pins[0], pins[1]);
        let weight = netlist.net_weight(net) as i32;
        if part[w.index()] != part[v.index()] {
            self.totalcost += i64::from(weight);
            self.modify_gain(w, weight);
            self.modify_gain(v, weight);
        } else {
            self.modify_gain(w, -weight);
            self.modify_gain(v, -weight);
        }
    }

    fn init_gain_3pin_net(&mut self, net: NetId, part: &[u8]) {
        let netlist = self.netlist;
        let pins = netlist.incident_modules(net);
        let (w, v, u) = (pins[0], pins[1], pins[2]);
        let weight = netlist.net_weight(net) as i32;
        let (pw, pv, pu) = (part[w.index()], part[v.index()], part[u.index()]);

        let outlier = if pu == pv {
            if pw == pv {
                for x in [w, v, u] {
                    self.modify_gain(x, -weight);
                }
                return;
            }
            w
        } else if pw == pv {
            u
        } else {
            v
        };
        self.totalcost += i64::from(weight);
        self.modify_gain(outlier, weight);
    }

    fn init_gain_general_net(&mut self, net: NetId, part: &[u8]) {
        let netlist = self.netlist;
        let pins = netlist.incident_modules(net);
        let weight = netlist.net_weight(net) as i32;
        let mut num = [0usize; 2];
        for w in pins {
            num[usize::from(part[w.index()])] += 1;
        }
        if num[0] > 0 && num[1] > 0 {
            self.totalcost += i64::from(weight);
        }
        for k in 0..2u8 {
            match num[usize::from(k)] {
                0 => {
                    for w in pins {
                        self.modify_gain(*w, -weight);
                    }
                }
                1 => {
                    if let Some(w) = pins.iter().find(|w| part[w.index()] == k) {
                        self.modify_gain(*w, weight);
                    }
                }
                _ => {}
            }
        }
    }

    /// Resets the per-move accumulator; bipartitioning keeps none.
    pub fn update_move_init(&mut self) {}

    /// Gain delta for the other pin of a two-pin net.
    pub fn update_move_2pin_net(&self, part: &[u8], mv: &MoveInfo) -> (ModuleId, i32) {
        let pins = self.netlist.incident_modules(mv.net);
        let w = if pins[0] == mv.v { pins[1] } else { pins[0] };
        let weight = self.netlist.net_weight(mv.net) as i32;
        let delta = if part[w.index()] == mv.from {
            2 * weight
        } else {
            -2 * weight
        };
        (w, delta)
    }

    /// Gain deltas for the two other pins of a three-pin net.
    pub fn update_move_3pin_net(&self, part: &[u8], mv: &MoveInfo) -> ([ModuleId; 2], [i32; 2]) {
        let others = other_pins(self.netlist.incident_modules(mv.net), mv.v);
        let weight = self.netlist.net_weight(mv.net) as i32;
        let (w, u) = (others[0], others[1]);
        let (pw, pu) = (part[w.index()], part[u.index()]);

        let deltas = if pw == pu {
            let delta = if pw == mv.from { weight } else { -weight };
            [delta, delta]
        } else {
            let delta = if pw == mv.from { weight } else { -weight };
            [delta, -delta]
        };
        ([w, u], deltas)
    }

    /// Gain deltas for the other pins of a net with more than three pins.
    pub fn update_move_general_net(&self, part: &[u8], mv: &MoveInfo) -> Vec<(ModuleId, i32)> {
        let others = other_pins(self.netlist.incident_modules(mv.net), mv.v);
        let mut num = [0usize; 2];
        for w in &others {
            num[usize::from(part[w.index()])] += 1;
        }
        let mut deltas: Vec<(ModuleId, i32)> = others.into_iter().map(|w| (w, 0)).collect();

        let mut weight = self.netlist.net_weight(mv.net) as i32;
        for l_part in [mv.from, mv.to] {
            match num[usize::from(l_part)] {
                0 => {
                    for (_, delta) in deltas.iter_mut() {
                        *delta -= weight;
                    }
                }
                1 => {
                    if let Some((_, delta)) =
                        deltas.iter_mut().find(|(w, _)| part[w.index()] == l_part)
                    {
                        *delta += weight;
                    }
                }
                _ => {}
            }
            weight = -weight;
        }
        deltas
    }
}

/// Returns the pins of a net other than `v`.
pub(crate) fn other_pins(pins: &[ModuleId], v: ModuleId) -> Vec<ModuleId> {
    pins.iter().copied().filter(|w| *w != v).collect()
}
